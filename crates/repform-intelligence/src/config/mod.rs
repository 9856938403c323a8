// ABOUTME: Configuration for the repetition analysis pipeline stages
// ABOUTME: One sub-config per stage with documented defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Analysis Configuration
//!
//! Every pipeline stage reads its tunables from one sub-config of
//! [`AnalysisConfig`]. Defaults reproduce the documented scoring behavior;
//! [`AnalysisConfig::validate`] rejects configurations that would break the
//! score bounds or the deviation invariants.

use serde::{Deserialize, Serialize};

use repform_core::constants::detection::DEFAULT_MIN_KEYPOINT_CONFIDENCE;
use repform_core::errors::{AnalysisError, AnalysisResult};

use crate::deviation::AggregationPolicy;

/// Full analysis pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Joint-angle extraction settings
    pub extraction: ExtractionConfig,
    /// Deviation aggregation settings
    pub deviation: DeviationConfig,
    /// Form sub-score settings
    pub form: FormConfig,
    /// Tempo sub-score settings
    pub tempo: TempoConfig,
    /// Range-of-motion sub-score settings
    pub rom: RomConfig,
    /// Feedback generation settings
    pub feedback: FeedbackConfig,
}

/// Configuration for joint-angle extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum keypoint confidence for a joint to be scoreable in a frame
    pub min_keypoint_confidence: f64,
}

/// Configuration for per-joint deviation aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviationConfig {
    /// How per-frame deviations collapse into one value per joint
    pub aggregation: AggregationPolicy,
}

/// Configuration for the form sub-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Aggregate deviation (degrees) at which the form score reaches zero
    pub full_scale_deviation_degrees: f64,
}

/// Configuration for the tempo sub-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoConfig {
    /// Reference duration of one correct repetition, in milliseconds
    pub reference_duration_ms: f64,
    /// Half-width of the tolerated duration-ratio band around 1.0
    pub tolerance: f64,
    /// Ratio excess beyond the band at which the tempo score reaches zero
    pub falloff: f64,
}

/// Configuration for the range-of-motion sub-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomConfig {
    /// Weight of over-extension excursions in the per-joint ROM score
    pub overshoot_penalty_weight: f64,
}

/// Configuration for feedback generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Maximum number of joints mentioned in the feedback text
    pub max_items: usize,
    /// Minimum aggregated deviation (degrees) worth mentioning
    pub min_deviation_degrees: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_keypoint_confidence: DEFAULT_MIN_KEYPOINT_CONFIDENCE,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            full_scale_deviation_degrees: 45.0,
        }
    }
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            reference_duration_ms: 3000.0,
            tolerance: 0.25,
            falloff: 1.0,
        }
    }
}

impl Default for RomConfig {
    fn default() -> Self {
        Self {
            overshoot_penalty_weight: 0.5,
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_items: 3,
            min_deviation_degrees: 5.0,
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` when a tunable would break the
    /// score bounds or the deviation invariants.
    pub fn validate(&self) -> AnalysisResult<()> {
        let confidence = self.extraction.min_keypoint_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AnalysisError::invalid_input(format!(
                "min_keypoint_confidence {confidence} must lie in [0, 1]"
            )));
        }

        if self.form.full_scale_deviation_degrees <= 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "full_scale_deviation_degrees {} must be positive",
                self.form.full_scale_deviation_degrees
            )));
        }

        if self.tempo.reference_duration_ms <= 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "reference_duration_ms {} must be positive",
                self.tempo.reference_duration_ms
            )));
        }
        if !(0.0..1.0).contains(&self.tempo.tolerance) {
            return Err(AnalysisError::invalid_input(format!(
                "tempo tolerance {} must lie in [0, 1)",
                self.tempo.tolerance
            )));
        }
        if self.tempo.falloff <= 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "tempo falloff {} must be positive",
                self.tempo.falloff
            )));
        }

        if self.rom.overshoot_penalty_weight < 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "overshoot_penalty_weight {} must be non-negative",
                self.rom.overshoot_penalty_weight
            )));
        }

        if self.feedback.max_items == 0 {
            return Err(AnalysisError::invalid_input(
                "feedback max_items must be at least 1",
            ));
        }
        if self.feedback.min_deviation_degrees < 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "min_deviation_degrees {} must be non-negative",
                self.feedback.min_deviation_degrees
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let mut config = AnalysisConfig::default();
        config.extraction.min_keypoint_confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_reference_duration_rejected() {
        let mut config = AnalysisConfig::default();
        config.tempo.reference_duration_ms = 0.0;
        assert!(config.validate().is_err());
    }
}

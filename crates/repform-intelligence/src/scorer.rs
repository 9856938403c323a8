// ABOUTME: Repetition scoring orchestrator: frames to angles to scores and feedback
// ABOUTME: Parallel per-frame extraction re-joined in frame order before tempo analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Repetition scoring pipeline
//!
//! Drives one repetition through extraction, deviation analysis, score
//! calculation, and feedback synthesis. Per-frame joint-angle extraction is
//! order-independent and runs in parallel across frames; the indexed
//! parallel map re-joins results in original capture order before the
//! tempo analysis, which requires it. Scoring is read-only over its inputs:
//! discarding a result has no side effects unless the caller explicitly
//! records a labeled repetition into the classifier.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use repform_core::errors::{AnalysisError, AnalysisResult};
use repform_core::models::{PoseFrame, QualityLabel, RepetitionScore, TrainingSample};

use crate::angles::JointAngleExtractor;
use crate::classifier::{extract_features, QualityClassifier};
use crate::config::AnalysisConfig;
use crate::deviation::DeviationAnalyzer;
use crate::feedback::FeedbackGenerator;
use crate::scoring::ScoreCalculator;

/// Scores complete repetitions and routes labeled ones into the classifier
#[derive(Debug)]
pub struct RepetitionScorer {
    extractor: JointAngleExtractor,
    analyzer: DeviationAnalyzer,
    calculator: ScoreCalculator,
    feedback: FeedbackGenerator,
    classifier: Arc<QualityClassifier>,
}

impl Default for RepetitionScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RepetitionScorer {
    /// Create a scorer with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(&AnalysisConfig::default(), Arc::new(QualityClassifier::new()))
    }

    /// Create a scorer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` when the configuration is
    /// rejected by [`AnalysisConfig::validate`].
    pub fn with_config(config: &AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            config,
            Arc::new(QualityClassifier::new()),
        ))
    }

    /// Share an existing classifier (e.g. one collecting samples from
    /// several concurrent scoring sessions)
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<QualityClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// The classifier this scorer records labeled repetitions into
    #[must_use]
    pub fn classifier(&self) -> &Arc<QualityClassifier> {
        &self.classifier
    }

    fn from_parts(config: &AnalysisConfig, classifier: Arc<QualityClassifier>) -> Self {
        Self {
            extractor: JointAngleExtractor::from_config(&config.extraction),
            analyzer: DeviationAnalyzer::from_config(&config.deviation),
            calculator: ScoreCalculator::from_config(config),
            feedback: FeedbackGenerator::from_config(&config.feedback),
            classifier,
        }
    }

    /// Score one complete repetition
    ///
    /// # Errors
    ///
    /// - `AnalysisError::EmptyInput` when `frames` is empty
    /// - `AnalysisError::InvalidInput` on malformed timestamps
    /// - `AnalysisError::NoLandmarksDetected` when every frame lacks a
    ///   usable pose
    pub fn score(&self, frames: &[PoseFrame]) -> AnalysisResult<RepetitionScore> {
        self.run(frames).map(|(score, _)| score)
    }

    /// Score one repetition and record it as a labeled training sample
    ///
    /// Used when a supervising trainer marks the repetition as exemplary
    /// or flawed; the repetition's feature vector is appended to the
    /// classifier's matching buffer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`score`](Self::score), plus
    /// `AnalysisError::Internal` if the classifier buffers are unusable.
    pub fn score_labeled(
        &self,
        frames: &[PoseFrame],
        label: QualityLabel,
    ) -> AnalysisResult<RepetitionScore> {
        let (score, features) = self.run(frames)?;
        self.classifier
            .record(TrainingSample::new(features, label))?;
        Ok(score)
    }

    /// Compute the repetition's classifier feature vector without scoring
    /// side effects
    ///
    /// Useful for running a trained classifier over an unlabeled
    /// repetition.
    ///
    /// # Errors
    ///
    /// Same input conditions as [`score`](Self::score).
    pub fn feature_vector(&self, frames: &[PoseFrame]) -> AnalysisResult<Vec<f64>> {
        self.run(frames).map(|(_, features)| features)
    }

    /// The full pipeline; returns the score and the feature vector
    fn run(&self, frames: &[PoseFrame]) -> AnalysisResult<(RepetitionScore, Vec<f64>)> {
        if frames.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        validate_timestamps(frames)?;

        // Embarrassingly parallel across frames; the indexed map keeps
        // results in capture order for the tempo analysis
        let per_frame: Vec<_> = frames
            .par_iter()
            .map(|frame| self.extractor.extract(frame))
            .collect();

        if per_frame.iter().all(Vec::is_empty) {
            return Err(AnalysisError::NoLandmarksDetected {
                frame_count: frames.len(),
            });
        }

        let observations = self.analyzer.collect(&per_frame);
        let duration_ms = repetition_duration_ms(frames);

        let form_score = self
            .calculator
            .form_score(&observations, self.analyzer.policy());
        let speed_score = self.calculator.speed_score(duration_ms);
        let rom_score = self.calculator.rom_score(&observations);
        let overall_score = ScoreCalculator::overall_score(form_score, rom_score, speed_score);

        let deviations = self.analyzer.ranked_deviations(&observations);
        let feedback = self.feedback.generate(&deviations);
        let scored_joints = observations.iter().map(|obs| obs.joint).collect();
        let features = extract_features(&observations, duration_ms, frames.len());

        debug!(
            frames = frames.len(),
            joints = observations.len(),
            form = form_score,
            speed = speed_score,
            rom = rom_score,
            overall = overall_score,
            "scored repetition"
        );

        Ok((
            RepetitionScore {
                form_score,
                speed_score,
                rom_score,
                overall_score,
                deviations,
                scored_joints,
                feedback,
            },
            features,
        ))
    }
}

/// Duration of the repetition in milliseconds
fn repetition_duration_ms(frames: &[PoseFrame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
        _ => 0.0,
    }
}

/// Reject non-finite or out-of-order capture timestamps
fn validate_timestamps(frames: &[PoseFrame]) -> AnalysisResult<()> {
    for (index, frame) in frames.iter().enumerate() {
        if !frame.timestamp_ms.is_finite() {
            return Err(AnalysisError::invalid_input(format!(
                "frame {index} has a non-finite timestamp"
            )));
        }
    }
    for (index, pair) in frames.windows(2).enumerate() {
        if pair[1].timestamp_ms < pair[0].timestamp_ms {
            return Err(AnalysisError::invalid_input(format!(
                "frame timestamps must be non-decreasing (frame {} precedes frame {})",
                index + 1,
                index
            )));
        }
    }
    Ok(())
}

// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Scoring weights, classifier thresholds, and detection defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Constants shared across the workspace, grouped by domain.

/// Composite-score weighting and bounds
pub mod scoring {
    /// Weight of the form sub-score in the overall score
    pub const FORM_WEIGHT: f64 = 0.5;

    /// Weight of the range-of-motion sub-score in the overall score
    pub const ROM_WEIGHT: f64 = 0.3;

    /// Weight of the tempo sub-score in the overall score
    pub const SPEED_WEIGHT: f64 = 0.2;

    /// Lower bound of every score
    pub const MIN_SCORE: f64 = 0.0;

    /// Upper bound of every score
    pub const MAX_SCORE: f64 = 100.0;
}

/// Quality-classifier sizing
pub mod classifier {
    /// Minimum labeled samples required per class before training
    pub const MIN_SAMPLES_PER_CLASS: usize = 10;

    /// Statistics extracted per joint for the feature vector
    /// (mean deviation, max deviation, min angle, max angle)
    pub const FEATURES_PER_JOINT: usize = 4;

    /// Trailing global features (duration seconds, frame count)
    pub const GLOBAL_FEATURES: usize = 2;
}

/// Pose-detection gating
pub mod detection {
    /// Default minimum keypoint confidence for a joint to be scoreable,
    /// matching the external detector's own detection threshold
    pub const DEFAULT_MIN_KEYPOINT_CONFIDENCE: f64 = 0.5;
}

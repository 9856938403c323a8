// ABOUTME: Unified error handling for repetition analysis and quality classification
// ABOUTME: Defines the AnalysisError taxonomy and the AnalysisResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! # Analysis Error Types
//!
//! Single error taxonomy for the analysis pipeline:
//! - input validation failures (`EmptyInput`, `InvalidInput`)
//! - detection failures (`NoLandmarksDetected`)
//! - classifier lifecycle failures (`InsufficientTrainingData`, `ModelNotTrained`)
//! - internal invariant violations (`Internal`)
//!
//! `InsufficientTrainingData` is the only recoverable condition: the caller
//! records more samples and retries `train()` later.

use thiserror::Error;

/// Result alias used by all fallible operations in the workspace
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors produced by the repetition analysis pipeline and quality classifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The repetition contained no frames at all
    #[error("repetition contains no frames")]
    EmptyInput,

    /// Malformed frame input (non-monotonic timestamps, bad feature length, ...)
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Every frame of the repetition lacked a usable pose
    #[error("no usable pose landmarks detected in any of the {frame_count} frames")]
    NoLandmarksDetected {
        /// Number of frames that were inspected
        frame_count: usize,
    },

    /// Classifier training was requested before enough samples of each class exist
    #[error("insufficient training data: {high_quality} high-quality and {low_quality} low-quality repetitions recorded, need at least {required} of each")]
    InsufficientTrainingData {
        /// High-quality samples currently buffered
        high_quality: usize,
        /// Low-quality samples currently buffered
        low_quality: usize,
        /// Minimum required per class
        required: usize,
    },

    /// Classification was requested before any successful training
    #[error("quality classifier has no trained model")]
    ModelNotTrained,

    /// Internal invariant violation (poisoned lock, corrupted state)
    #[error("internal error: {message}")]
    Internal {
        /// Details of the violated invariant
        message: String,
    },
}

impl AnalysisError {
    /// Create an `InvalidInput` error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an `Internal` error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the caller can recover by retrying later with more data
    ///
    /// Only `InsufficientTrainingData` is recoverable: record more labeled
    /// repetitions and call `train()` again. Validation and detection errors
    /// are terminal for the given input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientTrainingData { .. })
    }
}

// ABOUTME: Main library entry point for the repform repetition-quality platform
// ABOUTME: Facade over the repform-core and repform-intelligence workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

#![deny(unsafe_code)]

//! # Repform
//!
//! Scores the quality of a single physical-exercise repetition from a
//! pre-segmented sequence of pose frames, producing a composite quality
//! score, per-joint deviations from ideal form, human-readable feedback,
//! and an adaptive classifier that learns to separate high-quality from
//! low-quality repetitions over time.
//!
//! ## Architecture
//!
//! - **models**: Pose input and scoring output types
//! - **intelligence**: The analysis pipeline (extraction, deviation,
//!   scoring, feedback, classification, orchestration)
//! - **permissions**: Role table gating exposure of analysis results
//! - **errors**: `AnalysisError` and the `AnalysisResult` alias
//!
//! Frame acquisition and pose detection are external: the pipeline starts
//! from detector output ([`models::PoseFrame`]) and ends at an immutable
//! [`models::RepetitionScore`]. Serialization and transport of that result
//! are the caller's concern, as is permission-gating its sensitive fields.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repform::errors::AnalysisResult;
//! use repform::intelligence::RepetitionScorer;
//! use repform::models::PoseFrame;
//!
//! fn example(frames: &[PoseFrame]) -> AnalysisResult<()> {
//!     let scorer = RepetitionScorer::new();
//!     let score = scorer.score(frames)?;
//!     println!("overall {:.1}: {}", score.overall_score, score.feedback);
//!     Ok(())
//! }
//! ```

/// Unified error handling for analysis and classification
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`PoseFrame`, `Joint`, `RepetitionScore`, ...)
pub mod models;

/// Role-based permission system with bitflags
pub mod permissions;

/// Repetition analysis pipeline and quality classifier
pub mod intelligence;

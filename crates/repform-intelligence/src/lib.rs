// ABOUTME: Repetition quality analysis engine for the repform platform
// ABOUTME: Angle extraction, deviation analysis, scoring, feedback, and classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

#![deny(unsafe_code)]

//! # Repform Intelligence
//!
//! The analysis engine behind repetition quality scoring. Data flows
//! strictly forward: pose frames (from the external detector) are turned
//! into joint angles, angles into per-joint deviations, deviations into
//! three sub-scores plus a weighted composite and human-readable feedback.
//! The only state the pipeline ever writes is the quality classifier's
//! training buffers, and only when the caller labels a repetition.

/// Joint-angle extraction from pose frames
pub mod angles;

/// Adaptive binary quality classifier
pub mod classifier;

/// Pipeline configuration
pub mod config;

/// Per-joint deviation accumulation and ranking
pub mod deviation;

/// Feedback text generation
pub mod feedback;

/// Repetition scoring orchestration
pub mod scorer;

/// Sub-score and composite calculation
pub mod scoring;

pub use angles::JointAngleExtractor;
pub use classifier::{Classification, QualityClassifier, QualityModel, FEATURE_LEN};
pub use config::AnalysisConfig;
pub use deviation::{AggregationPolicy, DeviationAnalyzer, JointObservation};
pub use feedback::FeedbackGenerator;
pub use scorer::RepetitionScorer;
pub use scoring::ScoreCalculator;

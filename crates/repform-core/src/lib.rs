// ABOUTME: Core types and constants for the repform repetition-quality platform
// ABOUTME: Foundation crate with error handling, data models, permissions, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

#![deny(unsafe_code)]

//! # Repform Core
//!
//! Foundation crate providing shared types for the repform repetition-quality
//! analysis platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AnalysisError` and `AnalysisResult`
//! - **models**: Pose input and scoring output types
//! - **permissions**: Role-based permission table with bitflags
//! - **constants**: Scoring weights and classifier thresholds by domain

/// Unified error handling for analysis and classification
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`PoseFrame`, `Joint`, `RepetitionScore`, ...)
pub mod models;

/// Role-based permission system with bitflags
pub mod permissions;

// ABOUTME: Application constants re-exported from repform-core
// ABOUTME: Scoring weights, classifier thresholds, and detection defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

pub use repform_core::constants::*;

// ABOUTME: Unified error handling re-exported from repform-core
// ABOUTME: AnalysisError taxonomy and AnalysisResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

pub use repform_core::errors::*;

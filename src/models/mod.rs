// ABOUTME: Core data models re-exported from repform-core
// ABOUTME: Pose input and scoring output types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

pub use repform_core::models::*;

// ABOUTME: Repetition analysis pipeline re-exported from repform-intelligence
// ABOUTME: Extraction, deviation, scoring, feedback, classification, orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

pub use repform_intelligence::*;

// ABOUTME: Role-based permission system re-exported from repform-core
// ABOUTME: Provides the static role table and the has_permission check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

pub use repform_core::permissions::*;

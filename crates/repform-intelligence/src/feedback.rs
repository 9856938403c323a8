// ABOUTME: Human-readable guidance text derived from the largest joint deviations
// ABOUTME: Advisory only: never fails, empty deviation sets yield an affirmative message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Feedback generation
//!
//! Selects the top deviating joints and renders a short guidance line per
//! joint: which joint, whether the error was under- or over-extension, and
//! the approximate magnitude. Output is advisory text only; missing data
//! never makes feedback fail.

use repform_core::models::JointAngle;

use crate::config::FeedbackConfig;

/// Affirmative message when no joint deviated enough to mention
const FORM_ACCEPTABLE: &str =
    "Form acceptable: all tracked joints stayed within their ideal ranges.";

/// Renders guidance text from ranked joint deviations
#[derive(Debug, Clone)]
pub struct FeedbackGenerator {
    max_items: usize,
    min_deviation_degrees: f64,
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::from_config(&FeedbackConfig::default())
    }
}

impl FeedbackGenerator {
    /// Create a generator with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from the feedback config
    #[must_use]
    pub const fn from_config(config: &FeedbackConfig) -> Self {
        Self {
            max_items: config.max_items,
            min_deviation_degrees: config.min_deviation_degrees,
        }
    }

    /// Render guidance for a repetition's ranked deviations
    ///
    /// `ranked` must be sorted largest-deviation first (as produced by the
    /// deviation analyzer). Joints below the minimum deviation threshold
    /// are ignored; when nothing qualifies, the affirmative message is
    /// returned.
    #[must_use]
    pub fn generate(&self, ranked: &[JointAngle]) -> String {
        let lines: Vec<String> = ranked
            .iter()
            .filter(|entry| entry.deviation >= self.min_deviation_degrees)
            .take(self.max_items)
            .map(Self::describe)
            .collect();

        if lines.is_empty() {
            FORM_ACCEPTABLE.to_owned()
        } else {
            lines.join(" ")
        }
    }

    /// One guidance line for a single deviating joint
    fn describe(entry: &JointAngle) -> String {
        let (lo, hi) = entry.ideal_range;
        let direction = if entry.angle < lo {
            "under-extension"
        } else {
            "over-extension"
        };
        format!(
            "{}: {direction} of about {:.0}\u{b0} (ideal {lo:.0}-{hi:.0}\u{b0}).",
            entry.joint.display_name(),
            entry.deviation
        )
    }
}

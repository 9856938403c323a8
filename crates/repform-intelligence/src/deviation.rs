// ABOUTME: Per-joint deviation accumulation across the frames of a repetition
// ABOUTME: Configurable mean/max aggregation driving both scoring and feedback ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Deviation analysis
//!
//! Collapses per-frame [`JointAngle`] measurements into one
//! [`JointObservation`] per joint, carrying the full angle series plus the
//! aggregate statistics the score calculator and feedback generator need.
//! The aggregation policy (mean or max across frames) is configurable.

use serde::{Deserialize, Serialize};

use repform_core::models::{deviation_outside_range, Joint, JointAngle};

use crate::config::DeviationConfig;

/// How per-frame deviations collapse into one value per joint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Mean deviation across all frames where the joint was measured;
    /// damps single-frame detector noise
    #[default]
    Mean,
    /// Worst single-frame deviation
    Max,
}

impl AggregationPolicy {
    /// Policy name for logs and serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Max => "max",
        }
    }

    /// Collapse a deviation series into one value
    ///
    /// Empty input aggregates to zero.
    #[must_use]
    pub fn aggregate(self, deviations: &[f64]) -> f64 {
        if deviations.is_empty() {
            return 0.0;
        }
        match self {
            Self::Mean => deviations.iter().sum::<f64>() / deviations.len() as f64,
            Self::Max => deviations.iter().fold(0.0_f64, |acc, &d| acc.max(d)),
        }
    }
}

/// One joint's angle series across the frames of a repetition
///
/// Only frames where the joint was measurable contribute; the series is in
/// frame order and never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointObservation {
    /// The observed joint
    pub joint: Joint,
    /// Measured angles in frame order, degrees
    pub angles: Vec<f64>,
}

impl JointObservation {
    /// Smallest measured angle
    #[must_use]
    pub fn min_angle(&self) -> f64 {
        self.angles.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest measured angle
    #[must_use]
    pub fn max_angle(&self) -> f64 {
        self.angles
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Per-frame deviations from the joint's ideal band, in frame order
    #[must_use]
    pub fn deviations(&self) -> Vec<f64> {
        let range = self.joint.ideal_range();
        self.angles
            .iter()
            .map(|&angle| deviation_outside_range(angle, range))
            .collect()
    }

    /// Mean per-frame deviation
    #[must_use]
    pub fn mean_deviation(&self) -> f64 {
        AggregationPolicy::Mean.aggregate(&self.deviations())
    }

    /// Worst per-frame deviation
    #[must_use]
    pub fn max_deviation(&self) -> f64 {
        AggregationPolicy::Max.aggregate(&self.deviations())
    }

    /// Deviation collapsed by the given policy
    #[must_use]
    pub fn aggregated_deviation(&self, policy: AggregationPolicy) -> f64 {
        policy.aggregate(&self.deviations())
    }

    /// The measured angle with the worst deviation (first such frame wins)
    ///
    /// Falls back to the first angle when every frame was inside the band.
    #[must_use]
    pub fn worst_angle(&self) -> f64 {
        let range = self.joint.ideal_range();
        let mut angles = self.angles.iter().copied();
        let Some(mut worst) = angles.next() else {
            return 0.0;
        };
        let mut worst_deviation = deviation_outside_range(worst, range);
        for angle in angles {
            let deviation = deviation_outside_range(angle, range);
            if deviation > worst_deviation {
                worst = angle;
                worst_deviation = deviation;
            }
        }
        worst
    }
}

/// Accumulates per-frame joint angles into per-joint observations
#[derive(Debug, Clone, Default)]
pub struct DeviationAnalyzer {
    policy: AggregationPolicy,
}

impl DeviationAnalyzer {
    /// Create an analyzer with the default (mean) aggregation policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with an explicit aggregation policy
    #[must_use]
    pub const fn with_policy(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    /// Create an analyzer from the deviation config
    #[must_use]
    pub const fn from_config(config: &DeviationConfig) -> Self {
        Self {
            policy: config.aggregation,
        }
    }

    /// The configured aggregation policy
    #[must_use]
    pub const fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Group per-frame measurements into per-joint observations
    ///
    /// Observations come back in canonical joint order; joints never
    /// measured in any frame are absent.
    #[must_use]
    pub fn collect(&self, per_frame: &[Vec<JointAngle>]) -> Vec<JointObservation> {
        Joint::ALL
            .iter()
            .filter_map(|&joint| {
                let angles: Vec<f64> = per_frame
                    .iter()
                    .flatten()
                    .filter(|ja| ja.joint == joint)
                    .map(|ja| ja.angle)
                    .collect();
                if angles.is_empty() {
                    None
                } else {
                    Some(JointObservation { joint, angles })
                }
            })
            .collect()
    }

    /// Aggregated deviations worth reporting, largest first
    ///
    /// Each entry carries the worst observed angle and the
    /// policy-aggregated deviation; joints that never left their ideal
    /// band are excluded. Ties keep canonical joint order (the sort is
    /// stable over the canonical input order).
    #[must_use]
    pub fn ranked_deviations(&self, observations: &[JointObservation]) -> Vec<JointAngle> {
        let mut ranked: Vec<JointAngle> = observations
            .iter()
            .filter_map(|obs| {
                let deviation = obs.aggregated_deviation(self.policy);
                if deviation > 0.0 {
                    Some(JointAngle {
                        joint: obs.joint,
                        angle: obs.worst_angle(),
                        ideal_range: obs.joint.ideal_range(),
                        deviation,
                    })
                } else {
                    None
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.deviation.total_cmp(&a.deviation));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(joint: Joint, angles: &[f64]) -> JointObservation {
        JointObservation {
            joint,
            angles: angles.to_vec(),
        }
    }

    #[test]
    fn test_mean_and_max_aggregation() {
        let knee = obs(Joint::LeftKnee, &[90.0, 60.0, 120.0]);
        // Deviations against (70, 110): 0, 10, 10
        assert!((knee.mean_deviation() - 20.0 / 3.0).abs() < 1e-9);
        assert!((knee.max_deviation() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_in_band_series_has_zero_deviation() {
        let knee = obs(Joint::LeftKnee, &[70.0, 90.0, 110.0]);
        assert!(knee.mean_deviation() == 0.0);
        assert!(knee.max_deviation() == 0.0);
    }

    #[test]
    fn test_worst_angle_tracks_largest_excursion() {
        let knee = obs(Joint::LeftKnee, &[90.0, 130.0, 60.0]);
        assert!((knee.worst_angle() - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ranked_deviations_largest_first_and_positive_only() {
        let observations = vec![
            obs(Joint::LeftKnee, &[90.0, 90.0]),  // in band
            obs(Joint::Back, &[130.0, 130.0]),    // 20 below (150, 180)
            obs(Joint::LeftHip, &[110.0, 110.0]), // 10 above (60, 100)
        ];
        let analyzer = DeviationAnalyzer::new();
        let ranked = analyzer.ranked_deviations(&observations);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].joint, Joint::Back);
        assert!((ranked[0].deviation - 20.0).abs() < 1e-9);
        assert_eq!(ranked[1].joint, Joint::LeftHip);
    }

    #[test]
    fn test_collect_groups_by_joint_in_canonical_order() {
        let per_frame = vec![
            vec![
                JointAngle::measured(Joint::Back, 160.0),
                JointAngle::measured(Joint::LeftKnee, 80.0),
            ],
            vec![JointAngle::measured(Joint::LeftKnee, 95.0)],
        ];
        let analyzer = DeviationAnalyzer::new();
        let observations = analyzer.collect(&per_frame);
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].joint, Joint::LeftKnee);
        assert_eq!(observations[0].angles, vec![80.0, 95.0]);
        assert_eq!(observations[1].joint, Joint::Back);
    }
}

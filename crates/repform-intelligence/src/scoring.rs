// ABOUTME: Form, tempo, and range-of-motion sub-scores plus the weighted composite
// ABOUTME: Pure deterministic functions of the observed joint-angle history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Score calculation
//!
//! All three sub-scores and the composite are deterministic pure functions
//! of the observed joint-angle history and configuration: identical input
//! always yields identical scores. Every score is clamped to `[0, 100]`,
//! and the composite is exactly
//! `0.5 * form + 0.3 * rom + 0.2 * speed`.

use repform_core::constants::scoring::{
    FORM_WEIGHT, MAX_SCORE, MIN_SCORE, ROM_WEIGHT, SPEED_WEIGHT,
};

use crate::config::{AnalysisConfig, FormConfig, RomConfig, TempoConfig};
use crate::deviation::{AggregationPolicy, JointObservation};

/// Computes the repetition sub-scores and the weighted composite
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    form: FormConfig,
    tempo: TempoConfig,
    rom: RomConfig,
}

impl ScoreCalculator {
    /// Create a calculator with default tuning
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator from the analysis config
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            form: config.form.clone(),
            tempo: config.tempo.clone(),
            rom: config.rom.clone(),
        }
    }

    /// Form quality in `[0, 100]`
    ///
    /// Monotonically decreasing in the aggregate deviation magnitude:
    /// the mean over joints of the policy-aggregated deviation, scaled so
    /// that `full_scale_deviation_degrees` maps to zero. Exactly 100 when
    /// every joint stayed inside its ideal band in every frame.
    #[must_use]
    pub fn form_score(
        &self,
        observations: &[JointObservation],
        policy: AggregationPolicy,
    ) -> f64 {
        if observations.is_empty() {
            return MAX_SCORE;
        }
        let total: f64 = observations
            .iter()
            .map(|obs| obs.aggregated_deviation(policy))
            .sum();
        let mean_deviation = total / observations.len() as f64;
        clamp_score(MAX_SCORE * (1.0 - mean_deviation / self.form.full_scale_deviation_degrees))
    }

    /// Tempo consistency in `[0, 100]`
    ///
    /// Compares the observed repetition duration against the reference
    /// duration. Ratios inside the tolerance band around 1.0 score 100;
    /// outside it the score falls linearly with the excess ratio, so both
    /// rushing and dragging a repetition are penalized.
    #[must_use]
    pub fn speed_score(&self, duration_ms: f64) -> f64 {
        let ratio = duration_ms / self.tempo.reference_duration_ms;
        let lo = 1.0 - self.tempo.tolerance;
        let hi = 1.0 + self.tempo.tolerance;
        let excess = (lo - ratio).max(ratio - hi).max(0.0);
        clamp_score(MAX_SCORE * (1.0 - excess / self.tempo.falloff))
    }

    /// Range-of-motion quality in `[0, 100]`
    ///
    /// Per articulating joint: how much of the ideal band the observed
    /// excursion covered, minus a weighted penalty for excursion beyond
    /// the band. Under-extension (not reaching the band edges) and
    /// over-extension are both penalized. The result is the mean across
    /// scored ROM-target joints; stability joints (the back) are excluded
    /// since holding their band is correct form.
    #[must_use]
    pub fn rom_score(&self, observations: &[JointObservation]) -> f64 {
        let targets: Vec<&JointObservation> = observations
            .iter()
            .filter(|obs| obs.joint.is_rom_target())
            .collect();
        if targets.is_empty() {
            return MAX_SCORE;
        }
        let total: f64 = targets.iter().map(|obs| self.joint_rom(obs)).sum();
        clamp_score(total / targets.len() as f64)
    }

    /// ROM score for a single joint
    fn joint_rom(&self, observation: &JointObservation) -> f64 {
        let (lo, hi) = observation.joint.ideal_range();
        let band = hi - lo;
        let min_obs = observation.min_angle();
        let max_obs = observation.max_angle();

        let coverage = ((max_obs.min(hi) - min_obs.max(lo)) / band).clamp(0.0, 1.0);
        let overshoot = ((lo - min_obs).max(0.0) + (max_obs - hi).max(0.0)) / band;

        clamp_score(MAX_SCORE * self.rom.overshoot_penalty_weight.mul_add(-overshoot, coverage))
    }

    /// Weighted composite: exactly `0.5 * form + 0.3 * rom + 0.2 * speed`
    #[must_use]
    pub fn overall_score(form_score: f64, rom_score: f64, speed_score: f64) -> f64 {
        clamp_score(FORM_WEIGHT.mul_add(
            form_score,
            ROM_WEIGHT.mul_add(rom_score, SPEED_WEIGHT * speed_score),
        ))
    }
}

/// Clamp a score into `[0, 100]`
fn clamp_score(value: f64) -> f64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repform_core::models::Joint;

    fn obs(joint: Joint, angles: &[f64]) -> JointObservation {
        JointObservation {
            joint,
            angles: angles.to_vec(),
        }
    }

    #[test]
    fn test_form_score_is_100_with_zero_deviation() {
        let calculator = ScoreCalculator::new();
        let observations = vec![obs(Joint::LeftKnee, &[80.0, 95.0, 110.0])];
        let score = calculator.form_score(&observations, AggregationPolicy::Mean);
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_form_score_decreases_with_deviation() {
        let calculator = ScoreCalculator::new();
        let mild = vec![obs(Joint::LeftKnee, &[115.0])]; // 5 over
        let severe = vec![obs(Joint::LeftKnee, &[140.0])]; // 30 over
        let mild_score = calculator.form_score(&mild, AggregationPolicy::Mean);
        let severe_score = calculator.form_score(&severe, AggregationPolicy::Mean);
        assert!(mild_score < 100.0);
        assert!(severe_score < mild_score);
    }

    #[test]
    fn test_form_score_never_negative() {
        let calculator = ScoreCalculator::new();
        let wild = vec![obs(Joint::LeftKnee, &[300.0])];
        assert!(calculator.form_score(&wild, AggregationPolicy::Max) >= 0.0);
    }

    #[test]
    fn test_speed_score_full_inside_tolerance_band() {
        let calculator = ScoreCalculator::new();
        // Reference 3000ms, tolerance 0.25: 2250..3750 all score 100
        assert!((calculator.speed_score(3000.0) - 100.0).abs() < f64::EPSILON);
        assert!((calculator.speed_score(2300.0) - 100.0).abs() < f64::EPSILON);
        assert!((calculator.speed_score(3700.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_score_penalizes_both_directions() {
        let calculator = ScoreCalculator::new();
        let rushed = calculator.speed_score(900.0);
        let dragged = calculator.speed_score(9000.0);
        assert!(rushed < 100.0, "rushed rep must be penalized, got {rushed}");
        assert!(
            dragged < 100.0,
            "dragged rep must be penalized, got {dragged}"
        );
        assert!(calculator.speed_score(30000.0) >= 0.0);
    }

    #[test]
    fn test_rom_full_band_beats_partial_excursion() {
        let calculator = ScoreCalculator::new();
        let full = vec![obs(Joint::LeftKnee, &[70.0, 90.0, 110.0])];
        let partial = vec![obs(Joint::LeftKnee, &[85.0, 90.0, 95.0])];
        assert!(calculator.rom_score(&full) > calculator.rom_score(&partial));
    }

    #[test]
    fn test_rom_penalizes_overshoot() {
        let calculator = ScoreCalculator::new();
        let exact = vec![obs(Joint::LeftKnee, &[70.0, 110.0])];
        let overshot = vec![obs(Joint::LeftKnee, &[50.0, 130.0])];
        assert!(calculator.rom_score(&overshot) < calculator.rom_score(&exact));
    }

    #[test]
    fn test_overall_weighting_is_exact() {
        let overall = ScoreCalculator::overall_score(80.0, 60.0, 40.0);
        let expected = 0.3_f64.mul_add(60.0, 0.5_f64.mul_add(80.0, 0.2 * 40.0));
        assert!((overall - expected).abs() < f64::EPSILON);
        assert!((0.0..=100.0).contains(&overall));
    }
}

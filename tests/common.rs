// ABOUTME: Shared test utilities and pose fixture builders for integration tests
// ABOUTME: Provides quiet logging setup and geometric frame constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `repform`
//!
//! Frames are built geometrically so the measured joint angles equal the
//! requested targets: the extractor sees real keypoint positions, not
//! precomputed angles.

use std::sync::Once;

use repform::models::{BodyLandmark, Keypoint, Point3, PoseFrame};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fully confident keypoint at a position
pub fn kp(landmark: BodyLandmark, x: f64, y: f64) -> Keypoint {
    Keypoint::new(landmark, Point3::new(x, y, 0.0), 0.95)
}

/// Unit direction at `angle_deg` from straight up, rotated toward +x
fn dir_from_up(angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (rad.sin(), rad.cos())
}

/// A frame containing only the left leg chain (hip, knee, ankle), with the
/// knee bent to exactly `knee_angle_deg`
pub fn knee_frame(timestamp_ms: f64, knee_angle_deg: f64) -> PoseFrame {
    let hip = (-0.1, 1.0);
    let knee = (-0.1, 0.5);
    // Thigh points straight up from the knee; the shank is rotated
    // knee_angle_deg away from it
    let (dx, dy) = dir_from_up(knee_angle_deg);
    let ankle = (knee.0 + 0.4 * dx, knee.1 + 0.4 * dy);

    PoseFrame::new(
        timestamp_ms,
        vec![
            kp(BodyLandmark::LeftHip, hip.0, hip.1),
            kp(BodyLandmark::LeftKnee, knee.0, knee.1),
            kp(BodyLandmark::LeftAnkle, ankle.0, ankle.1),
        ],
    )
}

/// A frame with the left leg chain plus the trunk landmarks, with the knee
/// at `knee_angle_deg` and the back (trunk alignment) at `back_angle_deg`
///
/// The left hip sits at a fixed in-band 80 degrees; the right leg has no
/// knee keypoint, so the right knee and right hip stay unscoreable.
pub fn trunk_frame(timestamp_ms: f64, knee_angle_deg: f64, back_angle_deg: f64) -> PoseFrame {
    let mut frame = knee_frame(timestamp_ms, knee_angle_deg);

    // Left hip angle: 80 degrees between the thigh (straight down to the
    // knee) and the shoulder direction
    let (sx, sy) = {
        let rad = 80.0_f64.to_radians();
        (rad.sin(), -rad.cos())
    };
    let left_shoulder = (-0.1 + 0.5 * sx, 1.0 + 0.5 * sy);
    let right_shoulder = (0.1 - 0.5 * sx, 1.0 + 0.5 * sy);
    frame
        .keypoints
        .push(kp(BodyLandmark::LeftShoulder, left_shoulder.0, left_shoulder.1));
    frame.keypoints.push(kp(
        BodyLandmark::RightShoulder,
        right_shoulder.0,
        right_shoulder.1,
    ));
    frame.keypoints.push(kp(BodyLandmark::RightHip, 0.1, 1.0));

    // Nose placed so the angle at the shoulder midpoint between nose and
    // hip midpoint equals back_angle_deg. Shoulder midpoint is on the x=0
    // axis; the hip midpoint (0, 1.0) lies straight above or below it.
    let shoulder_mid = (0.0, 1.0 + 0.5 * sy);
    let torso_up = if 1.0 > shoulder_mid.1 { 1.0 } else { -1.0 };
    let rad = back_angle_deg.to_radians();
    let nose = (
        shoulder_mid.0 + 0.3 * rad.sin(),
        shoulder_mid.1 + 0.3 * rad.cos() * torso_up,
    );
    frame.keypoints.push(kp(BodyLandmark::Nose, nose.0, nose.1));

    frame
}

/// A clean repetition: `count` frames spaced `spacing_ms` apart with the
/// knee sweeping the full ideal band and back in perfect alignment
pub fn clean_repetition(count: usize, spacing_ms: f64) -> Vec<PoseFrame> {
    (0..count)
        .map(|i| {
            // Sweep 109 -> 71 -> 109 across the repetition, comfortably
            // inside the [70, 110] knee band
            let phase = i as f64 / count.saturating_sub(1).max(1) as f64;
            let knee = 109.0 - 38.0 * (1.0 - (2.0 * phase - 1.0).abs());
            trunk_frame(i as f64 * spacing_ms, knee, 170.0)
        })
        .collect()
}

/// A sloppy repetition: shallow knee excursion and a slouched trunk
pub fn sloppy_repetition(count: usize, spacing_ms: f64) -> Vec<PoseFrame> {
    (0..count)
        .map(|i| {
            let knee = 120.0 + (i % 3) as f64;
            trunk_frame(i as f64 * spacing_ms, knee, 130.0)
        })
        .collect()
}

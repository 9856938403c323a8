// ABOUTME: Core data models for pose input and repetition scoring
// ABOUTME: Re-exports pose and scoring types at the module root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

/// Pose detector input types (frames, keypoints, landmarks)
pub mod pose;

/// Scoring output types (joints, angles, repetition scores, labels)
pub mod scoring;

pub use pose::{BodyLandmark, Keypoint, Point3, PoseFrame};
pub use scoring::{
    deviation_outside_range, Joint, JointAngle, JointGeometry, QualityLabel, RepetitionScore,
    TrainingSample,
};

// ABOUTME: Pose frame input types produced by the external pose detector
// ABOUTME: Defines body landmarks, 3D keypoint positions, and detection confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Pose input model
//!
//! A [`PoseFrame`] is the per-frame output of the external pose detector:
//! an ordered set of named keypoints, each with a 3D position and a
//! detection confidence in `[0, 1]`. Frames are immutable once returned by
//! the detector; the analysis pipeline only reads them.

use serde::{Deserialize, Serialize};

/// Named body landmark tracked by the external pose detector
///
/// The set is fixed to the keypoints required by the tracked joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyLandmark {
    /// Nose tip
    Nose,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
}

impl BodyLandmark {
    /// Stable snake_case identifier for logs and serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

/// 3D position in detector coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point3 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Depth coordinate
    pub z: f64,
}

impl Point3 {
    /// Create a point from its coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Midpoint between two positions
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
}

/// A single detected keypoint: landmark identity, position, and confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Which body landmark this keypoint is
    pub landmark: BodyLandmark,
    /// Detected 3D position
    pub position: Point3,
    /// Detection confidence in `[0, 1]`
    pub confidence: f64,
}

impl Keypoint {
    /// Create a keypoint
    #[must_use]
    pub const fn new(landmark: BodyLandmark, position: Point3, confidence: f64) -> Self {
        Self {
            landmark,
            position,
            confidence,
        }
    }
}

/// One frame's worth of detected pose keypoints
///
/// Produced once per input frame by the external detector. An empty
/// keypoint list means no subject was detected in the frame; the pipeline
/// skips such frames rather than failing on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture timestamp in milliseconds, relative to the repetition start
    pub timestamp_ms: f64,
    /// Detected keypoints for this frame
    pub keypoints: Vec<Keypoint>,
}

impl PoseFrame {
    /// Create a frame from its capture timestamp and keypoints
    #[must_use]
    pub const fn new(timestamp_ms: f64, keypoints: Vec<Keypoint>) -> Self {
        Self {
            timestamp_ms,
            keypoints,
        }
    }

    /// Create a frame with no detected subject
    #[must_use]
    pub const fn empty(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            keypoints: Vec::new(),
        }
    }

    /// Look up a keypoint by landmark
    #[must_use]
    pub fn keypoint(&self, landmark: BodyLandmark) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.landmark == landmark)
    }

    /// Whether the detector found no subject in this frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

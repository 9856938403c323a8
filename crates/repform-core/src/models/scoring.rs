// ABOUTME: Scoring data model: tracked joints, joint angles, and repetition scores
// ABOUTME: Carries the static ideal-range reference table and quality labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Scoring data model
//!
//! The set of trackable joints is fixed and known at design time, so joints
//! are a tagged enumeration with a per-tag reference-range lookup rather
//! than open-ended dynamic dispatch. [`JointAngle`] and [`RepetitionScore`]
//! are immutable once created.

use serde::{Deserialize, Serialize};

use crate::models::pose::BodyLandmark;

/// How the three measurement landmarks of a joint are obtained from a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointGeometry {
    /// Angle at `vertex` between the segments toward `a` and `b`
    Vertex {
        /// Endpoint of the first segment
        a: BodyLandmark,
        /// The joint itself
        vertex: BodyLandmark,
        /// Endpoint of the second segment
        b: BodyLandmark,
    },
    /// Trunk alignment at the shoulder girdle: angle at the shoulder
    /// midpoint between the nose and the hip midpoint
    Trunk,
}

/// A joint tracked by the form analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    /// Left knee (hip-knee-ankle)
    LeftKnee,
    /// Right knee (hip-knee-ankle)
    RightKnee,
    /// Left elbow (shoulder-elbow-wrist)
    LeftElbow,
    /// Right elbow (shoulder-elbow-wrist)
    RightElbow,
    /// Left hip (shoulder-hip-knee)
    LeftHip,
    /// Right hip (shoulder-hip-knee)
    RightHip,
    /// Trunk alignment (nose - shoulder midpoint - hip midpoint)
    Back,
}

impl Joint {
    /// All tracked joints in canonical order
    pub const ALL: [Self; 7] = [
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftHip,
        Self::RightHip,
        Self::Back,
    ];

    /// Stable snake_case identifier for logs and serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::Back => "back",
        }
    }

    /// Human-readable name for feedback text
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LeftKnee => "left knee",
            Self::RightKnee => "right knee",
            Self::LeftElbow => "left elbow",
            Self::RightElbow => "right elbow",
            Self::LeftHip => "left hip",
            Self::RightHip => "right hip",
            Self::Back => "back",
        }
    }

    /// Static ideal angle band in degrees for correct movement
    ///
    /// Reference ranges for a controlled lower-body strength movement:
    /// knees flexed through the working band, hips hinged, elbows near
    /// extension, trunk close to neutral.
    #[must_use]
    pub const fn ideal_range(self) -> (f64, f64) {
        match self {
            Self::LeftKnee | Self::RightKnee => (70.0, 110.0),
            Self::LeftElbow | Self::RightElbow => (150.0, 180.0),
            Self::LeftHip | Self::RightHip => (60.0, 100.0),
            Self::Back => (150.0, 180.0),
        }
    }

    /// Whether this joint is expected to sweep its ideal band during a
    /// repetition
    ///
    /// Articulating joints (knees, hips, elbows) are scored on range of
    /// motion; the back is a stability joint that should hold its band,
    /// not sweep it.
    #[must_use]
    pub const fn is_rom_target(self) -> bool {
        !matches!(self, Self::Back)
    }

    /// Landmark geometry used to measure this joint
    #[must_use]
    pub const fn geometry(self) -> JointGeometry {
        match self {
            Self::LeftKnee => JointGeometry::Vertex {
                a: BodyLandmark::LeftHip,
                vertex: BodyLandmark::LeftKnee,
                b: BodyLandmark::LeftAnkle,
            },
            Self::RightKnee => JointGeometry::Vertex {
                a: BodyLandmark::RightHip,
                vertex: BodyLandmark::RightKnee,
                b: BodyLandmark::RightAnkle,
            },
            Self::LeftElbow => JointGeometry::Vertex {
                a: BodyLandmark::LeftShoulder,
                vertex: BodyLandmark::LeftElbow,
                b: BodyLandmark::LeftWrist,
            },
            Self::RightElbow => JointGeometry::Vertex {
                a: BodyLandmark::RightShoulder,
                vertex: BodyLandmark::RightElbow,
                b: BodyLandmark::RightWrist,
            },
            Self::LeftHip => JointGeometry::Vertex {
                a: BodyLandmark::LeftShoulder,
                vertex: BodyLandmark::LeftHip,
                b: BodyLandmark::LeftKnee,
            },
            Self::RightHip => JointGeometry::Vertex {
                a: BodyLandmark::RightShoulder,
                vertex: BodyLandmark::RightHip,
                b: BodyLandmark::RightKnee,
            },
            Self::Back => JointGeometry::Trunk,
        }
    }
}

/// A measured joint angle with its reference band and deviation
///
/// `deviation` is non-negative and zero exactly when `angle` lies inside
/// `ideal_range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointAngle {
    /// The measured joint
    pub joint: Joint,
    /// Measured angle in degrees
    pub angle: f64,
    /// Ideal `(min, max)` band in degrees from the static reference table
    pub ideal_range: (f64, f64),
    /// Non-negative distance outside the ideal band, in degrees
    pub deviation: f64,
}

impl JointAngle {
    /// Build a joint angle, populating the reference band and deviation
    #[must_use]
    pub fn measured(joint: Joint, angle: f64) -> Self {
        let ideal_range = joint.ideal_range();
        Self {
            joint,
            angle,
            ideal_range,
            deviation: deviation_outside_range(angle, ideal_range),
        }
    }

    /// Whether the measured angle lies inside the ideal band
    #[must_use]
    pub fn within_range(&self) -> bool {
        self.deviation == 0.0
    }
}

/// Distance of `angle` outside the band `(lo, hi)`, in degrees
///
/// Zero when `lo <= angle <= hi`, otherwise the distance to the nearer
/// bound. Always non-negative.
#[must_use]
pub fn deviation_outside_range(angle: f64, (lo, hi): (f64, f64)) -> f64 {
    if angle < lo {
        lo - angle
    } else if angle > hi {
        angle - hi
    } else {
        0.0
    }
}

/// Composite quality score for one completed repetition
///
/// Created once per repetition by the scorer and never mutated afterwards.
/// `overall_score` is exactly `0.5 * form + 0.3 * rom + 0.2 * speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionScore {
    /// Form quality in `[0, 100]`: 100 means zero deviation everywhere
    pub form_score: f64,
    /// Tempo consistency in `[0, 100]`
    pub speed_score: f64,
    /// Range-of-motion quality in `[0, 100]`
    pub rom_score: f64,
    /// Weighted composite in `[0, 100]`
    pub overall_score: f64,
    /// Aggregated joint deviations, largest first; only joints that
    /// actually left their ideal band appear here
    pub deviations: Vec<JointAngle>,
    /// Joints measurable in at least one frame, in canonical order;
    /// distinguishes partial results from fully scored repetitions
    pub scored_joints: Vec<Joint>,
    /// Human-readable guidance derived from the largest deviations
    pub feedback: String,
}

/// Label assigned to a repetition by a supervising trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    /// Exemplary repetition, suitable as a positive training sample
    HighQuality,
    /// Flawed repetition, suitable as a negative training sample
    LowQuality,
}

impl QualityLabel {
    /// Stable snake_case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighQuality => "high_quality",
            Self::LowQuality => "low_quality",
        }
    }
}

/// A labeled feature vector derived from one repetition's joint-angle history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Fixed-length numeric feature vector
    pub features: Vec<f64>,
    /// Trainer-assigned quality label
    pub label: QualityLabel,
}

impl TrainingSample {
    /// Create a labeled sample
    #[must_use]
    pub const fn new(features: Vec<f64>, label: QualityLabel) -> Self {
        Self { features, label }
    }
}

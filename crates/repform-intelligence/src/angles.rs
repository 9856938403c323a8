// ABOUTME: Joint-angle extraction from pose frames via three-point vector geometry
// ABOUTME: Confidence-gates keypoints and omits unscoreable joints instead of fabricating angles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Joint-angle extraction
//!
//! For each tracked joint, the extractor gathers the joint's measurement
//! landmarks from a frame, requires each to clear the configured confidence
//! threshold, and computes the angle between the two limb segments meeting
//! at the joint (arccosine of the normalized dot product of the adjacent
//! segment vectors). Joints whose landmarks are missing, low-confidence, or
//! geometrically degenerate are omitted from the result: callers treat an
//! absent joint as unscoreable for that frame, never as zero deviation.

use tracing::warn;

use repform_core::constants::detection::DEFAULT_MIN_KEYPOINT_CONFIDENCE;
use repform_core::models::{BodyLandmark, Joint, JointAngle, JointGeometry, Point3, PoseFrame};

use crate::config::ExtractionConfig;

/// Segments shorter than this are considered degenerate and unmeasurable
const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Extracts per-frame joint angles from detected pose keypoints
#[derive(Debug, Clone)]
pub struct JointAngleExtractor {
    min_confidence: f64,
}

impl Default for JointAngleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl JointAngleExtractor {
    /// Create an extractor with the default confidence threshold
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_KEYPOINT_CONFIDENCE,
        }
    }

    /// Create an extractor with a custom confidence threshold
    #[must_use]
    pub const fn with_min_confidence(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    /// Create an extractor from the extraction config
    #[must_use]
    pub const fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_confidence: config.min_keypoint_confidence,
        }
    }

    /// Extract every measurable joint angle from one frame
    ///
    /// Joints are returned in canonical order. A joint is absent from the
    /// result when its landmarks are missing, below the confidence
    /// threshold, or collapse to a degenerate segment.
    #[must_use]
    pub fn extract(&self, frame: &PoseFrame) -> Vec<JointAngle> {
        Joint::ALL
            .iter()
            .filter_map(|&joint| self.measure(frame, joint))
            .collect()
    }

    /// Measure one joint in one frame, if its landmarks allow it
    fn measure(&self, frame: &PoseFrame, joint: Joint) -> Option<JointAngle> {
        let (a, vertex, b) = self.measurement_points(frame, joint)?;
        let Some(angle) = angle_at_vertex(a, vertex, b) else {
            warn!(
                joint = joint.as_str(),
                "degenerate limb segment, joint unscoreable this frame"
            );
            return None;
        };
        Some(JointAngle::measured(joint, angle))
    }

    /// Gather the three measurement points for a joint
    fn measurement_points(
        &self,
        frame: &PoseFrame,
        joint: Joint,
    ) -> Option<(Point3, Point3, Point3)> {
        match joint.geometry() {
            JointGeometry::Vertex { a, vertex, b } => Some((
                self.confident_point(frame, a)?,
                self.confident_point(frame, vertex)?,
                self.confident_point(frame, b)?,
            )),
            JointGeometry::Trunk => {
                let nose = self.confident_point(frame, BodyLandmark::Nose)?;
                let shoulders = self
                    .confident_point(frame, BodyLandmark::LeftShoulder)?
                    .midpoint(self.confident_point(frame, BodyLandmark::RightShoulder)?);
                let hips = self
                    .confident_point(frame, BodyLandmark::LeftHip)?
                    .midpoint(self.confident_point(frame, BodyLandmark::RightHip)?);
                Some((nose, shoulders, hips))
            }
        }
    }

    /// Position of a landmark, if detected above the confidence threshold
    fn confident_point(&self, frame: &PoseFrame, landmark: BodyLandmark) -> Option<Point3> {
        frame
            .keypoint(landmark)
            .filter(|kp| kp.confidence >= self.min_confidence)
            .map(|kp| kp.position)
    }
}

/// Angle in degrees at `vertex` between the segments toward `a` and `b`
///
/// Returns `None` when either segment is degenerate (shorter than
/// [`MIN_SEGMENT_LENGTH`]).
fn angle_at_vertex(a: Point3, vertex: Point3, b: Point3) -> Option<f64> {
    let v1 = (a.x - vertex.x, a.y - vertex.y, a.z - vertex.z);
    let v2 = (b.x - vertex.x, b.y - vertex.y, b.z - vertex.z);

    let mag1 = v2_norm(v1);
    let mag2 = v2_norm(v2);
    if mag1 < MIN_SEGMENT_LENGTH || mag2 < MIN_SEGMENT_LENGTH {
        return None;
    }

    let dot = v1.2.mul_add(v2.2, v1.0.mul_add(v2.0, v1.1 * v2.1));
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

fn v2_norm((x, y, z): (f64, f64, f64)) -> f64 {
    z.mul_add(z, x.mul_add(x, y * y)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use repform_core::models::Keypoint;

    fn kp(landmark: BodyLandmark, x: f64, y: f64) -> Keypoint {
        Keypoint::new(landmark, Point3::new(x, y, 0.0), 0.95)
    }

    #[test]
    fn test_straight_limb_measures_180_degrees() {
        let angle = angle_at_vertex(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        assert!((angle.unwrap() - 180.0).abs() < 1.0);
    }

    #[test]
    fn test_right_angle_limb_measures_90_degrees() {
        let angle = angle_at_vertex(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
        );
        assert!((angle.unwrap() - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_segment_is_unmeasurable() {
        let p = Point3::new(0.3, 0.3, 0.0);
        assert!(angle_at_vertex(p, p, Point3::new(1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_low_confidence_keypoint_omits_joint() {
        let mut frame = PoseFrame::new(
            0.0,
            vec![
                kp(BodyLandmark::LeftHip, 0.0, 1.0),
                kp(BodyLandmark::LeftKnee, 0.0, 0.5),
                kp(BodyLandmark::LeftAnkle, 0.3, 0.1),
            ],
        );
        let extractor = JointAngleExtractor::new();
        assert_eq!(extractor.extract(&frame).len(), 1);

        // Drop the ankle below the threshold: the knee becomes unscoreable
        frame.keypoints[2].confidence = 0.2;
        assert!(extractor.extract(&frame).is_empty());
    }

    #[test]
    fn test_missing_landmarks_yield_no_angles() {
        let extractor = JointAngleExtractor::new();
        assert!(extractor.extract(&PoseFrame::empty(0.0)).is_empty());
    }
}

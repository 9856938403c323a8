// ABOUTME: Adaptive binary quality classifier over labeled repetition feature vectors
// ABOUTME: RwLock-guarded sample buffers with an immutable, atomically swapped model snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Quality classification
//!
//! The classifier owns two growable buffers of labeled repetition feature
//! vectors and, on request, fits a nearest-centroid binary discriminator
//! separating them. Training produces a new immutable [`QualityModel`]
//! snapshot and swaps it in atomically: concurrent `classify` calls either
//! see the previous snapshot or the new one, never a partially updated
//! model, and previously obtained snapshots stay valid for in-flight
//! inference.
//!
//! # Thread Safety
//!
//! Appends are serialized by a write lock; `train()` copies both buffers
//! under the read lock (appends block only for the copy) and fits outside
//! any lock. The classifier is safe to share across scoring sessions via
//! `Arc`.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use repform_core::constants::classifier::{
    FEATURES_PER_JOINT, GLOBAL_FEATURES, MIN_SAMPLES_PER_CLASS,
};
use repform_core::errors::{AnalysisError, AnalysisResult};
use repform_core::models::{Joint, QualityLabel, TrainingSample};

use crate::deviation::JointObservation;

// ============================================================================
// Feature extraction
// ============================================================================

/// Length of every repetition feature vector
pub const FEATURE_LEN: usize = Joint::ALL.len() * FEATURES_PER_JOINT + GLOBAL_FEATURES;

/// Build the fixed-length feature vector for one repetition
///
/// Per joint in canonical order: mean deviation, max deviation, minimum
/// angle, and maximum angle (zeros when the joint was unscored in this
/// repetition), followed by the repetition duration in seconds and the
/// frame count.
#[must_use]
pub fn extract_features(
    observations: &[JointObservation],
    duration_ms: f64,
    frame_count: usize,
) -> Vec<f64> {
    let mut features = Vec::with_capacity(FEATURE_LEN);
    for joint in Joint::ALL {
        match observations.iter().find(|obs| obs.joint == joint) {
            Some(obs) => {
                features.push(obs.mean_deviation());
                features.push(obs.max_deviation());
                features.push(obs.min_angle());
                features.push(obs.max_angle());
            }
            None => features.extend_from_slice(&[0.0; FEATURES_PER_JOINT]),
        }
    }
    features.push(duration_ms / 1000.0);
    features.push(frame_count as f64);
    features
}

// ============================================================================
// Model snapshot
// ============================================================================

/// Immutable trained discriminator snapshot
///
/// One centroid per quality class in feature space; classification assigns
/// the label of the nearer centroid. Snapshots are never mutated: a new
/// training run produces a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityModel {
    /// Snapshot identifier
    pub id: Uuid,
    /// When this snapshot was trained
    pub trained_at: DateTime<Utc>,
    /// Centroid of the high-quality class
    high_centroid: Vec<f64>,
    /// Centroid of the low-quality class
    low_centroid: Vec<f64>,
    /// Samples per class that produced this snapshot (high, low)
    pub sample_counts: (usize, usize),
}

/// Result of classifying one repetition feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted quality label
    pub label: QualityLabel,
    /// Confidence in `[0.5, 1]`: relative distance margin between the two
    /// centroids (0.5 means the sample sits exactly between them)
    pub confidence: f64,
    /// Euclidean distance to the winning centroid
    pub distance: f64,
}

impl QualityModel {
    /// Classify a feature vector against this snapshot
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` when the feature vector does
    /// not have length [`FEATURE_LEN`].
    pub fn classify(&self, features: &[f64]) -> AnalysisResult<Classification> {
        validate_feature_len(features)?;
        let d_high = euclidean_distance(features, &self.high_centroid);
        let d_low = euclidean_distance(features, &self.low_centroid);

        let (label, near, far) = if d_high <= d_low {
            (QualityLabel::HighQuality, d_high, d_low)
        } else {
            (QualityLabel::LowQuality, d_low, d_high)
        };
        let total = near + far;
        let confidence = if total > 0.0 { far / total } else { 0.5 };

        Ok(Classification {
            label,
            confidence,
            distance: near,
        })
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn centroid(samples: &[Vec<f64>]) -> Vec<f64> {
    let mut center = vec![0.0; FEATURE_LEN];
    if samples.is_empty() {
        return center;
    }
    for sample in samples {
        for (acc, value) in center.iter_mut().zip(sample) {
            *acc += value;
        }
    }
    let count = samples.len() as f64;
    for acc in &mut center {
        *acc /= count;
    }
    center
}

fn validate_feature_len(features: &[f64]) -> AnalysisResult<()> {
    if features.len() == FEATURE_LEN {
        Ok(())
    } else {
        Err(AnalysisError::invalid_input(format!(
            "feature vector has length {}, expected {FEATURE_LEN}",
            features.len()
        )))
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Labeled sample buffers, grouped by class
#[derive(Debug, Default)]
struct SampleStore {
    high_quality: Vec<Vec<f64>>,
    low_quality: Vec<Vec<f64>>,
}

/// Adaptive binary quality classifier
///
/// Lifecycle: `UNTRAINED -> TRAINED` on the first successful [`train`];
/// later `train` calls replace the snapshot in place (still `TRAINED`).
/// [`reset`] is the explicit re-initialization that clears the buffers and
/// drops the model.
///
/// [`train`]: Self::train
/// [`reset`]: Self::reset
#[derive(Debug)]
pub struct QualityClassifier {
    samples: RwLock<SampleStore>,
    model: RwLock<Option<Arc<QualityModel>>>,
    min_samples_per_class: usize,
}

impl Default for QualityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityClassifier {
    /// Create an untrained classifier with the default sample minimum
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_samples(MIN_SAMPLES_PER_CLASS)
    }

    /// Create an untrained classifier with a custom per-class minimum
    #[must_use]
    pub fn with_min_samples(min_samples_per_class: usize) -> Self {
        Self {
            samples: RwLock::new(SampleStore::default()),
            model: RwLock::new(None),
            min_samples_per_class,
        }
    }

    /// Append a labeled sample to its class buffer
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` on a wrong feature-vector
    /// length, or `AnalysisError::Internal` if the buffer lock is poisoned.
    pub fn record(&self, sample: TrainingSample) -> AnalysisResult<()> {
        validate_feature_len(&sample.features)?;
        let mut store = self
            .samples
            .write()
            .map_err(|_| AnalysisError::internal("classifier sample buffer lock poisoned"))?;
        match sample.label {
            QualityLabel::HighQuality => store.high_quality.push(sample.features),
            QualityLabel::LowQuality => store.low_quality.push(sample.features),
        }
        debug!(
            label = sample.label.as_str(),
            high = store.high_quality.len(),
            low = store.low_quality.len(),
            "recorded training sample"
        );
        Ok(())
    }

    /// Current buffered sample counts as `(high_quality, low_quality)`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Internal` if the buffer lock is poisoned.
    pub fn sample_counts(&self) -> AnalysisResult<(usize, usize)> {
        let store = self
            .samples
            .read()
            .map_err(|_| AnalysisError::internal("classifier sample buffer lock poisoned"))?;
        Ok((store.high_quality.len(), store.low_quality.len()))
    }

    /// Train a new model snapshot from the buffered samples
    ///
    /// Copies both buffers under the read lock, fits outside any lock,
    /// then atomically swaps the snapshot in. The returned `Arc` is the
    /// same snapshot subsequent [`classify`](Self::classify) calls will use
    /// until the next successful training run.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientTrainingData` (recoverable,
    /// reporting current counts) when either class has fewer than the
    /// required samples, or `AnalysisError::Internal` on a poisoned lock.
    pub fn train(&self) -> AnalysisResult<Arc<QualityModel>> {
        let (high, low) = {
            let store = self
                .samples
                .read()
                .map_err(|_| AnalysisError::internal("classifier sample buffer lock poisoned"))?;
            if store.high_quality.len() < self.min_samples_per_class
                || store.low_quality.len() < self.min_samples_per_class
            {
                return Err(AnalysisError::InsufficientTrainingData {
                    high_quality: store.high_quality.len(),
                    low_quality: store.low_quality.len(),
                    required: self.min_samples_per_class,
                });
            }
            (store.high_quality.clone(), store.low_quality.clone())
        };

        let snapshot = Arc::new(QualityModel {
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
            high_centroid: centroid(&high),
            low_centroid: centroid(&low),
            sample_counts: (high.len(), low.len()),
        });

        let mut slot = self
            .model
            .write()
            .map_err(|_| AnalysisError::internal("classifier model lock poisoned"))?;
        *slot = Some(Arc::clone(&snapshot));
        drop(slot);

        info!(
            model_id = %snapshot.id,
            high = snapshot.sample_counts.0,
            low = snapshot.sample_counts.1,
            "trained quality model snapshot"
        );
        Ok(snapshot)
    }

    /// Classify a repetition feature vector with the current snapshot
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ModelNotTrained` before the first successful
    /// training run, `AnalysisError::InvalidInput` on a wrong feature
    /// length, or `AnalysisError::Internal` on a poisoned lock.
    pub fn classify(&self, features: &[f64]) -> AnalysisResult<Classification> {
        let snapshot = self.current_model()?.ok_or(AnalysisError::ModelNotTrained)?;
        snapshot.classify(features)
    }

    /// The current model snapshot, if any training run has succeeded
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Internal` if the model lock is poisoned.
    pub fn current_model(&self) -> AnalysisResult<Option<Arc<QualityModel>>> {
        let slot = self
            .model
            .read()
            .map_err(|_| AnalysisError::internal("classifier model lock poisoned"))?;
        Ok(slot.clone())
    }

    /// Whether a trained model snapshot exists
    #[must_use]
    pub fn is_trained(&self) -> bool {
        matches!(self.current_model(), Ok(Some(_)))
    }

    /// Explicit re-initialization: clear both buffers and drop the model
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Internal` on a poisoned lock.
    pub fn reset(&self) -> AnalysisResult<()> {
        let mut store = self
            .samples
            .write()
            .map_err(|_| AnalysisError::internal("classifier sample buffer lock poisoned"))?;
        store.high_quality.clear();
        store.low_quality.clear();
        drop(store);

        let mut slot = self
            .model
            .write()
            .map_err(|_| AnalysisError::internal("classifier model lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

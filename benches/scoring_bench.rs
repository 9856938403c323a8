// ABOUTME: Criterion benchmarks for the repetition scoring pipeline
// ABOUTME: Measures frame extraction throughput, full scoring, and classifier operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! Criterion benchmarks for the repetition scoring pipeline.
//!
//! Measures full-pipeline scoring across frame counts plus classifier
//! training and inference.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use repform::intelligence::RepetitionScorer;
use repform::models::{BodyLandmark, Keypoint, Point3, PoseFrame, QualityLabel};

/// Generate a deterministic repetition with the knee sweeping its band
///
/// Index arithmetic only: benchmarks must not depend on RNG state.
fn generate_repetition(frame_count: usize, spacing_ms: f64) -> Vec<PoseFrame> {
    (0..frame_count)
        .map(|index| {
            let phase = index as f64 / frame_count.saturating_sub(1).max(1) as f64;
            let knee_deg = 109.0 - 38.0 * (1.0 - (2.0 * phase - 1.0).abs());
            let rad = knee_deg.to_radians();
            let knee = (-0.1, 0.5);
            let ankle = (knee.0 + 0.4 * rad.sin(), knee.1 + 0.4 * rad.cos());
            PoseFrame::new(
                index as f64 * spacing_ms,
                vec![
                    Keypoint::new(BodyLandmark::LeftHip, Point3::new(-0.1, 1.0, 0.0), 0.9),
                    Keypoint::new(
                        BodyLandmark::LeftKnee,
                        Point3::new(knee.0, knee.1, 0.0),
                        0.9,
                    ),
                    Keypoint::new(
                        BodyLandmark::LeftAnkle,
                        Point3::new(ankle.0, ankle.1, 0.0),
                        0.9,
                    ),
                ],
            )
        })
        .collect()
}

fn bench_score_repetition(c: &mut Criterion) {
    let scorer = RepetitionScorer::new();
    let mut group = c.benchmark_group("score_repetition");

    for frame_count in [30_usize, 120, 600] {
        let frames = generate_repetition(frame_count, 3000.0 / frame_count as f64);
        group.throughput(Throughput::Elements(frame_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(frame_count),
            &frames,
            |b, frames| b.iter(|| scorer.score(black_box(frames)).unwrap()),
        );
    }
    group.finish();
}

fn bench_classifier(c: &mut Criterion) {
    let scorer = RepetitionScorer::new();
    for i in 0..50 {
        let good = generate_repetition(30, 95.0 + i as f64);
        scorer.score_labeled(&good, QualityLabel::HighQuality).unwrap();
        let bad = generate_repetition(30, 400.0 + 10.0 * i as f64);
        scorer.score_labeled(&bad, QualityLabel::LowQuality).unwrap();
    }

    c.bench_function("classifier_train_100_samples", |b| {
        b.iter(|| scorer.classifier().train().unwrap());
    });

    scorer.classifier().train().unwrap();
    let features = scorer
        .feature_vector(&generate_repetition(30, 100.0))
        .unwrap();
    c.bench_function("classifier_classify", |b| {
        b.iter(|| scorer.classifier().classify(black_box(&features)).unwrap());
    });
}

criterion_group!(benches, bench_score_repetition, bench_classifier);
criterion_main!(benches);

// ABOUTME: Integration tests for the role-based permission table
// ABOUTME: Verifies role grants and caller-side gating of repetition scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{clean_repetition, init_test_logging};
use repform::intelligence::RepetitionScorer;
use repform::models::RepetitionScore;
use repform::permissions::{has_permission, Permission, RoleName};

#[test]
fn test_role_grants_match_the_role_table() {
    let regular = [RoleName::RegularUser];
    assert!(has_permission(&regular, Permission::VIEW_EXERCISES));
    assert!(has_permission(&regular, Permission::PERFORM_EXERCISES));
    assert!(has_permission(&regular, Permission::VIEW_REPETITION_SCORES));
    assert!(has_permission(&regular, Permission::VIEW_FATIGUE_DATA));
    assert!(has_permission(
        &regular,
        Permission::VIEW_ADAPTATION_PREDICTIONS
    ));
    assert!(!has_permission(&regular, Permission::CREATE_EXERCISE_PLAN));
    assert!(!has_permission(&regular, Permission::VIEW_USER_DATA));

    let researcher = [RoleName::Researcher];
    assert!(has_permission(&researcher, Permission::ACCESS_RESEARCH_DATA));
    assert!(has_permission(&researcher, Permission::VIEW_EMOTIONAL_STATE));
    assert!(!has_permission(&researcher, Permission::PERFORM_EXERCISES));

    let admin = [RoleName::Administrator];
    assert!(has_permission(&admin, Permission::all()));
}

#[test]
fn test_role_descriptions_are_populated() {
    for role_name in [
        RoleName::RegularUser,
        RoleName::Trainer,
        RoleName::PhysicalTherapist,
        RoleName::Researcher,
        RoleName::Administrator,
    ] {
        let role = role_name.role();
        assert_eq!(role.name, role_name);
        assert!(!role.description.is_empty());
        assert_eq!(role.permissions, role_name.permissions());
    }
}

/// Caller-side gating: the pipeline computes scores unconditionally, the
/// boundary decides who may see them
fn expose_score(score: RepetitionScore, roles: &[RoleName]) -> Option<RepetitionScore> {
    has_permission(roles, Permission::VIEW_REPETITION_SCORES).then_some(score)
}

#[test]
fn test_caller_gates_score_exposure() {
    init_test_logging();
    let scorer = RepetitionScorer::new();
    let score = scorer.score(&clean_repetition(30, 100.0)).unwrap();

    assert!(expose_score(score.clone(), &[RoleName::RegularUser]).is_some());
    assert!(expose_score(score, &[]).is_none());
}

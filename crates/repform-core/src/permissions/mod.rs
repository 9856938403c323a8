// ABOUTME: Role-based permission system gating exposure of analysis results
// ABOUTME: Static role table with bitflags permissions and a has_permission check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform Project

//! # Permissions
//!
//! Static lookup table mapping roles to capability flags. The analysis
//! pipeline itself never consults this module: scores are computed
//! unconditionally, and callers gate exposure of sensitive fields (for
//! example requiring [`Permission::VIEW_REPETITION_SCORES`] before
//! returning a [`crate::models::RepetitionScore`] across a trust boundary).
//!
//! User records and their persistence are external concerns; checks take
//! the role list the caller already holds for the user.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability flags grantable to a role
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permission: u32 {
        /// Browse the exercise catalog
        const VIEW_EXERCISES = 1 << 0;
        /// Perform exercises and submit repetitions for scoring
        const PERFORM_EXERCISES = 1 << 1;
        /// Create exercise plans for other users
        const CREATE_EXERCISE_PLAN = 1 << 2;
        /// Modify existing exercise plans
        const MODIFY_EXERCISE_PLAN = 1 << 3;
        /// View inferred emotional state
        const VIEW_EMOTIONAL_STATE = 1 << 4;
        /// View repetition quality scores
        const VIEW_REPETITION_SCORES = 1 << 5;
        /// View fatigue estimates
        const VIEW_FATIGUE_DATA = 1 << 6;
        /// View adaptation predictions
        const VIEW_ADAPTATION_PREDICTIONS = 1 << 7;
        /// View another user's profile data
        const VIEW_USER_DATA = 1 << 8;
        /// Modify another user's profile data
        const MODIFY_USER_DATA = 1 << 9;
        /// Enumerate all users
        const VIEW_ALL_USERS = 1 << 10;
        /// Administer the system
        const MANAGE_SYSTEM = 1 << 11;
        /// Access anonymized research datasets
        const ACCESS_RESEARCH_DATA = 1 << 12;
        /// Override fatigue warnings for a session
        const OVERRIDE_FATIGUE_WARNINGS = 1 << 13;
        /// Prescribe rehabilitation therapy
        const PRESCRIBE_THERAPY = 1 << 14;
    }
}

/// Roles known to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Standard user with basic exercise and feedback access
    RegularUser,
    /// Trainer with plan management and client visibility
    Trainer,
    /// Physical therapist with rehabilitation permissions
    PhysicalTherapist,
    /// Researcher with access to anonymized data
    Researcher,
    /// System administrator with full access
    Administrator,
}

impl RoleName {
    /// Stable snake_case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegularUser => "regular_user",
            Self::Trainer => "trainer",
            Self::PhysicalTherapist => "physical_therapist",
            Self::Researcher => "researcher",
            Self::Administrator => "administrator",
        }
    }

    /// Permissions granted by this role
    #[must_use]
    pub const fn permissions(self) -> Permission {
        match self {
            Self::RegularUser => Permission::VIEW_EXERCISES
                .union(Permission::PERFORM_EXERCISES)
                .union(Permission::VIEW_REPETITION_SCORES)
                .union(Permission::VIEW_FATIGUE_DATA)
                .union(Permission::VIEW_ADAPTATION_PREDICTIONS),
            Self::Trainer => Permission::VIEW_EXERCISES
                .union(Permission::PERFORM_EXERCISES)
                .union(Permission::CREATE_EXERCISE_PLAN)
                .union(Permission::MODIFY_EXERCISE_PLAN)
                .union(Permission::VIEW_REPETITION_SCORES)
                .union(Permission::VIEW_FATIGUE_DATA)
                .union(Permission::VIEW_ADAPTATION_PREDICTIONS)
                .union(Permission::VIEW_USER_DATA)
                .union(Permission::OVERRIDE_FATIGUE_WARNINGS),
            Self::PhysicalTherapist => Permission::VIEW_EXERCISES
                .union(Permission::PERFORM_EXERCISES)
                .union(Permission::CREATE_EXERCISE_PLAN)
                .union(Permission::MODIFY_EXERCISE_PLAN)
                .union(Permission::VIEW_REPETITION_SCORES)
                .union(Permission::VIEW_FATIGUE_DATA)
                .union(Permission::VIEW_ADAPTATION_PREDICTIONS)
                .union(Permission::VIEW_USER_DATA)
                .union(Permission::OVERRIDE_FATIGUE_WARNINGS)
                .union(Permission::PRESCRIBE_THERAPY),
            Self::Researcher => Permission::VIEW_EXERCISES
                .union(Permission::ACCESS_RESEARCH_DATA)
                .union(Permission::VIEW_EMOTIONAL_STATE)
                .union(Permission::VIEW_REPETITION_SCORES)
                .union(Permission::VIEW_FATIGUE_DATA)
                .union(Permission::VIEW_ADAPTATION_PREDICTIONS),
            Self::Administrator => Permission::all(),
        }
    }

    /// Role metadata (name, permissions, description)
    #[must_use]
    pub const fn role(self) -> Role {
        Role {
            name: self,
            permissions: self.permissions(),
            description: match self {
                Self::RegularUser => "Standard user with basic exercise and feedback access",
                Self::Trainer => {
                    "Trainer with ability to create/modify plans and view client data"
                }
                Self::PhysicalTherapist => "Physical therapist with rehabilitation permissions",
                Self::Researcher => "Researcher with access to anonymized data for analysis",
                Self::Administrator => "System administrator with full access",
            },
        }
    }
}

/// A role and its granted permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    /// Role identity
    pub name: RoleName,
    /// Permissions granted by the role
    pub permissions: Permission,
    /// Human-readable description
    pub description: &'static str,
}

/// Check whether any of the user's roles grants the required permission
#[must_use]
pub fn has_permission(roles: &[RoleName], required: Permission) -> bool {
    roles
        .iter()
        .any(|role| role.permissions().contains(required))
}

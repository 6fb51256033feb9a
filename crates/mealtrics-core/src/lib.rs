// ABOUTME: Core domain types for the Mealtrics nutrition analytics platform
// ABOUTME: Foundation crate with profile, meal, and goal models plus the engine error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

#![deny(unsafe_code)]

//! # Mealtrics Core
//!
//! Foundation crate providing the shared domain types for the Mealtrics
//! nutrition analytics platform. Everything in here is a plain value object:
//! immutable once constructed, cheap to clone, serde round-trippable, and
//! free of I/O. This crate is designed to change infrequently so dependent
//! crates keep their incremental-compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: The engine error taxonomy (`EngineError`) returned by the
//!   analysis engines instead of silently correcting bad input
//! - **models**: Profile, meal, and goal-target data structures

/// Engine error taxonomy shared by all analysis engines
pub mod errors;

/// Core data models (`UserProfile`, `MealEntry`, `GoalTargets`, etc.)
pub mod models;

pub use errors::{EngineError, EngineResult};
pub use models::{
    ActivityLevel, FoodItem, GoalTargets, GoalType, MealEntry, MealType, Sex, UserProfile,
};

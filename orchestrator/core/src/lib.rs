// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `codementor-core`
//!
//! In-memory classroom backend: students submit code and questions,
//! instructors manage rosters and answer, and code is routed to an external
//! analysis service for correction.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Layers:** `domain` → `application` → `infrastructure` / `presentation`

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;

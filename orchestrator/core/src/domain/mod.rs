// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer (`codementor-core`)
//!
//! Pure classroom model. No network or HTTP dependencies.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`identity`] | `Identity`, `Account`, `Role`, `StudentProfile`, `InstructorProfile` |
//! | [`roster`] | `ClassRoster`, `RosterAction`, `RosterOutcome` |
//! | [`question`] | `Question` |
//! | [`script`] | `Script`, `Correction`, `CorrectionStatus` |
//! | [`analysis`] | `CodeAnalyzer` trait |
//! | [`registry`] | `Registry` aggregate root, `RegistryError` |
//! | [`server_config`] | `ServerConfig` manifest |

pub mod analysis;
pub mod identity;
pub mod question;
pub mod registry;
pub mod roster;
pub mod script;
pub mod server_config;

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod bootstrap;
pub mod classroom;

// Re-export use cases for convenience
pub use bootstrap::build_registry;
pub use classroom::{ClassroomService, CodeReview, CorrectionView, LoginSummary, StandardClassroomService};

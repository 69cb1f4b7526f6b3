// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Code Analysis
//!
//! Domain interface for the external correction service.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolates the correction workflow from the analyzer vendor API

// Implementations live in infrastructure/analysis/. Upstream failures are
// folded into the Correction payload; `analyze` never returns an error.

use async_trait::async_trait;

use crate::domain::script::{Correction, CorrectionId};

/// Id stamped on every correction produced by an analyzer.
pub const ANALYZER_CORRECTION_ID: CorrectionId = CorrectionId(1);

pub const NO_RESPONSE: &str = "No response found";
pub const ANALYSIS_FAILED: &str = "Failed to analyze code";
pub const CONNECTION_ERROR_PREFIX: &str = "Error connecting to the analysis API";

/// Produces a [`Correction`] from raw code text.
#[async_trait]
pub trait CodeAnalyzer: Send + Sync {
    async fn analyze(&self, code: &str) -> Correction;
}

/// Instruction sent to the model with the student's code embedded.
pub fn correction_prompt(code: &str) -> String {
    format!("Correct and improve this code: {}", code)
}

pub fn analyzed(corrected_code: impl Into<String>) -> Correction {
    Correction::new(ANALYZER_CORRECTION_ID, corrected_code)
}

pub fn analysis_failed() -> Correction {
    analyzed(ANALYSIS_FAILED)
}

pub fn connection_failed(error: impl std::fmt::Display) -> Correction {
    analyzed(format!("{}: {}", CONNECTION_ERROR_PREFIX, error))
}

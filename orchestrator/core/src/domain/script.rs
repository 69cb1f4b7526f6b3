// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Code submissions and their corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::identity::IdentityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScriptId(pub u64);

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrectionId(pub u64);

/// A piece of code a student submitted for review.
#[derive(Debug, Clone, Serialize)]
pub struct Script {
    pub id: ScriptId,
    pub code: String,
    pub correction: Option<Correction>,
    pub submitted_at: DateTime<Utc>,
}

impl Script {
    pub fn new(id: ScriptId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            correction: None,
            submitted_at: Utc::now(),
        }
    }

    /// Replaces any previously linked correction.
    pub fn link_correction(&mut self, correction: Correction) -> String {
        self.correction = Some(correction);
        format!("Correction linked to script {}", self.id)
    }
}

/// Outcome of analyzing a script. Analyzer failures are carried in
/// `corrected_code` as a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub id: CorrectionId,
    pub corrected_code: String,
    pub target_student: Option<IdentityId>,
}

impl Correction {
    pub fn new(id: CorrectionId, corrected_code: impl Into<String>) -> Self {
        Self {
            id,
            corrected_code: corrected_code.into(),
            target_student: None,
        }
    }

    pub fn with_target(mut self, student: IdentityId) -> Self {
        self.target_student = Some(student);
        self
    }

    pub fn delivery_notice(&self, recipient: Option<&str>) -> String {
        match recipient {
            Some(name) if self.target_student.is_some() => format!("Correction sent to {}", name),
            _ => "Correction sent".to_string(),
        }
    }
}

/// Lookup result for a student's script. Keeps "unknown script" apart from
/// "submitted but not analyzed yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionStatus<'a> {
    Ready(&'a Correction),
    NotYetCorrected,
    NoSuchScript,
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::identity::IdentityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A student's question. Lives in the registry arena; students and
/// instructors refer to it by id.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub author: IdentityId,
    pub content: String,
    pub answer: Option<String>,
    pub asked_at: DateTime<Utc>,
    pub answered_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(id: QuestionId, author: IdentityId, content: impl Into<String>) -> Self {
        Self {
            id,
            author,
            content: content.into(),
            answer: None,
            asked_at: Utc::now(),
            answered_at: None,
        }
    }

    /// Overwrites any earlier answer.
    pub fn answer(&mut self, text: impl Into<String>) {
        self.answer = Some(text.into());
        self.answered_at = Some(Utc::now());
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

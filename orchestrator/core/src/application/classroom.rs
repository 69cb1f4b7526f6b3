// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Classroom Service
//!
//! Use cases behind the HTTP surface: login, code review, question routing
//! and roster management.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates the [`Registry`] aggregate and the [`CodeAnalyzer`]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::analysis::CodeAnalyzer;
use crate::domain::identity::{IdentityId, ProfileUpdate, RoleKind};
use crate::domain::question::{Question, QuestionId};
use crate::domain::registry::{Registry, RegistryError};
use crate::domain::roster::{RosterAction, RosterId, RosterOutcome};
use crate::domain::script::{Correction, CorrectionStatus, ScriptId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSummary {
    pub id: IdentityId,
    pub name: String,
    pub role: RoleKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReview {
    pub script_id: ScriptId,
    pub correction: Correction,
}

/// Owned counterpart of [`CorrectionStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionView {
    Ready(Correction),
    NotYetCorrected,
    NoSuchScript,
}

impl From<CorrectionStatus<'_>> for CorrectionView {
    fn from(status: CorrectionStatus<'_>) -> Self {
        match status {
            CorrectionStatus::Ready(correction) => CorrectionView::Ready(correction.clone()),
            CorrectionStatus::NotYetCorrected => CorrectionView::NotYetCorrected,
            CorrectionStatus::NoSuchScript => CorrectionView::NoSuchScript,
        }
    }
}

#[async_trait]
pub trait ClassroomService: Send + Sync {
    async fn login(&self, email: &str, secret: &str) -> Option<LoginSummary>;
    async fn update_profile(&self, id: IdentityId, update: ProfileUpdate) -> Result<String, RegistryError>;
    async fn analyze_code(&self, code: &str) -> Correction;
    async fn submit_code(&self, student_id: IdentityId, code: &str) -> Result<CodeReview, RegistryError>;
    async fn correction_status(&self, student_id: IdentityId, script_id: ScriptId) -> Result<CorrectionView, RegistryError>;
    async fn ask_question(&self, student_id: IdentityId, content: &str) -> Result<QuestionId, RegistryError>;
    async fn answer_question(&self, question_id: QuestionId, answer: &str) -> Result<(), RegistryError>;
    async fn answer_for(&self, student_id: IdentityId, question_id: QuestionId) -> Result<Option<String>, RegistryError>;
    async fn received_questions(&self, instructor_id: IdentityId) -> Result<Vec<Question>, RegistryError>;
    async fn manage_roster(&self, instructor_id: IdentityId, roster_id: RosterId, action: RosterAction) -> Result<RosterOutcome, RegistryError>;
    async fn list_students(&self) -> Vec<String>;
}

/// Registry access is short and synchronous; the lock is never held while
/// waiting on the analyzer, so other requests may interleave with a review.
pub struct StandardClassroomService {
    registry: Arc<RwLock<Registry>>,
    analyzer: Arc<dyn CodeAnalyzer>,
    fallback_instructor: Option<IdentityId>,
}

impl StandardClassroomService {
    pub fn new(
        registry: Arc<RwLock<Registry>>,
        analyzer: Arc<dyn CodeAnalyzer>,
        fallback_instructor: Option<IdentityId>,
    ) -> Self {
        Self {
            registry,
            analyzer,
            fallback_instructor,
        }
    }

    pub fn registry(&self) -> Arc<RwLock<Registry>> {
        self.registry.clone()
    }

    fn route_question(&self, registry: &Registry, student_id: IdentityId) -> Result<IdentityId, RegistryError> {
        registry
            .instructor_for_student(student_id)
            .or(self.fallback_instructor)
            .ok_or(RegistryError::NoInstructorAvailable)
    }
}

#[async_trait]
impl ClassroomService for StandardClassroomService {
    async fn login(&self, email: &str, secret: &str) -> Option<LoginSummary> {
        let registry = self.registry.read();
        match registry.authenticate_login(email, secret) {
            Some(account) => {
                info!("Authenticated {} ({:?})", account.name(), account.kind());
                Some(LoginSummary {
                    id: account.id(),
                    name: account.name().to_string(),
                    role: account.kind(),
                })
            }
            None => {
                info!("Login failed for email '{}'", email);
                None
            }
        }
    }

    async fn update_profile(&self, id: IdentityId, update: ProfileUpdate) -> Result<String, RegistryError> {
        let message = self.registry.write().update_profile(id, update)?;
        debug!("Profile {} updated", id);
        Ok(message.to_string())
    }

    async fn analyze_code(&self, code: &str) -> Correction {
        self.analyzer.analyze(code).await
    }

    async fn submit_code(&self, student_id: IdentityId, code: &str) -> Result<CodeReview, RegistryError> {
        let script_id = self.registry.write().submit_code(student_id, code)?;
        info!("Student {} submitted script {}", student_id, script_id);

        let correction = self.analyzer.analyze(code).await.with_target(student_id);

        let mut registry = self.registry.write();
        let linked = registry.link_correction(student_id, script_id, correction.clone())?;
        let recipient = registry.account(student_id).map(|a| a.name().to_string());
        debug!("{}; {}", linked, correction.delivery_notice(recipient.as_deref()));

        Ok(CodeReview {
            script_id,
            correction,
        })
    }

    async fn correction_status(&self, student_id: IdentityId, script_id: ScriptId) -> Result<CorrectionView, RegistryError> {
        let registry = self.registry.read();
        Ok(registry.correction_status(student_id, script_id)?.into())
    }

    async fn ask_question(&self, student_id: IdentityId, content: &str) -> Result<QuestionId, RegistryError> {
        let mut registry = self.registry.write();
        registry.student(student_id)?;
        let instructor_id = self.route_question(&registry, student_id)?;
        registry.instructor(instructor_id)?;

        let question_id = registry.next_question_id();
        registry.submit_question(Question::new(question_id, student_id, content))?;
        let forwarded = registry.forward_question_to_instructor(question_id, instructor_id)?;
        info!("Question {} from student {}: {}", question_id, student_id, forwarded);

        Ok(question_id)
    }

    async fn answer_question(&self, question_id: QuestionId, answer: &str) -> Result<(), RegistryError> {
        let mut registry = self.registry.write();
        let author = registry
            .question(question_id)
            .map(|q| q.author)
            .ok_or(RegistryError::QuestionNotFound(question_id))?;
        let instructor_id = registry.instructor_for_question(question_id).ok_or_else(|| {
            warn!("Question {} was never routed to an instructor", question_id);
            RegistryError::QuestionNotFound(question_id)
        })?;

        registry.answer_question(instructor_id, question_id, answer)?;
        let forwarded = registry.forward_answer_to_student(question_id, author)?;
        info!("Question {} answered by instructor {}: {}", question_id, instructor_id, forwarded);
        Ok(())
    }

    async fn answer_for(&self, student_id: IdentityId, question_id: QuestionId) -> Result<Option<String>, RegistryError> {
        let registry = self.registry.read();
        Ok(registry.answer_for(student_id, question_id)?.map(str::to_string))
    }

    async fn received_questions(&self, instructor_id: IdentityId) -> Result<Vec<Question>, RegistryError> {
        let registry = self.registry.read();
        Ok(registry
            .received_questions(instructor_id)?
            .into_iter()
            .cloned()
            .collect())
    }

    async fn manage_roster(&self, instructor_id: IdentityId, roster_id: RosterId, action: RosterAction) -> Result<RosterOutcome, RegistryError> {
        let outcome = self.registry.write().manage_roster(instructor_id, roster_id, action)?;
        debug!("Roster {} {:?} by instructor {}", roster_id, action, instructor_id);
        Ok(outcome)
    }

    async fn list_students(&self) -> Vec<String> {
        self.registry
            .read()
            .list_students()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

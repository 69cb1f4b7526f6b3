// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Identity & Role Model
//!
//! People known to the system. Shared credential fields live in [`Identity`];
//! role-specific state is carried by [`Role`], so callers dispatch with a
//! `match` instead of downcasting.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Identity`] | id, display name, login email, opaque secret |
//! | [`Account`] | an `Identity` plus its [`Role`] |
//! | [`StudentProfile`] | submitted scripts and question ids |
//! | [`InstructorProfile`] | managed roster ids and received question ids |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::question::QuestionId;
use crate::domain::roster::RosterId;
use crate::domain::script::{Correction, CorrectionStatus, Script, ScriptId};

pub const PROFILE_UPDATED: &str = "Profile updated successfully.";
pub const SIGNED_OUT: &str = "User signed out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId(pub u64);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person with login credentials.
///
/// The secret is compared by plain equality and is never serialized.
#[derive(Clone, Serialize)]
pub struct Identity {
    pub id: IdentityId,
    #[serde(skip)]
    credential_secret: String,
    pub display_name: String,
    pub email: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile change. Absent or empty fields leave the current value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub secret: Option<String>,
}

impl ProfileUpdate {
    /// The email this update would install, if any.
    pub fn new_email(&self) -> Option<&str> {
        non_empty(&self.email)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Identity {
    pub fn new(
        id: IdentityId,
        secret: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            credential_secret: secret.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    pub fn authenticate(&self, candidate_secret: &str) -> bool {
        self.credential_secret == candidate_secret
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> &'static str {
        if let Some(name) = non_empty(&update.display_name) {
            self.display_name = name.to_string();
        }
        if let Some(email) = non_empty(&update.email) {
            self.email = email.to_string();
        }
        if let Some(secret) = non_empty(&update.secret) {
            self.credential_secret = secret.to_string();
        }
        PROFILE_UPDATED
    }

    pub fn sign_out(&self) -> &'static str {
        SIGNED_OUT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Student,
    Instructor,
}

#[derive(Debug, Clone)]
pub enum Role {
    Student(StudentProfile),
    Instructor(InstructorProfile),
}

/// An identity together with its role-specific payload.
#[derive(Debug, Clone)]
pub struct Account {
    pub identity: Identity,
    pub role: Role,
}

impl Account {
    pub fn student(identity: Identity) -> Self {
        Self {
            identity,
            role: Role::Student(StudentProfile::default()),
        }
    }

    pub fn instructor(identity: Identity) -> Self {
        Self {
            identity,
            role: Role::Instructor(InstructorProfile::default()),
        }
    }

    pub fn id(&self) -> IdentityId {
        self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.display_name
    }

    pub fn kind(&self) -> RoleKind {
        match self.role {
            Role::Student(_) => RoleKind::Student,
            Role::Instructor(_) => RoleKind::Instructor,
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.role {
            Role::Student(profile) => Some(profile),
            Role::Instructor(_) => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut StudentProfile> {
        match &mut self.role {
            Role::Student(profile) => Some(profile),
            Role::Instructor(_) => None,
        }
    }

    pub fn as_instructor(&self) -> Option<&InstructorProfile> {
        match &self.role {
            Role::Instructor(profile) => Some(profile),
            Role::Student(_) => None,
        }
    }

    pub fn as_instructor_mut(&mut self) -> Option<&mut InstructorProfile> {
        match &mut self.role {
            Role::Instructor(profile) => Some(profile),
            Role::Student(_) => None,
        }
    }
}

/// Student-side state: owned scripts and a view of submitted question ids.
#[derive(Debug, Clone, Default)]
pub struct StudentProfile {
    submitted_scripts: Vec<Script>,
    submitted_questions: Vec<QuestionId>,
}

impl StudentProfile {
    pub fn submit_code(&mut self, script: Script) -> String {
        let message = format!("Code submitted successfully: script {}", script.id);
        self.submitted_scripts.push(script);
        message
    }

    pub fn scripts(&self) -> &[Script] {
        &self.submitted_scripts
    }

    pub fn script(&self, script_id: ScriptId) -> Option<&Script> {
        self.submitted_scripts.iter().find(|s| s.id == script_id)
    }

    /// Highest script id this student holds, if any.
    pub fn last_script_id(&self) -> Option<ScriptId> {
        self.submitted_scripts.iter().map(|s| s.id).max()
    }

    pub fn correction(&self, script_id: ScriptId) -> CorrectionStatus<'_> {
        match self.script(script_id) {
            None => CorrectionStatus::NoSuchScript,
            Some(script) => match &script.correction {
                Some(correction) => CorrectionStatus::Ready(correction),
                None => CorrectionStatus::NotYetCorrected,
            },
        }
    }

    pub fn is_correction_ready(&self, script_id: ScriptId) -> bool {
        matches!(self.correction(script_id), CorrectionStatus::Ready(_))
    }

    /// Returns `None` when the script is unknown.
    pub fn link_correction(&mut self, script_id: ScriptId, correction: Correction) -> Option<String> {
        self.submitted_scripts
            .iter_mut()
            .find(|s| s.id == script_id)
            .map(|script| script.link_correction(correction))
    }

    pub fn submit_question(&mut self, question_id: QuestionId) -> String {
        self.submitted_questions.push(question_id);
        format!("Question submitted successfully: {}", question_id)
    }

    pub fn questions(&self) -> &[QuestionId] {
        &self.submitted_questions
    }

    pub fn has_question(&self, question_id: QuestionId) -> bool {
        self.submitted_questions.contains(&question_id)
    }
}

/// Instructor-side state. Both collections hold ids owned by the registry.
#[derive(Debug, Clone, Default)]
pub struct InstructorProfile {
    managed_rosters: Vec<RosterId>,
    received_questions: Vec<QuestionId>,
}

impl InstructorProfile {
    pub fn manage(&mut self, roster_id: RosterId) {
        self.managed_rosters.push(roster_id);
    }

    pub fn release(&mut self, roster_id: RosterId) {
        self.managed_rosters.retain(|id| *id != roster_id);
    }

    pub fn manages(&self, roster_id: RosterId) -> bool {
        self.managed_rosters.contains(&roster_id)
    }

    pub fn rosters(&self) -> &[RosterId] {
        &self.managed_rosters
    }

    pub fn receive(&mut self, question_id: QuestionId) {
        self.received_questions.push(question_id);
    }

    pub fn received(&self) -> &[QuestionId] {
        &self.received_questions
    }

    pub fn has_received(&self, question_id: QuestionId) -> bool {
        self.received_questions.contains(&question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joao() -> Identity {
        Identity::new(IdentityId(1), "123", "João", "j")
    }

    #[test]
    fn test_authenticate_plain_equality() {
        let identity = joao();
        assert!(identity.authenticate("123"));
        assert!(!identity.authenticate("000"));
        assert!(!identity.authenticate(""));
    }

    #[test]
    fn test_update_profile_replaces_only_provided_fields() {
        let mut identity = joao();
        let message = identity.update_profile(ProfileUpdate {
            display_name: Some("João Silva".to_string()),
            email: Some(String::new()),
            secret: None,
        });

        assert_eq!(message, PROFILE_UPDATED);
        assert_eq!(identity.display_name, "João Silva");
        assert_eq!(identity.email, "j");
        assert!(identity.authenticate("123"));

        identity.update_profile(ProfileUpdate {
            secret: Some("abc".to_string()),
            ..Default::default()
        });
        assert!(identity.authenticate("abc"));
        assert!(!identity.authenticate("123"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", joao());
        assert!(!rendered.contains("123"));
        assert!(rendered.contains("João"));
    }

    #[test]
    fn test_new_script_is_not_yet_corrected() {
        let mut profile = StudentProfile::default();
        assert_eq!(profile.last_script_id(), None);
        let id = ScriptId(1);
        profile.submit_code(Script::new(id, "print(1)"));
        assert_eq!(profile.last_script_id(), Some(id));

        assert_eq!(profile.correction(id), CorrectionStatus::NotYetCorrected);
        assert_eq!(profile.correction(ScriptId(99)), CorrectionStatus::NoSuchScript);
        assert!(!profile.is_correction_ready(id));

        let message = profile
            .link_correction(id, Correction::new(crate::domain::script::CorrectionId(1), "print(2)"))
            .unwrap();
        assert_eq!(message, "Correction linked to script 1");
        assert!(profile.is_correction_ready(id));
        assert!(profile.link_correction(ScriptId(99), Correction::new(crate::domain::script::CorrectionId(1), "")).is_none());
    }

    #[test]
    fn test_account_role_dispatch() {
        let student = Account::student(joao());
        let instructor = Account::instructor(Identity::new(IdentityId(2), "456", "Maria", "m"));

        assert_eq!(student.kind(), RoleKind::Student);
        assert!(student.as_student().is_some());
        assert!(student.as_instructor().is_none());
        assert_eq!(instructor.kind(), RoleKind::Instructor);
        assert!(instructor.as_student().is_none());
        assert_eq!(instructor.identity.sign_out(), SIGNED_OUT);
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Registry Aggregate
//!
//! Process-wide aggregate root owning every [`Account`], every
//! [`ClassRoster`] and the question arena. Student and instructor question
//! collections only hold [`QuestionId`]s; the [`Question`] itself lives here,
//! so an answer written through the instructor is immediately visible to the
//! student without a copy step.
//!
//! All lookups are linear in registration order, matching the first-match
//! semantics of login.
//!
//! ## Invariants
//!
//! - Identity ids and emails are unique across accounts.
//! - A roster's owner is a registered instructor that lists the roster among
//!   its managed rosters.
//! - Every id in a student or instructor question view exists in the arena.
//!
//! State is in-memory only and is lost on restart.

use std::collections::BTreeMap;

use crate::domain::identity::{Account, IdentityId, InstructorProfile, ProfileUpdate, StudentProfile};
use crate::domain::question::{Question, QuestionId};
use crate::domain::roster::{ClassRoster, RosterAction, RosterId, RosterOutcome};
use crate::domain::script::{Correction, CorrectionStatus, Script, ScriptId};

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Identity not found: {0}")]
    IdentityNotFound(IdentityId),

    #[error("Student not found: {0}")]
    StudentNotFound(IdentityId),

    #[error("Instructor not found: {0}")]
    InstructorNotFound(IdentityId),

    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Roster not found: {0}")]
    RosterNotFound(RosterId),

    #[error("Script not found: {0}")]
    ScriptNotFound(ScriptId),

    #[error("No instructor available to receive questions")]
    NoInstructorAvailable,

    #[error("Identity {0} is already registered")]
    DuplicateIdentity(IdentityId),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Roster {0} already exists")]
    DuplicateRoster(RosterId),

    #[error("Question {0} already exists")]
    DuplicateQuestion(QuestionId),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::IdentityNotFound(_)
                | RegistryError::StudentNotFound(_)
                | RegistryError::InstructorNotFound(_)
                | RegistryError::QuestionNotFound(_)
                | RegistryError::RosterNotFound(_)
                | RegistryError::ScriptNotFound(_)
                | RegistryError::NoInstructorAvailable
        )
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    accounts: Vec<Account>,
    rosters: Vec<ClassRoster>,
    questions: BTreeMap<QuestionId, Question>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- identities -------------------------------------------------------

    pub fn register_identity(&mut self, account: Account) -> Result<(), RegistryError> {
        if self.account(account.id()).is_some() {
            return Err(RegistryError::DuplicateIdentity(account.id()));
        }
        if self.email_taken(&account.identity.email, None) {
            return Err(RegistryError::DuplicateEmail(account.identity.email.clone()));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// First account, in registration order, whose email and secret both match.
    pub fn authenticate_login(&self, email: &str, secret: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.identity.email == email && a.identity.authenticate(secret))
    }

    pub fn update_profile(
        &mut self,
        id: IdentityId,
        update: ProfileUpdate,
    ) -> Result<&'static str, RegistryError> {
        if let Some(email) = update.new_email() {
            if self.email_taken(email, Some(id)) {
                return Err(RegistryError::DuplicateEmail(email.to_string()));
            }
        }
        let account = self.account_mut(id).ok_or(RegistryError::IdentityNotFound(id))?;
        Ok(account.identity.update_profile(update))
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: IdentityId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    pub fn student(&self, id: IdentityId) -> Result<&StudentProfile, RegistryError> {
        self.account(id)
            .and_then(Account::as_student)
            .ok_or(RegistryError::StudentNotFound(id))
    }

    pub fn instructor(&self, id: IdentityId) -> Result<&InstructorProfile, RegistryError> {
        self.account(id)
            .and_then(Account::as_instructor)
            .ok_or(RegistryError::InstructorNotFound(id))
    }

    /// Display names of every student, in registration order.
    pub fn list_students(&self) -> Vec<&str> {
        self.accounts
            .iter()
            .filter(|a| a.as_student().is_some())
            .map(Account::name)
            .collect()
    }

    fn account_mut(&mut self, id: IdentityId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id() == id)
    }

    fn student_mut(&mut self, id: IdentityId) -> Result<&mut StudentProfile, RegistryError> {
        self.account_mut(id)
            .and_then(Account::as_student_mut)
            .ok_or(RegistryError::StudentNotFound(id))
    }

    fn instructor_mut(&mut self, id: IdentityId) -> Result<&mut InstructorProfile, RegistryError> {
        self.account_mut(id)
            .and_then(Account::as_instructor_mut)
            .ok_or(RegistryError::InstructorNotFound(id))
    }

    fn student_name(&self, id: IdentityId) -> Result<String, RegistryError> {
        self.account(id)
            .filter(|a| a.as_student().is_some())
            .map(|a| a.name().to_string())
            .ok_or(RegistryError::StudentNotFound(id))
    }

    fn email_taken(&self, email: &str, except: Option<IdentityId>) -> bool {
        self.accounts
            .iter()
            .any(|a| Some(a.id()) != except && a.identity.email == email)
    }

    // ----- rosters ----------------------------------------------------------

    pub fn add_roster(&mut self, roster: ClassRoster) -> Result<(), RegistryError> {
        if self.roster(roster.id).is_some() {
            return Err(RegistryError::DuplicateRoster(roster.id));
        }
        self.instructor_mut(roster.owner)?.manage(roster.id);
        self.rosters.push(roster);
        Ok(())
    }

    /// Removes the roster and the owner's reference to it.
    pub fn drop_roster(&mut self, id: RosterId) -> Option<ClassRoster> {
        let position = self.rosters.iter().position(|r| r.id == id)?;
        let roster = self.rosters.remove(position);
        if let Ok(owner) = self.instructor_mut(roster.owner) {
            owner.release(id);
        }
        Some(roster)
    }

    pub fn rosters(&self) -> &[ClassRoster] {
        &self.rosters
    }

    pub fn roster(&self, id: RosterId) -> Option<&ClassRoster> {
        self.rosters.iter().find(|r| r.id == id)
    }

    fn roster_mut(&mut self, id: RosterId) -> Result<&mut ClassRoster, RegistryError> {
        self.rosters
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::RosterNotFound(id))
    }

    /// Member display names in insertion order, duplicates included.
    pub fn roster_members(&self, id: RosterId) -> Result<Vec<String>, RegistryError> {
        let roster = self.roster(id).ok_or(RegistryError::RosterNotFound(id))?;
        Ok(roster
            .members()
            .iter()
            .filter_map(|member| self.account(*member))
            .map(|a| a.name().to_string())
            .collect())
    }

    /// Only rosters managed by `instructor_id` are reachable.
    pub fn manage_roster(
        &mut self,
        instructor_id: IdentityId,
        roster_id: RosterId,
        action: RosterAction,
    ) -> Result<RosterOutcome, RegistryError> {
        if !self.instructor(instructor_id)?.manages(roster_id) {
            return Err(RegistryError::RosterNotFound(roster_id));
        }

        match action {
            RosterAction::Add(student_id) => {
                let name = self.student_name(student_id)?;
                self.roster_mut(roster_id)?.add_member(student_id);
                Ok(RosterOutcome::Confirmation(format!(
                    "Student {} added to roster {}.",
                    name, roster_id
                )))
            }
            RosterAction::Remove(student_id) => {
                let name = self.student_name(student_id)?;
                self.roster_mut(roster_id)?.remove_member(student_id);
                Ok(RosterOutcome::Confirmation(format!(
                    "Student {} removed from roster {}.",
                    name, roster_id
                )))
            }
            RosterAction::List => Ok(RosterOutcome::Members(self.roster_members(roster_id)?)),
        }
    }

    /// Owner of the first roster the student belongs to.
    pub fn instructor_for_student(&self, student_id: IdentityId) -> Option<IdentityId> {
        self.rosters
            .iter()
            .find(|r| r.contains(student_id))
            .map(|r| r.owner)
    }

    // ----- questions --------------------------------------------------------

    pub fn next_question_id(&self) -> QuestionId {
        QuestionId(self.questions.keys().next_back().map_or(1, |id| id.0 + 1))
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(&id)
    }

    /// Stores the question in the arena and appends it to the author's view.
    pub fn submit_question(&mut self, question: Question) -> Result<String, RegistryError> {
        if self.questions.contains_key(&question.id) {
            return Err(RegistryError::DuplicateQuestion(question.id));
        }
        let message = self.student_mut(question.author)?.submit_question(question.id);
        self.questions.insert(question.id, question);
        Ok(message)
    }

    pub fn forward_question_to_instructor(
        &mut self,
        question_id: QuestionId,
        instructor_id: IdentityId,
    ) -> Result<String, RegistryError> {
        if !self.questions.contains_key(&question_id) {
            return Err(RegistryError::QuestionNotFound(question_id));
        }
        let account = self
            .account_mut(instructor_id)
            .ok_or(RegistryError::InstructorNotFound(instructor_id))?;
        let name = account.name().to_string();
        account
            .as_instructor_mut()
            .ok_or(RegistryError::InstructorNotFound(instructor_id))?
            .receive(question_id);
        Ok(format!("Question forwarded to instructor {}.", name))
    }

    pub fn received_questions(&self, instructor_id: IdentityId) -> Result<Vec<&Question>, RegistryError> {
        let instructor = self.instructor(instructor_id)?;
        Ok(instructor
            .received()
            .iter()
            .filter_map(|id| self.questions.get(id))
            .collect())
    }

    pub fn submitted_questions(&self, student_id: IdentityId) -> Result<Vec<&Question>, RegistryError> {
        let student = self.student(student_id)?;
        Ok(student
            .questions()
            .iter()
            .filter_map(|id| self.questions.get(id))
            .collect())
    }

    /// First instructor whose received list holds the question.
    pub fn instructor_for_question(&self, question_id: QuestionId) -> Option<IdentityId> {
        self.accounts
            .iter()
            .find(|a| a.as_instructor().is_some_and(|p| p.has_received(question_id)))
            .map(Account::id)
    }

    pub fn answer_question(
        &mut self,
        instructor_id: IdentityId,
        question_id: QuestionId,
        answer: impl Into<String>,
    ) -> Result<String, RegistryError> {
        if !self.instructor(instructor_id)?.has_received(question_id) {
            return Err(RegistryError::QuestionNotFound(question_id));
        }
        let answer = answer.into();
        self.questions
            .get_mut(&question_id)
            .ok_or(RegistryError::QuestionNotFound(question_id))?
            .answer(answer.clone());
        Ok(format!("Answer sent: {}", answer))
    }

    /// Confirms the answer reached the student's view. The view shares the
    /// arena entry, so nothing is copied.
    pub fn forward_answer_to_student(
        &self,
        question_id: QuestionId,
        student_id: IdentityId,
    ) -> Result<String, RegistryError> {
        let account = self
            .account(student_id)
            .ok_or(RegistryError::StudentNotFound(student_id))?;
        let student = account
            .as_student()
            .ok_or(RegistryError::StudentNotFound(student_id))?;
        if !student.has_question(question_id) || !self.questions.contains_key(&question_id) {
            return Err(RegistryError::QuestionNotFound(question_id));
        }
        Ok(format!("Answer forwarded to student {}.", account.name()))
    }

    /// `Ok(None)` means the question exists but is still unanswered.
    pub fn answer_for(
        &self,
        student_id: IdentityId,
        question_id: QuestionId,
    ) -> Result<Option<&str>, RegistryError> {
        if !self.student(student_id)?.has_question(question_id) {
            return Err(RegistryError::QuestionNotFound(question_id));
        }
        let question = self
            .questions
            .get(&question_id)
            .ok_or(RegistryError::QuestionNotFound(question_id))?;
        Ok(question.answer.as_deref())
    }

    // ----- scripts ----------------------------------------------------------

    /// Script ids are unique across all students.
    pub fn next_script_id(&self) -> ScriptId {
        let last = self
            .accounts
            .iter()
            .filter_map(Account::as_student)
            .filter_map(StudentProfile::last_script_id)
            .max();
        ScriptId(last.map_or(1, |id| id.0 + 1))
    }

    pub fn submit_code(&mut self, student_id: IdentityId, code: impl Into<String>) -> Result<ScriptId, RegistryError> {
        let id = self.next_script_id();
        self.student_mut(student_id)?.submit_code(Script::new(id, code));
        Ok(id)
    }

    pub fn link_correction(
        &mut self,
        student_id: IdentityId,
        script_id: ScriptId,
        correction: Correction,
    ) -> Result<String, RegistryError> {
        self.student_mut(student_id)?
            .link_correction(script_id, correction)
            .ok_or(RegistryError::ScriptNotFound(script_id))
    }

    pub fn correction_status(
        &self,
        student_id: IdentityId,
        script_id: ScriptId,
    ) -> Result<CorrectionStatus<'_>, RegistryError> {
        Ok(self.student(student_id)?.correction(script_id))
    }
}

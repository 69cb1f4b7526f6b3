// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Class Roster
//!
//! A named group of students owned by one instructor. Members are referenced
//! by [`IdentityId`]; the same student may sit in several rosters, and in the
//! same roster more than once.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::identity::IdentityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RosterId(pub u64);

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRoster {
    pub id: RosterId,
    pub name: String,
    pub owner: IdentityId,
    members: Vec<IdentityId>,
}

impl ClassRoster {
    pub fn new(id: RosterId, name: impl Into<String>, owner: IdentityId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            members: Vec::new(),
        }
    }

    /// Appends without deduplication.
    pub fn add_member(&mut self, student: IdentityId) {
        self.members.push(student);
    }

    /// Drops every entry for `student`. No-op when absent.
    pub fn remove_member(&mut self, student: IdentityId) {
        self.members.retain(|id| *id != student);
    }

    pub fn members(&self) -> &[IdentityId] {
        &self.members
    }

    pub fn contains(&self, student: IdentityId) -> bool {
        self.members.contains(&student)
    }
}

/// Mutation or query requested through an instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterAction {
    Add(IdentityId),
    Remove(IdentityId),
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOutcome {
    Confirmation(String),
    Members(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let mut roster = ClassRoster::new(RosterId(1), "Intro", IdentityId(10));
        roster.add_member(IdentityId(1));
        roster.add_member(IdentityId(2));
        roster.add_member(IdentityId(1));

        assert_eq!(roster.members(), &[IdentityId(1), IdentityId(2), IdentityId(1)]);
    }

    #[test]
    fn test_remove_drops_all_entries_and_is_idempotent() {
        let mut roster = ClassRoster::new(RosterId(1), "Intro", IdentityId(10));
        roster.add_member(IdentityId(1));
        roster.add_member(IdentityId(2));
        roster.add_member(IdentityId(1));

        roster.remove_member(IdentityId(1));
        assert_eq!(roster.members(), &[IdentityId(2)]);

        roster.remove_member(IdentityId(7));
        assert_eq!(roster.members(), &[IdentityId(2)]);
        assert!(!roster.contains(IdentityId(1)));
    }
}

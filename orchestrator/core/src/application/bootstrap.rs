// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Registry bootstrap from the seed section of ServerConfig.

use tracing::info;

use crate::domain::identity::{Account, Identity, IdentityId, RoleKind};
use crate::domain::registry::{Registry, RegistryError};
use crate::domain::roster::{ClassRoster, RosterAction, RosterId};
use crate::domain::server_config::SeedConfig;

pub fn build_registry(seed: &SeedConfig) -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();

    for account in &seed.accounts {
        let identity = Identity::new(
            IdentityId(account.id),
            account.secret.as_str(),
            account.name.as_str(),
            account.email.as_str(),
        );
        let account = match account.role {
            RoleKind::Student => Account::student(identity),
            RoleKind::Instructor => Account::instructor(identity),
        };
        registry.register_identity(account)?;
    }

    for roster in &seed.rosters {
        let owner = IdentityId(roster.owner);
        let roster_id = RosterId(roster.id);
        registry.add_roster(ClassRoster::new(roster_id, roster.name.as_str(), owner))?;
        for member in &roster.members {
            registry.manage_roster(owner, roster_id, RosterAction::Add(IdentityId(*member)))?;
        }
    }

    info!(
        "Registry seeded with {} accounts and {} rosters",
        registry.accounts().len(),
        registry.rosters().len()
    );
    Ok(registry)
}

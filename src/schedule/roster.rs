use std::collections::HashMap;

use tracing::debug;

use super::names::NameBook;
use super::types::Role;
use crate::error::ScheduleError;

/// How each role's eligibility pool is built: everyone eligible for the
/// inherited role, then everyone listed under the extra categories.
pub const ROLE_TIERS: [(Role, Option<Role>, &[&str]); 4] = [
    (Role::Sound, None, &["all"]),
    (Role::Mics, Some(Role::Sound), &["mpa"]),
    (Role::Platform, Some(Role::Mics), &[]),
    (Role::Attendant, Some(Role::Platform), &["attendant"]),
];

/// Eligibility pools for every role plus the names behind them
#[derive(Debug, Clone)]
pub struct Roster {
    names: NameBook,
    pools: HashMap<Role, Vec<String>>,
}

impl Roster {
    /// Builds the roster from `(category, raw names)` rows. Categories not
    /// named in [`ROLE_TIERS`] still add their people to the name book.
    pub fn build(categories: &[(String, Vec<String>)]) -> Self {
        let mut names = NameBook::new();
        let mut by_category: HashMap<String, Vec<String>> = HashMap::new();

        for (category, raw_names) in categories {
            let keys = by_category.entry(category.trim().to_lowercase()).or_default();
            for raw in raw_names {
                if let Some(key) = names.insert(raw) {
                    keys.push(key);
                }
            }
        }

        let mut pools: HashMap<Role, Vec<String>> = HashMap::new();
        for (role, inherits, extra) in ROLE_TIERS {
            let mut pool = inherits
                .and_then(|parent| pools.get(&parent).cloned())
                .unwrap_or_default();
            for category in extra {
                for key in by_category.get(*category).into_iter().flatten() {
                    if !pool.contains(key) {
                        pool.push(key.clone());
                    }
                }
            }
            debug!(role = %role, size = pool.len(), "Built eligibility pool");
            pools.insert(role, pool);
        }

        Self { names, pools }
    }

    /// Eligibility pool for a role, in first-listed order
    pub fn pool(&self, role: Role) -> &[String] {
        self.pools.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self) -> &NameBook {
        &self.names
    }

    /// Fails on the first role that nobody can fill
    pub fn ensure_staffed(&self) -> Result<(), ScheduleError> {
        match Role::ALL.into_iter().find(|role| self.pool(*role).is_empty()) {
            Some(role) => Err(ScheduleError::EmptyRolePool(role)),
            None => Ok(()),
        }
    }
}

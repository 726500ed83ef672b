use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::exclusions::Exclusions;
use super::names::NameBook;
use super::roster::Roster;
use super::types::Role;

/// A person chosen for a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub key: String,
    pub name: String,
    /// True when fairness bookkeeping left nobody and the raw eligibility
    /// pool was used instead
    pub fallback: bool,
    /// True when the soft exclusions had to be ignored as well
    pub relaxed: bool,
}

/// Round-robin selection without replacement.
///
/// Two kinds of pool shrink as people are picked: a global one covering
/// everybody on duty and one per role. A pool refills to its full contents
/// once it runs dry, so nobody is picked twice for a role (or twice overall,
/// where the roles allow it) until everyone else has had a turn.
#[derive(Debug, Clone)]
pub struct FairPicker {
    names: NameBook,
    universe: Vec<String>,
    eligible: HashMap<Role, Vec<String>>,
    preferred: Vec<String>,
    preferred_for_role: HashMap<Role, Vec<String>>,
}

impl FairPicker {
    pub fn new(roster: &Roster) -> Self {
        // only people who can take some role, or the global pool never drains
        let mut universe: Vec<String> = Vec::new();
        for role in Role::ALL {
            for key in roster.pool(role) {
                if !universe.contains(key) {
                    universe.push(key.clone());
                }
            }
        }

        Self {
            names: roster.names().clone(),
            universe,
            eligible: Role::ALL
                .into_iter()
                .map(|role| (role, roster.pool(role).to_vec()))
                .collect(),
            preferred: Vec::new(),
            preferred_for_role: HashMap::new(),
        }
    }

    /// Picks someone for `role` who is not blocked by `exclude`.
    ///
    /// Candidates are the people still waiting for a turn both at this role
    /// and overall; if that is nobody, those still waiting at this role. If
    /// every candidate is blocked, `fallback_pool` is used with no regard to
    /// fairness. If that is blocked too, the soft exclusions are dropped and
    /// `fallback_pool` is tried once more. Returns `None` only when the hard
    /// exclusions cover the whole fallback pool.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        role: Role,
        fallback_pool: &[String],
        exclude: &Exclusions,
        rng: &mut R,
    ) -> Option<Pick> {
        if self.preferred.is_empty() {
            self.preferred = self.universe.clone();
        }
        let for_role = self.preferred_for_role.entry(role).or_default();
        if for_role.is_empty() {
            *for_role = self.eligible.get(&role).cloned().unwrap_or_default();
        }

        let mut source: Vec<&String> = for_role
            .iter()
            .filter(|key| self.preferred.contains(key))
            .collect();
        if source.is_empty() {
            source = for_role.iter().collect();
        }

        let mut valid: Vec<&String> = source.into_iter().filter(|key| !exclude.blocks(key)).collect();
        let fallback = valid.is_empty();
        if fallback {
            warn!(role = %role, excluded = exclude.len(), "Every preferred candidate excluded, using full pool");
            valid = fallback_pool.iter().filter(|key| !exclude.blocks(key)).collect();
        }
        let relaxed = valid.is_empty();
        if relaxed {
            warn!(
                role = %role,
                held_back = exclude.soft.len(),
                "Full pool excluded, ignoring recent-service rules"
            );
            valid = fallback_pool.iter().filter(|key| !exclude.blocks_hard(key)).collect();
        }

        let key = valid.choose(rng).map(|key| (*key).clone())?;
        debug!(role = %role, person = %key, candidates = valid.len(), fallback, relaxed, "Picked");

        self.preferred.retain(|k| *k != key);
        if let Some(pool) = self.preferred_for_role.get_mut(&role) {
            pool.retain(|k| *k != key);
        }

        Some(Pick {
            name: self.names.display(&key).to_string(),
            key,
            fallback,
            relaxed,
        })
    }

    /// People still waiting for a turn at `role` in the current cycle
    pub fn waiting_for(&self, role: Role) -> &[String] {
        self.preferred_for_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// People still waiting for any turn in the current cycle
    pub fn waiting(&self) -> &[String] {
        &self.preferred
    }
}

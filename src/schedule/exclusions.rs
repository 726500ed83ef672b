use std::collections::{HashMap, HashSet};

use chrono::Weekday;

use super::names::normalize;
use super::types::{MeetingDay, Role};

/// People with a meeting part, keyed by meeting date label
#[derive(Debug, Clone, Default)]
pub struct MeetingParts {
    by_label: HashMap<String, Vec<String>>,
}

impl MeetingParts {
    /// Builds the lookup from `(label, raw names)` rows, normalizing names
    /// and dropping blanks.
    pub fn from_rows(rows: &[(String, Vec<String>)]) -> Self {
        let mut by_label: HashMap<String, Vec<String>> = HashMap::new();
        for (label, names) in rows {
            let keys = by_label.entry(label.trim().to_string()).or_default();
            keys.extend(names.iter().map(|n| normalize(n)).filter(|k| !k.is_empty()));
        }
        Self { by_label }
    }

    pub fn on(&self, label: &str) -> &[String] {
        self.by_label.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_label.keys().map(String::as_str)
    }
}

/// One person who never serves on a given weekday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialDay {
    pub weekday: Weekday,
    /// Normalized key of the person held back
    pub holder: String,
}

/// Who served at the last two meetings
#[derive(Debug, Clone, Default)]
pub struct RollingState {
    last: HashSet<String>,
    before_last: HashSet<String>,
    last_roles: HashMap<Role, String>,
}

impl RollingState {
    /// Starts a run from the names that served at the most recent meeting
    /// before it. Their roles are unknown, so no role repeat is blocked.
    pub fn seeded<S: AsRef<str>>(prior_meeting: &[S]) -> Self {
        Self {
            last: prior_meeting
                .iter()
                .map(|n| normalize(n.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
            ..Self::default()
        }
    }

    /// Moves the previous meeting back one slot and records `picks`
    /// (role, key) as the most recent meeting.
    pub fn shift(&mut self, picks: &[(Role, String)]) {
        self.before_last = std::mem::take(&mut self.last);
        self.last = picks.iter().map(|(_, key)| key.clone()).collect();
        self.last_roles = picks.iter().cloned().collect();
    }

    /// Key of whoever held `role` at the previous meeting
    pub fn last_in_role(&self, role: Role) -> Option<&str> {
        self.last_roles.get(&role).map(String::as_str)
    }

    /// People who served at both of the last two meetings
    pub fn served_twice(&self) -> impl Iterator<Item = &String> {
        self.last.intersection(&self.before_last)
    }
}

/// People held back from a role.
///
/// `hard` entries never serve: they already hold a role this meeting, have
/// a meeting part, or are the special-day holder. `soft` entries come from
/// the rolling state and give way when nobody else is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub hard: HashSet<String>,
    pub soft: HashSet<String>,
}

impl Exclusions {
    /// True if `key` is held back for any reason
    pub fn blocks(&self, key: &str) -> bool {
        self.hard.contains(key) || self.soft.contains(key)
    }

    /// True if `key` can never serve here
    pub fn blocks_hard(&self, key: &str) -> bool {
        self.hard.contains(key)
    }

    pub fn len(&self) -> usize {
        self.hard.union(&self.soft).count()
    }

    pub fn is_empty(&self) -> bool {
        self.hard.is_empty() && self.soft.is_empty()
    }
}

/// People who cannot take any role at `meeting`
pub fn base_exclusions(
    meeting: &MeetingDay,
    rolling: &RollingState,
    parts: &MeetingParts,
    special_day: Option<&SpecialDay>,
) -> Exclusions {
    let mut hard: HashSet<String> = parts.on(&meeting.label).iter().cloned().collect();
    if let Some(special) = special_day {
        if special.weekday == meeting.weekday {
            hard.insert(special.holder.clone());
        }
    }
    Exclusions {
        hard,
        soft: rolling.served_twice().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meeting(label: &str, y: i32, m: u32, d: u32) -> MeetingDay {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        MeetingDay {
            date,
            label: label.to_string(),
            weekday: chrono::Datelike::weekday(&date),
            next_day: date.succ_opt().unwrap(),
        }
    }

    fn picks(keys: [&str; 4]) -> Vec<(Role, String)> {
        Role::ALL
            .into_iter()
            .zip(keys)
            .map(|(role, key)| (role, key.to_string()))
            .collect()
    }

    #[test]
    fn test_only_back_to_back_servers_excluded() {
        let mut rolling = RollingState::seeded(&["Ann", "Bob", "Cy", "Dee"]);
        rolling.shift(&picks(["eve", "bob", "fay", "dee"]));

        let exclude = base_exclusions(
            &meeting("9/10", 2020, 9, 10),
            &rolling,
            &MeetingParts::default(),
            None,
        );
        assert_eq!(exclude.soft, HashSet::from(["bob".to_string(), "dee".to_string()]));
        assert!(exclude.hard.is_empty());
        assert!(exclude.blocks("bob"));
        assert!(!exclude.blocks_hard("bob"));
    }

    #[test]
    fn test_seeded_state_excludes_nobody_yet() {
        let rolling = RollingState::seeded(&["Ann", "Bob"]);
        assert_eq!(rolling.served_twice().count(), 0);
        assert_eq!(rolling.last_in_role(Role::Sound), None);
    }

    #[test]
    fn test_meeting_parts_excluded_on_their_date() {
        let parts = MeetingParts::from_rows(&[(
            "9/6".to_string(),
            vec!["Gus Ho".to_string(), String::new()],
        )]);
        let rolling = RollingState::default();

        let on_day = base_exclusions(&meeting("9/6", 2020, 9, 6), &rolling, &parts, None);
        let other_day = base_exclusions(&meeting("9/10", 2020, 9, 10), &rolling, &parts, None);
        assert_eq!(on_day.hard, HashSet::from(["gusho".to_string()]));
        assert!(on_day.blocks_hard("gusho"));
        assert!(other_day.is_empty());
    }

    #[test]
    fn test_special_day_holder_excluded_on_weekday_only() {
        let special = SpecialDay {
            weekday: Weekday::Sun,
            holder: "stevenserrano".to_string(),
        };
        let rolling = RollingState::default();
        let parts = MeetingParts::default();

        let sunday = base_exclusions(&meeting("9/6", 2020, 9, 6), &rolling, &parts, Some(&special));
        let thursday = base_exclusions(&meeting("9/10", 2020, 9, 10), &rolling, &parts, Some(&special));
        assert!(sunday.blocks_hard("stevenserrano"));
        assert!(!thursday.blocks("stevenserrano"));
    }

    #[test]
    fn test_len_counts_each_person_once() {
        let exclude = Exclusions {
            hard: HashSet::from(["ann".to_string(), "bob".to_string()]),
            soft: HashSet::from(["bob".to_string(), "cy".to_string()]),
        };
        assert_eq!(exclude.len(), 3);
        assert!(!exclude.is_empty());
        assert!(Exclusions::default().is_empty());
    }

    #[test]
    fn test_shift_tracks_roles() {
        let mut rolling = RollingState::default();
        rolling.shift(&picks(["ann", "bob", "cy", "dee"]));
        assert_eq!(rolling.last_in_role(Role::Platform), Some("cy"));

        rolling.shift(&picks(["eve", "fay", "gus", "ann"]));
        assert_eq!(rolling.last_in_role(Role::Sound), Some("eve"));
        assert_eq!(rolling.served_twice().collect::<Vec<_>>(), [&"ann".to_string()]);
    }
}

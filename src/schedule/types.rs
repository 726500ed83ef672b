use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

/// A duty filled once per meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Sound,
    Mics,
    Platform,
    Attendant,
}

impl Role {
    /// Every role, in the order they are picked for a meeting.
    pub const ALL: [Role; 4] = [Role::Sound, Role::Mics, Role::Platform, Role::Attendant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sound => "sound",
            Role::Mics => "mics",
            Role::Platform => "platform",
            Role::Attendant => "attendant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// A qualifying meeting date found by the calendar walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDay {
    pub date: NaiveDate,
    /// Formatted label, e.g. "9/6". Meeting parts are keyed by this.
    pub label: String,
    pub weekday: Weekday,
    /// The day after the meeting, where the next search starts.
    pub next_day: NaiveDate,
}

impl MeetingDay {
    /// Lowercase weekday name, e.g. "sunday"
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string().to_lowercase()
    }
}

/// The people assigned to one meeting.
///
/// Field order matches the output columns: `date,sound,mics,platform,attendant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingAssignment {
    #[serde(skip)]
    pub meeting_date: NaiveDate,
    #[serde(rename = "date")]
    pub label: String,
    pub sound: String,
    pub mics: String,
    pub platform: String,
    pub attendant: String,
    /// Roles filled outside the rotation, including any picked with the
    /// recent-service rules relaxed
    #[serde(skip)]
    pub fallback_roles: Vec<Role>,
}

impl MeetingAssignment {
    /// Display name of the person holding `role`
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Sound => &self.sound,
            Role::Mics => &self.mics,
            Role::Platform => &self.platform,
            Role::Attendant => &self.attendant,
        }
    }

    /// Display names in role order
    pub fn people(&self) -> [&str; 4] {
        Role::ALL.map(|role| self.get(role))
    }

    pub fn used_fallback(&self, role: Role) -> bool {
        self.fallback_roles.contains(&role)
    }
}

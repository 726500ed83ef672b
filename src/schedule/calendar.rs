use chrono::{Datelike, NaiveDate, Weekday};

use super::types::MeetingDay;
use crate::error::ScheduleError;

/// Finds meeting dates on the configured weekdays
#[derive(Debug, Clone)]
pub struct Calendar {
    meeting_days: Vec<Weekday>,
    label_format: String,
}

impl Calendar {
    /// Fails when `meeting_days` is empty, since no date could ever match.
    pub fn new(meeting_days: Vec<Weekday>, label_format: impl Into<String>) -> Result<Self, ScheduleError> {
        if meeting_days.is_empty() {
            return Err(ScheduleError::NoMeetingDays);
        }
        Ok(Self {
            meeting_days,
            label_format: label_format.into(),
        })
    }

    /// First meeting date on or after `from`
    pub fn next_meeting(&self, from: NaiveDate) -> MeetingDay {
        // a match is always within seven days because meeting_days is non-empty
        let date = from
            .iter_days()
            .take(7)
            .find(|day| self.meeting_days.contains(&day.weekday()))
            .unwrap_or(from);

        MeetingDay {
            date,
            label: date.format(&self.label_format).to_string(),
            weekday: date.weekday(),
            next_day: date + chrono::Days::new(1),
        }
    }

    pub fn meeting_days(&self) -> &[Weekday] {
        &self.meeting_days
    }
}

/// Signed number of whole days from `current` to `target`
pub fn days_until(current: NaiveDate, target: NaiveDate) -> i64 {
    (target - current).num_days()
}

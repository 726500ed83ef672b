//! Run configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::ScheduleError;
use crate::schedule::{normalize, Calendar, SpecialDay};

/// Settings for one rota run.
///
/// Loaded from a JSON file; any field left out keeps its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RotaConfig {
    /// First day to consider, in `date_format`
    pub start_date: String,

    /// Day the rota runs up to, in `date_format`
    pub end_date: String,

    /// chrono format for `start_date` and `end_date`
    pub date_format: String,

    /// chrono format for meeting labels in the output and in the
    /// meeting-parts file
    pub label_format: String,

    /// Weekday names meetings fall on (e.g. "sunday", "thu")
    pub meeting_days: Vec<String>,

    /// Someone who never serves on one weekday
    pub special_day: Option<SpecialDayConfig>,

    pub roles_file: PathBuf,
    pub parts_file: PathBuf,
    pub last_meeting_file: PathBuf,
    pub output: PathBuf,

    /// Optional JSON copy of the schedule
    pub json_output: Option<PathBuf>,

    /// Seed for a reproducible rota; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecialDayConfig {
    pub weekday: String,
    pub holder: String,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            start_date: "09/04/20".to_string(),
            end_date: "10/01/20".to_string(),
            date_format: "%m/%d/%y".to_string(),
            label_format: "%-m/%-d".to_string(),
            meeting_days: vec!["sunday".to_string(), "thursday".to_string()],
            special_day: None,
            roles_file: PathBuf::from("files/roles.csv"),
            parts_file: PathBuf::from("files/meeting-parts.csv"),
            last_meeting_file: PathBuf::from("files/last-week.csv"),
            output: PathBuf::from("schedule.csv"),
            json_output: None,
            seed: None,
        }
    }
}

/// The date and calendar parts of a config, checked and parsed
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub calendar: Calendar,
    pub special_day: Option<SpecialDay>,
}

impl RotaConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parses dates and weekdays. Fails on an empty set of meeting days,
    /// an unparsable value, or an end date that is not after the start.
    pub fn resolve(&self) -> Result<RunPlan, ScheduleError> {
        let start = parse_date(&self.start_date, &self.date_format)?;
        let end = parse_date(&self.end_date, &self.date_format)?;
        if end <= start {
            return Err(ScheduleError::EmptyRange {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            });
        }

        let meeting_days = self
            .meeting_days
            .iter()
            .map(|day| parse_weekday(day))
            .collect::<Result<Vec<_>, _>>()?;
        let calendar = Calendar::new(meeting_days, self.label_format.clone())?;

        let special_day = match &self.special_day {
            Some(special) => Some(SpecialDay {
                weekday: parse_weekday(&special.weekday)?,
                holder: normalize(&special.holder),
            }),
            None => None,
        };

        Ok(RunPlan {
            start,
            end,
            calendar,
            special_day,
        })
    }
}

fn parse_date(value: &str, format: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| ScheduleError::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
    })
}

fn parse_weekday(value: &str) -> Result<Weekday, ScheduleError> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ScheduleError::UnknownWeekday(value.to_string()))
}

//! Volunteer duty rota generator.
//!
//! Assigns the sound, mics, platform and attendant roles across a range of
//! meeting dates. Everyone gets a turn at a role before anyone repeats it,
//! and people are held back when they served at both of the last two
//! meetings, held the same role last time, or have a meeting part that day.
//! The first two rules give way when nobody else is left for a role.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;
use tracing::{info, warn};

pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;

pub use config::{RotaConfig, RunPlan};
pub use error::ScheduleError;
pub use schedule::{build_schedule, MeetingAssignment, Role, Roster, RotaInputs};

use parser::{load_meeting_parts, load_prior_meeting, load_roles};
use schedule::MeetingParts;

/// Loads every input named by `config` and checks it is usable.
///
/// The roles file is required. A missing meeting-parts or last-meeting file
/// is treated as empty.
pub fn prepare(config: &RotaConfig) -> Result<(Roster, RotaInputs), ScheduleError> {
    let plan = config.resolve()?;

    let roster = Roster::build(&load_roles(&config.roles_file)?);
    info!(
        people = roster.names().len(),
        sound = roster.pool(Role::Sound).len(),
        mics = roster.pool(Role::Mics).len(),
        platform = roster.pool(Role::Platform).len(),
        attendant = roster.pool(Role::Attendant).len(),
        "Loaded roles"
    );
    roster.ensure_staffed()?;

    let parts = if optional_input(&config.parts_file) {
        MeetingParts::from_rows(&load_meeting_parts(&config.parts_file)?)
    } else {
        MeetingParts::default()
    };
    let prior_meeting = if optional_input(&config.last_meeting_file) {
        load_prior_meeting(&config.last_meeting_file)?
    } else {
        Vec::new()
    };

    let RunPlan {
        start,
        end,
        calendar,
        special_day,
    } = plan;
    Ok((
        roster,
        RotaInputs {
            start,
            end,
            calendar,
            parts,
            prior_meeting,
            special_day,
        },
    ))
}

/// Loads the inputs and builds the full schedule
pub fn generate<R: Rng + ?Sized>(config: &RotaConfig, rng: &mut R) -> Result<Vec<MeetingAssignment>, ScheduleError> {
    let (roster, inputs) = prepare(config)?;
    let schedule = build_schedule(&roster, &inputs, rng)?;

    let labels: HashSet<&str> = schedule.iter().map(|m| m.label.as_str()).collect();
    for label in inputs.parts.labels().filter(|l| !labels.contains(l)) {
        warn!(date = %label, "Meeting parts listed for a date with no scheduled meeting");
    }
    let forced = schedule.iter().map(|m| m.fallback_roles.len()).sum::<usize>();
    if forced > 0 {
        warn!(picks = forced, "Some roles were filled outside the rotation");
    }

    Ok(schedule)
}

fn optional_input(path: &Path) -> bool {
    let exists = path.exists();
    if !exists {
        warn!(path = %path.display(), "Input file not found, treating as empty");
    }
    exists
}

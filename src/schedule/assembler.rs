use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

use super::calendar::{days_until, Calendar};
use super::exclusions::{base_exclusions, MeetingParts, RollingState, SpecialDay};
use super::picker::FairPicker;
use super::roster::Roster;
use super::types::{MeetingAssignment, Role};
use crate::error::ScheduleError;

/// Everything a run needs besides the roster
#[derive(Debug, Clone)]
pub struct RotaInputs {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub calendar: Calendar,
    pub parts: MeetingParts,
    /// Names that served at the last meeting before `start`
    pub prior_meeting: Vec<String>,
    pub special_day: Option<SpecialDay>,
}

/// Walks the date range and fills every role for every meeting.
///
/// Owns the fairness pools and the rolling exclusion state for one run.
pub struct Assembler<'a> {
    roster: &'a Roster,
    inputs: &'a RotaInputs,
    picker: FairPicker,
    rolling: RollingState,
}

impl<'a> Assembler<'a> {
    /// Fails if any role has an empty eligibility pool.
    pub fn new(roster: &'a Roster, inputs: &'a RotaInputs) -> Result<Self, ScheduleError> {
        roster.ensure_staffed()?;
        Ok(Self {
            roster,
            inputs,
            picker: FairPicker::new(roster),
            rolling: RollingState::seeded(&inputs.prior_meeting),
        })
    }

    /// Builds the whole schedule, oldest meeting first.
    ///
    /// A meeting is dropped when its following day is within a day of
    /// `end`. With Sunday and Thursday meetings starting Friday 2020-09-04,
    /// an end of Friday 2020-09-25 gives five meetings: Thursday 9/24 is
    /// followed by 9/25, zero days before the end, so it is dropped. Ending
    /// on Sunday 2020-09-27 keeps 9/24 and gives six.
    ///
    /// People with a meeting part, the special-day holder and anyone already
    /// on duty at the same meeting are never picked. Serving at both of the
    /// last two meetings, or holding the same role last time, only holds
    /// someone back while somebody else can take the role.
    pub fn build<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<Vec<MeetingAssignment>, ScheduleError> {
        let mut schedule = Vec::new();
        let mut cursor = self.inputs.start;

        while days_until(cursor, self.inputs.end) > 0 {
            let meeting = self.inputs.calendar.next_meeting(cursor);
            if days_until(meeting.next_day, self.inputs.end) <= 1 {
                debug!(date = %meeting.label, "Skipping trailing meeting");
                cursor = meeting.next_day;
                continue;
            }

            let exclude = base_exclusions(
                &meeting,
                &self.rolling,
                &self.inputs.parts,
                self.inputs.special_day.as_ref(),
            );
            debug!(date = %meeting.label, day = %meeting.day_name(), excluded = exclude.len(), "Filling meeting");

            let mut picks: Vec<(Role, String)> = Vec::with_capacity(Role::ALL.len());
            let mut names: [String; 4] = Default::default();
            let mut fallback_roles = Vec::new();

            for (slot, role) in Role::ALL.into_iter().enumerate() {
                let mut role_exclude = exclude.clone();
                role_exclude.hard.extend(picks.iter().map(|(_, key)| key.clone()));
                if let Some(previous) = self.rolling.last_in_role(role) {
                    role_exclude.soft.insert(previous.to_string());
                }

                let pick = self
                    .picker
                    .pick(role, self.roster.pool(role), &role_exclude, rng)
                    .ok_or_else(|| ScheduleError::NoEligibleCandidate {
                        role,
                        label: meeting.label.clone(),
                    })?;

                if pick.relaxed {
                    warn!(date = %meeting.label, role = %role, person = %pick.name, "Recent-service rules relaxed");
                }
                if pick.fallback {
                    fallback_roles.push(role);
                }
                picks.push((role, pick.key));
                names[slot] = pick.name;
            }

            self.rolling.shift(&picks);

            let [sound, mics, platform, attendant] = names;
            schedule.push(MeetingAssignment {
                meeting_date: meeting.date,
                label: meeting.label,
                sound,
                mics,
                platform,
                attendant,
                fallback_roles,
            });

            cursor = meeting.next_day;
        }

        info!(meetings = schedule.len(), "Schedule built");
        Ok(schedule)
    }
}

/// Builds a schedule for `roster` over the range in `inputs`
pub fn build_schedule<R: Rng + ?Sized>(
    roster: &Roster,
    inputs: &RotaInputs,
    rng: &mut R,
) -> Result<Vec<MeetingAssignment>, ScheduleError> {
    Assembler::new(roster, inputs)?.build(rng)
}

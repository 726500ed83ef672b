use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ScheduleError;
use crate::schedule::{MeetingAssignment, Role};

/// Output column names, in order
pub const HEADERS: [&str; 5] = ["date", "sound", "mics", "platform", "attendant"];

/// Writes the schedule as CSV to any writer. The header row is always
/// written, even for an empty schedule.
pub fn write_schedule_csv<W: Write>(schedule: &[MeetingAssignment], writer: W) -> Result<(), ScheduleError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADERS)?;
    for meeting in schedule {
        wtr.serialize(meeting)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the schedule to a CSV file, replacing it if present
pub fn write_schedule_to_file<P: AsRef<Path>>(schedule: &[MeetingAssignment], path: P) -> Result<(), ScheduleError> {
    write_schedule_csv(schedule, File::create(path)?)
}

/// Writes the schedule as a JSON array of `{date, sound, mics, platform, attendant}`
pub fn write_schedule_json<P: AsRef<Path>>(schedule: &[MeetingAssignment], path: P) -> Result<(), ScheduleError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, schedule)?;
    writer.flush()?;
    Ok(())
}

/// How many times each person holds each role, in `Role::ALL` order
pub fn duty_counts(schedule: &[MeetingAssignment]) -> BTreeMap<String, [usize; 4]> {
    let mut counts: BTreeMap<String, [usize; 4]> = BTreeMap::new();
    for meeting in schedule {
        for (slot, name) in meeting.people().into_iter().enumerate() {
            counts.entry(name.to_string()).or_insert([0; 4])[slot] += 1;
        }
    }
    counts
}

/// Prints the schedule as a table
pub fn print_rota(schedule: &[MeetingAssignment]) {
    println!("\n=== Rota ===");
    println!("Total meetings scheduled: {}", schedule.len());

    println!("\n{:<8} {:<20} {:<20} {:<20} {:<20}", HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4]);
    for meeting in schedule {
        println!(
            "{:<8} {:<20} {:<20} {:<20} {:<20}",
            meeting.label, meeting.sound, meeting.mics, meeting.platform, meeting.attendant
        );
    }

    let forced: Vec<String> = schedule
        .iter()
        .flat_map(|m| m.fallback_roles.iter().map(move |role| format!("{} {}", m.label, role)))
        .collect();
    if !forced.is_empty() {
        println!("\n⚠️  Filled without regard to rotation ({}):", forced.len());
        for entry in &forced {
            println!("  - {}", entry);
        }
    }
}

/// Prints how many duties each person got, by role
pub fn print_duty_counts(schedule: &[MeetingAssignment]) {
    println!("\n=== Duties per person ===");
    println!("{:<24} {:>6} {:>6} {:>9} {:>10} {:>6}", "name", Role::Sound, Role::Mics, Role::Platform, Role::Attendant, "total");
    for (name, counts) in duty_counts(schedule) {
        let total: usize = counts.iter().sum();
        println!(
            "{:<24} {:>6} {:>6} {:>9} {:>10} {:>6}",
            name, counts[0], counts[1], counts[2], counts[3], total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meeting(label: &str, day: u32, people: [&str; 4]) -> MeetingAssignment {
        MeetingAssignment {
            meeting_date: NaiveDate::from_ymd_opt(2020, 9, day).unwrap(),
            label: label.to_string(),
            sound: people[0].to_string(),
            mics: people[1].to_string(),
            platform: people[2].to_string(),
            attendant: people[3].to_string(),
            fallback_roles: vec![Role::Mics],
        }
    }

    #[test]
    fn test_csv_layout() {
        let schedule = vec![
            meeting("9/6", 6, ["Ann", "Bob", "Cy", "Dee"]),
            meeting("9/10", 10, ["Eve", "Fay", "Ann Lee", "Bob"]),
        ];
        let mut out = Vec::new();
        write_schedule_csv(&schedule, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,sound,mics,platform,attendant\n9/6,Ann,Bob,Cy,Dee\n9/10,Eve,Fay,Ann Lee,Bob\n"
        );
    }

    #[test]
    fn test_empty_schedule_still_has_header() {
        let mut out = Vec::new();
        write_schedule_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "date,sound,mics,platform,attendant\n");
    }

    #[test]
    fn test_json_uses_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        write_schedule_json(&[meeting("9/6", 6, ["Ann", "Bob", "Cy", "Dee"])], &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["date"], "9/6");
        assert_eq!(value[0]["attendant"], "Dee");
        assert!(value[0].get("fallback_roles").is_none());
    }

    #[test]
    fn test_duty_counts_by_role() {
        let schedule = vec![
            meeting("9/6", 6, ["Ann", "Bob", "Cy", "Dee"]),
            meeting("9/10", 10, ["Bob", "Ann", "Eve", "Dee"]),
        ];
        let counts = duty_counts(&schedule);

        assert_eq!(counts["Ann"], [1, 1, 0, 0]);
        assert_eq!(counts["Dee"], [0, 0, 0, 2]);
        assert_eq!(counts.len(), 5);
    }
}

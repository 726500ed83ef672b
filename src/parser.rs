use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

use crate::error::ScheduleError;

/// A keyed row: the first cell, then the non-blank names after it
pub type NamedRow = (String, Vec<String>);

/// Splits a record into its key and the names that follow it.
/// Returns None for rows with a blank key.
fn keyed_row(record: &StringRecord) -> Option<NamedRow> {
    let mut cells = record.iter().map(str::trim);
    let key = cells.next().filter(|k| !k.is_empty())?;
    let names = cells
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Some((key.to_string(), names))
}

/// Reads a file of keyed rows. The first line is a header and is skipped;
/// rows may have any number of cells.
fn load_keyed_rows<P: AsRef<Path>>(path: P) -> Result<Vec<NamedRow>, ScheduleError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(row) = keyed_row(&record) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Loads the roles file: one row per category ("all", "mpa", "attendant",
/// ...) followed by the people in it
pub fn load_roles<P: AsRef<Path>>(path: P) -> Result<Vec<NamedRow>, ScheduleError> {
    load_keyed_rows(path)
}

/// Loads the meeting-parts file: one row per date label followed by the
/// people with a part that day
pub fn load_meeting_parts<P: AsRef<Path>>(path: P) -> Result<Vec<NamedRow>, ScheduleError> {
    load_keyed_rows(path)
}

/// Loads the names from the `name` column of the last-meeting file
pub fn load_prior_meeting<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ScheduleError> {
    let file = path.as_ref().display().to_string();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = reader.headers()?;
    let name_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("name"))
        .ok_or(ScheduleError::MissingColumn { column: "name", file })?;

    let mut names = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = record.get(name_col).unwrap_or("").trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_roles_skip_header_and_blanks() {
        let file = csv_file("type,1,2,3\nall,Ann Lee,Bob,\nmpa, Cy ,,\n,Orphan\nattendant\n");
        let rows = load_roles(file.path()).unwrap();

        assert_eq!(
            rows,
            vec![
                ("all".to_string(), vec!["Ann Lee".to_string(), "Bob".to_string()]),
                ("mpa".to_string(), vec!["Cy".to_string()]),
                ("attendant".to_string(), Vec::new()),
            ]
        );
    }

    #[test]
    fn test_meeting_parts_rows_vary_in_length() {
        let file = csv_file("date,a,b,c\n9/6,Ann\n9/10,Bob,Cy,Dee\n");
        let rows = load_meeting_parts(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].0, "9/10");
        assert_eq!(rows[1].1, ["Bob", "Cy", "Dee"]);
    }

    #[test]
    fn test_prior_meeting_reads_name_column() {
        let file = csv_file("role,Name\nsound,Ann\nmics,\nplatform,Bob\n");
        let names = load_prior_meeting(file.path()).unwrap();
        assert_eq!(names, ["Ann", "Bob"]);
    }

    #[test]
    fn test_prior_meeting_without_name_column() {
        let file = csv_file("role,person\nsound,Ann\n");
        assert!(matches!(
            load_prior_meeting(file.path()),
            Err(ScheduleError::MissingColumn { column: "name", .. })
        ));
    }
}

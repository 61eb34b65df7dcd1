//! Snapshot storage for tracked records
//!
//! Records live in a per-student data directory:
//! - `experiences.csv`: `category,date,hours,location,notes`
//! - `courses.csv`: `name,code,credits,grade,semester,year,is_science`
//! - `goals.toml`: `"Category Name" = hours`
//!
//! Loading is lenient: rows that cannot be decoded or typed (invalid UTF-8,
//! unknown category, bad date) are skipped with a warning, and unparseable
//! numbers become zero so the aggregators exclude them. Writes go through a
//! temporary file that replaces the original in one rename, so a batch is
//! either fully saved or not at all. Appended rows follow the column order of
//! the existing header.

use crate::core::models::{Category, CourseRecord, ExperienceRecord, GoalMap};
use crate::core::recurrence::{parse_date, DATE_FORMAT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Experience snapshot file name
pub const EXPERIENCES_FILE: &str = "experiences.csv";
/// Course snapshot file name
pub const COURSES_FILE: &str = "courses.csv";
/// Goal file name
pub const GOALS_FILE: &str = "goals.toml";

/// Columns of the experience snapshot, in the order used for new files
pub const EXPERIENCE_COLUMNS: [&str; 5] = ["category", "date", "hours", "location", "notes"];

/// Errors raised while reading or writing snapshots
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed CSV structure (not a malformed value)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Goals file could not be parsed
    #[error("invalid goals file: {0}")]
    GoalsParse(#[from] toml::de::Error),
    /// Goals could not be serialized
    #[error("failed to serialize goals: {0}")]
    GoalsSerialize(#[from] toml::ser::Error),
    /// The temporary file could not replace the snapshot
    #[error("failed to replace snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
    /// The existing experience header cannot hold every field of a new row
    #[error("experiences.csv header has no '{0}' column")]
    MissingColumn(String),
}

/// Source of record snapshots and sink for batch writes
pub trait RecordStore {
    /// Load every experience record
    ///
    /// # Errors
    /// Returns an error if the snapshot exists but cannot be read
    fn experiences(&self) -> Result<Vec<ExperienceRecord>, StoreError>;

    /// Load every course record
    ///
    /// # Errors
    /// Returns an error if the snapshot exists but cannot be read
    fn courses(&self) -> Result<Vec<CourseRecord>, StoreError>;

    /// Load the goal map (empty when none is saved)
    ///
    /// # Errors
    /// Returns an error if the goals file exists but cannot be parsed
    fn goals(&self) -> Result<GoalMap, StoreError>;

    /// Append a batch of experience records atomically
    ///
    /// # Errors
    /// Returns an error if the batch could not be written; in that case no
    /// record of the batch is saved
    fn append_experiences(&self, records: &[ExperienceRecord]) -> Result<usize, StoreError>;

    /// Replace the goal map
    ///
    /// # Errors
    /// Returns an error if the goals file could not be written
    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Deserialize)]
struct ExperienceRow {
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    hours: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    notes: String,
}

impl ExperienceRow {
    fn from_record(record: &ExperienceRecord) -> Self {
        Self {
            category: record.category.name().to_string(),
            date: record.date.format(DATE_FORMAT).to_string(),
            hours: record.hours.to_string(),
            location: record.location.clone(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Value for a header column; `None` for columns this row does not know
    fn field(&self, column: &str) -> Option<&str> {
        match column {
            "category" => Some(&self.category),
            "date" => Some(&self.date),
            "hours" => Some(&self.hours),
            "location" => Some(&self.location),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }

    fn into_record(self, line: usize) -> Option<ExperienceRecord> {
        let category = match self.category.parse::<Category>() {
            Ok(c) => c,
            Err(e) => {
                crate::warn!("{EXPERIENCES_FILE} row {line}: {e}; row skipped");
                return None;
            }
        };
        let date = match parse_date(&self.date) {
            Ok(d) => d,
            Err(e) => {
                crate::warn!("{EXPERIENCES_FILE} row {line}: {e}; row skipped");
                return None;
            }
        };
        let notes = Some(self.notes).filter(|n| !n.trim().is_empty());

        Some(ExperienceRecord {
            category,
            date,
            hours: lenient_number(&self.hours),
            location: self.location,
            notes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct CourseRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    credits: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    is_science: String,
}

impl CourseRow {
    fn into_record(self) -> CourseRecord {
        CourseRecord {
            name: self.name,
            code: self.code,
            credits: lenient_number(&self.credits),
            grade: self.grade.trim().to_string(),
            semester: self.semester.trim().to_string(),
            year: self.year.trim().parse().unwrap_or(0),
            is_science: matches!(
                self.is_science.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "x"
            ),
        }
    }
}

/// Parse a number, treating anything unparseable as zero
fn lenient_number(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).flexible(true);
    builder
}

fn csv_reader(path: &Path) -> Result<csv::Reader<File>, StoreError> {
    Ok(reader_builder().from_path(path)?)
}

/// Decode every data row of a snapshot with its line number
///
/// Rows that fail to decode are skipped with a warning. Only I/O failures
/// abort the load.
fn read_rows<T: DeserializeOwned>(
    path: &Path,
    file_name: &str,
) -> Result<Vec<(usize, T)>, StoreError> {
    let mut rows = Vec::new();
    for (idx, row) in csv_reader(path)?.deserialize::<T>().enumerate() {
        // Header is line 1
        let line = idx + 2;
        match row {
            Ok(row) => rows.push((line, row)),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => crate::warn!("{file_name} row {line}: {e}; row skipped"),
        }
    }
    Ok(rows)
}

/// Column names of an existing snapshot's header row
fn header_columns(contents: &[u8]) -> Result<Vec<String>, StoreError> {
    let mut reader = reader_builder().from_reader(contents);
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// Snapshot store backed by CSV and TOML files in one directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    /// Create a store rooted at `root` (the directory is created on first write)
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a snapshot file
    #[must_use]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Fill a temporary file next to `target`, then rename it over `target`
    fn replace_atomically(
        &self,
        target: &Path,
        fill: impl FnOnce(&mut NamedTempFile) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        fill(&mut tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(target)?;
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn experiences(&self) -> Result<Vec<ExperienceRecord>, StoreError> {
        let path = self.path(EXPERIENCES_FILE);
        if !path.exists() {
            crate::debug!("No experience snapshot at {}", path.display());
            return Ok(Vec::new());
        }

        let records: Vec<ExperienceRecord> = read_rows::<ExperienceRow>(&path, EXPERIENCES_FILE)?
            .into_iter()
            .filter_map(|(line, row)| row.into_record(line))
            .collect();
        crate::debug!("Loaded {} experience record(s)", records.len());
        Ok(records)
    }

    fn courses(&self) -> Result<Vec<CourseRecord>, StoreError> {
        let path = self.path(COURSES_FILE);
        if !path.exists() {
            crate::debug!("No course snapshot at {}", path.display());
            return Ok(Vec::new());
        }

        let records: Vec<CourseRecord> = read_rows::<CourseRow>(&path, COURSES_FILE)?
            .into_iter()
            .map(|(_, row)| row.into_record())
            .collect();
        crate::debug!("Loaded {} course record(s)", records.len());
        Ok(records)
    }

    fn goals(&self) -> Result<GoalMap, StoreError> {
        let path = self.path(GOALS_FILE);
        if !path.exists() {
            return Ok(GoalMap::new());
        }

        let raw: BTreeMap<String, toml::Value> = toml::from_str(&fs::read_to_string(&path)?)?;
        let mut goals = GoalMap::new();
        for (name, value) in raw {
            let Ok(category) = name.parse::<Category>() else {
                crate::warn!("{GOALS_FILE}: unknown category '{name}' ignored");
                continue;
            };
            match value.as_integer().and_then(|h| u32::try_from(h).ok()) {
                Some(h) => goals.set(category, h),
                None => crate::warn!(
                    "{GOALS_FILE}: goal for '{name}' is not a whole number of hours ({value}); ignored"
                ),
            }
        }
        Ok(goals)
    }

    fn append_experiences(&self, records: &[ExperienceRecord]) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let target = self.path(EXPERIENCES_FILE);
        let existing = if target.exists() {
            fs::read(&target)?
        } else {
            Vec::new()
        };

        let has_header = !existing.iter().all(u8::is_ascii_whitespace);
        let columns = if has_header {
            header_columns(&existing)?
        } else {
            EXPERIENCE_COLUMNS.map(String::from).to_vec()
        };
        if let Some(missing) = EXPERIENCE_COLUMNS
            .into_iter()
            .find(|name| !columns.iter().any(|c| c == name))
        {
            return Err(StoreError::MissingColumn(missing.to_string()));
        }

        self.replace_atomically(&target, |tmp| {
            if has_header {
                tmp.write_all(&existing)?;
                if !existing.ends_with(b"\n") {
                    tmp.write_all(b"\n")?;
                }
            }
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            if !has_header {
                writer.write_record(&columns)?;
            }
            for record in records {
                let row = ExperienceRow::from_record(record);
                writer.write_record(columns.iter().map(|c| row.field(c).unwrap_or_default()))?;
            }
            writer.flush()?;
            Ok(())
        })?;

        crate::info!(
            "Saved {} experience record(s) to {}",
            records.len(),
            target.display()
        );
        Ok(records.len())
    }

    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError> {
        let raw: BTreeMap<&str, u32> = goals.iter().map(|(c, h)| (c.name(), h)).collect();
        let contents = toml::to_string_pretty(&raw)?;
        let target = self.path(GOALS_FILE);
        self.replace_atomically(&target, |tmp| {
            tmp.write_all(contents.as_bytes())?;
            Ok(())
        })
    }
}

//! Garmin activity file ingestion.
//!
//! Garmin Connect subscribers can export their activity history as a CSV
//! file. Each record becomes one typed [`Activity`], classified by a
//! substring of the `Activity Type` column, and is added to the athlete
//! with first-write-wins semantics. A malformed record aborts the whole
//! call; records already added stay added.

pub mod csv;

use std::path::Path;
use thiserror::Error;

use crate::activity::{
    Activity, ActivityAttributes, ActivityDetails, ActivityError, ActivityKind, CycleDetails,
    FootDetails, TennisDetails, WorkoutDetails,
};
use crate::athlete::Athlete;
use crate::parse::{self, ParseFieldError};
use csv::{CsvError, CsvRow, CsvTable};

/// Garmin includes the registered sign in the normalized power column name;
/// the match must be verbatim.
const NORMALIZED_POWER_COLUMN: &str = "Normalized Power® (NP®)";

/// Errors from Garmin file ingestion.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Activity file could not be read
    #[error("cannot read activity file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File structure was not parseable
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// A column the importer depends on is missing
    #[error("activity file is missing column {0:?}")]
    MissingColumn(&'static str),

    /// A record field failed its typed conversion
    #[error("record {record}: {source}")]
    Field {
        record: usize,
        #[source]
        source: ParseFieldError,
    },

    /// A record produced an invalid activity
    #[error("record {record}: {source}")]
    Activity {
        record: usize,
        #[source]
        source: ActivityError,
    },
}

/// Read a Garmin activity export and add its sessions to the athlete.
/// Returns the number of records processed.
pub fn read_activity_file(athlete: &mut Athlete, path: &Path) -> Result<usize, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let added = import_rows(athlete, &content)?;
    tracing::info!(path = %path.display(), records = added, "imported activity file");
    Ok(added)
}

/// Ingest CSV content. Split from [`read_activity_file`] so tests can feed
/// content directly.
pub fn import_rows(athlete: &mut Athlete, content: &str) -> Result<usize, ImportError> {
    let table = CsvTable::parse(content)?;

    let mut processed = 0;
    for (index, row) in table.rows().enumerate() {
        // Records are numbered from 1 for error messages.
        let activity = build_activity(row, index + 1)?;
        athlete.add_activity(activity);
        processed += 1;
    }

    Ok(processed)
}

/// Map a classification tag to an activity kind by substring containment.
fn classify(tag: &str) -> ActivityKind {
    if tag.contains("Cycling") {
        ActivityKind::Cycle
    } else if tag.contains("Gym") {
        ActivityKind::Workout
    } else if tag.contains("Running") {
        ActivityKind::Run
    } else if tag.contains("Tennis") {
        ActivityKind::Tennis
    } else if tag.contains("Walking") {
        ActivityKind::Walk
    } else {
        ActivityKind::Generic
    }
}

/// Build one activity from a record.
fn build_activity(row: CsvRow<'_>, record: usize) -> Result<Activity, ImportError> {
    let field = |column: &'static str| -> Result<&str, ImportError> {
        row.get(column).ok_or(ImportError::MissingColumn(column))
    };
    let in_record = |source: ParseFieldError| ImportError::Field { record, source };

    let tag = field("Activity Type")?;
    let kind = classify(tag);

    let start = parse::parse_timestamp(field("Date")?).map_err(in_record)?;

    // Garmin sometimes appends fractional seconds to the duration; only the
    // leading H:MM:SS portion matters.
    let time_field: String = field("Time")?.chars().take(8).collect();
    let duration = parse::hms_duration(&time_field).map_err(in_record)?;

    let attributes = ActivityAttributes {
        description: Some(field("Title")?.to_string()),
        calories: parse::field_to_u32(field("Calories")?).map_err(in_record)?,
        maximum_heart_rate: parse::field_to_u32(field("Max HR")?).map_err(in_record)?,
        average_heart_rate: parse::field_to_u32(field("Avg HR")?).map_err(in_record)?,
        source_activity_type: Some(tag.to_string()),
        ..Default::default()
    };

    // Distance and speed columns are only meaningful for the distance
    // kinds, and Garmin records cycling speed in mph but running and
    // walking speed as minutes:seconds pace.
    let details = match kind {
        ActivityKind::Cycle => ActivityDetails::Cycle(CycleDetails {
            distance_miles: parse::field_to_f64(field("Distance")?).map_err(in_record)?,
            maximum_speed_mph: parse::field_to_f64(field("Max Speed")?).map_err(in_record)?,
            average_speed_mph: parse::field_to_f64(field("Avg Speed")?).map_err(in_record)?,
            normalized_power: parse::field_to_u32(field(NORMALIZED_POWER_COLUMN)?)
                .map_err(in_record)?,
            cycle_type: None,
        }),
        ActivityKind::Run | ActivityKind::Walk => {
            let foot = FootDetails {
                distance_miles: parse::field_to_f64(field("Distance")?).map_err(in_record)?,
                maximum_pace: parse::field_to_pace(field("Max Speed")?).map_err(in_record)?,
                average_pace: parse::field_to_pace(field("Avg Speed")?).map_err(in_record)?,
                surface: None,
            };
            if kind == ActivityKind::Run {
                ActivityDetails::Run(foot)
            } else {
                ActivityDetails::Walk(foot)
            }
        }
        ActivityKind::Tennis => ActivityDetails::Tennis(TennisDetails::default()),
        ActivityKind::Workout => ActivityDetails::Workout(WorkoutDetails::default()),
        ActivityKind::Generic => ActivityDetails::Generic,
    };

    Activity::new(start, duration, attributes, details)
        .map_err(|source| ImportError::Activity { record, source })
}

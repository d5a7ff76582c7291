//! Integration tests for Garmin activity file ingestion.

use fitlog::activity::{ActivityDetails, ActivityKind};
use fitlog::garmin::{self, ImportError};
use fitlog::Athlete;
use std::io::Write;

const HEADER: &str = "Activity Type,Date,Title,Distance,Calories,Time,\
                      Avg HR,Max HR,Avg Speed,Max Speed,Normalized Power® (NP®)";

fn export(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

#[test]
fn imports_each_kind_from_classification_tag() {
    let content = export(&[
        "Road Cycling,2021-05-01 06:45:00,Morning Ride,18.21,612,1:02:03,140,165,15.3,31.5,185",
        "Running,2021-05-02 07:00:00,Running,3.11,310,0:28:30,150,172,08:52,07:41,--",
        "Tennis,2021-05-03 09:00:00,League match,--,450,1:30:00,130,155,--,--,--",
        "Casual Walking,2021-05-04 12:00:00,Lunch walk,1.05,80,0:21:00,95,110,19:30,17:12,--",
        "Gym & Fitness Equipment,2021-05-05 17:00:00,Strength,--,200,0:45:00,105,130,--,--,--",
        "Yoga,2021-05-06 08:00:00,Flow,--,120,0:50:00,90,101,--,--,--",
    ]);

    let mut athlete = Athlete::new();
    let count = garmin::import_rows(&mut athlete, &content).unwrap();

    assert_eq!(count, 6);
    assert_eq!(athlete.activity_count(), 6);
    for kind in [
        ActivityKind::Cycle,
        ActivityKind::Run,
        ActivityKind::Tennis,
        ActivityKind::Walk,
        ActivityKind::Workout,
        ActivityKind::Generic,
    ] {
        assert_eq!(athlete.get_activities(Some(kind)).len(), 1, "{}", kind);
    }
}

#[test]
fn cycle_fields_parse_with_speed_and_power() {
    let content = export(&[
        "Indoor Cycling,2021-05-01 06:45:00,Trainer intervals,\"1,023.55\",\"1,204\",01:02:03.4,140,165,15.3,31.5,185",
    ]);

    let mut athlete = Athlete::new();
    garmin::import_rows(&mut athlete, &content).unwrap();

    let activity = athlete.get_activities(Some(ActivityKind::Cycle))[0];
    assert_eq!(activity.calories(), Some(1204));
    assert_eq!(activity.distance_miles(), Some(1023.55));
    assert_eq!(activity.source_activity_type(), Some("Indoor Cycling"));
    // Fractional seconds on the duration are truncated.
    assert_eq!(activity.duration().as_secs(), 3723);

    match activity.details() {
        ActivityDetails::Cycle(cycle) => {
            assert_eq!(cycle.maximum_speed_mph, Some(31.5));
            assert_eq!(cycle.average_speed_mph, Some(15.3));
            assert_eq!(cycle.normalized_power, Some(185));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

#[test]
fn run_speeds_parse_as_pace() {
    let content = export(&[
        "Treadmill Running,2021-05-02 07:00:00,Tempo,3.11,310,0:28:30,150,172,08:52,07:41,--",
    ]);

    let mut athlete = Athlete::new();
    garmin::import_rows(&mut athlete, &content).unwrap();

    let activity = athlete.get_activities(Some(ActivityKind::Run))[0];
    match activity.details() {
        ActivityDetails::Run(foot) => {
            assert_eq!(foot.average_pace.map(|p| p.to_string()), Some("08:52".into()));
            assert_eq!(foot.maximum_pace.map(|p| p.to_string()), Some("07:41".into()));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

#[test]
fn sentinel_fields_import_as_absent() {
    let content = export(&[
        "Road Cycling,2021-05-01 06:45:00,Recovery spin,--,0,0:30:00,--,0,--,--,--",
    ]);

    let mut athlete = Athlete::new();
    garmin::import_rows(&mut athlete, &content).unwrap();

    let activity = athlete.get_activities(Some(ActivityKind::Cycle))[0];
    assert_eq!(activity.calories(), None);
    assert_eq!(activity.distance_miles(), None);
    assert_eq!(activity.attributes().average_heart_rate, None);
    assert_eq!(activity.attributes().maximum_heart_rate, None);
}

#[test]
fn quoted_title_with_comma_survives() {
    let content = export(&[
        "Tennis,2021-05-03 09:00:00,\"Drill, then match play\",--,450,1:30:00,--,--,--,--,--",
    ]);

    let mut athlete = Athlete::new();
    garmin::import_rows(&mut athlete, &content).unwrap();

    let activity = athlete.get_activities(Some(ActivityKind::Tennis))[0];
    assert_eq!(
        activity.attributes().description.as_deref(),
        Some("Drill, then match play")
    );
}

#[test]
fn duplicate_records_are_idempotent() {
    let row = "Road Cycling,2021-05-01 06:45:00,Morning Ride,18.21,612,1:02:03,140,165,15.3,31.5,185";
    let content = export(&[row, row]);

    let mut athlete = Athlete::new();
    let count = garmin::import_rows(&mut athlete, &content).unwrap();

    assert_eq!(count, 2);
    assert_eq!(athlete.get_activities(Some(ActivityKind::Cycle)).len(), 1);
}

#[test]
fn malformed_duration_aborts_but_keeps_earlier_rows() {
    let content = export(&[
        "Tennis,2021-05-03 09:00:00,Good row,--,450,1:30:00,--,--,--,--,--",
        "Tennis,2021-05-04 09:00:00,Bad row,--,450,ninety,--,--,--,--,--",
        "Tennis,2021-05-05 09:00:00,Never reached,--,450,1:00:00,--,--,--,--,--",
    ]);

    let mut athlete = Athlete::new();
    let result = garmin::import_rows(&mut athlete, &content);

    assert!(matches!(result, Err(ImportError::Field { record: 2, .. })));
    // No rollback: the first row stays.
    assert_eq!(athlete.activity_count(), 1);
}

#[test]
fn malformed_date_aborts() {
    let content = export(&[
        "Tennis,yesterday,Bad date,--,450,1:30:00,--,--,--,--,--",
    ]);

    let mut athlete = Athlete::new();
    assert!(garmin::import_rows(&mut athlete, &content).is_err());
    assert_eq!(athlete.activity_count(), 0);
}

#[test]
fn missing_required_column_is_reported() {
    let mut athlete = Athlete::new();
    let result = garmin::import_rows(&mut athlete, "Date,Time\n2021-05-01 06:45:00,1:00:00\n");
    assert!(matches!(
        result,
        Err(ImportError::MissingColumn("Activity Type"))
    ));
}

#[test]
fn reads_from_a_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Activities.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "{}",
        export(&[
            "Road Cycling,2021-05-01 06:45:00,Morning Ride,18.21,612,1:02:03,140,165,15.3,31.5,185",
        ])
    )
    .unwrap();

    let mut athlete = Athlete::new();
    let count = garmin::read_activity_file(&mut athlete, &path).unwrap();
    assert_eq!(count, 1);

    let missing = garmin::read_activity_file(&mut athlete, &dir.path().join("nope.csv"));
    assert!(matches!(missing, Err(ImportError::Io { .. })));
}

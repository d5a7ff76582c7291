//! Activity kinds, validated attributes, and rendering.
//!
//! An [`Activity`] is one recorded exercise session. The kind family is
//! closed: Cycle, Run, Tennis, Walk, Workout, plus a Generic bucket for
//! sessions whose external classification matched nothing. Each kind carries
//! its own optional payload; construction validates every supplied field and
//! the value is immutable afterwards.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::parse::format_hms;

/// Placeholder rendered for absent optional fields.
const ABSENT: &str = "--";

/// Errors from activity construction.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// A numeric field was supplied with a negative or non-finite value.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// An enum-valued field did not match its recognized set.
    #[error("invalid {field}: {value:?}")]
    InvalidChoice { field: &'static str, value: String },
}

/// The closed set of activity kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ActivityKind {
    Cycle,
    Run,
    Tennis,
    Walk,
    Workout,
    /// Catch-all for unrecognized external classifications
    Generic,
}

impl ActivityKind {
    /// The kinds that can carry goals, in reporting order.
    pub const GOALABLE: [ActivityKind; 5] = [
        ActivityKind::Cycle,
        ActivityKind::Run,
        ActivityKind::Tennis,
        ActivityKind::Walk,
        ActivityKind::Workout,
    ];

    /// Exercise name used in commands and reports.
    pub fn name(self) -> &'static str {
        match self {
            ActivityKind::Cycle => "Cycle",
            ActivityKind::Run => "Run",
            ActivityKind::Tennis => "Tennis",
            ActivityKind::Walk => "Walk",
            ActivityKind::Workout => "Workout",
            ActivityKind::Generic => "Generic",
        }
    }

    /// Resolve an exercise name. Only goalable kinds are addressable by name.
    pub fn from_name(name: &str) -> Option<ActivityKind> {
        Self::GOALABLE.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether this kind has distance semantics.
    pub fn has_distance(self) -> bool {
        matches!(
            self,
            ActivityKind::Cycle | ActivityKind::Run | ActivityKind::Walk
        )
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where an activity took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Indoor,
    Outdoor,
}

impl FromStr for VenueType {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indoor" => Ok(VenueType::Indoor),
            "outdoor" => Ok(VenueType::Outdoor),
            other => Err(ActivityError::InvalidChoice {
                field: "venue_type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueType::Indoor => write!(f, "indoor"),
            VenueType::Outdoor => write!(f, "outdoor"),
        }
    }
}

/// Kind of cycling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleType {
    Commute,
    Road,
    Trail,
    Stationary,
}

impl FromStr for CycleType {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commute" => Ok(CycleType::Commute),
            "road" => Ok(CycleType::Road),
            "trail" => Ok(CycleType::Trail),
            "stationary" => Ok(CycleType::Stationary),
            other => Err(ActivityError::InvalidChoice {
                field: "cycle type",
                value: other.to_string(),
            }),
        }
    }
}

/// Surface for running and walking sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Track,
    Road,
    Treadmill,
}

impl FromStr for Surface {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(Surface::Track),
            "road" => Ok(Surface::Road),
            "treadmill" => Ok(Surface::Treadmill),
            other => Err(ActivityError::InvalidChoice {
                field: "surface",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of tennis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TennisSession {
    BallMachine,
    Cardio,
    Drill,
    HittingSession,
    Lesson,
    Match,
}

impl FromStr for TennisSession {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ball_machine" => Ok(TennisSession::BallMachine),
            "cardio" => Ok(TennisSession::Cardio),
            "drill" => Ok(TennisSession::Drill),
            "hitting_session" => Ok(TennisSession::HittingSession),
            "lesson" => Ok(TennisSession::Lesson),
            "match" => Ok(TennisSession::Match),
            other => Err(ActivityError::InvalidChoice {
                field: "tennis session",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of gym workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutFormat {
    PersonalTraining,
    Solo,
}

impl FromStr for WorkoutFormat {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal_training" => Ok(WorkoutFormat::PersonalTraining),
            "solo" => Ok(WorkoutFormat::Solo),
            other => Err(ActivityError::InvalidChoice {
                field: "workout format",
                value: other.to_string(),
            }),
        }
    }
}

/// Running/walking speed expressed as minutes:seconds to cover a mile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    minutes: u8,
    seconds: u8,
}

impl Pace {
    /// Create a pace. Minutes and seconds must both be below 60.
    pub fn new(minutes: u8, seconds: u8) -> Result<Self, ActivityError> {
        if minutes >= 60 || seconds >= 60 {
            return Err(ActivityError::InvalidChoice {
                field: "pace",
                value: format!("{}:{:02}", minutes, seconds),
            });
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    pub fn seconds(self) -> u8 {
        self.seconds
    }
}

impl FromStr for Pace {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActivityError::InvalidChoice {
            field: "pace",
            value: s.to_string(),
        };

        let (minutes, seconds) = s.split_once(':').ok_or_else(invalid)?;
        let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u8 = seconds.parse().map_err(|_| invalid())?;
        Pace::new(minutes, seconds).map_err(|_| invalid())
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Optional attributes shared by every activity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAttributes {
    pub description: Option<String>,
    /// Calories burned; zero means "not captured"
    pub calories: Option<u32>,
    pub maximum_heart_rate: Option<u32>,
    pub average_heart_rate: Option<u32>,
    /// Venues are accepted but not yet recognized
    pub venue: Option<String>,
    pub venue_type: Option<VenueType>,
    /// Original classification tag from the external source
    pub source_activity_type: Option<String>,
}

/// Cycle payload. Speeds are decimal miles per hour, power is watts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleDetails {
    pub distance_miles: Option<f64>,
    pub cycle_type: Option<CycleType>,
    pub maximum_speed_mph: Option<f64>,
    pub average_speed_mph: Option<f64>,
    pub normalized_power: Option<u32>,
}

/// Run/Walk payload. Speeds are minutes:seconds per mile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootDetails {
    pub distance_miles: Option<f64>,
    pub surface: Option<Surface>,
    pub maximum_pace: Option<Pace>,
    pub average_pace: Option<Pace>,
}

/// Tennis payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TennisDetails {
    pub session: Option<TennisSession>,
    pub partner: Option<String>,
}

/// Gym workout payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetails {
    pub format: Option<WorkoutFormat>,
    pub trainer: Option<String>,
}

/// Kind-specific payload of an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivityDetails {
    Cycle(CycleDetails),
    Run(FootDetails),
    Tennis(TennisDetails),
    Walk(FootDetails),
    Workout(WorkoutDetails),
    Generic,
}

impl ActivityDetails {
    /// The kind tag for this payload.
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityDetails::Cycle(_) => ActivityKind::Cycle,
            ActivityDetails::Run(_) => ActivityKind::Run,
            ActivityDetails::Tennis(_) => ActivityKind::Tennis,
            ActivityDetails::Walk(_) => ActivityKind::Walk,
            ActivityDetails::Workout(_) => ActivityKind::Workout,
            ActivityDetails::Generic => ActivityKind::Generic,
        }
    }
}

/// One recorded exercise session. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    start: NaiveDateTime,
    duration: Duration,
    attributes: ActivityAttributes,
    details: ActivityDetails,
}

impl Activity {
    /// Build a validated activity.
    ///
    /// Numeric fields supplied as zero normalize to absent; the external
    /// source writes zero when a measurement was not captured, so zero and
    /// missing are deliberately indistinguishable downstream. Negative or
    /// non-finite decimal values are rejected.
    pub fn new(
        start: NaiveDateTime,
        duration: Duration,
        attributes: ActivityAttributes,
        details: ActivityDetails,
    ) -> Result<Self, ActivityError> {
        let mut attributes = attributes;
        attributes.description = nonempty(attributes.description);
        attributes.venue = nonempty(attributes.venue);
        attributes.calories = nonzero(attributes.calories);
        attributes.maximum_heart_rate = nonzero(attributes.maximum_heart_rate);
        attributes.average_heart_rate = nonzero(attributes.average_heart_rate);

        let details = match details {
            ActivityDetails::Cycle(cycle) => ActivityDetails::Cycle(CycleDetails {
                distance_miles: positive("distance", cycle.distance_miles)?,
                cycle_type: cycle.cycle_type,
                maximum_speed_mph: positive("maximum speed", cycle.maximum_speed_mph)?,
                average_speed_mph: positive("average speed", cycle.average_speed_mph)?,
                normalized_power: nonzero(cycle.normalized_power),
            }),
            ActivityDetails::Run(foot) => ActivityDetails::Run(checked_foot(foot)?),
            ActivityDetails::Walk(foot) => ActivityDetails::Walk(checked_foot(foot)?),
            other => other,
        };

        Ok(Self {
            start,
            duration,
            attributes,
            details,
        })
    }

    pub fn kind(&self) -> ActivityKind {
        self.details.kind()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn attributes(&self) -> &ActivityAttributes {
        &self.attributes
    }

    pub fn details(&self) -> &ActivityDetails {
        &self.details
    }

    pub fn calories(&self) -> Option<u32> {
        self.attributes.calories
    }

    /// Original classification tag, when the session came from an import.
    pub fn source_activity_type(&self) -> Option<&str> {
        self.attributes.source_activity_type.as_deref()
    }

    /// Distance in miles, for the kinds that track one.
    pub fn distance_miles(&self) -> Option<f64> {
        match &self.details {
            ActivityDetails::Cycle(cycle) => cycle.distance_miles,
            ActivityDetails::Run(foot) | ActivityDetails::Walk(foot) => foot.distance_miles,
            _ => None,
        }
    }

    /// Full single-line rendering with `--` placeholders for absent fields.
    pub fn detail(&self) -> String {
        let start = self.start.format("%Y-%m-%d at %H:%M");
        let duration = format_hms(self.duration);

        // A description that merely restates the kind adds nothing.
        let caption = match self.attributes.description.as_deref() {
            None => String::new(),
            Some(text)
                if text == self.kind().name()
                    || (text == "Running" && self.kind() == ActivityKind::Run)
                    || (text == "Cycling" && self.kind() == ActivityKind::Cycle) =>
            {
                String::new()
            }
            Some(text) => format!(" ({})", text),
        };

        let calories = opt_token(self.attributes.calories);
        let max_hr = opt_token(self.attributes.maximum_heart_rate);
        let avg_hr = opt_token(self.attributes.average_heart_rate);

        let base = format!(
            "{}{} on {} for {} Calories: {} Max HR: {} Avg HR: {}",
            self.kind(),
            caption,
            start,
            duration,
            calories,
            max_hr,
            avg_hr
        );

        let addendum = match &self.details {
            ActivityDetails::Cycle(cycle) => format!(
                " Distance (miles): {} Max Speed (mph): {} Avg Speed (mph): {} \
                 Normalized Power (watts): {}",
                opt_token(cycle.distance_miles),
                opt_token(cycle.maximum_speed_mph),
                opt_token(cycle.average_speed_mph),
                opt_token(cycle.normalized_power),
            ),
            ActivityDetails::Run(foot) | ActivityDetails::Walk(foot) => format!(
                " Distance (miles): {} Max Speed (minutes/mile): {} \
                 Avg Speed (minutes/mile): {}",
                opt_token(foot.distance_miles),
                opt_token(foot.maximum_pace),
                opt_token(foot.average_pace),
            ),
            _ => String::new(),
        };

        format!("[{}{}]", base, addendum)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} on {} for {}]",
            self.kind(),
            self.start.format("%Y-%m-%d at %H:%M"),
            format_hms(self.duration)
        )
    }
}

/// Validate a run/walk payload.
fn checked_foot(foot: FootDetails) -> Result<FootDetails, ActivityError> {
    Ok(FootDetails {
        distance_miles: positive("distance", foot.distance_miles)?,
        surface: foot.surface,
        maximum_pace: foot.maximum_pace,
        average_pace: foot.average_pace,
    })
}

/// Reject negative or non-finite values; normalize zero to absent.
fn positive(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ActivityError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(ActivityError::NonPositive { field, value: v })
        }
        Some(v) if v == 0.0 => Ok(None),
        other => Ok(other),
    }
}

/// Normalize a zero integer measurement to absent.
fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v != 0)
}

/// Normalize an empty string to absent.
fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Render an optional value, substituting the placeholder when absent.
fn opt_token<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

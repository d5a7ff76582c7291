//! Goal definitions and validation.
//!
//! A goal targets one metric (count, distance, duration) for one activity
//! kind over one timeframe (month, year, cumulative). Goals are value
//! objects: replaced or deleted, never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::activity::ActivityKind;
use crate::parse::{group_digits, group_fixed};

/// Errors from goal construction and lookup arguments.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Exercise name did not match a goalable activity kind
    #[error("invalid exercise: {0:?}")]
    InvalidKind(String),

    /// Metric name outside {count, distance, duration}
    #[error("invalid metric: {0:?}")]
    InvalidMetric(String),

    /// Timeframe name outside {month, year, cumulative}
    #[error("invalid timeframe: {0:?}")]
    InvalidTimeframe(String),

    /// Distance goals only make sense for kinds that track distance
    #[error("distance goals are not valid for {0}")]
    DistanceNotTracked(ActivityKind),

    /// Unclassified activities cannot carry goals
    #[error("goals cannot target unclassified activities")]
    NotGoalable,

    /// Targets must be positive
    #[error("target must be greater than zero")]
    ZeroTarget,
}

/// What a goal measures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Count,
    Distance,
    Duration,
}

impl Metric {
    /// Unit word used in goal phrases.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Count => "times",
            Metric::Distance => "miles",
            Metric::Duration => "hours",
        }
    }

    /// Render a tallied metric value for reports.
    pub fn render(self, value: f64) -> String {
        match self {
            Metric::Count => group_digits(value as u64),
            Metric::Distance => group_fixed(value, 2),
            Metric::Duration => group_fixed(value, 1),
        }
    }
}

impl FromStr for Metric {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Metric::Count),
            "distance" => Ok(Metric::Distance),
            "duration" => Ok(Metric::Duration),
            other => Err(GoalError::InvalidMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Count => write!(f, "count"),
            Metric::Distance => write!(f, "distance"),
            Metric::Duration => write!(f, "duration"),
        }
    }
}

/// The window a goal is evaluated over.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Month,
    Year,
    Cumulative,
}

impl Timeframe {
    /// Phrase used in goal listings.
    pub fn phrase(self) -> &'static str {
        match self {
            Timeframe::Month => "each month",
            Timeframe::Year => "each year",
            Timeframe::Cumulative => "on a cumulative basis",
        }
    }
}

impl FromStr for Timeframe {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            "cumulative" => Ok(Timeframe::Cumulative),
            other => Err(GoalError::InvalidTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Month => write!(f, "month"),
            Timeframe::Year => write!(f, "year"),
            Timeframe::Cumulative => write!(f, "cumulative"),
        }
    }
}

/// Goals are keyed per kind by metric and timeframe; a new goal replaces
/// any prior goal under the same key.
pub type GoalKey = (Metric, Timeframe);

/// A target for one metric over one timeframe for one activity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    kind: ActivityKind,
    metric: Metric,
    timeframe: Timeframe,
    target: u32,
}

impl Goal {
    /// Build a validated goal.
    pub fn new(
        kind: ActivityKind,
        metric: Metric,
        timeframe: Timeframe,
        target: u32,
    ) -> Result<Self, GoalError> {
        if kind == ActivityKind::Generic {
            return Err(GoalError::NotGoalable);
        }
        if metric == Metric::Distance && !kind.has_distance() {
            return Err(GoalError::DistanceNotTracked(kind));
        }
        if target == 0 {
            return Err(GoalError::ZeroTarget);
        }

        Ok(Self {
            kind,
            metric,
            timeframe,
            target,
        })
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Replacement key within the owning kind's goal collection.
    pub fn key(&self) -> GoalKey {
        (self.metric, self.timeframe)
    }

    /// Listing phrase without the surrounding brackets, shared with reports.
    pub(crate) fn phrase(&self) -> String {
        format!(
            "Goal: {} {} {} {}",
            self.kind,
            group_digits(self.target as u64),
            self.metric.unit(),
            self.timeframe.phrase()
        )
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_construction() {
        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Cumulative, 10)
            .unwrap();
        assert_eq!(goal.kind(), ActivityKind::Run);
        assert_eq!(goal.key(), (Metric::Count, Timeframe::Cumulative));
        assert_eq!(goal.target(), 10);
    }

    #[test]
    fn test_distance_invalid_for_tennis_and_workout() {
        assert!(matches!(
            Goal::new(ActivityKind::Tennis, Metric::Distance, Timeframe::Year, 10),
            Err(GoalError::DistanceNotTracked(ActivityKind::Tennis))
        ));
        assert!(matches!(
            Goal::new(ActivityKind::Workout, Metric::Distance, Timeframe::Month, 5),
            Err(GoalError::DistanceNotTracked(ActivityKind::Workout))
        ));
        // Distance is fine for the kinds that track it.
        assert!(Goal::new(ActivityKind::Cycle, Metric::Distance, Timeframe::Year, 1500).is_ok());
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            Goal::new(ActivityKind::Cycle, Metric::Count, Timeframe::Month, 0),
            Err(GoalError::ZeroTarget)
        ));
    }

    #[test]
    fn test_generic_not_goalable() {
        assert!(matches!(
            Goal::new(ActivityKind::Generic, Metric::Count, Timeframe::Year, 1),
            Err(GoalError::NotGoalable)
        ));
    }

    #[test]
    fn test_metric_and_timeframe_parse() {
        assert_eq!("count".parse::<Metric>().unwrap(), Metric::Count);
        assert_eq!("cumulative".parse::<Timeframe>().unwrap(), Timeframe::Cumulative);
        assert!("pace".parse::<Metric>().is_err());
        assert!("weekly".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_listing_form() {
        let goal = Goal::new(ActivityKind::Cycle, Metric::Distance, Timeframe::Year, 1500)
            .unwrap();
        assert_eq!(goal.to_string(), "[Goal: Cycle 1,500 miles each year]");
    }
}

//! Windowed aggregation over an athlete's activities.

use chrono::NaiveDate;
use std::time::Duration;

use super::types::ActivityKind;
use crate::athlete::Athlete;
use crate::goal::Metric;
use crate::parse::{group_digits, hms_parts};

/// Inclusive date window for tallies and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window from the epoch through `end`. Used when a caller supplies no
    /// explicit bounds; 1970-01-01 predates any plausible recorded session.
    pub fn through(end: NaiveDate) -> Self {
        Self {
            start: NaiveDate::default(),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Aggregated activity data for one kind within a window.
///
/// `distance_miles` is populated only for the kinds with distance
/// semantics; absent per-session measurements accumulate as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub count: u32,
    pub calories: u64,
    pub duration: Duration,
    pub distance_miles: Option<f64>,
}

impl Tally {
    /// Aggregate the athlete's activities of `kind` whose start date falls
    /// within `window`. Deterministic for a fixed activity set and window.
    pub fn compute(athlete: &Athlete, kind: ActivityKind, window: DateWindow) -> Self {
        let mut tally = Tally::default();
        if kind.has_distance() {
            tally.distance_miles = Some(0.0);
        }

        for activity in athlete.get_activities(Some(kind)) {
            if !window.contains(activity.start().date()) {
                continue;
            }
            tally.count += 1;
            tally.duration += activity.duration();
            tally.calories += u64::from(activity.calories().unwrap_or(0));
            if let (Some(total), Some(distance)) =
                (tally.distance_miles.as_mut(), activity.distance_miles())
            {
                *total += distance;
            }
        }

        tally
    }

    /// The value compared against goal targets: count as a whole number,
    /// distance in miles, duration in hours.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => f64::from(self.count),
            Metric::Distance => self.distance_miles.unwrap_or(0.0),
            Metric::Duration => self.duration.as_secs_f64() / 3600.0,
        }
    }

    /// Fixed-format summary line for one kind, or `None` when nothing
    /// matched the window.
    pub fn summary_line(&self, kind: ActivityKind) -> Option<String> {
        if self.count == 0 {
            return None;
        }

        let (hours, minutes, seconds) = hms_parts(self.duration);
        let mut line = format!(
            "{:<7} Summary: Activity Count: {:>2} Exercise Time (h:m:s): {:>3}:{:02}:{:02} \
             Calories Burned: {:>6}",
            kind.name(),
            group_digits(u64::from(self.count)),
            hours,
            minutes,
            seconds,
            group_digits(self.calories),
        );
        if let Some(distance) = self.distance_miles {
            line.push_str(&format!(" Distance (miles): {:>8.2}", distance));
        }
        Some(line)
    }
}

//! Athlete aggregate root.
//!
//! Owns the per-kind activity collection (keyed by start time, first write
//! wins) and the per-kind goal collection (keyed by metric and timeframe,
//! latest write wins). Single-owner, single-process; no synchronization.

pub mod store;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::activity::{Activity, ActivityKind, DateWindow, Tally};
use crate::goal::{Goal, GoalError, GoalKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    activities: BTreeMap<ActivityKind, BTreeMap<NaiveDateTime, Activity>>,
    goals: BTreeMap<ActivityKind, BTreeMap<GoalKey, Goal>>,
}

impl Athlete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an activity unless one of the same kind already starts at the
    /// same time. Imported data is static, so a duplicate insert is a
    /// silent no-op and the first write is retained.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities
            .entry(activity.kind())
            .or_default()
            .entry(activity.start())
            .or_insert(activity);
    }

    /// All activities of `kind`, or of every kind when `None`. Callers must
    /// not depend on the ordering.
    pub fn get_activities(&self, kind: Option<ActivityKind>) -> Vec<&Activity> {
        match kind {
            Some(kind) => self
                .activities
                .get(&kind)
                .map(|per_start| per_start.values().collect())
                .unwrap_or_default(),
            None => self
                .activities
                .values()
                .flat_map(|per_start| per_start.values())
                .collect(),
        }
    }

    /// Add a goal from command-surface strings, replacing any existing goal
    /// for the same kind, metric and timeframe.
    pub fn add_goal(
        &mut self,
        exercise: &str,
        metric: &str,
        timeframe: &str,
        target: u32,
    ) -> Result<(), GoalError> {
        let kind = ActivityKind::from_name(exercise)
            .ok_or_else(|| GoalError::InvalidKind(exercise.to_string()))?;
        let goal = Goal::new(kind, metric.parse()?, timeframe.parse()?, target)?;
        self.goals.entry(kind).or_default().insert(goal.key(), goal);
        Ok(())
    }

    /// Delete a goal. Unknown names are errors; a missing key is a no-op.
    pub fn delete_goal(
        &mut self,
        exercise: &str,
        metric: &str,
        timeframe: &str,
    ) -> Result<(), GoalError> {
        let kind = ActivityKind::from_name(exercise)
            .ok_or_else(|| GoalError::InvalidKind(exercise.to_string()))?;
        let key: GoalKey = (metric.parse()?, timeframe.parse()?);
        if let Some(per_key) = self.goals.get_mut(&kind) {
            per_key.remove(&key);
        }
        Ok(())
    }

    /// All goals of `kind`, or of every kind when `None`.
    pub fn get_goals(&self, kind: Option<ActivityKind>) -> Vec<&Goal> {
        match kind {
            Some(kind) => self
                .goals
                .get(&kind)
                .map(|per_key| per_key.values().collect())
                .unwrap_or_default(),
            None => self
                .goals
                .values()
                .flat_map(|per_key| per_key.values())
                .collect(),
        }
    }

    /// Start time of the earliest activity of `kind`, if any.
    pub fn earliest_activity(&self, kind: ActivityKind) -> Option<NaiveDateTime> {
        self.activities
            .get(&kind)
            .and_then(|per_start| per_start.keys().next().copied())
    }

    pub fn activity_count(&self) -> usize {
        self.activities.values().map(BTreeMap::len).sum()
    }

    pub fn goal_count(&self) -> usize {
        self.goals.values().map(BTreeMap::len).sum()
    }

    /// Detail lines for activities within `window`, one per session.
    pub fn list_activities(
        &self,
        kind: Option<ActivityKind>,
        window: DateWindow,
    ) -> Vec<String> {
        self.reporting_kinds(kind)
            .into_iter()
            .flat_map(|kind| self.get_activities(Some(kind)))
            .filter(|activity| window.contains(activity.start().date()))
            .map(|activity| activity.detail())
            .collect()
    }

    /// Per-kind summary lines for activities within `window`. Kinds with
    /// nothing in the window are skipped.
    pub fn summarize_activities(
        &self,
        kind: Option<ActivityKind>,
        window: DateWindow,
    ) -> Vec<String> {
        self.reporting_kinds(kind)
            .into_iter()
            .filter_map(|kind| Tally::compute(self, kind, window).summary_line(kind))
            .collect()
    }

    /// Listing lines for goals, in reporting order.
    pub fn list_goals(&self, kind: Option<ActivityKind>) -> Vec<String> {
        self.reporting_kinds(kind)
            .into_iter()
            .flat_map(|kind| self.get_goals(Some(kind)))
            .map(|goal| goal.to_string())
            .collect()
    }

    /// Progress reports for goals as of `today`. Month reports span
    /// multiple lines.
    pub fn summarize_goals_at(
        &self,
        kind: Option<ActivityKind>,
        today: chrono::NaiveDate,
    ) -> Vec<String> {
        self.reporting_kinds(kind)
            .into_iter()
            .flat_map(|kind| self.get_goals(Some(kind)))
            .map(|goal| goal.report_at(self, today))
            .collect()
    }

    /// The kinds a listing covers: the requested one, or every goalable
    /// kind in reporting order.
    fn reporting_kinds(&self, kind: Option<ActivityKind>) -> Vec<ActivityKind> {
        match kind {
            Some(kind) => vec![kind],
            None => ActivityKind::GOALABLE.to_vec(),
        }
    }
}

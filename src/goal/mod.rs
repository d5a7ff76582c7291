//! Goal model: targets per metric and timeframe, with progress reports.

pub mod report;
pub mod types;

pub use types::{Goal, GoalError, GoalKey, Metric, Timeframe};

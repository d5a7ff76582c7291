//! fitlog - Single-User Fitness Log
//!
//! A fitness-tracking domain model: typed exercise activities imported
//! from Garmin CSV exports, stored per athlete, with goal evaluation over
//! monthly, yearly and cumulative timeframes and snapshot persistence.

pub mod activity;
pub mod athlete;
pub mod config;
pub mod garmin;
pub mod goal;
pub mod parse;
pub mod shell;

// Re-export commonly used types
pub use activity::{Activity, ActivityKind, DateWindow, Tally};
pub use athlete::Athlete;
pub use goal::{Goal, Metric, Timeframe};

//! Activity model: kinds, validated construction, and aggregation.

pub mod tally;
pub mod types;

pub use tally::{DateWindow, Tally};
pub use types::{
    Activity, ActivityAttributes, ActivityDetails, ActivityError, ActivityKind, CycleDetails,
    CycleType, FootDetails, Pace, Surface, TennisDetails, TennisSession, VenueType,
    WorkoutDetails, WorkoutFormat,
};

//! Construction-time errors.
//!
//! These reject the offending construction immediately and never corrupt
//! engine state. Placement failures are not errors — the planner records
//! them per task and completes the pass (see [`crate::models::PlacementFailure`]).

use chrono::NaiveTime;
use thiserror::Error;

/// Errors raised by fallible constructors and pool mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Interval start is not strictly before its end.
    #[error("interval start {start} must be before end {end}")]
    EmptyInterval { start: NaiveTime, end: NaiveTime },

    /// Split point is outside the open interval.
    #[error("split point {at} is outside the open interval {start}..{end}")]
    SplitOutOfRange {
        start: NaiveTime,
        end: NaiveTime,
        at: NaiveTime,
    },

    /// Task duration outside 1..=1440 minutes.
    #[error("task '{id}' duration {minutes} min is outside 1..=1440")]
    DurationOutOfRange { id: String, minutes: i64 },

    /// Two entities in the same pool share an ID.
    #[error("duplicate id '{0}' in pool")]
    DuplicateId(String),

    /// An operation referenced an ID the pool does not contain.
    #[error("no task with id '{0}'")]
    UnknownTask(String),
}

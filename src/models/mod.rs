//! Care planning domain models.
//!
//! Provides the core data types for representing one day of care
//! planning: availability intervals, recurring tasks, and the resulting
//! plan with its placements and diagnostics.
//!
//! # Ownership
//!
//! | Type | Owns | References by id |
//! |------|------|------------------|
//! | `Owner` | pets, availability | — |
//! | `Pet` | task pool | owner |
//! | `CareTask` | — | pet, dependency tasks |
//! | `DailyPlan` | placements for one pass | tasks |

mod interval;
mod plan;
mod roster;
mod task;

pub use interval::TimeInterval;
pub use plan::{Conflict, DailyPlan, PlacedTask, PlacementFailure, UnscheduledTask};
pub use roster::{Owner, Pet};
pub use task::{CareTask, Priority, Recurrence, MAX_DURATION_MINUTES};

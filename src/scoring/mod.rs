//! Task scoring: multi-factor urgency evaluation.
//!
//! Provides the additive scoring function the planner orders tasks by:
//! a priority base, a required bonus, a capped overdue bonus, a
//! window-fit bonus, and a recency penalty, composed by a [`TaskScorer`].
//!
//! # Usage
//!
//! ```
//! use pawplan::scoring::{ScoringContext, TaskScorer};
//! use pawplan::models::{CareTask, Priority};
//! use chrono::NaiveDate;
//!
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
//!     .and_hms_opt(8, 0, 0).unwrap();
//! let ctx = ScoringContext::at(reference);
//! let task = CareTask::new("walk", "Walk", 30).unwrap()
//!     .with_priority(Priority::High);
//!
//! let score = TaskScorer::default().score(&task, &ctx);
//! assert!((score - 3.0).abs() < 1e-9);
//! ```
//!
//! # Score Convention
//! **Higher score = more urgent** (placed earlier). Scores are a
//! pass-local tie-break for ordering; they carry no meaning outside one
//! planning pass.

mod context;
mod engine;
pub mod factors;

pub use context::ScoringContext;
pub use engine::TaskScorer;

use crate::models::CareTask;
use std::fmt::Debug;

/// One additive component of a task's score.
pub trait ScoreFactor: Send + Sync + Debug {
    /// Factor name (e.g., "priority", "overdue").
    fn name(&self) -> &'static str;

    /// Evaluates this factor's contribution for a task.
    ///
    /// Bonuses are positive, penalties negative; higher totals are
    /// scheduled first.
    fn evaluate(&self, task: &CareTask, context: &ScoringContext) -> f64;
}

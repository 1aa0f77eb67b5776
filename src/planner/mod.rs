//! Greedy daily planner.
//!
//! Orchestrates one planning pass: score and order the task pool, place
//! each task greedily into the chronologically ordered free-interval
//! pool with split-and-reinsert fragmentation, then assemble a
//! [`DailyPlan`](crate::models::DailyPlan) with utilization, conflict
//! warnings, and a decision narrative.
//!
//! # Usage
//!
//! ```
//! use pawplan::models::{CareTask, Priority, TimeInterval};
//! use pawplan::planner::PlanningEngine;
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let window = TimeInterval::new(
//!     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//! ).unwrap();
//! let walk = CareTask::new("walk", "Morning Walk", 30).unwrap()
//!     .with_priority(Priority::High)
//!     .with_required(true);
//!
//! let mut engine = PlanningEngine::new();
//! let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let plan = engine.generate_plan(&[window], &[walk], date);
//! assert_eq!(plan.placed().len(), 1);
//! ```

mod engine;

pub use engine::PlanningEngine;

//! Daily care planning engine.
//!
//! Assigns a bounded set of recurring, prioritized care activities to
//! disjoint slots inside a caregiver's available time, producing a
//! ranked, conflict-checked daily plan with a human-readable
//! justification.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeInterval`, `CareTask`,
//!   `PlacedTask`, `DailyPlan`, plus the `Owner`/`Pet` collaborator layer
//! - **`scoring`**: Multi-factor task scoring (`ScoreFactor`, `TaskScorer`)
//! - **`planner`**: Greedy placement with window fragmentation
//!   (`PlanningEngine`)
//! - **`validation`**: Pool integrity checks (duplicate ids, unknown
//!   dependencies, cycles)
//! - **`error`**: Construction-time error taxonomy
//!
//! # Design
//!
//! One planning pass is a pure, synchronous function of (availability,
//! task pool, date, reference time): no I/O, no shared mutable state,
//! no fatal paths — every anomaly degrades to an unscheduled task plus
//! a warning and a decision-log line. There is deliberately no
//! backtracking or search: placement is greedy and the score is an
//! ordering heuristic, not an optimality claim.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use pawplan::models::{CareTask, Priority, Recurrence, TimeInterval};
//! use pawplan::planner::PlanningEngine;
//!
//! let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let availability = vec![
//!     TimeInterval::new(t(7, 0), t(9, 0)).unwrap(),
//!     TimeInterval::new(t(17, 0), t(20, 0)).unwrap(),
//! ];
//! let tasks = vec![
//!     CareTask::new("walk", "Morning Walk", 30).unwrap()
//!         .with_priority(Priority::High)
//!         .with_required(true)
//!         .with_recurrence(Recurrence::Daily),
//!     CareTask::new("play", "Playtime", 20).unwrap()
//!         .with_preferred_interval(TimeInterval::new(t(17, 0), t(20, 0)).unwrap()),
//! ];
//!
//! let mut engine = PlanningEngine::new();
//! let plan = engine.generate_plan(
//!     &availability,
//!     &tasks,
//!     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
//! );
//! assert_eq!(plan.placed().len(), 2);
//! assert!(!plan.has_warnings());
//! println!("{}", plan.explanation);
//! ```

pub mod error;
pub mod models;
pub mod planner;
pub mod scoring;
pub mod validation;

pub use error::PlanError;

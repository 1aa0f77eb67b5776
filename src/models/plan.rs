//! Daily plan (solution) model.
//!
//! A [`DailyPlan`] is the output of one planning pass: placed tasks kept
//! sorted by start time, the tasks that could not be placed with their
//! failure reasons, aggregate minute counters, the decision narrative, and
//! advisory conflict warnings.
//!
//! The ordering of `placed` is an invariant maintained on every insertion,
//! not restored at the end: [`DailyPlan::insert`] is a binary-search
//! insert.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{CareTask, TimeInterval};

/// A non-fatal reason a task was left unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementFailure {
    /// At least one dependency is not marked complete in the pool.
    DependencyUnmet,
    /// No free interval fits the task's duration.
    NoFittingWindow,
}

impl std::fmt::Display for PlacementFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementFailure::DependencyUnmet => write!(f, "dependency unmet"),
            PlacementFailure::NoFittingWindow => write!(f, "no fitting window"),
        }
    }
}

/// A task bound to a concrete slot.
///
/// References task identity by id into the caller's pool; title and
/// duration are denormalized so a plan row reads on its own. Invariant:
/// `end - start == duration_minutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTask {
    /// Placed task id.
    pub task_id: String,
    /// Task title (denormalized).
    pub title: String,
    /// Task duration in minutes (denormalized).
    pub duration_minutes: i64,
    /// Slot start.
    pub start: NaiveTime,
    /// Slot end.
    pub end: NaiveTime,
    /// Why this slot was chosen.
    pub reason: String,
}

impl PlacedTask {
    /// Creates a placement for `task` starting at `start`.
    ///
    /// The end time is derived from the task duration, keeping the
    /// duration invariant by construction.
    pub fn new(task: &CareTask, start: NaiveTime, reason: impl Into<String>) -> Self {
        let end = start + chrono::Duration::minutes(task.duration_minutes);
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            duration_minutes: task.duration_minutes,
            start,
            end,
            reason: reason.into(),
        }
    }

    /// The occupied slot as an interval.
    pub fn slot(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start, self.end).ok()
    }

    /// Whether two placements overlap in time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A task the engine could not place, with the recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledTask {
    /// Task id.
    pub task_id: String,
    /// Task title (denormalized).
    pub title: String,
    /// Why placement failed.
    pub failure: PlacementFailure,
}

/// An advisory warning that two placed tasks overlap in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Earlier-starting task id.
    pub first_id: String,
    /// Later-starting task id.
    pub second_id: String,
    /// Start of the overlapping range.
    pub overlap_start: NaiveTime,
    /// End of the overlapping range.
    pub overlap_end: NaiveTime,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' and '{}' overlap between {} and {}",
            self.first_id,
            self.second_id,
            self.overlap_start.format("%H:%M"),
            self.overlap_end.format("%H:%M")
        )
    }
}

/// One day's ranked, conflict-checked plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Target date.
    pub date: NaiveDate,
    /// Placements, sorted by start time ascending (invariant).
    placed: Vec<PlacedTask>,
    /// Tasks that could not be placed, with reasons.
    pub unscheduled: Vec<UnscheduledTask>,
    /// Sum of the original free intervals' durations.
    pub total_available_minutes: i64,
    /// Sum of placed durations (kept in lockstep with `placed`).
    total_scheduled_minutes: i64,
    /// Accumulated decision narrative.
    pub explanation: String,
    /// Advisory warnings collected during the pass.
    pub warnings: Vec<String>,
}

impl DailyPlan {
    /// Creates an empty plan for a date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    /// Placements, sorted by start time ascending.
    pub fn placed(&self) -> &[PlacedTask] {
        &self.placed
    }

    /// Sum of placed durations in minutes.
    #[inline]
    pub fn total_scheduled_minutes(&self) -> i64 {
        self.total_scheduled_minutes
    }

    /// Inserts a placement, preserving start-time order.
    ///
    /// Binary-search insertion: O(log n) to locate, placed after any
    /// existing entry with the same start so insertion order is stable.
    pub fn insert(&mut self, placed: PlacedTask) {
        let idx = self.placed.partition_point(|p| p.start <= placed.start);
        self.total_scheduled_minutes += placed.duration_minutes;
        self.placed.insert(idx, placed);
    }

    /// Records an unscheduled task.
    pub fn mark_unscheduled(&mut self, task: &CareTask, failure: PlacementFailure) {
        self.unscheduled.push(UnscheduledTask {
            task_id: task.id.clone(),
            title: task.title.clone(),
            failure,
        });
    }

    /// Scheduled-to-available ratio as a percentage.
    ///
    /// Zero when no minutes are available; otherwise within 0..=100 for
    /// any plan this engine produces.
    pub fn utilization_pct(&self) -> f64 {
        if self.total_available_minutes <= 0 {
            0.0
        } else {
            self.total_scheduled_minutes as f64 / self.total_available_minutes as f64 * 100.0
        }
    }

    /// Scans the sorted placements for overlapping adjacent pairs.
    ///
    /// Advisory only: the placement algorithm never overlaps its own
    /// output, so conflicts can only come from externally constructed
    /// entries.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut found = Vec::new();
        for pair in self.placed.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.overlaps(b) {
                found.push(Conflict {
                    first_id: a.task_id.clone(),
                    second_id: b.task_id.clone(),
                    overlap_start: a.start.max(b.start),
                    overlap_end: a.end.min(b.end),
                });
            }
        }
        found
    }

    /// Whether any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

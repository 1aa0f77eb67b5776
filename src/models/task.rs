//! Care task model.
//!
//! A [`CareTask`] is a recurring care activity competing for slots in the
//! caregiver's availability: a duration, a priority, a recurrence policy
//! with a nominal period, optional preferred intervals, and a set of
//! dependency ids that must be complete before the task may be placed.
//!
//! Tasks are created by the caller, mutated only by completion (see
//! [`Pet::mark_task_complete`](super::Pet::mark_task_complete)), and
//! read-only during a planning pass.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::TimeInterval;

/// Minutes per day, the upper bound on task duration.
pub const MAX_DURATION_MINUTES: i64 = 1440;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Task priority, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Base score contribution used for ordering.
    pub fn base_score(self) -> f64 {
        match self {
            Priority::Low => 1.0,
            Priority::Medium => 2.0,
            Priority::High => 3.0,
            Priority::Critical => 4.0,
        }
    }

    /// Lowercase label for reason strings.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

/// Recurrence policy, a closed tag set with an associated nominal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    /// No schedule: never overdue, completion spawns no successor.
    AsNeeded,
}

impl Recurrence {
    /// Nominal period in days. `None` for [`Recurrence::AsNeeded`].
    pub fn period_days(self) -> Option<f64> {
        match self {
            Recurrence::Daily => Some(1.0),
            Recurrence::Weekly => Some(7.0),
            Recurrence::Biweekly => Some(14.0),
            Recurrence::Monthly => Some(30.0),
            Recurrence::AsNeeded => None,
        }
    }
}

/// A recurring, prioritized care activity.
///
/// IDs are unique within the owning task pool (enforced by
/// [`Pet::add_task`](super::Pet::add_task) and by
/// [`validate_pool`](crate::validation::validate_pool)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTask {
    /// Unique identifier within the owning pool.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Duration in minutes, 1..=1440.
    pub duration_minutes: i64,
    /// Scheduling priority.
    pub priority: Priority,
    /// Required tasks are placed before any optional task.
    pub required: bool,
    /// Preferred intervals, in preference order. May be empty.
    pub preferred_intervals: Vec<TimeInterval>,
    /// When this task was last completed, if ever.
    pub last_completed: Option<NaiveDateTime>,
    /// Recurrence policy.
    pub recurrence: Recurrence,
    /// IDs of tasks that must be complete before this one may be placed.
    pub dependency_ids: HashSet<String>,
    /// Owning pet, resolved by id through the roster (no back-pointer).
    pub pet_id: Option<String>,
}

impl CareTask {
    /// Creates a new task.
    ///
    /// # Errors
    /// [`PlanError::DurationOutOfRange`] if `duration_minutes` is outside
    /// 1..=1440.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_minutes: i64,
    ) -> Result<Self, PlanError> {
        let id = id.into();
        if duration_minutes < 1 || duration_minutes > MAX_DURATION_MINUTES {
            return Err(PlanError::DurationOutOfRange {
                id,
                minutes: duration_minutes,
            });
        }
        Ok(Self {
            id,
            title: title.into(),
            duration_minutes,
            priority: Priority::Medium,
            required: false,
            preferred_intervals: Vec::new(),
            last_completed: None,
            recurrence: Recurrence::AsNeeded,
            dependency_ids: HashSet::new(),
            pet_id: None,
        })
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the task required (or not).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the recurrence policy.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Adds a preferred interval.
    pub fn with_preferred_interval(mut self, interval: TimeInterval) -> Self {
        self.preferred_intervals.push(interval);
        self
    }

    /// Sets the last-completion timestamp.
    pub fn with_last_completed(mut self, at: NaiveDateTime) -> Self {
        self.last_completed = Some(at);
        self
    }

    /// Adds a dependency on another task id.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        self.dependency_ids.insert(task_id.into());
        self
    }

    /// Links the task to a pet by id.
    pub fn with_pet(mut self, pet_id: impl Into<String>) -> Self {
        self.pet_id = Some(pet_id.into());
        self
    }

    /// Days elapsed since last completion, fractional.
    ///
    /// `None` when the task has never been completed.
    pub fn days_since_completed(&self, reference: NaiveDateTime) -> Option<f64> {
        self.last_completed
            .map(|done| reference.signed_duration_since(done).num_minutes() as f64 / MINUTES_PER_DAY)
    }

    /// Days elapsed beyond the recurrence-derived due date.
    ///
    /// `None` when the task is not overdue: [`Recurrence::AsNeeded`] tasks
    /// are never overdue, and recurring tasks completed within their
    /// nominal period are not yet due. A never-completed recurring task
    /// counts as one full period overdue.
    pub fn days_overdue(&self, reference: NaiveDateTime) -> Option<f64> {
        let period = self.recurrence.period_days()?;
        match self.days_since_completed(reference) {
            None => Some(period),
            Some(elapsed) if elapsed > period => Some(elapsed - period),
            Some(_) => None,
        }
    }

    /// Whether the task is past its recurrence-derived due date.
    pub fn is_overdue(&self, reference: NaiveDateTime) -> bool {
        self.days_overdue(reference).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_task_builder() {
        let task = CareTask::new("walk", "Morning Walk", 30)
            .unwrap()
            .with_priority(Priority::High)
            .with_required(true)
            .with_recurrence(Recurrence::Daily)
            .with_dependency("feed")
            .with_pet("pet1");

        assert_eq!(task.id, "walk");
        assert_eq!(task.duration_minutes, 30);
        assert_eq!(task.priority, Priority::High);
        assert!(task.required);
        assert_eq!(task.recurrence, Recurrence::Daily);
        assert!(task.dependency_ids.contains("feed"));
        assert_eq!(task.pet_id.as_deref(), Some("pet1"));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(matches!(
            CareTask::new("t", "Invalid", 0),
            Err(PlanError::DurationOutOfRange { .. })
        ));
        assert!(matches!(
            CareTask::new("t", "Invalid", -10),
            Err(PlanError::DurationOutOfRange { .. })
        ));
        assert!(matches!(
            CareTask::new("t", "Too Long", 1500),
            Err(PlanError::DurationOutOfRange { .. })
        ));
        assert!(CareTask::new("t", "All Day", 1440).is_ok());
    }

    #[test]
    fn test_as_needed_never_overdue() {
        let task = CareTask::new("bath", "Bath", 30).unwrap();
        assert!(!task.is_overdue(noon()));
        assert_eq!(task.days_overdue(noon()), None);
    }

    #[test]
    fn test_never_completed_counts_one_period() {
        let task = CareTask::new("meds", "Medicine", 5)
            .unwrap()
            .with_recurrence(Recurrence::Daily);
        assert!(task.is_overdue(noon()));
        assert_eq!(task.days_overdue(noon()), Some(1.0));
    }

    #[test]
    fn test_recently_done_not_overdue() {
        let task = CareTask::new("walk", "Walk", 30)
            .unwrap()
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(noon() - Duration::hours(12));
        assert!(!task.is_overdue(noon()));
    }

    #[test]
    fn test_stale_daily_task_overdue() {
        let task = CareTask::new("feed", "Feed", 10)
            .unwrap()
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(noon() - Duration::days(2));
        assert!(task.is_overdue(noon()));
        let days = task.days_overdue(noon()).unwrap();
        assert!((days - 1.0).abs() < 1e-9); // 2 elapsed - 1 period
    }

    #[test]
    fn test_weekly_period() {
        let task = CareTask::new("groom", "Grooming", 45)
            .unwrap()
            .with_recurrence(Recurrence::Weekly)
            .with_last_completed(noon() - Duration::days(5));
        assert!(!task.is_overdue(noon()));

        let stale = CareTask::new("groom2", "Grooming", 45)
            .unwrap()
            .with_recurrence(Recurrence::Weekly)
            .with_last_completed(noon() - Duration::days(10));
        let days = stale.days_overdue(noon()).unwrap();
        assert!((days - 3.0).abs() < 1e-9);
    }
}

//! Greedy placement engine.
//!
//! # Algorithm
//!
//! 1. Score every task against the initial free pool; partition into
//!    required and optional.
//! 2. Order required by score descending, then optional by score
//!    descending; ties break by ascending task id for determinism.
//! 3. For each task: check dependencies, scan the free pool for the
//!    first fitting interval (preferred intervals first), place at the
//!    interval start, split off the consumed head and keep the tail.
//! 4. Insert placements into the plan (ordered insert), compute
//!    utilization, scan for conflicts, assemble the narrative.
//!
//! No anomaly aborts a pass: every failure degrades to an unscheduled
//! task plus a warning and a log line.
//!
//! # Complexity
//! O(n log n) ordering + O(n * w) placement for n tasks and w free
//! intervals.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::models::{CareTask, DailyPlan, PlacedTask, PlacementFailure, TimeInterval};
use crate::scoring::{ScoringContext, TaskScorer};

/// Greedy care planner with pass-local diagnostics.
///
/// A pass is a pure function of (free intervals, task pool, date,
/// reference time). The engine keeps only the most recent plan, swapped
/// in whole at the end of a pass, behind the [`explain`](Self::explain)
/// and [`warnings`](Self::warnings) accessors.
#[derive(Debug, Clone, Default)]
pub struct PlanningEngine {
    scorer: TaskScorer,
    reference: Option<NaiveDateTime>,
    last_plan: Option<DailyPlan>,
}

impl PlanningEngine {
    /// Creates an engine with the standard five-factor scorer.
    pub fn new() -> Self {
        Self {
            scorer: TaskScorer::default(),
            reference: None,
            last_plan: None,
        }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: TaskScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Pins the reference "now" used for overdue and recency scoring.
    ///
    /// Unpinned engines use the wall clock at the start of each pass.
    pub fn with_reference_time(mut self, reference: NaiveDateTime) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Runs one planning pass.
    ///
    /// `free_intervals` are trusted to be chronologically sorted and
    /// pairwise disjoint (the identity collaborator guarantees this);
    /// the pass works on its own copy and never mutates caller state.
    pub fn generate_plan(
        &mut self,
        free_intervals: &[TimeInterval],
        tasks: &[CareTask],
        date: NaiveDate,
    ) -> DailyPlan {
        let reference = self
            .reference
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        let mut pool: Vec<TimeInterval> = free_intervals.to_vec();
        let mut plan = DailyPlan::new(date);
        plan.total_available_minutes = pool.iter().map(|w| w.duration_minutes()).sum();

        let mut log: Vec<String> = vec![format!(
            "Planning {date}: {} free interval(s) totalling {} min, {} task(s).",
            pool.len(),
            plan.total_available_minutes,
            tasks.len()
        )];
        let mut warnings: Vec<String> = Vec::new();

        // Scores are computed once, against the initial pool.
        let context = ScoringContext::at(reference).with_free_intervals(pool.clone());
        let ordered = self.order_tasks(tasks, &context);

        // Completion state of the pool, for dependency gating.
        let completed: HashSet<&str> = tasks
            .iter()
            .filter(|t| t.last_completed.is_some())
            .map(|t| t.id.as_str())
            .collect();

        let mut placements: Vec<PlacedTask> = Vec::new();

        for (task, score) in ordered {
            if let Some(unmet) = task
                .dependency_ids
                .iter()
                .find(|dep| !completed.contains(dep.as_str()))
            {
                debug!(task = %task.id, dependency = %unmet, "dependency unmet");
                warnings.push(format!(
                    "Task '{}' skipped: dependency '{}' is not complete",
                    task.id, unmet
                ));
                log.push(format!(
                    "Skipped '{}' ({}): dependency '{}' unmet.",
                    task.id, task.title, unmet
                ));
                plan.mark_unscheduled(task, PlacementFailure::DependencyUnmet);
                continue;
            }

            let Some((idx, preferred)) = find_slot(&pool, task) else {
                debug!(task = %task.id, minutes = task.duration_minutes, "no fitting window");
                warnings.push(format!(
                    "Task '{}' ({} min) left unscheduled: no fitting window",
                    task.id, task.duration_minutes
                ));
                log.push(format!(
                    "Could not place '{}' ({} min): no fitting window.",
                    task.id, task.duration_minutes
                ));
                plan.mark_unscheduled(task, PlacementFailure::NoFittingWindow);
                continue;
            };

            // Place at the interval start; fragmentation stays monotonic.
            let window = pool.remove(idx);
            let reason = placement_reason(task, preferred, reference);
            let placed = PlacedTask::new(task, window.start(), reason);

            if placed.end < window.end() {
                // The split point is strictly inside: end < window.end
                // and duration >= 1 puts it past window.start.
                if let Ok((_, tail)) = window.split_at(placed.end) {
                    pool.insert(idx, tail);
                }
            }
            trace!(task = %task.id, remaining = pool.len(), "free pool after placement");

            debug!(
                task = %task.id,
                start = %placed.start,
                end = %placed.end,
                score,
                "placed"
            );
            log.push(format!(
                "Placed '{}' at {}-{} (score {:.2}: {}).",
                task.id,
                placed.start.format("%H:%M"),
                placed.end.format("%H:%M"),
                score,
                placed.reason
            ));
            placements.push(placed);
        }

        for placed in placements {
            plan.insert(placed);
        }

        for conflict in plan.conflicts() {
            warnings.push(format!("Conflict: {conflict}"));
        }

        log.push(format!(
            "Scheduled {} task(s), {} unscheduled; {} of {} min used ({:.1}% utilization).",
            plan.placed().len(),
            plan.unscheduled.len(),
            plan.total_scheduled_minutes(),
            plan.total_available_minutes,
            plan.utilization_pct()
        ));

        plan.explanation = log.join("\n");
        plan.warnings = warnings;

        // Swapped in one assignment; a concurrent reader of a prior
        // reference never observes a half-built pass.
        self.last_plan = Some(plan.clone());
        plan
    }

    /// Decision narrative of the most recent pass.
    pub fn explain(&self) -> &str {
        self.last_plan
            .as_ref()
            .map(|p| p.explanation.as_str())
            .unwrap_or("")
    }

    /// Warnings of the most recent pass.
    pub fn warnings(&self) -> &[String] {
        self.last_plan
            .as_ref()
            .map(|p| p.warnings.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the most recent pass produced warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings().is_empty()
    }

    /// Required tasks by score descending, then optional by score
    /// descending; ties by ascending id.
    fn order_tasks<'a>(
        &self,
        tasks: &'a [CareTask],
        context: &ScoringContext,
    ) -> Vec<(&'a CareTask, f64)> {
        let mut required: Vec<(&CareTask, f64)> = Vec::new();
        let mut optional: Vec<(&CareTask, f64)> = Vec::new();
        for task in tasks {
            let scored = (task, self.scorer.score(task, context));
            if task.required {
                required.push(scored);
            } else {
                optional.push(scored);
            }
        }
        let by_score_desc = |a: &(&CareTask, f64), b: &(&CareTask, f64)| {
            b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id))
        };
        required.sort_by(by_score_desc);
        optional.sort_by(by_score_desc);
        required.extend(optional);
        required
    }
}

/// Finds the index of the interval to place `task` in.
///
/// First pass prefers an interval whose placement slot lies inside one
/// of the task's preferred intervals; second pass takes the earliest
/// fitting interval. Returns `(index, used_preferred)`.
fn find_slot(pool: &[TimeInterval], task: &CareTask) -> Option<(usize, bool)> {
    if !task.preferred_intervals.is_empty() {
        for (idx, window) in pool.iter().enumerate() {
            if !window.fits(task.duration_minutes) {
                continue;
            }
            let slot_end = window.start() + Duration::minutes(task.duration_minutes);
            let in_preferred = task
                .preferred_intervals
                .iter()
                .any(|p| p.start() <= window.start() && slot_end <= p.end());
            if in_preferred {
                return Some((idx, true));
            }
        }
    }
    pool.iter()
        .position(|w| w.fits(task.duration_minutes))
        .map(|idx| (idx, false))
}

/// Short rationale for a placement: priority, required, overdue, slot.
fn placement_reason(task: &CareTask, preferred: bool, reference: NaiveDateTime) -> String {
    let mut parts = vec![format!("{} priority", task.priority.label())];
    if task.required {
        parts.push("required".to_string());
    }
    if let Some(days) = task.days_overdue(reference) {
        parts.push(format!("overdue {:.0} day(s)", days));
    }
    parts.push(if preferred {
        "preferred window".to_string()
    } else {
        "earliest fit".to_string()
    });
    parts.join(", ")
}

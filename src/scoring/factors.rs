//! Built-in score factors.
//!
//! The five factors composed by [`TaskScorer::default`](super::TaskScorer):
//!
//! | Factor | Range | Source |
//! |--------|-------|--------|
//! | [`PriorityBase`] | +1.0 .. +4.0 | task priority |
//! | [`RequiredBonus`] | 0 / +2.0 | required flag |
//! | [`OverdueBonus`] | 0 .. +3.0 | days past the recurrence due date |
//! | [`WindowFit`] | 0 .. +0.5 | tightness of the best free interval |
//! | [`RecencyPenalty`] | −1.0 .. 0 | completion within the last half-period |

use super::{ScoreFactor, ScoringContext};
use crate::models::CareTask;

/// Cap on the overdue bonus.
pub const OVERDUE_BONUS_CAP: f64 = 3.0;

/// Bonus per day overdue, before the cap.
pub const OVERDUE_BONUS_PER_DAY: f64 = 0.5;

/// Priority base value: Low=1, Medium=2, High=3, Critical=4.
#[derive(Debug, Clone, Copy)]
pub struct PriorityBase;

impl ScoreFactor for PriorityBase {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn evaluate(&self, task: &CareTask, _context: &ScoringContext) -> f64 {
        task.priority.base_score()
    }
}

/// Flat +2.0 for required tasks.
#[derive(Debug, Clone, Copy)]
pub struct RequiredBonus;

impl ScoreFactor for RequiredBonus {
    fn name(&self) -> &'static str {
        "required"
    }

    fn evaluate(&self, task: &CareTask, _context: &ScoringContext) -> f64 {
        if task.required {
            2.0
        } else {
            0.0
        }
    }
}

/// `min(0.5 * days_overdue, 3.0)`, zero when not overdue.
///
/// Non-decreasing in days overdue, saturating at the cap, so a badly
/// stale Medium task can outrank a fresh High one but never by more
/// than +3.0.
#[derive(Debug, Clone, Copy)]
pub struct OverdueBonus;

impl ScoreFactor for OverdueBonus {
    fn name(&self) -> &'static str {
        "overdue"
    }

    fn evaluate(&self, task: &CareTask, context: &ScoringContext) -> f64 {
        task.days_overdue(context.reference)
            .map(|days| (OVERDUE_BONUS_PER_DAY * days).min(OVERDUE_BONUS_CAP))
            .unwrap_or(0.0)
    }
}

/// Up to +0.5 when the task's duration closely matches the tightest
/// currently free interval.
///
/// A task filling its best interval entirely scores the full +0.5; one
/// leaving most of the interval empty scores near zero. Zero when no
/// interval fits.
#[derive(Debug, Clone, Copy)]
pub struct WindowFit;

impl ScoreFactor for WindowFit {
    fn name(&self) -> &'static str {
        "window-fit"
    }

    fn evaluate(&self, task: &CareTask, context: &ScoringContext) -> f64 {
        match context.best_fit(task.duration_minutes) {
            Some(window) => {
                0.5 * task.duration_minutes as f64 / window.duration_minutes() as f64
            }
            None => 0.0,
        }
    }
}

/// Negative adjustment for recurring tasks completed very recently.
///
/// Scales linearly from −1.0 (just completed) to 0 at half the nominal
/// period, discouraging premature re-scheduling of a just-completed
/// recurring task. Zero for AsNeeded and never-completed tasks.
#[derive(Debug, Clone, Copy)]
pub struct RecencyPenalty;

impl ScoreFactor for RecencyPenalty {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn evaluate(&self, task: &CareTask, context: &ScoringContext) -> f64 {
        let Some(period) = task.recurrence.period_days() else {
            return 0.0;
        };
        let Some(elapsed) = task.days_since_completed(context.reference) else {
            return 0.0;
        };
        let half = period / 2.0;
        if elapsed >= 0.0 && elapsed < half {
            -(1.0 - elapsed / half)
        } else {
            0.0
        }
    }
}

//! Additive score composition.

use std::sync::Arc;

use super::factors::{OverdueBonus, PriorityBase, RecencyPenalty, RequiredBonus, WindowFit};
use super::{ScoreFactor, ScoringContext};
use crate::models::CareTask;

/// Composes [`ScoreFactor`]s into one additive score.
///
/// The default scorer carries the five standard factors; custom factor
/// sets are possible but the score stays a pure sum — ordering is the
/// planner's job.
#[derive(Debug, Clone)]
pub struct TaskScorer {
    factors: Vec<Arc<dyn ScoreFactor>>,
}

impl TaskScorer {
    /// Creates a scorer with no factors (every task scores 0).
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Adds a factor.
    pub fn with_factor<F: ScoreFactor + 'static>(mut self, factor: F) -> Self {
        self.factors.push(Arc::new(factor));
        self
    }

    /// Sum of all factor contributions.
    pub fn score(&self, task: &CareTask, context: &ScoringContext) -> f64 {
        self.factors
            .iter()
            .map(|f| f.evaluate(task, context))
            .sum()
    }

    /// Per-factor contributions, in factor order.
    pub fn breakdown(&self, task: &CareTask, context: &ScoringContext) -> Vec<(&'static str, f64)> {
        self.factors
            .iter()
            .map(|f| (f.name(), f.evaluate(task, context)))
            .collect()
    }
}

impl Default for TaskScorer {
    /// The standard five-factor scorer.
    fn default() -> Self {
        Self::new()
            .with_factor(PriorityBase)
            .with_factor(RequiredBonus)
            .with_factor(OverdueBonus)
            .with_factor(WindowFit)
            .with_factor(RecencyPenalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Recurrence, TimeInterval};
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_scorer_sums_factors() {
        let window = TimeInterval::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap();
        let ctx = ScoringContext::at(noon()).with_free_intervals(vec![window]);

        // High + required + full window fit, AsNeeded so no overdue/recency.
        let task = CareTask::new("walk", "Walk", 60)
            .unwrap()
            .with_priority(Priority::High)
            .with_required(true);
        let score = TaskScorer::default().score(&task, &ctx);
        assert!((score - (3.0 + 2.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_stale_medium_outranks_fresh_high() {
        // Medium done 10 days ago (Daily) vs High done yesterday
        // (Daily): the capped overdue bonus flips the order.
        let ctx = ScoringContext::at(noon());
        let scorer = TaskScorer::default();

        let medium = CareTask::new("brush", "Brush", 10)
            .unwrap()
            .with_priority(Priority::Medium)
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(noon() - Duration::days(10));
        let high = CareTask::new("play", "Play", 10)
            .unwrap()
            .with_priority(Priority::High)
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(noon() - Duration::days(1));

        let m = scorer.score(&medium, &ctx); // 2 + min(0.5*9, 3) = 5
        let h = scorer.score(&high, &ctx); // 3, not overdue (1 day = period)
        assert!(m > h, "medium {m} should outrank high {h}");
    }

    #[test]
    fn test_breakdown_names() {
        let ctx = ScoringContext::at(noon());
        let task = CareTask::new("t", "T", 30).unwrap();
        let names: Vec<&str> = TaskScorer::default()
            .breakdown(&task, &ctx)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(
            names,
            vec!["priority", "required", "overdue", "window-fit", "recency"]
        );
    }

    #[test]
    fn test_empty_scorer() {
        let ctx = ScoringContext::at(noon());
        let task = CareTask::new("t", "T", 30).unwrap();
        assert_eq!(TaskScorer::new().score(&task, &ctx), 0.0);
    }
}

//! Scoring context for factor evaluation.

use chrono::NaiveDateTime;

use crate::models::TimeInterval;

/// Pass-local state visible to score factors.
///
/// Carries the reference instant (the planner's "now") and a snapshot of
/// the currently free intervals, which the window-fit factor measures
/// tasks against.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// Reference instant for overdue and recency computations.
    pub reference: NaiveDateTime,
    /// Currently free intervals, chronologically ordered.
    pub free_intervals: Vec<TimeInterval>,
}

impl ScoringContext {
    /// Creates a context at the given instant with no free intervals.
    pub fn at(reference: NaiveDateTime) -> Self {
        Self {
            reference,
            free_intervals: Vec::new(),
        }
    }

    /// Sets the free-interval snapshot.
    pub fn with_free_intervals(mut self, intervals: Vec<TimeInterval>) -> Self {
        self.free_intervals = intervals;
        self
    }

    /// The tightest free interval that fits `duration_minutes`.
    pub fn best_fit(&self, duration_minutes: i64) -> Option<&TimeInterval> {
        self.free_intervals
            .iter()
            .filter(|w| w.fits(duration_minutes))
            .min_by_key(|w| w.duration_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn iv(sh: u32, eh: u32) -> TimeInterval {
        TimeInterval::new(
            NaiveTime::from_hms_opt(sh, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_best_fit_prefers_tightest() {
        let ctx = ScoringContext::at(
            NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
        .with_free_intervals(vec![iv(7, 9), iv(12, 13), iv(17, 20)]);

        // 45 min fits everywhere; the 60-min lunch window is tightest.
        let best = ctx.best_fit(45).unwrap();
        assert_eq!(best.duration_minutes(), 60);
        // 150 min only fits the evening block.
        assert_eq!(ctx.best_fit(150).unwrap().duration_minutes(), 180);
        // Nothing fits 300 min.
        assert!(ctx.best_fit(300).is_none());
    }
}

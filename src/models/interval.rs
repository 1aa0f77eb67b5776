//! Time interval model.
//!
//! A [`TimeInterval`] is a half-open clock-time range `[start, end)` within
//! a single day. The duration in minutes is computed once at construction
//! and cached, so every derived query is O(1).
//!
//! # Half-open semantics
//! `start` is included, `end` is excluded: two intervals that merely touch
//! (`a.end == b.start`) do not overlap, and a task ending exactly at `end`
//! fits the interval.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// A half-open clock-time interval `[start, end)` with cached duration.
///
/// Value type: copied freely, no shared mutable state. Construction
/// enforces `start < end`, so the cached duration is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Interval start (inclusive).
    start: NaiveTime,
    /// Interval end (exclusive).
    end: NaiveTime,
    /// Duration in whole minutes, derived at construction.
    duration_minutes: i64,
}

impl TimeInterval {
    /// Creates a new interval.
    ///
    /// # Errors
    /// [`PlanError::EmptyInterval`] if `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, PlanError> {
        if start >= end {
            return Err(PlanError::EmptyInterval { start, end });
        }
        let duration_minutes = end.signed_duration_since(start).num_minutes();
        Ok(Self {
            start,
            end,
            duration_minutes,
        })
    }

    /// Interval start (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Duration of this interval in minutes. O(1), cached.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Whether an instant falls within this interval (`start <= t < end`).
    #[inline]
    pub fn contains(&self, instant: NaiveTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether two half-open intervals intersect.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a task of `duration_minutes` fits entirely in this interval.
    #[inline]
    pub fn fits(&self, duration_minutes: i64) -> bool {
        duration_minutes <= self.duration_minutes
    }

    /// Splits the interval at a strictly interior point.
    ///
    /// Returns `([start, at), [at, end))`; the two durations always sum to
    /// the original.
    ///
    /// # Errors
    /// [`PlanError::SplitOutOfRange`] if `at` is at or outside the
    /// boundaries.
    pub fn split_at(&self, at: NaiveTime) -> Result<(Self, Self), PlanError> {
        if at <= self.start || at >= self.end {
            return Err(PlanError::SplitOutOfRange {
                start: self.start,
                end: self.end,
                at,
            });
        }
        // Both halves are non-empty by the check above.
        Ok((Self::new(self.start, at)?, Self::new(at, self.end)?))
    }

    /// Overlap range of two intervals, `None` if they do not intersect.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            // Non-empty by construction.
            Self::new(start, end).ok()
        } else {
            None
        }
    }
}

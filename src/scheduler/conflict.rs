//! Overlap detection between a candidate slot and the demos already on the
//! calendar.
//!
//! Intervals are half-open: a demo ending at 10:00 and another starting at
//! 10:00 do not conflict. The server stays the authority; this reproduces
//! its answer so the form can react before the round trip.

use crate::core::aliases::DemoId;
use crate::core::models::{LabelledInterval, ScheduledInterval};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub id: DemoId,
    pub label: String,
    pub interval: ScheduledInterval,
    pub overlap_minutes: i64,
}

/// Conflicts ordered by start time, then id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet(Vec<Conflict>);

impl ConflictSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Conflict> {
        self.0.iter()
    }
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.label.as_str()).collect()
    }
    pub fn into_vec(self) -> Vec<Conflict> {
        self.0
    }
}

impl FromIterator<Conflict> for ConflictSet {
    fn from_iter<I: IntoIterator<Item = Conflict>>(iter: I) -> Self {
        let mut v: Vec<Conflict> = iter.into_iter().collect();
        v.sort_by(|a, b| {
            a.interval
                .start()
                .cmp(&b.interval.start())
                .then_with(|| a.id.cmp(&b.id))
        });
        ConflictSet(v)
    }
}

/// `a.start < b.end && b.start < a.end`. Symmetric.
pub fn overlaps(a: &ScheduledInterval, b: &ScheduledInterval) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// Minutes shared by two intervals; zero when they do not overlap.
pub fn overlap_minutes(a: &ScheduledInterval, b: &ScheduledInterval) -> i64 {
    if !overlaps(a, b) {
        return 0;
    }
    let start = a.start().max(b.start());
    let end = a.end().min(b.end());
    (end - start).num_minutes()
}

/// Every entry of `existing` overlapping `candidate`, skipping `exclude_id`
/// (the demo being edited).
pub fn find_conflicts(
    candidate: &ScheduledInterval,
    existing: &[LabelledInterval],
    exclude_id: Option<&str>,
) -> ConflictSet {
    existing
        .iter()
        .filter(|other| exclude_id != Some(other.id.as_str()))
        .filter(|other| overlaps(candidate, &other.interval))
        .map(|other| Conflict {
            id: other.id.clone(),
            label: other.label.clone(),
            interval: other.interval,
            overlap_minutes: overlap_minutes(candidate, &other.interval),
        })
        .collect()
}

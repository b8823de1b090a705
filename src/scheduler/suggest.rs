use crate::core::models::{LabelledInterval, ScheduledInterval};
use crate::errors::Result;
use crate::scheduler::conflict::find_conflicts;
use crate::extensions::chrono::UtcExt;
use chrono::{DateTime, Utc};

pub const DEFAULT_SUGGEST_INCREMENT: u32 = 30;
/// Upper bound on the steps `suggest_free_slot` takes: one day of 30-minute
/// steps.
pub const DEFAULT_MAX_STEPS: u32 = 48;

/// The next start to offer after `preferred` clashed: one increment later.
///
/// The result is not checked against the calendar; it may clash too. Use
/// [`suggest_free_slot`] when a clash-free answer is needed. `None` past the
/// end of the calendar.
pub fn suggest_next(preferred: DateTime<Utc>, increment_minutes: u32) -> Option<DateTime<Utc>> {
    preferred.plus_minutes(increment_minutes as i64)
}

/// Step forward from `preferred` by `increment_minutes` until a start is
/// found whose `duration_minutes` block overlaps nothing in `existing`.
/// `preferred` itself is tried first. Gives up after `max_steps` steps, or
/// when the next step would run past the end of the calendar.
pub fn suggest_free_slot(
    preferred: DateTime<Utc>,
    duration_minutes: u32,
    existing: &[LabelledInterval],
    exclude_id: Option<&str>,
    increment_minutes: u32,
    max_steps: u32,
) -> Result<Option<DateTime<Utc>>> {
    let mut candidate = ScheduledInterval::new(preferred, duration_minutes)?;
    for _ in 0..=max_steps {
        if find_conflicts(&candidate, existing, exclude_id).is_empty() {
            return Ok(Some(candidate.start()));
        }
        let Some(next) = suggest_next(candidate.start(), increment_minutes) else {
            break;
        };
        match candidate.moved_to(next) {
            Ok(moved) => candidate = moved,
            Err(_) => break,
        }
    }
    Ok(None)
}

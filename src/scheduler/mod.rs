use crate::config::Config;
use crate::core::aliases::RequestSeq;
use crate::core::models::{Demo, ScheduledInterval};
use crate::core::repository::DemoBook;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use crate::scheduler::conflict::{ConflictSet, find_conflicts};
use crate::scheduler::drag::GridGeometry;
use crate::scheduler::suggest::{DEFAULT_MAX_STEPS, suggest_free_slot, suggest_next};
use crate::scheduler::time_window::{DisplayState, TimeFlags, can_start, classify};
use chrono::{DateTime, NaiveDate, Utc};

pub mod calendar_view;
pub mod conflict;
pub mod conflict_check;
pub mod drag;
pub mod suggest;
pub mod time_window;
#[cfg(test)]
mod tests;

/// Observer to capture scheduling decisions (e.g., for logging).
pub trait ScheduleObserver {
    fn local_conflicts(&self, candidate: &ScheduledInterval, conflicts: &ConflictSet);
    fn conflicts_checked(&self, seq: RequestSeq, conflicts: &ConflictSet);
    fn stale_response_dropped(&self, seq: RequestSeq, latest: RequestSeq);
}

pub struct LoggerObserver {
    logger: Logger,
}

impl LoggerObserver {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl ScheduleObserver for LoggerObserver {
    fn local_conflicts(&self, candidate: &ScheduledInterval, conflicts: &ConflictSet) {
        if conflicts.is_empty() {
            return;
        }
        self.logger.info(
            format!(
                "{} conflicts with {} demo(s): {}",
                candidate,
                conflicts.len(),
                conflicts.labels().join(", ")
            ),
            LogTarget::FileOnly,
        );
    }

    fn conflicts_checked(&self, seq: RequestSeq, conflicts: &ConflictSet) {
        self.logger.info(
            format!(
                "Conflict check #{} answered with {} conflict(s)",
                seq,
                conflicts.len()
            ),
            LogTarget::FileOnly,
        );
    }

    fn stale_response_dropped(&self, seq: RequestSeq, latest: RequestSeq) {
        self.logger.warn(
            format!("Dropping conflict response #{seq}; latest request is #{latest}"),
            LogTarget::FileOnly,
        );
    }
}

/// Answer to "this slot is taken, what now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// One increment after the preferred start; may itself clash. `None`
    /// past the end of the calendar.
    pub next: Option<DateTime<Utc>>,
    /// First clash-free start, if one exists within the step limit.
    pub free: Option<DateTime<Utc>>,
}

/// One row of the agenda list.
#[derive(Debug, Clone)]
pub struct AgendaEntry<'a> {
    pub demo: &'a Demo,
    pub flags: TimeFlags,
    pub display_state: DisplayState,
    pub can_start: bool,
}

/// Calendar operations wired to the configured grid and increments.
pub struct Scheduler {
    geometry: GridGeometry,
    suggest_increment: u32,
    observer: LoggerObserver,
}

impl Scheduler {
    pub fn new(config: &Config, logger: &Logger) -> Result<Self> {
        Ok(Self {
            geometry: GridGeometry::from_config(config)?,
            suggest_increment: config.suggest_increment_minutes(),
            observer: LoggerObserver::new(logger.clone()),
        })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn observer(&self) -> &dyn ScheduleObserver {
        &self.observer
    }

    /// Conflicts for `candidate` against what the book already holds.
    pub fn check_local(
        &self,
        candidate: &ScheduledInterval,
        book: &DemoBook,
        exclude_id: Option<&str>,
    ) -> ConflictSet {
        let conflicts = find_conflicts(candidate, &book.occupied(), exclude_id);
        self.observer.local_conflicts(candidate, &conflicts);
        conflicts
    }

    pub fn suggest(
        &self,
        candidate: &ScheduledInterval,
        book: &DemoBook,
        exclude_id: Option<&str>,
    ) -> Result<Suggestion> {
        let free = suggest_free_slot(
            candidate.start(),
            candidate.duration_minutes(),
            &book.occupied(),
            exclude_id,
            self.suggest_increment,
            DEFAULT_MAX_STEPS,
        )?;
        Ok(Suggestion {
            next: suggest_next(candidate.start(), self.suggest_increment),
            free,
        })
    }

    /// Where `demo` lands when dropped `relative_y` pixels into the column
    /// for `date`. Duration is kept.
    pub fn drop_at(&self, demo: &Demo, date: NaiveDate, relative_y: f32) -> Result<ScheduledInterval> {
        let start = self.geometry.pixel_to_time(relative_y).on_date(date)?;
        demo.interval()?.moved_to(start)
    }

    /// Every demo in start order with its time flags at `now`.
    pub fn agenda<'a>(&self, book: &'a DemoBook, now: DateTime<Utc>) -> Vec<AgendaEntry<'a>> {
        book.chronological()
            .into_iter()
            .map(|demo| match demo.interval() {
                Ok(interval) => {
                    let flags = classify(&interval, demo.status, now);
                    AgendaEntry {
                        demo,
                        flags,
                        display_state: flags.display_state(demo.status),
                        can_start: can_start(&interval, demo.status, now),
                    }
                }
                Err(_) => AgendaEntry {
                    demo,
                    flags: TimeFlags::default(),
                    display_state: DisplayState::Status(demo.status),
                    can_start: false,
                },
            })
            .collect()
    }
}

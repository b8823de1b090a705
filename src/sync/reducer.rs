use crate::core::aliases::DemoId;
use crate::core::repository::DemoBook;
use crate::logging::{LogTarget, Logger};
use crate::notify::Notification;
use crate::sync::events::{EventQueue, PushEvent};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReducerOutcome {
    Inserted(String),
    Updated(String),
    Removed(String),
    StatusChanged(String),
    /// Nothing changed: duplicate, out of date or unknown id.
    Ignored(String),
    Notify(Notification),
}

/// Applies push events to one demo book.
///
/// Replaying any event, even after later ones, leaves the book as it was.
/// Every applied create, update or status change is remembered by its wire
/// form, and deleted ids keep a tombstone with the stamp they had, so only a
/// strictly newer copy can bring them back.
pub struct DemoReducer {
    logger: Logger,
    applied: HashSet<String>,
    tombstones: HashMap<DemoId, Option<DateTime<Utc>>>,
}

impl DemoReducer {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            applied: HashSet::new(),
            tombstones: HashMap::new(),
        }
    }

    pub fn apply(&mut self, book: &mut DemoBook, event: PushEvent) -> ReducerOutcome {
        let fingerprint = serde_json::to_string(&event).ok();
        let outcome = match &fingerprint {
            Some(key) if self.applied.contains(key) => {
                ReducerOutcome::Ignored(event.demo_id().to_string())
            }
            _ => self.reduce(book, event),
        };
        let changed = matches!(
            outcome,
            ReducerOutcome::Inserted(_) | ReducerOutcome::Updated(_) | ReducerOutcome::StatusChanged(_)
        );
        if let (true, Some(key)) = (changed, fingerprint) {
            self.applied.insert(key);
        }
        self.log(&outcome);
        outcome
    }

    fn reduce(&mut self, book: &mut DemoBook, event: PushEvent) -> ReducerOutcome {
        match event {
            PushEvent::DemoCreated(demo) | PushEvent::DemoUpdated(demo) => {
                let id = demo.id.clone();
                if let Some(gone) = self.tombstones.get(&id) {
                    let revived = matches!(
                        (gone, demo.updated_at),
                        (Some(gone), Some(theirs)) if theirs > *gone
                    );
                    if !revived {
                        return ReducerOutcome::Ignored(id);
                    }
                    self.tombstones.remove(&id);
                }
                let newer = book
                    .get(&id)
                    .ok()
                    .map(|existing| *existing != demo && existing.is_superseded_by(&demo));
                match newer {
                    None => {
                        book.upsert(demo);
                        ReducerOutcome::Inserted(id)
                    }
                    Some(true) => {
                        book.upsert(demo);
                        ReducerOutcome::Updated(id)
                    }
                    Some(false) => ReducerOutcome::Ignored(id),
                }
            }
            PushEvent::DemoDeleted(r) => match book.remove(&r.id) {
                Some(removed) => {
                    self.tombstones.insert(r.id.clone(), removed.updated_at);
                    ReducerOutcome::Removed(r.id)
                }
                None => ReducerOutcome::Ignored(r.id),
            },
            PushEvent::DemoStatusChanged(change) => match book.get_mut(&change.id) {
                Ok(demo) => {
                    let stale = matches!(
                        (demo.updated_at, change.updated_at),
                        (Some(mine), Some(theirs)) if theirs < mine
                    );
                    if stale || demo.status == change.status {
                        ReducerOutcome::Ignored(change.id)
                    } else {
                        demo.status = change.status;
                        if change.updated_at.is_some() {
                            demo.updated_at = change.updated_at;
                        }
                        ReducerOutcome::StatusChanged(change.id)
                    }
                }
                Err(_) => ReducerOutcome::Ignored(change.id),
            },
            PushEvent::DemoReminder(r) => {
                let who = if r.lead_name.trim().is_empty() {
                    r.demo_id.as_str()
                } else {
                    r.lead_name.as_str()
                };
                ReducerOutcome::Notify(Notification::info(format!(
                    "Demo with {} starts in {} minutes ({}).",
                    who,
                    r.minutes_before,
                    r.scheduled_at.format("%H:%M")
                )))
            }
        }
    }

    /// Apply everything queued, oldest first.
    pub fn drain(&mut self, queue: &mut EventQueue, book: &mut DemoBook) -> Vec<ReducerOutcome> {
        let mut outcomes = Vec::with_capacity(queue.len());
        while let Some(event) = queue.pop() {
            outcomes.push(self.apply(book, event));
        }
        outcomes
    }

    fn log(&self, outcome: &ReducerOutcome) {
        let line = match outcome {
            ReducerOutcome::Inserted(id) => format!("Push: demo '{id}' added"),
            ReducerOutcome::Updated(id) => format!("Push: demo '{id}' updated"),
            ReducerOutcome::Removed(id) => format!("Push: demo '{id}' removed"),
            ReducerOutcome::StatusChanged(id) => format!("Push: demo '{id}' changed status"),
            ReducerOutcome::Ignored(id) => format!("Push: event for demo '{id}' ignored"),
            ReducerOutcome::Notify(n) => format!("Push: reminder {}", n.message),
        };
        self.logger.info(line, LogTarget::FileOnly);
    }
}

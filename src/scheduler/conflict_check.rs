use crate::api::DemoApi;
use crate::config::Config;
use crate::core::aliases::{DemoId, RequestSeq};
use crate::core::models::ScheduledInterval;
use crate::core::observable::Observable;
use crate::errors::Result;
use crate::scheduler::ScheduleObserver;
use crate::scheduler::conflict::{Conflict, ConflictSet, overlap_minutes};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
struct PendingCheck {
    candidate: ScheduledInterval,
    exclude_id: Option<DemoId>,
    due: Instant,
}

/// A conflict request that left the debounce queue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedCheck {
    pub seq: RequestSeq,
    pub candidate: ScheduledInterval,
    pub exclude_id: Option<DemoId>,
}

/// Debounced, sequenced conflict checks for the scheduling form.
///
/// Every edit reschedules the pending check; only once the form has been
/// quiet for `debounce` does `poll` hand out a request. Each request carries
/// a sequence number and `accept` ignores answers to anything but the most
/// recent one, so a slow reply can never overwrite a newer result.
pub struct ConflictChecker {
    debounce: Duration,
    pending: Option<PendingCheck>,
    next_seq: RequestSeq,
    latest_issued: Option<RequestSeq>,
    current: Observable<ConflictSet>,
}

impl ConflictChecker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            next_seq: 1,
            latest_issued: None,
            current: Observable::new(ConflictSet::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_millis(config.conflict_debounce_ms()))
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Record an edit made at `at`. Replaces any check still waiting.
    pub fn schedule(&mut self, candidate: ScheduledInterval, exclude_id: Option<&str>, at: Instant) {
        self.pending = Some(PendingCheck {
            candidate,
            exclude_id: exclude_id.map(str::to_string),
            due: at + self.debounce,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Issue the pending check if its quiet period is over at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<IssuedCheck> {
        match &self.pending {
            Some(p) if now >= p.due => {}
            _ => return None,
        }
        let pending = self.pending.take()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_issued = Some(seq);
        Some(IssuedCheck {
            seq,
            candidate: pending.candidate,
            exclude_id: pending.exclude_id,
        })
    }

    /// Store the answer to request `seq`. Returns false, leaving the current
    /// result untouched, when a newer request has been issued since.
    pub fn accept(
        &mut self,
        seq: RequestSeq,
        conflicts: ConflictSet,
        observer: &dyn ScheduleObserver,
    ) -> bool {
        match self.latest_issued {
            Some(latest) if seq == latest => {
                observer.conflicts_checked(seq, &conflicts);
                self.current.set(conflicts);
                true
            }
            latest => {
                observer.stale_response_dropped(seq, latest.unwrap_or(0));
                false
            }
        }
    }

    pub fn current(&self) -> &ConflictSet {
        self.current.get()
    }

    pub fn results(&mut self) -> &mut Observable<ConflictSet> {
        &mut self.current
    }

    /// Poll, and if a check is due ask `api` and accept the answer.
    /// Returns the issued check, if any.
    pub fn run_due(
        &mut self,
        now: Instant,
        api: &dyn DemoApi,
        observer: &dyn ScheduleObserver,
    ) -> Result<Option<IssuedCheck>> {
        let Some(check) = self.poll(now) else {
            return Ok(None);
        };
        let response = api.conflicts(
            check.candidate.start(),
            check.candidate.end(),
            check.exclude_id.as_deref(),
        )?;
        let conflicts: ConflictSet = response
            .conflicts
            .iter()
            .filter_map(|demo| {
                let interval = demo.interval().ok()?;
                Some(Conflict {
                    id: demo.id.clone(),
                    label: demo.display_name().to_string(),
                    overlap_minutes: overlap_minutes(&check.candidate, &interval),
                    interval,
                })
            })
            .collect();
        self.accept(check.seq, conflicts, observer);
        Ok(Some(check))
    }
}

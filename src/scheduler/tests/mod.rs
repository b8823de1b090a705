
use crate::config::Config;
use crate::core::aliases::RequestSeq;
use crate::core::models::{Demo, ScheduledInterval};
use crate::core::repository::DemoBook;
use crate::core::types::{DemoStatus, DemoType};
use crate::scheduler::ScheduleObserver;
use crate::scheduler::conflict::ConflictSet;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::RefCell;

/// 2099-01-07 10:00 UTC, a Wednesday.
pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2099, 1, 7, 10, 0, 0).unwrap()
}

pub(super) fn at(offset_minutes: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(offset_minutes)
}

pub(super) fn interval(offset_minutes: i64, duration: u32) -> ScheduledInterval {
    ScheduledInterval::new(at(offset_minutes), duration).unwrap()
}

pub(super) fn demo(id: &str, offset_minutes: i64, duration: u32, status: DemoStatus) -> Demo {
    Demo {
        id: id.to_string(),
        lead_id: format!("lead-{id}"),
        lead_name: format!("Lead {id}"),
        scheduled_at: at(offset_minutes),
        duration_minutes: duration,
        status,
        demo_type: DemoType::Online,
        notes: None,
        meeting_link: None,
        assigned_user_id: None,
        category_id: None,
        updated_at: None,
    }
}

pub(super) fn book(demos: Vec<Demo>) -> DemoBook {
    let mut book = DemoBook::new("Demo");
    book.replace_all(demos);
    book
}

pub(super) fn default_config() -> Config {
    Config::with_defaults(std::env::temp_dir().join("democal-scheduler-unused.json"))
}

#[derive(Default)]
pub(super) struct RecordingObserver {
    pub events: RefCell<Vec<String>>,
}

impl ScheduleObserver for RecordingObserver {
    fn local_conflicts(&self, candidate: &ScheduledInterval, conflicts: &ConflictSet) {
        self.events
            .borrow_mut()
            .push(format!("local {} {}", candidate.duration_minutes(), conflicts.len()));
    }

    fn conflicts_checked(&self, seq: RequestSeq, conflicts: &ConflictSet) {
        self.events
            .borrow_mut()
            .push(format!("checked {} {}", seq, conflicts.len()));
    }

    fn stale_response_dropped(&self, seq: RequestSeq, latest: RequestSeq) {
        self.events
            .borrow_mut()
            .push(format!("stale {seq} {latest}"));
    }
}

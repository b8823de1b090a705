use crate::core::models::ScheduledInterval;
use crate::core::types::DemoStatus;
use crate::extensions::chrono::UtcExt;
use chrono::{DateTime, Duration, Utc};

pub const IMMINENT_WINDOW_MINUTES: i64 = 15;
pub const STARTING_SOON_WINDOW_MINUTES: i64 = 60;
/// How early before the scheduled start a demo may be started.
pub const EARLY_START_GRACE_MINUTES: i64 = 15;
/// How late after the scheduled start a demo may still be started.
pub const LATE_START_GRACE_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFlags {
    pub overdue: bool,
    pub imminent: bool,
    pub starting_soon: bool,
}

/// What the calendar paints a demo as. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Overdue,
    Imminent,
    StartingSoon,
    Status(DemoStatus),
}

impl TimeFlags {
    pub fn display_state(&self, status: DemoStatus) -> DisplayState {
        if self.overdue {
            DisplayState::Overdue
        } else if self.imminent {
            DisplayState::Imminent
        } else if self.starting_soon {
            DisplayState::StartingSoon
        } else {
            DisplayState::Status(status)
        }
    }

    pub fn any(&self) -> bool {
        self.overdue || self.imminent || self.starting_soon
    }
}

/// Time-based flags for a demo at `now`. Statuses other than scheduled and
/// confirmed never raise any flag. At exactly the start instant nothing is
/// raised: not yet overdue, no longer upcoming.
pub fn classify(interval: &ScheduledInterval, status: DemoStatus, now: DateTime<Utc>) -> TimeFlags {
    if !status.is_pending() {
        return TimeFlags::default();
    }
    let until_start = interval.start() - now;
    let upcoming = until_start > Duration::zero();
    TimeFlags {
        overdue: now > interval.start(),
        imminent: upcoming && until_start <= Duration::minutes(IMMINENT_WINDOW_MINUTES),
        starting_soon: upcoming && until_start <= Duration::minutes(STARTING_SOON_WINDOW_MINUTES),
    }
}

/// Whether `now` falls inside the window in which a start is accepted:
/// `[start - 15min, start + 30min]`, both ends included. A bound past the
/// edge of the calendar leaves that side open.
pub fn can_start(interval: &ScheduledInterval, status: DemoStatus, now: DateTime<Utc>) -> bool {
    let start = interval.start();
    let opens = start.plus_minutes(-EARLY_START_GRACE_MINUTES);
    let closes = start.plus_minutes(LATE_START_GRACE_MINUTES);
    status.is_pending()
        && opens.is_none_or(|opens| now >= opens)
        && closes.is_none_or(|closes| now <= closes)
}

use crate::core::types::DemoStatus;
use crate::scheduler::time_window::DisplayState;

pub const RESET: &str = crate::csi!("0m");

const RED: &str = crate::csi!("38;5;196m");
const ORANGE: &str = crate::csi!("38;5;208m");
const YELLOW: &str = crate::csi!("38;5;220m");
const BLUE: &str = crate::csi!("38;5;33m");
const GREEN: &str = crate::csi!("38;5;34m");
const PURPLE: &str = crate::csi!("38;5;135m");
const GRAY: &str = crate::csi!("38;5;245m");
const DARK_RED: &str = crate::csi!("38;5;124m");

/// Foreground color the calendar uses for a demo in `state`.
pub fn color_for(state: DisplayState) -> &'static str {
    match state {
        DisplayState::Overdue => RED,
        DisplayState::Imminent => ORANGE,
        DisplayState::StartingSoon => YELLOW,
        DisplayState::Status(status) => match status {
            DemoStatus::Scheduled => BLUE,
            DemoStatus::Confirmed => GREEN,
            DemoStatus::InProgress => PURPLE,
            DemoStatus::Completed | DemoStatus::Rescheduled => GRAY,
            DemoStatus::Cancelled | DemoStatus::Missed => DARK_RED,
        },
    }
}

pub fn label_for(state: DisplayState) -> String {
    match state {
        DisplayState::Overdue => "overdue".to_string(),
        DisplayState::Imminent => "imminent".to_string(),
        DisplayState::StartingSoon => "starting soon".to_string(),
        DisplayState::Status(status) => status.to_string().replace('_', " "),
    }
}

/// `label_for(state)` wrapped in its color.
pub fn paint(state: DisplayState) -> String {
    format!("{}{}{}", color_for(state), label_for(state), RESET)
}

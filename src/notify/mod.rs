//! User-facing toasts derived from errors and push events.

use crate::core::types::ApiErrorCode;
use crate::errors::Error;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use strum_macros::{AsRefStr, Display};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

static REJECTION_MESSAGES: Lazy<HashMap<ApiErrorCode, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            ApiErrorCode::OutsideInitiationWindow,
            "This demo can only be started from 15 minutes before until 30 minutes after its scheduled time.",
        ),
        (
            ApiErrorCode::InvalidStatusTransition,
            "The demo cannot move to that status from its current one.",
        ),
        (
            ApiErrorCode::DemoAlreadyStarted,
            "This demo has already been started.",
        ),
        (
            ApiErrorCode::DemoAlreadyCompleted,
            "This demo has already been completed.",
        ),
        (
            ApiErrorCode::SchedulingConflict,
            "Another demo is already scheduled at this time.",
        ),
        (
            ApiErrorCode::LeadNotSchedulable,
            "A demo cannot be scheduled for this lead in its current stage.",
        ),
        (ApiErrorCode::LeadNotFound, "The lead no longer exists."),
    ])
});

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// The message shown for a coded rejection.
pub fn message_for(code: ApiErrorCode) -> &'static str {
    REJECTION_MESSAGES
        .get(&code)
        .copied()
        .unwrap_or(GENERIC_FAILURE)
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Rejections get their specific message, validation problems are shown
    /// as warnings, anything else is a generic failure.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Rejected(code) => Self::error(message_for(*code)),
            Error::Validation { .. } => Self::warning(err.to_string()),
            Error::NotFound { .. } => Self::warning(err.to_string()),
            _ => Self::error(GENERIC_FAILURE),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

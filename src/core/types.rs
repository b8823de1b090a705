use crate::errors::{Error, Result};
use crate::extensions::enums::{parse_variant, valid_csv};
use crate::extensions::string::StrExt;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Missed,
    Rescheduled,
}

impl DemoStatus {
    /// Still waiting to happen. Only these take part in the overdue /
    /// imminent / starting-soon states.
    pub fn is_pending(self) -> bool {
        matches!(self, DemoStatus::Scheduled | DemoStatus::Confirmed)
    }

    /// Whether a demo in this status holds its slot on the calendar.
    pub fn occupies_slot(self) -> bool {
        self.is_pending() || self == DemoStatus::InProgress
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DemoStatus::Completed
                | DemoStatus::Cancelled
                | DemoStatus::Missed
                | DemoStatus::Rescheduled
        )
    }

    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant("demo status", s)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DemoType {
    Online,
    InPerson,
    PhoneCall,
}

impl DemoType {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant("demo type", s)
    }
}

/// Kanban columns of the lead board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    DemoScheduled,
    Negotiation,
    Won,
    Lost,
}

/// Error codes the demos API attaches to business-rule rejections.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    OutsideInitiationWindow,
    InvalidStatusTransition,
    DemoAlreadyStarted,
    DemoAlreadyCompleted,
    SchedulingConflict,
    LeadNotSchedulable,
    LeadNotFound,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Agent,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Calendar,
    List,
}

/// Timestamps accepted on the command line: RFC 3339, or a naive
/// `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM` read as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(Error::Parse(format!(
        "Invalid timestamp: '{}'. Expected RFC 3339 (2025-03-01T09:00:00Z) or 'YYYY-MM-DD HH:MM'.",
        input
    )))
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.to_dash_separators();
    NaiveDate::parse_from_str(&input, "%Y-%m-%d").map_err(|_| {
        Error::Parse(format!(
            "Invalid date: '{}'. Expected YYYY-MM-DD.",
            input
        ))
    })
}

/// Wall-clock window of the calendar grid, e.g. `6:00AM-10:00PM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
pub enum TimeFormat {
    #[strum(serialize = "%-I:%M%p")]
    HmMeridian,
    #[strum(serialize = "%-I%p")]
    HMeridian,
    #[strum(serialize = "%H:%M")]
    Hm24,
}

impl TimeRange {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (start, end) = s.split_once('-').ok_or_else(|| {
            Error::Parse(format!(
                "Invalid time range format: '{}'. Expected format: '<start>-<end>'.",
                s
            ))
        })?;
        let start = Self::parse_token(start, true)?;
        let end = Self::parse_token(end, false)?;
        if start >= end {
            return Err(Error::Parse(format!(
                "Start time '{}' must be earlier than end time '{}'.",
                start.format(TimeFormat::HmMeridian.as_ref()),
                end.format(TimeFormat::HmMeridian.as_ref())
            )));
        }
        Ok(TimeRange { start, end })
    }

    /// A bare hour with no meridian reads as AM for the start token and PM
    /// for the end token, so `6-10` means 6:00AM-10:00PM.
    fn parse_token(raw: &str, is_start: bool) -> Result<NaiveTime> {
        let mut token = raw.trim().to_ascii_uppercase();
        if let Ok(t) = NaiveTime::parse_from_str(&token, TimeFormat::Hm24.as_ref()) {
            return Ok(t);
        }
        if !(token.ends_with("AM") || token.ends_with("PM")) {
            token.push_str(if is_start { "AM" } else { "PM" });
        }
        for f in TimeFormat::iter() {
            if let Ok(t) = NaiveTime::parse_from_str(&token, f.as_ref()) {
                return Ok(t);
            }
            // chrono needs minutes to build a time from `%-I%p`
            let with_minutes = token.replacen("AM", ":00AM", 1).replacen("PM", ":00PM", 1);
            if let Ok(t) = NaiveTime::parse_from_str(&with_minutes, f.as_ref()) {
                return Ok(t);
            }
        }
        Err(Error::Parse(format!(
            "Invalid time format: '{}'. Supported formats: 6AM, 6:30AM, 18:00",
            raw.trim()
        )))
    }

    /// Whole-hour range; both hours must be below 24 and `start < end`.
    pub fn from_hours(start: u32, end: u32) -> Result<Self> {
        let hour = |h: u32| {
            NaiveTime::from_hms_opt(h, 0, 0)
                .ok_or_else(|| Error::Parse(format!("Hour {h} is outside 0-23.")))
        };
        let (start, end) = (hour(start)?, hour(end)?);
        if start >= end {
            return Err(Error::Parse(format!(
                "Start hour {} must be earlier than end hour {}.",
                start.hour(),
                end.hour()
            )));
        }
        Ok(TimeRange { start, end })
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn end_hour(&self) -> u32 {
        self.end.hour()
    }
}

/// 6:00AM-10:00PM.
impl Default for TimeRange {
    fn default() -> Self {
        let midnight = NaiveTime::default();
        TimeRange {
            start: midnight + Duration::hours(6),
            end: midnight + Duration::hours(22),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TimeFormat::HmMeridian.as_ref()),
            self.end.format(TimeFormat::HmMeridian.as_ref())
        )
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeRange::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,
    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

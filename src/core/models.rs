use crate::core::aliases::{DemoId, LeadId, UserId};
use crate::core::types::{DemoStatus, DemoType, LeadStatus};
use crate::errors::{Error, Result};
use crate::extensions::chrono::UtcExt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> &str;
}

/// A block of calendar time: `[start, start + duration)`.
///
/// Construction checks that the end is representable, so `end` never
/// overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: u32,
}

impl ScheduledInterval {
    pub fn new(start: DateTime<Utc>, duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(Error::validation(
                "duration_minutes",
                "must be greater than zero",
            ));
        }
        let end = start
            .plus_minutes(duration_minutes as i64)
            .ok_or_else(|| Error::validation("scheduled_at", "is out of range"))?;
        Ok(Self {
            start,
            end,
            duration_minutes,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Same length, new start.
    pub fn moved_to(&self, start: DateTime<Utc>) -> Result<Self> {
        Self::new(start, self.duration_minutes)
    }
}

impl fmt::Display for ScheduledInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.start.format("%Y-%m-%d"),
            self.start.hm(),
            self.end().hm()
        )
    }
}

/// An interval tagged with the demo it belongs to and the lead's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledInterval {
    pub id: DemoId,
    pub label: String,
    pub interval: ScheduledInterval,
}

/// A demo as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demo {
    pub id: DemoId,
    pub lead_id: LeadId,
    #[serde(default)]
    pub lead_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: DemoStatus,
    pub demo_type: DemoType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Demo {
    pub fn interval(&self) -> Result<ScheduledInterval> {
        ScheduledInterval::new(self.scheduled_at, self.duration_minutes)
    }

    /// The calendar block this demo holds, if its status still occupies one.
    /// A zero-length demo from the server holds nothing.
    pub fn labelled_interval(&self) -> Option<LabelledInterval> {
        if !self.status.occupies_slot() {
            return None;
        }
        let interval = self.interval().ok()?;
        Some(LabelledInterval {
            id: self.id.clone(),
            label: self.display_name().to_string(),
            interval,
        })
    }

    pub fn display_name(&self) -> &str {
        if self.lead_name.trim().is_empty() {
            &self.lead_id
        } else {
            &self.lead_name
        }
    }

    /// True when `other` is not older than this copy. Copies without a
    /// timestamp are always treated as newer.
    pub fn is_superseded_by(&self, other: &Demo) -> bool {
        match (self.updated_at, other.updated_at) {
            (Some(mine), Some(theirs)) => theirs >= mine,
            _ => true,
        }
    }
}

impl BaseEntity for Demo {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Demo(id={}, lead='{}', at={}, {}min, status={}, type={})",
            self.id,
            self.display_name(),
            self.scheduled_at.format("%Y-%m-%d %H:%M"),
            self.duration_minutes,
            self.status,
            self.demo_type
        )
    }
}

/// A card on the lead kanban board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub status: LeadStatus,
}

impl BaseEntity for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

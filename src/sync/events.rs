use crate::core::aliases::DemoId;
use crate::core::models::Demo;
use crate::core::types::DemoStatus;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoRef {
    pub id: DemoId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub id: DemoId,
    pub status: DemoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub demo_id: DemoId,
    #[serde(default)]
    pub lead_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub minutes_before: u32,
}

/// One message from the push channel, e.g.
/// `{"event":"demo-deleted","payload":{"id":"d1"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum PushEvent {
    DemoCreated(Demo),
    DemoUpdated(Demo),
    DemoDeleted(DemoRef),
    DemoStatusChanged(StatusChange),
    DemoReminder(Reminder),
}

impl PushEvent {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn demo_id(&self) -> &str {
        match self {
            PushEvent::DemoCreated(d) | PushEvent::DemoUpdated(d) => &d.id,
            PushEvent::DemoDeleted(r) => &r.id,
            PushEvent::DemoStatusChanged(c) => &c.id,
            PushEvent::DemoReminder(r) => &r.demo_id,
        }
    }
}

/// Events received but not yet applied, oldest first.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<PushEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PushEvent) {
        self.events.push_back(event);
    }

    /// Decode and enqueue a raw channel message.
    pub fn push_json(&mut self, text: &str) -> Result<()> {
        self.push(PushEvent::from_json(text)?);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<PushEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

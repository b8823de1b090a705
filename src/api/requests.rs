use crate::core::aliases::{LeadId, UserId};
use crate::core::auth::AuthContext;
use crate::core::models::{Demo, ScheduledInterval};
use crate::core::persist::DemoFilterPrefs;
use crate::core::types::{ApiErrorCode, DemoStatus, DemoType};
use crate::errors::{Error, Result};
use crate::extensions::string::StrExt;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Filters for `GET demos`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub statuses: Vec<DemoStatus>,
    pub demo_types: Vec<DemoType>,
    pub category_id: Option<String>,
    pub user_id: Option<UserId>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl DemoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_status(mut self, status: DemoStatus) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }

    pub fn with_type(mut self, demo_type: DemoType) -> Self {
        if !self.demo_types.contains(&demo_type) {
            self.demo_types.push(demo_type);
        }
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Seed status, type, category and user filters from saved preferences.
    pub fn from_prefs(prefs: &DemoFilterPrefs) -> Self {
        Self {
            statuses: prefs.statuses.clone(),
            demo_types: prefs.demo_types.clone(),
            category_id: prefs.category_id.clone(),
            user_id: prefs.user_id.clone(),
            ..Self::default()
        }
    }

    /// Users who may not see everyone's demos only get their own, whatever
    /// user filter was set.
    pub fn scoped_to(mut self, auth: &AuthContext) -> Self {
        if !auth.can_view_all() {
            self.user_id = auth.user().map(|u| u.id.clone());
        }
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut qs = url::form_urlencoded::Serializer::new(String::new());
        if let Some(start) = self.start_date {
            qs.append_pair("startDate", &rfc3339(start));
        }
        if let Some(end) = self.end_date {
            qs.append_pair("endDate", &rfc3339(end));
        }
        for status in &self.statuses {
            qs.append_pair("status[]", status.as_ref());
        }
        for demo_type in &self.demo_types {
            qs.append_pair("demoType[]", demo_type.as_ref());
        }
        if let Some(category) = &self.category_id {
            qs.append_pair("categoryId", category);
        }
        if let Some(user) = &self.user_id {
            qs.append_pair("userId", user);
        }
        if let Some(page) = self.page {
            qs.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            qs.append_pair("limit", &limit.to_string());
        }
        qs.finish()
    }
}

pub(crate) fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictsResponse {
    pub conflicts: Vec<Demo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDemoRequest {
    pub lead_id: LeadId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub demo_type: DemoType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

impl CreateDemoRequest {
    pub fn validate(&self) -> Result<()> {
        if self.lead_id.trim().is_empty() {
            return Err(Error::validation("lead_id", "is required"));
        }
        ScheduledInterval::new(self.scheduled_at, self.duration_minutes)?;
        if let Some(link) = &self.meeting_link {
            validate_meeting_link(link)?;
        }
        Ok(())
    }

    pub fn interval(&self) -> Result<ScheduledInterval> {
        ScheduledInterval::new(self.scheduled_at, self.duration_minutes)
    }
}

/// An absolute `http`/`https` URL with a host.
fn validate_meeting_link(link: &str) -> Result<()> {
    let invalid = || Error::validation("meeting_link", "must be an http(s) URL");
    let url = Url::parse(link).map_err(|_| invalid())?;
    let web = matches!(url.scheme(), "http" | "https");
    match url.host_str() {
        Some(host) if web && !host.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Partial edit for `PATCH demos/{id}`; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDemoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_type: Option<DemoType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DemoStatus>,
}

impl UpdateDemoRequest {
    /// Move the demo to `interval`, as a drag or reschedule does.
    pub fn reschedule(interval: &ScheduledInterval) -> Self {
        Self {
            scheduled_at: Some(interval.start()),
            duration_minutes: Some(interval.duration_minutes()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present fields to a local copy.
    pub fn apply_to(&self, demo: &mut Demo) {
        if let Some(at) = self.scheduled_at {
            demo.scheduled_at = at;
        }
        if let Some(minutes) = self.duration_minutes {
            demo.duration_minutes = minutes;
        }
        if let Some(t) = self.demo_type {
            demo.demo_type = t;
        }
        if let Some(notes) = &self.notes {
            demo.notes = Some(notes.clone());
        }
        if let Some(link) = &self.meeting_link {
            demo.meeting_link = Some(link.clone());
        }
        if let Some(status) = self.status {
            demo.status = status;
        }
    }
}

/// Form state of the "schedule a demo" dialog before it becomes a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoDraft {
    pub lead_id: Option<LeadId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub demo_type: Option<DemoType>,
    pub notes: String,
    pub meeting_link: String,
}

impl DemoDraft {
    pub fn with_default_duration(minutes: u32) -> Self {
        Self {
            duration_minutes: Some(minutes),
            ..Self::default()
        }
    }

    /// Check required fields and build the request. Nothing invalid gets past
    /// this point.
    pub fn into_request(self) -> Result<CreateDemoRequest> {
        let lead_id = self
            .lead_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::validation("lead_id", "is required"))?;
        let scheduled_at = self
            .scheduled_at
            .ok_or_else(|| Error::validation("scheduled_at", "is required"))?;
        let duration_minutes = self
            .duration_minutes
            .ok_or_else(|| Error::validation("duration_minutes", "is required"))?;
        let demo_type = self
            .demo_type
            .ok_or_else(|| Error::validation("demo_type", "is required"))?;
        let request = CreateDemoRequest {
            lead_id,
            scheduled_at,
            duration_minutes,
            demo_type,
            notes: self.notes.non_blank(),
            meeting_link: self.meeting_link.non_blank(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Error body the demos API sends with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// Known codes become business-rule rejections; anything else is a
    /// transport-level failure.
    pub fn into_error(self) -> Error {
        match ApiErrorCode::from_str(&self.code) {
            Ok(code) => Error::Rejected(code),
            Err(_) if self.message.is_empty() => Error::Transport(self.code),
            Err(_) => Error::Transport(format!("{}: {}", self.code, self.message)),
        }
    }
}

//! The remote demos API, as this crate consumes it.
//!
//! Implementations own transport concerns (HTTP, auth headers, timeouts).
//! Calls are synchronous from the caller's point of view; responses to
//! overlapping conflict checks are sequenced by
//! [`crate::scheduler::conflict_check::ConflictChecker`].

#[cfg(test)]
pub(crate) mod fake;
pub mod requests;
#[cfg(test)]
mod tests;

use crate::core::models::Demo;
use crate::errors::Result;
use chrono::{DateTime, Utc};

pub use requests::{
    ApiError, ConflictsResponse, CreateDemoRequest, DemoDraft, DemoQuery, Page,
    UpdateDemoRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    Start,
    Complete,
    Cancel,
}

impl DemoAction {
    pub fn as_path(self) -> &'static str {
        match self {
            DemoAction::Start => "start",
            DemoAction::Complete => "complete",
            DemoAction::Cancel => "cancel",
        }
    }
}

pub trait DemoApi {
    fn list(&self, query: &DemoQuery) -> Result<Page<Demo>>;
    fn create(&self, request: &CreateDemoRequest) -> Result<Demo>;
    fn update(&self, id: &str, request: &UpdateDemoRequest) -> Result<Demo>;
    fn transition(&self, id: &str, action: DemoAction) -> Result<Demo>;
    fn conflicts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<ConflictsResponse>;

    fn start(&self, id: &str) -> Result<Demo> {
        self.transition(id, DemoAction::Start)
    }
    fn complete(&self, id: &str) -> Result<Demo> {
        self.transition(id, DemoAction::Complete)
    }
    fn cancel(&self, id: &str) -> Result<Demo> {
        self.transition(id, DemoAction::Cancel)
    }
}

/// Relative endpoint paths, joined onto the API base URL by the transport.
pub mod endpoints {
    use super::DemoAction;
    use crate::api::requests::{DemoQuery, rfc3339};
    use chrono::{DateTime, Utc};
    use url::Url;

    pub fn list(query: &DemoQuery) -> String {
        let qs = query.to_query_string();
        if qs.is_empty() {
            "demos".to_string()
        } else {
            format!("demos?{qs}")
        }
    }

    pub fn create() -> &'static str {
        "demos"
    }

    pub fn demo(id: &str) -> String {
        format!("demos/{}", encode_segment(id))
    }

    pub fn transition(id: &str, action: DemoAction) -> String {
        format!("{}/{}", demo(id), action.as_path())
    }

    pub fn conflicts(start: DateTime<Utc>, end: DateTime<Utc>, exclude_id: Option<&str>) -> String {
        let mut qs = url::form_urlencoded::Serializer::new(String::new());
        qs.append_pair("start", &rfc3339(start));
        qs.append_pair("end", &rfc3339(end));
        if let Some(id) = exclude_id {
            qs.append_pair("excludeId", id);
        }
        format!("demos/conflicts?{}", qs.finish())
    }

    const SEGMENT_BASE: &str = "http://localhost/";

    /// Percent-encode `id` as one path segment. `+` is escaped as well
    /// since some servers read it as a space in paths.
    fn encode_segment(id: &str) -> String {
        let Ok(mut url) = Url::parse(SEGMENT_BASE) else {
            return id.to_string();
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push(id);
        }
        url.path().trim_start_matches('/').replace('+', "%2B")
    }
}

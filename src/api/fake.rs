use super::{
    ConflictsResponse, CreateDemoRequest, DemoAction, DemoApi, DemoQuery, Page,
    UpdateDemoRequest, endpoints,
};
use crate::core::models::{Demo, ScheduledInterval};
use crate::core::types::{ApiErrorCode, DemoStatus};
use crate::errors::{Error, Result};
use crate::scheduler::conflict::overlaps;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

/// In-memory stand-in for the demos API. Records every path it is asked for.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub demos: RefCell<Vec<Demo>>,
    pub calls: RefCell<Vec<String>>,
    pub fail_with: RefCell<Option<Error>>,
}

impl FakeApi {
    pub fn with_demos(demos: Vec<Demo>) -> Self {
        let api = Self::default();
        *api.demos.borrow_mut() = demos;
        api
    }

    pub fn fail_next(&self, err: Error) {
        *self.fail_with.borrow_mut() = Some(err);
    }

    fn record(&self, path: String) -> Result<()> {
        self.calls.borrow_mut().push(path);
        match self.fail_with.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, id: &str) -> Result<Demo> {
        self.demos
            .borrow()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Demo", id))
    }

    fn store(&self, demo: Demo) {
        let mut demos = self.demos.borrow_mut();
        match demos.iter_mut().find(|d| d.id == demo.id) {
            Some(slot) => *slot = demo,
            None => demos.push(demo),
        }
    }
}

impl DemoApi for FakeApi {
    fn list(&self, query: &DemoQuery) -> Result<Page<Demo>> {
        self.record(endpoints::list(query))?;
        let data: Vec<Demo> = self
            .demos
            .borrow()
            .iter()
            .filter(|d| query.statuses.is_empty() || query.statuses.contains(&d.status))
            .filter(|d| query.user_id.is_none() || d.assigned_user_id == query.user_id)
            .cloned()
            .collect();
        Ok(Page {
            total: data.len() as u64,
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(50),
            data,
        })
    }

    fn create(&self, request: &CreateDemoRequest) -> Result<Demo> {
        self.record(endpoints::create().to_string())?;
        let id = format!("demo-{}", self.demos.borrow().len() + 1);
        let demo = Demo {
            id,
            lead_id: request.lead_id.clone(),
            lead_name: String::new(),
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            status: DemoStatus::Scheduled,
            demo_type: request.demo_type,
            notes: request.notes.clone(),
            meeting_link: request.meeting_link.clone(),
            assigned_user_id: None,
            category_id: None,
            updated_at: None,
        };
        self.store(demo.clone());
        Ok(demo)
    }

    fn update(&self, id: &str, request: &UpdateDemoRequest) -> Result<Demo> {
        self.record(endpoints::demo(id))?;
        let mut demo = self.find(id)?;
        request.apply_to(&mut demo);
        self.store(demo.clone());
        Ok(demo)
    }

    fn transition(&self, id: &str, action: DemoAction) -> Result<Demo> {
        self.record(endpoints::transition(id, action))?;
        let mut demo = self.find(id)?;
        demo.status = match (action, demo.status) {
            (DemoAction::Start, s) if s.is_pending() => DemoStatus::InProgress,
            (DemoAction::Start, DemoStatus::InProgress) => {
                return Err(Error::Rejected(ApiErrorCode::DemoAlreadyStarted));
            }
            (DemoAction::Complete, DemoStatus::InProgress) => DemoStatus::Completed,
            (_, DemoStatus::Completed) => {
                return Err(Error::Rejected(ApiErrorCode::DemoAlreadyCompleted));
            }
            (DemoAction::Cancel, s) if !s.is_terminal() => DemoStatus::Cancelled,
            _ => return Err(Error::Rejected(ApiErrorCode::InvalidStatusTransition)),
        };
        self.store(demo.clone());
        Ok(demo)
    }

    fn conflicts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<ConflictsResponse> {
        self.record(endpoints::conflicts(start, end, exclude_id))?;
        let minutes = (end - start).num_minutes().max(1) as u32;
        let candidate = ScheduledInterval::new(start, minutes)?;
        let conflicts = self
            .demos
            .borrow()
            .iter()
            .filter(|d| exclude_id != Some(d.id.as_str()))
            .filter(|d| {
                d.labelled_interval()
                    .is_some_and(|li| overlaps(&candidate, &li.interval))
            })
            .cloned()
            .collect();
        Ok(ConflictsResponse { conflicts })
    }
}

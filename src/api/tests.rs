use super::fake::FakeApi;
use super::{
    ApiError, CreateDemoRequest, DemoAction, DemoApi, DemoDraft, DemoQuery, Page,
    UpdateDemoRequest, endpoints,
};
use crate::core::auth::{AuthContext, CurrentUser};
use crate::core::models::{Demo, ScheduledInterval};
use crate::core::persist::DemoFilterPrefs;
use crate::core::types::{ApiErrorCode, DemoStatus, DemoType, Role};
use crate::errors::Error;
use chrono::{DateTime, TimeZone, Utc};

fn ts(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2099, 2, 10, h, m, 0).unwrap()
}

fn agent() -> AuthContext {
    AuthContext::signed_in(CurrentUser {
        id: "u-7".into(),
        name: "Rita".into(),
        role: Role::Agent,
    })
}

fn draft() -> DemoDraft {
    DemoDraft {
        lead_id: Some("lead-1".into()),
        scheduled_at: Some(ts(9, 0)),
        duration_minutes: Some(30),
        demo_type: Some(DemoType::Online),
        notes: "  bring pricing ".into(),
        meeting_link: String::new(),
    }
}

#[test]
fn query_string_uses_wire_names_and_repeats_lists() {
    let q = DemoQuery::new()
        .between(ts(0, 0), ts(23, 59))
        .with_status(DemoStatus::Scheduled)
        .with_status(DemoStatus::Confirmed)
        .with_status(DemoStatus::Scheduled)
        .with_type(DemoType::PhoneCall)
        .page(2, 25);
    assert_eq!(
        q.to_query_string(),
        "startDate=2099-02-10T00%3A00%3A00Z&endDate=2099-02-10T23%3A59%3A00Z\
         &status%5B%5D=scheduled&status%5B%5D=confirmed&demoType%5B%5D=phone_call\
         &page=2&limit=25"
    );
}

#[test]
fn empty_query_renders_nothing() {
    assert_eq!(DemoQuery::new().to_query_string(), "");
    assert_eq!(endpoints::list(&DemoQuery::new()), "demos");
}

#[test]
fn agents_are_scoped_to_their_own_demos() {
    let mut q = DemoQuery::new();
    q.user_id = Some("someone-else".into());
    let scoped = q.scoped_to(&agent());
    assert_eq!(scoped.user_id.as_deref(), Some("u-7"));

    let manager = AuthContext::signed_in(CurrentUser {
        id: "m-1".into(),
        name: "Moe".into(),
        role: Role::Manager,
    });
    assert_eq!(DemoQuery::new().scoped_to(&manager).user_id, None);
}

#[test]
fn query_from_saved_filters() {
    let prefs = DemoFilterPrefs {
        statuses: vec![DemoStatus::Completed],
        category_id: Some("cat-3".into()),
        ..DemoFilterPrefs::default()
    };
    let q = DemoQuery::from_prefs(&prefs);
    assert_eq!(q.statuses, vec![DemoStatus::Completed]);
    assert!(q.to_query_string().contains("categoryId=cat-3"));
}

#[test]
fn endpoint_paths() {
    assert_eq!(endpoints::create(), "demos");
    assert_eq!(endpoints::demo("d1"), "demos/d1");
    assert_eq!(endpoints::transition("d1", DemoAction::Start), "demos/d1/start");
    assert_eq!(endpoints::transition("d1", DemoAction::Complete), "demos/d1/complete");
    assert_eq!(endpoints::transition("d1", DemoAction::Cancel), "demos/d1/cancel");
    assert_eq!(
        endpoints::conflicts(ts(9, 0), ts(9, 30), Some("d1")),
        "demos/conflicts?start=2099-02-10T09%3A00%3A00Z&end=2099-02-10T09%3A30%3A00Z&excludeId=d1"
    );
}

#[test]
fn demo_ids_are_encoded_as_one_path_segment() {
    assert_eq!(endpoints::demo("a b+c"), "demos/a%20b%2Bc");
    assert_eq!(endpoints::demo("x/y"), "demos/x%2Fy");
    assert_eq!(endpoints::demo("50%"), "demos/50%25");
    assert_eq!(
        endpoints::transition("a b", DemoAction::Cancel),
        "demos/a%20b/cancel"
    );
}

#[test]
fn draft_becomes_trimmed_request() {
    let req = draft().into_request().unwrap();
    assert_eq!(req.notes.as_deref(), Some("bring pricing"));
    assert_eq!(req.meeting_link, None);

    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["leadId"], "lead-1");
    assert_eq!(json["durationMinutes"], 30);
    assert_eq!(json["demoType"], "online");
    assert!(json.get("meetingLink").is_none());
}

#[test]
fn draft_missing_fields_fail_validation() {
    let mut d = draft();
    d.lead_id = Some("   ".into());
    assert!(matches!(
        d.into_request(),
        Err(Error::Validation { field: "lead_id", .. })
    ));

    let mut d = draft();
    d.demo_type = None;
    assert!(matches!(
        d.into_request(),
        Err(Error::Validation { field: "demo_type", .. })
    ));

    let mut d = draft();
    d.duration_minutes = Some(0);
    assert!(matches!(
        d.into_request(),
        Err(Error::Validation { field: "duration_minutes", .. })
    ));

    let mut d = DemoDraft::with_default_duration(45);
    d.lead_id = Some("lead-1".into());
    assert!(matches!(
        d.into_request(),
        Err(Error::Validation { field: "scheduled_at", .. })
    ));
}

#[test]
fn meeting_link_must_be_a_url() {
    for bad in ["zoom room 4", "http://", "https://not a url", "ftp://files.example/x", "mailto:a@b.c"] {
        let mut d = draft();
        d.meeting_link = bad.into();
        assert!(
            matches!(
                d.into_request(),
                Err(Error::Validation { field: "meeting_link", .. })
            ),
            "{bad}"
        );
    }

    let mut d = draft();
    d.meeting_link = "https://meet.example.com/abc-defg".into();
    assert_eq!(
        d.into_request().unwrap().meeting_link.as_deref(),
        Some("https://meet.example.com/abc-defg")
    );
}

#[test]
fn update_request_serializes_only_present_fields() {
    let interval = ScheduledInterval::new(ts(11, 0), 60).unwrap();
    let req = UpdateDemoRequest::reschedule(&interval);
    let json = serde_json::to_string(&req).unwrap();
    assert_eq!(json, r#"{"scheduledAt":"2099-02-10T11:00:00Z","durationMinutes":60}"#);
    assert!(UpdateDemoRequest::default().is_empty());
    assert!(!req.is_empty());
}

#[test]
fn api_error_maps_known_codes_to_rejections() {
    let body: ApiError =
        serde_json::from_str(r#"{"code":"SCHEDULING_CONFLICT","message":"taken"}"#).unwrap();
    assert!(matches!(
        body.into_error(),
        Error::Rejected(ApiErrorCode::SchedulingConflict)
    ));

    let unknown = ApiError {
        code: "RATE_LIMITED".into(),
        message: "slow down".into(),
    };
    match unknown.into_error() {
        Error::Transport(msg) => assert_eq!(msg, "RATE_LIMITED: slow down"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn page_envelope_decodes() {
    let json = r#"{"data":[{"id":"d1","leadId":"l1","scheduledAt":"2099-02-10T09:00:00Z","durationMinutes":30,"status":"confirmed","demoType":"online"}],"total":1,"page":1,"limit":20}"#;
    let page: Page<Demo> = serde_json::from_str(json).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].status, DemoStatus::Confirmed);
}

#[test]
fn lifecycle_through_the_trait() {
    let api = FakeApi::default();
    let created = api.create(&draft().into_request().unwrap()).unwrap();
    assert_eq!(created.status, DemoStatus::Scheduled);

    let started = api.start(&created.id).unwrap();
    assert_eq!(started.status, DemoStatus::InProgress);
    assert!(matches!(
        api.start(&created.id),
        Err(Error::Rejected(ApiErrorCode::DemoAlreadyStarted))
    ));
    assert_eq!(api.complete(&created.id).unwrap().status, DemoStatus::Completed);
    assert!(matches!(
        api.cancel(&created.id),
        Err(Error::Rejected(ApiErrorCode::DemoAlreadyCompleted))
    ));

    let calls = api.calls.borrow();
    assert_eq!(calls[0], "demos");
    assert_eq!(calls[1], format!("demos/{}/start", created.id));
}

#[test]
fn create_request_validate_checks_duration() {
    let req = CreateDemoRequest {
        lead_id: "l1".into(),
        scheduled_at: ts(9, 0),
        duration_minutes: 0,
        demo_type: DemoType::Online,
        notes: None,
        meeting_link: None,
    };
    assert!(req.validate().is_err());
    assert!(req.interval().is_err());
}

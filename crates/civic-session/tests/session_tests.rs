use civic_model::{Category, Location, ReportId, SessionUser};
use civic_session::{ClientConfig, Intent, Outcome, SeedMode, Session};
use civic_store::ReportStore;
use civic_test_utils::{fixed_clock, fixed_instant, SequentialIds};
use civic_view::{CategoryFilter, FormState, GeolocationError};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn demo_session() -> Session {
    Session::new(ClientConfig::default())
}

fn deterministic_session() -> Session {
    let config = ClientConfig::default()
        .with_session_user(SessionUser::new("u-42", "Tester"))
        .with_seed(SeedMode::Empty);
    let store = ReportStore::new(config.session_user.clone())
        .with_id_source(Arc::new(SequentialIds::default()))
        .with_clock(fixed_clock());
    Session::with_store(config, store)
}

fn ids(frame_ids: impl IntoIterator<Item = ReportId>) -> Vec<String> {
    frame_ids.into_iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_map_click_to_created_report() {
    let mut session = deterministic_session();
    let spot = Location::new(52.5, 13.4);

    session.dispatch(Intent::MapClicked(spot)).unwrap();
    assert_eq!(session.ui().form().pending_location(), Some(spot));

    let draft = session
        .draft()
        .with_title("  Pothole  ")
        .with_description("   ")
        .with_category(Category::Traffic);
    let outcome = session.dispatch(Intent::SubmitDraft(draft)).unwrap();

    let Outcome::Created(report) = outcome else {
        panic!("expected a created report, got {outcome:?}");
    };
    assert_eq!(report.id, ReportId::from("report-1"));
    assert_eq!(report.title, "Pothole");
    assert_eq!(report.description, None);
    assert_eq!(report.user_id, "u-42");
    assert_eq!(report.user_name, "Tester");
    assert_eq!(report.created_at, fixed_instant());

    let frame = session.render(false);
    assert_eq!(frame.form, FormState::Closed);
    assert_eq!(frame.markers.len(), 1);
    assert_eq!(frame.sidebar.my_reports.len(), 1);
}

#[test]
fn test_withdraw_seeded_support() {
    let mut session = demo_session();
    let id = ReportId::from("1");

    session.dispatch(Intent::ToggleSupport(id.clone())).unwrap();

    let report = session.snapshot().get(&id).cloned().unwrap();
    assert_eq!(report.votes.supports, 11);
    assert!(!report.votes.user_support);
}

#[test]
fn test_detail_follows_live_report() {
    let mut session = demo_session();
    let id = ReportId::from("2");
    session
        .dispatch(Intent::SelectReport {
            id: id.clone(),
            is_mobile: false,
        })
        .unwrap();

    let before = session.render(false).detail.unwrap();
    assert_eq!(before.supports, 8);
    assert!(!before.user_support);

    session.dispatch(Intent::ToggleSupport(id.clone())).unwrap();
    session
        .dispatch(Intent::AddComment {
            id: id.clone(),
            content: "  Same problem on my street  ".to_string(),
        })
        .unwrap();

    let after = session.render(false).detail.unwrap();
    assert_eq!(after.supports, 9);
    assert!(after.user_support);
    assert_eq!(after.comments.len(), before.comments.len() + 1);
    assert_eq!(
        after.comments.last().map(|c| c.content.as_str()),
        Some("Same problem on my street")
    );
    assert_eq!(
        after.comments_heading(),
        format!("Comments ({})", before.comments.len() + 1)
    );
}

#[test]
fn test_mobile_selection_closes_sidebar() {
    let mut session = demo_session();
    session.dispatch(Intent::ToggleSidebar).unwrap();
    assert!(session.render(true).sidebar_visible);

    session
        .dispatch(Intent::SelectReport {
            id: ReportId::from("3"),
            is_mobile: true,
        })
        .unwrap();

    let frame = session.render(true);
    assert!(!frame.sidebar_visible);
    assert!(frame.detail.is_some());
}

#[test]
fn test_desktop_selection_keeps_sidebar() {
    let mut session = demo_session();
    session.dispatch(Intent::ToggleSidebar).unwrap();
    session
        .dispatch(Intent::SelectReport {
            id: ReportId::from("3"),
            is_mobile: false,
        })
        .unwrap();

    assert!(session.render(true).sidebar_visible);
    assert!(session.render(false).sidebar_visible);
}

#[test]
fn test_filter_narrows_markers_but_not_my_reports() {
    let mut session = demo_session();
    session
        .dispatch(Intent::SetCategory(CategoryFilter::Only(Category::Noise)))
        .unwrap();

    let frame = session.render(false);
    assert_eq!(ids(frame.markers.iter().map(|m| m.id.clone())), vec!["5"]);
    assert_eq!(
        ids(frame.sidebar.my_reports.iter().map(|r| r.id.clone())),
        vec!["1", "4", "9"]
    );

    session
        .dispatch(Intent::SetCategory(CategoryFilter::All))
        .unwrap();
    assert_eq!(session.render(false).markers.len(), 9);
}

#[test]
fn test_created_report_outside_filter() {
    let mut session = demo_session();
    session
        .dispatch(Intent::SetCategory(CategoryFilter::Only(Category::Noise)))
        .unwrap();
    session.dispatch(Intent::CreateReport).unwrap();

    let draft = session
        .draft()
        .with_title("Broken light")
        .with_category(Category::Lighting)
        .with_location(Location::new(52.51, 13.41));
    session.dispatch(Intent::SubmitDraft(draft)).unwrap();

    let frame = session.render(false);
    assert_eq!(frame.markers.len(), 1);
    assert_eq!(frame.sidebar.my_reports.len(), 4);
    assert_eq!(frame.sidebar.filter_options[0].count, 10);
}

#[test]
fn test_closed_detail_and_ghost_selection_render_nothing() {
    let mut session = demo_session();
    session
        .dispatch(Intent::SelectReport {
            id: ReportId::from("ghost"),
            is_mobile: false,
        })
        .unwrap();
    assert!(session.render(false).detail.is_none());

    session
        .dispatch(Intent::SelectReport {
            id: ReportId::from("1"),
            is_mobile: false,
        })
        .unwrap();
    session.dispatch(Intent::CloseDetail).unwrap();
    assert!(session.render(false).detail.is_none());
}

#[test]
fn test_ghost_comment_is_ignored() {
    let mut session = demo_session();
    let revision = session.snapshot().revision();
    let outcome = session
        .dispatch(Intent::AddComment {
            id: ReportId::from("ghost"),
            content: "hello".to_string(),
        })
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(session.snapshot().revision(), revision);
}

#[test]
fn test_initial_center_falls_back_to_config() {
    let center = Location::new(48.137, 11.575);
    let session = Session::new(ClientConfig::default().with_default_center(center));

    assert_eq!(
        session.initial_center(Err(GeolocationError::Unsupported)),
        center
    );
    let here = Location::new(50.0, 8.0);
    assert_eq!(session.initial_center(Ok(here)), here);
}

#[test]
fn test_frame_serializes_camel_case() {
    let mut session = demo_session();
    session
        .dispatch(Intent::SelectReport {
            id: ReportId::from("1"),
            is_mobile: false,
        })
        .unwrap();

    let json = serde_json::to_value(session.render(false)).unwrap();
    assert!(json.get("sidebarVisible").is_some());
    assert_eq!(json["markers"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["detail"]["report"]["id"], "1");
    assert_eq!(json["detail"]["supports"], 12);
}

use civic_model::{Category, ReportId, SessionUser};
use civic_store::ReportStore;
use civic_view::{CategoryFilter, DetailView, FilterView, SidebarView, UiState};
use pretty_assertions::assert_eq;

fn seeded() -> ReportStore {
    ReportStore::seeded(SessionUser::default())
}

#[test]
fn test_sidebar_counts_and_active_filter() {
    let store = seeded();
    let snapshot = store.snapshot();
    let mut view = FilterView::new();
    let active = CategoryFilter::Only(Category::Noise);
    let filtered = view.project(&snapshot, active);

    let sidebar = SidebarView::build(&snapshot, &filtered, active, store.session_user());

    assert_eq!(sidebar.filter_options.len(), 10);
    assert_eq!(sidebar.filter_options[0].label, "All");
    assert_eq!(sidebar.filter_options[0].count, 9);
    assert!(sidebar.filter_options.iter().skip(1).all(|o| o.count == 1));

    let selected = sidebar.active_filter().unwrap();
    assert_eq!(selected.label, "Noise");

    let ids: Vec<_> = sidebar.reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["5"]);
}

#[test]
fn test_my_reports_ignore_filter() {
    let store = seeded();
    let snapshot = store.snapshot();
    let filtered = FilterView::new().project(&snapshot, CategoryFilter::Only(Category::Traffic));

    let sidebar = SidebarView::build(
        &snapshot,
        &filtered,
        CategoryFilter::Only(Category::Traffic),
        store.session_user(),
    );

    let mine: Vec<_> = sidebar.my_reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(mine, vec!["1", "4", "9"]);
}

#[test]
fn test_detail_follows_live_report() {
    let store = seeded();
    let mut ui = UiState::new();
    let id = ReportId::from("6");
    ui.report_selected(id.clone(), true);

    let before = DetailView::new(ui.resolve_selection(&store.snapshot()).unwrap());
    assert_eq!(before.comments_heading(), "Comments (0)");
    assert!(!before.user_support);

    store.add_comment(&id, "Saw it yesterday");
    store.toggle_support(&id);

    let after = DetailView::new(ui.resolve_selection(&store.snapshot()).unwrap());
    assert_eq!(after.comments_heading(), "Comments (1)");
    assert_eq!(after.supports, before.supports + 1);
    assert!(after.user_support);
    assert_eq!(after.category_label, "Vandalism");
}

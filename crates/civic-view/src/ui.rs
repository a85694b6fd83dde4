//! Selection and panel state
//!
//! Four independent slices composed into [`UiState`]:
//! mobile sidebar visibility, creation-form visibility, the pending map-click
//! location, and the selected report. The selection is a [`ReportId`], never
//! a copy of the report; [`UiState::resolve_selection`] looks it up in the
//! current snapshot on every render.

use civic_model::{Location, Report, ReportId};
use civic_store::ReportSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Open/closed state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Panel shown
    Open,
    /// Panel hidden
    #[default]
    Closed,
}

impl Visibility {
    /// Whether the panel is shown
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Visibility::Open)
    }

    /// The other state
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Visibility::Open => Visibility::Closed,
            Visibility::Closed => Visibility::Open,
        }
    }
}

/// Creation form state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    /// Form hidden
    #[default]
    Closed,
    /// Form shown, optionally pre-filled with a map-click location
    Open {
        /// Location picked on the map, if the form was opened that way
        pending_location: Option<Location>,
    },
}

impl FormState {
    /// Whether the form is shown
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open { .. })
    }

    /// Pre-filled location, if any
    #[inline]
    #[must_use]
    pub fn pending_location(&self) -> Option<Location> {
        match self {
            FormState::Open { pending_location } => *pending_location,
            FormState::Closed => None,
        }
    }
}

/// UI transitions emitted by presentation components
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    /// "New report" button: open the form with no location
    CreateReport,
    /// Click on the map: open the form at the clicked spot
    MapClicked(Location),
    /// Cancel or submit: close the form, clear the pending location
    FormClosed,
    /// Report clicked in the list or on the map
    ReportSelected {
        /// Selected report
        id: ReportId,
        /// Current layout is mobile
        is_mobile: bool,
    },
    /// Detail modal dismissed
    DetailClosed,
    /// Mobile hamburger button
    ToggleMobileSidebar,
}

/// Composed UI state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiState {
    mobile_sidebar: Visibility,
    form: FormState,
    selected: Option<ReportId>,
}

impl UiState {
    /// Initial state: everything closed, nothing selected
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transition
    pub fn apply(&mut self, intent: UiIntent) {
        tracing::debug!(?intent, "ui transition");
        match intent {
            UiIntent::CreateReport => self.create_report(),
            UiIntent::MapClicked(location) => self.map_clicked(location),
            UiIntent::FormClosed => self.form_closed(),
            UiIntent::ReportSelected { id, is_mobile } => self.report_selected(id, is_mobile),
            UiIntent::DetailClosed => self.detail_closed(),
            UiIntent::ToggleMobileSidebar => self.toggle_mobile_sidebar(),
        }
    }

    /// Open the form with no location
    pub fn create_report(&mut self) {
        self.form = FormState::Open {
            pending_location: None,
        };
    }

    /// Open the form pre-filled with `location`
    pub fn map_clicked(&mut self, location: Location) {
        self.form = FormState::Open {
            pending_location: Some(location),
        };
    }

    /// Close the form and clear the pending location
    pub fn form_closed(&mut self) {
        self.form = FormState::Closed;
    }

    /// Select a report; on mobile this also dismisses the sidebar
    pub fn report_selected(&mut self, id: ReportId, is_mobile: bool) {
        self.selected = Some(id);
        if is_mobile {
            self.mobile_sidebar = Visibility::Closed;
        }
    }

    /// Clear the selection
    pub fn detail_closed(&mut self) {
        self.selected = None;
    }

    /// Flip mobile sidebar visibility
    pub fn toggle_mobile_sidebar(&mut self) {
        self.mobile_sidebar = self.mobile_sidebar.flipped();
    }

    /// Mobile sidebar slice
    #[inline]
    #[must_use]
    pub fn mobile_sidebar(&self) -> Visibility {
        self.mobile_sidebar
    }

    /// Whether the sidebar is shown; always on desktop layouts
    #[inline]
    #[must_use]
    pub fn sidebar_visible(&self, is_mobile: bool) -> bool {
        !is_mobile || self.mobile_sidebar.is_open()
    }

    /// Form slice
    #[inline]
    #[must_use]
    pub fn form(&self) -> FormState {
        self.form
    }

    /// Selected report id
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&ReportId> {
        self.selected.as_ref()
    }

    /// Resolve the selection against the live snapshot
    ///
    /// Returns `None` when nothing is selected or the id no longer exists.
    #[must_use]
    pub fn resolve_selection(&self, snapshot: &ReportSnapshot) -> Option<Arc<Report>> {
        self.selected.as_ref().and_then(|id| snapshot.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_model::SessionUser;
    use civic_store::ReportStore;

    #[test]
    fn create_report_opens_empty_form() {
        let mut ui = UiState::new();
        ui.create_report();
        assert_eq!(
            ui.form(),
            FormState::Open {
                pending_location: None
            }
        );
    }

    #[test]
    fn map_click_prefills_location_and_close_clears_it() {
        let mut ui = UiState::new();
        let spot = Location::new(52.51, 13.39);

        ui.apply(UiIntent::MapClicked(spot));
        assert!(ui.form().is_open());
        assert_eq!(ui.form().pending_location(), Some(spot));

        ui.apply(UiIntent::FormClosed);
        assert_eq!(ui.form(), FormState::Closed);
        assert_eq!(ui.form().pending_location(), None);

        // Reopening via the button does not resurrect the old location
        ui.apply(UiIntent::CreateReport);
        assert_eq!(ui.form().pending_location(), None);
    }

    #[test]
    fn mobile_selection_closes_sidebar() {
        let mut ui = UiState::new();
        ui.toggle_mobile_sidebar();
        assert!(ui.sidebar_visible(true));

        ui.report_selected(ReportId::from("1"), true);
        assert_eq!(ui.mobile_sidebar(), Visibility::Closed);
        assert!(!ui.sidebar_visible(true));
        assert_eq!(ui.selected(), Some(&ReportId::from("1")));
    }

    #[test]
    fn desktop_selection_leaves_sidebar_alone() {
        let mut ui = UiState::new();
        ui.toggle_mobile_sidebar();

        ui.report_selected(ReportId::from("2"), false);
        assert_eq!(ui.mobile_sidebar(), Visibility::Open);
        assert!(ui.sidebar_visible(false));
    }

    #[test]
    fn detail_closed_clears_selection() {
        let mut ui = UiState::new();
        ui.apply(UiIntent::ReportSelected {
            id: ReportId::from("4"),
            is_mobile: false,
        });
        ui.apply(UiIntent::DetailClosed);
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn selection_resolves_live_data() {
        let store = ReportStore::seeded(SessionUser::default());
        let mut ui = UiState::new();
        let id = ReportId::from("2");

        ui.report_selected(id.clone(), false);
        let stale = ui.resolve_selection(&store.snapshot()).unwrap();

        store.toggle_support(&id);
        store.add_comment(&id, "Still dark");

        let live = ui.resolve_selection(&store.snapshot()).unwrap();
        assert_eq!(live.votes.supports, stale.votes.supports + 1);
        assert!(live.votes.user_support);
        assert_eq!(live.comment_count(), stale.comment_count() + 1);
    }

    #[test]
    fn vanished_selection_resolves_to_none() {
        let store = ReportStore::new(SessionUser::default());
        let mut ui = UiState::new();
        ui.report_selected(ReportId::from("ghost"), false);
        assert!(ui.resolve_selection(&store.snapshot()).is_none());
    }
}

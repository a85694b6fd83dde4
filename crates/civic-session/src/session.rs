//! Session composer
//!
//! Owns the [`ReportStore`], the [`UiState`] and the [`FilterView`]. Front
//! ends send [`Intent`]s in and pull [`Frame`]s out; they never hold a
//! mutable handle on the store.

use crate::config::{ClientConfig, SeedMode};
use crate::error::IntentError;
use civic_model::{Location, Report, ReportId, SessionUser};
use civic_store::{Mutation, ReportSnapshot, ReportStore};
use civic_view::{
    initial_center, markers, normalize_comment, CategoryFilter, DetailView, FilterView,
    FormState, GeolocationError, MarkerView, ReportDraft, SidebarView, UiIntent, UiState,
};
use im::Vector;
use serde::Serialize;
use std::sync::Arc;

/// Everything a presentation component can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// "New report" button
    CreateReport,
    /// Map click; opens the form at the clicked spot
    MapClicked(Location),
    /// Form cancelled
    CloseForm,
    /// Form submitted
    SubmitDraft(ReportDraft),
    /// Vote button in the detail view
    ToggleSupport(ReportId),
    /// Comment form in the detail view
    AddComment {
        /// Target report
        id: ReportId,
        /// Raw input, trimmed before storing
        content: String,
    },
    /// Report clicked in the list or on the map
    SelectReport {
        /// Clicked report
        id: ReportId,
        /// Current layout is mobile
        is_mobile: bool,
    },
    /// Detail modal dismissed
    CloseDetail,
    /// Mobile hamburger button
    ToggleSidebar,
    /// Filter button
    SetCategory(CategoryFilter),
}

/// What an intent did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A report was created
    Created(Arc<Report>),
    /// A report was replaced by a new value
    Updated(Arc<Report>),
    /// The target report no longer exists; nothing changed
    Ignored,
    /// Only UI state changed
    UiChanged,
    /// The filter criterion changed
    FilterChanged,
}

impl From<Mutation> for Outcome {
    fn from(mutation: Mutation) -> Self {
        match mutation {
            Mutation::Applied(report) => Outcome::Updated(report),
            Mutation::Ignored => Outcome::Ignored,
        }
    }
}

/// One render pass worth of data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Store revision the frame was built from
    pub revision: u64,
    /// Active filter
    pub category: CategoryFilter,
    /// Markers for the filtered reports
    pub markers: Vec<MarkerView>,
    /// Sidebar shown in this layout
    pub sidebar_visible: bool,
    /// Sidebar contents
    pub sidebar: SidebarView,
    /// Detail modal, if a live report is selected
    pub detail: Option<DetailView>,
    /// Creation form state
    pub form: FormState,
}

/// A single user's client session
#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    store: ReportStore,
    ui: UiState,
    filter_view: FilterView,
    category: CategoryFilter,
}

impl Session {
    /// Start a session from configuration
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let user = config.session_user.clone();
        let store = match config.seed {
            SeedMode::Demo => ReportStore::seeded(user),
            SeedMode::Empty => ReportStore::new(user),
        };
        Self::with_store(config, store)
    }

    /// Start a session around an existing store
    #[must_use]
    pub fn with_store(config: ClientConfig, store: ReportStore) -> Self {
        tracing::info!(
            user = %store.session_user().id,
            reports = store.len(),
            "session started"
        );
        Self {
            config,
            store,
            ui: UiState::new(),
            filter_view: FilterView::new(),
            category: CategoryFilter::All,
        }
    }

    /// Configuration the session was started with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session user
    #[inline]
    #[must_use]
    pub fn session_user(&self) -> &SessionUser {
        self.store.session_user()
    }

    /// Current store snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        self.store.snapshot()
    }

    /// UI state
    #[inline]
    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Active filter
    #[inline]
    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// How often the filter projection was recomputed
    #[inline]
    #[must_use]
    pub fn filter_recomputations(&self) -> u64 {
        self.filter_view.recomputations()
    }

    /// Handle one intent
    ///
    /// # Errors
    /// Draft or comment input that fails validation. The store is untouched
    /// in that case and the form stays open.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, IntentError> {
        tracing::debug!(?intent, "dispatch");
        let outcome = match intent {
            Intent::CreateReport => self.ui_transition(UiIntent::CreateReport),
            Intent::MapClicked(location) => self.ui_transition(UiIntent::MapClicked(location)),
            Intent::CloseForm => self.ui_transition(UiIntent::FormClosed),
            Intent::SelectReport { id, is_mobile } => {
                self.ui_transition(UiIntent::ReportSelected { id, is_mobile })
            }
            Intent::CloseDetail => self.ui_transition(UiIntent::DetailClosed),
            Intent::ToggleSidebar => self.ui_transition(UiIntent::ToggleMobileSidebar),
            Intent::SubmitDraft(draft) => {
                let data = draft.validate()?;
                let report = self.store.submit(data);
                self.ui.form_closed();
                Outcome::Created(report)
            }
            Intent::ToggleSupport(id) => self.store.toggle_support(&id).into(),
            Intent::AddComment { id, content } => {
                let content = normalize_comment(&content)?;
                self.store.add_comment(&id, content).into()
            }
            Intent::SetCategory(category) => {
                self.category = category;
                Outcome::FilterChanged
            }
        };
        Ok(outcome)
    }

    fn ui_transition(&mut self, intent: UiIntent) -> Outcome {
        self.ui.apply(intent);
        Outcome::UiChanged
    }

    /// Selected report, re-resolved against the current snapshot
    #[must_use]
    pub fn selected_report(&self) -> Option<Arc<Report>> {
        self.ui.resolve_selection(&self.store.snapshot())
    }

    /// Reports passing the active filter
    pub fn filtered(&mut self) -> Vector<Arc<Report>> {
        let snapshot = self.store.snapshot();
        self.filter_view.project(&snapshot, self.category)
    }

    /// Draft for the creation form as currently opened
    #[must_use]
    pub fn draft(&self) -> ReportDraft {
        ReportDraft::for_form(self.ui.form())
    }

    /// Initial map centre given the geolocation provider's answer
    #[must_use]
    pub fn initial_center(&self, geolocation: Result<Location, GeolocationError>) -> Location {
        initial_center(geolocation, self.config.default_center)
    }

    /// Build every view from one snapshot
    pub fn render(&mut self, is_mobile: bool) -> Frame {
        let snapshot = self.store.snapshot();
        let filtered = self.filter_view.project(&snapshot, self.category);

        Frame {
            revision: snapshot.revision(),
            category: self.category,
            markers: markers(&filtered),
            sidebar_visible: self.ui.sidebar_visible(is_mobile),
            sidebar: SidebarView::build(
                &snapshot,
                &filtered,
                self.category,
                self.store.session_user(),
            ),
            detail: self.ui.resolve_selection(&snapshot).map(DetailView::new),
            form: self.ui.form(),
        }
    }
}

//! Randomized session simulator
//!
//! Drives a [`Session`] with seeded random intents and checks the store's
//! invariants after every step:
//! - ids stay unique
//! - new reports land at the head
//! - a support toggle moves the count by exactly one and flips the flag
//! - a comment grows the list by one and keeps every earlier comment in place
//! - intents aimed at unknown ids change nothing
//! - the selection always resolves to the live report

use crate::config::ClientConfig;
use crate::session::{Intent, Outcome, Session};
use civic_model::{Category, Location, ReportId};
use civic_store::ReportSnapshot;
use civic_view::{CategoryFilter, ReportDraft};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt::Write as _;

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of intents to dispatch
    pub intents: u64,
    /// Stop at the first violation
    pub stop_on_first_violation: bool,
    /// Session configuration
    pub client: ClientConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            intents: 1000,
            stop_on_first_violation: true,
            client: ClientConfig::default(),
        }
    }
}

/// A broken invariant
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Two reports share an id
    DuplicateId {
        /// Step number
        step: u64,
        /// Offending id
        id: ReportId,
    },
    /// A created report is not at the head, or the length is off
    NotPrepended {
        /// Step number
        step: u64,
    },
    /// Support count and flag moved inconsistently
    VoteMismatch {
        /// Step number
        step: u64,
        /// Report voted on
        id: ReportId,
    },
    /// Comment list did not grow by exactly one with history intact
    CommentMismatch {
        /// Step number
        step: u64,
        /// Report commented on
        id: ReportId,
    },
    /// An intent on an unknown id changed the store
    GhostMutation {
        /// Step number
        step: u64,
    },
    /// Selection resolved to something other than the live report
    StaleSelection {
        /// Step number
        step: u64,
    },
    /// Valid input was rejected
    UnexpectedRejection {
        /// Step number
        step: u64,
        /// Error text
        error: String,
    },
}

/// Statistics for simulation
#[derive(Debug, Clone, Default)]
pub struct SimulatorStats {
    /// Intents dispatched
    pub intents: u64,
    /// Reports created
    pub created: u64,
    /// Support toggles applied
    pub toggles: u64,
    /// Comments appended
    pub comments: u64,
    /// Mutations ignored because of an unknown id
    pub ignored: u64,
    /// Pure UI or filter transitions
    pub ui_transitions: u64,
}

/// Final report from simulator
#[derive(Debug, Clone)]
pub struct SimulatorReport {
    /// Configuration used
    pub config: SimulatorConfig,
    /// Counters
    pub stats: SimulatorStats,
    /// Everything that went wrong
    pub violations: Vec<Violation>,
    /// Reports in the store at the end
    pub final_reports: usize,
}

impl SimulatorReport {
    /// Check if simulation passed all criteria
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Generate text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== civicmap Simulator Report ===");
        let _ = writeln!(out);
        let _ = writeln!(out, "Seed: {}", self.config.seed);
        let _ = writeln!(out, "Intents: {}", self.stats.intents);
        let _ = writeln!(out, "Reports Created: {}", self.stats.created);
        let _ = writeln!(out, "Support Toggles: {}", self.stats.toggles);
        let _ = writeln!(out, "Comments Added: {}", self.stats.comments);
        let _ = writeln!(out, "Ignored (unknown id): {}", self.stats.ignored);
        let _ = writeln!(out, "UI Transitions: {}", self.stats.ui_transitions);
        let _ = writeln!(out, "Final Reports: {}", self.final_reports);
        let _ = writeln!(out);
        let _ = writeln!(out, "Violations: {}", self.violations.len());
        for violation in &self.violations {
            let _ = writeln!(out, "  - {violation:?}");
        }
        let _ = writeln!(
            out,
            "Status: {}",
            if self.passed() { "PASSED" } else { "FAILED" }
        );
        out
    }
}

struct Simulator {
    rng: StdRng,
    session: Session,
    stats: SimulatorStats,
    violations: Vec<Violation>,
}

impl Simulator {
    fn pick_id(&mut self, snapshot: &ReportSnapshot) -> ReportId {
        if snapshot.is_empty() || self.rng.gen_bool(0.1) {
            return ReportId::from("ghost");
        }
        let index = self.rng.gen_range(0..snapshot.len());
        snapshot.reports()[index].id.clone()
    }

    fn random_location(&mut self) -> Location {
        Location::new(
            self.rng.gen_range(52.40..52.60),
            self.rng.gen_range(13.30..13.50),
        )
    }

    fn random_category(&mut self) -> Category {
        Category::ALL[self.rng.gen_range(0..Category::ALL.len())]
    }

    fn next_intent(&mut self, snapshot: &ReportSnapshot, step: u64) -> Intent {
        match self.rng.gen_range(0..10) {
            0 => Intent::MapClicked(self.random_location()),
            1 => {
                let location = self.random_location();
                let category = self.random_category();
                Intent::SubmitDraft(
                    ReportDraft::new()
                        .with_title(format!("Simulated issue #{step}"))
                        .with_category(category)
                        .with_location(location),
                )
            }
            2 | 3 => Intent::ToggleSupport(self.pick_id(snapshot)),
            4 => Intent::AddComment {
                id: self.pick_id(snapshot),
                content: format!("comment at step {step}"),
            },
            5 => Intent::SelectReport {
                id: self.pick_id(snapshot),
                is_mobile: self.rng.gen_bool(0.5),
            },
            6 => Intent::CloseDetail,
            7 => Intent::ToggleSidebar,
            8 => {
                let filter = if self.rng.gen_bool(0.3) {
                    CategoryFilter::All
                } else {
                    CategoryFilter::Only(self.random_category())
                };
                Intent::SetCategory(filter)
            }
            _ => Intent::CloseForm,
        }
    }

    fn step(&mut self, step: u64) {
        let before = self.session.snapshot();
        let intent = self.next_intent(&before, step);
        self.stats.intents += 1;

        let outcome = match self.session.dispatch(intent.clone()) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.violations.push(Violation::UnexpectedRejection {
                    step,
                    error: err.to_string(),
                });
                return;
            }
        };
        let after = self.session.snapshot();

        self.check_unique_ids(&after, step);
        self.check_outcome(&intent, &outcome, &before, &after, step);
        self.check_selection(&after, step);
    }

    fn check_unique_ids(&mut self, snapshot: &ReportSnapshot, step: u64) {
        let mut seen = HashSet::new();
        for report in snapshot {
            if !seen.insert(report.id.clone()) {
                self.violations.push(Violation::DuplicateId {
                    step,
                    id: report.id.clone(),
                });
            }
        }
    }

    fn check_outcome(
        &mut self,
        intent: &Intent,
        outcome: &Outcome,
        before: &ReportSnapshot,
        after: &ReportSnapshot,
        step: u64,
    ) {
        match (intent, outcome) {
            (_, Outcome::Created(report)) => {
                self.stats.created += 1;
                let head_ok = after.reports().front().map(|r| &r.id) == Some(&report.id);
                if !head_ok || after.len() != before.len() + 1 {
                    self.violations.push(Violation::NotPrepended { step });
                }
            }
            (Intent::ToggleSupport(id), Outcome::Updated(_)) => {
                self.stats.toggles += 1;
                let consistent = match (before.get(id), after.get(id)) {
                    (Some(old), Some(new)) => {
                        let (old, new) = (old.votes, new.votes);
                        new.user_support != old.user_support
                            && if new.user_support {
                                new.supports == old.supports + 1
                            } else {
                                new.supports + 1 == old.supports
                            }
                    }
                    _ => false,
                };
                if !consistent {
                    self.violations.push(Violation::VoteMismatch {
                        step,
                        id: id.clone(),
                    });
                }
            }
            (Intent::AddComment { id, .. }, Outcome::Updated(_)) => {
                self.stats.comments += 1;
                let consistent = match (before.get(id), after.get(id)) {
                    (Some(old), Some(new)) => {
                        new.comment_count() == old.comment_count() + 1
                            && old.comments.iter().zip(new.comments.iter()).all(|(a, b)| a == b)
                    }
                    _ => false,
                };
                if !consistent {
                    self.violations.push(Violation::CommentMismatch {
                        step,
                        id: id.clone(),
                    });
                }
            }
            (_, Outcome::Ignored) => {
                self.stats.ignored += 1;
                if after.revision() != before.revision() {
                    self.violations.push(Violation::GhostMutation { step });
                }
            }
            _ => {
                self.stats.ui_transitions += 1;
            }
        }
    }

    fn check_selection(&mut self, snapshot: &ReportSnapshot, step: u64) {
        let Some(id) = self.session.ui().selected().cloned() else {
            return;
        };
        let resolved = self.session.selected_report();
        let live = snapshot.get(&id);
        let fresh = match (resolved.as_ref(), live) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        };
        if !fresh {
            self.violations.push(Violation::StaleSelection { step });
        }
    }
}

/// Run the simulator
#[must_use]
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let mut sim = Simulator {
        rng: StdRng::seed_from_u64(config.seed),
        session: Session::new(config.client.clone()),
        stats: SimulatorStats::default(),
        violations: Vec::new(),
    };

    for step in 0..config.intents {
        sim.step(step);
        if config.stop_on_first_violation && !sim.violations.is_empty() {
            tracing::warn!(step, "simulation stopped on violation");
            break;
        }
    }

    SimulatorReport {
        final_reports: sim.session.snapshot().len(),
        config,
        stats: sim.stats,
        violations: sim.violations,
    }
}

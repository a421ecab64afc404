//! Query controller.
//!
//! Owns the input text, the current `LocationRecord`, the search history, the
//! theme and the loading/pulse flags, and orchestrates lookups:
//!
//! 1. `submit` validates the query; a rejected query issues no lookup and
//!    leaves history alone.
//! 2. A valid non-empty query is recorded in the history (written through to
//!    the store) and the input is cleared.
//! 3. Exactly one lookup is spawned. Lookups are never queued or cancelled;
//!    by default whichever response resolves last wins.
//! 4. On success the record is replaced wholesale and a short pulse flag is
//!    raised; failures only produce a toast.
//!
//! State lives behind a `std::sync::Mutex` that is never held across an await.
//! Views observe changes through the `ControllerEvent` channel returned by
//! [`QueryController::new`].

mod events;
mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::config::{Config, ResponseOrdering};
use crate::error_handling::{LookupError, ValidationError};
use crate::geolocation::{GeoProvider, LocationRecord};
use crate::storage::{
    detect_system_theme, load_history, load_theme, save_history, save_theme, KeyValueStore,
    ThemePreference,
};
use crate::validation::{classify_query, QueryKind};

// Re-export public API
pub use events::{ControllerEvent, Notification, NotificationKind};
pub use state::{ControllerSnapshot, LookupStats};
use state::ControllerState;

/// Result of a lookup once it has resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The record was replaced with this one.
    Applied(LocationRecord),
    /// A newer submission was already shown; this response was dropped.
    Discarded(LocationRecord),
    /// The lookup failed; state is unchanged.
    Failed(LookupError),
}

/// Handle to one in-flight lookup.
#[derive(Debug)]
pub struct LookupHandle {
    generation: u64,
    task: JoinHandle<LookupOutcome>,
}

impl LookupHandle {
    /// Position of this lookup in submission order, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the lookup to resolve and its outcome to be applied.
    pub async fn wait(self) -> Result<LookupOutcome, JoinError> {
        self.task.await
    }
}

/// What `submit` did with a query.
#[derive(Debug)]
pub enum Submission {
    Dispatched(LookupHandle),
    Rejected(ValidationError),
}

impl Submission {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Submission::Dispatched(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    allow_domains: bool,
    ordering: ResponseOrdering,
    pulse: Duration,
}

struct Shared<P> {
    provider: P,
    store: Arc<dyn KeyValueStore>,
    settings: Settings,
    state: Mutex<ControllerState>,
    events: mpsc::UnboundedSender<ControllerEvent>,
}

impl<P: GeoProvider> Shared<P> {
    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: ControllerEvent) {
        // A dropped receiver only means nobody is watching anymore
        let _ = self.events.send(event);
    }

    fn emit_all(&self, events: Vec<ControllerEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Applies a resolved lookup to the state.
    fn complete(
        self: &Arc<Self>,
        generation: u64,
        target: Option<&str>,
        result: Result<LocationRecord, LookupError>,
    ) -> LookupOutcome {
        let mut events = Vec::new();
        let mut pulse = None;

        let outcome = {
            let mut state = self.state();
            state.in_flight = state.in_flight.saturating_sub(1);

            let outcome = match result {
                Ok(record)
                    if self.settings.ordering == ResponseOrdering::LatestSubmissionWins
                        && generation < state.applied_generation =>
                {
                    debug!(
                        "Discarding stale response #{generation} (showing #{})",
                        state.applied_generation
                    );
                    state.stats.discarded += 1;
                    LookupOutcome::Discarded(record)
                }
                Ok(record) => {
                    info!("Resolved {} to {}", target.unwrap_or("self"), record.location_label());
                    state.record = record.clone();
                    state.applied_generation = state.applied_generation.max(generation);
                    state.just_updated = true;
                    state.pulse_generation += 1;
                    state.stats.succeeded += 1;
                    pulse = Some(state.pulse_generation);
                    events.push(ControllerEvent::LocationChanged(record.clone()));
                    LookupOutcome::Applied(record)
                }
                Err(error) => {
                    warn!("Lookup for {} failed: {error}", target.unwrap_or("self"));
                    state.stats.failed += 1;
                    events.push(ControllerEvent::Notify(Notification::for_lookup_error(
                        target, &error,
                    )));
                    LookupOutcome::Failed(error)
                }
            };

            if state.in_flight == 0 {
                events.push(ControllerEvent::LoadingChanged(false));
            }
            outcome
        };

        self.emit_all(events);
        if let Some(pulse_generation) = pulse {
            self.schedule_pulse_end(pulse_generation);
        }
        outcome
    }

    fn schedule_pulse_end(self: &Arc<Self>, pulse_generation: u64) {
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(shared.settings.pulse).await;
            let ended = {
                let mut state = shared.state();
                if state.pulse_generation == pulse_generation {
                    state.just_updated = false;
                    true
                } else {
                    false
                }
            };
            if ended {
                shared.emit(ControllerEvent::PulseEnded);
            }
        });
    }
}

/// The query controller. Cheap to clone; clones share state.
///
/// Lookups are spawned onto the current Tokio runtime, so `submit`,
/// `resolve` and `initial_load` must be called from within one.
pub struct QueryController<P> {
    shared: Arc<Shared<P>>,
}

impl<P> Clone for QueryController<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: GeoProvider> QueryController<P> {
    /// Creates a controller, rehydrating history and theme from `store`.
    ///
    /// The theme falls back to the environment's preference when the store
    /// has none. Returns the receiving end of the event channel.
    pub fn new(
        provider: P,
        store: Arc<dyn KeyValueStore>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let history = load_history(store.as_ref(), config.history_cap);
        let theme = load_theme(store.as_ref(), detect_system_theme());
        debug!(
            "Controller initialized with {} history entries, {} theme, {} provider",
            history.len(),
            theme,
            provider.name()
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Shared {
            provider,
            store,
            settings: Settings {
                allow_domains: config.allow_domains,
                ordering: config.response_ordering,
                pulse: config.pulse_duration(),
            },
            state: Mutex::new(ControllerState::new(history, theme)),
            events: tx,
        };
        (
            Self {
                shared: Arc::new(shared),
            },
            rx,
        )
    }

    /// Resolves the caller's own address, as done on first render.
    pub fn initial_load(&self) -> LookupHandle {
        self.resolve(None)
    }

    pub fn set_input(&self, text: &str) {
        self.shared.state().input = text.to_string();
    }

    /// Submits a query.
    ///
    /// An empty query resolves the caller's own address and is not recorded
    /// in the history. A rejected query keeps the input text so it can be
    /// corrected.
    pub fn submit(&self, query: &str) -> Submission {
        let query = query.trim();

        let kind = match classify_query(query, self.shared.settings.allow_domains) {
            Ok(kind) => kind,
            Err(error) => {
                warn!("Rejected query: {error}");
                self.shared.state().stats.rejected += 1;
                self.shared
                    .emit(ControllerEvent::Notify(Notification::invalid_format(&error)));
                return Submission::Rejected(error);
            }
        };

        if kind == QueryKind::SelfAddress {
            self.shared.state().input.clear();
            return Submission::Dispatched(self.resolve(None));
        }

        let entries = {
            let mut state = self.shared.state();
            state.input.clear();
            state.history.record(query);
            if let Err(e) = save_history(self.shared.store.as_ref(), &state.history) {
                warn!("Failed to persist search history: {e}");
            }
            state.history.entries().to_vec()
        };
        self.shared.emit(ControllerEvent::HistoryChanged(entries));

        Submission::Dispatched(self.resolve(Some(query.to_string())))
    }

    /// Issues one lookup and applies its outcome when it resolves.
    ///
    /// Does not validate or touch the history; `submit` is the user-facing
    /// entry point.
    pub fn resolve(&self, target: Option<String>) -> LookupHandle {
        let (generation, became_busy) = {
            let mut state = self.shared.state();
            state.issued_generation += 1;
            state.in_flight += 1;
            state.stats.issued += 1;
            (state.issued_generation, state.in_flight == 1)
        };
        if became_busy {
            self.shared.emit(ControllerEvent::LoadingChanged(true));
        }
        debug!(
            "Lookup #{generation} for {} via {}",
            target.as_deref().unwrap_or("self"),
            self.shared.provider.name()
        );

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let result = shared.provider.lookup(target.as_deref()).await;
            shared.complete(generation, target.as_deref(), result)
        });
        LookupHandle { generation, task }
    }

    /// Flips and persists the theme.
    pub fn toggle_theme(&self) -> ThemePreference {
        let theme = {
            let mut state = self.shared.state();
            state.theme = state.theme.toggled();
            if let Err(e) = save_theme(self.shared.store.as_ref(), state.theme) {
                warn!("Failed to persist theme: {e}");
            }
            state.theme
        };
        self.shared.emit(ControllerEvent::ThemeChanged(theme));
        theme
    }

    /// Empties the history and removes its persisted form.
    pub fn clear_history(&self) {
        {
            let mut state = self.shared.state();
            state.history.clear();
            if let Err(e) = save_history(self.shared.store.as_ref(), &state.history) {
                warn!("Failed to clear persisted search history: {e}");
            }
        }
        self.shared.emit(ControllerEvent::HistoryChanged(Vec::new()));
        self.shared
            .emit(ControllerEvent::Notify(Notification::history_cleared()));
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.shared.state().snapshot()
    }

    pub fn record(&self) -> LocationRecord {
        self.shared.state().record.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.shared.state().history.entries().to_vec()
    }

    pub fn theme(&self) -> ThemePreference {
        self.shared.state().theme
    }

    pub fn input(&self) -> String {
        self.shared.state().input.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state().in_flight > 0
    }

    pub fn stats(&self) -> LookupStats {
        self.shared.state().stats
    }
}

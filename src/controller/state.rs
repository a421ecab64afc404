//! Controller state.

use crate::geolocation::LocationRecord;
use crate::storage::{SearchHistory, ThemePreference};

/// Counters over the controller's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStats {
    pub issued: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Responses dropped as stale (only with `LatestSubmissionWins`).
    pub discarded: usize,
    /// Submissions rejected by validation.
    pub rejected: usize,
}

#[derive(Debug)]
pub(crate) struct ControllerState {
    pub(crate) input: String,
    pub(crate) record: LocationRecord,
    pub(crate) history: SearchHistory,
    pub(crate) theme: ThemePreference,
    /// Lookups issued and not yet resolved.
    pub(crate) in_flight: usize,
    pub(crate) just_updated: bool,
    /// Bumped on every pulse so an older timer cannot end a newer pulse.
    pub(crate) pulse_generation: u64,
    /// Generation handed to the most recent lookup.
    pub(crate) issued_generation: u64,
    /// Generation of the response currently shown.
    pub(crate) applied_generation: u64,
    pub(crate) stats: LookupStats,
}

impl ControllerState {
    pub(crate) fn new(history: SearchHistory, theme: ThemePreference) -> Self {
        Self {
            input: String::new(),
            record: LocationRecord::default(),
            history,
            theme,
            in_flight: 0,
            just_updated: false,
            pulse_generation: 0,
            issued_generation: 0,
            applied_generation: 0,
            stats: LookupStats::default(),
        }
    }

    pub(crate) fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            input: self.input.clone(),
            record: self.record.clone(),
            history: self.history.entries().to_vec(),
            theme: self.theme,
            loading: self.in_flight > 0,
            just_updated: self.just_updated,
        }
    }
}

/// Point-in-time copy of what a view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub input: String,
    pub record: LocationRecord,
    pub history: Vec<String>,
    pub theme: ThemePreference,
    pub loading: bool,
    pub just_updated: bool,
}

//! Bounded, deduplicated, most-recent-first search history.

use log::warn;

use super::store::KeyValueStore;
use crate::config::HISTORY_KEY;

/// Past queries, newest first.
///
/// Membership behaves like a set (no duplicates) while order tracks recency:
/// recording a query already present moves it to the front. Length never
/// exceeds the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
    cap: usize,
}

impl SearchHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Builds a history from stored entries, dropping duplicates (first one
    /// wins) and anything past the cap.
    pub fn from_entries(entries: Vec<String>, cap: usize) -> Self {
        let mut history = Self::new(cap);
        for entry in entries {
            if history.entries.len() == cap {
                break;
            }
            if !history.entries.contains(&entry) {
                history.entries.push(entry);
            }
        }
        history
    }

    /// Moves or inserts `query` at the front, then truncates to the cap.
    pub fn record(&mut self, query: &str) {
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.cap);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// Reads the persisted history. Unreadable or malformed data yields an empty
/// history and a warning.
pub fn load_history(store: &dyn KeyValueStore, cap: usize) -> SearchHistory {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return SearchHistory::new(cap),
        Err(e) => {
            warn!("Failed to read search history: {e}");
            return SearchHistory::new(cap);
        }
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(entries) => SearchHistory::from_entries(entries, cap),
        Err(e) => {
            warn!("Ignoring malformed search history: {e}");
            SearchHistory::new(cap)
        }
    }
}

/// Writes the history through to the store; an empty history removes the key.
pub fn save_history(
    store: &dyn KeyValueStore,
    history: &SearchHistory,
) -> Result<(), crate::error_handling::StoreError> {
    if history.is_empty() {
        return store.remove(HISTORY_KEY);
    }
    let raw = serde_json::to_string(history.entries())?;
    store.set(HISTORY_KEY, &raw)
}

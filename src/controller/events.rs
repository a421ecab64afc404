//! Events emitted by the controller: toasts and state-change signals.

use strum_macros::EnumIter;

use crate::error_handling::{LookupError, ValidationError};
use crate::geolocation::LocationRecord;
use crate::storage::ThemePreference;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn invalid_format(error: &ValidationError) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: format!("Invalid input: {error}"),
        }
    }

    pub fn not_found(target: Option<&str>, reason: &str) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: format!(
                "No location found for {} ({reason})",
                target.unwrap_or("your address")
            ),
        }
    }

    pub fn network_error(error: &LookupError) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: format!("Network error: {error}"),
        }
    }

    pub fn history_cleared() -> Self {
        Self {
            kind: NotificationKind::Success,
            message: "Search history cleared".to_string(),
        }
    }

    /// Picks the toast for a failed lookup.
    pub fn for_lookup_error(target: Option<&str>, error: &LookupError) -> Self {
        match error {
            LookupError::NotFound(reason) => Self::not_found(target, reason),
            LookupError::Transport { .. } => Self::network_error(error),
        }
    }
}

/// Everything a view needs to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// A toast to show.
    Notify(Notification),
    /// The location record was replaced.
    LocationChanged(LocationRecord),
    /// The "just updated" pulse ended.
    PulseEnded,
    /// `true` when the first lookup starts, `false` when the last one ends.
    LoadingChanged(bool),
    HistoryChanged(Vec<String>),
    ThemeChanged(ThemePreference),
}

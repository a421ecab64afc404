//! Theme preference and its persistence.

use std::str::FromStr;

use log::warn;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::store::KeyValueStore;
use crate::config::THEME_KEY;
use crate::error_handling::StoreError;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreference::iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

/// Interprets a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background indices 0-6 and 8 are the dark ANSI colors. Returns `None`
/// when the value is absent or unparsable.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Option<ThemePreference> {
    let bg = value?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    if bg <= 6 || bg == 8 {
        Some(ThemePreference::Dark)
    } else {
        Some(ThemePreference::Light)
    }
}

/// The environment's color-scheme preference, `Light` when unknown.
pub fn detect_system_theme() -> ThemePreference {
    let colorfgbg = std::env::var("COLORFGBG").ok();
    theme_from_colorfgbg(colorfgbg.as_deref()).unwrap_or(ThemePreference::Light)
}

/// Reads the persisted theme, falling back to `default` when unset or invalid.
pub fn load_theme(store: &dyn KeyValueStore, default: ThemePreference) -> ThemePreference {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring stored theme: {e}");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            warn!("Failed to read theme: {e}");
            default
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, theme: ThemePreference) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}

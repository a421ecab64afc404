//! Persistence port.
//!
//! The controller never touches a storage medium directly; it receives a
//! `KeyValueStore` and reads the search history and theme once at startup,
//! then writes through on every mutation. Two implementations exist: a JSON
//! file for the CLI and an in-memory map for tests and fallback.

mod history;
mod store;
mod theme;

// Re-export public API
pub use history::{load_history, save_history, SearchHistory};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use theme::{detect_system_theme, load_theme, save_theme, theme_from_colorfgbg, ThemePreference};

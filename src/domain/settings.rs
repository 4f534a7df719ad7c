//! User preference record.

use serde::{Deserialize, Serialize};

/// Sort order for the notes list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesSortKey {
    #[default]
    LastUpdated,
    Title,
    CreatedDate,
}

/// A flat record of user preferences, persisted as a single value under
/// the fixed `settings` key.
///
/// `is_open` is UI state (whether the settings panel is showing) and is
/// never written to the store: it is skipped during serialization and
/// falls back to `false` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Whether the settings panel is open. Transient, never persisted.
    #[serde(skip)]
    pub is_open: bool,

    /// Render the markdown preview pane.
    pub preview_markdown: bool,

    /// Use the dark color theme.
    pub dark_theme: bool,

    /// Show the sidebar.
    pub sidebar_visible: bool,

    /// Sort order for the notes list.
    pub notes_sort_key: NotesSortKey,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_open: false,
            preview_markdown: false,
            dark_theme: false,
            sidebar_visible: true,
            notes_sort_key: NotesSortKey::LastUpdated,
        }
    }
}

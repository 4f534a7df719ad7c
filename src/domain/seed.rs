//! Default records materialized on first use.

use crate::domain::Note;

/// Body of the scratchpad note seeded for every user.
pub const SCRATCHPAD_TEXT: &str = "# Scratchpad\n\nThe easiest note to find.";

/// Body of the welcome note seeded for brand-new users.
pub const WELCOME_TEXT: &str = "\
# Welcome to Satchel!

Satchel is the storage layer behind a free, open-source notes app for
the web. Your notes live in local storage by default and can sync to a
hosted record database when one is configured.

## Features

- **Plain text notes** - take notes in an IDE-like environment that makes no assumptions
- **Markdown preview** - view rendered HTML
- **Categories** - file notes into categories you define
- **Favorites** - pin the notes you return to
- **Scratchpad** - one always-present note for quick capture
- **Search notes** - easily search all notes, or notes within a category
- **Local first** - notes are stored on your machine and are available for download and export to you alone
- **No tracking or analytics** - 'nuff said
";

/// Builds the scratchpad seed note: fresh id, current timestamps, the
/// scratchpad flag set.
pub fn scratchpad_note() -> Note {
    Note {
        scratchpad: true,
        ..Note::new(SCRATCHPAD_TEXT)
    }
}

/// Builds the welcome seed note: fresh id, current timestamps, no
/// scratchpad flag.
pub fn welcome_note() -> Note {
    Note::new(WELCOME_TEXT)
}

//! Persistence adapter: the per-collection read/write API.

use crate::domain::{Category, Note, NoteId, Settings, seed};
use crate::store::{Collection, LocalStore, RecordStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Message surfaced for missing or malformed records when the caller
/// does not supply one.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Fixed key for the category list record.
const CATEGORIES_KEY: &str = "categories";

/// Fixed key for the settings record.
const SETTINGS_KEY: &str = "settings";

/// Literal snapshot-slot keys used by `save_state`.
const STATE_CATEGORIES_KEY: &str = "categories";
const STATE_NOTES_KEY: &str = "notes";

/// Errors surfaced by the persistence adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No record exists under the requested key.
    #[error("{message}")]
    Missing { message: String },

    /// The fetched payload does not have the expected shape.
    #[error("{message}")]
    Malformed { message: String },

    /// One or more notes in a bulk save failed to persist.
    #[error("failed to save {} note(s)", failed.len())]
    PartialSave { failed: Vec<NoteId> },

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdapterError {
    fn missing(message: &str) -> Self {
        Self::Missing {
            message: message.to_string(),
        }
    }

    fn malformed(message: &str) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// A whole-app snapshot: every category and every note.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub categories: Vec<Category>,
    pub notes: Vec<Note>,
}

/// A single-note save together with the current category list.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteUpdate {
    pub note: Note,
    pub categories: Vec<Category>,
}

/// The persistence adapter.
///
/// Reads and writes the three record collections through an injected
/// [`RecordStore`] (hosted or local, interchangeable) and keeps
/// whole-app snapshots in a [`LocalStore`]'s serialized-text slots.
/// Every operation is a single request/response exchange with the
/// store; there is no internal state.
///
/// Collections are overwritten wholesale with no cross-session
/// coordination: concurrent saves race last-write-wins.
pub struct Adapter {
    records: Arc<dyn RecordStore>,
    state: LocalStore,
}

impl Adapter {
    /// Creates an adapter over an injected record store, with `state`
    /// holding the local snapshot slots.
    pub fn new(records: Arc<dyn RecordStore>, state: LocalStore) -> Self {
        Self { records, state }
    }

    /// Creates an all-local adapter: one store serves both as the
    /// record store and the snapshot store.
    pub fn with_local(store: LocalStore) -> Self {
        Self {
            records: Arc::new(store.clone()),
            state: store,
        }
    }

    // ===========================================
    // Reads
    // ===========================================

    /// Fetches all notes.
    ///
    /// First-run behavior: when the store holds no notes at all, the
    /// seed pair `[scratchpad, welcome]` is returned. When notes exist
    /// but none carries the scratchpad flag, a freshly generated
    /// scratchpad note is prepended ahead of the originals. A payload
    /// that is present but not a list fails with the generic error.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Malformed` when the fetched payload is
    /// not a list of valid note records.
    pub async fn request_notes(&self) -> AdapterResult<Vec<Note>> {
        let raw = self.records.fetch(Collection::Notes).await?;

        let items = match raw {
            None => {
                debug!("no notes in store, seeding default content");
                return Ok(vec![seed::scratchpad_note(), seed::welcome_note()]);
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                warn!(kind = json_kind(&other), "notes payload is not a list");
                return Err(AdapterError::malformed(DEFAULT_ERROR_MESSAGE));
            }
        };

        let notes: Vec<Note> = match serde_json::from_value(Value::Array(items)) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(error = %err, "notes payload failed validation");
                return Err(AdapterError::malformed(DEFAULT_ERROR_MESSAGE));
            }
        };

        if notes.iter().any(|note| note.scratchpad) {
            Ok(notes)
        } else {
            debug!("no scratchpad note in store, generating one");
            let mut seeded = Vec::with_capacity(notes.len() + 1);
            seeded.push(seed::scratchpad_note());
            seeded.extend(notes);
            Ok(seeded)
        }
    }

    /// Fetches the category list stored under the fixed key.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Missing` with the generic message when no
    /// record exists.
    pub async fn request_categories(&self) -> AdapterResult<Vec<Category>> {
        self.request_categories_with_message(DEFAULT_ERROR_MESSAGE)
            .await
    }

    /// Like [`request_categories`](Self::request_categories), surfacing
    /// `message` instead of the generic one.
    pub async fn request_categories_with_message(
        &self,
        message: &str,
    ) -> AdapterResult<Vec<Category>> {
        match self.records.get(Collection::Categories, CATEGORIES_KEY).await? {
            Some(value) => decode(value, message),
            None => Err(AdapterError::missing(message)),
        }
    }

    /// Fetches the settings record stored under the fixed key.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Missing` with the generic message when no
    /// record exists.
    pub async fn request_settings(&self) -> AdapterResult<Settings> {
        self.request_settings_with_message(DEFAULT_ERROR_MESSAGE)
            .await
    }

    /// Like [`request_settings`](Self::request_settings), surfacing
    /// `message` instead of the generic one.
    pub async fn request_settings_with_message(&self, message: &str) -> AdapterResult<Settings> {
        match self.records.get(Collection::Settings, SETTINGS_KEY).await? {
            Some(value) => decode(value, message),
            None => Err(AdapterError::missing(message)),
        }
    }

    // ===========================================
    // Writes
    // ===========================================

    /// Persists each note individually, keyed by its id, overwriting
    /// any existing record with that key.
    ///
    /// Writes are independent: there is no batching and no atomicity
    /// across the set, so a failure partway leaves earlier notes
    /// updated. Failed writes are not dropped silently; each is logged
    /// and the ids are reported together.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::PartialSave` naming every note that
    /// failed to persist.
    pub async fn save_notes(&self, notes: &[Note]) -> AdapterResult<()> {
        let mut failed = Vec::new();

        for note in notes {
            let result = match serde_json::to_value(note) {
                Ok(value) => {
                    self.records
                        .put(Collection::Notes, &note.id.to_string(), value)
                        .await
                }
                Err(err) => Err(StoreError::from(err)),
            };
            if let Err(err) = result {
                warn!(id = %note.id, error = %err, "failed to save note");
                failed.push(note.id.clone());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AdapterError::PartialSave { failed })
        }
    }

    /// Persists one note by id, then the full category list, and
    /// returns both.
    pub async fn save_note(&self, update: NoteUpdate) -> AdapterResult<NoteUpdate> {
        let value = serde_json::to_value(&update.note).map_err(StoreError::from)?;
        self.records
            .put(Collection::Notes, &update.note.id.to_string(), value)
            .await?;
        self.put_categories(&update.categories).await?;
        Ok(update)
    }

    /// Persists the full category list under the fixed key and echoes
    /// the input back.
    pub async fn save_categories(&self, categories: Vec<Category>) -> AdapterResult<Vec<Category>> {
        self.put_categories(&categories).await?;
        Ok(categories)
    }

    /// Persists the settings record under the fixed key. The transient
    /// `is_open` flag never reaches the store.
    pub async fn save_settings(&self, settings: &Settings) -> AdapterResult<()> {
        let value = serde_json::to_value(settings).map_err(StoreError::from)?;
        self.records
            .put(Collection::Settings, SETTINGS_KEY, value)
            .await?;
        Ok(())
    }

    /// Writes both collections to the local snapshot slots as
    /// serialized text, reads them back, and returns the parsed
    /// round-trip values. A slot that was never written reads back as
    /// an empty list.
    pub async fn save_state(&self, snapshot: StateSnapshot) -> AdapterResult<StateSnapshot> {
        let categories = serde_json::to_string(&snapshot.categories).map_err(StoreError::from)?;
        let notes = serde_json::to_string(&snapshot.notes).map_err(StoreError::from)?;
        self.state.put_state(STATE_CATEGORIES_KEY, &categories)?;
        self.state.put_state(STATE_NOTES_KEY, &notes)?;

        Ok(StateSnapshot {
            categories: self.read_state_slot(STATE_CATEGORIES_KEY)?,
            notes: self.read_state_slot(STATE_NOTES_KEY)?,
        })
    }

    fn read_state_slot<T: serde::de::DeserializeOwned>(&self, key: &str) -> AdapterResult<Vec<T>> {
        match self.state.get_state(key)? {
            Some(text) => Ok(serde_json::from_str(&text).map_err(StoreError::from)?),
            None => Ok(Vec::new()),
        }
    }

    async fn put_categories(&self, categories: &[Category]) -> AdapterResult<()> {
        let value = serde_json::to_value(categories).map_err(StoreError::from)?;
        self.records
            .put(Collection::Categories, CATEGORIES_KEY, value)
            .await?;
        Ok(())
    }
}

/// Validates a fetched value into its typed record, surfacing the
/// contract message when the shape is wrong.
fn decode<T: serde::de::DeserializeOwned>(value: Value, message: &str) -> AdapterResult<T> {
    serde_json::from_value(value).map_err(|err| {
        warn!(error = %err, "stored record failed validation");
        AdapterError::malformed(message)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_error_displays_its_message() {
        let err = AdapterError::missing(DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[test]
    fn malformed_error_displays_caller_override() {
        let err = AdapterError::malformed("No categories yet");
        assert_eq!(err.to_string(), "No categories yet");
    }

    #[test]
    fn partial_save_error_counts_failures() {
        let err = AdapterError::PartialSave {
            failed: vec![NoteId::new(), NoteId::new()],
        };
        assert_eq!(err.to_string(), "failed to save 2 note(s)");
    }

    #[tokio::test]
    async fn with_local_serves_records_and_state_from_one_store() {
        let adapter = Adapter::with_local(LocalStore::open_in_memory().unwrap());
        let saved = adapter
            .save_categories(vec![Category::new("work")])
            .await
            .unwrap();
        let fetched = adapter.request_categories().await.unwrap();
        assert_eq!(saved, fetched);
    }
}

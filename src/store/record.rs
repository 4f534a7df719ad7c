//! RecordStore trait, collection names, and store error types.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The three logical collections held by a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Individual note records, keyed by note id.
    Notes,
    /// The full category list, stored as one value under a fixed key.
    Categories,
    /// The settings record, stored as one value under a fixed key.
    Settings,
}

impl Collection {
    /// Returns the collection name used on the wire and in the local
    /// schema.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Notes => "notes",
            Collection::Categories => "categories",
            Collection::Settings => "settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Errors that can occur while talking to a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An HTTP transport failure reaching the hosted store.
    #[error("http transport error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The hosted store answered with an unexpected status.
    #[error("record store returned status {code}")]
    Status { code: u16 },

    /// A local database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A key-addressed collection store.
///
/// This is the seam between the persistence adapter and its backing
/// stores: the hosted record database and the embedded local store both
/// implement it, so an adapter can be constructed over either. Values
/// cross the trait as raw JSON so the adapter can observe the shape of
/// whatever the store actually holds and validate it on read.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches the value stored under `key`, or `None` when absent.
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Value>>;

    /// Inserts or overwrites the value stored under `key`.
    async fn put(&self, collection: Collection, key: &str, value: Value) -> StoreResult<()>;

    /// Fetches every record in the collection as one raw payload.
    ///
    /// Returns `None` when the collection holds no records; an empty
    /// collection reads back as absent.
    async fn fetch(&self, collection: Collection) -> StoreResult<Option<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collection_keys_are_the_fixed_names() {
        assert_eq!(Collection::Notes.key(), "notes");
        assert_eq!(Collection::Categories.key(), "categories");
        assert_eq!(Collection::Settings.key(), "settings");
    }

    #[test]
    fn collection_displays_as_its_key() {
        assert_eq!(Collection::Settings.to_string(), "settings");
    }

    #[test]
    fn status_error_displays_code() {
        let err = StoreError::Status { code: 503 };
        assert!(err.to_string().contains("503"));
    }
}

//! Shared helpers and stub stores for adapter integration tests.

use async_trait::async_trait;
use satchel::adapter::Adapter;
use satchel::domain::{Category, Note, NoteId};
use satchel::store::{Collection, LocalStore, RecordStore, StoreError, StoreResult};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Builds an all-local adapter over a fresh in-memory store, returning
/// the store too so tests can inspect what was actually written.
pub fn local_adapter() -> (Adapter, LocalStore) {
    let store = LocalStore::open_in_memory().expect("in-memory store should open");
    (Adapter::with_local(store.clone()), store)
}

pub fn sample_note(text: &str) -> Note {
    Note::new(text)
}

/// Builds a note whose id and timestamps come from a fixed instant, so
/// key-ordered store scans are deterministic across test runs.
pub fn dated_note(text: &str, rfc3339: &str) -> Note {
    let instant = chrono::DateTime::parse_from_rfc3339(rfc3339)
        .expect("test timestamp should parse")
        .with_timezone(&chrono::Utc);
    Note {
        id: NoteId::from_datetime(instant),
        created: instant,
        last_updated: instant,
        ..Note::new(text)
    }
}

pub fn sample_category(name: &str) -> Category {
    Category::new(name)
}

/// Record store that answers every fetch with a fixed raw payload, for
/// driving the malformed-payload branch.
pub struct FixedPayloadStore {
    pub payload: Value,
}

#[async_trait]
impl RecordStore for FixedPayloadStore {
    async fn get(&self, _collection: Collection, _key: &str) -> StoreResult<Option<Value>> {
        Ok(None)
    }

    async fn put(&self, _collection: Collection, _key: &str, _value: Value) -> StoreResult<()> {
        Ok(())
    }

    async fn fetch(&self, _collection: Collection) -> StoreResult<Option<Value>> {
        Ok(Some(self.payload.clone()))
    }
}

/// Record store that refuses writes for a chosen set of keys and
/// delegates everything else, for driving partial-save failures.
pub struct FailingPutStore {
    pub inner: LocalStore,
    pub fail_keys: HashSet<String>,
}

#[async_trait]
impl RecordStore for FailingPutStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Value>> {
        self.inner.get(collection, key).await
    }

    async fn put(&self, collection: Collection, key: &str, value: Value) -> StoreResult<()> {
        if self.fail_keys.contains(key) {
            return Err(StoreError::Status { code: 500 });
        }
        self.inner.put(collection, key, value).await
    }

    async fn fetch(&self, collection: Collection) -> StoreResult<Option<Value>> {
        self.inner.fetch(collection).await
    }
}

/// Adapter whose record store fails puts for the given keys; snapshot
/// state still lives in the returned local store.
pub fn failing_adapter(fail_keys: HashSet<String>) -> (Adapter, LocalStore) {
    let store = LocalStore::open_in_memory().expect("in-memory store should open");
    let records = FailingPutStore {
        inner: store.clone(),
        fail_keys,
    };
    (Adapter::new(Arc::new(records), store.clone()), store)
}

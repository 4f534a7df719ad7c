//! satchel - persistence for markdown notes, categories, and settings
//!
//! satchel is the storage layer of a note-taking app: a uniform async
//! read/write API over three record collections (notes, categories,
//! settings) backed by either a hosted record database or an embedded
//! local store, with default content seeded for first-time users.
//!
//! ```no_run
//! use satchel::adapter::Adapter;
//! use satchel::store::LocalStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = LocalStore::open_in_memory()?;
//! let adapter = Adapter::with_local(store);
//! let notes = adapter.request_notes().await?;
//! assert!(notes[0].scratchpad);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod store;

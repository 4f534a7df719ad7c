//! Backing stores: the RecordStore seam and its two implementations

mod local;
mod record;
mod remote;

pub use local::LocalStore;
pub use record::{Collection, RecordStore, StoreError, StoreResult};
pub use remote::{RemoteConfig, RemoteStore};

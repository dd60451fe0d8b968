//! Durable player snapshot.
//!
//! The player writes a [`Snapshot`] after every mutation and reads one back
//! exactly once at startup. Reads never fail: missing or damaged data simply
//! means there is nothing to restore.

mod snapshot;
mod store;

pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use store::{JsonFileStore, MemoryStore, PersistError, SnapshotStore};

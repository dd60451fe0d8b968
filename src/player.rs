//! The playback state container.
//!
//! `Player` owns the current track, both queues, the repeat and shuffle
//! flags and the mirrored transport state. Ordering work is delegated to
//! [`crate::queue`] and [`crate::shuffle`]; every mutation is written through
//! the injected [`crate::persist::SnapshotStore`].

mod model;
mod types;

pub use model::Player;
pub use types::*;

//! Playback orchestration for a personal music library: what is playing,
//! what plays next and in what order.
//!
//! [`player::Player`] is the entry point. It owns the queues and playback
//! modes, persists itself through a [`persist::SnapshotStore`], and drives an
//! [`output::Output`] one way through [`output::OutputCmd`]s.

pub mod catalog;
pub mod config;
pub mod library;
pub mod output;
pub mod persist;
pub mod player;
pub mod queue;
pub mod shuffle;
pub mod sync;
pub mod validate;

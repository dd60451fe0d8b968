//! Configuration loader and schema types.
//!
//! This module exposes the settings that seed a fresh player, locate the
//! snapshot file and drive the local library scan.

mod load;
mod schema;

pub use load::{default_config_path, default_snapshot_path, resolve_config_path};
pub use schema::*;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::library::Track;
use crate::player::RepeatMode;

/// Bumped whenever the layout changes in a way older readers cannot handle.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted projection of the player. Transport flags and elapsed time
/// are session-only and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub version: u32,
    pub current_track: Option<Track>,
    pub volume: f32,
    pub queue: Vec<Track>,
    pub origin_queue: Vec<Track>,
    pub repeat_mode: RepeatMode,
    pub is_shuffle: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            current_track: None,
            volume: 1.0,
            queue: Vec::new(),
            origin_queue: Vec::new(),
            repeat_mode: RepeatMode::Off,
            is_shuffle: false,
        }
    }
}

impl Snapshot {
    /// Parse stored bytes. Anything unparsable, or written by a newer
    /// version, yields `None`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let snapshot: Snapshot = match serde_json::from_slice(bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!("discarding unreadable player snapshot: {e}");
                return None;
            }
        };
        if snapshot.version > SNAPSHOT_VERSION {
            warn!(
                "discarding player snapshot version {} (newest supported is {SNAPSHOT_VERSION})",
                snapshot.version
            );
            return None;
        }
        Some(snapshot)
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

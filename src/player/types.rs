//! Small value types shared by the player and its collaborators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track of the queue.
    #[default]
    Off,
    /// Wrap around to the start of the queue.
    All,
    /// Repeat the current track when it ends.
    One,
}

impl RepeatMode {
    /// `Off -> All -> One -> Off`.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Transport state. Only `volume` outlives the session; the rest is mirrored
/// from the output for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    pub playing: bool,
    /// Always within `[0, 1]`.
    pub volume: f32,
    pub elapsed: Duration,
    pub duration: Option<Duration>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            elapsed: Duration::ZERO,
            duration: None,
        }
    }
}

pub(crate) fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

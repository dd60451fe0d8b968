use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Catalog identifier of a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A track as the catalog described it when it was queued.
///
/// The engine only ever compares tracks by `id`; everything else is carried
/// along for display and may be stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album_id: Option<u64>,
    /// Length in seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub path: PathBuf,
    #[serde(default)]
    pub details: TrackDetails,
}

/// Descriptive and technical fields with no bearing on ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackDetails {
    pub album: Option<String>,
    pub genre: Option<String>,
    pub format: Option<String>,
    pub bitrate: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub rating: Option<u8>,
}

impl Track {
    pub fn new(id: u64, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: TrackId(id),
            title: title.into(),
            artist: artist.into(),
            album_id: None,
            duration: 0.0,
            path: PathBuf::new(),
            details: TrackDetails::default(),
        }
    }

    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            artist => format!("{} - {}", artist, self.title),
        }
    }
}

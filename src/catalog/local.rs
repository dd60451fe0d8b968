use std::collections::HashMap;
use std::future::{Future, ready};
use std::path::Path;

use crate::config::LibrarySettings;
use crate::library::{Track, TrackId, scan};

use super::{Catalog, CatalogError};

/// A catalog built from scanning a directory once at startup.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    tracks: Vec<Track>,
    by_id: HashMap<TrackId, usize>,
}

impl LocalCatalog {
    pub fn scan(dir: &Path, settings: &LibrarySettings) -> Self {
        Self::from_tracks(scan(dir, settings))
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut by_id = HashMap::with_capacity(tracks.len());
        for (i, t) in tracks.iter().enumerate() {
            by_id.entry(t.id).or_insert(i);
        }
        Self { tracks, by_id }
    }

    /// All tracks in library sort order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.by_id.get(&id).map(|&i| &self.tracks[i])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Catalog for LocalCatalog {
    fn lookup_track(&self, id: TrackId) -> impl Future<Output = Result<Track, CatalogError>> {
        ready(self.get(id).cloned().ok_or(CatalogError::NotFound(id)))
    }

    fn stream_url(&self, id: TrackId) -> Result<String, CatalogError> {
        let track = self.get(id).ok_or(CatalogError::NotFound(id))?;
        Ok(format!("file://{}", track.path.display()))
    }
}

use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use log::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Track, TrackDetails, TrackId};

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn audio_extension(path: &Path, exts: &[String]) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    exts.iter().any(|e| e == &ext).then_some(ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Stable id derived from the file path, so a moved or deleted file stops
/// resolving on the next run.
pub(crate) fn track_id_for(path: &Path) -> TrackId {
    let hash = blake3::hash(path.to_string_lossy().as_bytes());
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&hash.as_bytes()[..8]);
    TrackId(u64::from_le_bytes(buf))
}

fn non_blank(s: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn read_track(path: &Path, format: String) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut track = Track {
        id: track_id_for(path),
        title: default_title,
        artist: String::new(),
        album_id: None,
        duration: 0.0,
        path: path.to_path_buf(),
        details: TrackDetails {
            format: Some(format),
            ..TrackDetails::default()
        },
    };

    // Unreadable tags leave the filename-derived defaults in place.
    if let Ok(tagged) = lofty::read_from_path(path) {
        let props = tagged.properties();
        track.duration = props.duration().as_secs_f64();
        track.details.bitrate = props.audio_bitrate();
        track.details.sample_rate = props.sample_rate();
        track.details.channels = props.channels();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = non_blank(tag.title()) {
                track.title = v;
            }
            if let Some(v) = non_blank(tag.artist()) {
                track.artist = v;
            }
            track.details.album = non_blank(tag.album());
            track.details.genre = non_blank(tag.genre());
            track.details.track_number = tag.track();
            track.details.disc_number = tag.disk();
        }
    }

    track
}

/// Walk `dir` and build a track for every audio file the settings admit,
/// sorted case-insensitively by display name.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let exts = normalized_extensions(settings);
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || (!settings.include_hidden && is_hidden(path)) {
            continue;
        }
        if let Some(format) = audio_extension(path, &exts) {
            tracks.push(read_track(path, format));
        }
    }

    tracks.sort_by_key(|t| t.display().to_lowercase());
    debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    tracks
}

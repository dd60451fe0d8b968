use super::*;
use crate::library::Track;
use async_io::block_on;
use std::path::PathBuf;

fn track(id: u64, path: &str) -> Track {
    Track {
        path: PathBuf::from(path),
        ..Track::new(id, format!("S{id}"), "Artist")
    }
}

#[test]
fn lookup_resolves_known_ids() {
    let catalog = LocalCatalog::from_tracks(vec![track(1, "/m/a.mp3"), track(2, "/m/b.mp3")]);
    let found = block_on(catalog.lookup_track(TrackId(2))).unwrap();
    assert_eq!(found.title, "S2");
}

#[test]
fn lookup_reports_missing_ids() {
    let catalog = LocalCatalog::from_tracks(vec![track(1, "/m/a.mp3")]);
    let err = block_on(catalog.lookup_track(TrackId(9))).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(TrackId(9))));
}

#[test]
fn stream_url_is_a_file_url() {
    let catalog = LocalCatalog::from_tracks(vec![track(1, "/music/a b.mp3")]);
    assert_eq!(catalog.stream_url(TrackId(1)).unwrap(), "file:///music/a b.mp3");
    assert!(catalog.stream_url(TrackId(5)).is_err());
}

#[test]
fn duplicate_ids_resolve_to_first_entry() {
    let catalog = LocalCatalog::from_tracks(vec![track(1, "/m/first.mp3"), track(1, "/m/second.mp3")]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(TrackId(1)).unwrap().path, PathBuf::from("/m/first.mp3"));
}

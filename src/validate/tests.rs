use super::*;
use crate::catalog::LocalCatalog;
use crate::library::{Track, TrackId};
use crate::persist::{MemoryStore, Snapshot};
use crate::player::RepeatMode;
use async_io::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::future::{Future, ready};

fn s(id: u64) -> Track {
    Track::new(id, format!("S{id}"), "Artist")
}

fn restored(current: Option<Track>) -> Player<MemoryStore> {
    let snapshot = Snapshot {
        current_track: current,
        volume: 0.6,
        queue: vec![s(1), s(2)],
        origin_queue: vec![s(1), s(2)],
        repeat_mode: RepeatMode::All,
        ..Snapshot::default()
    };
    Player::open(MemoryStore::with_snapshot(snapshot), StdRng::seed_from_u64(0))
}

struct OfflineCatalog;

impl Catalog for OfflineCatalog {
    fn lookup_track(&self, _id: TrackId) -> impl Future<Output = Result<Track, CatalogError>> {
        ready(Err(CatalogError::Unavailable("connection refused".into())))
    }

    fn stream_url(&self, _id: TrackId) -> Result<String, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }
}

#[test]
fn stale_current_track_clears_player() {
    let mut p = restored(Some(s(2)));
    let catalog = LocalCatalog::from_tracks(vec![s(1)]);

    let verdict = block_on(validate(&mut p, &catalog));
    assert!(verdict.is_stale());
    assert!(p.current_track().is_none());
    assert!(p.queue().is_empty());
    assert!(p.origin_queue().is_empty());
    assert_eq!(p.cursor(), None);
    assert!(!p.transport().playing);

    let saved = p.store().last().unwrap();
    assert!(saved.current_track.is_none());
    assert!(saved.queue.is_empty());
    assert_eq!(saved.volume, 0.6);
}

#[test]
fn transport_failure_counts_as_stale() {
    let mut p = restored(Some(s(1)));
    let verdict = block_on(validate(&mut p, &OfflineCatalog));
    assert!(matches!(verdict, Verdict::Stale(CatalogError::Unavailable(_))));
    assert!(p.current_track().is_none());
}

#[test]
fn confirmed_track_leaves_state_untouched() {
    let mut p = restored(Some(s(2)));
    let before = p.snapshot();
    let catalog = LocalCatalog::from_tracks(vec![s(1), s(2)]);

    let verdict = block_on(validate(&mut p, &catalog));
    assert!(matches!(verdict, Verdict::Confirmed));
    assert_eq!(p.snapshot(), before);
    assert_eq!(p.store().writes(), 0);
}

#[test]
fn missing_current_track_is_not_checked() {
    let mut p = restored(None);
    let verdict = block_on(validate(&mut p, &OfflineCatalog));
    assert!(matches!(verdict, Verdict::NothingToCheck));
    assert_eq!(p.queue().len(), 2);
}

#[test]
fn check_can_run_apart_from_apply() {
    let p = restored(Some(s(9)));
    let catalog = LocalCatalog::from_tracks(vec![s(1)]);
    let verdict = block_on(check(p.current_track(), &catalog));
    assert!(matches!(verdict, Verdict::Stale(CatalogError::NotFound(TrackId(9)))));
    // Nothing happens until the verdict is applied.
    assert!(p.current_track().is_some());
}

use super::*;
use crate::persist::MemoryStore;
use async_io::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::future::ready;

fn s(id: u64) -> Track {
    Track::new(id, format!("S{id}"), "Artist")
}

fn ids(queue: &[Track]) -> Vec<u64> {
    queue.iter().map(|t| t.id.0).collect()
}

const PL: PlaylistId = PlaylistId(11);

/// Server-side playlist that either accepts every edit or rejects them all.
struct FakeRemote {
    tracks: RefCell<Vec<Track>>,
    accept: bool,
}

impl FakeRemote {
    fn new(tracks: Vec<Track>, accept: bool) -> Self {
        Self {
            tracks: RefCell::new(tracks),
            accept,
        }
    }

    fn outcome(&self, edit: impl FnOnce(&mut Vec<Track>)) -> Result<(), RemoteError> {
        if !self.accept {
            return Err(RemoteError::Transport("timed out".into()));
        }
        edit(&mut *self.tracks.borrow_mut());
        Ok(())
    }
}

impl PlaylistRemote for FakeRemote {
    fn add_track(&self, _playlist: PlaylistId, track: TrackId) -> impl Future<Output = Result<(), RemoteError>> {
        ready(self.outcome(|t| t.push(s(track.0))))
    }

    fn remove_track(&self, _playlist: PlaylistId, track: TrackId) -> impl Future<Output = Result<(), RemoteError>> {
        ready(self.outcome(|t| {
            if let Some(i) = t.iter().position(|x| x.id == track) {
                t.remove(i);
            }
        }))
    }

    fn reorder_tracks(
        &self,
        _playlist: PlaylistId,
        tracks: Vec<TrackId>,
    ) -> impl Future<Output = Result<(), RemoteError>> {
        ready(self.outcome(|t| *t = tracks.iter().map(|id| s(id.0)).collect()))
    }

    fn fetch_tracks(&self, playlist: PlaylistId) -> impl Future<Output = Result<Vec<Track>, RemoteError>> {
        let result = if playlist == PL {
            Ok(self.tracks.borrow().clone())
        } else {
            Err(RemoteError::NotFound(playlist))
        };
        ready(result)
    }
}

fn player_on(tracks: Vec<Track>) -> Player<MemoryStore> {
    let mut p = Player::with_rng(MemoryStore::new(), StdRng::seed_from_u64(3));
    p.set_queue(tracks);
    p.play_track(s(1));
    p
}

fn server_ids(remote: &FakeRemote) -> Vec<u64> {
    ids(&remote.tracks.borrow())
}

#[test]
fn local_change_is_visible_before_confirmation() {
    let remote = FakeRemote::new(vec![s(1), s(2), s(3)], true);
    let mut p = player_on(vec![s(1), s(2), s(3)]);

    let pending = PlaylistEdit::new(PL, QueueEdit::Reorder { from: 2, to: 0 })
        .apply(&mut p)
        .unwrap();
    assert_eq!(ids(p.queue()), vec![3, 1, 2]);
    assert_eq!(
        pending.change,
        RemoteChange::Reorder(vec![TrackId(3), TrackId(1), TrackId(2)])
    );

    block_on(pending.confirm(&remote)).unwrap();
    assert_eq!(server_ids(&remote), vec![3, 1, 2]);
}

#[test]
fn rejection_leaves_local_state_until_reconciled() {
    let remote = FakeRemote::new(vec![s(1), s(2), s(3)], false);
    let mut p = player_on(vec![s(1), s(2), s(3)]);

    let pending = PlaylistEdit::new(PL, QueueEdit::Remove(1)).apply(&mut p).unwrap();
    let rejected = block_on(pending.confirm(&remote)).unwrap_err();
    assert_eq!(rejected.playlist, PL);
    assert!(rejected.to_string().contains("timed out"));
    assert_eq!(ids(p.queue()), vec![1, 3]);

    block_on(rejected.reconcile(&remote, &mut p)).unwrap();
    assert_eq!(ids(p.queue()), vec![1, 2, 3]);
    assert_eq!(ids(p.origin_queue()), vec![1, 2, 3]);
    assert_eq!(p.current_track().map(|t| t.id), Some(TrackId(1)));
}

#[test]
fn add_is_confirmed_with_track_id() {
    let remote = FakeRemote::new(vec![s(1), s(2)], true);
    let mut p = player_on(vec![s(1), s(2)]);

    let pending = PlaylistEdit::new(PL, QueueEdit::Add(s(9))).apply(&mut p).unwrap();
    assert_eq!(ids(p.queue()), vec![1, 9, 2]);
    assert_eq!(pending.change, RemoteChange::Add(TrackId(9)));
    block_on(pending.confirm(&remote)).unwrap();
    assert_eq!(server_ids(&remote), vec![1, 2, 9]);
    assert_eq!(server_ids(&remote), ids(p.origin_queue()));
}

#[test]
fn remove_in_shuffled_queue_targets_the_shown_track() {
    let all: Vec<Track> = (1..=6).map(s).collect();
    let remote = FakeRemote::new(all.clone(), true);
    let mut p = player_on(all);
    p.toggle_shuffle();

    let shown = p.queue()[3].id;
    let pending = PlaylistEdit::new(PL, QueueEdit::Remove(3)).apply(&mut p).unwrap();
    assert_eq!(pending.change, RemoteChange::Remove(shown));

    block_on(pending.confirm(&remote)).unwrap();
    assert!(!server_ids(&remote).contains(&shown.0));
    assert_eq!(server_ids(&remote), ids(p.origin_queue()));
}

#[test]
fn remove_after_mid_queue_add_keeps_server_in_step() {
    let remote = FakeRemote::new(vec![s(1), s(2)], true);
    let mut p = player_on(vec![s(1), s(2)]);

    let added = PlaylistEdit::new(PL, QueueEdit::Add(s(9))).apply(&mut p).unwrap();
    block_on(added.confirm(&remote)).unwrap();

    // Active queue is [1, 9, 2]; position 1 is the added track.
    let removed = PlaylistEdit::new(PL, QueueEdit::Remove(1)).apply(&mut p).unwrap();
    assert_eq!(removed.change, RemoteChange::Remove(TrackId(9)));
    block_on(removed.confirm(&remote)).unwrap();

    assert_eq!(ids(p.queue()), vec![1, 2]);
    assert_eq!(server_ids(&remote), vec![1, 2]);
}

#[test]
fn reorder_while_shuffled_leaves_playlist_order() {
    let all: Vec<Track> = (1..=5).map(s).collect();
    let remote = FakeRemote::new(all.clone(), true);
    let mut p = player_on(all);
    p.toggle_shuffle();

    let pending = PlaylistEdit::new(PL, QueueEdit::Reorder { from: 4, to: 1 })
        .apply(&mut p)
        .unwrap();
    block_on(pending.confirm(&remote)).unwrap();
    assert_eq!(server_ids(&remote), vec![1, 2, 3, 4, 5]);
}

#[test]
fn stale_edit_is_not_applied() {
    let mut p = player_on(vec![s(1), s(2)]);
    assert!(PlaylistEdit::new(PL, QueueEdit::Remove(2)).apply(&mut p).is_none());
    assert!(
        PlaylistEdit::new(PL, QueueEdit::Reorder { from: 0, to: 5 })
            .apply(&mut p)
            .is_none()
    );
    assert_eq!(ids(p.queue()), vec![1, 2]);
}

#[test]
fn server_truth_reports_missing_playlist() {
    let remote = FakeRemote::new(vec![], false);
    let rejected = EditRejected {
        playlist: PlaylistId(99),
        source: RemoteError::Rejected("gone".into()),
    };
    let err = block_on(rejected.server_truth(&remote)).unwrap_err();
    assert!(matches!(err, RemoteError::NotFound(PlaylistId(99))));
}

//! Pure ordered-sequence helpers for the play queues.
//!
//! Queues may hold the same track more than once. Anything that looks a track
//! up by id resolves to its first occurrence; anything that edits by index
//! treats the index as authoritative.

use crate::library::{Track, TrackId};

/// Index of the first entry with `id`.
pub fn position_of(queue: &[Track], id: TrackId) -> Option<usize> {
    queue.iter().position(|t| t.id == id)
}

/// Insert `track` right after the first entry matching `current`, or append
/// it when there is no match.
pub fn insert_after_current(queue: &[Track], current: Option<TrackId>, track: Track) -> Vec<Track> {
    let mut out = queue.to_vec();
    match current.and_then(|id| position_of(queue, id)) {
        Some(i) => out.insert(i + 1, track),
        None => out.push(track),
    }
    out
}

/// Copy of `queue` without the entry at `index`. Out of range is a no-op.
pub fn remove_at(queue: &[Track], index: usize) -> Vec<Track> {
    let mut out = queue.to_vec();
    if index < out.len() {
        out.remove(index);
    }
    out
}

/// Copy of `queue` with the entry at `from` relocated to `to`; everything else
/// keeps its relative order. Out of range is a no-op.
pub fn move_item(queue: &[Track], from: usize, to: usize) -> Vec<Track> {
    let mut out = queue.to_vec();
    if from < out.len() && to < out.len() && from != to {
        let item = out.remove(from);
        out.insert(to, item);
    }
    out
}

/// How many earlier entries share the id of the entry at `index`.
pub fn occurrence_of(queue: &[Track], index: usize) -> Option<usize> {
    let id = queue.get(index)?.id;
    Some(queue[..index].iter().filter(|t| t.id == id).count())
}

/// Index of the `n`-th (zero based) entry with `id`.
pub fn nth_position(queue: &[Track], id: TrackId, n: usize) -> Option<usize> {
    queue
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id == id)
        .nth(n)
        .map(|(i, _)| i)
}

/// Per-row key for list views: the id alone is ambiguous once a track is
/// queued twice.
pub fn row_key(track: &Track, position: usize) -> String {
    format!("{}:{}", track.id, position)
}

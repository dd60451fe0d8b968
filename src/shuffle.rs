//! Randomized play order.
//!
//! The origin queue is never shuffled in place: a shuffled queue is always a
//! fresh copy, so turning shuffle off is just a matter of going back to the
//! origin.

use rand::Rng;

use crate::library::{Track, TrackId};
use crate::queue::position_of;

/// Unbiased in-place permutation: for `i` from the last index down to 1, swap
/// `i` with a uniformly drawn `j` in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A shuffled copy of `origin` with the first occurrence of `current` moved
/// to the front.
pub fn shuffled<R: Rng + ?Sized>(origin: &[Track], current: Option<TrackId>, rng: &mut R) -> Vec<Track> {
    let mut out = origin.to_vec();
    fisher_yates(&mut out, rng);

    if let Some(idx) = current.and_then(|id| position_of(&out, id)) {
        let pinned = out.remove(idx);
        out.insert(0, pinned);
    }
    out
}

//! Startup check that a restored current track still exists upstream.
//!
//! A library rescan can reassign every id while the snapshot still holds the
//! old ones. Rather than play a silently wrong stream, a stale current track
//! empties the player.

use log::{debug, info};

use crate::catalog::{Catalog, CatalogError};
use crate::library::Track;
use crate::persist::SnapshotStore;
use crate::player::Player;

/// Outcome of checking the restored current track.
#[derive(Debug)]
pub enum Verdict {
    /// No current track, nothing to check.
    NothingToCheck,
    /// The catalog still knows the track.
    Confirmed,
    /// The lookup failed; the player should be emptied.
    Stale(CatalogError),
}

/// Look `current` up in `catalog`. Any failure counts as stale.
pub async fn check<C: Catalog>(current: Option<&Track>, catalog: &C) -> Verdict {
    let Some(track) = current else {
        return Verdict::NothingToCheck;
    };
    match catalog.lookup_track(track.id).await {
        Ok(_) => Verdict::Confirmed,
        Err(e) => Verdict::Stale(e),
    }
}

impl Verdict {
    /// Empty the player on a stale verdict; otherwise leave it untouched.
    pub fn apply<S: SnapshotStore>(&self, player: &mut Player<S>) {
        match self {
            Verdict::Stale(e) => {
                info!("restored track is no longer available ({e}); clearing player");
                player.reset();
            }
            Verdict::Confirmed => debug!("restored track confirmed"),
            Verdict::NothingToCheck => {}
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Verdict::Stale(_))
    }
}

/// Check the player's current track and apply the verdict.
pub async fn validate<S, C>(player: &mut Player<S>, catalog: &C) -> Verdict
where
    S: SnapshotStore,
    C: Catalog,
{
    let current = player.current_track().cloned();
    let verdict = check(current.as_ref(), catalog).await;
    verdict.apply(player);
    verdict
}

#[cfg(test)]
mod tests;

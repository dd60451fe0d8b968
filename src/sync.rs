//! Optimistic queue edits against a remote playlist.
//!
//! An edit is applied to the player immediately and confirmed with the
//! server afterwards. If the server rejects it the player is not rolled back
//! automatically: the caller shows the error and, when it wants server truth,
//! calls [`EditRejected::reconcile`] to re-read the playlist and replace the
//! local queue with it.

use std::fmt;
use std::future::Future;

use log::warn;
use thiserror::Error;

use crate::library::{Track, TrackId};
use crate::persist::SnapshotStore;
use crate::player::Player;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(pub u64);

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("playlist {0} not found")]
    NotFound(PlaylistId),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server rejected the change: {0}")]
    Rejected(String),
}

/// Remote playlist storage. Tracks are addressed by id, never by position,
/// since the local queue may be shuffled or carry ad hoc entries.
pub trait PlaylistRemote {
    /// Append `track` to the playlist.
    fn add_track(
        &self,
        playlist: PlaylistId,
        track: TrackId,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    fn remove_track(
        &self,
        playlist: PlaylistId,
        track: TrackId,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    /// Replace the playlist order with `tracks`.
    fn reorder_tracks(
        &self,
        playlist: PlaylistId,
        tracks: Vec<TrackId>,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    fn fetch_tracks(
        &self,
        playlist: PlaylistId,
    ) -> impl Future<Output = Result<Vec<Track>, RemoteError>>;
}

/// An edit as the user makes it: positions refer to the queue as shown.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEdit {
    Add(Track),
    Remove(usize),
    Reorder { from: usize, to: usize },
}

/// A queue edit bound to the playlist it must be saved to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEdit {
    pub playlist: PlaylistId,
    pub edit: QueueEdit,
}

/// The server request for an edit, resolved against the queue when the
/// edit was applied locally.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteChange {
    Add(TrackId),
    Remove(TrackId),
    /// The full playlist order after the edit.
    Reorder(Vec<TrackId>),
}

/// A locally applied edit still waiting for the server.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub playlist: PlaylistId,
    pub change: RemoteChange,
}

#[derive(Debug, Error)]
#[error("could not save change to playlist {playlist}: {source}")]
pub struct EditRejected {
    pub playlist: PlaylistId,
    #[source]
    pub source: RemoteError,
}

impl PlaylistEdit {
    pub fn new(playlist: PlaylistId, edit: QueueEdit) -> Self {
        Self { playlist, edit }
    }

    /// Apply the edit to the player right away and return the request that
    /// saves it. `None` when the edit was a no-op locally (stale index), in
    /// which case there is nothing to confirm.
    pub fn apply<S: SnapshotStore>(&self, player: &mut Player<S>) -> Option<PendingEdit> {
        let len = player.queue().len();
        let change = match &self.edit {
            QueueEdit::Add(track) => {
                player.add_to_queue(track.clone());
                RemoteChange::Add(track.id)
            }
            QueueEdit::Remove(index) if *index < len => {
                let id = player.queue()[*index].id;
                player.remove_from_queue(*index);
                RemoteChange::Remove(id)
            }
            QueueEdit::Reorder { from, to } if *from < len && *to < len => {
                player.reorder_queue(*from, *to);
                RemoteChange::Reorder(player.origin_queue().iter().map(|t| t.id).collect())
            }
            _ => return None,
        };
        Some(PendingEdit {
            playlist: self.playlist,
            change,
        })
    }
}

impl PendingEdit {
    /// Send the change to the server.
    pub async fn confirm<R: PlaylistRemote>(&self, remote: &R) -> Result<(), EditRejected> {
        let result = match &self.change {
            RemoteChange::Add(id) => remote.add_track(self.playlist, *id).await,
            RemoteChange::Remove(id) => remote.remove_track(self.playlist, *id).await,
            RemoteChange::Reorder(ids) => remote.reorder_tracks(self.playlist, ids.clone()).await,
        };
        result.map_err(|source| {
            warn!("playlist {} change {:?} rejected: {source}", self.playlist, self.change);
            EditRejected {
                playlist: self.playlist,
                source,
            }
        })
    }
}

impl EditRejected {
    /// The playlist as the server currently has it.
    pub async fn server_truth<R: PlaylistRemote>(&self, remote: &R) -> Result<Vec<Track>, RemoteError> {
        remote.fetch_tracks(self.playlist).await
    }

    /// Re-read the playlist and make it the player's queue.
    pub async fn reconcile<R, S>(&self, remote: &R, player: &mut Player<S>) -> Result<(), RemoteError>
    where
        R: PlaylistRemote,
        S: SnapshotStore,
    {
        let tracks = self.server_truth(remote).await?;
        player.set_queue(tracks);
        Ok(())
    }
}

#[cfg(test)]
mod tests;

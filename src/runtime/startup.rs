use async_io::block_on;
use encore::catalog::LocalCatalog;
use encore::config::{PlaybackSettings, Settings};
use encore::persist::{JsonFileStore, MemoryStore, SnapshotStore};
use encore::player::Player;
use encore::validate::validate;
use log::{info, warn};

pub fn open_store(settings: &Settings, no_persist: bool) -> Box<dyn SnapshotStore> {
    if no_persist || !settings.storage.persist {
        info!("persistence disabled; session will not be saved");
        return Box::new(MemoryStore::new());
    }
    match settings.snapshot_path() {
        Some(path) => {
            info!("snapshot at {}", path.display());
            Box::new(JsonFileStore::new(path))
        }
        None => {
            warn!("no HOME or XDG_STATE_HOME; session will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// Drop restored state whose current track the catalog no longer knows.
pub fn validate_restored<S: SnapshotStore>(player: &mut Player<S>, catalog: &LocalCatalog) {
    let verdict = block_on(validate(player, catalog));
    if verdict.is_stale() {
        info!("previous session referred to tracks that are gone; starting fresh");
    }
}

/// Seed a fresh session from settings and start playing.
///
/// A restored session resumes its current track (or the head of its queue).
/// Without one, the whole library becomes the play context.
pub fn apply_playback_defaults<S: SnapshotStore>(
    player: &mut Player<S>,
    catalog: &LocalCatalog,
    settings: &PlaybackSettings,
) {
    let fresh = player.queue().is_empty() && player.current_track().is_none();
    if fresh {
        player.set_volume(settings.volume);
        player.set_repeat_mode(settings.repeat_mode.into());
        if player.is_shuffle() {
            player.toggle_shuffle();
        }
        player.set_queue(catalog.tracks().to_vec());
        if settings.shuffle {
            player.toggle_shuffle();
        }
    } else {
        // Push the restored volume to the output.
        player.set_volume(player.transport().volume);
    }

    let start = player
        .current_track()
        .cloned()
        .or_else(|| player.queue().first().cloned());
    if let Some(track) = start {
        player.play_track(track);
    }
}

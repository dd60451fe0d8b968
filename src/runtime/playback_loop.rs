use std::thread;
use std::time::Duration;

use encore::catalog::Catalog;
use encore::output::{Output, OutputCmd, dispatch};
use encore::persist::SnapshotStore;
use encore::player::{Player, RepeatMode};
use log::{info, warn};

/// Drive `output` from `player` until playback stops.
///
/// Each tick forwards pending commands, routes a finished track to
/// `on_track_ended` and mirrors the output clock. Tracks that fail to load,
/// or end before their first tick, are skipped; a whole queue of failures
/// stops playback.
pub fn run<S, O, C>(player: &mut Player<S>, output: &mut O, catalog: &C, poll: Duration)
where
    S: SnapshotStore,
    O: Output + ?Sized,
    C: Catalog,
{
    let mut failed_loads = 0usize;
    // A track was (re)started and has not been sampled yet.
    let mut fresh = false;

    loop {
        let mut load_failed = false;
        for cmd in player.drain_commands() {
            let starts = matches!(cmd, OutputCmd::Load(_) | OutputCmd::Restart);
            if let OutputCmd::Load(track) = &cmd {
                info!("now playing: {}", track.display());
            }
            match dispatch(cmd, output, catalog) {
                Ok(()) => fresh |= starts,
                Err(e) => {
                    warn!("output: {e}");
                    load_failed |= starts;
                }
            }
        }

        if !load_failed && fresh && output.finished() {
            warn!("track ended before playing; skipping");
            load_failed = true;
        }

        if load_failed {
            fresh = false;
            failed_loads += 1;
            if player.repeat_mode() == RepeatMode::One || failed_loads > player.queue().len() {
                warn!("no playable track left; stopping");
                player.set_playing(false);
            } else {
                player.play_next();
            }
            continue;
        }

        if !player.transport().playing {
            info!("playback stopped");
            return;
        }

        if output.finished() {
            player.on_track_ended();
            continue;
        }

        fresh = false;
        failed_loads = 0;
        player.update_progress(output.elapsed(), output.total());
        thread::sleep(poll);
    }
}

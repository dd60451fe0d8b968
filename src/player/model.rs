use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::library::Track;
use crate::output::OutputCmd;
use crate::persist::{SNAPSHOT_VERSION, Snapshot, SnapshotStore};
use crate::queue;
use crate::shuffle;

use super::types::{RepeatMode, Transport, clamp_volume};

/// Single source of truth for what is playing and what plays next.
///
/// Operations never fail: stale indices are ignored and persistence errors
/// are logged. Commands for the output accumulate until the runtime takes
/// them with [`Player::drain_commands`].
pub struct Player<S> {
    current: Option<Track>,
    queue: Vec<Track>,
    origin_queue: Vec<Track>,
    repeat_mode: RepeatMode,
    shuffle: bool,
    transport: Transport,
    store: S,
    rng: StdRng,
    outbox: Vec<OutputCmd>,
    /// Set by `clear_queue`: the current track finishes but is not saved.
    unsaved_current: bool,
}

impl<S: SnapshotStore> Player<S> {
    /// An empty player with an entropy-seeded shuffle source.
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// An empty player shuffling with `rng`.
    pub fn with_rng(store: S, rng: StdRng) -> Self {
        Self {
            current: None,
            queue: Vec::new(),
            origin_queue: Vec::new(),
            repeat_mode: RepeatMode::Off,
            shuffle: false,
            transport: Transport::default(),
            store,
            rng,
            outbox: Vec::new(),
            unsaved_current: false,
        }
    }

    /// A player rehydrated from whatever `store` holds.
    pub fn open(store: S, rng: StdRng) -> Self {
        let mut player = Self::with_rng(store, rng);
        if let Some(snapshot) = player.store.load() {
            player.restore(snapshot);
        }
        player
    }

    /// Replace all persisted fields with `snapshot`. Playback stays stopped.
    pub fn restore(&mut self, snapshot: Snapshot) {
        info!(
            "restoring player: {} queued, current {:?}",
            snapshot.queue.len(),
            snapshot.current_track.as_ref().map(|t| t.id)
        );
        self.current = snapshot.current_track;
        self.queue = snapshot.queue;
        self.origin_queue = snapshot.origin_queue;
        self.repeat_mode = snapshot.repeat_mode;
        self.shuffle = snapshot.is_shuffle;
        self.unsaved_current = false;
        self.transport = Transport {
            volume: clamp_volume(snapshot.volume),
            ..Transport::default()
        };
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// The active (possibly shuffled) queue.
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn origin_queue(&self) -> &[Track] {
        &self.origin_queue
    }

    /// Position of the current track in the active queue, by identity.
    pub fn cursor(&self) -> Option<usize> {
        self.current
            .as_ref()
            .and_then(|t| queue::position_of(&self.queue, t.id))
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The persisted projection of the current state. A track still playing
    /// out after [`Player::clear_queue`] is left out.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            current_track: if self.unsaved_current {
                None
            } else {
                self.current.clone()
            },
            volume: self.transport.volume,
            queue: self.queue.clone(),
            origin_queue: self.origin_queue.clone(),
            repeat_mode: self.repeat_mode,
            is_shuffle: self.shuffle,
        }
    }

    /// Take the commands queued for the output since the last call.
    pub fn drain_commands(&mut self) -> Vec<OutputCmd> {
        std::mem::take(&mut self.outbox)
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            warn!("failed to persist player snapshot: {e}");
        }
    }

    fn start(&mut self, track: Track) {
        self.outbox.push(OutputCmd::Load(track.clone()));
        self.outbox.push(OutputCmd::Play);
        self.current = Some(track);
        self.unsaved_current = false;
        self.transport.playing = true;
        self.transport.elapsed = Duration::ZERO;
        self.transport.duration = None;
    }

    // -- transport ---------------------------------------------------------

    /// Make `track` current and start it. The queue is not touched.
    pub fn play_track(&mut self, track: Track) {
        self.start(track);
        self.persist();
    }

    pub fn toggle_play(&mut self) {
        self.set_playing(!self.transport.playing);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.transport.playing = playing;
        if self.current.is_some() {
            self.outbox
                .push(if playing { OutputCmd::Play } else { OutputCmd::Pause });
        }
        self.persist();
    }

    /// Clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.transport.volume = volume;
        self.outbox.push(OutputCmd::SetVolume(volume));
        self.persist();
    }

    /// Mirror the output's clock for display. Not persisted.
    pub fn update_progress(&mut self, elapsed: Duration, duration: Option<Duration>) {
        self.transport.elapsed = elapsed;
        self.transport.duration = duration;
    }

    // -- navigation --------------------------------------------------------

    /// Advance according to the repeat mode.
    pub fn play_next(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };

        if self.repeat_mode == RepeatMode::One {
            self.transport.playing = true;
            self.transport.elapsed = Duration::ZERO;
            self.outbox.push(OutputCmd::Restart);
            self.persist();
            return;
        }

        let next = match queue::position_of(&self.queue, current.id) {
            // Current fell out of the queue; pick the queue back up from the top.
            None if !self.queue.is_empty() => Some(0),
            None => None,
            Some(i) if i + 1 < self.queue.len() => Some(i + 1),
            Some(_) if self.repeat_mode == RepeatMode::All => Some(0),
            Some(_) => None,
        };

        match next {
            Some(i) => {
                let track = self.queue[i].clone();
                self.start(track);
            }
            None => {
                debug!("end of queue reached");
                self.transport.playing = false;
                self.outbox.push(OutputCmd::Pause);
            }
        }
        self.persist();
    }

    /// Step back one entry; at the top of the queue restart the current track.
    pub fn play_prev(&mut self) {
        if self.current.is_none() {
            return;
        }
        match self.cursor() {
            Some(i) if i > 0 => {
                let track = self.queue[i - 1].clone();
                self.start(track);
            }
            _ => {
                self.transport.elapsed = Duration::ZERO;
                self.outbox.push(OutputCmd::Seek(Duration::ZERO));
            }
        }
        self.persist();
    }

    /// The output reported that the current track finished.
    pub fn on_track_ended(&mut self) {
        self.play_next();
    }

    // -- modes -------------------------------------------------------------

    pub fn toggle_shuffle(&mut self) {
        if self.shuffle {
            self.queue = self.origin_queue.clone();
        } else {
            let current = self.current.as_ref().map(|t| t.id);
            self.queue = shuffle::shuffled(&self.origin_queue, current, &mut self.rng);
        }
        self.shuffle = !self.shuffle;
        self.persist();
    }

    /// `Off -> All -> One -> Off`.
    pub fn toggle_repeat(&mut self) {
        self.repeat_mode = self.repeat_mode.next();
        self.persist();
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
        self.persist();
    }

    // -- queue editing -----------------------------------------------------

    /// Establish a new play context. Current track is left alone; call
    /// [`Player::play_track`] afterwards to start playing from it.
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.origin_queue = tracks.clone();
        self.queue = tracks;
        self.persist();
    }

    /// Queue `track` to play right after the current one. The origin queue
    /// gets it at the end so turning shuffle off keeps it.
    pub fn add_to_queue(&mut self, track: Track) {
        let current = self.current.as_ref().map(|t| t.id);
        self.queue = queue::insert_after_current(&self.queue, current, track.clone());
        self.origin_queue.push(track);
        self.persist();
    }

    /// Drop the entry at `index` of the active queue. The matching occurrence
    /// goes from the origin queue too. The current track keeps playing even
    /// if it is the one removed.
    pub fn remove_from_queue(&mut self, index: usize) {
        let Some(rank) = queue::occurrence_of(&self.queue, index) else {
            debug!("ignoring removal at stale index {index} (queue has {})", self.queue.len());
            return;
        };
        let id = self.queue[index].id;
        self.queue = queue::remove_at(&self.queue, index);

        let origin_index = queue::nth_position(&self.origin_queue, id, rank)
            .or_else(|| self.origin_queue.iter().rposition(|t| t.id == id));
        if let Some(i) = origin_index {
            self.origin_queue = queue::remove_at(&self.origin_queue, i);
        }
        self.persist();
    }

    /// Move the entry at `from` to `to` in the active queue. With shuffle off
    /// the new arrangement also becomes the origin order.
    pub fn reorder_queue(&mut self, from: usize, to: usize) {
        let len = self.queue.len();
        if from >= len || to >= len {
            debug!("ignoring reorder {from} -> {to} against queue of {len}");
            return;
        }
        self.queue = queue::move_item(&self.queue, from, to);
        if !self.shuffle {
            self.origin_queue = self.queue.clone();
        }
        self.persist();
    }

    /// Empty both queues and the saved session. Whatever is playing finishes,
    /// then playback stops; a restart begins from nothing.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.origin_queue.clear();
        self.unsaved_current = self.current.is_some();
        self.persist();
    }

    /// Forget everything but volume and modes: no queue, no current track,
    /// stopped.
    pub fn reset(&mut self) {
        self.current = None;
        self.unsaved_current = false;
        self.queue.clear();
        self.origin_queue.clear();
        self.transport.playing = false;
        self.transport.elapsed = Duration::ZERO;
        self.transport.duration = None;
        self.outbox.push(OutputCmd::Stop);
        self.persist();
    }
}

//! The playback primitive seam.
//!
//! The player never touches audio directly. It queues [`OutputCmd`]s, and the
//! runtime hands each one to an [`Output`] with [`dispatch`], resolving tracks
//! to stream URLs through the catalog on the way.

mod sink;

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::library::Track;

pub use sink::RodioOutput;

/// One-way instructions from the player to the output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCmd {
    /// Load `Track` paused at zero; a `Play` follows when playback should start.
    Load(Track),
    Play,
    Pause,
    /// Unload whatever is playing.
    Stop,
    Seek(Duration),
    /// Start the loaded track again from zero and play.
    Restart,
    SetVolume(f32),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("cannot open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("seek failed: {0}")]
    Seek(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A black-box audio engine: loads a URL, plays, pauses, seeks and reports
/// progress. `finished` is the "track ended" signal.
pub trait Output {
    fn load(&mut self, url: &str) -> Result<(), OutputError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, pos: Duration) -> Result<(), OutputError>;
    fn set_volume(&mut self, volume: f32);
    fn elapsed(&self) -> Duration;
    fn total(&self) -> Option<Duration>;
    fn finished(&self) -> bool;

    fn restart(&mut self) -> Result<(), OutputError> {
        self.seek(Duration::ZERO)?;
        self.play();
        Ok(())
    }
}

/// Apply one player command to `output`.
pub fn dispatch<O, C>(cmd: OutputCmd, output: &mut O, catalog: &C) -> Result<(), OutputError>
where
    O: Output + ?Sized,
    C: Catalog,
{
    match cmd {
        OutputCmd::Load(track) => {
            let url = catalog.stream_url(track.id)?;
            debug!("loading {} from {url}", track.display());
            output.load(&url)
        }
        OutputCmd::Play => {
            output.play();
            Ok(())
        }
        OutputCmd::Pause => {
            output.pause();
            Ok(())
        }
        OutputCmd::Stop => {
            output.stop();
            Ok(())
        }
        OutputCmd::Seek(pos) => output.seek(pos),
        OutputCmd::Restart => output.restart(),
        OutputCmd::SetVolume(v) => {
            output.set_volume(v);
            Ok(())
        }
    }
}

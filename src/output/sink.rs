//! `rodio` implementation of [`Output`].
//!
//! Each load builds a fresh paused `Sink` on the default output stream; the
//! previous sink is stopped and dropped.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::{Output, OutputError};

/// Accepts `file://` URLs and bare paths.
pub(crate) fn path_from_url(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<String>,
    total: Option<Duration>,
    volume: f32,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self, OutputError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| OutputError::Device(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            total: None,
            volume: 1.0,
        })
    }

    fn create_sink(&self, url: &str) -> Result<(Sink, Option<Duration>), OutputError> {
        let path = path_from_url(url);
        let file = File::open(&path).map_err(|source| OutputError::Open {
            url: url.to_string(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| OutputError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let total = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        Ok((sink, total))
    }
}

impl Output for RodioOutput {
    fn load(&mut self, url: &str) -> Result<(), OutputError> {
        let (sink, total) = self.create_sink(url)?;
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.loaded = Some(url.to_string());
        self.total = total;
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.loaded = None;
        self.total = None;
    }

    fn seek(&mut self, pos: Duration) -> Result<(), OutputError> {
        match self.sink.as_ref() {
            Some(s) => s.try_seek(pos).map_err(|e| OutputError::Seek(e.to_string())),
            None => Ok(()),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume);
        }
    }

    fn elapsed(&self) -> Duration {
        self.sink.as_ref().map(|s| s.get_pos()).unwrap_or(Duration::ZERO)
    }

    fn total(&self) -> Option<Duration> {
        self.total
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }

    /// A drained sink has nothing left to seek in, so restarting reloads.
    fn restart(&mut self) -> Result<(), OutputError> {
        match self.loaded.clone() {
            Some(url) if self.finished() => self.load(&url)?,
            Some(_) => self.seek(Duration::ZERO)?,
            None => return Ok(()),
        }
        self.play();
        Ok(())
    }
}

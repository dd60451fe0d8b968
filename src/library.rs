//! Track values and the local directory scanner.
//!
//! `Track` is the value snapshot the engine queues and persists. The scanner
//! turns a directory of audio files into tracks for the local catalog.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;

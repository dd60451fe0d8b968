//! The catalog seam: resolving track ids and building stream URLs.
//!
//! The engine only asks two things of a catalog. Validation looks tracks up
//! by id; the output needs a URL to load.

mod local;

use std::future::Future;

use thiserror::Error;

use crate::library::{Track, TrackId};

pub use local::LocalCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("track {0} not found")]
    NotFound(TrackId),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

pub trait Catalog {
    fn lookup_track(&self, id: TrackId) -> impl Future<Output = Result<Track, CatalogError>>;

    fn stream_url(&self, id: TrackId) -> Result<String, CatalogError>;
}

#[cfg(test)]
mod tests;

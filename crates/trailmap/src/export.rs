//! Scene exporters.
//!
//! An [`Exporter`] turns the current snapshot of a mounted
//! [`RoadmapScene`](crate::RoadmapScene) into an output file. The snapshot
//! covers the background, the particle field as of the last frame, themed
//! paths with their flow dots, node glyphs and labels.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::Svg`]
//!
//! [`Error`] converts into [`TrailmapError::Export`] at the crate boundary.
//!
//! [`TrailmapError::Export`]: crate::TrailmapError::Export

pub mod svg;

use std::io;

use thiserror::Error;

use crate::RoadmapScene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Exports the current snapshot of `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be rendered, for example
    /// because nothing is mounted, or [`Error::Io`] if writing the output
    /// fails.
    fn export_scene(&self, scene: &RoadmapScene) -> Result<(), Error>;
}

/// Errors raised while exporting a scene.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

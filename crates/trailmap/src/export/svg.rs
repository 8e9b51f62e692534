//! SVG exporter.

mod canvas;
mod scene;

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::Document;

use crate::{RoadmapScene, export};

pub use canvas::SvgParticleCanvas;

/// Id of the blur filter shared by glowing paths.
pub const GLOW_FILTER_ID: &str = "trailmap-glow";

/// SVG exporter writing scene snapshots to `file_name`.
pub struct Svg {
    file_name: String,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Writes an SVG document to the exporter's file
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name=self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name=self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_scene(&self, scene: &RoadmapScene) -> Result<(), export::Error> {
        let doc = Self::render_scene(scene)?;
        debug!(file_name = self.file_name; "SVG document rendered");

        self.write_document(doc)
    }
}

//! Roadmap documents read by the CLI.
//!
//! A document is a TOML file describing one roadmap:
//!
//! ```toml
//! theme = "forest-quest"
//! width = 1024
//!
//! [[nodes]]
//! id = "basics"
//! title = "Basics"
//! level = 0
//! lesson_count = 5
//!
//! [progress.basics]
//! status = "completed"
//! completed_lessons = 5
//! ```
//!
//! Every field except the node list is optional.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use trailmap::model::{ProgressMap, RoadmapNode};

/// Width used when neither the document nor the command line gives one.
pub const DEFAULT_WIDTH: f32 = 1024.0;

/// Errors raised while reading a roadmap document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read roadmap document `{}`: {err}", path.display())]
    Io {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("Failed to parse roadmap document `{}`: {}", path.display(), err.message())]
    Parse {
        path: PathBuf,
        src: String,
        err: toml::de::Error,
    },

    #[error("Invalid roadmap document: {0}")]
    Invalid(String),
}

/// A roadmap plus the scene settings it should be shown with.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapDocument {
    #[serde(default)]
    theme: Option<String>,

    #[serde(default)]
    width: Option<f32>,

    nodes: Vec<RoadmapNode>,

    #[serde(default)]
    progress: ProgressMap,
}

impl RoadmapDocument {
    /// Read and validate the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the file cannot be read or parsed, or
    /// when the document fails [`RoadmapDocument::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|err| DocumentError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let document: Self = match toml::from_str(&src) {
            Ok(document) => document,
            Err(err) => {
                return Err(DocumentError::Parse {
                    path: path.to_path_buf(),
                    src,
                    err,
                });
            }
        };

        document.validate()?;
        debug!(
            path = path.display().to_string(),
            nodes = document.nodes.len(),
            progress = document.progress.len();
            "Roadmap document loaded"
        );
        Ok(document)
    }

    /// Checks for duplicate node ids and unusable widths.
    ///
    /// Progress entries for unknown nodes are allowed; they are ignored by
    /// the scene and only logged here.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(DocumentError::Invalid(format!(
                    "duplicate node id `{}`",
                    node.id()
                )));
            }
        }

        if let Some(width) = self.width {
            if !width.is_finite() || width < 0.0 {
                return Err(DocumentError::Invalid(format!(
                    "width must be a non-negative number, got {width}"
                )));
            }
        }

        if self.progress.len() > self.nodes.len() {
            warn!(
                progress = self.progress.len(),
                nodes = self.nodes.len();
                "Document has progress entries for unknown nodes"
            );
        }

        Ok(())
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn nodes(&self) -> &[RoadmapNode] {
        &self.nodes
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    /// Consume the document, returning its nodes and progress.
    pub fn into_parts(self) -> (Vec<RoadmapNode>, ProgressMap) {
        (self.nodes, self.progress)
    }
}

#[cfg(test)]
mod tests {
    use trailmap::{identifier::Id, model::ProgressStatus};

    use super::*;

    fn parse(src: &str) -> RoadmapDocument {
        toml::from_str(src).expect("valid document")
    }

    #[test]
    fn test_full_document() {
        let document = parse(
            r#"
            theme = "space-odyssey"
            width = 900

            [[nodes]]
            id = "intro"
            title = "Introduction"
            lesson_count = 3

            [[nodes]]
            id = "loops"
            title = "Loops"
            level = 1

            [progress.intro]
            status = "completed"
            completed_lessons = 3
            "#,
        );

        assert_eq!(document.theme(), Some("space-odyssey"));
        assert_eq!(document.width(), Some(900.0));
        assert_eq!(document.nodes().len(), 2);
        assert_eq!(document.nodes()[0].lesson_count(), 3);
        assert_eq!(
            document.progress().status(Id::new("intro")),
            ProgressStatus::Completed
        );
        assert_eq!(
            document.progress().status(Id::new("loops")),
            ProgressStatus::Locked
        );
        assert!(document.validate().is_ok());
    }

    #[test]
    fn test_minimal_document() {
        let document = parse("nodes = []");
        assert_eq!(document.theme(), None);
        assert!(document.nodes().is_empty());
        assert!(document.progress().is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let document = parse(
            r#"
            [[nodes]]
            id = "a"
            title = "A"

            [[nodes]]
            id = "a"
            title = "Again"
            "#,
        );
        assert!(matches!(
            document.validate(),
            Err(DocumentError::Invalid(_))
        ));
    }

    #[test]
    fn test_negative_width_is_rejected() {
        let document = parse("width = -10\nnodes = []");
        assert!(document.validate().is_err());
    }

    #[test]
    fn test_missing_nodes_is_parse_error() {
        let err = toml::from_str::<RoadmapDocument>("theme = \"cyber-neon\"").unwrap_err();
        assert!(err.message().contains("nodes"));
    }
}

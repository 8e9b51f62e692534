//! Error type of the CLI.

use thiserror::Error;

use trailmap::TrailmapError;

use crate::{config::ConfigError, document::DocumentError};

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Trailmap(#[from] TrailmapError),
}

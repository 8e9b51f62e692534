//! Error types for Trailmap operations.
//!
//! Most scene operations cannot fail: unknown themes fall back to the default
//! theme and missing progress reads as locked. [`TrailmapError`] covers the
//! remaining cases, which are invalid configuration, invalid custom themes
//! and export failures.

use std::io;

use thiserror::Error;

use crate::export;

/// The main error type for Trailmap operations.
#[derive(Debug, Error)]
pub enum TrailmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid theme `{id}`: {reason}")]
    Theme { id: String, reason: String },

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl TrailmapError {
    /// Creates a new `Theme` error for the theme with the given id.
    pub fn invalid_theme(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Theme {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

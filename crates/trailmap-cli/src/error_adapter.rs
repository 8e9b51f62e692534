//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error types and miette's
//! rich diagnostic formatting. TOML parse errors keep the file content and the
//! failing span, so the report points at the offending line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use trailmap::TrailmapError;

use crate::{config::ConfigError, document::DocumentError, error::CliError};

/// Adapter for a TOML parse error in a configuration file or document.
pub struct TomlAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
    code: &'static str,
}

impl<'a> TomlAdapter<'a> {
    /// Create a new TOML adapter for `err` raised while parsing `src`.
    pub fn new(err: &'a toml::de::Error, src: &'a str, code: &'static str) -> Self {
        Self { err, src, code }
    }
}

impl fmt::Debug for TomlAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TomlAdapter")
            .field("err", &self.err)
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for TomlAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for TomlAdapter<'_> {}

impl MietteDiagnostic for TomlAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for errors without source information.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(ConfigError::Validation(err)) | CliError::Trailmap(err) => {
                trailmap_code(err)
            }
            CliError::Config(_) => "trailmap::config",
            CliError::Document(_) => "trailmap::document",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                "pass an existing file to --config or omit the flag"
            }
            CliError::Document(DocumentError::Invalid(_)) => {
                "node ids must be unique and the width must be a non-negative number"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

fn trailmap_code(err: &TrailmapError) -> &'static str {
    match err {
        TrailmapError::Io(_) => "trailmap::io",
        TrailmapError::Config(_) => "trailmap::config",
        TrailmapError::Theme { .. } => "trailmap::theme",
        TrailmapError::Export(_) => "trailmap::export",
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A TOML parse error with its source span.
    Toml(TomlAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Toml(t) => fmt::Display::fmt(t, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Toml(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Toml(t) => t.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Toml(t) => t.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Toml(t) => t.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Toml(t) => t.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// TOML parse errors become a [`Reportable::Toml`] carrying the file content;
/// everything else is a single [`Reportable::Error`].
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    let reportable = match err {
        CliError::Config(ConfigError::Parse { src, err, .. }) => {
            Reportable::Toml(TomlAdapter::new(err, src, "trailmap::config::parse"))
        }
        CliError::Document(DocumentError::Parse { src, err, .. }) => {
            Reportable::Toml(TomlAdapter::new(err, src, "trailmap::document::parse"))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    };
    vec![reportable]
}

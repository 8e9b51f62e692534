//! Trailmap CLI library
//!
//! This module contains the core CLI logic: load the configuration and the
//! roadmap document, mount the scene, simulate a number of frames and write
//! the snapshot as SVG.

pub mod document;
pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use document::{DocumentError, RoadmapDocument};
pub use error::CliError;

use log::info;

use trailmap::RoadmapScene;

/// Run the Trailmap CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading or validation errors
/// - Unreadable or invalid roadmap documents
/// - Rendering or file I/O errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing roadmap"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let document = RoadmapDocument::load(&args.input)?;

    let theme_id = args
        .theme
        .as_deref()
        .or(document.theme())
        .unwrap_or(app_config.scene().default_theme())
        .to_string();
    let width = args
        .width
        .or(document.width())
        .unwrap_or(document::DEFAULT_WIDTH);

    let mut scene = RoadmapScene::from_config(app_config)?;
    let (nodes, progress) = document.into_parts();
    scene.mount(nodes, progress, &theme_id, width);

    for _ in 0..args.frames {
        scene.frame(1.0);
    }

    scene.render_svg_to_file(&args.output)?;
    info!(output_file = args.output, frames = args.frames; "SVG exported successfully");

    Ok(())
}

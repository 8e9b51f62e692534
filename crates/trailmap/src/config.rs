//! Configuration types for Trailmap scenes.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from TOML.
//! Every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`SceneConfig`] - Default theme, safety margin, resize settling, particle seed.
//! - [`LayoutConfig`] - Overlap relaxation budget.
//! - [`StyleConfig`] - Rendering overrides such as the background color.
//! - Custom themes, registered in the [`ThemeCatalog`] next to the built-in ones.
//!
//! # Example
//!
//! ```
//! # use trailmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.scene().default_theme(), "cyber-neon");
//! assert_eq!(config.layout().relaxation_passes(), 4);
//!
//! let catalog = config.build_catalog().unwrap();
//! assert_eq!(catalog.len(), 5);
//! ```

use log::{debug, warn};
use serde::Deserialize;

use trailmap_core::{
    color::Color,
    theme::{Breakpoint, ThemeCatalog, ThemeConfig, presets},
};

use crate::{TrailmapError, layout::MAX_RELAXATION_PASSES};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    scene: SceneConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    /// Custom themes registered in addition to the built-in ones.
    #[serde(default)]
    themes: Vec<ThemeConfig>,
}

impl AppConfig {
    pub fn new(scene: SceneConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            scene,
            layout,
            style,
            themes: Vec::new(),
        }
    }

    /// Adds a custom theme definition.
    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.themes.push(theme);
        self
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn themes(&self) -> &[ThemeConfig] {
        &self.themes
    }

    /// Checks numeric settings for values no scene can work with.
    ///
    /// # Errors
    ///
    /// Returns [`TrailmapError::Config`] for a negative or non-finite safety
    /// margin or viewport height, and [`TrailmapError::Theme`] for an invalid
    /// custom theme.
    pub fn validate(&self) -> Result<(), TrailmapError> {
        let margin = self.scene.safety_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(TrailmapError::Config(format!(
                "scene.safety_margin must be a non-negative number, got {margin}"
            )));
        }

        let height = self.scene.viewport_height;
        if !height.is_finite() || height < 0.0 {
            return Err(TrailmapError::Config(format!(
                "scene.viewport_height must be a non-negative number, got {height}"
            )));
        }

        self.themes.iter().try_for_each(validate_theme)
    }

    /// Builds a catalog with the built-in themes, the custom themes of this
    /// configuration and the configured default theme.
    ///
    /// A default theme id that names no registered theme is logged and the
    /// built-in default is kept.
    ///
    /// # Errors
    ///
    /// Returns an error when [`AppConfig::validate`] fails.
    pub fn build_catalog(&self) -> Result<ThemeCatalog, TrailmapError> {
        self.validate()?;

        let mut catalog = ThemeCatalog::with_builtin();
        for theme in &self.themes {
            if catalog.register(theme.clone()).is_some() {
                debug!(theme_id = theme.id(); "Custom theme replaces a built-in theme");
            }
        }

        let default_theme = self.scene.default_theme();
        if !catalog.set_default(default_theme) {
            warn!(
                theme_id = default_theme,
                fallback = presets::DEFAULT_THEME_ID;
                "Configured default theme is not registered"
            );
        }

        Ok(catalog)
    }
}

/// Checks a custom theme for values that would break layout or animation.
///
/// # Errors
///
/// Returns [`TrailmapError::Theme`] naming the offending field.
pub fn validate_theme(theme: &ThemeConfig) -> Result<(), TrailmapError> {
    let invalid = |reason: String| Err(TrailmapError::invalid_theme(theme.id(), reason));

    if theme.id().trim().is_empty() {
        return invalid("theme id must not be empty".to_string());
    }

    for breakpoint in [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop] {
        let spacing = theme.spacing().at(breakpoint);
        let values = [
            ("vertical", spacing.vertical()),
            ("horizontal", spacing.horizontal()),
            ("min_distance", spacing.min_distance()),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!(
                    "spacing.{breakpoint:?}.{field} must be a non-negative number, got {value}"
                ));
            }
        }
    }

    let speed = theme.particles().speed();
    if !speed.is_finite() || speed < 0.0 {
        return invalid(format!(
            "particles.speed must be a non-negative number, got {speed}"
        ));
    }

    let hover = theme.animation().hover_scale();
    if !hover.is_finite() || hover <= 0.0 {
        return invalid(format!("animation.hover_scale must be positive, got {hover}"));
    }

    let width = theme.path_style().width();
    if !width.is_finite() || width <= 0.0 {
        return invalid(format!("path_style.width must be positive, got {width}"));
    }

    Ok(())
}

/// Scene behavior settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    default_theme: String,
    safety_margin: f32,
    settle_frames: u32,
    particle_seed: u64,
    viewport_height: f32,
}

impl SceneConfig {
    /// Theme used when a requested theme id is unknown.
    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    /// Horizontal and vertical margin kept free around the roadmap.
    pub fn safety_margin(&self) -> f32 {
        self.safety_margin
    }

    /// Quiet frames a pending resize waits before it is applied.
    pub fn settle_frames(&self) -> u32 {
        self.settle_frames
    }

    /// Seed of the particle simulator random generator.
    pub fn particle_seed(&self) -> u64 {
        self.particle_seed
    }

    /// Height of the particle canvas.
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn with_default_theme(mut self, theme_id: impl Into<String>) -> Self {
        self.default_theme = theme_id.into();
        self
    }

    pub fn with_safety_margin(mut self, safety_margin: f32) -> Self {
        self.safety_margin = safety_margin;
        self
    }

    pub fn with_settle_frames(mut self, settle_frames: u32) -> Self {
        self.settle_frames = settle_frames;
        self
    }

    pub fn with_particle_seed(mut self, particle_seed: u64) -> Self {
        self.particle_seed = particle_seed;
        self
    }

    pub fn with_viewport_height(mut self, viewport_height: f32) -> Self {
        self.viewport_height = viewport_height;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_theme: presets::DEFAULT_THEME_ID.to_string(),
            safety_margin: 40.0,
            settle_frames: 0,
            particle_seed: 0x7A11_3A9E,
            viewport_height: 800.0,
        }
    }
}

/// Layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    relaxation_passes: usize,
}

impl LayoutConfig {
    pub fn new(relaxation_passes: usize) -> Self {
        Self { relaxation_passes }
    }

    /// Maximum number of pairwise relaxation passes of the overlap resolver.
    pub fn relaxation_passes(&self) -> usize {
        self.relaxation_passes
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(MAX_RELAXATION_PASSES)
    }
}

/// Visual overrides applied on top of the active theme.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<Color>,
}

impl StyleConfig {
    pub fn new(background_color: Option<Color>) -> Self {
        Self { background_color }
    }

    /// Background color replacing the theme's background, if configured.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Applies the overrides to `theme`.
    pub fn apply(&self, theme: &ThemeConfig) -> ThemeConfig {
        match self.background_color {
            Some(background) => theme.clone().with_background(background),
            None => theme.clone(),
        }
    }
}

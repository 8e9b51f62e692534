//! Theme ("skin") configuration.
//!
//! A [`ThemeConfig`] bundles everything that makes one roadmap look different
//! from another: the layout family, responsive spacing, the color palette,
//! particle effect, animation timings, node shape and path styling. Themes
//! are immutable values looked up by id through a [`ThemeCatalog`].
//!
//! Built-in themes live in [`presets`]. Custom themes deserialize from TOML;
//! any field left out takes the value of the default theme.
//!
//! ```
//! use trailmap_core::theme::{LayoutFamily, ThemeCatalog};
//!
//! let catalog = ThemeCatalog::with_builtin();
//! let forest = catalog.resolve("forest-quest");
//! assert_eq!(forest.layout(), LayoutFamily::Tree);
//!
//! // Unknown ids fall back to the default theme.
//! let fallback = catalog.resolve("does-not-exist");
//! assert_eq!(fallback.id(), "cyber-neon");
//! ```

mod catalog;
pub mod presets;

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{color::Color, draw::StrokeStyle};

pub use catalog::ThemeCatalog;

/// Viewport width below which the mobile spacing applies.
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
/// Viewport width below which the tablet spacing applies.
pub const TABLET_MAX_WIDTH: f32 = 1024.0;

/// Node placement strategy of a theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutFamily {
    /// Straight column down the centerline
    #[default]
    Vertical,
    /// Meandering vine with alternating branches
    Tree,
    /// Outward spiral around the centerline
    Orbital,
    /// Sine wave
    Wave,
    /// Grid-snapped corridors
    Dungeon,
}

impl LayoutFamily {
    pub const ALL: [LayoutFamily; 5] = [
        Self::Vertical,
        Self::Tree,
        Self::Orbital,
        Self::Wave,
        Self::Dungeon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Tree => "tree",
            Self::Orbital => "orbital",
            Self::Wave => "wave",
            Self::Dungeon => "dungeon",
        }
    }
}

impl fmt::Display for LayoutFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown layout family `{s}`, valid values: vertical, tree, orbital, wave, dungeon"
                )
            })
    }
}

/// Responsive breakpoint derived from the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Classifies a viewport width.
    ///
    /// ```
    /// use trailmap_core::theme::Breakpoint;
    ///
    /// assert_eq!(Breakpoint::for_width(767.0), Breakpoint::Mobile);
    /// assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Tablet);
    /// assert_eq!(Breakpoint::for_width(1024.0), Breakpoint::Desktop);
    /// ```
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width < TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Spacing between consecutive nodes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spacing {
    vertical: f32,
    horizontal: f32,
    #[serde(alias = "minDistance")]
    min_distance: f32,
}

impl Spacing {
    pub fn new(vertical: f32, horizontal: f32, min_distance: f32) -> Self {
        Self {
            vertical,
            horizontal,
            min_distance,
        }
    }

    /// Distance between consecutive rows
    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    /// Horizontal amplitude of the layout family
    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    /// Minimum center-to-center distance between any two nodes
    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(180.0, 0.0, 120.0)
    }
}

/// Spacing per breakpoint plus the overlap-prevention switch.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    mobile: Spacing,
    tablet: Spacing,
    desktop: Spacing,
    #[serde(alias = "preventOverlap")]
    prevent_overlap: bool,
}

impl SpacingConfig {
    pub fn new(mobile: Spacing, tablet: Spacing, desktop: Spacing) -> Self {
        Self {
            mobile,
            tablet,
            desktop,
            prevent_overlap: true,
        }
    }

    pub fn with_prevent_overlap(mut self, prevent_overlap: bool) -> Self {
        self.prevent_overlap = prevent_overlap;
        self
    }

    /// Spacing for an explicit breakpoint.
    pub fn at(&self, breakpoint: Breakpoint) -> Spacing {
        match breakpoint {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Desktop => self.desktop,
        }
    }

    /// Spacing for the breakpoint `available_width` falls into.
    pub fn resolve(&self, available_width: f32) -> Spacing {
        self.at(Breakpoint::for_width(available_width))
    }

    pub fn prevent_overlap(&self) -> bool {
        self.prevent_overlap
    }
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self::new(
            Spacing::new(140.0, 0.0, 100.0),
            Spacing::new(160.0, 0.0, 110.0),
            Spacing::new(180.0, 0.0, 120.0),
        )
    }
}

/// Color palette of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub node_completed: Color,
    pub node_active: Color,
    pub node_locked: Color,
    pub path_inactive: Color,
    pub path_active: Color,
    pub path_completed: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        presets::cyber_neon().colors
    }
}

/// Ambient particle effect kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    #[default]
    Stars,
    Leaves,
    Bubbles,
    Fire,
    Code,
}

impl ParticleKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Leaves => "leaves",
            Self::Bubbles => "bubbles",
            Self::Fire => "fire",
            Self::Code => "code",
        }
    }

    /// Returns true for kinds that wrap around the surface edges instead of
    /// respawning at an emitter.
    pub fn wraps(self) -> bool {
        !matches!(self, Self::Fire)
    }
}

/// Particle effect settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    kind: ParticleKind,
    count: usize,
    speed: f32,
    enabled: bool,
}

impl ParticleConfig {
    pub fn new(kind: ParticleKind, count: usize, speed: f32) -> Self {
        Self {
            kind,
            count,
            speed,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns true when the effect should run at all.
    pub fn enabled(&self) -> bool {
        self.enabled && self.count > 0
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::new(ParticleKind::Stars, 50, 0.5)
    }
}

/// How a node appears when the roadmap is first shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAnimationKind {
    #[default]
    Fade,
    Scale,
    Slide,
    Bounce,
    Glow,
}

impl EntryAnimationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Scale => "scale",
            Self::Slide => "slide",
            Self::Bounce => "bounce",
            Self::Glow => "glow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntryAnimation {
    kind: EntryAnimationKind,
    duration_ms: u32,
    delay_ms: u32,
}

impl EntryAnimation {
    pub fn new(kind: EntryAnimationKind, duration_ms: u32, delay_ms: u32) -> Self {
        Self {
            kind,
            duration_ms,
            delay_ms,
        }
    }

    pub fn kind(&self) -> EntryAnimationKind {
        self.kind
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Stagger added per sequence level
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl Default for EntryAnimation {
    fn default() -> Self {
        Self::new(EntryAnimationKind::Fade, 600, 100)
    }
}

/// How connective paths are drawn in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDrawKind {
    #[default]
    Draw,
    Fade,
    Pulse,
    /// A dot travels along active paths
    Flow,
}

impl PathDrawKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Fade => "fade",
            Self::Pulse => "pulse",
            Self::Flow => "flow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathDraw {
    kind: PathDrawKind,
    duration_ms: u32,
}

impl PathDraw {
    pub fn new(kind: PathDrawKind, duration_ms: u32) -> Self {
        Self { kind, duration_ms }
    }

    pub fn kind(&self) -> PathDrawKind {
        self.kind
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

impl Default for PathDraw {
    fn default() -> Self {
        Self::new(PathDrawKind::Draw, 800)
    }
}

/// Animation timings of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    entry: EntryAnimation,
    path_draw: PathDraw,
    hover_scale: f32,
    hover_duration_ms: u32,
}

impl AnimationConfig {
    pub fn new(entry: EntryAnimation, path_draw: PathDraw, hover_scale: f32) -> Self {
        Self {
            entry,
            path_draw,
            hover_scale,
            hover_duration_ms: 300,
        }
    }

    pub fn with_hover_duration_ms(mut self, hover_duration_ms: u32) -> Self {
        self.hover_duration_ms = hover_duration_ms;
        self
    }

    pub fn entry(&self) -> EntryAnimation {
        self.entry
    }

    pub fn path_draw(&self) -> PathDraw {
        self.path_draw
    }

    pub fn hover_scale(&self) -> f32 {
        self.hover_scale
    }

    pub fn hover_duration_ms(&self) -> u32 {
        self.hover_duration_ms
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(EntryAnimation::default(), PathDraw::default(), 1.1)
    }
}

/// Outline of a node glyph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NodeShape {
    RoundedSquare { radius: f32 },
    #[default]
    Circle,
    /// Square rotated by 45 degrees
    Diamond,
}

/// Default node glyph edge length in pixels.
pub const NODE_SIZE: f32 = 64.0;

/// Stroke styling of connective paths.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    width: f32,
    dash_when_active: StrokeStyle,
    glow: bool,
}

impl PathStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            dash_when_active: StrokeStyle::Solid,
            glow: false,
        }
    }

    pub fn with_active_dash(mut self, dash: StrokeStyle) -> Self {
        self.dash_when_active = dash;
        self
    }

    pub fn with_glow(mut self, glow: bool) -> Self {
        self.glow = glow;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Dash pattern applied to active paths
    pub fn dash_when_active(&self) -> StrokeStyle {
        self.dash_when_active
    }

    pub fn glow(&self) -> bool {
        self.glow
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(3.0)
    }
}

/// Glow halo drawn around active nodes and paths.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    enabled: bool,
    intensity: f32,
    color: Color,
}

impl GlowConfig {
    pub fn new(intensity: f32, color: Color) -> Self {
        Self {
            enabled: true,
            intensity,
            color,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled && self.intensity > 0.0
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        presets::cyber_neon().glow
    }
}

/// A complete, immutable theme.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeConfig {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    layout: LayoutFamily,
    #[serde(default)]
    spacing: SpacingConfig,
    #[serde(default)]
    colors: ThemeColors,
    #[serde(default)]
    particles: ParticleConfig,
    #[serde(default)]
    animation: AnimationConfig,
    #[serde(default)]
    node_shape: NodeShape,
    #[serde(default)]
    path_style: PathStyle,
    #[serde(default)]
    glow: GlowConfig,
}

impl ThemeConfig {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn layout(&self) -> LayoutFamily {
        self.layout
    }

    pub fn spacing(&self) -> &SpacingConfig {
        &self.spacing
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn particles(&self) -> &ParticleConfig {
        &self.particles
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    pub fn path_style(&self) -> &PathStyle {
        &self.path_style
    }

    pub fn glow(&self) -> &GlowConfig {
        &self.glow
    }

    /// Returns a copy with the background color replaced.
    pub fn with_background(mut self, background: Color) -> Self {
        self.colors.background = background;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_family_from_str() {
        for family in LayoutFamily::ALL {
            assert_eq!(family.name().parse::<LayoutFamily>(), Ok(family));
        }
        let err = "spiral".parse::<LayoutFamily>().unwrap_err();
        assert!(err.contains("unknown layout family"));
    }

    #[test]
    fn test_spacing_resolve_by_width() {
        let spacing = presets::forest_quest().spacing;
        assert_eq!(spacing.resolve(375.0).vertical(), 150.0);
        assert_eq!(spacing.resolve(800.0).vertical(), 180.0);
        assert_eq!(spacing.resolve(1440.0).vertical(), 200.0);
        assert_eq!(spacing.resolve(1440.0).horizontal(), 250.0);
    }

    #[test]
    fn test_particle_config_enabled() {
        assert!(ParticleConfig::default().enabled());
        assert!(!ParticleConfig::default().disabled().enabled());
        assert!(!ParticleConfig::new(ParticleKind::Fire, 0, 1.0).enabled());
    }

    #[test]
    fn test_particle_kind_wraps() {
        assert!(ParticleKind::Stars.wraps());
        assert!(ParticleKind::Code.wraps());
        assert!(!ParticleKind::Fire.wraps());
    }

    #[test]
    fn test_custom_theme_deserialize_fills_defaults() {
        let theme: ThemeConfig = toml::from_str(
            r##"
            id = "midnight"
            name = "Midnight"
            layout = "wave"

            [colors]
            background = "#000000"

            [particles]
            kind = "code"
            count = 12

            [node_shape]
            kind = "rounded_square"
            radius = 8.0

            [path_style]
            width = 6.0
            dash_when_active = "4 2"
            "##,
        )
        .unwrap();

        assert_eq!(theme.id(), "midnight");
        assert_eq!(theme.layout(), LayoutFamily::Wave);
        assert_eq!(theme.colors().background, Color::new("#000000").unwrap());
        assert_eq!(theme.colors().node_active, ThemeColors::default().node_active);
        assert_eq!(theme.particles().kind(), ParticleKind::Code);
        assert_eq!(theme.particles().count(), 12);
        assert_eq!(theme.particles().speed(), 0.5);
        assert_eq!(theme.node_shape(), NodeShape::RoundedSquare { radius: 8.0 });
        assert_eq!(theme.path_style().dash_when_active(), StrokeStyle::dashed(4.0, 2.0));
        assert!(theme.spacing().prevent_overlap());
    }

    #[test]
    fn test_custom_theme_requires_id() {
        let result = toml::from_str::<ThemeConfig>(r#"name = "Nameless""#);
        assert!(result.is_err());
    }
}

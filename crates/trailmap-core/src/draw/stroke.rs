//! Stroke definitions for connective paths.
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: color, width, dash pattern, cap and join of a path
//! - [`StrokeStyle`]: solid or a repeating dash/gap pattern
//! - [`StrokeCap`] / [`StrokeJoin`]: endpoint and corner rendering
//! - [`apply_stroke!`](crate::apply_stroke!): sets every stroke attribute on an
//!   SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#06B6D4"`, `0.5` |
//! | `width` | `stroke-width` | `3.0` |
//! | `style` | `stroke-dasharray` | `"10 5"` |
//! | `cap` | `stroke-linecap` | `"round"` |
//! | `join` | `stroke-linejoin` | `"round"` |
//!
//! ```
//! use trailmap_core::color::Color;
//! use trailmap_core::draw::{StrokeDefinition, StrokeStyle};
//! use svg::node::element::Path;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("#06B6D4").unwrap(), 3.0);
//! stroke.set_style(StrokeStyle::dashed(10.0, 5.0));
//!
//! let path = trailmap_core::apply_stroke!(Path::new().set("d", "M0,0 L0,100"), &stroke);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::color::Color;

// =============================================================================
// Type Definitions
// =============================================================================

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum StrokeStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Repeating dash followed by a gap, both in pixels
    Dashed { dash: f32, gap: f32 },
}

impl StrokeStyle {
    /// Dash pattern with the given dash and gap lengths.
    pub fn dashed(dash: f32, gap: f32) -> Self {
        Self::Dashed { dash, gap }
    }

    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed { dash, gap } => Some(format!("{dash} {gap}")),
        }
    }

    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Dashed { .. })
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    /// Parses `"solid"` or a `"<dash> <gap>"` pair (comma or space separated).
    ///
    /// ```
    /// use trailmap_core::draw::StrokeStyle;
    ///
    /// assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
    /// assert_eq!("10 5".parse::<StrokeStyle>(), Ok(StrokeStyle::dashed(10.0, 5.0)));
    /// assert_eq!("5,5".parse::<StrokeStyle>(), Ok(StrokeStyle::dashed(5.0, 5.0)));
    /// assert!("dashes".parse::<StrokeStyle>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("solid") || s.is_empty() {
            return Ok(Self::Solid);
        }

        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let invalid = || format!("invalid dash pattern `{s}`, expected `solid` or `<dash> <gap>`");

        match parts.as_slice() {
            [dash, gap] => {
                let dash: f32 = dash.parse().map_err(|_| invalid())?;
                let gap: f32 = gap.parse().map_err(|_| invalid())?;
                if dash <= 0.0 || gap < 0.0 {
                    return Err(invalid());
                }
                Ok(Self::dashed(dash, gap))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_svg_value() {
            Some(pattern) => f.write_str(&pattern),
            None => f.write_str("solid"),
        }
    }
}

impl<'de> Deserialize<'de> for StrokeStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Defines how corners of polylines are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke definition for connective paths.
///
/// The color's alpha doubles as stroke opacity; inactive paths are rendered by
/// lowering it rather than by a separate field.
///
/// # Examples
///
/// ```
/// use trailmap_core::color::Color;
/// use trailmap_core::draw::{StrokeCap, StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::new(Color::new("#22C55E").unwrap(), 4.0);
/// assert_eq!(stroke.width(), 4.0);
/// assert_eq!(stroke.style(), StrokeStyle::Solid);
/// assert_eq!(stroke.cap(), StrokeCap::Round);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid stroke with round caps and joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Returns a copy with the color's alpha replaced by `opacity`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.color = self.color.with_alpha(opacity);
        self
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 2.0,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Round,
            join: StrokeJoin::Round,
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-opacity`, `stroke-width`, `stroke-linecap`,
/// `stroke-linejoin` and, for dashed strokes, `stroke-dasharray`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().opaque().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

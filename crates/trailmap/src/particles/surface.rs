//! Drawing surfaces for the particle field.
//!
//! The simulator only talks to a [`ParticleCanvas`]. Canvases are obtained
//! from a [`CanvasProvider`], which may fail; a failed acquisition disables
//! the particle field without affecting the rest of the scene.

use thiserror::Error;

use trailmap_core::{color::Color, geometry::Point, geometry::Size};

/// Errors raised while acquiring a particle canvas.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("Canvas unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}

/// One drawable particle, in canvas coordinates.
///
/// Colors carry the particle opacity as alpha.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    /// Filled circle
    Dot {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Ellipse tilted by `rotation` degrees
    Leaf {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        color: Color,
    },
    /// Circle with a translucent fill and an outline
    Bubble {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Circle fading out toward its rim
    Ember {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// A single character
    Glyph {
        position: Point,
        glyph: char,
        font_size: f32,
        color: Color,
    },
}

impl Sprite {
    pub fn color(&self) -> Color {
        match self {
            Self::Dot { color, .. }
            | Self::Leaf { color, .. }
            | Self::Bubble { color, .. }
            | Self::Ember { color, .. }
            | Self::Glyph { color, .. } => *color,
        }
    }

    /// Anchor point of the sprite.
    pub fn position(&self) -> Point {
        match self {
            Self::Dot { center, .. }
            | Self::Leaf { center, .. }
            | Self::Bubble { center, .. }
            | Self::Ember { center, .. } => *center,
            Self::Glyph { position, .. } => *position,
        }
    }
}

/// A surface the particle field is drawn on.
pub trait ParticleCanvas {
    /// Resize the drawing surface.
    fn resize(&mut self, size: Size);

    fn size(&self) -> Size;

    /// Remove everything drawn so far.
    fn clear(&mut self);

    fn draw(&mut self, sprite: &Sprite);
}

/// Source of particle canvases.
pub trait CanvasProvider {
    fn acquire(&self, size: Size) -> Result<Box<dyn ParticleCanvas>, SurfaceError>;
}

/// In-memory canvas keeping the sprites of the last frame.
#[derive(Debug, Default, Clone)]
pub struct SpriteBuffer {
    size: Size,
    sprites: Vec<Sprite>,
}

impl SpriteBuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            sprites: Vec::new(),
        }
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }
}

impl ParticleCanvas for SpriteBuffer {
    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.sprites.clear();
    }

    fn draw(&mut self, sprite: &Sprite) {
        self.sprites.push(sprite.clone());
    }
}

/// Provider handing out [`SpriteBuffer`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpriteBufferProvider;

impl CanvasProvider for SpriteBufferProvider {
    fn acquire(&self, size: Size) -> Result<Box<dyn ParticleCanvas>, SurfaceError> {
        if !size.width().is_finite() || !size.height().is_finite() {
            return Err(SurfaceError::InvalidSize {
                width: size.width(),
                height: size.height(),
            });
        }
        Ok(Box::new(SpriteBuffer::new(size)))
    }
}

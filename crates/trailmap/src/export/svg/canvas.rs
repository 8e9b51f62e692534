//! Particle canvas collecting SVG nodes.

use svg::node::element as svg_element;

use trailmap_core::{color::Color, draw::SvgNode, geometry::Size};

use crate::particles::{ParticleCanvas, Sprite};

/// Fill opacity of a bubble relative to its outline.
const BUBBLE_FILL_SHARE: f32 = 0.3;

/// A [`ParticleCanvas`] turning every sprite into an SVG element.
///
/// Sprites arrive in canvas coordinates (origin at the top-left corner);
/// `offset_x` is added to every x coordinate so the nodes line up with a
/// group whose origin is elsewhere.
pub struct SvgParticleCanvas {
    size: Size,
    offset_x: f32,
    nodes: Vec<SvgNode>,
}

impl SvgParticleCanvas {
    pub fn new(size: Size, offset_x: f32) -> Self {
        Self {
            size,
            offset_x,
            nodes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<SvgNode> {
        self.nodes
    }
}

impl ParticleCanvas for SvgParticleCanvas {
    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn draw(&mut self, sprite: &Sprite) {
        let x = sprite.position().x() + self.offset_x;
        let y = sprite.position().y();

        let node: SvgNode = match *sprite {
            Sprite::Dot { radius, color, .. } | Sprite::Ember { radius, color, .. } => {
                let circle = svg_element::Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", radius);
                Box::new(fill(circle, color))
            }
            Sprite::Leaf {
                radius_x,
                radius_y,
                rotation,
                color,
                ..
            } => {
                let ellipse = svg_element::Ellipse::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("rx", radius_x)
                    .set("ry", radius_y)
                    .set("transform", format!("rotate({rotation} {x} {y})"));
                Box::new(fill(ellipse, color))
            }
            Sprite::Bubble { radius, color, .. } => Box::new(
                svg_element::Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", radius)
                    .set("fill", color.opaque().to_string())
                    .set("fill-opacity", color.alpha() * BUBBLE_FILL_SHARE)
                    .set("stroke", color.opaque().to_string())
                    .set("stroke-opacity", color.alpha()),
            ),
            Sprite::Glyph {
                glyph,
                font_size,
                color,
                ..
            } => {
                let text = svg_element::Text::new(glyph.to_string())
                    .set("x", x)
                    .set("y", y)
                    .set("font-family", "monospace")
                    .set("font-size", font_size);
                Box::new(fill(text, color))
            }
        };
        self.nodes.push(node);
    }
}

fn fill<E: svg::Node>(mut element: E, color: Color) -> E {
    element.assign("fill", color.opaque().to_string());
    element.assign("fill-opacity", color.alpha());
    element
}

//! Layer-based z-ordering for SVG output.
//!
//! A roadmap scene stacks, bottom to top: the background fill, the particle
//! field, connective paths, node glyphs and finally labels. Drawables push
//! their SVG nodes into a [`LayeredOutput`] tagged with a [`RenderLayer`] and
//! the output sorts them when rendered.
//!
//! ```
//! # use trailmap_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Circle, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Nodes, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! // Background group is emitted first even though it was added last.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers of a roadmap scene.
///
/// Variant order is z-order: the first variant renders first (bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Scene background fill
    Background,
    /// Ambient particle field
    Particles,
    /// Connective paths between consecutive nodes
    Paths,
    /// Flow dots travelling along active paths
    Flow,
    /// Node glyphs
    Nodes,
    /// Node titles and status labels
    Labels,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Particles => "particles",
            Self::Paths => "paths",
            Self::Flow => "flow",
            Self::Nodes => "nodes",
            Self::Labels => "labels",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`; nodes keep insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes collected in `layer`.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders the collected nodes into one `<g data-layer="...">` group per
    /// non-empty layer, bottom layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order inside each layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}

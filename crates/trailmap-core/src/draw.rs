//! Drawing primitives shared by the scene and its exporters.
//!
//! - [`StrokeDefinition`] and friends describe how a connective path is stroked.
//! - [`LayeredOutput`] collects SVG nodes per [`RenderLayer`] so particles,
//!   paths, nodes and labels stack in a fixed z-order.

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};

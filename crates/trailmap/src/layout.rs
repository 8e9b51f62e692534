//! Node placement.
//!
//! [`LayoutEngine::compute`] turns an ordered node list, a theme and the
//! available width into a [`Layout`]: an ordered id → position map plus the
//! canvas extent. Placement is delegated to one engine per
//! [`LayoutFamily`](trailmap_core::theme::LayoutFamily); the result is clamped
//! to the safety margin and, when the theme asks for it, passed through the
//! [`OverlapResolver`].
//!
//! Layout space has x = 0 on the centerline and y growing downward.

mod engines;
pub mod overlap;

use indexmap::IndexMap;
use log::{debug, trace};

use trailmap_core::{
    geometry::{Point, Size},
    identifier::Id,
    model::RoadmapNode,
    theme::{LayoutFamily, Spacing, ThemeConfig},
};

pub use engines::{EngineBuilder, FamilyEngine, LayoutFrame, MIN_ANGULAR_STEP};
pub use overlap::{MAX_RELAXATION_PASSES, OverlapResolver};

/// Smallest distance between consecutive rows, whatever the theme says.
pub const MIN_ROW_STEP: f32 = 32.0;

/// Ordered map of node id to position; insertion order is node order.
pub type PositionMap = IndexMap<Id, Point>;

/// Positions of every node plus the extent of the drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: PositionMap,
    size: Size,
    family: LayoutFamily,
    spacing: Option<Spacing>,
    available_width: f32,
}

impl Layout {
    /// Layout with no nodes and zero size.
    pub fn empty(family: LayoutFamily, available_width: f32) -> Self {
        Self {
            family,
            available_width,
            ..Self::default()
        }
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn position(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Canvas extent: twice the widest swing plus margins, by the lowest row
    /// plus the bottom margin.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn family(&self) -> LayoutFamily {
        self.family
    }

    /// Spacing resolved for the width this layout was computed for.
    pub fn spacing(&self) -> Option<Spacing> {
        self.spacing
    }

    pub fn available_width(&self) -> f32 {
        self.available_width
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }
}

/// Computes layouts for every layout family.
///
/// # Examples
///
/// ```
/// use trailmap::layout::LayoutEngine;
/// use trailmap::model::RoadmapNode;
/// use trailmap::theme::presets;
///
/// let nodes: Vec<RoadmapNode> = (0..6)
///     .map(|i| RoadmapNode::new(format!("step-{i}").as_str(), format!("Step {i}"), i))
///     .collect();
///
/// let mut engine = LayoutEngine::new(40.0);
/// let layout = engine.compute(&nodes, &presets::ocean_depths(), 1280.0);
///
/// assert_eq!(layout.len(), 6);
/// let ys: Vec<f32> = layout.iter().map(|(_, p)| p.y()).collect();
/// assert!(ys.windows(2).all(|w| w[0] < w[1]));
/// ```
pub struct LayoutEngine {
    builder: EngineBuilder,
    safety_margin: f32,
    relaxation_passes: usize,
}

impl LayoutEngine {
    /// Create a layout engine keeping `safety_margin` free on every side.
    pub fn new(safety_margin: f32) -> Self {
        Self {
            builder: EngineBuilder::new(),
            safety_margin: safety_margin.max(0.0),
            relaxation_passes: MAX_RELAXATION_PASSES,
        }
    }

    /// Set the relaxation budget of the overlap resolver.
    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    /// Replace the family engine builder.
    pub fn with_builder(mut self, builder: EngineBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn safety_margin(&self) -> f32 {
        self.safety_margin
    }

    /// Half-width available to the roadmap once the margin is removed.
    pub fn max_offset(&self, available_width: f32) -> f32 {
        (available_width / 2.0 - self.safety_margin).max(0.0)
    }

    /// Lay out `nodes` for `theme` in a container `available_width` wide.
    pub fn compute(
        &mut self,
        nodes: &[RoadmapNode],
        theme: &ThemeConfig,
        available_width: f32,
    ) -> Layout {
        let family = theme.layout();
        let available_width = if available_width.is_finite() {
            available_width.max(0.0)
        } else {
            0.0
        };

        if nodes.is_empty() {
            debug!(family = family.name(); "No nodes to lay out");
            return Layout::empty(family, available_width);
        }

        let spacing = theme.spacing().resolve(available_width);
        let max_offset = self.max_offset(available_width);
        let frame = LayoutFrame::new(spacing, max_offset, self.safety_margin);

        debug!(
            family = family.name(),
            nodes = nodes.len(),
            available_width,
            max_offset;
            "Computing layout"
        );

        let engine = self.builder.family_engine(family);
        let points = engine.place(nodes, &frame);

        let mut positions: PositionMap = nodes
            .iter()
            .map(RoadmapNode::id)
            .zip(points.into_iter().map(|p| p.with_x(p.x().clamp(-max_offset, max_offset))))
            .collect();

        if theme.spacing().prevent_overlap() && spacing.min_distance() > 0.0 {
            positions = OverlapResolver::new(spacing.min_distance())
                .with_horizontal_limit(max_offset)
                .with_max_passes(self.relaxation_passes)
                .resolve(&positions);
        }

        normalize_top(&mut positions, self.safety_margin);
        let size = extent(&positions, self.safety_margin);
        trace!(positions:?; "Layout positions");

        Layout {
            positions,
            size,
            family,
            spacing: Some(spacing),
            available_width,
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(40.0)
    }
}

/// Shifts every position vertically so the first row sits on the margin.
fn normalize_top(positions: &mut PositionMap, safety_margin: f32) {
    let min_y = positions
        .values()
        .map(|p| p.y())
        .fold(f32::INFINITY, f32::min);
    if !min_y.is_finite() {
        return;
    }

    let shift = safety_margin - min_y;
    if shift == 0.0 {
        return;
    }
    for point in positions.values_mut() {
        let y = if point.y() == min_y {
            safety_margin
        } else {
            point.y() + shift
        };
        *point = point.with_y(y);
    }
}

fn extent(positions: &PositionMap, safety_margin: f32) -> Size {
    if positions.is_empty() {
        return Size::default();
    }

    let (max_abs_x, max_y) = positions
        .values()
        .fold((0.0f32, 0.0f32), |(x, y), p| (x.max(p.x().abs()), y.max(p.y())));

    Size::new(
        2.0 * max_abs_x + 2.0 * safety_margin,
        max_y + safety_margin,
    )
}

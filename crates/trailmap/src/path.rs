//! Connective paths between consecutive nodes.
//!
//! [`derive_edges`] pairs every node with its successor and derives the edge
//! status from progress. [`PathGeometryBuilder`] turns an edge into a
//! [`ThemedPath`]: the geometry depends on the theme's layout family, the
//! stroke on the edge status.

use log::trace;

use trailmap_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::Point,
    identifier::Id,
    model::{ProgressMap, ProgressStatus, RoadmapNode},
    theme::{LayoutFamily, PathDrawKind, PathStyle, ThemeColors, ThemeConfig},
};

use crate::layout::PositionMap;

/// Control point offset of tree vines.
const TREE_CURVE: f32 = 60.0;
/// Control point offset of orbital arcs.
const ORBITAL_CURVE: f32 = 30.0;
/// Opacity of paths leading to locked nodes.
const INACTIVE_OPACITY: f32 = 0.5;
/// Samples used to approximate curve length.
const LENGTH_SAMPLES: usize = 16;

/// Status of the path between two consecutive nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStatus {
    Inactive,
    Active,
    Completed,
}

impl EdgeStatus {
    /// Derive the status of the edge `from → to`.
    pub fn between(from: ProgressStatus, to: ProgressStatus) -> Self {
        match (from, to) {
            (ProgressStatus::Completed, ProgressStatus::Completed) => Self::Completed,
            (ProgressStatus::Completed, ProgressStatus::Active) => Self::Active,
            _ => Self::Inactive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// A path between node `index` and its successor in sequence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathEdge {
    index: usize,
    from: Id,
    to: Id,
    from_point: Point,
    to_point: Point,
    status: EdgeStatus,
}

impl PathEdge {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn from_point(&self) -> Point {
        self.from_point
    }

    pub fn to_point(&self) -> Point {
        self.to_point
    }

    pub fn status(&self) -> EdgeStatus {
        self.status
    }
}

/// Pair every positioned node with its successor.
///
/// Nodes without a position are skipped, so their neighbors are joined
/// directly. Nodes absent from `progress` count as locked.
///
/// # Examples
///
/// ```
/// use trailmap::geometry::Point;
/// use trailmap::layout::PositionMap;
/// use trailmap::model::{ProgressMap, ProgressStatus, RoadmapNode};
/// use trailmap::path::{EdgeStatus, derive_edges};
///
/// let nodes = vec![
///     RoadmapNode::new("a", "A", 0),
///     RoadmapNode::new("b", "B", 1),
///     RoadmapNode::new("c", "C", 2),
/// ];
/// let progress: ProgressMap = [
///     ("a", ProgressStatus::Completed),
///     ("b", ProgressStatus::Active),
/// ]
/// .into_iter()
/// .collect();
/// let positions: PositionMap = nodes
///     .iter()
///     .enumerate()
///     .map(|(i, n)| (n.id(), Point::new(0.0, i as f32 * 100.0)))
///     .collect();
///
/// let statuses: Vec<EdgeStatus> = derive_edges(&nodes, &progress, &positions)
///     .iter()
///     .map(|edge| edge.status())
///     .collect();
/// assert_eq!(statuses, [EdgeStatus::Active, EdgeStatus::Inactive]);
/// ```
pub fn derive_edges(
    nodes: &[RoadmapNode],
    progress: &ProgressMap,
    positions: &PositionMap,
) -> Vec<PathEdge> {
    let placed: Vec<(Id, Point)> = nodes
        .iter()
        .filter_map(|node| positions.get(&node.id()).map(|point| (node.id(), *point)))
        .collect();

    placed
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, from_point) = pair[0];
            let (to, to_point) = pair[1];
            PathEdge {
                index,
                from,
                to,
                from_point,
                to_point,
                status: EdgeStatus::between(progress.status(from), progress.status(to)),
            }
        })
        .collect()
}

/// Shape of a connective path in layout space.
#[derive(Debug, Clone, PartialEq)]
pub enum PathGeometry {
    Line {
        start: Point,
        end: Point,
    },
    Quadratic {
        start: Point,
        control: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Straight segments through every point in order
    Polyline(Vec<Point>),
}

impl PathGeometry {
    pub fn start(&self) -> Point {
        match self {
            Self::Line { start, .. } | Self::Quadratic { start, .. } | Self::Cubic { start, .. } => {
                *start
            }
            Self::Polyline(points) => points.first().copied().unwrap_or_default(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Line { end, .. } | Self::Quadratic { end, .. } | Self::Cubic { end, .. } => *end,
            Self::Polyline(points) => points.last().copied().unwrap_or_default(),
        }
    }

    /// Render the SVG path `d` attribute.
    pub fn to_svg_data(&self) -> String {
        match self {
            Self::Line { start, end } => {
                format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
            }
            Self::Quadratic {
                start,
                control,
                end,
            } => format!(
                "M {} {} Q {} {} {} {}",
                start.x(),
                start.y(),
                control.x(),
                control.y(),
                end.x(),
                end.y()
            ),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => format!(
                "M {} {} C {} {}, {} {}, {} {}",
                start.x(),
                start.y(),
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                end.x(),
                end.y()
            ),
            Self::Polyline(points) => points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let command = if i == 0 { "M" } else { "L" };
                    format!("{command} {} {}", p.x(), p.y())
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Sample the path at `t` in `[0, 1]`; values outside are clamped.
    ///
    /// Curves are sampled by parameter, polylines by arc length.
    pub fn point_at(&self, t: f32) -> Point {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Line { start, end } => start.lerp(*end, t),
            Self::Quadratic {
                start,
                control,
                end,
            } => {
                let a = start.lerp(*control, t);
                let b = control.lerp(*end, t);
                a.lerp(b, t)
            }
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let a = start.lerp(*control1, t);
                let b = control1.lerp(*control2, t);
                let c = control2.lerp(*end, t);
                a.lerp(b, t).lerp(b.lerp(c, t), t)
            }
            Self::Polyline(points) => polyline_point_at(points, t),
        }
    }

    /// Length of the path; curves are approximated by sampling.
    pub fn length(&self) -> f32 {
        match self {
            Self::Line { start, end } => start.distance(*end),
            Self::Polyline(points) => points.windows(2).map(|w| w[0].distance(w[1])).sum(),
            Self::Quadratic { .. } | Self::Cubic { .. } => {
                let mut previous = self.start();
                let mut total = 0.0;
                for i in 1..=LENGTH_SAMPLES {
                    let point = self.point_at(i as f32 / LENGTH_SAMPLES as f32);
                    total += previous.distance(point);
                    previous = point;
                }
                total
            }
        }
    }
}

fn polyline_point_at(points: &[Point], t: f32) -> Point {
    let Some(first) = points.first().copied() else {
        return Point::default();
    };

    let total: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total == 0.0 {
        return first;
    }

    let mut remaining = total * t;
    for segment in points.windows(2) {
        let length = segment[0].distance(segment[1]);
        if remaining <= length {
            let local = if length > 0.0 { remaining / length } else { 0.0 };
            return segment[0].lerp(segment[1], local);
        }
        remaining -= length;
    }
    points.last().copied().unwrap_or(first)
}

/// A dot travelling along an active path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowDot {
    radius: f32,
    period_ms: u32,
    color: Color,
}

impl FlowDot {
    pub fn new(color: Color) -> Self {
        Self {
            radius: 4.0,
            period_ms: 2000,
            color,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Time for one trip along the path
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Fraction of the path covered after `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.period_ms == 0 || !elapsed_ms.is_finite() {
            return 0.0;
        }
        let period = self.period_ms as f32;
        elapsed_ms.rem_euclid(period) / period
    }
}

/// A path geometry with the stroke resolved for its edge status.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemedPath {
    geometry: PathGeometry,
    stroke: StrokeDefinition,
    status: EdgeStatus,
    flow: Option<FlowDot>,
    glow: Option<Color>,
}

impl ThemedPath {
    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn status(&self) -> EdgeStatus {
        self.status
    }

    pub fn flow(&self) -> Option<&FlowDot> {
        self.flow.as_ref()
    }

    /// Glow color, when the theme draws glowing paths.
    pub fn glow(&self) -> Option<Color> {
        self.glow
    }
}

/// Builds themed paths for one theme.
#[derive(Debug, Clone)]
pub struct PathGeometryBuilder {
    family: LayoutFamily,
    colors: ThemeColors,
    style: PathStyle,
    flow: bool,
}

impl PathGeometryBuilder {
    pub fn new(theme: &ThemeConfig) -> Self {
        Self {
            family: theme.layout(),
            colors: *theme.colors(),
            style: *theme.path_style(),
            flow: theme.animation().path_draw().kind() == PathDrawKind::Flow,
        }
    }

    /// Build the path between two points.
    ///
    /// A curve between vertically aligned points bows to the right; use
    /// [`Self::build_edge`] to alternate by row.
    pub fn build(&self, from: Point, to: Point, status: EdgeStatus) -> ThemedPath {
        self.build_with_parity(from, to, status, 0)
    }

    /// Build the path of a derived edge.
    pub fn build_edge(&self, edge: &PathEdge) -> ThemedPath {
        self.build_with_parity(edge.from_point, edge.to_point, edge.status, edge.index)
    }

    fn build_with_parity(
        &self,
        from: Point,
        to: Point,
        status: EdgeStatus,
        row: usize,
    ) -> ThemedPath {
        let geometry = self.geometry(from, to, row);
        let stroke = self.stroke(status);
        let flow = (status == EdgeStatus::Active && self.flow)
            .then(|| FlowDot::new(self.colors.path_active));
        let glow = self.style.glow().then(|| stroke.color().opaque());

        trace!(status = status.name(), row; "Built path");

        ThemedPath {
            geometry,
            stroke,
            status,
            flow,
            glow,
        }
    }

    fn geometry(&self, from: Point, to: Point, row: usize) -> PathGeometry {
        match self.family {
            LayoutFamily::Vertical => PathGeometry::Line {
                start: from,
                end: to,
            },
            LayoutFamily::Tree | LayoutFamily::Orbital => {
                let intensity = if self.family == LayoutFamily::Tree {
                    TREE_CURVE
                } else {
                    ORBITAL_CURVE
                };
                let dx = to.x() - from.x();
                let side = if dx > 0.0 {
                    1.0
                } else if dx < 0.0 {
                    -1.0
                } else if row % 2 == 0 {
                    1.0
                } else {
                    -1.0
                };
                let mid = from.midpoint(to);
                PathGeometry::Quadratic {
                    start: from,
                    control: mid.with_x(mid.x() + side * intensity),
                    end: to,
                }
            }
            LayoutFamily::Wave => PathGeometry::Cubic {
                start: from,
                control1: from.lerp(to, 0.3),
                control2: from.lerp(to, 0.7),
                end: to,
            },
            LayoutFamily::Dungeon => {
                let mid_x = from.midpoint(to).x();
                PathGeometry::Polyline(vec![
                    from,
                    Point::new(mid_x, from.y()),
                    Point::new(mid_x, to.y()),
                    to,
                ])
            }
        }
    }

    fn stroke(&self, status: EdgeStatus) -> StrokeDefinition {
        let width = self.style.width();
        match status {
            EdgeStatus::Completed => StrokeDefinition::new(self.colors.path_completed, width),
            EdgeStatus::Active => {
                let mut stroke = StrokeDefinition::new(self.colors.path_active, width);
                stroke.set_style(self.style.dash_when_active());
                stroke
            }
            EdgeStatus::Inactive => StrokeDefinition::new(self.colors.path_inactive, width)
                .with_opacity(INACTIVE_OPACITY),
        }
    }
}

/// Build every themed path of a roadmap.
pub fn build_paths(theme: &ThemeConfig, edges: &[PathEdge]) -> Vec<ThemedPath> {
    let builder = PathGeometryBuilder::new(theme);
    edges.iter().map(|edge| builder.build_edge(edge)).collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trailmap_core::theme::presets;

    use super::*;

    fn positions(nodes: &[RoadmapNode]) -> PositionMap {
        nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id(), Point::new(0.0, i as f32 * 100.0)))
            .collect()
    }

    fn abc() -> Vec<RoadmapNode> {
        vec![
            RoadmapNode::new("a", "A", 0),
            RoadmapNode::new("b", "B", 1),
            RoadmapNode::new("c", "C", 2),
        ]
    }

    #[test]
    fn test_edge_status_rules() {
        use ProgressStatus::*;
        assert_eq!(EdgeStatus::between(Completed, Completed), EdgeStatus::Completed);
        assert_eq!(EdgeStatus::between(Completed, Active), EdgeStatus::Active);
        assert_eq!(EdgeStatus::between(Completed, Locked), EdgeStatus::Inactive);
        assert_eq!(EdgeStatus::between(Active, Completed), EdgeStatus::Inactive);
        assert_eq!(EdgeStatus::between(Active, Active), EdgeStatus::Inactive);
        assert_eq!(EdgeStatus::between(Locked, Locked), EdgeStatus::Inactive);
    }

    #[test]
    fn test_derive_edges_pairs_consecutive_nodes() {
        let nodes = abc();
        let progress: ProgressMap = [("a", ProgressStatus::Completed), ("b", ProgressStatus::Active)]
            .into_iter()
            .collect();
        let edges = derive_edges(&nodes, &progress, &positions(&nodes));

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].from(), Id::new("a"));
        assert_eq!(edges[0].to(), Id::new("b"));
        assert_eq!(edges[0].status(), EdgeStatus::Active);
        assert_eq!(edges[1].status(), EdgeStatus::Inactive);
        assert_eq!(edges[1].index(), 1);
    }

    #[test]
    fn test_derive_edges_skips_unpositioned_nodes() {
        let nodes = abc();
        let mut positions = positions(&nodes);
        positions.shift_remove(&Id::new("b"));

        let edges = derive_edges(&nodes, &ProgressMap::new(), &positions);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from(), Id::new("a"));
        assert_eq!(edges[0].to(), Id::new("c"));
    }

    #[test]
    fn test_orphan_progress_is_ignored() {
        let nodes = abc();
        let progress: ProgressMap = [("zz", ProgressStatus::Completed)].into_iter().collect();
        let edges = derive_edges(&nodes, &progress, &positions(&nodes));
        assert!(edges.iter().all(|e| e.status() == EdgeStatus::Inactive));
    }

    #[test]
    fn test_single_node_has_no_edges() {
        let nodes = vec![RoadmapNode::new("solo", "Solo", 0)];
        assert!(derive_edges(&nodes, &ProgressMap::new(), &positions(&nodes)).is_empty());
    }

    #[test]
    fn test_vertical_is_straight_line() {
        let builder = PathGeometryBuilder::new(&presets::cyber_neon());
        let path = builder.build(Point::new(0.0, 0.0), Point::new(0.0, 100.0), EdgeStatus::Completed);
        assert_eq!(path.geometry().to_svg_data(), "M 0 0 L 0 100");
    }

    #[test]
    fn test_tree_curve_bows_toward_dx() {
        let builder = PathGeometryBuilder::new(&presets::forest_quest());
        let path = builder.build(Point::new(0.0, 0.0), Point::new(100.0, 100.0), EdgeStatus::Inactive);
        let PathGeometry::Quadratic { control, .. } = path.geometry() else {
            panic!("expected quadratic curve, got {:?}", path.geometry());
        };
        assert_approx_eq!(f32, control.x(), 50.0 + TREE_CURVE);
        assert_approx_eq!(f32, control.y(), 50.0);

        let path = builder.build(Point::new(0.0, 0.0), Point::new(-100.0, 100.0), EdgeStatus::Inactive);
        let PathGeometry::Quadratic { control, .. } = path.geometry() else {
            panic!("expected quadratic curve");
        };
        assert_approx_eq!(f32, control.x(), -50.0 - TREE_CURVE);
    }

    #[test]
    fn test_orbital_zero_dx_alternates_on_parity() {
        let builder = PathGeometryBuilder::new(&presets::space_odyssey());
        let from = Point::new(0.0, 0.0);
        let to = Point::new(0.0, 100.0);

        let even = builder.build_with_parity(from, to, EdgeStatus::Inactive, 0);
        let odd = builder.build_with_parity(from, to, EdgeStatus::Inactive, 1);
        let control_x = |path: &ThemedPath| match path.geometry() {
            PathGeometry::Quadratic { control, .. } => control.x(),
            other => panic!("expected quadratic curve, got {other:?}"),
        };
        assert_approx_eq!(f32, control_x(&even), ORBITAL_CURVE);
        assert_approx_eq!(f32, control_x(&odd), -ORBITAL_CURVE);
    }

    #[test]
    fn test_wave_cubic_controls() {
        let builder = PathGeometryBuilder::new(&presets::ocean_depths());
        let path = builder.build(Point::new(0.0, 0.0), Point::new(100.0, 200.0), EdgeStatus::Active);
        let PathGeometry::Cubic {
            control1, control2, ..
        } = path.geometry()
        else {
            panic!("expected cubic curve, got {:?}", path.geometry());
        };
        assert_approx_eq!(f32, control1.x(), 30.0, epsilon = 1e-4);
        assert_approx_eq!(f32, control1.y(), 60.0, epsilon = 1e-4);
        assert_approx_eq!(f32, control2.x(), 70.0, epsilon = 1e-4);
        assert_approx_eq!(f32, control2.y(), 140.0, epsilon = 1e-4);
        assert!(path.geometry().to_svg_data().starts_with("M 0 0 C "));
    }

    #[test]
    fn test_dungeon_right_angles() {
        let builder = PathGeometryBuilder::new(&presets::dragons_lair());
        let path = builder.build(Point::new(-60.0, 0.0), Point::new(60.0, 100.0), EdgeStatus::Active);
        assert_eq!(
            path.geometry().to_svg_data(),
            "M -60 0 L 0 0 L 0 100 L 60 100"
        );
    }

    #[test]
    fn test_status_styles() {
        let theme = presets::cyber_neon();
        let builder = PathGeometryBuilder::new(&theme);
        let (from, to) = (Point::new(0.0, 0.0), Point::new(0.0, 10.0));

        let completed = builder.build(from, to, EdgeStatus::Completed);
        assert_eq!(completed.stroke().color(), theme.colors().path_completed);
        assert!(!completed.stroke().style().is_dashed());

        let inactive = builder.build(from, to, EdgeStatus::Inactive);
        assert_approx_eq!(f32, inactive.stroke().color().alpha(), INACTIVE_OPACITY, epsilon = 0.001);
        assert!(inactive.flow().is_none());

        let active = builder.build(from, to, EdgeStatus::Active);
        assert_eq!(active.stroke().style(), theme.path_style().dash_when_active());
        assert_eq!(
            active.flow().is_some(),
            theme.animation().path_draw().kind() == PathDrawKind::Flow
        );
    }

    #[test]
    fn test_flow_dot_only_on_active_paths() {
        for theme in presets::builtin() {
            let builder = PathGeometryBuilder::new(&theme);
            let (from, to) = (Point::new(0.0, 0.0), Point::new(0.0, 10.0));
            assert!(builder.build(from, to, EdgeStatus::Completed).flow().is_none());
            assert!(builder.build(from, to, EdgeStatus::Inactive).flow().is_none());
        }
    }

    #[test]
    fn test_point_at_endpoints() {
        let builder = PathGeometryBuilder::new(&presets::forest_quest());
        let (from, to) = (Point::new(-40.0, 0.0), Point::new(80.0, 150.0));
        let path = builder.build(from, to, EdgeStatus::Completed);
        assert_eq!(path.geometry().point_at(0.0), from);
        assert_eq!(path.geometry().point_at(1.0), to);
        assert_eq!(path.geometry().point_at(7.0), to);
    }

    #[test]
    fn test_polyline_sampled_by_length() {
        let geometry = PathGeometry::Polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        assert_approx_eq!(f32, geometry.length(), 200.0);
        assert_eq!(geometry.point_at(0.5), Point::new(100.0, 0.0));
        assert_eq!(geometry.point_at(0.75), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_curve_length_exceeds_chord() {
        let geometry = PathGeometry::Quadratic {
            start: Point::new(0.0, 0.0),
            control: Point::new(100.0, 50.0),
            end: Point::new(0.0, 100.0),
        };
        assert!(geometry.length() > 100.0);
    }

    #[test]
    fn test_flow_dot_progress_wraps() {
        let dot = FlowDot::new(Color::default());
        assert_approx_eq!(f32, dot.progress(0.0), 0.0);
        assert_approx_eq!(f32, dot.progress(500.0), 0.25);
        assert_approx_eq!(f32, dot.progress(2500.0), 0.25);
        assert_approx_eq!(f32, dot.progress(f32::NAN), 0.0);
    }
}

//! Minimum distance enforcement between laid out nodes.
//!
//! The resolver runs in two phases:
//!
//! 1. **Relaxation**: a bounded number of passes pushing every pair that is
//!    closer than the minimum distance apart along the line joining them.
//! 2. **Ordering sweep**: a single pass in sequence order that restores
//!    strictly increasing y and, where relaxation ran out of passes or was
//!    blocked by the horizontal limit, restores the minimum distance by moving
//!    the later node down.
//!
//! The sweep only ever moves a node away from every node above it, so its
//! output needs no further correction and resolving twice gives the same
//! result as resolving once.

use log::{debug, trace};

use trailmap_core::geometry::Point;

use super::PositionMap;

/// Upper bound on relaxation passes.
pub const MAX_RELAXATION_PASSES: usize = 4;

/// Smallest vertical gap between consecutive nodes after the sweep.
pub const MIN_ROW_GAP: f32 = 1.0;

/// Pairs within this much of the minimum distance count as resolved.
const TOLERANCE: f32 = 0.01;

/// Pushes nodes apart until no two are closer than a minimum distance.
///
/// # Examples
///
/// ```
/// use trailmap::geometry::Point;
/// use trailmap::identifier::Id;
/// use trailmap::layout::{OverlapResolver, PositionMap};
///
/// let mut positions = PositionMap::new();
/// positions.insert(Id::new("a"), Point::new(0.0, 0.0));
/// positions.insert(Id::new("b"), Point::new(0.0, 0.0));
///
/// let resolved = OverlapResolver::new(100.0).resolve(&positions);
/// let a = resolved[&Id::new("a")];
/// let b = resolved[&Id::new("b")];
/// assert!(a.distance(b) >= 99.99);
/// assert!(a.y() < b.y());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OverlapResolver {
    min_distance: f32,
    horizontal_limit: Option<f32>,
    max_passes: usize,
}

impl OverlapResolver {
    pub fn new(min_distance: f32) -> Self {
        let min_distance = if min_distance.is_finite() {
            min_distance.max(0.0)
        } else {
            0.0
        };
        Self {
            min_distance,
            horizontal_limit: None,
            max_passes: MAX_RELAXATION_PASSES,
        }
    }

    /// Keep every x within `[-limit, limit]`.
    pub fn with_horizontal_limit(mut self, limit: f32) -> Self {
        self.horizontal_limit = Some(limit.max(0.0));
        self
    }

    /// Set the relaxation budget, capped at [`MAX_RELAXATION_PASSES`].
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes.min(MAX_RELAXATION_PASSES);
        self
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Resolve overlaps in `positions`, keeping ids and their order.
    pub fn resolve(&self, positions: &PositionMap) -> PositionMap {
        let mut points: Vec<Point> = positions.values().copied().collect();
        self.clamp(&mut points);
        if points.len() < 2 || self.min_distance == 0.0 {
            return positions.keys().copied().zip(points).collect();
        }

        let mut passes = 0;
        while passes < self.max_passes {
            passes += 1;
            let moved = self.relax(&mut points);
            self.clamp(&mut points);
            if !moved {
                break;
            }
        }
        self.clamp(&mut points);

        let raised = self.sweep(&mut points);
        debug!(nodes = points.len(), passes, raised; "Overlaps resolved");

        positions.keys().copied().zip(points).collect()
    }

    fn too_close(&self, a: Point, b: Point) -> bool {
        a.distance(b) + TOLERANCE < self.min_distance
    }

    /// One relaxation pass over every pair. Returns whether anything moved.
    fn relax(&self, points: &mut [Point]) -> bool {
        let mut moved = false;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (a, b) = (points[i], points[j]);
                if !self.too_close(a, b) {
                    continue;
                }

                let distance = a.distance(b);
                let half = (self.min_distance - distance) / 2.0;
                let push = if distance <= f32::EPSILON {
                    Point::new(0.0, half)
                } else {
                    b.sub_point(a).scale(half / distance)
                };

                points[i] = a.sub_point(push);
                points[j] = b.add_point(push);
                moved = true;
            }
        }
        moved
    }

    fn clamp(&self, points: &mut [Point]) {
        let Some(limit) = self.horizontal_limit else {
            return;
        };
        for point in points.iter_mut() {
            *point = point.with_x(point.x().clamp(-limit, limit));
        }
    }

    /// Restores sequence order and the minimum distance by moving nodes down.
    /// Returns the number of nodes that moved.
    fn sweep(&self, points: &mut [Point]) -> usize {
        let mut raised = 0;
        for j in 1..points.len() {
            let original = points[j].y();
            let mut y = original.max(points[j - 1].y() + MIN_ROW_GAP);

            for i in 0..j {
                let earlier = points[i];
                if !self.too_close(earlier, points[j].with_y(y)) {
                    continue;
                }
                let dx = points[j].x() - earlier.x();
                let clearance = (self.min_distance.powi(2) - dx.powi(2)).max(0.0).sqrt();
                y = y.max(earlier.y() + clearance);
            }

            if y != original {
                trace!(index = j, from = original, to = y; "Node moved down");
                raised += 1;
            }
            points[j] = points[j].with_y(y);
        }
        raised
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trailmap_core::identifier::Id;

    use super::*;

    fn positions(points: &[(f32, f32)]) -> PositionMap {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (Id::from_index(i), Point::new(x, y)))
            .collect()
    }

    fn ys(map: &PositionMap) -> Vec<f32> {
        map.values().map(|p| p.y()).collect()
    }

    #[test]
    fn test_spread_nodes_are_untouched() {
        let input = positions(&[(0.0, 0.0), (0.0, 200.0), (50.0, 400.0)]);
        let output = OverlapResolver::new(100.0).resolve(&input);
        assert_eq!(input, output);
    }

    #[test]
    fn test_coincident_nodes_separate_vertically() {
        let input = positions(&[(10.0, 50.0), (10.0, 50.0)]);
        let output = OverlapResolver::new(100.0).resolve(&input);
        let points: Vec<Point> = output.values().copied().collect();

        assert_approx_eq!(f32, points[0].x(), 10.0);
        assert_approx_eq!(f32, points[1].x(), 10.0);
        assert!(points[0].y() < points[1].y());
        assert!(points[0].distance(points[1]) + TOLERANCE >= 100.0);
    }

    #[test]
    fn test_horizontal_limit_forces_vertical_separation() {
        // Side by side on a row that is too narrow for the distance.
        let input = positions(&[(-10.0, 0.0), (10.0, 1.0)]);
        let output = OverlapResolver::new(100.0)
            .with_horizontal_limit(10.0)
            .resolve(&input);
        let points: Vec<Point> = output.values().copied().collect();

        assert!(points.iter().all(|p| p.x().abs() <= 10.0));
        assert!(points[0].distance(points[1]) + TOLERANCE >= 100.0);
    }

    #[test]
    fn test_order_is_restored() {
        let input = positions(&[(0.0, 100.0), (300.0, 50.0), (-300.0, 0.0)]);
        let output = OverlapResolver::new(10.0).resolve(&input);
        let ys = ys(&output);
        assert!(ys.windows(2).all(|w| w[0] < w[1]), "{ys:?}");
    }

    #[test]
    fn test_zero_distance_is_noop() {
        let input = positions(&[(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(OverlapResolver::new(0.0).resolve(&input), input);
    }

    #[test]
    fn test_lone_node_is_clamped() {
        let input = positions(&[(250.0, 40.0)]);
        let output = OverlapResolver::new(100.0)
            .with_horizontal_limit(120.0)
            .resolve(&input);
        assert_eq!(
            output.values().copied().collect::<Vec<_>>(),
            vec![Point::new(120.0, 40.0)]
        );

        let output = OverlapResolver::new(0.0)
            .with_horizontal_limit(120.0)
            .resolve(&positions(&[(-300.0, 0.0), (0.0, 10.0)]));
        let first = output.values().next().expect("two nodes");
        assert_approx_eq!(f32, first.x(), -120.0);
    }

    #[test]
    fn test_zero_passes_still_sweeps() {
        let input = positions(&[(0.0, 0.0), (0.0, 10.0)]);
        let output = OverlapResolver::new(80.0).with_max_passes(0).resolve(&input);
        assert_eq!(ys(&output), vec![0.0, 80.0]);
    }
}

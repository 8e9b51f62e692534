//! Single column layout, optionally zig-zagging around the centerline.

use trailmap_core::{geometry::Point, model::RoadmapNode};

use super::{FamilyEngine, LayoutFrame};

/// Vertical column engine.
///
/// With a horizontal spacing of zero every node sits on the centerline.
/// Otherwise nodes alternate left and right by half the horizontal spacing.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }
}

impl FamilyEngine for Engine {
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point> {
        let horizontal = frame.spacing().horizontal();
        let swing = if horizontal > 0.0 {
            (horizontal / 2.0).min(frame.max_offset())
        } else {
            0.0
        };

        (0..nodes.len())
            .map(|i| {
                let x = if i % 2 == 0 { -swing } else { swing };
                Point::new(x, frame.row_y(i))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trailmap_core::theme::Spacing;

    use super::super::tests::nodes;
    use super::*;

    #[test]
    fn test_zero_horizontal_spacing_stays_centered() {
        let frame = LayoutFrame::new(Spacing::new(100.0, 0.0, 50.0), 300.0, 20.0);
        let points = Engine::new().place(&nodes(4), &frame);
        for (i, point) in points.iter().enumerate() {
            assert_approx_eq!(f32, point.x(), 0.0);
            assert_approx_eq!(f32, point.y(), 20.0 + 100.0 * i as f32);
        }
    }

    #[test]
    fn test_alternates_sides() {
        let frame = LayoutFrame::new(Spacing::new(100.0, 120.0, 50.0), 300.0, 20.0);
        let points = Engine::new().place(&nodes(4), &frame);
        let xs: Vec<f32> = points.iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![-60.0, 60.0, -60.0, 60.0]);
    }

    #[test]
    fn test_swing_limited_by_max_offset() {
        let frame = LayoutFrame::new(Spacing::new(100.0, 400.0, 50.0), 30.0, 20.0);
        let points = Engine::new().place(&nodes(3), &frame);
        assert!(points.iter().all(|p| p.x().abs() == 30.0));
    }
}

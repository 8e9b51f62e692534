//! Grid-snapped corridor layout.

use trailmap_core::{geometry::Point, model::RoadmapNode};

use super::{FamilyEngine, LayoutFrame};

#[derive(Debug)]
pub struct Engine {
    corridor_step: f32,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            corridor_step: 50.0,
        }
    }

    /// Set the extra offset added per `(i mod 3)` corridor variation.
    pub fn set_corridor_step(&mut self, step: f32) -> &mut Self {
        self.corridor_step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        self
    }
}

impl FamilyEngine for Engine {
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point> {
        let h = frame.spacing().horizontal().max(0.0);
        let cell = (h / 4.0).max(1.0);
        let max_columns = (frame.max_offset() / cell).floor();

        (0..nodes.len())
            .map(|i| {
                let direction = if i % 2 == 0 { -1.0 } else { 1.0 };
                let offset = h / 2.0 + (i % 3) as f32 * self.corridor_step;
                let columns = (offset / cell).round().min(max_columns);
                Point::new(direction * columns * cell, frame.row_y(i))
            })
            .collect()
    }
}

//! Outward spiral layout.

use std::f32::consts::PI;

use trailmap_core::{geometry::Point, model::RoadmapNode};

use super::{FamilyEngine, LayoutFrame};

/// Smallest angle advance between consecutive nodes.
pub const MIN_ANGULAR_STEP: f32 = PI / 6.0;

/// Share of a row the orbital swing may add to y.
const SWING_SHARE: f32 = 0.35;

#[derive(Debug)]
pub struct Engine {
    angle_step: f32,
}

impl Engine {
    pub fn new() -> Self {
        Self { angle_step: 0.9 }
    }

    /// Set the angle advance per node. Values below [`MIN_ANGULAR_STEP`] are
    /// raised to it when placing.
    pub fn set_angle_step(&mut self, step: f32) -> &mut Self {
        self.angle_step = if step.is_finite() { step } else { 0.0 };
        self
    }

    fn step(&self) -> f32 {
        self.angle_step.max(MIN_ANGULAR_STEP)
    }
}

impl FamilyEngine for Engine {
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point> {
        let spacing = frame.spacing();
        let h = spacing.horizontal();
        let start = (spacing.min_distance() / 2.0).max(1.0);
        let growth = if h > 0.0 {
            0.15 * h
        } else {
            0.25 * spacing.min_distance().max(0.0)
        };
        let swing_cap = SWING_SHARE * frame.row_step();
        let step = self.step();

        (0..nodes.len())
            .map(|i| {
                let angle = i as f32 * step;
                let radius = (start + i as f32 * growth).min(frame.max_offset());
                let orbit = Point::from_polar(radius, angle);
                let swing = Point::from_polar(radius.min(swing_cap), angle);
                Point::new(orbit.x(), frame.row_y(i) + swing.y())
            })
            .collect()
    }
}

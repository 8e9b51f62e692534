//! Sine wave layout.

use trailmap_core::{geometry::Point, model::RoadmapNode};

use super::{FamilyEngine, LayoutFrame};

/// Wave engine: `x = min(h, max_offset) * sin(frequency * i)`.
#[derive(Debug)]
pub struct Engine {
    frequency: f32,
}

impl Engine {
    pub fn new() -> Self {
        Self { frequency: 0.5 }
    }

    /// Set the phase advance per node, in radians. Non-finite values reset it
    /// to zero, which flattens the wave onto the centerline.
    pub fn set_frequency(&mut self, frequency: f32) -> &mut Self {
        self.frequency = if frequency.is_finite() { frequency } else { 0.0 };
        self
    }
}

impl FamilyEngine for Engine {
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point> {
        let amplitude = frame.spacing().horizontal().max(0.0).min(frame.max_offset());

        (0..nodes.len())
            .map(|i| {
                let x = amplitude * (self.frequency * i as f32).sin();
                Point::new(x, frame.row_y(i))
            })
            .collect()
    }
}

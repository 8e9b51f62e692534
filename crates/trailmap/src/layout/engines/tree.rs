//! Forest vine layout.
//!
//! Nodes hang off a slow sine "vine" with branches alternating sides. Each
//! branch is tilted by a small random angle drawn from a seeded generator, so
//! identical inputs always grow the same tree.

use rand::{Rng, SeedableRng, rngs::StdRng};
use trailmap_core::{geometry::Point, model::RoadmapNode};

use super::{FamilyEngine, LayoutFrame};

const VINE_AMPLITUDE: f32 = 0.8;
const VINE_FREQUENCY: f32 = 0.6;
const BRANCH_LENGTH: f32 = 0.6;

#[derive(Debug)]
pub struct Engine {
    seed: u64,
    jitter: f32,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            seed: 0,
            jitter: 0.2,
        }
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Set the maximum branch tilt in radians; the sign is ignored.
    pub fn set_jitter(&mut self, jitter: f32) -> &mut Self {
        self.jitter = if jitter.is_finite() { jitter.abs() } else { 0.0 };
        self
    }
}

impl FamilyEngine for Engine {
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point> {
        let h = frame.spacing().horizontal().max(0.0);
        let max_offset = frame.max_offset();
        let row_step = frame.row_step();

        // Widest possible swing is vine plus branch; shrink both to fit.
        let reach = (VINE_AMPLITUDE + BRANCH_LENGTH) * h;
        let scale = if reach > max_offset && reach > 0.0 {
            max_offset / reach
        } else {
            1.0
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..nodes.len())
            .map(|i| {
                let angle = if self.jitter > 0.0 {
                    rng.random_range(-self.jitter..=self.jitter)
                } else {
                    0.0
                };
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };

                let vine = VINE_AMPLITUDE * h * (VINE_FREQUENCY * i as f32).sin();
                let branch = side * BRANCH_LENGTH * h;
                let x = (vine + branch * angle.cos()) * scale;

                let limit = row_step / 4.0;
                let dy = (BRANCH_LENGTH * h * angle.sin()).clamp(-limit, limit);

                Point::new(x, frame.row_y(i) + dy)
            })
            .collect()
    }
}

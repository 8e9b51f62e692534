//! Layout family engines
//!
//! Each [`LayoutFamily`] has its own placement strategy behind the
//! [`FamilyEngine`] trait. The [`EngineBuilder`] creates engines on first use,
//! configures them from its options and caches them per family.

mod dungeon;
mod orbital;
mod tree;
mod vertical;
mod wave;

use std::collections::HashMap;

use trailmap_core::{
    geometry::Point,
    model::RoadmapNode,
    theme::{LayoutFamily, Spacing},
};

use super::MIN_ROW_STEP;

pub use orbital::MIN_ANGULAR_STEP;

/// Parameters shared by every family for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutFrame {
    spacing: Spacing,
    max_offset: f32,
    safety_margin: f32,
}

impl LayoutFrame {
    pub fn new(spacing: Spacing, max_offset: f32, safety_margin: f32) -> Self {
        Self {
            spacing,
            max_offset: max_offset.max(0.0),
            safety_margin,
        }
    }

    /// Spacing of the active breakpoint
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Largest |x| any node may take
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Distance between consecutive rows
    pub fn row_step(&self) -> f32 {
        self.spacing.vertical().max(MIN_ROW_STEP)
    }

    /// Base y of the row at `index`
    pub fn row_y(&self, index: usize) -> f32 {
        self.safety_margin + index as f32 * self.row_step()
    }
}

/// Placement strategy of one layout family.
pub trait FamilyEngine {
    /// Returns one position per node, in node order.
    ///
    /// Implementations must keep y strictly increasing and |x| within
    /// [`LayoutFrame::max_offset`].
    fn place(&self, nodes: &[RoadmapNode], frame: &LayoutFrame) -> Vec<Point>;
}

/// Builder creating and caching family engines.
pub struct EngineBuilder {
    engines: HashMap<LayoutFamily, Box<dyn FamilyEngine>>,

    tree_seed: u64,
    tree_jitter: f32,
    orbital_angle_step: f32,
    wave_frequency: f32,
    dungeon_corridor_step: f32,
}

impl EngineBuilder {
    /// Create a new engine builder with an empty cache and default options
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            tree_seed: 0x7EE5,
            tree_jitter: 0.2,
            orbital_angle_step: 0.9,
            wave_frequency: 0.5,
            dungeon_corridor_step: 50.0,
        }
    }

    /// Set the seed of the tree branch angle jitter
    pub fn with_tree_seed(mut self, seed: u64) -> Self {
        self.tree_seed = seed;
        self
    }

    /// Set the maximum tree branch angle jitter, in radians
    pub fn with_tree_jitter(mut self, jitter: f32) -> Self {
        self.tree_jitter = jitter;
        self
    }

    /// Set the orbital angle advance per node, in radians
    pub fn with_orbital_angle_step(mut self, step: f32) -> Self {
        self.orbital_angle_step = step;
        self
    }

    /// Set the wave frequency per node
    pub fn with_wave_frequency(mut self, frequency: f32) -> Self {
        self.wave_frequency = frequency;
        self
    }

    /// Set the extra corridor offset of the dungeon layout
    pub fn with_dungeon_corridor_step(mut self, step: f32) -> Self {
        self.dungeon_corridor_step = step;
        self
    }

    /// Get the engine of `family`, creating it on first use
    pub fn family_engine(&mut self, family: LayoutFamily) -> &dyn FamilyEngine {
        let engine = self.engines.entry(family).or_insert_with(|| {
            let engine: Box<dyn FamilyEngine> = match family {
                LayoutFamily::Vertical => Box::new(vertical::Engine::new()),
                LayoutFamily::Tree => {
                    let mut e = tree::Engine::new();
                    e.set_seed(self.tree_seed);
                    e.set_jitter(self.tree_jitter);
                    Box::new(e)
                }
                LayoutFamily::Orbital => {
                    let mut e = orbital::Engine::new();
                    e.set_angle_step(self.orbital_angle_step);
                    Box::new(e)
                }
                LayoutFamily::Wave => {
                    let mut e = wave::Engine::new();
                    e.set_frequency(self.wave_frequency);
                    Box::new(e)
                }
                LayoutFamily::Dungeon => {
                    let mut e = dungeon::Engine::new();
                    e.set_corridor_step(self.dungeon_corridor_step);
                    Box::new(e)
                }
            };
            engine
        });
        &**engine
    }

    /// Number of engines created so far
    pub fn cached_engines(&self) -> usize {
        self.engines.len()
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use trailmap_core::identifier::Id;

    use super::*;

    pub(super) fn nodes(count: usize) -> Vec<RoadmapNode> {
        (0..count)
            .map(|i| RoadmapNode::new(Id::from_index(i), format!("Node {i}"), i as u32))
            .collect()
    }

    #[test]
    fn test_builder_caches_engines() {
        let mut builder = EngineBuilder::new();
        assert_eq!(builder.cached_engines(), 0);

        builder.family_engine(LayoutFamily::Wave);
        builder.family_engine(LayoutFamily::Wave);
        assert_eq!(builder.cached_engines(), 1);

        for family in LayoutFamily::ALL {
            builder.family_engine(family);
        }
        assert_eq!(builder.cached_engines(), 5);
    }

    #[test]
    fn test_frame_row_step_has_floor() {
        let frame = LayoutFrame::new(Spacing::new(0.0, 0.0, 0.0), 100.0, 10.0);
        assert_eq!(frame.row_step(), MIN_ROW_STEP);
        assert_eq!(frame.row_y(0), 10.0);
        assert_eq!(frame.row_y(2), 10.0 + 2.0 * MIN_ROW_STEP);
    }

    #[test]
    fn test_every_engine_returns_one_point_per_node() {
        let mut builder = EngineBuilder::new();
        let frame = LayoutFrame::new(Spacing::new(180.0, 240.0, 120.0), 400.0, 40.0);
        let nodes = nodes(9);

        for family in LayoutFamily::ALL {
            let points = builder.family_engine(family).place(&nodes, &frame);
            assert_eq!(points.len(), nodes.len(), "{family}");
            assert!(
                points.windows(2).all(|w| w[0].y() < w[1].y()),
                "{family}: {points:?}"
            );
            assert!(
                points.iter().all(|p| p.x().abs() <= frame.max_offset() + 1e-3),
                "{family}: {points:?}"
            );
        }
    }
}

//! Trailmap - themed, animated roadmap scenes
//!
//! This library turns an ordered list of learning-roadmap nodes plus learner
//! progress into an animated scene. A theme ("skin") decides how the nodes are
//! arranged, how the connecting paths are drawn and which ambient particles
//! float in the background.
//!
//! The main pieces are:
//!
//! - [`layout`]: five layout families with breakpoint-aware spacing and
//!   overlap prevention
//! - [`path`]: edge derivation from progress and themed path geometry
//! - [`particles`]: the frame-driven ambient particle simulator
//! - [`scene`]: the mounted scene tying everything to a frame loop
//! - [`export`]: SVG snapshots of a scene
//!
//! # Examples
//!
//! ```
//! use trailmap::RoadmapScene;
//! use trailmap::model::{ProgressMap, ProgressStatus, RoadmapNode};
//!
//! let nodes = vec![
//!     RoadmapNode::new("intro", "Introduction", 0),
//!     RoadmapNode::new("basics", "Basics", 1),
//!     RoadmapNode::new("advanced", "Advanced", 2),
//! ];
//! let progress: ProgressMap = [("intro", ProgressStatus::Completed)].into_iter().collect();
//!
//! let mut scene = RoadmapScene::default();
//! scene.mount(nodes, progress, "space-odyssey", 960.0);
//! scene.frame(1.0);
//!
//! let svg = scene.render_svg().expect("mounted scene renders");
//! assert!(svg.contains("Introduction"));
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod particles;
pub mod path;
pub mod scene;

mod error;

pub use trailmap_core::{color, draw, geometry, identifier, model, theme};

pub use error::TrailmapError;
pub use scene::RoadmapScene;

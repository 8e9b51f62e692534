//! Scene composition.
//!
//! [`RoadmapScene`] ties the pieces together for one mounted roadmap: it
//! resolves the theme, keeps the layout snapshot, derives themed paths, owns
//! the particle loop and dispatches node selection.
//!
//! The scene is single-threaded and frame-driven. Container resizes are
//! recorded and applied on the next [`RoadmapScene::frame`], so a burst of
//! resize notifications costs a single layout pass. The position snapshot is
//! replaced wholesale on every layout pass; the particle clock keeps running
//! across layout changes.
//!
//! # Examples
//!
//! ```
//! use trailmap::RoadmapScene;
//! use trailmap::model::{ProgressMap, ProgressStatus, RoadmapNode};
//!
//! let nodes: Vec<RoadmapNode> = ["Basics", "Ownership", "Traits", "Async"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, title)| RoadmapNode::new(title.to_lowercase().as_str(), *title, i as u32))
//!     .collect();
//! let progress: ProgressMap = [
//!     ("basics", ProgressStatus::Completed),
//!     ("ownership", ProgressStatus::Active),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut scene = RoadmapScene::default();
//! scene.mount(nodes, progress, "forest-quest", 1024.0);
//! scene.resize(800.0);
//! scene.frame(1.0);
//!
//! assert_eq!(scene.stats().layout_passes(), 2);
//! assert_eq!(scene.paths().len(), 3);
//! assert_eq!(scene.active_loops(), 1);
//! ```

mod resize;
mod scheduler;

use std::{cell::RefCell, fmt, path::Path, rc::Rc};

use log::{debug, info, trace};

use trailmap_core::{
    color::Color,
    geometry::{Point, Size},
    identifier::Id,
    model::{ProgressMap, ProgressStatus, RoadmapNode},
    theme::{EntryAnimationKind, NODE_SIZE, NodeShape, ThemeCatalog, ThemeConfig},
};

use crate::{
    TrailmapError,
    config::AppConfig,
    export::{self, svg::Svg},
    layout::{Layout, LayoutEngine},
    particles::{CanvasProvider, ParticleCanvas, ParticleSimulator, SpriteBufferProvider},
    path::{self, PathEdge, ThemedPath},
};

pub use resize::ResizeCoalescer;
pub use scheduler::{FRAME_MS, Frame, FrameCallback, FrameScheduler, LoopHandle};

type SelectCallback = Box<dyn FnMut(Id)>;

/// Counters describing the work a scene has done.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneStats {
    layout_passes: u64,
    last_layout_width: Option<f32>,
    frames: u64,
}

impl SceneStats {
    /// Number of layout computations since the scene was created
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Container width of the most recent layout pass
    pub fn last_layout_width(&self) -> Option<f32> {
        self.last_layout_width
    }

    /// Frames run while mounted
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Render data of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    id: Id,
    title: String,
    level: u32,
    position: Point,
    status: ProgressStatus,
    completed_lessons: u32,
    lesson_count: u32,
    color: Color,
    shape: NodeShape,
    entry: EntryAnimationKind,
    entry_delay_ms: u32,
    entry_duration_ms: u32,
    hover_scale: f32,
    hover_duration_ms: u32,
    selected: bool,
}

impl NodeView {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Center of the node in layout space
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }

    pub fn lesson_count(&self) -> u32 {
        self.lesson_count
    }

    /// Fill color for the node status
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn entry(&self) -> EntryAnimationKind {
        self.entry
    }

    /// Delay before the entry animation starts: `level * delay_ms`
    pub fn entry_delay_ms(&self) -> u32 {
        self.entry_delay_ms
    }

    pub fn entry_duration_ms(&self) -> u32 {
        self.entry_duration_ms
    }

    pub fn hover_scale(&self) -> f32 {
        self.hover_scale
    }

    /// Duration of the hover scale transition
    pub fn hover_duration_ms(&self) -> u32 {
        self.hover_duration_ms
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// State that exists only while a roadmap is mounted.
struct Mounted {
    nodes: Vec<RoadmapNode>,
    progress: ProgressMap,
    theme: ThemeConfig,
    width: f32,
    layout: Layout,
    edges: Vec<PathEdge>,
    paths: Vec<ThemedPath>,
    particles: Rc<RefCell<ParticleSimulator>>,
    particle_loop: LoopHandle,
    selected: Option<Id>,
}

/// A mounted, animated roadmap.
pub struct RoadmapScene {
    config: AppConfig,
    catalog: ThemeCatalog,
    layout_engine: LayoutEngine,
    canvas_provider: Box<dyn CanvasProvider>,
    scheduler: FrameScheduler,
    resizes: ResizeCoalescer,
    on_select: Option<SelectCallback>,
    mounted: Option<Mounted>,
    stats: SceneStats,
}

impl RoadmapScene {
    /// Create an unmounted scene.
    pub fn new(config: AppConfig, catalog: ThemeCatalog) -> Self {
        let layout_engine = LayoutEngine::new(config.scene().safety_margin())
            .with_relaxation_passes(config.layout().relaxation_passes());
        let resizes = ResizeCoalescer::new(config.scene().settle_frames());

        Self {
            config,
            catalog,
            layout_engine,
            canvas_provider: Box::new(SpriteBufferProvider),
            scheduler: FrameScheduler::new(),
            resizes,
            on_select: None,
            mounted: None,
            stats: SceneStats::default(),
        }
    }

    /// Create a scene whose catalog holds the built-in themes plus the
    /// custom themes of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation.
    pub fn from_config(config: AppConfig) -> Result<Self, TrailmapError> {
        let catalog = config.build_catalog()?;
        Ok(Self::new(config, catalog))
    }

    /// Use `provider` for particle canvases of later mounts and theme
    /// switches.
    pub fn with_canvas_provider(mut self, provider: impl CanvasProvider + 'static) -> Self {
        self.canvas_provider = Box::new(provider);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Mount a roadmap, replacing any mounted one.
    ///
    /// An unknown `theme_id` falls back to the catalog default.
    pub fn mount(
        &mut self,
        nodes: Vec<RoadmapNode>,
        progress: ProgressMap,
        theme_id: &str,
        width: f32,
    ) {
        if self.mounted.is_some() {
            self.unmount();
        }

        let width = sanitize_width(width);
        let theme = self.resolve_theme(theme_id);
        let layout = self.compute_layout(&nodes, &theme, width);
        let (particles, particle_loop) = self.start_particles(&theme, width);

        info!(
            theme_id = theme.id(),
            nodes = nodes.len(),
            width;
            "Roadmap mounted"
        );

        let mut mounted = Mounted {
            nodes,
            progress,
            theme,
            width,
            layout,
            edges: Vec::new(),
            paths: Vec::new(),
            particles,
            particle_loop,
            selected: None,
        };
        rebuild_paths(&mut mounted);
        self.mounted = Some(mounted);
    }

    /// Tear down the mounted roadmap: cancel the particle loop and drop
    /// pending resizes. Later frames do nothing.
    pub fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        self.scheduler.cancel(mounted.particle_loop);
        self.resizes.clear();
        debug!(theme_id = mounted.theme.id(); "Roadmap unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Record a new container width. It is applied on the next frame.
    pub fn resize(&mut self, width: f32) {
        if self.mounted.is_none() {
            return;
        }
        self.resizes.push(width);
    }

    /// Run one frame of `dt` frames (`1.0` is one 60 Hz frame).
    ///
    /// A settled resize is applied first, then every active loop runs.
    /// Returns `None` when nothing is mounted.
    pub fn frame(&mut self, dt: f32) -> Option<Frame> {
        self.mounted.as_ref()?;

        if let Some(width) = self.resizes.flush() {
            self.apply_width(width);
        }

        let frame = self.scheduler.advance(dt);
        self.stats.frames += 1;
        Some(frame)
    }

    /// Replace the progress map. Only path statuses change.
    pub fn set_progress(&mut self, progress: ProgressMap) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        mounted.progress = progress;
        rebuild_paths(mounted);
        debug!(entries = mounted.progress.len(); "Progress updated");
    }

    /// Replace the node list and lay it out again.
    pub fn set_nodes(&mut self, nodes: Vec<RoadmapNode>) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        mounted.layout = self.compute_layout(&nodes, &mounted.theme, mounted.width);
        mounted.nodes = nodes;
        let layout = &mounted.layout;
        mounted.selected = mounted.selected.filter(|id| layout.position(*id).is_some());
        rebuild_paths(&mut mounted);
        self.mounted = Some(mounted);
    }

    /// Switch to another theme.
    ///
    /// The current particle loop is cancelled before the new one starts, so at
    /// most one loop is active. Switching to the theme already shown does
    /// nothing.
    pub fn set_theme(&mut self, theme_id: &str) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };

        let theme = self.resolve_theme(theme_id);
        if theme.id() == mounted.theme.id() {
            debug!(theme_id = theme.id(); "Theme already active");
            self.mounted = Some(mounted);
            return;
        }

        // A pending resize is folded into the switch so the new canvas and
        // layout see the current container width.
        if let Some(width) = self.resizes.pending() {
            self.resizes.clear();
            mounted.width = width;
        }

        self.scheduler.cancel(mounted.particle_loop);
        let (particles, particle_loop) = self.start_particles(&theme, mounted.width);
        mounted.particles = particles;
        mounted.particle_loop = particle_loop;

        mounted.layout = self.compute_layout(&mounted.nodes, &theme, mounted.width);
        info!(from = mounted.theme.id(), to = theme.id(); "Theme switched");
        mounted.theme = theme;
        rebuild_paths(&mut mounted);
        self.mounted = Some(mounted);
    }

    /// Register the callback fired when a node is selected.
    pub fn on_node_select(&mut self, callback: impl FnMut(Id) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Hit-test `point`, given in canvas coordinates (origin at the top-left
    /// corner of the container), and select the node under it.
    ///
    /// Nodes drawn later win when glyphs overlap.
    pub fn click(&mut self, point: Point) -> Option<Id> {
        let mounted = self.mounted.as_ref()?;
        let local = point.with_x(point.x() - mounted.width / 2.0);
        let glyph = Size::new(NODE_SIZE, NODE_SIZE);

        let hit = mounted
            .layout
            .positions()
            .iter()
            .rev()
            .find(|(_, center)| center.to_bounds(glyph).contains(local))
            .map(|(id, _)| *id);

        match hit {
            Some(id) => {
                self.select(id);
                Some(id)
            }
            None => {
                trace!(x = point.x(), y = point.y(); "Click hit no node");
                None
            }
        }
    }

    /// Select the node `id` and fire the selection callback.
    ///
    /// Locked nodes can be selected too. Returns false when no such node is
    /// mounted.
    pub fn select(&mut self, id: Id) -> bool {
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };
        if !mounted.nodes.iter().any(|node| node.id() == id) {
            debug!(node_id = id.to_string(); "Ignoring selection of unknown node");
            return false;
        }

        mounted.selected = Some(id);
        debug!(node_id = id.to_string(); "Node selected");
        if let Some(callback) = self.on_select.as_mut() {
            callback(id);
        }
        true
    }

    pub fn selected(&self) -> Option<Id> {
        self.mounted.as_ref().and_then(|m| m.selected)
    }

    /// Render data for every positioned node, in sequence order.
    pub fn node_views(&self) -> Vec<NodeView> {
        let Some(mounted) = self.mounted.as_ref() else {
            return Vec::new();
        };

        let colors = mounted.theme.colors();
        let animation = mounted.theme.animation();
        mounted
            .nodes
            .iter()
            .filter_map(|node| {
                let position = mounted.layout.position(node.id())?;
                let progress = mounted.progress.get(node.id());
                let status = mounted.progress.status(node.id());
                let color = match status {
                    ProgressStatus::Completed => colors.node_completed,
                    ProgressStatus::Active => colors.node_active,
                    ProgressStatus::Locked => colors.node_locked,
                };

                Some(NodeView {
                    id: node.id(),
                    title: node.title().to_string(),
                    level: node.level(),
                    position,
                    status,
                    completed_lessons: progress.map_or(0, |p| p.completed_lessons()),
                    lesson_count: node.lesson_count(),
                    color,
                    shape: mounted.theme.node_shape(),
                    entry: animation.entry().kind(),
                    entry_delay_ms: node.level().saturating_mul(animation.entry().delay_ms()),
                    entry_duration_ms: animation.entry().duration_ms(),
                    hover_scale: animation.hover_scale(),
                    hover_duration_ms: animation.hover_duration_ms(),
                    selected: mounted.selected == Some(node.id()),
                })
            })
            .collect()
    }

    /// Themed paths between consecutive nodes.
    pub fn paths(&self) -> &[ThemedPath] {
        self.mounted.as_ref().map_or(&[], |m| m.paths.as_slice())
    }

    /// Edges between consecutive nodes with their statuses.
    pub fn edges(&self) -> &[PathEdge] {
        self.mounted.as_ref().map_or(&[], |m| m.edges.as_slice())
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.mounted.as_ref().map(|m| &m.layout)
    }

    /// The resolved theme of the mounted roadmap.
    pub fn theme(&self) -> Option<&ThemeConfig> {
        self.mounted.as_ref().map(|m| &m.theme)
    }

    /// Container width the current layout was computed for.
    pub fn width(&self) -> Option<f32> {
        self.mounted.as_ref().map(|m| m.width)
    }

    /// Number of frame loops currently registered.
    pub fn active_loops(&self) -> usize {
        self.scheduler.active_loops()
    }

    /// Size of the particle canvas, if one was acquired.
    pub fn canvas_size(&self) -> Option<Size> {
        let mounted = self.mounted.as_ref()?;
        mounted.particles.try_borrow().ok()?.canvas_size()
    }

    pub fn particle_count(&self) -> usize {
        self.with_particles(ParticleSimulator::len).unwrap_or(0)
    }

    pub fn particle_respawns(&self) -> u64 {
        self.with_particles(ParticleSimulator::respawns).unwrap_or(0)
    }

    pub fn particles_enabled(&self) -> bool {
        self.with_particles(ParticleSimulator::is_enabled)
            .unwrap_or(false)
    }

    /// Draw the current particle field on `canvas`.
    pub fn render_particles(&self, canvas: &mut dyn ParticleCanvas) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        if let Ok(mut particles) = mounted.particles.try_borrow_mut() {
            particles.render(canvas);
        }
    }

    /// Milliseconds of animation time elapsed.
    pub fn elapsed_ms(&self) -> f32 {
        self.scheduler.elapsed_ms()
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Export the current snapshot as an SVG document string.
    ///
    /// # Errors
    ///
    /// Returns [`TrailmapError::Export`] when the snapshot cannot be rendered.
    pub fn render_svg(&self) -> Result<String, TrailmapError> {
        let doc = Svg::render_scene(self)?;
        Ok(doc.to_string())
    }

    /// Export the current snapshot to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`TrailmapError::Export`] when the snapshot cannot be rendered
    /// and [`TrailmapError::Io`] when the file cannot be written.
    pub fn render_svg_to_file(&self, path: impl AsRef<Path>) -> Result<(), TrailmapError> {
        let svg = Svg::new(&path.as_ref().to_string_lossy());
        let doc = Svg::render_scene(self)?;
        svg.write_document(doc).map_err(|err| match err {
            export::Error::Io(err) => TrailmapError::Io(err),
            err => TrailmapError::Export(err),
        })
    }

    fn with_particles<T>(&self, f: impl FnOnce(&ParticleSimulator) -> T) -> Option<T> {
        let mounted = self.mounted.as_ref()?;
        let particles = mounted.particles.try_borrow().ok()?;
        Some(f(&particles))
    }

    fn resolve_theme(&self, theme_id: &str) -> ThemeConfig {
        let theme = self.catalog.resolve(theme_id);
        self.config.style().apply(theme)
    }

    fn compute_layout(&mut self, nodes: &[RoadmapNode], theme: &ThemeConfig, width: f32) -> Layout {
        let layout = self.layout_engine.compute(nodes, theme, width);
        self.stats.layout_passes += 1;
        self.stats.last_layout_width = Some(width);
        layout
    }

    fn start_particles(
        &mut self,
        theme: &ThemeConfig,
        width: f32,
    ) -> (Rc<RefCell<ParticleSimulator>>, LoopHandle) {
        let size = Size::new(width, self.config.scene().viewport_height());
        let mut simulator =
            ParticleSimulator::new(theme.particles(), size, self.config.scene().particle_seed());
        simulator.attach_canvas(self.canvas_provider.as_ref());

        let simulator = Rc::new(RefCell::new(simulator));
        let handle = self.scheduler.request_loop(simulator.clone());
        (simulator, handle)
    }

    fn apply_width(&mut self, width: f32) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };

        if width == mounted.width {
            trace!(width; "Resize to current width, keeping layout");
            self.mounted = Some(mounted);
            return;
        }

        debug!(from = mounted.width, to = width; "Applying resize");
        mounted.width = width;
        mounted.layout = self.compute_layout(&mounted.nodes, &mounted.theme, width);
        let size = Size::new(width, self.config.scene().viewport_height());
        if let Ok(mut particles) = mounted.particles.try_borrow_mut() {
            particles.resize(size);
        }
        rebuild_paths(&mut mounted);
        self.mounted = Some(mounted);
    }
}

impl Default for RoadmapScene {
    fn default() -> Self {
        Self::new(AppConfig::default(), ThemeCatalog::with_builtin())
    }
}

impl Drop for RoadmapScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for RoadmapScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadmapScene")
            .field("theme", &self.theme().map(ThemeConfig::id))
            .field("width", &self.width())
            .field("active_loops", &self.active_loops())
            .field("stats", &self.stats)
            .finish()
    }
}

fn rebuild_paths(mounted: &mut Mounted) {
    mounted.edges = path::derive_edges(
        &mounted.nodes,
        &mounted.progress,
        mounted.layout.positions(),
    );
    mounted.paths = path::build_paths(&mounted.theme, &mounted.edges);
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use trailmap_core::theme::LayoutFamily;

    use super::*;
    use crate::particles::SurfaceError;

    struct NoCanvas;

    impl CanvasProvider for NoCanvas {
        fn acquire(&self, _size: Size) -> Result<Box<dyn ParticleCanvas>, SurfaceError> {
            Err(SurfaceError::Unavailable("offscreen".to_string()))
        }
    }

    fn nodes(count: usize) -> Vec<RoadmapNode> {
        (0..count)
            .map(|i| RoadmapNode::new(Id::from_index(i), format!("Node {i}"), i as u32))
            .collect()
    }

    fn progress() -> ProgressMap {
        [
            (Id::from_index(0), ProgressStatus::Completed),
            (Id::from_index(1), ProgressStatus::Active),
        ]
        .into_iter()
        .collect()
    }

    fn mounted_scene(theme_id: &str) -> RoadmapScene {
        let mut scene = RoadmapScene::default();
        scene.mount(nodes(5), progress(), theme_id, 1024.0);
        scene
    }

    #[test]
    fn test_mount_lays_out_and_starts_particles() {
        let scene = mounted_scene("space-odyssey");
        assert!(scene.is_mounted());
        assert_eq!(scene.layout().map(Layout::len), Some(5));
        assert_eq!(scene.edges().len(), 4);
        assert_eq!(scene.active_loops(), 1);
        assert_eq!(scene.stats().layout_passes(), 1);
        assert_eq!(scene.canvas_size(), Some(Size::new(1024.0, 800.0)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let scene = mounted_scene("does-not-exist");
        let theme = scene.theme().expect("mounted theme");
        assert_eq!(theme.id(), "cyber-neon");
        assert_eq!(scene.layout().map(Layout::family), Some(LayoutFamily::Vertical));
    }

    #[test]
    fn test_frames_before_mount_do_nothing() {
        let mut scene = RoadmapScene::default();
        scene.resize(500.0);
        assert!(scene.frame(1.0).is_none());
        assert_eq!(scene.stats(), SceneStats::default());
    }

    #[test]
    fn test_resizes_coalesce_into_one_layout() {
        let mut scene = mounted_scene("ocean-depths");
        for i in 0..50 {
            scene.resize(400.0 + i as f32 * 10.0);
        }
        assert_eq!(scene.stats().layout_passes(), 1);

        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 2);
        assert_eq!(scene.stats().last_layout_width(), Some(890.0));
        assert_eq!(scene.canvas_size().map(|s| s.width()), Some(890.0));

        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 2);
    }

    #[test]
    fn test_resize_to_same_width_keeps_layout() {
        let mut scene = mounted_scene("ocean-depths");
        scene.resize(1024.0);
        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 1);
    }

    #[test]
    fn test_settle_frames_delay_layout() {
        let config = AppConfig::new(
            crate::config::SceneConfig::default().with_settle_frames(2),
            Default::default(),
            Default::default(),
        );
        let mut scene = RoadmapScene::from_config(config).expect("valid config");
        scene.mount(nodes(3), ProgressMap::new(), "cyber-neon", 1024.0);

        scene.resize(600.0);
        scene.frame(1.0);
        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 1);
        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 2);
        assert_eq!(scene.width(), Some(600.0));
    }

    #[test]
    fn test_theme_switch_replaces_loop() {
        let mut scene = mounted_scene("cyber-neon");
        for _ in 0..100 {
            scene.frame(1.0);
        }
        scene.set_theme("dragons-lair");

        assert_eq!(scene.active_loops(), 1);
        assert_eq!(scene.theme().map(ThemeConfig::id), Some("dragons-lair"));
        assert_eq!(scene.layout().map(Layout::family), Some(LayoutFamily::Dungeon));
        assert_eq!(scene.canvas_size().map(|s| s.width()), Some(1024.0));
        assert_eq!(scene.stats().layout_passes(), 2);
    }

    #[test]
    fn test_theme_switch_applies_pending_resize() {
        let mut scene = mounted_scene("cyber-neon");
        for _ in 0..100 {
            scene.frame(1.0);
        }
        scene.resize(600.0);
        scene.set_theme("ocean-depths");

        assert_eq!(scene.active_loops(), 1);
        assert_eq!(scene.canvas_size().map(|s| s.width()), Some(600.0));
        assert_eq!(scene.width(), Some(600.0));
        assert_eq!(scene.stats().last_layout_width(), Some(600.0));
        assert_eq!(scene.stats().layout_passes(), 2);

        scene.frame(1.0);
        assert_eq!(scene.stats().layout_passes(), 2);
    }

    #[test]
    fn test_same_theme_switch_is_noop() {
        let mut scene = mounted_scene("forest-quest");
        scene.set_theme("forest-quest");
        assert_eq!(scene.stats().layout_passes(), 1);
        assert_eq!(scene.active_loops(), 1);
    }

    #[test]
    fn test_set_progress_rebuilds_paths_only() {
        let mut scene = mounted_scene("cyber-neon");
        let all_done: ProgressMap = (0..5)
            .map(|i| (Id::from_index(i), ProgressStatus::Completed))
            .collect();
        scene.set_progress(all_done);

        assert_eq!(scene.stats().layout_passes(), 1);
        assert!(scene
            .edges()
            .iter()
            .all(|edge| edge.status() == path::EdgeStatus::Completed));
    }

    #[test]
    fn test_set_nodes_relayouts() {
        let mut scene = mounted_scene("cyber-neon");
        scene.select(Id::from_index(4));
        scene.set_nodes(nodes(3));

        assert_eq!(scene.layout().map(Layout::len), Some(3));
        assert_eq!(scene.paths().len(), 2);
        assert_eq!(scene.selected(), None);
        assert_eq!(scene.stats().layout_passes(), 2);
    }

    #[test]
    fn test_node_views() {
        let mut scene = mounted_scene("cyber-neon");
        scene.select(Id::from_index(2));
        let theme = scene.theme().cloned().expect("theme");
        let views = scene.node_views();

        assert_eq!(views.len(), 5);
        assert_eq!(views[0].status(), ProgressStatus::Completed);
        assert_eq!(views[0].color(), theme.colors().node_completed);
        assert_eq!(views[1].color(), theme.colors().node_active);
        assert_eq!(views[4].status(), ProgressStatus::Locked);
        assert_eq!(
            views[3].entry_delay_ms(),
            3 * theme.animation().entry().delay_ms()
        );
        assert_eq!(views[0].hover_duration_ms(), theme.animation().hover_duration_ms());
        assert!(views[2].is_selected());
        assert!(!views[1].is_selected());
    }

    #[test]
    fn test_click_selects_node_under_pointer() {
        let mut scene = mounted_scene("cyber-neon");
        let selected = Rc::new(Cell::new(None));
        let sink = selected.clone();
        scene.on_node_select(move |id| sink.set(Some(id)));

        let target = scene.layout().and_then(|l| l.position(Id::from_index(3))).expect("position");
        let click = Point::new(target.x() + 512.0 + 10.0, target.y() - 10.0);

        assert_eq!(scene.click(click), Some(Id::from_index(3)));
        assert_eq!(selected.get(), Some(Id::from_index(3)));

        assert_eq!(scene.click(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_locked_nodes_are_selectable() {
        let mut scene = mounted_scene("cyber-neon");
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        scene.on_node_select(move |_| counter.set(counter.get() + 1));

        assert!(scene.select(Id::from_index(4)));
        assert!(!scene.select(Id::new("missing")));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut scene = mounted_scene("space-odyssey");
        scene.resize(300.0);
        scene.unmount();

        assert_eq!(scene.active_loops(), 0);
        assert!(scene.frame(1.0).is_none());
        assert!(scene.node_views().is_empty());
        assert_eq!(scene.stats().layout_passes(), 1);
    }

    #[test]
    fn test_canvas_failure_keeps_scene_rendering() {
        let mut scene = RoadmapScene::default().with_canvas_provider(NoCanvas);
        scene.mount(nodes(4), progress(), "forest-quest", 900.0);
        scene.frame(1.0);

        assert!(!scene.particles_enabled());
        assert_eq!(scene.canvas_size(), None);
        assert_eq!(scene.node_views().len(), 4);
        assert_eq!(scene.paths().len(), 3);
    }

    #[test]
    fn test_render_to_missing_directory_is_io_error() {
        let scene = mounted_scene("cyber-neon");
        let path = std::env::temp_dir()
            .join("trailmap-no-such-dir")
            .join("nested")
            .join("out.svg");

        let err = scene.render_svg_to_file(&path).unwrap_err();
        assert!(matches!(err, TrailmapError::Io(_)), "{err:?}");

        let mut unmounted = RoadmapScene::default();
        unmounted.unmount();
        let err = unmounted.render_svg_to_file(&path).unwrap_err();
        assert!(matches!(err, TrailmapError::Export(_)), "{err:?}");
    }

    #[test]
    fn test_particle_clock_survives_relayout() {
        let mut scene = mounted_scene("dragons-lair");
        for _ in 0..10 {
            scene.frame(1.0);
        }
        let before = scene.elapsed_ms();
        scene.resize(700.0);
        scene.frame(1.0);
        assert!(scene.elapsed_ms() > before);
        assert_eq!(scene.particle_count(), presets_count("dragons-lair"));
    }

    fn presets_count(theme_id: &str) -> usize {
        ThemeCatalog::with_builtin()
            .resolve(theme_id)
            .particles()
            .count()
    }

    #[test]
    fn test_remount_replaces_loop() {
        let mut scene = mounted_scene("cyber-neon");
        scene.mount(nodes(2), ProgressMap::new(), "ocean-depths", 600.0);
        assert_eq!(scene.active_loops(), 1);
        assert_eq!(scene.edges().len(), 1);
    }
}

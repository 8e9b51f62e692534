//! Ambient particle field.
//!
//! A [`ParticleSimulator`] owns a fixed-size pool of particles and advances
//! them frame by frame according to the theme's [`ParticleKind`]. Time is
//! measured in frames: a `dt` of `1.0` is one 60 Hz frame.
//!
//! Wrapping kinds (stars, leaves, bubbles, code) travel off one edge and come
//! back on the opposite one. Fire particles rise from an emitter at the bottom
//! edge, fade out and respawn there.
//!
//! # Examples
//!
//! ```
//! use trailmap::geometry::Size;
//! use trailmap::particles::{ParticleSimulator, SpriteBuffer};
//! use trailmap::theme::{ParticleConfig, ParticleKind};
//!
//! let config = ParticleConfig::new(ParticleKind::Bubbles, 30, 0.6);
//! let mut simulator = ParticleSimulator::new(&config, Size::new(800.0, 600.0), 7);
//!
//! for _ in 0..120 {
//!     simulator.tick(1.0);
//! }
//! assert_eq!(simulator.len(), 30);
//!
//! let mut canvas = SpriteBuffer::new(Size::new(800.0, 600.0));
//! simulator.render(&mut canvas);
//! assert_eq!(canvas.sprites().len(), 30);
//! ```

mod kind;
mod surface;

use log::{debug, trace};
use rand::{SeedableRng, rngs::StdRng};

use trailmap_core::{
    color::Color,
    geometry::{Point, Size},
    theme::{ParticleConfig, ParticleKind},
};

use crate::scene::{Frame, FrameCallback};

pub use kind::{CODE_GLYPHS, WRAP_MARGIN};
pub use surface::{
    CanvasProvider, ParticleCanvas, Sprite, SpriteBuffer, SpriteBufferProvider, SurfaceError,
};

/// Offset between the physics and glyph generator seeds.
const GLYPH_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// One particle of the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Point,
    velocity: Point,
    size: f32,
    opacity: f32,
    color: Color,
    /// Sway phase of leaves, in radians
    phase: f32,
}

impl Particle {
    pub fn position(&self) -> Point {
        self.position
    }

    /// Displacement per frame
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Simulates and draws the particle field of one theme.
pub struct ParticleSimulator {
    kind: ParticleKind,
    speed: f32,
    size: Size,
    palette: Vec<Color>,
    particles: Vec<Particle>,
    rng: StdRng,
    glyph_rng: StdRng,
    canvas: Option<Box<dyn ParticleCanvas>>,
    enabled: bool,
    respawns: u64,
    ticks: u64,
}

impl ParticleSimulator {
    /// Create a simulator for `config` on a surface of `size`.
    ///
    /// Wrapping kinds start scattered across the surface, fire starts at its
    /// emitter. A disabled config gives an empty, disabled simulator.
    pub fn new(config: &ParticleConfig, size: Size, seed: u64) -> Self {
        let kind = config.kind();
        let speed = if config.speed().is_finite() {
            config.speed().max(0.0)
        } else {
            0.0
        };
        let palette: Vec<Color> = kind::palette(kind)
            .iter()
            .filter_map(|hex| Color::new(hex).ok())
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let enabled = config.enabled();
        let particles = if enabled {
            (0..config.count())
                .map(|_| kind::spawn(kind, speed, size, &palette, &mut rng, true))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            kind = kind.name(),
            count = particles.len(),
            enabled,
            width = size.width(),
            height = size.height();
            "Particle simulator created"
        );

        Self {
            kind,
            speed,
            size,
            palette,
            particles,
            rng,
            glyph_rng: StdRng::seed_from_u64(seed ^ GLYPH_SEED_OFFSET),
            canvas: None,
            enabled,
            respawns: 0,
            ticks: 0,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of fire particles sent back to the emitter so far.
    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    /// Number of ticks that advanced the pool.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stop simulating and drawing. The pool is kept as is.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Size of the simulated surface.
    pub fn surface_size(&self) -> Size {
        self.size
    }

    /// Size of the attached canvas, if any.
    pub fn canvas_size(&self) -> Option<Size> {
        self.canvas.as_ref().map(|canvas| canvas.size())
    }

    /// Acquire a canvas from `provider` and draw on it every frame.
    ///
    /// When no canvas can be acquired the simulator is disabled and `false`
    /// is returned; the rest of the scene is unaffected.
    pub fn attach_canvas(&mut self, provider: &dyn CanvasProvider) -> bool {
        match provider.acquire(self.size) {
            Ok(canvas) => {
                self.canvas = Some(canvas);
                true
            }
            Err(err) => {
                debug!(err:err; "No particle canvas, disabling particles");
                self.canvas = None;
                self.disable();
                false
            }
        }
    }

    /// Update the surface size. The pool is left untouched; particles outside
    /// the new bounds wrap on their next tick.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(size);
        }
    }

    /// Advance every particle by `dt` frames.
    pub fn tick(&mut self, dt: f32) {
        if !self.enabled || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let mut respawned = 0;
        for particle in &mut self.particles {
            let motion = kind::advance(self.kind, particle, self.size, dt, &mut self.rng);
            if motion == kind::Motion::Expired {
                *particle = kind::spawn(
                    self.kind,
                    self.speed,
                    self.size,
                    &self.palette,
                    &mut self.rng,
                    false,
                );
                respawned += 1;
            }
        }

        self.ticks += 1;
        self.respawns += respawned;
        if respawned > 0 {
            trace!(respawned, total = self.respawns; "Particles respawned");
        }
    }

    /// Clear `canvas` and draw every particle on it.
    pub fn render(&mut self, canvas: &mut dyn ParticleCanvas) {
        if !self.enabled {
            return;
        }
        canvas.clear();
        for particle in &self.particles {
            canvas.draw(&kind::sprite(self.kind, particle, &mut self.glyph_rng));
        }
    }

    /// Draw on the attached canvas, if any.
    pub fn render_attached(&mut self) {
        if let Some(mut canvas) = self.canvas.take() {
            self.render(canvas.as_mut());
            self.canvas = Some(canvas);
        }
    }
}

impl FrameCallback for ParticleSimulator {
    fn on_frame(&mut self, frame: &Frame) {
        self.tick(frame.dt());
        self.render_attached();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl CanvasProvider for FailingProvider {
        fn acquire(&self, _size: Size) -> Result<Box<dyn ParticleCanvas>, SurfaceError> {
            Err(SurfaceError::Unavailable("no 2d context".to_string()))
        }
    }

    fn surface() -> Size {
        Size::new(800.0, 600.0)
    }

    #[test]
    fn test_pool_size_constant_for_every_kind() {
        for kind in [
            ParticleKind::Stars,
            ParticleKind::Leaves,
            ParticleKind::Bubbles,
            ParticleKind::Fire,
            ParticleKind::Code,
        ] {
            let config = ParticleConfig::new(kind, 40, 1.0);
            let mut simulator = ParticleSimulator::new(&config, surface(), 1);
            for _ in 0..300 {
                simulator.tick(1.0);
            }
            assert_eq!(simulator.len(), 40, "{}", kind.name());
        }
    }

    #[test]
    fn test_fire_respawns() {
        let config = ParticleConfig::new(ParticleKind::Fire, 25, 0.8);
        let mut simulator = ParticleSimulator::new(&config, surface(), 2);
        assert_eq!(simulator.respawns(), 0);

        for _ in 0..200 {
            simulator.tick(1.0);
        }
        assert!(simulator.respawns() > 0);
        assert_eq!(simulator.len(), 25);
    }

    #[test]
    fn test_wrapping_particles_stay_near_surface() {
        let config = ParticleConfig::new(ParticleKind::Leaves, 30, 3.0);
        let mut simulator = ParticleSimulator::new(&config, surface(), 3);
        for _ in 0..500 {
            simulator.tick(1.0);
            for particle in simulator.particles() {
                let p = particle.position();
                assert!(p.x() >= -WRAP_MARGIN && p.x() <= 800.0 + WRAP_MARGIN, "{p:?}");
                assert!(p.y() >= -WRAP_MARGIN && p.y() <= 600.0 + WRAP_MARGIN, "{p:?}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = ParticleConfig::new(ParticleKind::Stars, 20, 0.5);
        let mut a = ParticleSimulator::new(&config, surface(), 42);
        let mut b = ParticleSimulator::new(&config, surface(), 42);
        for _ in 0..50 {
            a.tick(1.0);
            b.tick(1.0);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_disabled_config_is_empty() {
        let config = ParticleConfig::new(ParticleKind::Stars, 20, 0.5).disabled();
        let mut simulator = ParticleSimulator::new(&config, surface(), 0);
        simulator.tick(1.0);
        assert!(simulator.is_empty());
        assert!(!simulator.is_enabled());
        assert_eq!(simulator.ticks(), 0);
    }

    #[test]
    fn test_failed_canvas_disables_simulation() {
        let config = ParticleConfig::new(ParticleKind::Code, 10, 1.0);
        let mut simulator = ParticleSimulator::new(&config, surface(), 0);
        let before = simulator.particles().to_vec();

        assert!(!simulator.attach_canvas(&FailingProvider));
        assert!(!simulator.is_enabled());

        simulator.tick(1.0);
        simulator.render_attached();
        assert_eq!(simulator.particles(), before.as_slice());
        assert_eq!(simulator.canvas_size(), None);
    }

    #[test]
    fn test_resize_keeps_pool() {
        let config = ParticleConfig::new(ParticleKind::Bubbles, 15, 1.0);
        let mut simulator = ParticleSimulator::new(&config, surface(), 4);
        assert!(simulator.attach_canvas(&SpriteBufferProvider));

        simulator.resize(Size::new(320.0, 600.0));
        assert_eq!(simulator.len(), 15);
        assert_eq!(simulator.surface_size(), Size::new(320.0, 600.0));
        assert_eq!(simulator.canvas_size(), Some(Size::new(320.0, 600.0)));
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let config = ParticleConfig::new(ParticleKind::Stars, 5, 1.0);
        let mut simulator = ParticleSimulator::new(&config, surface(), 5);
        let before = simulator.particles().to_vec();
        simulator.tick(0.0);
        simulator.tick(-1.0);
        simulator.tick(f32::NAN);
        assert_eq!(simulator.particles(), before.as_slice());
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let config = ParticleConfig::new(ParticleKind::Fire, 12, 1.0);
        let mut simulator = ParticleSimulator::new(&config, surface(), 6);
        let mut canvas = SpriteBuffer::new(surface());

        simulator.render(&mut canvas);
        simulator.tick(1.0);
        simulator.render(&mut canvas);
        assert_eq!(canvas.sprites().len(), 12);
        assert!(canvas.sprites().iter().all(|s| matches!(s, Sprite::Ember { .. })));
    }
}

//! Spawn, motion and appearance rules per particle kind.

use rand::{Rng, rngs::StdRng};

use trailmap_core::{
    color::Color,
    geometry::{Point, Size},
    theme::ParticleKind,
};

use super::{Particle, surface::Sprite};

/// Distance beyond each edge a particle may travel before wrapping.
pub const WRAP_MARGIN: f32 = 10.0;

/// Characters of the falling code effect.
pub const CODE_GLYPHS: &str = "01";

const STAR_OPACITY: (f32, f32) = (0.1, 0.8);
const STAR_TWINKLE: f32 = 0.01;
const FIRE_DECAY: f32 = 0.01;
const LEAF_SWAY: f32 = 0.5;
const LEAF_SWAY_RATE: f32 = 0.05;
const CODE_FONT_SIZE: f32 = 12.0;

/// Outcome of advancing one particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Alive,
    /// The particle burned out or left the surface and must be respawned.
    Expired,
}

/// Hex colors a kind picks its particles from.
pub fn palette(kind: ParticleKind) -> &'static [&'static str] {
    match kind {
        ParticleKind::Stars => &["#FFFFFF"],
        ParticleKind::Leaves => &["#22C55E", "#10B981"],
        ParticleKind::Bubbles => &["#06B6D4"],
        ParticleKind::Fire => &["#EF4444", "#F97316"],
        ParticleKind::Code => &["#22C55E"],
    }
}

/// Random value in `[low, low + span)`.
fn uniform(rng: &mut StdRng, low: f32, span: f32) -> f32 {
    low + rng.random::<f32>() * span
}

fn pick(rng: &mut StdRng, colors: &[Color]) -> Color {
    match colors.len() {
        0 => Color::default(),
        1 => colors[0],
        len => colors[(rng.random::<f32>() * len as f32) as usize % len],
    }
}

/// Create a particle of `kind` on a surface of `size`.
///
/// With `scatter` set the particle starts anywhere on the surface; otherwise
/// it starts at the kind's entry edge.
pub fn spawn(
    kind: ParticleKind,
    speed: f32,
    size: Size,
    colors: &[Color],
    rng: &mut StdRng,
    scatter: bool,
) -> Particle {
    let (width, height) = (size.width().max(0.0), size.height().max(0.0));
    let x = uniform(rng, 0.0, width);
    let scattered_y = uniform(rng, 0.0, height);
    let jitter = rng.random::<f32>() - 0.5;
    let phase = uniform(rng, 0.0, std::f32::consts::TAU);
    let color = pick(rng, colors);

    let (entry_y, velocity, radius, opacity) = match kind {
        ParticleKind::Stars => (
            scattered_y,
            Point::new(jitter * speed, (rng.random::<f32>() - 0.5) * speed),
            uniform(rng, 1.0, 2.0),
            uniform(rng, 0.3, 0.5),
        ),
        ParticleKind::Leaves => (
            -WRAP_MARGIN,
            Point::new(jitter * speed * 0.5, speed * 0.8),
            uniform(rng, 4.0, 8.0),
            uniform(rng, 0.3, 0.4),
        ),
        ParticleKind::Bubbles => (
            height + WRAP_MARGIN,
            Point::new(jitter * speed * 0.3, -speed * 0.6),
            uniform(rng, 3.0, 6.0),
            uniform(rng, 0.2, 0.3),
        ),
        ParticleKind::Fire => (
            height,
            Point::new(jitter * speed * 0.4, -speed * 1.2),
            uniform(rng, 2.0, 5.0),
            uniform(rng, 0.3, 0.6),
        ),
        ParticleKind::Code => (
            -WRAP_MARGIN,
            Point::new(0.0, speed * 1.5),
            CODE_FONT_SIZE,
            uniform(rng, 0.3, 0.5),
        ),
    };

    let y = if scatter && kind.wraps() {
        scattered_y
    } else {
        entry_y
    };

    Particle {
        position: Point::new(x, y),
        velocity,
        size: radius,
        opacity,
        color,
        phase,
    }
}

/// Advance `particle` by `dt` frames.
pub fn advance(
    kind: ParticleKind,
    particle: &mut Particle,
    size: Size,
    dt: f32,
    rng: &mut StdRng,
) -> Motion {
    let mut velocity = particle.velocity;
    if kind == ParticleKind::Leaves {
        velocity = velocity.with_x(velocity.x() + particle.phase.sin() * LEAF_SWAY);
        particle.phase += LEAF_SWAY_RATE * dt;
    }
    particle.position = particle.position.add_point(velocity.scale(dt));

    match kind {
        ParticleKind::Stars => {
            let step = rng.random_range(-STAR_TWINKLE..=STAR_TWINKLE) * dt;
            particle.opacity = (particle.opacity + step).clamp(STAR_OPACITY.0, STAR_OPACITY.1);
        }
        ParticleKind::Fire => {
            particle.opacity -= FIRE_DECAY * dt;
            let position = particle.position;
            let outside = position.y() < -WRAP_MARGIN
                || position.x() < -WRAP_MARGIN
                || position.x() > size.width() + WRAP_MARGIN;
            if particle.opacity <= 0.0 || outside {
                return Motion::Expired;
            }
            return Motion::Alive;
        }
        ParticleKind::Leaves | ParticleKind::Bubbles | ParticleKind::Code => {}
    }

    particle.position = wrap(particle.position, size);
    Motion::Alive
}

/// Move a point that left the surface (plus margin) to the opposite edge.
pub fn wrap(point: Point, size: Size) -> Point {
    let wrap_axis = |value: f32, extent: f32| {
        if value < -WRAP_MARGIN {
            extent + WRAP_MARGIN
        } else if value > extent + WRAP_MARGIN {
            -WRAP_MARGIN
        } else {
            value
        }
    };
    Point::new(
        wrap_axis(point.x(), size.width()),
        wrap_axis(point.y(), size.height()),
    )
}

/// Appearance of `particle`. Code particles draw a random glyph each call.
pub fn sprite(kind: ParticleKind, particle: &Particle, glyph_rng: &mut StdRng) -> Sprite {
    let color = particle.color.with_alpha(particle.opacity.clamp(0.0, 1.0));
    let center = particle.position;
    match kind {
        ParticleKind::Stars => Sprite::Dot {
            center,
            radius: particle.size,
            color,
        },
        ParticleKind::Leaves => Sprite::Leaf {
            center,
            radius_x: particle.size,
            radius_y: particle.size * 1.5,
            rotation: 45.0,
            color,
        },
        ParticleKind::Bubbles => Sprite::Bubble {
            center,
            radius: particle.size,
            color,
        },
        ParticleKind::Fire => Sprite::Ember {
            center,
            radius: particle.size,
            color,
        },
        ParticleKind::Code => {
            let glyphs: Vec<char> = CODE_GLYPHS.chars().collect();
            let glyph = glyphs[glyph_rng.random_range(0..glyphs.len())];
            Sprite::Glyph {
                position: center,
                glyph,
                font_size: particle.size,
                color,
            }
        }
    }
}

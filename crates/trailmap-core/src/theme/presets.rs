//! Built-in themes.
//!
//! Each theme is a plain constructor function. [`builtin`] returns all of
//! them in catalog order; the first one is the default theme.

use crate::{color::Color, draw::StrokeStyle};

use super::{
    AnimationConfig, EntryAnimation, EntryAnimationKind, GlowConfig, LayoutFamily, NodeShape,
    ParticleConfig, ParticleKind, PathDraw, PathDrawKind, PathStyle, Spacing, SpacingConfig,
    ThemeColors, ThemeConfig,
};

/// Id of the theme used when a requested id is unknown.
pub const DEFAULT_THEME_ID: &str = "cyber-neon";

/// Parses a color literal known to be valid.
fn hex(value: &str) -> Color {
    Color::new(value).expect("built-in theme colors are valid CSS hex literals")
}

/// All built-in themes; the default theme comes first.
pub fn builtin() -> Vec<ThemeConfig> {
    vec![
        cyber_neon(),
        forest_quest(),
        space_odyssey(),
        dragons_lair(),
        ocean_depths(),
    ]
}

// =============================================================================
// Cyber Neon
// =============================================================================

/// Glowing tech theme on a straight vertical column.
pub fn cyber_neon() -> ThemeConfig {
    ThemeConfig {
        id: "cyber-neon".to_string(),
        name: "Cyber Neon".to_string(),
        description: "Futuristic tech theme with glowing nodes".to_string(),
        layout: LayoutFamily::Vertical,
        spacing: SpacingConfig::new(
            Spacing::new(140.0, 0.0, 100.0),
            Spacing::new(160.0, 0.0, 110.0),
            Spacing::new(180.0, 0.0, 120.0),
        ),
        colors: ThemeColors {
            background: hex("#0F172A"),
            surface: hex("#1E293B"),
            text: hex("#E2E8F0"),
            text_muted: hex("#64748B"),
            accent: hex("#06B6D4"),
            node_completed: hex("#22C55E"),
            node_active: hex("#06B6D4"),
            node_locked: hex("#475569"),
            path_inactive: hex("#334155"),
            path_active: hex("#06B6D4"),
            path_completed: hex("#22C55E"),
        },
        particles: ParticleConfig::new(ParticleKind::Stars, 50, 0.5),
        animation: AnimationConfig::new(
            EntryAnimation::new(EntryAnimationKind::Glow, 600, 100),
            PathDraw::new(PathDrawKind::Draw, 800),
            1.1,
        )
        .with_hover_duration_ms(300),
        node_shape: NodeShape::RoundedSquare { radius: 16.0 },
        path_style: PathStyle::new(3.0)
            .with_active_dash(StrokeStyle::dashed(10.0, 5.0))
            .with_glow(true),
        glow: GlowConfig::new(0.8, hex("#06B6D4")),
    }
}

// =============================================================================
// Forest Quest
// =============================================================================

/// Nature theme laid out as a branching vine.
pub fn forest_quest() -> ThemeConfig {
    ThemeConfig {
        id: "forest-quest".to_string(),
        name: "Forest Quest".to_string(),
        description: "Nature-themed with tree branch layout".to_string(),
        layout: LayoutFamily::Tree,
        spacing: SpacingConfig::new(
            Spacing::new(150.0, 120.0, 100.0),
            Spacing::new(180.0, 200.0, 130.0),
            Spacing::new(200.0, 250.0, 150.0),
        ),
        colors: ThemeColors {
            background: hex("#0A1F0A"),
            surface: hex("#1A2E1A"),
            text: hex("#D1FAE5"),
            text_muted: hex("#6EE7B7"),
            accent: hex("#F59E0B"),
            node_completed: hex("#10B981"),
            node_active: hex("#22C55E"),
            node_locked: hex("#374151"),
            path_inactive: hex("#1F2937"),
            path_active: hex("#22C55E"),
            path_completed: hex("#10B981"),
        },
        particles: ParticleConfig::new(ParticleKind::Leaves, 40, 0.3),
        animation: AnimationConfig::new(
            EntryAnimation::new(EntryAnimationKind::Bounce, 800, 150),
            PathDraw::new(PathDrawKind::Flow, 1000),
            1.08,
        )
        .with_hover_duration_ms(350),
        node_shape: NodeShape::Circle,
        path_style: PathStyle::new(4.0),
        glow: GlowConfig::new(0.6, hex("#22C55E")),
    }
}

// =============================================================================
// Space Odyssey
// =============================================================================

/// Cosmic theme whose nodes spiral outward.
pub fn space_odyssey() -> ThemeConfig {
    ThemeConfig {
        id: "space-odyssey".to_string(),
        name: "Space Odyssey".to_string(),
        description: "Cosmic theme with orbital layout".to_string(),
        layout: LayoutFamily::Orbital,
        spacing: SpacingConfig::new(
            Spacing::new(140.0, 140.0, 110.0),
            Spacing::new(180.0, 220.0, 140.0),
            Spacing::new(220.0, 280.0, 160.0),
        ),
        colors: ThemeColors {
            background: hex("#0A0A1A"),
            surface: hex("#1A1A2E"),
            text: hex("#E9D5FF"),
            text_muted: hex("#A78BFA"),
            accent: hex("#EC4899"),
            node_completed: hex("#A855F7"),
            node_active: hex("#EC4899"),
            node_locked: hex("#4B5563"),
            path_inactive: hex("#1F2937"),
            path_active: hex("#EC4899"),
            path_completed: hex("#A855F7"),
        },
        particles: ParticleConfig::new(ParticleKind::Stars, 80, 0.4),
        animation: AnimationConfig::new(
            EntryAnimation::new(EntryAnimationKind::Scale, 700, 120),
            PathDraw::new(PathDrawKind::Pulse, 900),
            1.12,
        )
        .with_hover_duration_ms(320),
        node_shape: NodeShape::Circle,
        path_style: PathStyle::new(2.0)
            .with_active_dash(StrokeStyle::dashed(5.0, 5.0))
            .with_glow(true),
        glow: GlowConfig::new(0.9, hex("#EC4899")),
    }
}

// =============================================================================
// Dragon's Lair
// =============================================================================

/// Fantasy dungeon crawl with grid corridors.
pub fn dragons_lair() -> ThemeConfig {
    ThemeConfig {
        id: "dragons-lair".to_string(),
        name: "Dragon's Lair".to_string(),
        description: "Fantasy RPG with dungeon path layout".to_string(),
        layout: LayoutFamily::Dungeon,
        spacing: SpacingConfig::new(
            Spacing::new(130.0, 110.0, 95.0),
            Spacing::new(160.0, 180.0, 120.0),
            Spacing::new(190.0, 240.0, 140.0),
        ),
        colors: ThemeColors {
            background: hex("#1A0A0A"),
            surface: hex("#2E1A1A"),
            text: hex("#FEE2E2"),
            text_muted: hex("#FCA5A5"),
            accent: hex("#FBBF24"),
            node_completed: hex("#F97316"),
            node_active: hex("#EF4444"),
            node_locked: hex("#6B7280"),
            path_inactive: hex("#1F2937"),
            path_active: hex("#EF4444"),
            path_completed: hex("#F97316"),
        },
        particles: ParticleConfig::new(ParticleKind::Fire, 35, 0.6),
        animation: AnimationConfig::new(
            EntryAnimation::new(EntryAnimationKind::Bounce, 750, 130),
            PathDraw::new(PathDrawKind::Draw, 850),
            1.09,
        )
        .with_hover_duration_ms(340),
        node_shape: NodeShape::Diamond,
        path_style: PathStyle::new(5.0).with_glow(true),
        glow: GlowConfig::new(0.85, hex("#EF4444")),
    }
}

// =============================================================================
// Ocean Depths
// =============================================================================

/// Underwater theme following a sine wave.
pub fn ocean_depths() -> ThemeConfig {
    ThemeConfig {
        id: "ocean-depths".to_string(),
        name: "Ocean Depths".to_string(),
        description: "Underwater theme with wave layout".to_string(),
        layout: LayoutFamily::Wave,
        spacing: SpacingConfig::new(
            Spacing::new(120.0, 100.0, 90.0),
            Spacing::new(150.0, 160.0, 110.0),
            Spacing::new(170.0, 200.0, 130.0),
        ),
        colors: ThemeColors {
            background: hex("#0A1A1F"),
            surface: hex("#1A2E33"),
            text: hex("#CCFBF1"),
            text_muted: hex("#5EEAD4"),
            accent: hex("#14B8A6"),
            node_completed: hex("#14B8A6"),
            node_active: hex("#06B6D4"),
            node_locked: hex("#475569"),
            path_inactive: hex("#1F2937"),
            path_active: hex("#06B6D4"),
            path_completed: hex("#14B8A6"),
        },
        particles: ParticleConfig::new(ParticleKind::Bubbles, 60, 0.35),
        animation: AnimationConfig::new(
            EntryAnimation::new(EntryAnimationKind::Slide, 650, 110),
            PathDraw::new(PathDrawKind::Flow, 950),
            1.07,
        )
        .with_hover_duration_ms(330),
        node_shape: NodeShape::Circle,
        path_style: PathStyle::new(3.0),
        glow: GlowConfig::new(0.7, hex("#06B6D4")),
    }
}

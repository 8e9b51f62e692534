//! SVG rendering for a mounted roadmap scene.

use log::debug;
use svg::{self, Document, node::element as svg_element};

use trailmap_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::Size,
    theme::{GlowConfig, NODE_SIZE, NodeShape, ThemeColors},
};

use super::{GLOW_FILTER_ID, Svg, SvgParticleCanvas};
use crate::{
    RoadmapScene, export,
    path::ThemedPath,
    scene::NodeView,
};

/// Gap between a node glyph and its title.
const LABEL_GAP: f32 = 18.0;
const LABEL_FONT_SIZE: f32 = 14.0;
const PROGRESS_FONT_SIZE: f32 = 11.0;
const SELECTED_STROKE_WIDTH: f32 = 3.0;

impl Svg {
    /// Renders the current snapshot of `scene` to an SVG document.
    ///
    /// The document is as wide as the container and at least as tall as the
    /// viewport. Layout x coordinates are centered on the container, so the
    /// main group is shifted by half the width.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when no roadmap is mounted.
    pub fn render_scene(scene: &RoadmapScene) -> Result<Document, export::Error> {
        let (Some(theme), Some(layout), Some(width)) = (scene.theme(), scene.layout(), scene.width())
        else {
            return Err(export::Error::Render("no roadmap mounted".to_string()));
        };

        let height = layout
            .size()
            .height()
            .max(scene.config().scene().viewport_height());
        let size = Size::new(width, height);
        let colors = theme.colors();

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Background,
            Box::new(
                svg_element::Rectangle::new()
                    .set("x", -width / 2.0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", colors.background.opaque().to_string())
                    .set("fill-opacity", colors.background.alpha()),
            ),
        );

        let mut particles = SvgParticleCanvas::new(size, -width / 2.0);
        scene.render_particles(&mut particles);
        for node in particles.into_nodes() {
            output.add_to_layer(RenderLayer::Particles, node);
        }

        let glow = theme.glow();
        for path in scene.paths() {
            Self::add_path(&mut output, path, glow, scene.elapsed_ms());
        }

        for view in scene.node_views() {
            Self::add_node(&mut output, &view, colors);
        }

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height())
            .set("data-theme", theme.id())
            .add(svg_element::Title::new(theme.name()))
            .add(svg_element::Description::new().add(svg::node::Text::new(theme.description())));

        let doc = if glow.enabled() {
            doc.add(Self::glow_definitions(glow))
        } else {
            doc
        };

        let mut main_group =
            svg_element::Group::new().set("transform", format!("translate({}, 0)", width / 2.0));
        for group in output.render() {
            main_group = main_group.add(group);
        }

        debug!(
            theme_id = theme.id(),
            nodes = layout.len(),
            paths = scene.paths().len(),
            width,
            height;
            "Scene rendered to SVG"
        );
        Ok(doc.add(main_group))
    }

    fn add_path(output: &mut LayeredOutput, path: &ThemedPath, glow: &GlowConfig, elapsed_ms: f32) {
        let element = svg_element::Path::new()
            .set("d", path.geometry().to_svg_data())
            .set("fill", "none")
            .set("data-status", path.status().name());
        let mut element = trailmap_core::apply_stroke!(element, path.stroke());
        if glow.enabled() && path.glow().is_some() {
            element = element.set("filter", format!("url(#{GLOW_FILTER_ID})"));
        }
        output.add_to_layer(RenderLayer::Paths, Box::new(element));

        if let Some(flow) = path.flow() {
            let center = path.geometry().point_at(flow.progress(elapsed_ms));
            output.add_to_layer(
                RenderLayer::Flow,
                Box::new(
                    svg_element::Circle::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("r", flow.radius())
                        .set("fill", flow.color().opaque().to_string())
                        .set("fill-opacity", flow.color().alpha()),
                ),
            );
        }
    }

    fn add_node(output: &mut LayeredOutput, view: &NodeView, colors: &ThemeColors) {
        let center = view.position();
        let half = NODE_SIZE / 2.0;

        let glyph: Box<dyn svg::Node> = match view.shape() {
            NodeShape::Circle => Box::new(style_glyph(
                svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", half),
                view,
                colors,
            )),
            NodeShape::RoundedSquare { radius } => Box::new(style_glyph(
                svg_element::Rectangle::new()
                    .set("x", center.x() - half)
                    .set("y", center.y() - half)
                    .set("width", NODE_SIZE)
                    .set("height", NODE_SIZE)
                    .set("rx", radius),
                view,
                colors,
            )),
            NodeShape::Diamond => {
                // Rotated square whose corners touch the glyph bounds.
                let side = NODE_SIZE / std::f32::consts::SQRT_2;
                Box::new(style_glyph(
                    svg_element::Rectangle::new()
                        .set("x", center.x() - side / 2.0)
                        .set("y", center.y() - side / 2.0)
                        .set("width", side)
                        .set("height", side)
                        .set(
                            "transform",
                            format!("rotate(45 {} {})", center.x(), center.y()),
                        ),
                    view,
                    colors,
                ))
            }
        };
        output.add_to_layer(RenderLayer::Nodes, glyph);

        let title_y = center.y() + half + LABEL_GAP;
        output.add_to_layer(
            RenderLayer::Labels,
            Box::new(
                svg_element::Text::new(view.title())
                    .set("x", center.x())
                    .set("y", title_y)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-size", LABEL_FONT_SIZE)
                    .set("fill", colors.text.opaque().to_string()),
            ),
        );

        if view.lesson_count() > 0 {
            output.add_to_layer(
                RenderLayer::Labels,
                Box::new(
                    svg_element::Text::new(format!(
                        "{}/{}",
                        view.completed_lessons(),
                        view.lesson_count()
                    ))
                    .set("x", center.x())
                    .set("y", title_y + LABEL_FONT_SIZE + 2.0)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-size", PROGRESS_FONT_SIZE)
                    .set("fill", colors.text_muted.opaque().to_string()),
                ),
            );
        }
    }

    /// Blur filter merged under the source graphic.
    fn glow_definitions(glow: &GlowConfig) -> svg_element::Definitions {
        let blur = svg_element::FilterEffectGaussianBlur::new()
            .set("in", "SourceGraphic")
            .set("stdDeviation", glow.intensity() * 4.0)
            .set("result", "blur");
        let merge = svg_element::FilterEffectMerge::new()
            .add(svg_element::FilterEffectMergeNode::new().set("in", "blur"))
            .add(svg_element::FilterEffectMergeNode::new().set("in", "SourceGraphic"));
        let filter = svg_element::Filter::new()
            .set("id", GLOW_FILTER_ID)
            .set("x", "-50%")
            .set("y", "-50%")
            .set("width", "200%")
            .set("height", "200%")
            .add(blur)
            .add(merge);

        svg_element::Definitions::new().add(filter)
    }
}

/// Fill, identity attributes and the selection outline of a node glyph.
fn style_glyph<E: svg::Node>(mut glyph: E, view: &NodeView, colors: &ThemeColors) -> E {
    glyph.assign("fill", view.color().opaque().to_string());
    glyph.assign("fill-opacity", view.color().alpha());
    glyph.assign("data-node-id", view.id().to_string());
    glyph.assign("data-status", view.status().name());
    glyph.assign("data-hover-scale", view.hover_scale());
    glyph.assign("data-hover-ms", view.hover_duration_ms());
    if view.is_selected() {
        glyph.assign("stroke", colors.accent.opaque().to_string());
        glyph.assign("stroke-width", SELECTED_STROKE_WIDTH);
    }
    glyph
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmap_core::{
        identifier::Id,
        model::{ProgressMap, ProgressStatus, RoadmapNode},
    };

    fn mounted(theme_id: &str, count: usize) -> RoadmapScene {
        let nodes = (0..count)
            .map(|i| {
                RoadmapNode::new(Id::from_index(i), format!("Lesson {i}"), i as u32)
            })
            .collect();
        let progress: ProgressMap = [
            (Id::from_index(0), ProgressStatus::Completed),
            (Id::from_index(1), ProgressStatus::Active),
        ]
        .into_iter()
        .collect();
        let mut scene = RoadmapScene::default();
        scene.mount(nodes, progress, theme_id, 1000.0);
        scene
    }

    #[test]
    fn test_unmounted_scene_is_render_error() {
        let err = Svg::render_scene(&RoadmapScene::default()).unwrap_err();
        assert!(matches!(err, export::Error::Render(_)));
    }

    #[test]
    fn test_document_contains_every_layer() {
        let mut scene = mounted("cyber-neon", 4);
        scene.frame(1.0);
        let rendered = Svg::render_scene(&scene).expect("render").to_string();

        for layer in ["background", "particles", "paths", "nodes", "labels"] {
            assert!(
                rendered.contains(&format!("data-layer=\"{layer}\"")),
                "missing layer {layer}"
            );
        }
        assert!(rendered.contains("translate(500, 0)"));
        assert!(rendered.contains("Lesson 3"));
        assert!(rendered.contains(&format!("id=\"{GLOW_FILTER_ID}\"")));
    }

    #[test]
    fn test_document_describes_theme() {
        let scene = mounted("space-odyssey", 2);
        let theme = scene.theme().expect("mounted theme");
        let rendered = Svg::render_scene(&scene).expect("render").to_string();

        assert!(rendered.contains(&format!("<title>{}</title>", theme.name())));
        assert!(rendered.contains("Cosmic theme with orbital layout"));
        assert_eq!(rendered.matches("data-hover-ms=\"320\"").count(), 2);
    }

    #[test]
    fn test_node_count_matches_layout() {
        let scene = mounted("forest-quest", 6);
        let rendered = Svg::render_scene(&scene).expect("render").to_string();
        assert_eq!(rendered.matches("data-node-id=").count(), 6);
        assert_eq!(rendered.matches("<path").count(), 5);
    }

    #[test]
    fn test_flow_dot_only_on_active_edges() {
        let scene = mounted("ocean-depths", 4);
        let rendered = Svg::render_scene(&scene).expect("render").to_string();
        let flows = scene.paths().iter().filter(|p| p.flow().is_some()).count();
        assert_eq!(flows, 1);
        assert!(rendered.contains("data-layer=\"flow\""));
    }

    #[test]
    fn test_selected_node_is_outlined() {
        let mut scene = mounted("dragons-lair", 3);
        scene.select(Id::from_index(1));
        let rendered = Svg::render_scene(&scene).expect("render").to_string();
        assert_eq!(rendered.matches("stroke-width=\"3\"").count(), 1);
        assert!(rendered.contains("rotate(45"));
    }
}

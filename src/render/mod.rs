//! Weathermap rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, colors and sentinels
//! - `geometry`: Bézier segments, midpoint subdivision, bend control points
//! - `gradient`: value-to-color resolution
//! - `edge`: per-edge curve and segment planning
//! - `stroke`: multistroke offset layout
//! - `legend`: legend layout
//! - `link`: hyperlink resolution
//! - `context`: read-only lookups for one render pass
//! - `types`: the draw-command tree
//! - `sink`: the scene sink trait
//! - `svg`: an SVG scene sink

pub mod context;
pub mod defaults;
pub mod edge;
pub mod geometry;
pub mod gradient;
pub mod legend;
pub mod link;
pub mod sink;
pub mod stroke;
pub mod svg;
pub mod types;

pub use context::RenderContext;
pub use sink::SceneSink;
pub use types::*;

use crate::errors::RenderError;
use crate::log::{debug, warn};
use crate::model::{Channel, Diagram, Edge, MetricValues, Node};

use edge::{plan_edge, segment_paint};
use gradient::color_for;
use legend::{LegendBody, LegendLayout};
use link::{LinkResolver, link_for};
use stroke::{WidthPattern, offset_strokes};

/// Id of the legend's gradient ramp
pub const LEGEND_RAMP_ID: &str = "weathermap-legend-ramp";

/// Compute everything to draw for `diagram` with the current `values`.
///
/// Nodes come first, then edges in configuration order, then the legend.
/// Edges naming an unknown node are skipped.
pub fn render(
    diagram: &Diagram,
    values: &MetricValues,
    links: &dyn LinkResolver,
) -> Result<Scene, RenderError> {
    let ctx = RenderContext::new(diagram, values, links);
    let mut scene = Scene {
        width: diagram.width,
        height: diagram.height,
        ..Scene::default()
    };

    for node in &diagram.nodes {
        scene.commands.push(render_node(&ctx, node).into());
    }

    for edge in &diagram.edges {
        let (Some(from), Some(to)) = (ctx.node(&edge.node1), ctx.node(&edge.node2)) else {
            warn!(
                node1 = %edge.node1,
                node2 = %edge.node2,
                "edge references an unknown node, skipping"
            );
            continue;
        };
        scene.commands.push(render_edge(&ctx, edge, from, to)?.into());
    }

    let font_size = diagram.defaults.font_size_px;
    if let Some(layout) = LegendLayout::new(&diagram.gradient, &diagram.legend, font_size) {
        let (ramp, group) = render_legend(&ctx, &layout);
        scene.ramps.extend(ramp);
        scene.commands.push(group.into());
    }

    debug!(
        nodes = diagram.nodes.len(),
        edges = scene.groups("edge").count(),
        configured_edges = diagram.edges.len(),
        "render pass complete"
    );
    Ok(scene)
}

fn render_node(ctx: &RenderContext<'_>, node: &Node) -> GroupCommand {
    let d = &ctx.diagram.defaults;
    let value = ctx.value(node.metric_name.as_deref());

    let fill = match value {
        Some(v) => color_for(&ctx.diagram.gradient, Channel::Fill, v),
        None => defaults::UNMEASURED_FILL.to_string(),
    };

    let mut group = GroupCommand::new("node");
    group.title = Some(match value {
        Some(v) => format!("{}: {}", node.label, format_value(v, d.value_decimals)),
        None => node.label.clone(),
    });
    group.link = link_for(ctx.links, &ctx.diagram.links.node, node.link_params.as_deref());

    group.push(RectCommand {
        x: node.x,
        y: node.y,
        width: node.width,
        height: node.height,
        fill: Paint::Color(fill),
        stroke: Some(d.node_stroke_color.clone()),
        stroke_width: defaults::NODE_STROKE_WIDTH,
    });

    let center = node.anchor();
    group.push(TextCommand {
        x: center.x,
        // Baseline placed so the text sits visually centered.
        y: center.y + d.font_size_px * 0.35,
        content: node.label.clone(),
        anchor: TextAnchor::Middle,
        font_size: d.font_size_px,
        fill: d.text_color.clone(),
    });
    group
}

fn render_edge(
    ctx: &RenderContext<'_>,
    edge: &Edge,
    from: &Node,
    to: &Node,
) -> Result<GroupCommand, RenderError> {
    let d = &ctx.diagram.defaults;
    let style = ctx.style(edge.style_name.as_deref());
    if edge.style_name.is_some() && style.is_none() {
        debug!(style = ?edge.style_name, "edge style not found, using defaults");
    }
    let pattern = WidthPattern::from_style(style, d.stroke_width);

    let mut group = GroupCommand::new("edge");
    group.link = link_for(ctx.links, &ctx.diagram.links.edge, edge.link_params.as_deref());

    let segments = plan_edge(edge, from, to, ctx.values);
    debug!(
        edge = %edge.title(),
        segments = segments.len(),
        strokes = pattern.stroke_count(),
        bent = edge.bend.is_some(),
        "planned edge"
    );

    for planned in segments {
        let paint = segment_paint(planned.value, &ctx.diagram.gradient, style);
        let strokes = offset_strokes(&planned.segment, &pattern)
            .ok_or_else(|| RenderError::DegenerateEdgeGeometry { edge: edge.title() })?;

        let class = if paint.measured {
            "edge-segment"
        } else {
            "edge-segment unmeasured"
        };
        let mut part = GroupCommand::new(class);
        part.title = Some(match planned.value {
            Some(v) => format!("{}: {}", planned.title, format_value(v, d.value_decimals)),
            None => planned.title.clone(),
        });
        for stroke in strokes {
            part.push(PathCommand {
                segment: stroke.segment,
                stroke: paint.stroke.clone(),
                stroke_width: stroke.width,
                dash: paint.dash.clone(),
            });
        }

        if d.show_numbers {
            if let Some(v) = planned.value {
                let at = planned.segment.midpoint();
                part.push(TextCommand {
                    x: at.x,
                    y: at.y + d.font_size_px * 0.35,
                    content: format_value(v, d.value_decimals),
                    anchor: TextAnchor::Middle,
                    font_size: d.font_size_px,
                    fill: d.text_color.clone(),
                });
            }
        }
        group.push(part);
    }
    Ok(group)
}

fn render_legend(
    ctx: &RenderContext<'_>,
    layout: &LegendLayout,
) -> (Option<GradientRamp>, GroupCommand) {
    let d = &ctx.diagram.defaults;
    let mut group = GroupCommand::new("legend");
    let mut ramp = None;

    match &layout.body {
        LegendBody::Ramp(stops) => {
            let bar = layout.bar();
            ramp = Some(GradientRamp {
                id: LEGEND_RAMP_ID.to_string(),
                vertical: layout.legend.placement.is_vertical(),
                stops: stops.clone(),
            });
            group.push(RectCommand {
                x: bar.x,
                y: bar.y,
                width: bar.width,
                height: bar.height,
                fill: Paint::Ramp(LEGEND_RAMP_ID.to_string()),
                stroke: None,
                stroke_width: 0.0,
            });
        }
        LegendBody::Steps(swatches) => {
            for swatch in swatches {
                let r = layout.span_rect(swatch.start, swatch.end);
                group.push(RectCommand {
                    x: r.x,
                    y: r.y,
                    width: r.width,
                    height: r.height,
                    fill: Paint::Color(swatch.color.clone()),
                    stroke: None,
                    stroke_width: 0.0,
                });
            }
        }
    }

    for label in &layout.labels {
        group.push(TextCommand {
            x: label.x,
            y: label.y,
            content: label.text.clone(),
            anchor: label.anchor,
            font_size: d.font_size_px,
            fill: d.text_color.clone(),
        });
    }
    (ramp, group)
}

fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Bend, Gradient, GradientKind, GradientStop, Legend, LegendPlacement, Style,
    };
    use super::link::DirectLinks;

    fn diagram() -> Diagram {
        let mut a = Node::new("a", 0.0, 0.0, 50.0, 20.0);
        a.metric_name = Some("cpu".into());
        let b = Node::new("b", 100.0, 0.0, 50.0, 20.0);
        let mut edge = Edge::new("a", "b");
        edge.metric_name = Some("cpu".into());
        Diagram {
            nodes: vec![a, b],
            edges: vec![edge],
            gradient: Gradient::new(
                GradientKind::Linear,
                vec![
                    GradientStop::new(0.0, "#000000", "#000000"),
                    GradientStop::new(100.0, "#ffffff", "#ffffff"),
                ],
            ),
            ..Diagram::default()
        }
    }

    fn values() -> MetricValues {
        [("cpu", 75.0)].into_iter().collect()
    }

    fn edge_paths(scene: &Scene) -> Vec<&PathCommand> {
        let mut out = Vec::new();
        for group in scene.groups("edge") {
            for child in &group.children {
                if let DrawCommand::Group(part) = child {
                    for c in &part.children {
                        if let DrawCommand::Path(p) = c {
                            out.push(p);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn scenario_single_straight_edge() {
        let scene = render(&diagram(), &values(), &DirectLinks).unwrap();
        let paths = edge_paths(&scene);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].data(), "M 25 10 L 125 10");
        assert_eq!(paths[0].stroke, "rgb(191, 191, 191)");
        assert_eq!(paths[0].stroke_width, defaults::STROKE_WIDTH);
        assert_eq!(paths[0].dash, None);
    }

    #[test]
    fn nodes_are_filled_from_the_gradient() {
        let scene = render(&diagram(), &values(), &DirectLinks).unwrap();
        let nodes: Vec<_> = scene.groups("node").collect();
        assert_eq!(nodes.len(), 2);
        let DrawCommand::Rect(rect) = &nodes[0].children[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.fill, Paint::Color("rgb(191, 191, 191)".into()));
        assert_eq!(nodes[0].title.as_deref(), Some("a: 75.00"));
        let DrawCommand::Rect(rect) = &nodes[1].children[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.fill, Paint::Color(defaults::UNMEASURED_FILL.into()));
    }

    #[test]
    fn unknown_node_edges_are_dropped() {
        let mut d = diagram();
        d.edges.push(Edge::new("a", "nowhere"));
        let scene = render(&d, &values(), &DirectLinks).unwrap();
        assert_eq!(scene.groups("edge").count(), 1);
    }

    #[test]
    fn multistroke_on_coincident_nodes_is_an_error() {
        let mut d = diagram();
        d.nodes.push(Node::new("c", 0.0, 0.0, 50.0, 20.0));
        let mut edge = Edge::new("a", "c");
        edge.style_name = Some("double".into());
        d.edges.push(edge);
        d.styles.insert(
            "double".into(),
            Style {
                name: "double".into(),
                stroke_widths: Some(vec![2.0, 1.0]),
                dash_array: None,
            },
        );
        assert_eq!(
            render(&d, &values(), &DirectLinks),
            Err(RenderError::DegenerateEdgeGeometry { edge: "a \u{2194} c".into() })
        );
    }

    #[test]
    fn value_labels_sit_on_segment_midpoints() {
        let mut d = diagram();
        d.defaults.show_numbers = true;
        d.edges[0].metric2_name = Some("cpu".into());
        let scene = render(&d, &values(), &DirectLinks).unwrap();
        let edge = scene.groups("edge").next().unwrap();
        let labels: Vec<&TextCommand> = edge
            .children
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Group(part) => part.children.iter().find_map(|c| match c {
                    DrawCommand::Text(t) => Some(t),
                    _ => None,
                }),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].x, 50.0);
        assert_eq!(labels[1].x, 100.0);
        assert_eq!(labels[0].content, "75.00");
    }

    #[test]
    fn huge_bend_direction_still_renders() {
        for direction in [1e20, -1e20, f64::MAX] {
            let mut d = diagram();
            d.edges[0].bend = Some(Bend {
                direction,
                magnitude: 10.0,
            });
            let scene = render(&d, &values(), &DirectLinks).unwrap();
            let paths = edge_paths(&scene);
            assert_eq!(paths.len(), 1);
            let seg = paths[0].segment;
            for c in [seg.control1, seg.control2] {
                let c = c.unwrap();
                assert!(c.is_finite(), "{direction}: {c:?}");
            }
        }
    }

    #[test]
    fn linear_legend_adds_a_ramp() {
        let mut d = diagram();
        d.legend = Legend {
            placement: LegendPlacement::Below,
            ..Legend::default()
        };
        let scene = render(&d, &values(), &DirectLinks).unwrap();
        assert_eq!(scene.ramps.len(), 1);
        assert_eq!(scene.ramps[0].id, LEGEND_RAMP_ID);
        assert_eq!(scene.groups("legend").count(), 1);
    }
}

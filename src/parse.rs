//! Loading and validating weathermap configurations.
//!
//! JSON is deserialized into [`crate::config`] and then checked field by field
//! into a [`Diagram`]. This is the only place strings turn into numbers:
//! coordinates written as strings, stroke-width and dash lists (via the pest
//! grammar in `weathermap.pest`), and metric values.

use std::collections::HashMap;

use pest::Parser;
use pest_derive::Parser;

use crate::config::*;
use crate::errors::{ConfigError, SourceContext};
use crate::log::{debug, warn};
use crate::model::*;
use crate::render::defaults;
use crate::types::{finite, non_negative};

#[derive(Parser)]
#[grammar = "weathermap.pest"]
pub struct WeathermapParser;

/// Parse a list of non-negative numbers separated by spaces and/or commas.
///
/// Blank input is `Ok(None)`.
pub fn parse_number_list(input: &str) -> Result<Option<Vec<f64>>, Box<pest::error::Error<Rule>>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let pairs = WeathermapParser::parse(Rule::number_list, input).map_err(Box::new)?;
    let mut numbers = Vec::new();
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::number {
            // The grammar only admits plain decimals, which always parse.
            if let Ok(n) = pair.as_str().parse::<f64>() {
                numbers.push(n);
            }
        }
    }
    Ok(Some(numbers))
}

/// Parse a configuration document.
pub fn parse_config(name: &str, source: &str) -> Result<Diagram, ConfigError> {
    let ctx = SourceContext::new(name, source);
    let config: WeathermapConfig = serde_json::from_str(source).map_err(|e| ConfigError::Json {
        message: e.to_string(),
        src: ctx.named_source(),
        span: ctx.location(e.line(), e.column()),
    })?;
    build_diagram(&ctx, config)
}

/// Parse a `{ "metric": value }` document. `null` entries mean "no data".
pub fn parse_values(name: &str, source: &str) -> Result<MetricValues, ConfigError> {
    let ctx = SourceContext::new(name, source);
    let raw: HashMap<String, Option<Numeric>> =
        serde_json::from_str(source).map_err(|e| ConfigError::Json {
            message: e.to_string(),
            src: ctx.named_source(),
            span: ctx.location(e.line(), e.column()),
        })?;

    let mut values = MetricValues::new();
    for (metric, value) in raw {
        let Some(value) = value else { continue };
        match value.value().map(finite) {
            Some(Ok(v)) => values.insert(metric, v),
            _ => {
                return Err(ConfigError::InvalidMetricValue {
                    span: ctx.find(&format!("\"{}\"", metric)),
                    name: metric,
                    src: ctx.named_source(),
                });
            }
        }
    }
    debug!(count = values.len(), "parsed metric values");
    Ok(values)
}

/// Validate a deserialized configuration.
pub fn build_diagram(
    ctx: &SourceContext,
    config: WeathermapConfig,
) -> Result<Diagram, ConfigError> {
    let checker = Checker { ctx };

    let mut nodes: Vec<Node> = Vec::with_capacity(config.nodes.len());
    let mut by_label: HashMap<String, usize> = HashMap::with_capacity(config.nodes.len());
    for n in config.nodes {
        let node = Node {
            x: checker.number("x", &n.x)?,
            y: checker.number("y", &n.y)?,
            width: checker.size("width", &n.width)?,
            height: checker.size("height", &n.height)?,
            metric_name: non_blank(n.metric_name),
            link_params: non_blank(n.link_params),
            label: n.label,
        };
        match by_label.get(&node.label) {
            Some(&index) => {
                warn!(label = %node.label, "duplicate node label, later node wins");
                nodes[index] = node;
            }
            None => {
                by_label.insert(node.label.clone(), nodes.len());
                nodes.push(node);
            }
        }
    }

    let mut edges = Vec::with_capacity(config.edges.len());
    for e in config.edges {
        let direction = checker.optional("bendDirection", e.bend_direction.as_ref())?;
        let magnitude = checker.optional("bendMagnitude", e.bend_magnitude.as_ref())?;
        edges.push(Edge {
            node1: e.node1,
            node2: e.node2,
            bend: Bend::from_parts(direction, magnitude),
            metric_name: non_blank(e.metric_name),
            metric2_name: non_blank(e.metric2_name),
            style_name: non_blank(e.style_name),
            link_params: non_blank(e.link_params),
        });
    }

    let mut styles = HashMap::with_capacity(config.styles.len());
    for s in config.styles {
        let stroke_widths =
            checker.number_list("strokeWidthArray", &s.name, s.stroke_width_array.as_deref())?;
        let dash_array = checker.number_list("dashArray", &s.name, s.dash_array.as_deref())?;
        if styles.contains_key(&s.name) {
            warn!(style = %s.name, "duplicate style name, later style wins");
        }
        styles.insert(
            s.name.clone(),
            Style {
                name: s.name,
                stroke_widths,
                dash_array,
            },
        );
    }

    let mut stops = Vec::with_capacity(config.gradient.stops.len());
    for stop in config.gradient.stops {
        stops.push(GradientStop {
            position: checker.number("position", &stop.position)?,
            stroke_color: stop.stroke_color,
            fill_color: stop.fill_color,
            show_legend_label: stop.show_legend_label,
        });
    }
    let kind = match config.gradient.kind {
        GradientKindConfig::Linear => GradientKind::Linear,
        GradientKindConfig::Steps => GradientKind::Steps,
        GradientKindConfig::Unknown => GradientKind::Unknown,
    };
    let gradient = Gradient::new(kind, stops);

    let legend = Legend {
        placement: match config.legend.placement {
            LegendPlacementConfig::Hidden => LegendPlacement::Hidden,
            LegendPlacementConfig::Above => LegendPlacement::Above,
            LegendPlacementConfig::Below => LegendPlacement::Below,
            LegendPlacementConfig::Left => LegendPlacement::Left,
            LegendPlacementConfig::Right => LegendPlacement::Right,
        },
        x: checker.optional("legend.x", config.legend.x.as_ref())?.unwrap_or(0.0),
        y: checker.optional("legend.y", config.legend.y.as_ref())?.unwrap_or(0.0),
        length: checker
            .optional_size("legend.length", config.legend.length.as_ref())?
            .unwrap_or(defaults::LEGEND_LENGTH),
        width: checker
            .optional_size("legend.width", config.legend.width.as_ref())?
            .unwrap_or(defaults::LEGEND_WIDTH),
    };

    let d = config.defaults;
    let text_defaults = Defaults {
        stroke_width: checker
            .optional_size("strokeWidth", d.stroke_width.as_ref())?
            .unwrap_or(defaults::STROKE_WIDTH),
        font_size_px: checker
            .optional_size("fontSizePx", d.font_size_px.as_ref())?
            .unwrap_or(defaults::FONT_SIZE_PX),
        text_color: d.text_color.unwrap_or_else(|| defaults::TEXT_COLOR.to_string()),
        node_stroke_color: d
            .node_stroke_color
            .unwrap_or_else(|| defaults::NODE_STROKE_COLOR.to_string()),
        show_numbers: d.show_numbers,
        value_decimals: d.value_decimals.unwrap_or(defaults::VALUE_DECIMALS),
    };

    let diagram = Diagram {
        width: checker
            .optional_size("canvas.width", config.canvas.width.as_ref())?
            .unwrap_or(defaults::CANVAS_WIDTH),
        height: checker
            .optional_size("canvas.height", config.canvas.height.as_ref())?
            .unwrap_or(defaults::CANVAS_HEIGHT),
        nodes,
        edges,
        styles,
        gradient,
        legend,
        links: Links {
            node: link_settings(config.link.node),
            edge: link_settings(config.link.edge),
        },
        defaults: text_defaults,
    };

    debug!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        styles = diagram.styles.len(),
        stops = diagram.gradient.stops.len(),
        "configuration loaded"
    );
    Ok(diagram)
}

fn link_settings(link: LinkConfig) -> LinkSettings {
    LinkSettings {
        kind: match link.kind {
            LinkKindConfig::None => LinkKind::None,
            LinkKindConfig::Dashboard => LinkKind::Dashboard,
            LinkKindConfig::Absolute => LinkKind::Absolute,
        },
        dashboard: non_blank(link.dashboard),
        dash_uri: non_blank(link.dash_uri),
        absolute_uri: non_blank(link.absolute_uri),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Field validation with diagnostics pointing into the source document.
struct Checker<'a> {
    ctx: &'a SourceContext,
}

impl Checker<'_> {
    fn invalid(&self, field: &str, raw: &Numeric) -> ConfigError {
        let written = raw.as_written();
        ConfigError::InvalidNumber {
            field: field.to_string(),
            span: self.ctx.find(&written),
            value: written,
            src: self.ctx.named_source(),
        }
    }

    fn number(&self, field: &str, raw: &Numeric) -> Result<f64, ConfigError> {
        raw.value()
            .and_then(|v| finite(v).ok())
            .ok_or_else(|| self.invalid(field, raw))
    }

    fn size(&self, field: &str, raw: &Numeric) -> Result<f64, ConfigError> {
        raw.value()
            .and_then(|v| non_negative(v).ok())
            .ok_or_else(|| self.invalid(field, raw))
    }

    fn optional(&self, field: &str, raw: Option<&Numeric>) -> Result<Option<f64>, ConfigError> {
        match raw {
            None => Ok(None),
            // An empty string is how form-based editors write "unset".
            Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => self.number(field, raw).map(Some),
        }
    }

    fn optional_size(
        &self,
        field: &str,
        raw: Option<&Numeric>,
    ) -> Result<Option<f64>, ConfigError> {
        match raw {
            None => Ok(None),
            Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => self.size(field, raw).map(Some),
        }
    }

    fn number_list(
        &self,
        kind: &'static str,
        style: &str,
        raw: Option<&str>,
    ) -> Result<Option<Vec<f64>>, ConfigError> {
        let Some(raw) = raw else { return Ok(None) };
        parse_number_list(raw).map_err(|e| {
            let at = match e.location {
                pest::error::InputLocation::Pos(p) => p,
                pest::error::InputLocation::Span((start, _)) => start,
            };
            let base = self.ctx.source.find(raw).unwrap_or(0);
            ConfigError::InvalidWidthList {
                kind,
                style: style.to_string(),
                src: self.ctx.named_source(),
                span: miette::SourceSpan::new((base + at).into(), 1),
            }
        })
    }
}

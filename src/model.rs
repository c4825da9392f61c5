//! Validated weathermap configuration.
//!
//! A [`Diagram`] is built once by [`crate::parse`] and then only read. Every
//! geometric field is a finite `f64`, gradient stops are sorted, and
//! width/dash lists are already parsed.

use std::collections::HashMap;

use glam::{DVec2, dvec2};

use crate::render::defaults;

/// Which color of a gradient stop to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Stroke,
    Fill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub stroke_color: String,
    pub fill_color: String,
    pub show_legend_label: bool,
}

impl GradientStop {
    pub fn new(
        position: f64,
        stroke_color: impl Into<String>,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            position,
            stroke_color: stroke_color.into(),
            fill_color: fill_color.into(),
            show_legend_label: false,
        }
    }

    pub fn color(&self, channel: Channel) -> &str {
        match channel {
            Channel::Stroke => &self.stroke_color,
            Channel::Fill => &self.fill_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    /// Channel-wise interpolation between bracketing stops
    Linear,
    /// Lower bracketing stop's color, verbatim
    Steps,
    /// Unrecognized type string; always resolves to the emergency color
    Unknown,
}

/// A value-to-color gradient. Stops are sorted ascending by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient, sorting the stops by position (stable).
    pub fn new(kind: GradientKind, mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { kind, stops }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub metric_name: Option<String>,
    pub link_params: Option<String>,
}

impl Node {
    pub fn new(label: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            width,
            height,
            metric_name: None,
            link_params: None,
        }
    }

    /// Center of the node's rectangle; edges attach here.
    pub fn anchor(&self) -> DVec2 {
        dvec2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Curvature applied to an edge: the direction each end leaves its node,
/// relative to the straight line, and how far the control points reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bend {
    /// Degrees
    pub direction: f64,
    pub magnitude: f64,
}

impl Bend {
    /// A bend only exists when both parameters are nonzero.
    pub fn from_parts(direction: Option<f64>, magnitude: Option<f64>) -> Option<Bend> {
        match (direction, magnitude) {
            (Some(direction), Some(magnitude)) if direction != 0.0 && magnitude != 0.0 => {
                Some(Bend { direction, magnitude })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub node1: String,
    pub node2: String,
    pub bend: Option<Bend>,
    pub metric_name: Option<String>,
    pub metric2_name: Option<String>,
    pub style_name: Option<String>,
    pub link_params: Option<String>,
}

impl Edge {
    pub fn new(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            bend: None,
            metric_name: None,
            metric2_name: None,
            style_name: None,
            link_params: None,
        }
    }

    /// `"node1 ↔ node2"`
    pub fn title(&self) -> String {
        format!("{} \u{2194} {}", self.node1, self.node2)
    }
}

/// Named edge style override.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub name: String,
    /// Alternating stroke/gap widths, as written (not yet self-completed)
    pub stroke_widths: Option<Vec<f64>>,
    pub dash_array: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPlacement {
    #[default]
    Hidden,
    Above,
    Below,
    Left,
    Right,
}

impl LegendPlacement {
    pub fn is_vertical(self) -> bool {
        matches!(self, LegendPlacement::Left | LegendPlacement::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Legend {
    pub placement: LegendPlacement,
    pub x: f64,
    pub y: f64,
    /// Extent along the value axis
    pub length: f64,
    /// Thickness across the value axis
    pub width: f64,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            placement: LegendPlacement::Hidden,
            x: 0.0,
            y: 0.0,
            length: defaults::LEGEND_LENGTH,
            width: defaults::LEGEND_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkKind {
    #[default]
    None,
    Dashboard,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkSettings {
    pub kind: LinkKind,
    pub dashboard: Option<String>,
    pub dash_uri: Option<String>,
    pub absolute_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Links {
    pub node: LinkSettings,
    pub edge: LinkSettings,
}

/// Text and stroke defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub stroke_width: f64,
    pub font_size_px: f64,
    pub text_color: String,
    pub node_stroke_color: String,
    pub show_numbers: bool,
    pub value_decimals: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            stroke_width: defaults::STROKE_WIDTH,
            font_size_px: defaults::FONT_SIZE_PX,
            text_color: defaults::TEXT_COLOR.to_string(),
            node_stroke_color: defaults::NODE_STROKE_COLOR.to_string(),
            show_numbers: false,
            value_decimals: defaults::VALUE_DECIMALS,
        }
    }
}

/// A complete, validated weathermap.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub styles: HashMap<String, Style>,
    pub gradient: Gradient,
    pub legend: Legend,
    pub links: Links,
    pub defaults: Defaults,
}

impl Default for Diagram {
    fn default() -> Self {
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            nodes: Vec::new(),
            edges: Vec::new(),
            styles: HashMap::new(),
            gradient: Gradient::new(GradientKind::Linear, Vec::new()),
            legend: Legend::default(),
            links: Links::default(),
            defaults: Defaults::default(),
        }
    }
}

/// Current metric values, already aggregated upstream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricValues(HashMap<String, f64>);

impl MetricValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Value for an optional metric name; `None` means "no data".
    pub fn lookup(&self, name: Option<&str>) -> Option<f64> {
        name.and_then(|n| self.0.get(n).copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        MetricValues(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

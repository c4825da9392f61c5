//! Serde model of the JSON configuration document.
//!
//! These types mirror the document as written. Nothing here is trusted by
//! the renderer: `parse` validates them into the types in [`crate::model`].

use serde::Deserialize;

/// A number that may have been written as a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Parsed value, if any. Whitespace around numeric strings is ignored.
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// The value as written, for diagnostics.
    pub fn as_written(&self) -> String {
        match self {
            Numeric::Number(n) => n.to_string(),
            Numeric::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeathermapConfig {
    pub canvas: CanvasConfig,
    pub nodes: Vec<NodeConfig>,
    pub edges: Vec<EdgeConfig>,
    pub styles: Vec<StyleConfig>,
    pub gradient: GradientConfig,
    pub legend: LegendConfig,
    pub link: LinksConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub width: Option<Numeric>,
    pub height: Option<Numeric>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub label: String,
    pub x: Numeric,
    pub y: Numeric,
    pub width: Numeric,
    pub height: Numeric,
    #[serde(default)]
    pub metric_name: Option<String>,
    #[serde(default)]
    pub link_params: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeConfig {
    pub node1: String,
    pub node2: String,
    #[serde(default)]
    pub bend_direction: Option<Numeric>,
    #[serde(default)]
    pub bend_magnitude: Option<Numeric>,
    #[serde(default)]
    pub metric_name: Option<String>,
    #[serde(default)]
    pub metric2_name: Option<String>,
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub link_params: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub name: String,
    #[serde(default)]
    pub stroke_width_array: Option<String>,
    #[serde(default)]
    pub dash_array: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientConfig {
    #[serde(rename = "type")]
    pub kind: GradientKindConfig,
    pub stops: Vec<StopConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKindConfig {
    #[default]
    Linear,
    Steps,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopConfig {
    pub position: Numeric,
    pub stroke_color: String,
    pub fill_color: String,
    #[serde(default)]
    pub show_legend_label: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendConfig {
    #[serde(rename = "type")]
    pub placement: LegendPlacementConfig,
    pub x: Option<Numeric>,
    pub y: Option<Numeric>,
    pub length: Option<Numeric>,
    pub width: Option<Numeric>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPlacementConfig {
    #[default]
    #[serde(alias = "", alias = "none")]
    Hidden,
    Above,
    Below,
    Left,
    Right,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinksConfig {
    pub node: LinkConfig,
    pub edge: LinkConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkConfig {
    #[serde(rename = "type")]
    pub kind: LinkKindConfig,
    pub dashboard: Option<String>,
    pub dash_uri: Option<String>,
    pub absolute_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKindConfig {
    #[default]
    None,
    Dashboard,
    Absolute,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultsConfig {
    pub stroke_width: Option<Numeric>,
    pub font_size_px: Option<Numeric>,
    pub text_color: Option<String>,
    pub node_stroke_color: Option<String>,
    pub show_numbers: bool,
    pub value_decimals: Option<usize>,
}

//! Default sizes, colors and sentinel values (all in pixels)

/// Returned whenever a gradient cannot produce a color.
pub const EMERGENCY_COLOR: &str = "#ff00ff";

/// Stroke color of an edge segment without data
pub const UNMEASURED_STROKE: &str = "#808080";
/// Dash pattern of an edge segment without data
pub const UNMEASURED_DASH: &[f64] = &[4.0, 4.0];
/// Fill of a node without data
pub const UNMEASURED_FILL: &str = "#e0e0e0";

pub const STROKE_WIDTH: f64 = 4.0;
pub const NODE_STROKE_WIDTH: f64 = 1.0;
pub const NODE_STROKE_COLOR: &str = "#000000";
pub const TEXT_COLOR: &str = "#000000";
pub const FONT_SIZE_PX: f64 = 12.0;
pub const VALUE_DECIMALS: usize = 2;

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Logical extent of a legend; stop positions are percentages of it.
pub const LEGEND_LOGICAL_LENGTH: f64 = 100.0;
pub const LEGEND_LENGTH: f64 = 200.0;
pub const LEGEND_WIDTH: f64 = 10.0;
/// Space between a legend bar and its labels
pub const LEGEND_LABEL_GAP: f64 = 4.0;

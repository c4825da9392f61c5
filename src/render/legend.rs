//! Legend layout for the value gradient.
//!
//! Swatches are laid out on a logical axis of [`LEGEND_LOGICAL_LENGTH`] units,
//! where a stop's position is its offset. [`LegendLayout::span_rect`] scales
//! them onto the legend's physical rectangle.

use crate::model::{Channel, Gradient, GradientKind, Legend, LegendPlacement};

use super::defaults::{LEGEND_LABEL_GAP, LEGEND_LOGICAL_LENGTH};
use super::geometry::fmt_coord;
use super::types::{RampStop, TextAnchor};

/// A stepped swatch on the logical axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub start: f64,
    pub end: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendBody {
    /// One continuous ramp
    Ramp(Vec<RampStop>),
    /// Discrete rectangles
    Steps(Vec<Swatch>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
}

/// A physical rectangle of the legend bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub legend: Legend,
    pub body: LegendBody,
    pub labels: Vec<LegendLabel>,
}

impl LegendLayout {
    /// Lay out `gradient` for `legend`. Returns `None` for a hidden legend.
    pub fn new(gradient: &Gradient, legend: &Legend, font_size: f64) -> Option<LegendLayout> {
        if legend.placement == LegendPlacement::Hidden {
            return None;
        }
        let stops = &gradient.stops;

        let body = match gradient.kind {
            GradientKind::Linear => LegendBody::Ramp(
                stops
                    .iter()
                    .map(|s| RampStop {
                        offset_percent: s.position / LEGEND_LOGICAL_LENGTH * 100.0,
                        color: s.color(Channel::Fill).to_string(),
                    })
                    .collect(),
            ),
            GradientKind::Steps | GradientKind::Unknown => {
                let mut swatches: Vec<Swatch> = stops
                    .windows(2)
                    .map(|w| Swatch {
                        start: w[0].position,
                        end: w[1].position,
                        color: w[0].color(Channel::Fill).to_string(),
                    })
                    .collect();
                if let Some(last) = stops.last() {
                    swatches.push(Swatch {
                        start: last.position,
                        end: LEGEND_LOGICAL_LENGTH,
                        color: last.color(Channel::Fill).to_string(),
                    });
                }
                swatches.retain(|s| s.end > s.start);
                LegendBody::Steps(swatches)
            }
        };

        let scale = legend.length / LEGEND_LOGICAL_LENGTH;
        let labels = stops
            .iter()
            .filter(|s| s.show_legend_label)
            .map(|s| {
                let along = s.position * scale;
                let text = fmt_coord(s.position);
                match legend.placement {
                    LegendPlacement::Above => LegendLabel {
                        x: legend.x + along,
                        y: legend.y - LEGEND_LABEL_GAP,
                        text,
                        anchor: TextAnchor::Middle,
                    },
                    LegendPlacement::Below | LegendPlacement::Hidden => LegendLabel {
                        x: legend.x + along,
                        y: legend.y + legend.width + LEGEND_LABEL_GAP + font_size,
                        text,
                        anchor: TextAnchor::Middle,
                    },
                    LegendPlacement::Left => LegendLabel {
                        x: legend.x - LEGEND_LABEL_GAP,
                        y: legend.y + (legend.length - along),
                        text,
                        anchor: TextAnchor::End,
                    },
                    LegendPlacement::Right => LegendLabel {
                        x: legend.x + legend.width + LEGEND_LABEL_GAP,
                        y: legend.y + (legend.length - along),
                        text,
                        anchor: TextAnchor::Start,
                    },
                }
            })
            .collect();

        Some(LegendLayout {
            legend: *legend,
            body,
            labels,
        })
    }

    /// The whole bar, in physical coordinates.
    pub fn bar(&self) -> BarRect {
        let l = &self.legend;
        if l.placement.is_vertical() {
            BarRect {
                x: l.x,
                y: l.y,
                width: l.width,
                height: l.length,
            }
        } else {
            BarRect {
                x: l.x,
                y: l.y,
                width: l.length,
                height: l.width,
            }
        }
    }

    /// Physical rectangle for a span of the logical axis. Vertical legends
    /// grow upwards.
    pub fn span_rect(&self, start: f64, end: f64) -> BarRect {
        let l = &self.legend;
        let scale = l.length / LEGEND_LOGICAL_LENGTH;
        if l.placement.is_vertical() {
            BarRect {
                x: l.x,
                y: l.y + l.length - end * scale,
                width: l.width,
                height: (end - start) * scale,
            }
        } else {
            BarRect {
                x: l.x + start * scale,
                y: l.y,
                width: (end - start) * scale,
                height: l.width,
            }
        }
    }
}

//! Edge geometry: the curve between two nodes and its per-direction halves.

use crate::model::{Bend, Channel, Edge, Gradient, MetricValues, Node, Style};

use super::defaults;
use super::geometry::{BezierSegment, bend_controls};
use super::gradient::color_for;

/// One independently colored piece of an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSegment {
    pub segment: BezierSegment,
    pub title: String,
    pub metric: Option<String>,
    /// `None` when the metric is unset or has no current value
    pub value: Option<f64>,
}

/// The full curve from node1's center to node2's center.
pub fn edge_curve(from: &Node, to: &Node, bend: Option<Bend>) -> BezierSegment {
    let start = from.anchor();
    let end = to.anchor();
    match bend {
        Some(bend) => {
            let (c1, c2) = bend_controls(start, end, bend);
            BezierSegment::curve(start, c1, c2, end)
        }
        None => BezierSegment::line(start, end),
    }
}

/// Plan the drawable segments of an edge.
///
/// A single-metric edge is one segment. With a second metric the curve is
/// split at its midpoint: the half leaving node1 shows `metric_name`, the half
/// leaving node2 shows `metric2_name`.
pub fn plan_edge(edge: &Edge, from: &Node, to: &Node, values: &MetricValues) -> Vec<EdgeSegment> {
    let curve = edge_curve(from, to, edge.bend);

    if edge.metric2_name.is_none() {
        return vec![EdgeSegment {
            segment: curve,
            title: edge.title(),
            metric: edge.metric_name.clone(),
            value: values.lookup(edge.metric_name.as_deref()),
        }];
    }

    let (first, second) = curve.halve();
    vec![
        EdgeSegment {
            segment: first,
            title: format!("{} \u{2192} {}", edge.node1, edge.node2),
            metric: edge.metric_name.clone(),
            value: values.lookup(edge.metric_name.as_deref()),
        },
        EdgeSegment {
            segment: second,
            title: format!("{} \u{2192} {}", edge.node2, edge.node1),
            metric: edge.metric2_name.clone(),
            value: values.lookup(edge.metric2_name.as_deref()),
        },
    ]
}

/// Stroke color and dash pattern for a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPaint {
    pub stroke: String,
    pub dash: Option<Vec<f64>>,
    pub measured: bool,
}

/// Measured segments take their color from the gradient and their dashes from
/// the style; unmeasured ones get the fixed no-data look.
pub fn segment_paint(
    value: Option<f64>,
    gradient: &Gradient,
    style: Option<&Style>,
) -> SegmentPaint {
    match value {
        Some(value) => SegmentPaint {
            stroke: color_for(gradient, Channel::Stroke, value),
            dash: style.and_then(|s| s.dash_array.clone()),
            measured: true,
        },
        None => SegmentPaint {
            stroke: defaults::UNMEASURED_STROKE.to_string(),
            dash: Some(defaults::UNMEASURED_DASH.to_vec()),
            measured: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GradientKind, GradientStop};
    use glam::dvec2;

    fn nodes() -> (Node, Node) {
        (
            Node::new("a", 0.0, 0.0, 50.0, 20.0),
            Node::new("b", 100.0, 0.0, 50.0, 20.0),
        )
    }

    #[test]
    fn straight_single_metric_edge() {
        let (a, b) = nodes();
        let mut edge = Edge::new("a", "b");
        edge.metric_name = Some("cpu".into());
        let values: MetricValues = [("cpu", 75.0)].into_iter().collect();

        let plan = plan_edge(&edge, &a, &b, &values);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].segment, BezierSegment::line(dvec2(25.0, 10.0), dvec2(125.0, 10.0)));
        assert_eq!(plan[0].title, "a \u{2194} b");
        assert_eq!(plan[0].value, Some(75.0));
    }

    #[test]
    fn dual_metric_edge_splits_at_midpoint() {
        let (a, b) = nodes();
        let mut edge = Edge::new("a", "b");
        edge.metric_name = Some("in".into());
        edge.metric2_name = Some("out".into());
        let values: MetricValues = [("out", 3.0)].into_iter().collect();

        let plan = plan_edge(&edge, &a, &b, &values);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].segment.end, dvec2(75.0, 10.0));
        assert_eq!(plan[1].segment.start, dvec2(75.0, 10.0));
        assert_eq!(plan[0].title, "a \u{2192} b");
        assert_eq!(plan[1].title, "b \u{2192} a");
        assert_eq!(plan[0].value, None);
        assert_eq!(plan[1].value, Some(3.0));
        assert_eq!(plan[1].metric.as_deref(), Some("out"));
    }

    #[test]
    fn bent_dual_metric_halves_join_on_the_curve() {
        let (a, b) = nodes();
        let mut edge = Edge::new("a", "b");
        edge.bend = Some(Bend { direction: 45.0, magnitude: 30.0 });
        edge.metric2_name = Some("out".into());

        let curve = edge_curve(&a, &b, edge.bend);
        let plan = plan_edge(&edge, &a, &b, &MetricValues::new());
        assert!(!plan[0].segment.is_line());
        assert!((plan[0].segment.end - curve.point_at(0.5)).length() < 1e-9);
        assert_eq!(plan[0].segment.end, plan[1].segment.start);
    }

    #[test]
    fn unmeasured_segments_get_no_data_look() {
        let gradient = Gradient::new(
            GradientKind::Linear,
            vec![GradientStop::new(0.0, "#000000", "#000000")],
        );
        let style = Style {
            name: "s".into(),
            stroke_widths: None,
            dash_array: Some(vec![1.0, 2.0]),
        };
        let paint = segment_paint(None, &gradient, Some(&style));
        assert!(!paint.measured);
        assert_eq!(paint.stroke, defaults::UNMEASURED_STROKE);
        assert_eq!(paint.dash.as_deref(), Some(defaults::UNMEASURED_DASH));

        let paint = segment_paint(Some(5.0), &gradient, Some(&style));
        assert!(paint.measured);
        assert_eq!(paint.stroke, "#000000");
        assert_eq!(paint.dash, Some(vec![1.0, 2.0]));
    }
}

//! Multistroke layout: one logical edge drawn as parallel offset strokes.

use crate::model::Style;
use crate::types::unit;

use super::geometry::BezierSegment;

/// Alternating stroke/gap widths, always of odd length so it starts and ends
/// on a stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthPattern(Vec<f64>);

impl WidthPattern {
    /// The style's `strokeWidthArray`, or a single stroke of `default_width`.
    ///
    /// An even-length list is repeated once, the way SVG completes dash arrays.
    pub fn from_style(style: Option<&Style>, default_width: f64) -> Self {
        match style.and_then(|s| s.stroke_widths.as_deref()) {
            Some(widths) if !widths.is_empty() => Self::new(widths.to_vec()),
            _ => WidthPattern(vec![default_width]),
        }
    }

    pub fn new(mut widths: Vec<f64>) -> Self {
        if widths.len() % 2 == 0 {
            widths.extend_from_within(..);
        }
        WidthPattern(widths)
    }

    pub fn widths(&self) -> &[f64] {
        &self.0
    }

    pub fn stroke_count(&self) -> usize {
        self.0.len().div_ceil(2)
    }

    /// Sum of the stroke entries (gaps excluded).
    pub fn total_stroke_width(&self) -> f64 {
        self.0.iter().step_by(2).sum()
    }
}

/// One drawable stroke of a multistroke edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetStroke {
    pub width: f64,
    pub segment: BezierSegment,
}

/// Lay out the strokes of `pattern` side by side across `segment`.
///
/// Returns `None` when more than one stroke is needed but the segment's chord
/// has zero length, so there is no direction to offset along.
pub fn offset_strokes(
    segment: &BezierSegment,
    pattern: &WidthPattern,
) -> Option<Vec<OffsetStroke>> {
    let widths = pattern.widths();
    if let [width] = widths {
        return Some(vec![OffsetStroke {
            width: *width,
            segment: *segment,
        }]);
    }

    let axis = unit(segment.chord().perp())?;

    let mut strokes = Vec::with_capacity(pattern.stroke_count());
    let mut offset = -pattern.total_stroke_width() / 2.0;
    for (i, &width) in widths.iter().enumerate() {
        if i % 2 == 1 {
            offset += width;
            continue;
        }
        let centerline = offset + width / 2.0;
        strokes.push(OffsetStroke {
            width,
            segment: segment.translated(axis * centerline),
        });
        offset += width;
    }
    Some(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, dvec2};

    fn stroke_offset(base: &BezierSegment, stroke: &OffsetStroke) -> DVec2 {
        stroke.segment.start - base.start
    }

    fn style(widths: &[f64]) -> Style {
        Style {
            name: "s".into(),
            stroke_widths: Some(widths.to_vec()),
            dash_array: None,
        }
    }

    #[test]
    fn default_pattern_is_single_stroke() {
        let p = WidthPattern::from_style(None, 4.0);
        assert_eq!(p.widths(), &[4.0]);
        let s = Style::default();
        assert_eq!(WidthPattern::from_style(Some(&s), 3.0).widths(), &[3.0]);
    }

    #[test]
    fn even_pattern_self_completes() {
        let p = WidthPattern::from_style(Some(&style(&[2.0, 1.0])), 4.0);
        assert_eq!(p.widths(), &[2.0, 1.0, 2.0, 1.0]);
        assert_eq!(p.stroke_count(), 2);
        assert_eq!(p.total_stroke_width(), 4.0);
    }

    #[test]
    fn odd_pattern_is_kept() {
        let p = WidthPattern::new(vec![2.0, 1.0, 3.0]);
        assert_eq!(p.widths(), &[2.0, 1.0, 3.0]);
        assert_eq!(p.stroke_count(), 2);
    }

    #[test]
    fn single_stroke_is_the_segment() {
        let seg = BezierSegment::line(dvec2(0.0, 0.0), dvec2(10.0, 0.0));
        let strokes = offset_strokes(&seg, &WidthPattern::new(vec![4.0])).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].width, 4.0);
        assert_eq!(strokes[0].segment, seg);
    }

    #[test]
    fn single_stroke_tolerates_coincident_ends() {
        let seg = BezierSegment::line(dvec2(5.0, 5.0), dvec2(5.0, 5.0));
        assert!(offset_strokes(&seg, &WidthPattern::new(vec![4.0])).is_some());
    }

    #[test]
    fn multistroke_needs_a_chord() {
        let seg = BezierSegment::line(dvec2(5.0, 5.0), dvec2(5.0, 5.0));
        assert_eq!(offset_strokes(&seg, &WidthPattern::new(vec![2.0, 1.0, 2.0])), None);
    }

    #[test]
    fn strokes_are_laid_out_in_order() {
        // Horizontal chord start - end = (-10, 0); perp = (0, -10); axis = (0, -1).
        let seg = BezierSegment::line(dvec2(0.0, 0.0), dvec2(10.0, 0.0));
        let strokes = offset_strokes(&seg, &WidthPattern::new(vec![2.0, 1.0, 2.0])).unwrap();
        assert_eq!(strokes.len(), 2);
        // total = 4, start at -2: first centered at -1, gap to 1, second at 2.
        assert_eq!(stroke_offset(&seg, &strokes[0]), dvec2(0.0, 1.0));
        assert_eq!(stroke_offset(&seg, &strokes[1]), dvec2(0.0, -2.0));
        assert_eq!(strokes[0].width, 2.0);
        assert_eq!(strokes[1].segment.end, dvec2(10.0, -2.0));
    }

    #[test]
    fn curve_controls_are_offset_too() {
        let seg = BezierSegment::curve(
            dvec2(0.0, 0.0),
            dvec2(0.0, 5.0),
            dvec2(10.0, 5.0),
            dvec2(10.0, 0.0),
        );
        let strokes = offset_strokes(&seg, &WidthPattern::new(vec![1.0, 0.0, 1.0])).unwrap();
        assert_eq!(strokes[0].segment.control1, Some(dvec2(0.0, 5.5)));
        assert_eq!(strokes[1].segment.control2, Some(dvec2(10.0, 4.5)));
    }
}

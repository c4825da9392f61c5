//! Curve geometry: Bézier segments, midpoint subdivision and bend control points

use glam::DVec2;

use crate::model::Bend;
use crate::types::{Angle, Polar, midpoint};

/// A cubic Bézier, or a straight line when both controls are absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierSegment {
    pub start: DVec2,
    pub control1: Option<DVec2>,
    pub control2: Option<DVec2>,
    pub end: DVec2,
}

impl BezierSegment {
    pub fn line(start: DVec2, end: DVec2) -> Self {
        Self {
            start,
            control1: None,
            control2: None,
            end,
        }
    }

    pub fn curve(start: DVec2, control1: DVec2, control2: DVec2, end: DVec2) -> Self {
        Self {
            start,
            control1: Some(control1),
            control2: Some(control2),
            end,
        }
    }

    pub fn is_line(&self) -> bool {
        self.control1.is_none() && self.control2.is_none()
    }

    /// Split at t = 0.5. A line splits into two lines.
    pub fn halve(&self) -> (BezierSegment, BezierSegment) {
        let [p1, h1, h2, mid, h3, h4, p2] =
            halve(self.start, self.control1, self.control2, self.end);
        if self.is_line() {
            (BezierSegment::line(p1, mid), BezierSegment::line(mid, p2))
        } else {
            (
                BezierSegment::curve(p1, h1, h2, mid),
                BezierSegment::curve(mid, h3, h4, p2),
            )
        }
    }

    /// The point at t = 0.5.
    pub fn midpoint(&self) -> DVec2 {
        halve(self.start, self.control1, self.control2, self.end)[3]
    }

    /// Point at parameter `t`, missing controls taken as their nearer endpoint.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let c1 = self.control1.unwrap_or(self.start);
        let c2 = self.control2.unwrap_or(self.end);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + c1 * (3.0 * u * u * t)
            + c2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// The same segment moved by `offset`.
    pub fn translated(&self, offset: DVec2) -> BezierSegment {
        BezierSegment {
            start: self.start + offset,
            control1: self.control1.map(|c| c + offset),
            control2: self.control2.map(|c| c + offset),
            end: self.end + offset,
        }
    }

    /// Vector from `end` to `start`.
    pub fn chord(&self) -> DVec2 {
        self.start - self.end
    }

    /// SVG path data: `M x y L x y` for a line, `M x y C c1, c2, end` for a curve.
    pub fn path_data(&self) -> String {
        let p = |v: DVec2| format!("{} {}", fmt_coord(v.x), fmt_coord(v.y));
        if self.is_line() {
            format!("M {} L {}", p(self.start), p(self.end))
        } else {
            let c1 = self.control1.unwrap_or(self.start);
            let c2 = self.control2.unwrap_or(self.end);
            format!("M {} C {}, {}, {}", p(self.start), p(c1), p(c2), p(self.end))
        }
    }
}

/// Format a coordinate rounded to 3 decimals, without trailing zeros or `-0`.
pub fn fmt_coord(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { format!("{}", r) }
}

/// Split a cubic Bézier at its parametric midpoint (de Casteljau).
///
/// Returns `[p1, h1, h2, mid, h3, h4, p2]`: the first half is
/// `p1, h1, h2, mid` and the second `mid, h3, h4, p2`.
///
/// A straight line (no controls) has nothing to preserve, so its interior
/// points collapse onto the endpoints and the midpoint. A single missing
/// control is taken to coincide with its nearer endpoint.
pub fn halve(p1: DVec2, c1: Option<DVec2>, c2: Option<DVec2>, p2: DVec2) -> [DVec2; 7] {
    if c1.is_none() && c2.is_none() {
        let mid = midpoint(p1, p2);
        return [p1, p1, mid, mid, mid, p2, p2];
    }

    let c1 = c1.unwrap_or(p1);
    let c2 = c2.unwrap_or(p2);

    // Midpoints of the control polygon's edges
    let m01 = midpoint(p1, c1);
    let m12 = midpoint(c1, c2);
    let m23 = midpoint(c2, p2);
    // ...of those
    let a = midpoint(m01, m12);
    let b = midpoint(m12, m23);
    // ...and the point on the curve
    let mid = midpoint(a, b);

    [p1, m01, a, mid, b, m23, p2]
}

/// Control points that bend an edge between two anchors.
///
/// Each end leaves its anchor at the direction towards the other anchor,
/// rotated by the bend direction (node1 counter-clockwise, node2 clockwise, so
/// both bulge to the same side), and reaches `magnitude` along it.
pub fn bend_controls(from: DVec2, to: DVec2, bend: Bend) -> (DVec2, DVec2) {
    let rotation = Angle::from_degrees(bend.direction);

    let out1 = Polar::from_screen(to - from).angle.rotated(rotation);
    let out2 = Polar::from_screen(from - to).angle.rotated(Angle(-rotation.0));

    let control1 = from + Polar::new(bend.magnitude, out1).to_screen();
    let control2 = to + Polar::new(bend.magnitude, out2).to_screen();
    (control1, control2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn halving_a_line_collapses_interior_points() {
        let p = halve(dvec2(0.0, 0.0), None, None, dvec2(10.0, 0.0));
        let mid = dvec2(5.0, 0.0);
        assert_eq!(p[3], mid);
        for interior in &p[1..6] {
            assert!(
                *interior == p[0] || *interior == p[6] || *interior == mid,
                "{interior:?} is not an endpoint or the midpoint"
            );
        }
    }

    #[test]
    fn halving_a_line_segment_yields_lines() {
        let (a, b) = BezierSegment::line(dvec2(0.0, 0.0), dvec2(10.0, 4.0)).halve();
        assert!(a.is_line() && b.is_line());
        assert_eq!(a.end, dvec2(5.0, 2.0));
        assert_eq!(b.start, dvec2(5.0, 2.0));
    }

    #[test]
    fn halving_matches_curve_midpoint() {
        let seg = BezierSegment::curve(
            dvec2(0.0, 0.0),
            dvec2(0.0, 10.0),
            dvec2(10.0, 10.0),
            dvec2(10.0, 0.0),
        );
        let [_, h1, h2, mid, h3, h4, _] = halve(seg.start, seg.control1, seg.control2, seg.end);
        assert_close(mid, seg.point_at(0.5));
        assert_close(mid, dvec2(5.0, 7.5));
        assert_close(h1, dvec2(0.0, 5.0));
        assert_close(h2, dvec2(2.5, 7.5));
        assert_close(h3, dvec2(7.5, 7.5));
        assert_close(h4, dvec2(10.0, 5.0));
    }

    #[test]
    fn halves_trace_the_original_curve() {
        let seg = BezierSegment::curve(
            dvec2(1.0, 2.0),
            dvec2(30.0, -20.0),
            dvec2(60.0, 45.0),
            dvec2(90.0, 5.0),
        );
        let (first, second) = seg.halve();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_close(first.point_at(t), seg.point_at(t / 2.0));
            assert_close(second.point_at(t), seg.point_at(0.5 + t / 2.0));
        }
    }

    #[test]
    fn missing_control_uses_nearer_endpoint() {
        let p1 = dvec2(0.0, 0.0);
        let p2 = dvec2(8.0, 0.0);
        let c2 = dvec2(8.0, 8.0);
        assert_eq!(halve(p1, None, Some(c2), p2), halve(p1, Some(p1), Some(c2), p2));
        let c1 = dvec2(0.0, 8.0);
        assert_eq!(halve(p1, Some(c1), None, p2), halve(p1, Some(c1), Some(p2), p2));
    }

    #[test]
    fn path_data_for_line_and_curve() {
        let line = BezierSegment::line(dvec2(25.0, 10.0), dvec2(125.0, 10.0));
        insta::assert_snapshot!(line.path_data(), @"M 25 10 L 125 10");
        let curve = BezierSegment::curve(
            dvec2(0.0, 0.0),
            dvec2(1.0 / 3.0, -2.0),
            dvec2(4.5, -0.0001),
            dvec2(6.0, 0.0),
        );
        insta::assert_snapshot!(curve.path_data(), @"M 0 0 C 0.333 -2, 4.5 0, 6 0");
    }

    #[test]
    fn translated_moves_every_point() {
        let seg = BezierSegment::curve(
            dvec2(0.0, 0.0),
            dvec2(1.0, 1.0),
            dvec2(2.0, 1.0),
            dvec2(3.0, 0.0),
        );
        let moved = seg.translated(dvec2(0.0, 2.0));
        assert_eq!(moved.start, dvec2(0.0, 2.0));
        assert_eq!(moved.control1, Some(dvec2(1.0, 3.0)));
        assert_eq!(moved.control2, Some(dvec2(2.0, 3.0)));
        assert_eq!(moved.end, dvec2(3.0, 2.0));
    }

    #[test]
    fn bend_bulges_to_one_side() {
        let from = dvec2(0.0, 0.0);
        let to = dvec2(100.0, 0.0);
        let (c1, c2) = bend_controls(from, to, Bend { direction: 90.0, magnitude: 20.0 });
        // Positive direction turns node1's heading counter-clockwise, which is
        // up on screen; node2 mirrors it.
        assert_close(c1, dvec2(0.0, -20.0));
        assert_close(c2, dvec2(100.0, -20.0));
    }

    #[test]
    fn opposite_bends_mirror() {
        let from = dvec2(10.0, 10.0);
        let to = dvec2(110.0, 10.0);
        let (a1, a2) = bend_controls(from, to, Bend { direction: 30.0, magnitude: 40.0 });
        let (b1, b2) = bend_controls(from, to, Bend { direction: -30.0, magnitude: 40.0 });
        assert!((a1.y - 10.0) < 0.0 && (b1.y - 10.0) > 0.0);
        assert!(((a1.y - 10.0) + (b1.y - 10.0)).abs() < 1e-9);
        assert!(((a2.y - 10.0) + (b2.y - 10.0)).abs() < 1e-9);
        assert!((a1.x - b1.x).abs() < 1e-9);
    }

    #[test]
    fn bend_across_the_pi_boundary() {
        // Heading from node1 is 180 degrees; rotating by 30 must wrap.
        let bend = Bend {
            direction: 30.0,
            magnitude: 10.0,
        };
        let (c1, _) = bend_controls(dvec2(100.0, 0.0), dvec2(0.0, 0.0), bend);
        let heading = 210f64.to_radians();
        let expected = dvec2(100.0 + 10.0 * heading.cos(), -10.0 * heading.sin());
        assert_close(c1, expected);
    }
}

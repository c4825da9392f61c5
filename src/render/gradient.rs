//! Value-to-color resolution.
//!
//! Stops must already be sorted ascending by position; see [`Gradient::new`].

use crate::log::debug;
use crate::model::{Channel, Gradient, GradientKind, GradientStop};

use super::defaults::EMERGENCY_COLOR;

/// An `#RRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB`. Anything else is `None`.
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channel-wise interpolation, each channel floored.
    pub fn lerp(self, other: Rgb, frac: f64) -> Rgb {
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * frac).floor().clamp(0.0, 255.0) as u8
        };
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Color for `value` on `gradient`. Never fails: anything unresolvable is
/// [`EMERGENCY_COLOR`].
pub fn color_for(gradient: &Gradient, channel: Channel, value: f64) -> String {
    let stops = &gradient.stops;
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        debug!("gradient has no stops");
        return EMERGENCY_COLOR.to_string();
    };
    if gradient.kind == GradientKind::Unknown {
        return EMERGENCY_COLOR.to_string();
    }

    if value < first.position {
        return first.color(channel).to_string();
    }
    if value >= last.position {
        return last.color(channel).to_string();
    }

    let Some((lo, hi)) = bracket(stops, value) else {
        debug!(value, "no bracketing stops");
        return EMERGENCY_COLOR.to_string();
    };

    match gradient.kind {
        GradientKind::Steps => lo.color(channel).to_string(),
        GradientKind::Linear => {
            let (Some(a), Some(b)) =
                (Rgb::from_hex(lo.color(channel)), Rgb::from_hex(hi.color(channel)))
            else {
                debug!(
                    lo = lo.color(channel),
                    hi = hi.color(channel),
                    "stop colors are not #RRGGBB"
                );
                return EMERGENCY_COLOR.to_string();
            };
            let frac = ((value - lo.position) / (hi.position - lo.position)).clamp(0.0, 1.0);
            a.lerp(b, frac).to_string()
        }
        GradientKind::Unknown => EMERGENCY_COLOR.to_string(),
    }
}

/// The pair of consecutive stops with `lo.position <= value < hi.position`.
fn bracket(stops: &[GradientStop], value: f64) -> Option<(&GradientStop, &GradientStop)> {
    stops
        .windows(2)
        .find(|w| w[0].position <= value && value < w[1].position)
        .map(|w| (&w[0], &w[1]))
}

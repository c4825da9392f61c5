//! Vector and angle primitives shared by the geometry code.
//!
//! Points are `glam::DVec2` in screen space (x right, y down). Angles and
//! polar vectors use the mathematical convention (y up), so converting between
//! the two flips the sign of the y component.

use std::f64::consts::{PI, TAU};
use std::fmt;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Like [`finite`], but also rejects negative values.
#[inline]
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    let val = finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

/// Unit vector in the direction of `v`, or `None` for a zero-length vector.
#[inline]
pub fn unit(v: DVec2) -> Option<DVec2> {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// Angle in radians, mathematical convention (counter-clockwise, y up).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    #[inline]
    pub fn from_degrees(deg: f64) -> Angle {
        Angle(deg.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Bring the angle into `(-π, π]` by whole turns.
    ///
    /// Closed form, so any finite angle takes constant time.
    pub fn normalized(self) -> Angle {
        if !self.0.is_finite() {
            return self;
        }
        // In [0, τ]; the upper end only through rounding.
        let a = self.0.rem_euclid(TAU);
        Angle(if a > PI { a - TAU } else { a })
    }

    /// Rotate by `by` and normalize.
    #[inline]
    pub fn rotated(self, by: Angle) -> Angle {
        Angle(self.radians() + by.radians()).normalized()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}rad", self.0)
    }
}

/// A vector as magnitude and direction.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Polar {
    pub radius: f64,
    pub angle: Angle,
}

impl Polar {
    pub fn new(radius: f64, angle: Angle) -> Self {
        Polar { radius, angle }
    }

    /// Polar form of a screen-space vector (y flipped to point up).
    pub fn from_screen(v: DVec2) -> Self {
        Polar {
            radius: v.length(),
            angle: Angle((-v.y).atan2(v.x)),
        }
    }

    /// Screen-space vector for this polar vector (y flipped to point down).
    pub fn to_screen(self) -> DVec2 {
        let (sin, cos) = self.angle.radians().sin_cos();
        dvec2(self.radius * cos, -self.radius * sin)
    }
}

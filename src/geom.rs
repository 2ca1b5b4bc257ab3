//! Geometric primitives used by the charting pipeline.
//!
//! [`Sample`] lives in data space (seconds, metric value). Screen-space
//! types are pixel coordinates on the caller's drawing surface.

use serde::{Deserialize, Serialize};

/// A single measurement in data space.
///
/// `t` is a time offset in seconds and is not required to be sorted within
/// a series. `value` is the bounded metric being charted. Construction
/// coerces non-finite fields to zero so malformed input cannot poison a
/// render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time offset in seconds.
    pub t: f64,
    /// Metric value, nominally inside the configured value domain.
    #[serde(alias = "v")]
    pub value: f64,
}

impl Sample {
    /// Create a new sample, coercing non-finite fields to zero.
    pub fn new(t: f64, value: f64) -> Self {
        Self {
            t: coerce(t),
            value: coerce(value),
        }
    }
}

fn coerce(field: f64) -> f64 {
    if field.is_finite() { field } else { 0.0 }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_coerces_non_finite_fields() {
        let sample = Sample::new(f64::NAN, f64::INFINITY);
        assert_eq!(sample.t, 0.0);
        assert_eq!(sample.value, 0.0);

        let sample = Sample::new(3.5, 0.25);
        assert_eq!(sample.t, 3.5);
        assert_eq!(sample.value, 0.25);
    }

    #[test]
    fn rect_from_size_and_center() {
        let rect = ScreenRect::from_size(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center(), ScreenPoint::new(60.0, 45.0));
        assert!(rect.is_valid());
    }
}

//! Data ranges and the data-to-pixel coordinate mapping.
//!
//! A [`Scale`] is derived from the data bounds on every render call and is
//! never persisted. Degenerate domains (a single sample, or every sample at
//! one timestamp) map through an epsilon-floored divisor instead of
//! dividing by zero.

use crate::geom::{Sample, ScreenPoint, ScreenRect};

/// Divisor floor applied to both axis spans.
const MIN_SPAN: f64 = 1e-9;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Union two ranges if both are finite.
    pub fn union(a: Self, b: Self) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        })
    }

    /// Fraction of the span covered by `value`, with the epsilon floor.
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span().max(MIN_SPAN)
    }
}

/// Mapping from the data domain into the plot rectangle.
///
/// The time range spans the samples being drawn; the value range is the
/// configured metric domain. `y` inverts the vertical axis so the domain
/// minimum lands on the bottom plot edge and the maximum on the top edge.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    time: Range,
    value: Range,
    area: ScreenRect,
}

impl Scale {
    /// Create a scale for the given domains and plot rectangle.
    pub fn new(time: Range, value: Range, area: ScreenRect) -> Self {
        Self { time, value, area }
    }

    /// Access the plot rectangle.
    pub fn area(&self) -> ScreenRect {
        self.area
    }

    /// Access the time domain.
    pub fn time(&self) -> Range {
        self.time
    }

    /// Access the value domain.
    pub fn value(&self) -> Range {
        self.value
    }

    /// Map a time offset to a horizontal pixel position.
    pub fn x(&self, t: f64) -> f32 {
        let frac = self.time.fraction(t);
        self.area.min.x + (frac * self.area.width() as f64) as f32
    }

    /// Map a metric value to a vertical pixel position.
    pub fn y(&self, value: f64) -> f32 {
        let frac = self.value.fraction(value);
        self.area.max.y - (frac * self.area.height() as f64) as f32
    }

    /// Map a sample to its screen position.
    pub fn project(&self, sample: &Sample) -> ScreenPoint {
        ScreenPoint::new(self.x(sample.t), self.y(sample.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ScreenPoint;

    fn area() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(50.0, 40.0), ScreenPoint::new(450.0, 360.0))
    }

    #[test]
    fn value_domain_maps_to_plot_edges() {
        let scale = Scale::new(Range::new(0.0, 10.0), Range::new(0.0, 1.0), area());
        assert!((scale.y(0.0) - 360.0).abs() < 1e-4);
        assert!((scale.y(1.0) - 40.0).abs() < 1e-4);
        assert!((scale.y(0.5) - 200.0).abs() < 1e-4);
    }

    #[test]
    fn time_domain_maps_to_plot_edges() {
        let scale = Scale::new(Range::new(100.0, 160.0), Range::new(0.0, 1.0), area());
        assert!((scale.x(100.0) - 50.0).abs() < 1e-4);
        assert!((scale.x(160.0) - 450.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_time_domain_stays_finite() {
        let scale = Scale::new(Range::new(5.0, 5.0), Range::new(0.0, 1.0), area());
        let x = scale.x(5.0);
        assert!(x.is_finite());
        assert!((x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn range_new_swaps_reversed_bounds() {
        let range = Range::new(9.0, 3.0);
        assert_eq!(range.min, 3.0);
        assert_eq!(range.max, 9.0);
        assert_eq!(range.span(), 6.0);
    }

    #[test]
    fn range_union_and_expand() {
        let union = Range::union(Range::new(0.0, 2.0), Range::new(5.0, 9.0)).expect("finite");
        assert_eq!(union.min, 0.0);
        assert_eq!(union.max, 9.0);

        let mut range = Range::new(1.0, 2.0);
        range.expand_to_include(4.0);
        range.expand_to_include(f64::NAN);
        assert_eq!(range.max, 4.0);
    }
}

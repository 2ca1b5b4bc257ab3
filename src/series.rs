//! Series construction and time bookkeeping.

use crate::geom::Sample;
use crate::scale::Range;

/// Ordered sequence of samples for one analyzed file.
///
/// Insertion order is the display order; rendering sorts a copy by time
/// before interpolation or drawing. A series may be empty, which renders as
/// a placeholder message rather than an error.
#[derive(Debug, Clone, Default)]
pub struct Series {
    label: Option<String>,
    samples: Vec<Sample>,
}

impl Series {
    /// Create a series from samples, re-coercing any non-finite fields.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            label: None,
            samples: samples
                .into_iter()
                .map(|sample| Sample::new(sample.t, sample.value))
                .collect(),
        }
    }

    /// Create a series from `(t, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(|(t, value)| Sample::new(t, value)).collect())
    }

    /// Set the display label shown in the legend.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Access the display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Access the samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(Sample::new(sample.t, sample.value));
    }

    /// Samples sorted by time.
    ///
    /// The sort is stable, so among samples sharing a timestamp the first
    /// one inserted stays first.
    pub fn sorted_by_time(&self) -> Vec<Sample> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.t.total_cmp(&b.t));
        sorted
    }

    /// Time range covered by the samples, if any.
    pub fn time_bounds(&self) -> Option<Range> {
        let first = self.samples.first()?;
        let mut bounds = Range::new(first.t, first.t);
        for sample in &self.samples[1..] {
            bounds.expand_to_include(sample.t);
        }
        Some(bounds)
    }

    /// Duration covered by the samples; zero when empty or single-point.
    pub fn duration(&self) -> f64 {
        self.time_bounds().map_or(0.0, |bounds| bounds.span())
    }

    /// Mean of the sample values; zero when empty.
    pub(crate) fn mean_value(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|sample| sample.value).sum();
        sum / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_ignore_insertion_order() {
        let series = Series::from_pairs([(10.0, 0.2), (0.0, 0.4), (5.0, 0.9)]);
        let bounds = series.time_bounds().expect("non-empty");
        assert_eq!(bounds.min, 0.0);
        assert_eq!(bounds.max, 10.0);
        assert_eq!(series.duration(), 10.0);
    }

    #[test]
    fn empty_series_has_no_bounds() {
        let series = Series::default();
        assert!(series.time_bounds().is_none());
        assert_eq!(series.duration(), 0.0);
    }

    #[test]
    fn construction_coerces_malformed_samples() {
        let series = Series::new(vec![Sample {
            t: f64::NAN,
            value: f64::NEG_INFINITY,
        }]);
        assert_eq!(series.samples()[0].t, 0.0);
        assert_eq!(series.samples()[0].value, 0.0);
    }

    #[test]
    fn sort_is_stable_for_shared_timestamps() {
        let series = Series::from_pairs([(1.0, 0.1), (0.0, 0.7), (1.0, 0.9)]);
        let sorted = series.sorted_by_time();
        assert_eq!(sorted[0].value, 0.7);
        assert_eq!(sorted[1].value, 0.1);
        assert_eq!(sorted[2].value, 0.9);
    }

    #[test]
    fn mean_value_averages_samples() {
        let series = Series::from_pairs([(0.0, 0.2), (1.0, 0.4), (2.0, 0.6)]);
        assert!((series.mean_value() - 0.4).abs() < 1e-9);
        assert_eq!(Series::default().mean_value(), 0.0);
    }
}

//! Chart configuration and the render entry points.
//!
//! A [`Chart`] pairs a validated [`ChartConfig`] with a [`Theme`] and turns
//! series data into a [`RenderList`]. `render`/`render_comparison` replay
//! that list straight onto a caller-owned [`Surface`]; the `build`
//! counterparts return it for inspection or deferred replay. Rendering has
//! no error path: empty input draws a placeholder message, malformed
//! numerics were coerced at construction, and degenerate domains map
//! through an epsilon floor.

use log::debug;
use thiserror::Error;

use crate::axis::{self, TIME_SEGMENTS};
use crate::geom::{Sample, ScreenPoint, ScreenRect};
use crate::render::{
    DashPattern, LineStyle, RenderCommand, RenderList, Surface, TextAlign, TextStyle,
};
use crate::resample::resample;
use crate::scale::{Range, Scale};
use crate::series::Series;
use crate::theme::Theme;

/// Fixed value domain for engagement scores.
pub const ENGAGEMENT_DOMAIN: Range = Range { min: 0.0, max: 1.0 };

/// Default threshold reference drawn across every chart.
pub const ENGAGEMENT_THRESHOLD: f64 = 0.7;

/// Upper bound on drawn point markers per series.
const MAX_MARKERS: usize = 200;

/// Default bin count for [`SamplingMode::Binned`].
const DEFAULT_BINS: usize = 12;

/// Comparison series below this point count are resampled up to it.
const MIN_COMPARISON_POINTS: usize = 20;

const THRESHOLD_DASH: DashPattern = DashPattern { on: 5.0, off: 5.0 };
const LEGEND_ROW_SPACING: f32 = 25.0;
const FALLBACK_LABELS: [&str; 2] = ["File 1", "File 2"];
const NO_DATA_MESSAGE: &str = "No data available";
const NO_COMPARISON_MESSAGE: &str = "No data available for comparison";

/// How a single-series chart samples its input before plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Plot every raw sample, sorted by time, with a fixed vertical grid.
    #[default]
    Raw,
    /// Resample onto a fixed number of even time bins before plotting.
    ///
    /// The vertical grid adapts to the plot width instead of staying fixed.
    Binned,
}

/// How a comparison chart reconciles the two series' time domains.
///
/// Both behaviors shipped in production under separately duplicated
/// renderers; the choice is an explicit configuration here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPolicy {
    /// Shift each series so its own minimum time becomes zero, then plot
    /// both against the longer of the two durations.
    ///
    /// Suits recordings taken at different absolute start times but with
    /// comparable lengths, which is the common comparison case.
    #[default]
    RelativeShifted,
    /// One absolute time domain spanning both series' raw time ranges.
    SharedAbsolute,
}

/// Edge padding around the plot rectangle.
///
/// The left and bottom edges hold tick labels, the top edge holds the
/// header line, and the wide right edge reserves the legend column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    /// Left inset in pixels.
    pub left: f32,
    /// Right inset in pixels.
    pub right: f32,
    /// Top inset in pixels.
    pub top: f32,
    /// Bottom inset in pixels.
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 150.0,
            top: 40.0,
            bottom: 40.0,
        }
    }
}

impl Padding {
    /// Plot rectangle inside a surface of the given size.
    fn plot_area(&self, width: f32, height: f32) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(self.left, self.top),
            ScreenPoint::new(width - self.right, height - self.bottom),
        )
    }
}

/// Errors from chart configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The marker budget must keep at least both endpoints.
    #[error("marker budget must be at least 2, got {0}")]
    MarkerBudget(usize),
    /// Binned mode needs at least two bins.
    #[error("bin count must be at least 2, got {0}")]
    BinCount(usize),
    /// The value domain must be a finite range with positive span.
    #[error("value domain [{min}, {max}] is not a valid range")]
    ValueDomain {
        /// Offending domain minimum.
        min: f64,
        /// Offending domain maximum.
        max: f64,
    },
    /// The threshold must be finite.
    #[error("threshold must be finite")]
    Threshold,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    value_domain: Range,
    threshold: Option<f64>,
    sampling: SamplingMode,
    domain_policy: DomainPolicy,
    padding: Padding,
    bins: usize,
    max_markers: usize,
    annotate_extremes: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            value_domain: ENGAGEMENT_DOMAIN,
            threshold: Some(ENGAGEMENT_THRESHOLD),
            sampling: SamplingMode::default(),
            domain_policy: DomainPolicy::default(),
            padding: Padding::default(),
            bins: DEFAULT_BINS,
            max_markers: MAX_MARKERS,
            annotate_extremes: true,
        }
    }
}

impl ChartConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a configuration.
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }

    /// Access the value domain.
    pub fn value_domain(&self) -> Range {
        self.value_domain
    }

    /// Access the threshold, if one is drawn.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Access the sampling mode.
    pub fn sampling(&self) -> SamplingMode {
        self.sampling
    }

    /// Access the comparison domain policy.
    pub fn domain_policy(&self) -> DomainPolicy {
        self.domain_policy
    }

    /// Access the plot padding.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Access the bin count used by binned sampling.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Access the marker budget.
    pub fn max_markers(&self) -> usize {
        self.max_markers
    }

    /// Check whether extreme points are annotated.
    pub fn annotate_extremes(&self) -> bool {
        self.annotate_extremes
    }
}

/// Builder for a validated [`ChartConfig`].
#[derive(Debug, Default)]
pub struct ChartConfigBuilder {
    config: ChartConfig,
}

impl ChartConfigBuilder {
    /// Set the value domain the vertical axis spans.
    pub fn value_domain(mut self, domain: Range) -> Self {
        self.config.value_domain = domain;
        self
    }

    /// Set the threshold reference value.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = Some(threshold);
        self
    }

    /// Draw no threshold reference.
    pub fn no_threshold(mut self) -> Self {
        self.config.threshold = None;
        self
    }

    /// Set the sampling mode for single-series charts.
    pub fn sampling(mut self, sampling: SamplingMode) -> Self {
        self.config.sampling = sampling;
        self
    }

    /// Set the comparison domain policy.
    pub fn domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.config.domain_policy = policy;
        self
    }

    /// Set the plot padding.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.config.padding = padding;
        self
    }

    /// Set the bin count used by binned sampling.
    pub fn bins(mut self, bins: usize) -> Self {
        self.config.bins = bins;
        self
    }

    /// Set the marker budget.
    pub fn max_markers(mut self, max_markers: usize) -> Self {
        self.config.max_markers = max_markers;
        self
    }

    /// Toggle extreme-point annotation.
    pub fn annotate_extremes(mut self, annotate: bool) -> Self {
        self.config.annotate_extremes = annotate;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ChartConfig, ConfigError> {
        let config = self.config;
        if config.max_markers < 2 {
            return Err(ConfigError::MarkerBudget(config.max_markers));
        }
        if config.bins < 2 {
            return Err(ConfigError::BinCount(config.bins));
        }
        if !config.value_domain.is_valid() {
            return Err(ConfigError::ValueDomain {
                min: config.value_domain.min,
                max: config.value_domain.max,
            });
        }
        if let Some(threshold) = config.threshold
            && !threshold.is_finite()
        {
            return Err(ConfigError::Threshold);
        }
        Ok(config)
    }
}

/// Engagement chart renderer.
///
/// Holds configuration and theme only; every call recomputes scales from
/// the data and repaints the entire surface, so there is no state to keep
/// in sync between calls.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    config: ChartConfig,
    theme: Theme,
}

impl Chart {
    /// Create a chart with the given configuration and default theme.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            theme: Theme::default(),
        }
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Access the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Access the theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render one series onto the surface.
    pub fn render<S: Surface + ?Sized>(&self, series: &Series, surface: &mut S) {
        self.build(series, surface.width(), surface.height())
            .replay(surface);
    }

    /// Render two series on one shared scale.
    pub fn render_comparison<S: Surface + ?Sized>(
        &self,
        first: &Series,
        second: &Series,
        surface: &mut S,
    ) {
        self.build_comparison(first, second, surface.width(), surface.height())
            .replay(surface);
    }

    /// Compute the command list for one series without touching a surface.
    pub fn build(&self, series: &Series, width: f32, height: f32) -> RenderList {
        let mut list = RenderList::new();
        list.push(RenderCommand::Clear(ScreenRect::from_size(
            0.0, 0.0, width, height,
        )));

        let Some(time) = series.time_bounds() else {
            self.push_message(&mut list, width, height, NO_DATA_MESSAGE);
            return list;
        };
        log_summary(series);

        let duration = time.span();
        let sorted = series.sorted_by_time();
        let plotted = match self.config.sampling {
            SamplingMode::Raw => sorted,
            SamplingMode::Binned => resample(&sorted, self.config.bins + 1),
        };

        let area = self.config.padding.plot_area(width, height);
        let scale = Scale::new(time, self.config.value_domain, area);
        let segments = match self.config.sampling {
            SamplingMode::Raw => TIME_SEGMENTS,
            SamplingMode::Binned => axis::adaptive_segments(area.width()),
        };

        self.push_frame(&mut list, &scale, segments, duration);
        self.push_polyline(&mut list, &scale, &plotted, 0);
        self.push_markers(&mut list, &scale, &plotted, 0);
        self.push_threshold(&mut list, &scale);
        if self.config.annotate_extremes {
            self.push_extremes(&mut list, &scale, &plotted);
        }
        self.push_header(&mut list, area, format!("Duration: {duration:.1}s"));
        self.push_legend(
            &mut list,
            width,
            &[(series.label().unwrap_or(FALLBACK_LABELS[0]), None)],
        );
        list
    }

    /// Compute the comparison command list without touching a surface.
    pub fn build_comparison(
        &self,
        first: &Series,
        second: &Series,
        width: f32,
        height: f32,
    ) -> RenderList {
        let mut list = RenderList::new();
        list.push(RenderCommand::Clear(ScreenRect::from_size(
            0.0, 0.0, width, height,
        )));

        let (Some(bounds_first), Some(bounds_second)) =
            (first.time_bounds(), second.time_bounds())
        else {
            self.push_message(&mut list, width, height, NO_COMPARISON_MESSAGE);
            return list;
        };
        log_summary(first);
        log_summary(second);

        let durations = [bounds_first.span(), bounds_second.span()];
        let (time, header) = match self.config.domain_policy {
            DomainPolicy::RelativeShifted => {
                let shared = durations[0].max(durations[1]);
                (
                    Range::new(0.0, shared),
                    format!("Time range: 0 - {shared:.0}s"),
                )
            }
            DomainPolicy::SharedAbsolute => {
                let union =
                    Range::union(bounds_first, bounds_second).unwrap_or(bounds_first);
                (union, format!("Comparison duration: {:.1}s", union.span()))
            }
        };

        let area = self.config.padding.plot_area(width, height);
        let scale = Scale::new(time, self.config.value_domain, area);
        self.push_frame(&mut list, &scale, TIME_SEGMENTS, time.span());

        for (index, (series, bounds)) in [(first, bounds_first), (second, bounds_second)]
            .into_iter()
            .enumerate()
        {
            let mut samples = series.sorted_by_time();
            if self.config.domain_policy == DomainPolicy::RelativeShifted {
                for sample in &mut samples {
                    sample.t -= bounds.min;
                }
            }
            // Short series get a smoother polyline; markers stay on the
            // actual measurements.
            let line = if samples.len() >= 2 && samples.len() < MIN_COMPARISON_POINTS {
                resample(&samples, MIN_COMPARISON_POINTS)
            } else {
                samples.clone()
            };
            self.push_polyline(&mut list, &scale, &line, index);
            self.push_markers(&mut list, &scale, &samples, index);
        }

        self.push_threshold(&mut list, &scale);
        self.push_header(&mut list, area, header);
        self.push_legend(
            &mut list,
            width,
            &[
                (
                    first.label().unwrap_or(FALLBACK_LABELS[0]),
                    Some(durations[0]),
                ),
                (
                    second.label().unwrap_or(FALLBACK_LABELS[1]),
                    Some(durations[1]),
                ),
            ],
        );
        list
    }

    fn push_message(&self, list: &mut RenderList, width: f32, height: f32, message: &str) {
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(width * 0.5, height * 0.5),
            text: message.to_string(),
            style: TextStyle {
                color: self.theme.muted,
                size: self.theme.message_size,
                align: TextAlign::Center,
            },
        });
    }

    fn push_frame(&self, list: &mut RenderList, scale: &Scale, segments: usize, duration: f64) {
        let area = scale.area();
        let grid = LineStyle::solid(self.theme.grid, 1.0);

        let value_ticks = axis::value_ticks();
        let time_ticks = axis::time_ticks(segments, duration);

        for tick in &value_ticks {
            let gy = area.max.y - (tick.frac * area.height() as f64) as f32;
            list.push(RenderCommand::Polyline {
                points: vec![
                    ScreenPoint::new(area.min.x, gy),
                    ScreenPoint::new(area.max.x, gy),
                ],
                style: grid,
            });
        }
        for tick in &time_ticks {
            let gx = area.min.x + (tick.frac * area.width() as f64) as f32;
            list.push(RenderCommand::Polyline {
                points: vec![
                    ScreenPoint::new(gx, area.min.y),
                    ScreenPoint::new(gx, area.max.y),
                ],
                style: grid,
            });
        }

        let axis_style = LineStyle::solid(self.theme.axis, 1.0);
        list.push(RenderCommand::Polyline {
            points: vec![
                ScreenPoint::new(area.min.x, area.max.y),
                ScreenPoint::new(area.max.x, area.max.y),
            ],
            style: axis_style,
        });
        list.push(RenderCommand::Polyline {
            points: vec![
                ScreenPoint::new(area.min.x, area.min.y),
                ScreenPoint::new(area.min.x, area.max.y),
            ],
            style: axis_style,
        });

        let tick_style = TextStyle {
            color: self.theme.tick_label,
            size: self.theme.label_size,
            align: TextAlign::Center,
        };
        for tick in &time_ticks {
            if let Some(label) = &tick.label {
                let gx = area.min.x + (tick.frac * area.width() as f64) as f32;
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(gx, area.max.y + 20.0),
                    text: label.clone(),
                    style: tick_style,
                });
            }
        }
        for tick in &value_ticks {
            if let Some(label) = &tick.label {
                let gy = area.max.y - (tick.frac * area.height() as f64) as f32;
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(area.min.x - 8.0, gy + 4.0),
                    text: label.clone(),
                    style: TextStyle {
                        align: TextAlign::Right,
                        ..tick_style
                    },
                });
            }
        }
    }

    fn push_polyline(
        &self,
        list: &mut RenderList,
        scale: &Scale,
        samples: &[Sample],
        series_index: usize,
    ) {
        if samples.len() < 2 {
            return;
        }
        list.push(RenderCommand::Polyline {
            points: samples.iter().map(|sample| scale.project(sample)).collect(),
            style: LineStyle::solid(
                self.theme.series_color(series_index),
                self.theme.line_width,
            ),
        });
    }

    fn push_markers(
        &self,
        list: &mut RenderList,
        scale: &Scale,
        samples: &[Sample],
        series_index: usize,
    ) {
        let color = self.theme.series_color(series_index);
        for index in marker_indices(samples.len(), self.config.max_markers) {
            list.push(RenderCommand::FillCircle {
                center: scale.project(&samples[index]),
                radius: self.theme.marker_radius,
                color,
            });
        }
    }

    fn push_threshold(&self, list: &mut RenderList, scale: &Scale) {
        let Some(threshold) = self.config.threshold else {
            return;
        };
        let area = scale.area();
        let ty = scale.y(threshold);
        list.push(RenderCommand::Polyline {
            points: vec![
                ScreenPoint::new(area.min.x, ty),
                ScreenPoint::new(area.max.x, ty),
            ],
            style: LineStyle::dashed(self.theme.threshold, 1.0, THRESHOLD_DASH),
        });
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(area.min.x + 4.0, ty - 6.0),
            text: axis::format_percent(self.config.value_domain.fraction(threshold)),
            style: TextStyle {
                color: self.theme.threshold,
                size: self.theme.label_size,
                align: TextAlign::Left,
            },
        });
    }

    fn push_extremes(&self, list: &mut RenderList, scale: &Scale, samples: &[Sample]) {
        if samples.is_empty() {
            return;
        }
        let mut max_index = 0;
        let mut min_index = 0;
        for (index, sample) in samples.iter().enumerate() {
            // Strict comparisons keep the first occurrence on ties.
            if sample.value > samples[max_index].value {
                max_index = index;
            }
            if sample.value < samples[min_index].value {
                min_index = index;
            }
        }

        self.push_extreme(list, scale, &samples[max_index], true);
        if min_index != max_index {
            self.push_extreme(list, scale, &samples[min_index], false);
        }
    }

    fn push_extreme(&self, list: &mut RenderList, scale: &Scale, sample: &Sample, above: bool) {
        let center = scale.project(sample);
        list.push(RenderCommand::StrokeCircle {
            center,
            radius: self.theme.marker_radius + 2.0,
            style: LineStyle::solid(self.theme.text, 1.0),
        });
        let offset = if above { -8.0 } else { 16.0 };
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(center.x, center.y + offset),
            text: axis::format_percent_precise(self.config.value_domain.fraction(sample.value)),
            style: TextStyle {
                color: self.theme.text,
                size: self.theme.label_size,
                align: TextAlign::Center,
            },
        });
    }

    fn push_header(&self, list: &mut RenderList, area: ScreenRect, text: String) {
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(area.min.x, area.min.y - 10.0),
            text,
            style: TextStyle {
                color: self.theme.muted,
                size: self.theme.label_size,
                align: TextAlign::Left,
            },
        });
    }

    fn push_legend(&self, list: &mut RenderList, width: f32, entries: &[(&str, Option<f64>)]) {
        let x = width - self.config.padding.right + 10.0;
        let top = self.config.padding.top + 20.0;
        for (index, (label, duration)) in entries.iter().enumerate() {
            let row = top + index as f32 * LEGEND_ROW_SPACING;
            list.push(RenderCommand::FillRect {
                rect: ScreenRect::from_size(x, row, 20.0, 3.0),
                color: self.theme.series_color(index),
            });
            let text = match duration {
                Some(duration) => format!("{label} ({duration:.1}s)"),
                None => (*label).to_string(),
            };
            list.push(RenderCommand::Text {
                position: ScreenPoint::new(x + 25.0, row + 5.0),
                text,
                style: TextStyle {
                    color: self.theme.text,
                    size: self.theme.label_size,
                    align: TextAlign::Left,
                },
            });
        }
    }
}

/// Marker indices bounded to the budget.
///
/// Every index is used when the series fits the budget. Otherwise exactly
/// `budget` evenly spaced indices are chosen by rounding, with the first
/// and last original indices forced and rounding collisions removed.
fn marker_indices(len: usize, budget: usize) -> Vec<usize> {
    if len <= budget {
        return (0..len).collect();
    }
    let step = (len - 1) as f64 / (budget - 1) as f64;
    let mut indices: Vec<usize> = (0..budget)
        .map(|i| (i as f64 * step).round() as usize)
        .collect();
    indices[0] = 0;
    let last = indices.len() - 1;
    indices[last] = len - 1;
    indices.dedup();
    indices
}

fn log_summary(series: &Series) {
    debug!(
        "series {}: {} samples, mean value {:.3}, duration {:.1}s",
        series.label().unwrap_or("unlabeled"),
        series.len(),
        series.mean_value(),
        series.duration()
    );
}

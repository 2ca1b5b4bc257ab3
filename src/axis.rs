//! Grid and tick computation for the fixed engagement axes.
//!
//! The value axis always shows ten divisions labeled as percentages of the
//! metric domain. The time axis uses a fixed segment count for raw and
//! comparison plots, or a width-adaptive count for binned plots.

/// Number of horizontal (value-axis) grid divisions.
pub const VALUE_DIVISIONS: usize = 10;

/// Fixed vertical (time-axis) segment count for raw and comparison plots.
pub const TIME_SEGMENTS: usize = 12;

/// A value-axis label is emitted every this many divisions.
const VALUE_LABEL_EVERY: usize = 2;

/// A time-axis label is emitted every this many segments.
const TIME_LABEL_EVERY: usize = 2;

/// Target pixel spacing between adaptive vertical grid lines.
const ADAPTIVE_PX_PER_LINE: f32 = 20.0;

/// Bounds on the adaptive vertical grid line count.
const ADAPTIVE_MIN: usize = 16;
const ADAPTIVE_MAX: usize = 80;

/// One grid line with an optional tick label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position as a fraction of the plot span, zero at the domain minimum.
    pub frac: f64,
    /// Label text, present only on labeled divisions.
    pub label: Option<String>,
}

/// Value-axis ticks: ten divisions, percentage labels every second one.
pub fn value_ticks() -> Vec<Tick> {
    (0..=VALUE_DIVISIONS)
        .map(|division| {
            let frac = division as f64 / VALUE_DIVISIONS as f64;
            let label = (division % VALUE_LABEL_EVERY == 0).then(|| format_percent(frac));
            Tick { frac, label }
        })
        .collect()
}

/// Time-axis ticks over a duration in seconds.
///
/// Labels land on every second segment, and always on the last one so the
/// full duration is readable even for odd segment counts.
pub fn time_ticks(segments: usize, duration: f64) -> Vec<Tick> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|segment| {
            let frac = segment as f64 / segments as f64;
            let label = (segment % TIME_LABEL_EVERY == 0 || segment == segments)
                .then(|| format_seconds(frac * duration));
            Tick { frac, label }
        })
        .collect()
}

/// Vertical grid segment count for binned plots.
///
/// Targets roughly one line per 20 px of plot width, clamped to `[16, 80]`.
pub fn adaptive_segments(plot_width: f32) -> usize {
    ((plot_width / ADAPTIVE_PX_PER_LINE).round() as usize).clamp(ADAPTIVE_MIN, ADAPTIVE_MAX)
}

/// Format a domain fraction as a whole percentage, e.g. `70%`.
pub fn format_percent(frac: f64) -> String {
    format!("{:.0}%", frac * 100.0)
}

/// Format a domain fraction as a percentage with one decimal, e.g. `70.5%`.
pub fn format_percent_precise(frac: f64) -> String {
    format!("{:.1}%", frac * 100.0)
}

/// Format a time offset in whole seconds, e.g. `45s`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.0}s")
}

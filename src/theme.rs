//! Visual theme for engagement charts.

use crate::render::Color;

/// Colors and type sizes for every element a chart draws.
///
/// The defaults mirror the production palette: a green primary series, red
/// secondary and threshold accents, and light neutral chrome on a white
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background grid lines.
    pub grid: Color,
    /// Axis lines.
    pub axis: Color,
    /// Tick label text.
    pub tick_label: Color,
    /// Legend and annotation text.
    pub text: Color,
    /// Placeholder messages and the header line.
    pub muted: Color,
    /// Threshold line and its label.
    pub threshold: Color,
    /// Series palette, cycled by series index.
    pub series: [Color; 2],
    /// Tick, legend, and annotation font size in pixels.
    pub label_size: f32,
    /// Placeholder message font size in pixels.
    pub message_size: f32,
    /// Data polyline stroke width in pixels.
    pub line_width: f32,
    /// Point marker radius in pixels.
    pub marker_radius: f32,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for the series at `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            grid: Color::from_rgb8(0xdd, 0xdd, 0xdd),
            axis: Color::from_rgb8(0x88, 0x88, 0x88),
            tick_label: Color::from_rgb8(0x55, 0x55, 0x55),
            text: Color::BLACK,
            muted: Color::from_rgb8(0x66, 0x66, 0x66),
            threshold: Color::from_rgb8(0xee, 0x33, 0x33),
            series: [
                Color::from_rgb8(0x22, 0xaa, 0x77),
                Color::from_rgb8(0xee, 0x33, 0x33),
            ],
            label_size: 12.0,
            message_size: 16.0,
            line_width: 2.0,
            marker_radius: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_palette_cycles() {
        let theme = Theme::new();
        assert_eq!(theme.series_color(0), theme.series[0]);
        assert_eq!(theme.series_color(1), theme.series[1]);
        assert_eq!(theme.series_color(2), theme.series[0]);
    }
}

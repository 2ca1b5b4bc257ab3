//! Rasterizing surface adapter for `plotters` drawing areas.
//!
//! [`PlottersSurface`] lets a [`RenderList`](crate::render::RenderList)
//! replay onto any `plotters` backend (bitmap or SVG), which covers the
//! "draw this chart to a file" case without the renderer knowing about
//! pixels. Draw calls stay infallible on the [`Surface`] side; the first
//! backend failure is recorded and reported once by [`PlottersSurface::finish`].

use log::warn;
use plotters::coord::Shift;
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle};
use thiserror::Error;

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineStyle, Surface, TextAlign, TextStyle};

/// Error reported when any draw call failed during replay.
#[derive(Debug, Clone, Error)]
#[error("plotters draw failed: {0}")]
pub struct DrawError(String);

/// [`Surface`] implementation backed by a `plotters` drawing area.
pub struct PlottersSurface<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    width: f32,
    height: f32,
    error: Option<DrawError>,
}

impl<'a, DB: DrawingBackend> PlottersSurface<'a, DB> {
    /// Wrap a drawing area, taking its pixel dimensions as the surface size.
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        let (width, height) = area.dim_in_pixel();
        Self {
            area,
            width: width as f32,
            height: height as f32,
            error: None,
        }
    }

    /// Report the first draw failure recorded during replay, if any.
    pub fn finish(self) -> Result<(), DrawError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(error) = result {
            warn!("plotters draw failed: {error}");
            if self.error.is_none() {
                self.error = Some(DrawError(error.to_string()));
            }
        }
    }

    fn stroke_style(&self, style: LineStyle) -> ShapeStyle {
        ShapeStyle {
            color: to_rgba(style.color),
            filled: false,
            stroke_width: style.width.round().max(1.0) as u32,
        }
    }

    fn fill_style(&self, color: Color) -> ShapeStyle {
        ShapeStyle {
            color: to_rgba(color),
            filled: true,
            stroke_width: 1,
        }
    }

    fn draw_path(&mut self, points: Vec<(i32, i32)>, style: LineStyle) {
        let shape = self.stroke_style(style);
        let result = self.area.draw(&PathElement::new(points, shape));
        self.record(result);
    }
}

impl<DB: DrawingBackend> Surface for PlottersSurface<'_, DB> {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, region: ScreenRect) {
        let shape = self.fill_style(Color::WHITE);
        let result = self.area.draw(&Rectangle::new(
            [px(region.min), px(region.max)],
            shape,
        ));
        self.record(result);
    }

    fn polyline(&mut self, points: &[ScreenPoint], style: LineStyle) {
        if points.len() < 2 {
            return;
        }
        match style.dash {
            None => self.draw_path(points.iter().copied().map(px).collect(), style),
            Some(dash) => {
                for window in points.windows(2) {
                    for (start, stop) in dash_segments(window[0], window[1], dash.on, dash.off) {
                        self.draw_path(vec![px(start), px(stop)], style);
                    }
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        let shape = self.fill_style(color);
        let result = self
            .area
            .draw(&Rectangle::new([px(rect.min), px(rect.max)], shape));
        self.record(result);
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color) {
        let shape = self.fill_style(color);
        let result = self
            .area
            .draw(&Circle::new(px(center), radius.round() as i32, shape));
        self.record(result);
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, style: LineStyle) {
        let shape = self.stroke_style(style);
        let result = self
            .area
            .draw(&Circle::new(px(center), radius.round() as i32, shape));
        self.record(result);
    }

    fn text(&mut self, position: ScreenPoint, text: &str, style: TextStyle) {
        let font = FontDesc::new(FontFamily::SansSerif, style.size as f64, FontStyle::Normal);
        let anchor = Pos::new(
            match style.align {
                TextAlign::Left => HPos::Left,
                TextAlign::Center => HPos::Center,
                TextAlign::Right => HPos::Right,
            },
            VPos::Bottom,
        );
        let color = to_rgba(style.color);
        let text_style = plotters::style::TextStyle::from(font)
            .color(&color)
            .pos(anchor);
        let result = self
            .area
            .draw(&Text::new(text.to_string(), px(position), text_style));
        self.record(result);
    }
}

fn px(point: ScreenPoint) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn to_rgba(color: Color) -> RGBAColor {
    RGBAColor(
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8,
        color.a as f64,
    )
}

/// Split a line into dash segments of `on` pixels separated by `off` gaps.
fn dash_segments(
    start: ScreenPoint,
    end: ScreenPoint,
    on: f32,
    off: f32,
) -> Vec<(ScreenPoint, ScreenPoint)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    let period = on + off;
    if length <= 0.0 || period <= 0.0 || on <= 0.0 {
        return vec![(start, end)];
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut offset = 0.0;
    while offset < length {
        let stop = (offset + on).min(length);
        segments.push((
            ScreenPoint::new(start.x + ux * offset, start.y + uy * offset),
            ScreenPoint::new(start.x + ux * stop, start.y + uy * stop),
        ));
        offset += period;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_segments_cover_the_line() {
        let segments = dash_segments(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(100.0, 0.0),
            5.0,
            5.0,
        );
        assert_eq!(segments.len(), 10);
        assert_eq!(segments[0].0.x, 0.0);
        assert_eq!(segments[0].1.x, 5.0);
        assert!((segments[9].1.x - 95.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_dashes_fall_back_to_solid() {
        let start = ScreenPoint::new(3.0, 3.0);
        let end = ScreenPoint::new(3.0, 3.0);
        assert_eq!(dash_segments(start, end, 5.0, 5.0), vec![(start, end)]);
    }

    #[test]
    fn shapes_rasterize_onto_a_bitmap() {
        let mut buffer = vec![0u8; 64 * 64 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (64, 64)).into_drawing_area();
            let mut surface = PlottersSurface::new(&root);
            assert_eq!(surface.width(), 64.0);
            assert_eq!(surface.height(), 64.0);

            surface.polyline(
                &[ScreenPoint::new(0.0, 32.0), ScreenPoint::new(63.0, 32.0)],
                LineStyle::solid(Color::from_rgb8(0xff, 0x00, 0x00), 1.0),
            );
            surface.fill_circle(
                ScreenPoint::new(32.0, 10.0),
                3.0,
                Color::from_rgb8(0x00, 0xff, 0x00),
            );
            surface.finish().expect("no draw errors");
            root.present().expect("present");
        }
        assert!(buffer.iter().any(|byte| *byte != 0));
    }
}

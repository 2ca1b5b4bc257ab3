//! Backend-agnostic rendering vocabulary.
//!
//! The chart renderer emits a [`RenderList`] of [`RenderCommand`]s;
//! [`RenderList::replay`] walks the list against any [`Surface`]
//! implementation. Keeping the command list public lets callers and tests
//! inspect exactly what a render pass would draw without owning a real
//! drawing target.

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Dash pattern for stroked lines, in pixels of ink and gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    /// Inked length of each dash.
    pub on: f32,
    /// Gap length between dashes.
    pub off: f32,
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels. A `dash` of `None` strokes a
/// solid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Optional dash pattern.
    pub dash: Option<DashPattern>,
}

impl LineStyle {
    /// Solid stroke with the given color and width.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Dashed stroke with the given color, width, and pattern.
    pub fn dashed(color: Color, width: f32, dash: DashPattern) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Horizontal text anchoring relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the position.
    Left,
    /// Text is centered on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal anchoring.
    pub align: TextAlign,
}

/// One drawing operation on an abstract 2D surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear a rectangular region.
    Clear(ScreenRect),
    /// Stroke consecutive points as an open polyline.
    Polyline {
        /// Points in draw order.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Fill a rectangle.
    FillRect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Fill color.
        color: Color,
    },
    /// Fill a circle.
    FillCircle {
        /// Circle center.
        center: ScreenPoint,
        /// Circle radius in pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Stroke a circle outline.
    StrokeCircle {
        /// Circle center.
        center: ScreenPoint,
        /// Circle radius in pixels.
        radius: f32,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw a text run anchored at a position.
    Text {
        /// Anchor position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Ordered drawing operations for one render pass.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub(crate) fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether the list holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command onto a surface, in order.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                RenderCommand::Clear(region) => surface.clear(*region),
                RenderCommand::Polyline { points, style } => surface.polyline(points, *style),
                RenderCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                RenderCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(*center, *radius, *color),
                RenderCommand::StrokeCircle {
                    center,
                    radius,
                    style,
                } => surface.stroke_circle(*center, *radius, *style),
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => surface.text(*position, text, *style),
            }
        }
    }
}

/// Caller-owned 2D drawing target.
///
/// Implementations translate these immediate-mode calls onto a real canvas,
/// such as a window, an image rasterizer, or a test recorder. The renderer
/// only draws into the surface; it never resizes it, and it clears and
/// repaints the whole surface on every pass.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f32;
    /// Surface height in pixels.
    fn height(&self) -> f32;
    /// Clear a rectangular region.
    fn clear(&mut self, region: ScreenRect);
    /// Stroke consecutive points as an open polyline.
    fn polyline(&mut self, points: &[ScreenPoint], style: LineStyle);
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);
    /// Fill a circle.
    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color);
    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, style: LineStyle);
    /// Draw a text run anchored at a position.
    fn text(&mut self, position: ScreenPoint, text: &str, style: TextStyle);
}

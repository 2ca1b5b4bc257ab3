//! engagement_plot renders bounded engagement time-series as 2D charts.
//! The crate turns `(time, value)` samples into a replayable command list:
//! resampling onto even time grids, scale computation, grid and axis
//! layout, bounded marker selection, threshold overlays, and legends, with
//! the actual pixels delegated to a caller-owned [`Surface`].

#![forbid(unsafe_code)]

pub mod axis;
pub mod chart;
pub mod geom;
pub mod payload;
#[cfg(feature = "plotters")]
pub mod plotters_backend;
pub mod render;
pub mod resample;
pub mod scale;
pub mod series;
pub mod theme;

pub use chart::{
    Chart, ChartConfig, ChartConfigBuilder, ConfigError, DomainPolicy, ENGAGEMENT_DOMAIN,
    ENGAGEMENT_THRESHOLD, Padding, SamplingMode,
};
pub use geom::{Sample, ScreenPoint, ScreenRect};
pub use payload::{PayloadError, parse_analysis};
pub use render::{
    Color, DashPattern, LineStyle, RenderCommand, RenderList, Surface, TextAlign, TextStyle,
};
pub use resample::resample;
pub use scale::{Range, Scale};
pub use series::Series;
pub use theme::Theme;

//! The rendering engine: figures, axes, plot elements and the SVG backend.
//! Provides a matplotlib-like API with SVG and raster output.

pub mod axes;
pub mod backend;
pub mod builders;
pub mod data;
pub mod element;
pub mod error;
pub mod figure;
pub mod options;
pub mod plot;
pub mod scale;
pub mod style;

pub use axes::Axes;
pub use backend::OutputFormat;
pub use data::{linspace, IntoPlotData};
pub use element::{Bounds, Legend, LegendPosition};
pub use error::{PlotError, PlotResult};
pub use figure::Figure;
pub use options::{AxisOptions, LegendSetting};
pub use plot::{Binning, Bins, Plot};
pub use scale::Scale;
pub use style::{
    Color, DashPattern, FillStyle, LineStyle, Marker, MarkerStyle, TextStyle, Theme, ThemeConfig,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::plotting::axes::Axes;
    pub use crate::plotting::data::{linspace, IntoPlotData};
    pub use crate::plotting::element::{Legend, LegendPosition};
    pub use crate::plotting::error::{PlotError, PlotResult};
    pub use crate::plotting::figure::Figure;
    pub use crate::plotting::options::AxisOptions;
    pub use crate::plotting::plot::Bins;
    pub use crate::plotting::scale::Scale;
    pub use crate::plotting::style::{Color, DashPattern, Marker, Theme};
}

//! hickory: a thin plotting layer with two façades ([`Plot`], [`Table`]),
//! one-call helpers ([`plot()`], [`plot_hist`]) and a display backend that is
//! only probed when something is first shown.

pub mod config;
pub mod convenience;
pub mod display;
pub mod facade;
pub mod plotting;
pub mod utils;

pub use config::Config;
pub use convenience::{plot, plot_hist, HistArgs, PlotArgs};
pub use display::{Backend, BackendResolver, HeadlessReason, Viewer};
pub use facade::{Plot, Table, TableOptions};
pub use plotting::{
    Axes, AxisOptions, Bins, Color, DashPattern, Legend, LegendPosition, Marker, PlotError,
    PlotResult, Scale, Theme,
};

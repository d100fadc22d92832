//! A single drawing surface with one coordinate region.

use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::display::{self, BackendResolver};
use crate::plotting::{Axes, AxisOptions, Figure, PlotResult};

/// One figure holding exactly one axes.
///
/// Drawing calls are reached through `Deref<Target = Axes>`:
///
/// ```no_run
/// use hickory::Plot;
///
/// let mut p = Plot::new();
/// p.curve(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).label("squares").build()?;
/// p.save("squares.png")?;
/// # Ok::<(), hickory::PlotError>(())
/// ```
#[derive(Debug)]
pub struct Plot {
    figure: Figure,
    resolver: Arc<BackendResolver>,
    dpi: f64,
}

impl Plot {
    /// A plot with the process-wide configuration.
    pub fn new() -> Self {
        Self::with_config(Config::global())
    }

    /// A plot with the size, theme and DPI of `config`.
    pub fn with_config(config: &Config) -> Self {
        let mut figure = Figure::new(config.width, config.height).theme(config.theme);
        figure.gca();
        Plot {
            figure,
            resolver: BackendResolver::global(),
            dpi: config.dpi,
        }
    }

    /// A plot with `options` applied to its axes.
    pub fn with_options(options: AxisOptions) -> PlotResult<Self> {
        let mut plot = Self::new();
        plot.set(&options)?;
        Ok(plot)
    }

    /// Use `resolver` instead of the process-wide one for `show`.
    pub fn with_resolver(mut self, resolver: Arc<BackendResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Figure size in pixels at 100 DPI.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.figure.width = width;
        self.figure.height = height;
        self
    }

    /// DPI used by `save` and `show`.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Apply the options that are set; the rest are left unchanged.
    pub fn set(&mut self, options: &AxisOptions) -> PlotResult<&mut Self> {
        self.axes_mut().set(options)?;
        Ok(self)
    }

    pub fn axes(&self) -> &Axes {
        &self.figure.axes()[0]
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.figure.axes_mut()[0]
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn resolver(&self) -> &Arc<BackendResolver> {
        &self.resolver
    }

    /// The SVG document for the current state.
    pub fn render(&self) -> PlotResult<String> {
        self.figure.render()
    }

    /// Write to `path`; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        self.figure.save_with_dpi(path, self.dpi)
    }

    pub fn save_with_dpi(&self, path: impl AsRef<Path>, dpi: f64) -> PlotResult<()> {
        self.figure.save_with_dpi(path, dpi)
    }

    /// Display interactively. Fails with a display error when headless.
    pub fn show(&self) -> PlotResult<()> {
        debug!("Showing plot with {} element(s)", self.axes().len());
        display::show_figure(&self.figure, &self.resolver, self.dpi)
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Plot {
    type Target = Axes;

    fn deref(&self) -> &Axes {
        self.axes()
    }
}

impl DerefMut for Plot {
    fn deref_mut(&mut self) -> &mut Axes {
        self.axes_mut()
    }
}

//! One-call helpers: build a [`Plot`], draw once, then write and/or show.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::display::BackendResolver;
use crate::facade::Plot;
use crate::plotting::{
    AxisOptions, Bins, Color, DashPattern, IntoPlotData, LegendSetting, Marker, PlotResult,
};

/// Where the result goes. Shared by [`PlotArgs`] and [`HistArgs`].
#[derive(Debug, Clone, Default)]
struct Output {
    file: Option<PathBuf>,
    show: Option<bool>,
    dpi: Option<f64>,
    resolver: Option<Arc<BackendResolver>>,
    config: Option<Config>,
}

impl Output {
    fn config(&self) -> Config {
        self.config.clone().unwrap_or_else(|| Config::global().clone())
    }

    fn new_plot(&self, config: &Config, axis: &AxisOptions) -> PlotResult<Plot> {
        let mut plot = Plot::with_config(config);
        if let Some(ref resolver) = self.resolver {
            plot = plot.with_resolver(resolver.clone());
        }
        if let Some(dpi) = self.dpi {
            plot = plot.with_dpi(dpi);
        }
        plot.set(axis)?;
        Ok(plot)
    }

    /// Write the file if one was given, then show if asked to (or by default
    /// when there is no file). A show failure is returned even after a write.
    fn finish(&self, plot: Plot, config: &Config) -> PlotResult<Plot> {
        if let Some(ref path) = self.file {
            plot.save(path)?;
        }
        if self.show.unwrap_or(self.file.is_none() && config.show) {
            plot.show()?;
        }
        Ok(plot)
    }
}

macro_rules! output_setters {
    () => {
        /// Write the figure here; the format follows the extension.
        pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
            self.output.file = Some(path.into());
            self
        }

        /// Show interactively. Defaults to the configured value when no file is given.
        pub fn show(mut self, show: bool) -> Self {
            self.output.show = Some(show);
            self
        }

        pub fn dpi(mut self, dpi: f64) -> Self {
            self.output.dpi = Some(dpi);
            self
        }

        /// Resolve the display with `resolver` instead of the process-wide one.
        pub fn resolver(mut self, resolver: Arc<BackendResolver>) -> Self {
            self.output.resolver = Some(resolver);
            self
        }

        /// Use `config` instead of the process-wide configuration.
        pub fn config(mut self, config: Config) -> Self {
            self.output.config = Some(config);
            self
        }

        pub fn axis(mut self, axis: AxisOptions) -> Self {
            self.axis = axis;
            self
        }

        pub fn label(mut self, label: impl Into<String>) -> Self {
            self.label = Some(label.into());
            self
        }

        pub fn color(mut self, color: impl Into<Color>) -> Self {
            self.color = Some(color.into());
            self
        }
    };
}

/// Arguments for [`plot`].
#[derive(Debug, Clone, Default)]
pub struct PlotArgs {
    axis: AxisOptions,
    label: Option<String>,
    color: Option<Color>,
    marker: Option<Marker>,
    linestyle: Option<DashPattern>,
    format: Option<String>,
    xerr: Option<Vec<f64>>,
    yerr: Option<Vec<f64>>,
    output: Output,
}

impl PlotArgs {
    pub fn new() -> Self {
        Self::default()
    }

    output_setters!();

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    /// matplotlib-style format string, e.g. `"r--o"`.
    pub fn format(mut self, fmt: impl Into<String>) -> Self {
        self.format = Some(fmt.into());
        self
    }

    pub fn xerr(mut self, xerr: impl IntoPlotData) -> Self {
        self.xerr = Some(xerr.into_plot_data());
        self
    }

    pub fn yerr(mut self, yerr: impl IntoPlotData) -> Self {
        self.yerr = Some(yerr.into_plot_data());
        self
    }
}

/// Arguments for [`plot_hist`].
#[derive(Debug, Clone, Default)]
pub struct HistArgs {
    axis: AxisOptions,
    label: Option<String>,
    color: Option<Color>,
    bins: Option<Bins>,
    binsize: Option<f64>,
    range: Option<(f64, f64)>,
    min: Option<f64>,
    max: Option<f64>,
    alpha: Option<f64>,
    output: Output,
}

impl HistArgs {
    pub fn new() -> Self {
        Self::default()
    }

    output_setters!();

    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(Bins::Count(bins));
        self
    }

    pub fn edges(mut self, edges: impl IntoPlotData) -> Self {
        self.bins = Some(Bins::Edges(edges.into_plot_data()));
        self
    }

    pub fn binsize(mut self, size: f64) -> Self {
        self.binsize = Some(size);
        self
    }

    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some((lo, hi));
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

// A label shows the legend unless the options say otherwise.
fn axis_with_legend(axis: &AxisOptions, label: &Option<String>) -> AxisOptions {
    let mut axis = axis.clone();
    if label.is_some() && axis.legend.is_none() {
        axis.legend = Some(LegendSetting::Show(true));
    }
    axis
}

macro_rules! apply_series_style {
    ($builder:expr, $args:expr) => {{
        let mut builder = $builder;
        if let Some(ref label) = $args.label {
            builder = builder.label(label.clone());
        }
        if let Some(ref color) = $args.color {
            builder = builder.color(color.clone());
        }
        if let Some(ref marker) = $args.marker {
            builder = builder.marker(marker.clone());
        }
        if let Some(ref style) = $args.linestyle {
            builder = builder.linestyle(style.clone());
        }
        if let Some(ref fmt) = $args.format {
            builder = builder.format(fmt.clone());
        }
        builder
    }};
}

/// Plot `y` against `x` in a new [`Plot`]: error bars if `xerr` or `yerr` is
/// given, otherwise points.
pub fn plot(x: impl IntoPlotData, y: impl IntoPlotData, args: PlotArgs) -> PlotResult<Plot> {
    let config = args.output.config();
    let mut plot = args
        .output
        .new_plot(&config, &axis_with_legend(&args.axis, &args.label))?;

    if args.xerr.is_some() || args.yerr.is_some() {
        let mut builder = apply_series_style!(plot.errorbar(x, y), args);
        if let Some(ref xerr) = args.xerr {
            builder = builder.xerr(xerr);
        }
        if let Some(ref yerr) = args.yerr {
            builder = builder.yerr(yerr);
        }
        builder.build()?;
    } else {
        apply_series_style!(plot.plot(x, y), args).build()?;
    }

    args.output.finish(plot, &config)
}

/// Draw a histogram of `values` in a new [`Plot`].
pub fn plot_hist(values: impl IntoPlotData, args: HistArgs) -> PlotResult<Plot> {
    let config = args.output.config();
    let mut plot = args
        .output
        .new_plot(&config, &axis_with_legend(&args.axis, &args.label))?;

    let mut builder = plot.hist(values);
    if let Some(ref bins) = args.bins {
        builder = match bins {
            Bins::Count(n) => builder.bins(*n),
            Bins::Edges(edges) => builder.edges(edges),
        };
    }
    if let Some(size) = args.binsize {
        builder = builder.binsize(size);
    }
    if let Some((lo, hi)) = args.range {
        builder = builder.range(lo, hi);
    }
    if let Some(min) = args.min {
        builder = builder.min(min);
    }
    if let Some(max) = args.max {
        builder = builder.max(max);
    }
    if let Some(alpha) = args.alpha {
        builder = builder.alpha(alpha);
    }
    if let Some(ref color) = args.color {
        builder = builder.color(color.clone());
    }
    if let Some(ref label) = args.label {
        builder = builder.label(label.clone());
    }
    builder.build()?;

    args.output.finish(plot, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::PlotError;

    fn headless() -> Arc<BackendResolver> {
        Arc::new(BackendResolver::from_vars([("HICKORY_BACKEND", "headless")]))
    }

    #[test]
    fn test_file_only_does_not_probe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        let resolver = headless();
        plot(
            vec![1.0, 2.0, 3.0],
            vec![1.0, 4.0, 9.0],
            PlotArgs::new()
                .file(&path)
                .resolver(resolver.clone())
                .config(Config::default()),
        )
        .unwrap();
        assert!(path.metadata().unwrap().len() > 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(!resolver.is_resolved());
    }

    #[test]
    fn test_show_and_file_writes_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.svg");
        let resolver = headless();
        let err = plot(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            PlotArgs::new().file(&path).show(true).resolver(resolver.clone()),
        )
        .unwrap_err();
        assert!(path.exists());
        assert!(resolver.is_resolved());
        assert!(err.is_display_error());
    }

    #[test]
    fn test_no_file_uses_configured_show() {
        let resolver = headless();
        let quiet = Config {
            show: false,
            ..Config::default()
        };
        let p = plot(
            vec![1.0],
            vec![1.0],
            PlotArgs::new().config(quiet).resolver(resolver.clone()),
        )
        .unwrap();
        assert_eq!(p.len(), 1);
        assert!(!resolver.is_resolved());

        let err = plot(
            vec![1.0],
            vec![1.0],
            PlotArgs::new().config(Config::default()).resolver(resolver),
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::HeadlessForced));
    }

    #[test]
    fn test_errorbar_when_errors_given() {
        let p = plot(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            PlotArgs::new()
                .yerr(vec![0.5, 0.5])
                .label("measured")
                .show(false),
        )
        .unwrap();
        assert_eq!(p.data_bounds().y_range(), Some((0.5, 2.5)));
        assert!(p.legend.as_ref().unwrap().visible);
    }

    #[test]
    fn test_length_mismatch_passes_through() {
        let err = plot(vec![1.0, 2.0], vec![1.0], PlotArgs::new().show(false)).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn test_hist_args() {
        let p = plot_hist(
            vec![1.0, 2.0, 2.0, 3.0],
            HistArgs::new().bins(2).axis(AxisOptions::new().xlabel("v")).show(false),
        )
        .unwrap();
        assert_eq!(p.x_label.as_deref(), Some("v"));
        // 3.0 lands in the closed last bin.
        assert_eq!(p.data_bounds().y_range(), Some((0.0, 3.0)));

        let empty = plot_hist(Vec::<f64>::new(), HistArgs::new().show(false));
        assert!(matches!(empty, Err(PlotError::EmptyData)));
    }

    #[test]
    fn test_hist_tiny_binsize_is_an_error() {
        let err = plot_hist(vec![0.0, 1.0], HistArgs::new().binsize(1e-300).show(false))
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }
}

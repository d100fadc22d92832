//! Fluent builders for the drawing calls on [`Axes`].
//!
//! Each drawing call returns a builder; `build()` validates the data, resolves
//! cycled styles and appends the element.

use crate::plotting::axes::Axes;
use crate::plotting::data::{linspace, IntoPlotData};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::{
    histogram, Bins, Binning, ErrorBarPlot, FillBetween, FormatSpec, Histogram, LinePlot, RefLine,
    RefLineOrientation, ScatterPlot,
};
use crate::plotting::scale::Scale;
use crate::plotting::style::{Color, DashPattern, FillStyle, LineStyle, Marker, MarkerStyle};

impl Axes {
    /// Add points. A marker is cycled; no connecting line unless a line style
    /// or format string asks for one.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        LinePlotBuilder::new(self, x.into_plot_data(), y.into_plot_data(), SeriesKind::Points)
    }

    /// Add a line. The dash pattern is cycled; no marker unless one is given.
    pub fn curve(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        LinePlotBuilder::new(self, x.into_plot_data(), y.into_plot_data(), SeriesKind::Curve)
    }

    /// Add a scatter plot.
    pub fn scatter(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> ScatterPlotBuilder<'_> {
        ScatterPlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            size: None,
            marker: None,
            alpha: None,
            label: None,
            sizes: None,
            colors: None,
        }
    }

    /// Add points with symmetric error bars.
    pub fn errorbar(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> ErrorBarBuilder<'_> {
        ErrorBarBuilder {
            points: LinePlotBuilder::new(
                self,
                x.into_plot_data(),
                y.into_plot_data(),
                SeriesKind::Points,
            ),
            xerr: None,
            yerr: None,
            capsize: None,
        }
    }

    /// Fill the region between two curves.
    pub fn fill_between(
        &mut self,
        x: impl IntoPlotData,
        y1: impl IntoPlotData,
        y2: impl IntoPlotData,
    ) -> FillBetweenBuilder<'_> {
        FillBetweenBuilder {
            axes: self,
            x: x.into_plot_data(),
            y1: y1.into_plot_data(),
            y2: y2.into_plot_data(),
            color: None,
            alpha: 0.3,
            label: None,
        }
    }

    /// Plot `f` sampled over an x range.
    pub fn function<F>(&mut self, f: F) -> FunctionBuilder<'_, F>
    where
        F: Fn(f64) -> f64,
    {
        FunctionBuilder {
            axes: self,
            f,
            range: None,
            npts: 100,
            style: SeriesStyle::default(),
        }
    }

    /// Add a histogram of `values`.
    pub fn hist(&mut self, values: impl IntoPlotData) -> HistBuilder<'_> {
        HistBuilder {
            axes: self,
            values: values.into_plot_data(),
            binning: Binning::default(),
            color: None,
            alpha: None,
            label: None,
        }
    }

    /// Add a horizontal line at `y` across the whole area.
    pub fn axhline(&mut self, y: f64) -> RefLineBuilder<'_> {
        RefLineBuilder::new(self, RefLineOrientation::Horizontal, y)
    }

    /// Add a vertical line at `x` across the whole area.
    pub fn axvline(&mut self, x: f64) -> RefLineBuilder<'_> {
        RefLineBuilder::new(self, RefLineOrientation::Vertical, x)
    }
}

fn check_lengths(x: &[f64], name: &str, other: &[f64]) -> PlotResult<()> {
    if x.len() != other.len() {
        return Err(PlotError::length_mismatch(name, x.len(), other.len()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Points,
    Curve,
}

/// Style arguments shared by the line-like builders.
#[derive(Debug, Clone, Default)]
struct SeriesStyle {
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    marker: Option<Marker>,
    markersize: Option<f64>,
    alpha: Option<f64>,
    label: Option<String>,
    format: Option<String>,
}

impl SeriesStyle {
    /// Resolve against the axes' cycles and theme into a line and a marker.
    fn resolve(&self, axes: &mut Axes, kind: SeriesKind) -> (Option<LineStyle>, Option<MarkerStyle>) {
        let fmt = self.format.as_deref().map(FormatSpec::parse).unwrap_or_default();
        let color = axes
            .cycler
            .color_or_next(self.color.clone().or(fmt.color.clone()));
        let alpha = self.alpha.unwrap_or(1.0).clamp(0.0, 1.0);

        let explicit_dash = self.linestyle.clone().or(fmt.dash.clone());
        let explicit_marker = self.marker.clone().or(fmt.marker.clone());

        let dash = match kind {
            SeriesKind::Curve => Some(axes.cycler.dash_or_next(explicit_dash)),
            SeriesKind::Points => explicit_dash,
        };
        let marker = match kind {
            // A format string says exactly what to draw.
            SeriesKind::Points if self.format.is_some() && self.marker.is_none() => fmt.marker,
            SeriesKind::Points => Some(axes.cycler.marker_or_next(explicit_marker)),
            SeriesKind::Curve => explicit_marker,
        };

        let line = dash.map(|dash| {
            LineStyle::new()
                .color(color.clone())
                .width(self.linewidth.unwrap_or(axes.theme.line_width))
                .dash(dash)
                .opacity(alpha)
        });
        let marker = marker.filter(|m| *m != Marker::None).map(|m| {
            MarkerStyle::new(m)
                .size(self.markersize.unwrap_or(axes.theme.marker_size))
                .color(color)
                .fill_opacity(alpha)
        });
        (line, marker)
    }
}

macro_rules! series_style_setters {
    ($($path:ident).+) => {
        pub fn color(mut self, color: impl Into<Color>) -> Self {
            self.$($path).+.color = Some(color.into());
            self
        }

        pub fn linewidth(mut self, width: f64) -> Self {
            self.$($path).+.linewidth = Some(width);
            self
        }

        pub fn linestyle(mut self, style: DashPattern) -> Self {
            self.$($path).+.linestyle = Some(style);
            self
        }

        pub fn marker(mut self, marker: Marker) -> Self {
            self.$($path).+.marker = Some(marker);
            self
        }

        pub fn markersize(mut self, size: f64) -> Self {
            self.$($path).+.markersize = Some(size);
            self
        }

        pub fn alpha(mut self, alpha: f64) -> Self {
            self.$($path).+.alpha = Some(alpha);
            self
        }

        pub fn label(mut self, label: impl Into<String>) -> Self {
            self.$($path).+.label = Some(label.into());
            self
        }

        /// matplotlib-style format string, e.g. `"r--o"`.
        pub fn format(mut self, fmt: impl Into<String>) -> Self {
            self.$($path).+.format = Some(fmt.into());
            self
        }
    };
}

/// Builder for `plot` and `curve`.
pub struct LinePlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    kind: SeriesKind,
    style: SeriesStyle,
}

impl<'a> LinePlotBuilder<'a> {
    fn new(axes: &'a mut Axes, x: Vec<f64>, y: Vec<f64>, kind: SeriesKind) -> Self {
        LinePlotBuilder {
            axes,
            x,
            y,
            kind,
            style: SeriesStyle::default(),
        }
    }

    series_style_setters!(style);

    fn into_plot(self) -> PlotResult<(&'a mut Axes, LinePlot)> {
        check_lengths(&self.x, "y", &self.y)?;
        let (line, marker) = self.style.resolve(self.axes, self.kind);
        let mut plot = LinePlot::new(self.x, self.y)
            .line_style(line)
            .marker_style(marker);
        if let Some(label) = self.style.label {
            plot = plot.label(label);
        }
        Ok((self.axes, plot))
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        let (axes, plot) = self.into_plot()?;
        axes.add_plot(Box::new(plot));
        Ok(axes)
    }
}

/// Builder for scatter plots.
pub struct ScatterPlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    size: Option<f64>,
    marker: Option<Marker>,
    alpha: Option<f64>,
    label: Option<String>,
    sizes: Option<Vec<f64>>,
    colors: Option<Vec<Color>>,
}

impl<'a> ScatterPlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Per-point marker sizes.
    pub fn sizes(mut self, sizes: impl IntoPlotData) -> Self {
        self.sizes = Some(sizes.into_plot_data());
        self
    }

    /// Per-point colors.
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_lengths(&self.x, "y", &self.y)?;
        if let Some(ref sizes) = self.sizes {
            check_lengths(&self.x, "sizes", sizes)?;
        }
        if let Some(ref colors) = self.colors {
            if colors.len() != self.x.len() {
                return Err(PlotError::length_mismatch("colors", self.x.len(), colors.len()));
            }
        }

        let color = self.axes.cycler.color_or_next(self.color);
        let style = MarkerStyle::new(self.marker.unwrap_or(Marker::Circle))
            .size(self.size.unwrap_or(self.axes.theme.marker_size))
            .color(color)
            .fill_opacity(self.alpha.unwrap_or(1.0));

        let mut plot = ScatterPlot::new(self.x, self.y, style);
        if let Some(sizes) = self.sizes {
            plot = plot.sizes(sizes);
        }
        if let Some(colors) = self.colors {
            plot = plot.colors(colors);
        }
        if let Some(label) = self.label {
            plot = plot.label(label);
        }

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for error bar plots.
pub struct ErrorBarBuilder<'a> {
    points: LinePlotBuilder<'a>,
    xerr: Option<Vec<f64>>,
    yerr: Option<Vec<f64>>,
    capsize: Option<f64>,
}

impl<'a> ErrorBarBuilder<'a> {
    series_style_setters!(points.style);

    /// Symmetric x errors, one per point.
    pub fn xerr(mut self, xerr: impl IntoPlotData) -> Self {
        self.xerr = Some(xerr.into_plot_data());
        self
    }

    /// Symmetric y errors, one per point.
    pub fn yerr(mut self, yerr: impl IntoPlotData) -> Self {
        self.yerr = Some(yerr.into_plot_data());
        self
    }

    /// Cap half-width in pixels.
    pub fn capsize(mut self, capsize: f64) -> Self {
        self.capsize = Some(capsize);
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        let n = self.points.x.len();
        if let Some(ref xerr) = self.xerr {
            check_lengths(&self.points.x, "xerr", xerr)?;
        }
        if let Some(ref yerr) = self.yerr {
            if yerr.len() != n {
                return Err(PlotError::length_mismatch("yerr", n, yerr.len()));
            }
        }

        let (axes, points) = self.points.into_plot()?;
        let bar_color = points
            .marker_style
            .as_ref()
            .map(|m| m.edge_color.clone())
            .or_else(|| points.line_style.as_ref().map(|l| l.color.clone()))
            .unwrap_or_default();
        let bar_style = LineStyle::new().color(bar_color).width(1.0);

        let mut plot = ErrorBarPlot::new(points, bar_style)
            .xerr(self.xerr)
            .yerr(self.yerr);
        if let Some(capsize) = self.capsize {
            plot = plot.capsize(capsize);
        }
        axes.add_plot(Box::new(plot));
        Ok(axes)
    }
}

/// Builder for filled regions.
pub struct FillBetweenBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y1: Vec<f64>,
    y2: Vec<f64>,
    color: Option<Color>,
    alpha: f64,
    label: Option<String>,
}

impl<'a> FillBetweenBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_lengths(&self.x, "y1", &self.y1)?;
        check_lengths(&self.x, "y2", &self.y2)?;
        let color = self.axes.cycler.color_or_next(self.color);
        let mut plot = FillBetween::new(
            self.x,
            self.y1,
            self.y2,
            FillStyle::new(color).opacity(self.alpha),
        );
        if let Some(label) = self.label {
            plot = plot.label(label);
        }
        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for sampled functions, drawn as a curve.
pub struct FunctionBuilder<'a, F> {
    axes: &'a mut Axes,
    f: F,
    range: Option<(f64, f64)>,
    npts: usize,
    style: SeriesStyle,
}

impl<'a, F> FunctionBuilder<'a, F>
where
    F: Fn(f64) -> f64,
{
    series_style_setters!(style);

    /// The x interval to sample. Defaults to the axes' current x range.
    pub fn range(mut self, start: f64, stop: f64) -> Self {
        self.range = Some((start, stop));
        self
    }

    /// Number of sample points.
    pub fn npts(mut self, npts: usize) -> Self {
        self.npts = npts;
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        if self.npts < 2 {
            return Err(PlotError::InvalidData(format!(
                "function needs at least 2 points, got {}",
                self.npts
            )));
        }
        let (start, stop) = match self.range {
            Some(range) => range,
            None => self
                .axes
                .xlim()
                .or_else(|| self.axes.data_bounds().x_range())
                .unwrap_or_else(|| self.axes.x_view(None)),
        };
        if !(start.is_finite() && stop.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "function range ({}, {}) is not finite",
                start, stop
            )));
        }

        let x = match self.axes.xscale() {
            Scale::Log if start > 0.0 && stop > 0.0 => linspace(start.log10(), stop.log10(), self.npts)
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect(),
            _ => linspace(start, stop, self.npts),
        };
        let y: Vec<f64> = x.iter().map(|&v| (self.f)(v)).collect();

        LinePlotBuilder {
            axes: self.axes,
            x,
            y,
            kind: SeriesKind::Curve,
            style: self.style,
        }
        .build()
    }
}

/// Builder for histograms.
pub struct HistBuilder<'a> {
    axes: &'a mut Axes,
    values: Vec<f64>,
    binning: Binning,
    color: Option<Color>,
    alpha: Option<f64>,
    label: Option<String>,
}

impl<'a> HistBuilder<'a> {
    /// Number of equal-width bins.
    pub fn bins(mut self, bins: usize) -> Self {
        self.binning.bins = Bins::Count(bins);
        self
    }

    /// Explicit bin edges.
    pub fn edges(mut self, edges: impl IntoPlotData) -> Self {
        self.binning.bins = Bins::Edges(edges.into_plot_data());
        self
    }

    /// Bin width; takes precedence over `bins`.
    pub fn binsize(mut self, size: f64) -> Self {
        self.binning.binsize = Some(size);
        self
    }

    /// Histogram range; takes precedence over `min` / `max`.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.binning.range = Some((lo, hi));
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.binning.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.binning.max = Some(max);
        self
    }

    /// Replace all binning parameters at once.
    pub fn binning(mut self, binning: Binning) -> Self {
        self.binning = binning;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        let (edges, counts) = histogram(&self.values, &self.binning)?;
        let color = self.axes.cycler.color_or_next(self.color);
        let style = FillStyle::new(color)
            .opacity(self.alpha.unwrap_or(1.0))
            .stroke(self.axes.theme.plot_background.clone())
            .stroke_width(0.5);
        let mut plot = Histogram::new(edges, counts, style);
        if let Some(label) = self.label {
            plot = plot.label(label);
        }
        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for `axhline` / `axvline`.
pub struct RefLineBuilder<'a> {
    axes: &'a mut Axes,
    orientation: RefLineOrientation,
    value: f64,
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    label: Option<String>,
}

impl<'a> RefLineBuilder<'a> {
    fn new(axes: &'a mut Axes, orientation: RefLineOrientation, value: f64) -> Self {
        RefLineBuilder {
            axes,
            orientation,
            value,
            color: None,
            linewidth: None,
            linestyle: None,
            label: None,
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        if !self.value.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "reference line value {} is not finite",
                self.value
            )));
        }
        let color = self.axes.cycler.color_or_next(self.color);
        let style = LineStyle::new()
            .color(color)
            .width(self.linewidth.unwrap_or(self.axes.theme.line_width))
            .dash(self.linestyle.unwrap_or_default());
        let mut line = RefLine::new(self.orientation, self.value, style);
        if let Some(label) = self.label {
            line = line.label(label);
        }
        self.axes.add_plot(Box::new(line));
        Ok(self.axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::style::TAB10;

    #[test]
    fn test_length_mismatch_rejected() {
        let mut axes = Axes::new();
        let err = axes.plot(vec![1.0, 2.0], vec![1.0]).build().unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(axes.is_empty());

        assert!(axes
            .errorbar(vec![1.0, 2.0], vec![1.0, 2.0])
            .yerr(vec![0.1])
            .build()
            .is_err());
        assert!(axes
            .fill_between(vec![1.0], vec![1.0], vec![1.0, 2.0])
            .build()
            .is_err());
    }

    #[test]
    fn test_plot_cycles_markers_without_line() {
        let mut axes = Axes::new();
        let (line, marker) =
            SeriesStyle::default().resolve(&mut axes, SeriesKind::Points);
        assert!(line.is_none());
        assert_eq!(marker.unwrap().marker, Marker::Circle);
        let (_, marker) = SeriesStyle::default().resolve(&mut axes, SeriesKind::Points);
        assert_eq!(marker.unwrap().marker, Marker::ThinDiamond);
    }

    #[test]
    fn test_curve_cycles_dashes_without_marker() {
        let mut axes = Axes::new();
        let (line, marker) = SeriesStyle::default().resolve(&mut axes, SeriesKind::Curve);
        assert_eq!(line.unwrap().dash, DashPattern::Solid);
        assert!(marker.is_none());
        let (line, _) = SeriesStyle::default().resolve(&mut axes, SeriesKind::Curve);
        assert_eq!(line.unwrap().dash, DashPattern::Dashed);
    }

    #[test]
    fn test_explicit_color_does_not_advance_cycle() {
        let mut axes = Axes::new();
        axes.plot(vec![0.0], vec![0.0]).color(Color::RED).build().unwrap();
        assert_eq!(axes.cycler.color.peek(), Some(&TAB10[0]));
        axes.plot(vec![0.0], vec![0.0]).build().unwrap();
        assert_eq!(axes.cycler.color.peek(), Some(&TAB10[1]));
    }

    #[test]
    fn test_format_string_controls_points() {
        let mut axes = Axes::new();
        let style = SeriesStyle {
            format: Some("r-".to_string()),
            ..Default::default()
        };
        let (line, marker) = style.resolve(&mut axes, SeriesKind::Points);
        assert_eq!(line.unwrap().color, Color::from("r"));
        assert!(marker.is_none());
    }

    #[test]
    fn test_function_defaults_to_data_range() {
        let mut axes = Axes::new();
        axes.plot(vec![2.0, 4.0], vec![0.0, 1.0]).build().unwrap();
        axes.function(|x| x * x).npts(3).build().unwrap();
        assert_eq!(axes.len(), 2);
        assert_eq!(axes.data_bounds().y_range(), Some((0.0, 16.0)));
    }

    #[test]
    fn test_function_needs_two_points() {
        let mut axes = Axes::new();
        assert!(axes.function(f64::sin).npts(1).build().is_err());
    }

    #[test]
    fn test_hist_and_reflines() {
        let mut axes = Axes::new();
        axes.hist(vec![1.0, 2.0, 2.5, 3.0])
            .bins(2)
            .label("counts")
            .build()
            .unwrap()
            .axvline(2.0)
            .build()
            .unwrap();
        assert_eq!(axes.len(), 2);
        assert_eq!(axes.legend.as_ref().unwrap().entries.len(), 1);
        assert!(axes.hist(Vec::<f64>::new()).build().is_err());
        assert!(axes.axhline(f64::NAN).build().is_err());
    }
}

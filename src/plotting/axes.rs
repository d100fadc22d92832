//! Axes: one coordinate region of a figure.

use log::debug;

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{AxisConfig, Bounds, GridConfig, Legend, RenderContext};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::options::{AxisOptions, LegendSetting};
use crate::plotting::plot::{DataFilter, Plot};
use crate::plotting::scale::{AxisScale, Scale};
use crate::plotting::style::{
    DominantBaseline, FillStyle, LineStyle, MultiCycler, TextAnchor, ThemeConfig,
};

/// Default autoscale padding, as a fraction of the data span.
pub const DEFAULT_MARGIN: f64 = 0.05;

/// An axes object representing a single plot area.
pub struct Axes {
    /// Position within figure (normalized coordinates, y up)
    pub position: Bounds,
    x_scale: Scale,
    y_scale: Scale,
    plots: Vec<Box<dyn Plot>>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Legend; entries are collected as labeled plots are added
    pub legend: Option<Legend>,
    pub grid: GridConfig,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    x_lim: Option<(f64, f64)>,
    y_lim: Option<(f64, f64)>,
    margin: f64,
    aspect: Option<f64>,
    pub(crate) cycler: MultiCycler,
    pub theme: ThemeConfig,
}

impl Axes {
    /// Create a new axes with default settings.
    pub fn new() -> Self {
        Axes::with_theme(ThemeConfig::default())
    }

    /// Create a new axes styled by `theme`.
    pub fn with_theme(theme: ThemeConfig) -> Self {
        let mut axes = Axes {
            position: Bounds::new(0.125, 0.9, 0.11, 0.88),
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            plots: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: None,
            grid: GridConfig::from_theme(&theme),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            x_lim: None,
            y_lim: None,
            margin: DEFAULT_MARGIN,
            aspect: None,
            cycler: MultiCycler::new(theme.color_cycle.clone()),
            theme: ThemeConfig::default(),
        };
        axes.set_theme(theme);
        axes
    }

    /// Restyle with a theme. Plots already added keep their colors.
    pub fn set_theme(&mut self, theme: ThemeConfig) {
        self.grid = GridConfig::from_theme(&theme).visible(self.grid.visible || theme.show_grid);
        for axis in [&mut self.x_axis, &mut self.y_axis] {
            axis.line_style = LineStyle::new()
                .color(theme.axis_color.clone())
                .width(theme.axis_width);
            axis.tick_label_style = theme.tick_style.clone();
        }
        self.cycler = MultiCycler::new(theme.color_cycle.clone());
        self.theme = theme;
    }

    /// Set the position within the figure.
    pub fn position(mut self, left: f64, right: f64, bottom: f64, top: f64) -> Self {
        self.position = Bounds::new(left, right, bottom, top);
        self
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis label.
    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.x_label = Some(label.into());
        self
    }

    /// Set the y-axis label.
    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.y_label = Some(label.into());
        self
    }

    /// Set the x-axis limits.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> PlotResult<&mut Self> {
        self.x_lim = Some(checked_limits(self.x_scale, min, max)?);
        Ok(self)
    }

    /// Set the y-axis limits.
    pub fn set_ylim(&mut self, min: f64, max: f64) -> PlotResult<&mut Self> {
        self.y_lim = Some(checked_limits(self.y_scale, min, max)?);
        Ok(self)
    }

    /// Set the x-axis scale.
    pub fn set_xscale(&mut self, scale: Scale) -> PlotResult<&mut Self> {
        if let Some((lo, hi)) = self.x_lim {
            checked_limits(scale, lo, hi)?;
        }
        self.x_scale = scale;
        Ok(self)
    }

    /// Set the y-axis scale.
    pub fn set_yscale(&mut self, scale: Scale) -> PlotResult<&mut Self> {
        if let Some((lo, hi)) = self.y_lim {
            checked_limits(scale, lo, hi)?;
        }
        self.y_scale = scale;
        Ok(self)
    }

    /// Set the autoscale padding for both axes.
    pub fn set_margin(&mut self, margin: f64) -> PlotResult<&mut Self> {
        if !(margin >= 0.0 && margin.is_finite()) {
            return Err(PlotError::InvalidConfig(format!(
                "margin must be non-negative, got {}",
                margin
            )));
        }
        self.margin = margin;
        Ok(self)
    }

    /// Fix the plotting area's height / width ratio.
    pub fn set_aspect(&mut self, aspect: f64) -> PlotResult<&mut Self> {
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(PlotError::InvalidConfig(format!(
                "aspect ratio must be positive, got {}",
                aspect
            )));
        }
        self.aspect = Some(aspect);
        Ok(self)
    }

    /// Enable or disable the grid.
    pub fn grid(&mut self, visible: bool) -> &mut Self {
        self.grid.visible = visible;
        self
    }

    /// Show the legend.
    pub fn legend(&mut self) -> &mut Self {
        self.legend.get_or_insert_with(Legend::new).visible = true;
        self
    }

    /// Replace the legend's look and placement, keeping its entries.
    pub fn set_legend(&mut self, legend: Legend) -> &mut Self {
        match self.legend {
            Some(ref mut current) => current.restyle(&legend),
            None => self.legend = Some(legend),
        }
        self
    }

    /// Apply every option that is set. Validation happens before anything changes.
    pub fn set(&mut self, options: &AxisOptions) -> PlotResult<&mut Self> {
        let xscale = options.xscale.unwrap_or(self.x_scale);
        let yscale = options.yscale.unwrap_or(self.y_scale);
        if let Some((lo, hi)) = options.xlim.or(self.x_lim) {
            checked_limits(xscale, lo, hi)?;
        }
        if let Some((lo, hi)) = options.ylim.or(self.y_lim) {
            checked_limits(yscale, lo, hi)?;
        }
        if let Some(margin) = options.margin {
            if !(margin >= 0.0 && margin.is_finite()) {
                return Err(PlotError::InvalidConfig(format!(
                    "margin must be non-negative, got {}",
                    margin
                )));
            }
        }
        if let Some(aspect) = options.aspect {
            if !(aspect > 0.0 && aspect.is_finite()) {
                return Err(PlotError::InvalidConfig(format!(
                    "aspect ratio must be positive, got {}",
                    aspect
                )));
            }
        }

        self.x_scale = xscale;
        self.y_scale = yscale;
        if let Some((lo, hi)) = options.xlim {
            self.x_lim = Some(checked_limits(xscale, lo, hi)?);
        }
        if let Some((lo, hi)) = options.ylim {
            self.y_lim = Some(checked_limits(yscale, lo, hi)?);
        }
        if let Some(margin) = options.margin {
            self.margin = margin;
        }
        if let Some(aspect) = options.aspect {
            self.aspect = Some(aspect);
        }
        if let Some(ref label) = options.xlabel {
            self.set_xlabel(label.clone());
        }
        if let Some(ref label) = options.ylabel {
            self.set_ylabel(label.clone());
        }
        if let Some(ref title) = options.title {
            self.set_title(title.clone());
        }
        if let Some(grid) = options.grid {
            self.grid.visible = grid;
        }
        match options.legend {
            Some(LegendSetting::Show(true)) => {
                self.legend();
            }
            Some(LegendSetting::Show(false)) => {
                if let Some(ref mut legend) = self.legend {
                    legend.visible = false;
                }
            }
            Some(LegendSetting::Custom(ref legend)) => {
                self.set_legend(legend.clone());
            }
            None => {}
        }
        Ok(self)
    }

    pub fn xscale(&self) -> Scale {
        self.x_scale
    }

    pub fn yscale(&self) -> Scale {
        self.y_scale
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.x_lim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.y_lim
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn aspect(&self) -> Option<f64> {
        self.aspect
    }

    /// Number of plot elements drawn on this axes.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Add a plot to this axes.
    pub fn add_plot(&mut self, plot: Box<dyn Plot>) {
        if let Some(entry) = plot.legend_entry() {
            self.legend
                .get_or_insert_with(|| Legend::new().visible(false))
                .add_entry(entry);
        }
        debug!("Added {:?} plot element #{}", plot.label(), self.plots.len());
        self.plots.push(plot);
    }

    fn filter(&self) -> DataFilter {
        DataFilter {
            x: self.x_scale,
            y: self.y_scale,
        }
    }

    /// Extent of the data on each axis, before padding.
    pub fn data_bounds(&self) -> Bounds {
        self.bounds_with(self.filter())
    }

    /// Extent of the data that `filter` accepts.
    pub(crate) fn bounds_with(&self, filter: DataFilter) -> Bounds {
        let mut bounds = Bounds::empty();
        for plot in &self.plots {
            if let Some(b) = plot.bounds(filter) {
                bounds.include_bounds(&b);
            }
        }
        bounds
    }

    /// The x range to draw: explicit limits, else the (shared) data range padded.
    pub fn x_view(&self, shared: Option<(f64, f64)>) -> (f64, f64) {
        let data = shared.or_else(|| self.data_bounds().x_range());
        view_range(self.x_scale, self.x_lim, data, self.margin)
    }

    /// The y range to draw: explicit limits, else the (shared) data range padded.
    pub fn y_view(&self, shared: Option<(f64, f64)>) -> (f64, f64) {
        let data = shared.or_else(|| self.data_bounds().y_range());
        view_range(self.y_scale, self.y_lim, data, self.margin)
    }

    /// Pixel box of the plotting area in a `width` x `height` figure.
    pub fn area(&self, width: f64, height: f64) -> Bounds {
        let mut area = Bounds::new(
            self.position.x_min * width,
            self.position.x_max * width,
            (1.0 - self.position.y_max) * height,
            (1.0 - self.position.y_min) * height,
        );
        if let Some(aspect) = self.aspect {
            let (cx, cy) = area.center();
            let (w, h) = (area.width(), area.height());
            let (w, h) = if h / w > aspect { (w, w * aspect) } else { (h / aspect, h) };
            area = Bounds::new(cx - w / 2.0, cx + w / 2.0, cy - h / 2.0, cy + h / 2.0);
        }
        area
    }

    /// Render this axes into the figure's backend.
    pub fn render(
        &self,
        backend: &mut SvgBackend,
        index: usize,
        shared: (Option<(f64, f64)>, Option<(f64, f64)>),
    ) -> PlotResult<()> {
        let area = self.area(backend.width, backend.height);

        let mut x_scale = self.x_scale.build();
        let mut y_scale = self.y_scale.build();
        let (x_lo, x_hi) = self.x_view(shared.0);
        let (y_lo, y_hi) = self.y_view(shared.1);
        x_scale.set_range(x_lo, x_hi)?;
        y_scale.set_range(y_lo, y_hi)?;
        debug!(
            "Axes {}: x [{}, {}] ({}), y [{}, {}] ({})",
            index, x_lo, x_hi, self.x_scale, y_lo, y_hi, self.y_scale
        );

        backend.start_group(&format!("class=\"axes\" id=\"axes-{}\"", index));
        backend.draw_rect(
            area.x_min,
            area.y_min,
            area.width(),
            area.height(),
            &FillStyle::new(self.theme.plot_background.clone()),
        );

        if self.grid.visible {
            self.render_grid(&area, x_scale.as_ref(), y_scale.as_ref(), backend);
        }

        let ctx = RenderContext::new(x_scale.as_ref(), y_scale.as_ref(), area);
        backend.start_clip(
            &format!("axes-clip-{}", index),
            (area.x_min, area.y_min, area.width(), area.height()),
        );
        for plot in &self.plots {
            plot.render(&ctx, backend);
        }
        backend.end_group();

        self.render_axes(&area, x_scale.as_ref(), y_scale.as_ref(), backend);
        self.render_labels(&area, backend);

        if let Some(ref legend) = self.legend {
            legend.render(&area, backend);
        }
        backend.end_group();
        Ok(())
    }

    fn render_grid(
        &self,
        area: &Bounds,
        x_scale: &dyn AxisScale,
        y_scale: &dyn AxisScale,
        backend: &mut SvgBackend,
    ) {
        let style = &self.grid.style;
        if self.grid.show_x {
            for tick in x_scale.ticks(self.x_axis.num_ticks) {
                let px = area.x_min + x_scale.transform(tick) * area.width();
                backend.draw_line(px, area.y_min, px, area.y_max, style);
            }
        }
        if self.grid.show_y {
            for tick in y_scale.ticks(self.y_axis.num_ticks) {
                let py = area.y_max - y_scale.transform(tick) * area.height();
                backend.draw_line(area.x_min, py, area.x_max, py, style);
            }
        }
    }

    fn render_axes(
        &self,
        area: &Bounds,
        x_scale: &dyn AxisScale,
        y_scale: &dyn AxisScale,
        backend: &mut SvgBackend,
    ) {
        if self.x_axis.visible {
            let axis = &self.x_axis;
            backend.draw_line(area.x_min, area.y_max, area.x_max, area.y_max, &axis.line_style);
            let label_style = axis
                .tick_label_style
                .clone()
                .anchor(TextAnchor::Middle)
                .baseline(DominantBaseline::Hanging);
            for tick in x_scale.ticks(axis.num_ticks) {
                let px = area.x_min + x_scale.transform(tick) * area.width();
                backend.draw_line(px, area.y_max, px, area.y_max + axis.tick_length, &axis.line_style);
                backend.draw_text(
                    px,
                    area.y_max + axis.tick_length + axis.tick_padding,
                    &axis.format_tick(x_scale, tick),
                    &label_style,
                );
            }
        }

        if self.y_axis.visible {
            let axis = &self.y_axis;
            backend.draw_line(area.x_min, area.y_min, area.x_min, area.y_max, &axis.line_style);
            let label_style = axis
                .tick_label_style
                .clone()
                .anchor(TextAnchor::End)
                .baseline(DominantBaseline::Middle);
            for tick in y_scale.ticks(axis.num_ticks) {
                let py = area.y_max - y_scale.transform(tick) * area.height();
                backend.draw_line(area.x_min - axis.tick_length, py, area.x_min, py, &axis.line_style);
                backend.draw_text(
                    area.x_min - axis.tick_length - axis.tick_padding,
                    py,
                    &axis.format_tick(y_scale, tick),
                    &label_style,
                );
            }
        }
    }

    fn render_labels(&self, area: &Bounds, backend: &mut SvgBackend) {
        let (cx, cy) = area.center();

        if let Some(ref title) = self.title {
            let style = self.theme.title_style.clone().anchor(TextAnchor::Middle);
            backend.draw_text(cx, area.y_min - 10.0, title, &style);
        }

        if let Some(ref label) = self.x_label {
            let style = self
                .theme
                .label_style
                .clone()
                .anchor(TextAnchor::Middle)
                .baseline(DominantBaseline::Hanging);
            let offset = self.x_axis.tick_length
                + self.x_axis.tick_padding
                + self.x_axis.tick_label_style.font_size * 1.6;
            backend.draw_text(cx, area.y_max + offset, label, &style);
        }

        if let Some(ref label) = self.y_label {
            let style = self
                .theme
                .label_style
                .clone()
                .anchor(TextAnchor::Middle)
                .rotation(-90.0);
            let offset = self.y_axis.tick_length
                + self.y_axis.tick_padding
                + self.y_axis.tick_label_style.font_size * 4.0;
            backend.draw_text(area.x_min - offset, cy, label, &style);
        }
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Axes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Axes")
            .field("plots", &self.plots.len())
            .field("title", &self.title)
            .field("x_scale", &self.x_scale)
            .field("y_scale", &self.y_scale)
            .field("x_lim", &self.x_lim)
            .field("y_lim", &self.y_lim)
            .finish()
    }
}

fn checked_limits(scale: Scale, min: f64, max: f64) -> PlotResult<(f64, f64)> {
    // Building a scale runs the same validation render will.
    scale.build().set_range(min, max)?;
    Ok((min, max))
}

fn view_range(scale: Scale, lim: Option<(f64, f64)>, data: Option<(f64, f64)>, margin: f64) -> (f64, f64) {
    if let Some(lim) = lim {
        return lim;
    }
    let probe = scale.build();
    match data {
        Some((lo, hi)) if lo < hi => {
            let (lo, hi) = probe.pad(lo, hi, margin);
            if lo.is_finite() && hi.is_finite() {
                (lo, hi)
            } else {
                probe.range()
            }
        }
        Some((lo, hi)) => {
            // Zero span: let the scale widen it.
            let mut s = probe;
            match s.set_range(lo, hi) {
                Ok(()) => s.range(),
                Err(_) => scale.build().range(),
            }
        }
        None => probe.range(),
    }
}

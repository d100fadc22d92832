//! Points with symmetric error bars.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::plot::{DataFilter, LinePlot, Plot};
use crate::plotting::style::{LineStyle, MarkerStyle};

/// A data series with symmetric x and/or y error bars.
#[derive(Debug, Clone)]
pub struct ErrorBarPlot {
    /// The points themselves, with their optional connecting line
    pub points: LinePlot,
    /// Half-widths of the horizontal bars
    pub xerr: Option<Vec<f64>>,
    /// Half-heights of the vertical bars
    pub yerr: Option<Vec<f64>>,
    /// Style of the bars
    pub bar_style: LineStyle,
    /// Cap length in pixels; 0 draws no caps
    pub capsize: f64,
}

impl ErrorBarPlot {
    pub fn new(points: LinePlot, bar_style: LineStyle) -> Self {
        ErrorBarPlot {
            points,
            xerr: None,
            yerr: None,
            bar_style,
            capsize: 3.0,
        }
    }

    pub fn xerr(mut self, xerr: Option<Vec<f64>>) -> Self {
        self.xerr = xerr;
        self
    }

    pub fn yerr(mut self, yerr: Option<Vec<f64>>) -> Self {
        self.yerr = yerr;
        self
    }

    pub fn capsize(mut self, capsize: f64) -> Self {
        self.capsize = capsize.max(0.0);
        self
    }
}

fn err_at(errors: &Option<Vec<f64>>, i: usize) -> f64 {
    errors
        .as_ref()
        .and_then(|e| e.get(i))
        .map(|e| e.abs())
        .filter(|e| e.is_finite())
        .unwrap_or(0.0)
}

impl Plot for ErrorBarPlot {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        let mut any = false;
        for (i, (&x, &y)) in self.points.x.iter().zip(&self.points.y).enumerate() {
            if !(filter.x_ok(x) && filter.y_ok(y)) {
                continue;
            }
            any = true;
            let (dx, dy) = (err_at(&self.xerr, i), err_at(&self.yerr, i));
            for (bx, by) in [(x - dx, y - dy), (x + dx, y + dy)] {
                // A bar end that leaves a log axis is clipped, not counted.
                let bx = if filter.x_ok(bx) { bx } else { x };
                let by = if filter.y_ok(by) { by } else { y };
                bounds.include_point(bx, by);
            }
        }
        any.then_some(bounds)
    }

    fn label(&self) -> Option<&str> {
        self.points.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        self.points.line_style.clone()
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        self.points.marker_style.clone()
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        let cap = self.capsize;
        for (i, (&x, &y)) in self.points.x.iter().zip(&self.points.y).enumerate() {
            let Some((px, py)) = ctx.transform(x, y) else {
                continue;
            };

            let dy = err_at(&self.yerr, i);
            if dy > 0.0 {
                let top = ctx.y_px(y + dy).unwrap_or(ctx.area.y_min);
                let bottom = ctx.y_px(y - dy).unwrap_or(ctx.area.y_max);
                backend.draw_line(px, bottom, px, top, &self.bar_style);
                if cap > 0.0 {
                    backend.draw_line(px - cap, top, px + cap, top, &self.bar_style);
                    backend.draw_line(px - cap, bottom, px + cap, bottom, &self.bar_style);
                }
            }

            let dx = err_at(&self.xerr, i);
            if dx > 0.0 {
                let left = ctx.x_px(x - dx).unwrap_or(ctx.area.x_min);
                let right = ctx.x_px(x + dx).unwrap_or(ctx.area.x_max);
                backend.draw_line(left, py, right, py, &self.bar_style);
                if cap > 0.0 {
                    backend.draw_line(left, py - cap, left, py + cap, &self.bar_style);
                    backend.draw_line(right, py - cap, right, py + cap, &self.bar_style);
                }
            }
        }

        self.points.render(ctx, backend);
    }
}

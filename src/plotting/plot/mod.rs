//! Plot types for visualizing data.

mod errorbar;
mod fill;
mod hist;
mod line;
mod refline;
mod scatter;

pub use errorbar::ErrorBarPlot;
pub use fill::FillBetween;
pub use hist::{histogram, Binning, Bins, Histogram};
pub use line::{FormatSpec, LinePlot};
pub use refline::{RefLine, RefLineOrientation};
pub use scatter::ScatterPlot;

use std::fmt;

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, LegendEntry, RenderContext};
use crate::plotting::scale::Scale;
use crate::plotting::style::{FillStyle, LineStyle, MarkerStyle};

/// Which data values may take part in autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataFilter {
    pub x: Scale,
    pub y: Scale,
}

impl DataFilter {
    pub fn x_ok(&self, v: f64) -> bool {
        accepts(self.x, v)
    }

    pub fn y_ok(&self, v: f64) -> bool {
        accepts(self.y, v)
    }
}

fn accepts(scale: Scale, v: f64) -> bool {
    match scale {
        Scale::Linear => v.is_finite(),
        Scale::Log => v.is_finite() && v > 0.0,
    }
}

/// Bounds of the (x, y) pairs that pass the filter.
pub(crate) fn point_bounds(x: &[f64], y: &[f64], filter: DataFilter) -> Option<Bounds> {
    let mut bounds = Bounds::empty();
    let mut any = false;
    for (&x, &y) in x.iter().zip(y) {
        if filter.x_ok(x) && filter.y_ok(y) {
            bounds.include_point(x, y);
            any = true;
        }
    }
    any.then_some(bounds)
}

/// Trait for plot types that can be rendered.
pub trait Plot: fmt::Debug {
    /// Get the data bounds for this plot, counting only values the filter accepts.
    fn bounds(&self, filter: DataFilter) -> Option<Bounds>;

    /// Get the label for this plot (for legend).
    fn label(&self) -> Option<&str>;

    /// Get the line style for legend display.
    fn line_style(&self) -> Option<LineStyle> {
        None
    }

    /// Get the marker style for legend display.
    fn marker_style(&self) -> Option<MarkerStyle> {
        None
    }

    /// Get the fill style for legend display.
    fn fill_style(&self) -> Option<FillStyle> {
        None
    }

    /// Create a legend entry for this plot.
    fn legend_entry(&self) -> Option<LegendEntry> {
        self.label().map(|label| {
            LegendEntry::new(label)
                .line_style(self.line_style())
                .marker_style(self.marker_style())
                .fill_style(self.fill_style())
        })
    }

    /// Draw the plot through `ctx` into the backend.
    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_bounds_log_filter() {
        let filter = DataFilter {
            x: Scale::Linear,
            y: Scale::Log,
        };
        let b = point_bounds(&[0.0, 1.0, 2.0], &[-1.0, 10.0, 100.0], filter).unwrap();
        assert_eq!(b, Bounds::new(1.0, 2.0, 10.0, 100.0));
        assert!(point_bounds(&[1.0], &[0.0], filter).is_none());
    }

    #[test]
    fn test_point_bounds_skips_nan() {
        let b = point_bounds(&[f64::NAN, 1.0], &[5.0, 2.0], DataFilter::default()).unwrap();
        assert_eq!(b, Bounds::new(1.0, 1.0, 2.0, 2.0));
    }
}

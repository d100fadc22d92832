//! Horizontal and vertical reference lines spanning the plotting area.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::plot::{DataFilter, Plot};
use crate::plotting::style::LineStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefLineOrientation {
    /// Constant y, spanning x
    Horizontal,
    /// Constant x, spanning y
    Vertical,
}

/// A line at a fixed data value across the whole area.
#[derive(Debug, Clone)]
pub struct RefLine {
    pub orientation: RefLineOrientation,
    pub value: f64,
    pub line_style: LineStyle,
    pub label: Option<String>,
}

impl RefLine {
    pub fn new(orientation: RefLineOrientation, value: f64, line_style: LineStyle) -> Self {
        RefLine {
            orientation,
            value,
            line_style,
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Plot for RefLine {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        // Only the fixed axis gets an extent.
        let mut bounds = Bounds::empty();
        match self.orientation {
            RefLineOrientation::Horizontal if filter.y_ok(self.value) => {
                bounds.y_min = self.value;
                bounds.y_max = self.value;
            }
            RefLineOrientation::Vertical if filter.x_ok(self.value) => {
                bounds.x_min = self.value;
                bounds.x_max = self.value;
            }
            _ => return None,
        }
        Some(bounds)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        Some(self.line_style.clone())
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        let area = ctx.area;
        match self.orientation {
            RefLineOrientation::Horizontal => {
                if let Some(py) = ctx.y_px(self.value) {
                    backend.draw_line(area.x_min, py, area.x_max, py, &self.line_style);
                }
            }
            RefLineOrientation::Vertical => {
                if let Some(px) = ctx.x_px(self.value) {
                    backend.draw_line(px, area.y_min, px, area.y_max, &self.line_style);
                }
            }
        }
    }
}

//! Visual elements for plots.

mod axis;
mod grid;
mod legend;

pub use axis::AxisConfig;
pub use grid::GridConfig;
pub use legend::{Legend, LegendEntry, LegendPosition};

use crate::plotting::scale::AxisScale;

/// Bounding box for elements.
///
/// An axis whose min is greater than its max carries no extent. Reference
/// lines use this for the axis they span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Create a new bounds with the given values.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds with no extent on either axis; the identity for `include_bounds`.
    pub fn empty() -> Self {
        Bounds::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    /// Get the width of the bounds.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Get the height of the bounds.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Get the center point.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// The x range, if any point contributed one.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        (self.x_min <= self.x_max).then_some((self.x_min, self.x_max))
    }

    /// The y range, if any point contributed one.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        (self.y_min <= self.y_max).then_some((self.y_min, self.y_max))
    }

    /// Expand bounds to include a point.
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Expand bounds to include another bounds.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Maps data coordinates into the pixel box of one axes.
pub struct RenderContext<'a> {
    pub x_scale: &'a dyn AxisScale,
    pub y_scale: &'a dyn AxisScale,
    /// The pixel box of the plotting area.
    pub area: Bounds,
}

impl<'a> RenderContext<'a> {
    pub fn new(x_scale: &'a dyn AxisScale, y_scale: &'a dyn AxisScale, area: Bounds) -> Self {
        RenderContext {
            x_scale,
            y_scale,
            area,
        }
    }

    /// Pixel x for a data x, or None if the scale cannot place it.
    pub fn x_px(&self, x: f64) -> Option<f64> {
        if !self.x_scale.accepts(x) {
            return None;
        }
        Some(self.area.x_min + self.x_scale.transform(x) * self.area.width())
    }

    /// Pixel y for a data y. SVG y grows downward.
    pub fn y_px(&self, y: f64) -> Option<f64> {
        if !self.y_scale.accepts(y) {
            return None;
        }
        Some(self.area.y_max - self.y_scale.transform(y) * self.area.height())
    }

    /// Transform a data point to pixel coordinates.
    pub fn transform(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((self.x_px(x)?, self.y_px(y)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::{LinearScale, LogScale};

    #[test]
    fn test_empty_bounds_merge() {
        let mut b = Bounds::empty();
        assert_eq!(b.x_range(), None);
        b.include_bounds(&Bounds::new(f64::INFINITY, f64::NEG_INFINITY, 2.0, 2.0));
        assert_eq!(b.x_range(), None);
        assert_eq!(b.y_range(), Some((2.0, 2.0)));
        b.include_point(-1.0, 5.0);
        assert_eq!(b.x_range(), Some((-1.0, -1.0)));
        assert_eq!(b.y_range(), Some((2.0, 5.0)));
    }

    #[test]
    fn test_transform_flips_y() {
        let x = LinearScale::new(0.0, 10.0).unwrap();
        let y = LinearScale::new(0.0, 10.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(100.0, 200.0, 50.0, 150.0));
        assert_eq!(ctx.transform(0.0, 0.0), Some((100.0, 150.0)));
        assert_eq!(ctx.transform(10.0, 10.0), Some((200.0, 50.0)));
    }

    #[test]
    fn test_log_context_drops_non_positive() {
        let x = LinearScale::new(0.0, 1.0).unwrap();
        let y = LogScale::new(1.0, 100.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(0.0, 100.0, 0.0, 100.0));
        assert_eq!(ctx.transform(0.5, 0.0), None);
        assert_eq!(ctx.y_px(10.0), Some(50.0));
    }
}

//! Filled region between two curves.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::plot::{point_bounds, DataFilter, Plot};
use crate::plotting::style::FillStyle;

/// The area between `y1` and `y2` over shared `x`.
#[derive(Debug, Clone)]
pub struct FillBetween {
    pub x: Vec<f64>,
    pub y1: Vec<f64>,
    pub y2: Vec<f64>,
    pub fill_style: FillStyle,
    pub label: Option<String>,
}

impl FillBetween {
    pub fn new(x: Vec<f64>, y1: Vec<f64>, y2: Vec<f64>, fill_style: FillStyle) -> Self {
        FillBetween {
            x,
            y1,
            y2,
            fill_style,
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    // Each run of placeable columns becomes its own polygon.
    fn polygons(&self, ctx: &RenderContext) -> Vec<Vec<(f64, f64)>> {
        let mut polygons = Vec::new();
        let mut upper: Vec<(f64, f64)> = Vec::new();
        let mut lower: Vec<(f64, f64)> = Vec::new();

        let mut flush = |upper: &mut Vec<(f64, f64)>, lower: &mut Vec<(f64, f64)>| {
            if upper.len() >= 2 {
                let mut poly = std::mem::take(upper);
                poly.extend(lower.drain(..).rev());
                polygons.push(poly);
            }
            upper.clear();
            lower.clear();
        };

        for ((&x, &y1), &y2) in self.x.iter().zip(&self.y1).zip(&self.y2) {
            match (ctx.transform(x, y1), ctx.transform(x, y2)) {
                (Some(a), Some(b)) => {
                    upper.push(a);
                    lower.push(b);
                }
                _ => flush(&mut upper, &mut lower),
            }
        }
        flush(&mut upper, &mut lower);
        polygons
    }
}

impl Plot for FillBetween {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        let first = point_bounds(&self.x, &self.y1, filter);
        let second = point_bounds(&self.x, &self.y2, filter);
        match (first, second) {
            (Some(mut a), Some(b)) => {
                a.include_bounds(&b);
                Some(a)
            }
            (a, b) => a.or(b),
        }
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fill_style(&self) -> Option<FillStyle> {
        Some(self.fill_style.clone())
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        for polygon in self.polygons(ctx) {
            backend.draw_polygon(&polygon, &self.fill_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::LinearScale;

    #[test]
    fn test_polygon_outline() {
        let fill = FillBetween::new(
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
            FillStyle::default(),
        );
        let x = LinearScale::new(0.0, 1.0).unwrap();
        let y = LinearScale::new(0.0, 1.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(0.0, 10.0, 0.0, 10.0));
        let polygons = fill.polygons(&ctx);
        assert_eq!(polygons, vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
    }

    #[test]
    fn test_bounds_cover_both_curves() {
        let fill = FillBetween::new(
            vec![0.0, 2.0],
            vec![1.0, 3.0],
            vec![-1.0, 0.0],
            FillStyle::default(),
        );
        let b = fill.bounds(DataFilter::default()).unwrap();
        assert_eq!(b, Bounds::new(0.0, 2.0, -1.0, 3.0));
    }
}

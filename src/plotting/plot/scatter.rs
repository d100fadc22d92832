//! Scatter plot implementation.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::plot::{point_bounds, DataFilter, Plot};
use crate::plotting::style::{Color, MarkerStyle};

/// A scatter plot showing individual data points.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    /// X coordinates
    pub x: Vec<f64>,
    /// Y coordinates
    pub y: Vec<f64>,
    /// Marker style
    pub marker_style: MarkerStyle,
    /// Label for legend
    pub label: Option<String>,
    /// Optional sizes for each point (for bubble charts)
    pub sizes: Option<Vec<f64>>,
    /// Optional colors for each point
    pub colors: Option<Vec<Color>>,
}

impl ScatterPlot {
    /// Create a new scatter plot from x and y data.
    pub fn new(x: Vec<f64>, y: Vec<f64>, marker_style: MarkerStyle) -> Self {
        ScatterPlot {
            x,
            y,
            marker_style,
            label: None,
            sizes: None,
            colors: None,
        }
    }

    /// Set the label for the legend.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set individual sizes for each point (bubble chart).
    pub fn sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Set individual colors for each point.
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    fn style_for(&self, i: usize) -> MarkerStyle {
        let mut style = self.marker_style.clone();
        if let Some(size) = self.sizes.as_ref().and_then(|s| s.get(i)) {
            style.size = *size;
        }
        if let Some(color) = self.colors.as_ref().and_then(|c| c.get(i)) {
            style.fill = color.clone();
            style.edge_color = color.clone();
        }
        style
    }
}

impl Plot for ScatterPlot {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        point_bounds(&self.x, &self.y, filter)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        Some(self.marker_style.clone())
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        let points = self
            .x
            .iter()
            .zip(&self.y)
            .enumerate()
            .filter_map(|(i, (&x, &y))| ctx.transform(x, y).map(|p| (i, p)));

        // Uniform circles share their attributes through one group.
        if self.sizes.is_none() && self.colors.is_none() && self.marker_style.marker.is_circle() {
            let radius = self.marker_style.size / 2.0;
            backend.start_group(&self.marker_style.to_svg_style());
            for (_, (px, py)) in points {
                backend.add_content(format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>",
                    px, py, radius
                ));
            }
            backend.end_group();
            return;
        }

        for (i, (px, py)) in points {
            backend.draw_marker(px, py, &self.style_for(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::LinearScale;
    use crate::plotting::style::Marker;

    fn render(plot: &ScatterPlot) -> String {
        let x = LinearScale::new(0.0, 2.0).unwrap();
        let y = LinearScale::new(0.0, 2.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(0.0, 20.0, 0.0, 20.0));
        let mut backend = SvgBackend::new(20.0, 20.0);
        plot.render(&ctx, &mut backend);
        backend.render()
    }

    #[test]
    fn test_uniform_circles_grouped() {
        let plot = ScatterPlot::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0], MarkerStyle::default());
        let svg = render(&plot);
        assert_eq!(svg.matches("<circle cx").count(), 3);
        assert!(svg.contains("<g fill="));
    }

    #[test]
    fn test_per_point_colors() {
        let plot = ScatterPlot::new(vec![0.0, 1.0], vec![0.0, 1.0], MarkerStyle::new(Marker::Square))
            .colors(vec![Color::RED, Color::BLUE]);
        let svg = render(&plot);
        assert!(svg.contains("rgb(255,0,0)"));
        assert!(svg.contains("rgb(0,0,255)"));
    }
}

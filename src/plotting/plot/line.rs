//! Line plot implementation: a polyline, markers, or both.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::plot::{point_bounds, DataFilter, Plot};
use crate::plotting::style::{Color, DashPattern, LineStyle, Marker, MarkerStyle};

/// Data series drawn as a line through the points, markers at the points, or both.
#[derive(Debug, Clone)]
pub struct LinePlot {
    /// X coordinates
    pub x: Vec<f64>,
    /// Y coordinates
    pub y: Vec<f64>,
    /// Connecting line; None draws points only
    pub line_style: Option<LineStyle>,
    /// Markers; None draws the line only
    pub marker_style: Option<MarkerStyle>,
    /// Label for legend
    pub label: Option<String>,
}

impl LinePlot {
    /// Create a new plot with a default solid line and no markers.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinePlot {
            x,
            y,
            line_style: Some(LineStyle::default()),
            marker_style: None,
            label: None,
        }
    }

    /// Set the label for the legend.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set or remove the connecting line.
    pub fn line_style(mut self, style: Option<LineStyle>) -> Self {
        self.line_style = style;
        self
    }

    /// Set or remove the markers.
    pub fn marker_style(mut self, style: Option<MarkerStyle>) -> Self {
        self.marker_style = style;
        self
    }

    /// Pixel runs of consecutive placeable points. Unplaceable points split the line.
    fn segments(&self, ctx: &RenderContext) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (&x, &y) in self.x.iter().zip(&self.y) {
            match ctx.transform(x, y) {
                Some(p) => current.push(p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

impl Plot for LinePlot {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        point_bounds(&self.x, &self.y, filter)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        self.line_style.clone()
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        self.marker_style.clone()
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        let segments = self.segments(ctx);

        if let Some(ref line) = self.line_style {
            for segment in &segments {
                backend.draw_polyline(segment, line);
            }
        }

        if let Some(ref marker) = self.marker_style {
            for &(px, py) in segments.iter().flatten() {
                backend.draw_marker(px, py, marker);
            }
        }
    }
}

/// The parts of a matplotlib-style format string such as `"r--o"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatSpec {
    pub color: Option<Color>,
    pub dash: Option<DashPattern>,
    pub marker: Option<Marker>,
}

impl FormatSpec {
    /// Parse `[color][linestyle][marker]`, in any order. Unknown characters are ignored.
    pub fn parse(fmt: &str) -> Self {
        let mut spec = FormatSpec::default();
        let mut rest = fmt;
        while let Some(c) = rest.chars().next() {
            if spec.dash.is_none() {
                if let Some(dash) = DashPattern::from_format_str(rest) {
                    rest = &rest[dash.format_len()..];
                    spec.dash = Some(dash);
                    continue;
                }
            }
            if spec.color.is_none() && "bgrcmykw".contains(c) {
                spec.color = Some(Color::from(c.to_string()));
            } else if spec.marker.is_none() {
                if let Some(marker) = Marker::from_format_char(c) {
                    spec.marker = Some(marker);
                }
            }
            rest = &rest[c.len_utf8()..];
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::LinearScale;

    #[test]
    fn test_format_spec() {
        let spec = FormatSpec::parse("r--o");
        assert_eq!(spec.color, Some(Color::from("r")));
        assert_eq!(spec.dash, Some(DashPattern::Dashed));
        assert_eq!(spec.marker, Some(Marker::Circle));

        let spec = FormatSpec::parse("^k:");
        assert_eq!(spec.marker, Some(Marker::Triangle));
        assert_eq!(spec.color, Some(Color::from("k")));
        assert_eq!(spec.dash, Some(DashPattern::Dotted));

        assert_eq!(FormatSpec::parse("o"), FormatSpec {
            marker: Some(Marker::Circle),
            ..Default::default()
        });
    }

    #[test]
    fn test_nan_splits_line() {
        let plot = LinePlot::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, f64::NAN, 1.0, 2.0]);
        let x = LinearScale::new(0.0, 3.0).unwrap();
        let y = LinearScale::new(0.0, 2.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(0.0, 30.0, 0.0, 20.0));

        let segments = plot.segments(&ctx);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0.0, 20.0)]);
        assert_eq!(segments[1].len(), 2);

        let mut backend = SvgBackend::new(30.0, 20.0);
        plot.render(&ctx, &mut backend);
        // The single-point run draws no polyline.
        assert_eq!(backend.render().matches("<polyline").count(), 1);
    }

    #[test]
    fn test_points_only() {
        let plot = LinePlot::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .line_style(None)
            .marker_style(Some(MarkerStyle::new(Marker::Square)));
        let x = LinearScale::new(0.0, 1.0).unwrap();
        let y = LinearScale::new(0.0, 1.0).unwrap();
        let ctx = RenderContext::new(&x, &y, Bounds::new(0.0, 10.0, 0.0, 10.0));
        let mut backend = SvgBackend::new(10.0, 10.0);
        plot.render(&ctx, &mut backend);
        let svg = backend.render();
        assert!(!svg.contains("<polyline"));
        assert_eq!(svg.matches("<path").count(), 2);
    }
}

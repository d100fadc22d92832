//! SVG document builder.

use crate::plotting::style::{Color, FillStyle, LineStyle, MarkerStyle, TextStyle};

/// Accumulates SVG elements for one figure.
#[derive(Debug)]
pub struct SvgBackend {
    /// Image width in pixels
    pub width: f64,
    /// Image height in pixels
    pub height: f64,
    content: Vec<String>,
    defs: Vec<String>,
}

impl SvgBackend {
    /// Create a new SVG backend with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            defs: Vec::new(),
        }
    }

    /// Fill the whole canvas.
    pub fn fill_background(&mut self, color: &Color) {
        let style = FillStyle::new(color.clone());
        self.draw_rect(0.0, 0.0, self.width, self.height, &style);
    }

    /// Add raw SVG content.
    pub fn add_content(&mut self, content: String) {
        self.content.push(content);
    }

    /// Draw a line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.content.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            x1, y1, x2, y2,
            style.to_svg_style()
        ));
    }

    /// Draw a polyline.
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        self.content.push(format!(
            "<polyline points=\"{}\" {}/>",
            points_attr(points),
            style.to_svg_style()
        ));
    }

    /// Draw a closed, filled polygon.
    pub fn draw_polygon(&mut self, points: &[(f64, f64)], style: &FillStyle) {
        if points.len() < 3 {
            return;
        }
        self.content.push(format!(
            "<polygon points=\"{}\" {}/>",
            points_attr(points),
            style.to_svg_style()
        ));
    }

    /// Draw a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        self.content.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            x, y, width, height,
            style.to_svg_style()
        ));
    }

    /// Draw one marker centered at a point.
    pub fn draw_marker(&mut self, x: f64, y: f64, style: &MarkerStyle) {
        let svg = style.render_at(x, y);
        if !svg.is_empty() {
            self.content.push(svg.trim_end().to_string());
        }
    }

    /// Draw text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{:.2},{:.2})\"", style.rotation, x, y)
        } else {
            String::new()
        };

        self.content.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            x, y,
            style.to_svg_attrs(),
            transform,
            escape_xml(text)
        ));
    }

    /// Start a group with optional attributes.
    pub fn start_group(&mut self, attrs: &str) {
        if attrs.is_empty() {
            self.content.push("<g>".to_string());
        } else {
            self.content.push(format!("<g {}>", attrs));
        }
    }

    /// End the current group.
    pub fn end_group(&mut self) {
        self.content.push("</g>".to_string());
    }

    /// Start a group clipped to a rectangle. Close it with `end_group`.
    pub fn start_clip(&mut self, id: &str, area: (f64, f64, f64, f64)) {
        let (x, y, width, height) = area;
        self.defs.push(format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            id, x, y, width, height
        ));
        self.content.push(format!("<g clip-path=\"url(#{})\">", id));
    }

    /// Render the final SVG document.
    pub fn render(self) -> String {
        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
{}  {}
</svg>
"#,
            self.width,
            self.height,
            self.width,
            self.height,
            defs_section,
            self.content.join("\n  ")
        )
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let mut backend = SvgBackend::new(200.0, 100.0);
        backend.start_clip("clip-0", (10.0, 10.0, 180.0, 80.0));
        backend.draw_polyline(&[(0.0, 0.0), (5.0, 5.0)], &LineStyle::new());
        backend.end_group();
        let svg = backend.render();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.contains("<clipPath id=\"clip-0\">"));
        assert!(svg.contains("points=\"0.00,0.00 5.00,5.00\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_degenerate_shapes_skipped() {
        let mut backend = SvgBackend::new(10.0, 10.0);
        backend.draw_polyline(&[(1.0, 1.0)], &LineStyle::new());
        backend.draw_polygon(&[(1.0, 1.0), (2.0, 2.0)], &FillStyle::default());
        let svg = backend.render();
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}

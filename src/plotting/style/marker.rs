//! Marker styles for scatter plots and line plot points.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::color::Color;

/// Marker shapes for data points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Marker {
    /// No marker
    #[default]
    None,
    /// Small filled dot
    Point,
    /// Circle marker
    Circle,
    /// Square marker
    Square,
    /// Upward-pointing triangle
    Triangle,
    /// Downward-pointing triangle
    TriangleDown,
    /// Diamond marker
    Diamond,
    /// Narrow diamond
    ThinDiamond,
    /// Plus sign drawn with two strokes
    Plus,
    /// Plus sign drawn as a filled shape
    FilledPlus,
    /// X drawn with two strokes
    Cross,
    /// X drawn as a filled shape
    FilledX,
    /// Five-pointed star
    Star,
    /// Pentagon marker
    Pentagon,
    /// Hexagon with a vertex on top
    Hexagon,
    /// Hexagon with a flat top
    HexagonFlat,
    /// Custom SVG path, centered at the origin
    Custom(String),
}

impl Marker {
    /// Parse from matplotlib-style format character.
    pub fn from_format_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Marker::Point),
            'o' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::Triangle),
            'v' => Some(Marker::TriangleDown),
            'D' => Some(Marker::Diamond),
            'd' => Some(Marker::ThinDiamond),
            '+' => Some(Marker::Plus),
            'P' => Some(Marker::FilledPlus),
            'x' => Some(Marker::Cross),
            'X' => Some(Marker::FilledX),
            '*' => Some(Marker::Star),
            'p' => Some(Marker::Pentagon),
            'h' => Some(Marker::Hexagon),
            'H' => Some(Marker::HexagonFlat),
            _ => None,
        }
    }

    /// Parse a long marker name, falling back to a single format character.
    pub fn from_name(name: &str) -> Option<Self> {
        let marker = match name {
            "none" => Marker::None,
            "point" => Marker::Point,
            "circle" => Marker::Circle,
            "triangle" | "triangle_up" => Marker::Triangle,
            "triangle_down" => Marker::TriangleDown,
            "square" => Marker::Square,
            "pentagon" => Marker::Pentagon,
            "filled_plus" => Marker::FilledPlus,
            "star" => Marker::Star,
            "hexagon" => Marker::Hexagon,
            "plus" => Marker::Plus,
            "x" => Marker::Cross,
            "filled_x" => Marker::FilledX,
            "diamond" | "thick_diamond" => Marker::Diamond,
            "thin_diamond" => Marker::ThinDiamond,
            _ => {
                let mut chars = name.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => Marker::from_format_char(c),
                    _ => None,
                };
            }
        };
        Some(marker)
    }

    /// Generate SVG path data for the marker centered at origin.
    /// The size parameter is the radius (half the marker size).
    pub fn to_svg_path(&self, size: f64) -> Option<String> {
        match self {
            Marker::None | Marker::Point | Marker::Circle => None,
            Marker::Square => Some(polygon(&[(-size, -size), (size, -size), (size, size), (-size, size)])),
            Marker::Triangle => {
                let h = size * 1.1547;
                Some(polygon(&[(0.0, -h), (-size, h * 0.5), (size, h * 0.5)]))
            }
            Marker::TriangleDown => {
                let h = size * 1.1547;
                Some(polygon(&[(0.0, h), (-size, -h * 0.5), (size, -h * 0.5)]))
            }
            Marker::Diamond => {
                let s = size * 1.2;
                Some(polygon(&[(0.0, -s), (s, 0.0), (0.0, s), (-s, 0.0)]))
            }
            Marker::ThinDiamond => {
                let s = size * 1.2;
                let w = s * 0.6;
                Some(polygon(&[(0.0, -s), (w, 0.0), (0.0, s), (-w, 0.0)]))
            }
            Marker::Plus => Some(format!(
                "M{:.2},0 L{:.2},0 M0,{:.2} L0,{:.2}",
                -size, size, -size, size
            )),
            Marker::Cross => {
                let s = size * 0.707;
                Some(format!(
                    "M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}",
                    -s, -s, s, s, -s, s, s, -s
                ))
            }
            Marker::FilledPlus => Some(polygon(&plus_outline(size, 0.0))),
            Marker::FilledX => Some(polygon(&plus_outline(size, FRAC_PI_4))),
            Marker::Star => Some(polygon(&radial(10, |i| {
                let r = if i % 2 == 0 { size } else { size * 0.4 };
                (r, PI * i as f64 / 5.0 - FRAC_PI_2)
            }))),
            Marker::Pentagon => Some(polygon(&radial(5, |i| {
                (size, 2.0 * PI * i as f64 / 5.0 - FRAC_PI_2)
            }))),
            Marker::Hexagon => Some(polygon(&radial(6, |i| {
                (size, PI * i as f64 / 3.0 - FRAC_PI_2)
            }))),
            Marker::HexagonFlat => Some(polygon(&radial(6, |i| (size, PI * i as f64 / 3.0)))),
            Marker::Custom(path) => Some(path.clone()),
        }
    }

    /// Check if this marker should be rendered as a circle element.
    pub fn is_circle(&self) -> bool {
        matches!(self, Marker::Circle | Marker::Point)
    }

    /// Markers drawn only with strokes; they take the fill color as stroke.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Marker::Plus | Marker::Cross)
    }
}

fn radial(n: usize, at: impl Fn(usize) -> (f64, f64)) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let (r, angle) = at(i);
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

// Twelve-point plus outline, optionally rotated.
fn plus_outline(size: f64, rotation: f64) -> Vec<(f64, f64)> {
    let s = size;
    let w = size * 0.3;
    let (sin, cos) = rotation.sin_cos();
    [
        (-w, -s), (w, -s), (w, -w), (s, -w), (s, w), (w, w),
        (w, s), (-w, s), (-w, w), (-s, w), (-s, -w), (-w, -w),
    ]
    .iter()
    .map(|&(x, y)| (x * cos - y * sin, x * sin + y * cos))
    .collect()
}

fn polygon(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        path.push_str(&format!("{}{:.2},{:.2}", cmd, x, y));
    }
    path.push_str(" Z");
    path
}

/// Style configuration for markers.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// The marker shape
    pub marker: Marker,
    /// Marker size (diameter in pixels)
    pub size: f64,
    /// Fill color
    pub fill: Color,
    /// Edge/stroke color
    pub edge_color: Color,
    /// Edge/stroke width
    pub edge_width: f64,
    /// Fill opacity
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Create a new marker style.
    pub fn new(marker: Marker) -> Self {
        MarkerStyle {
            marker,
            ..Default::default()
        }
    }

    /// Set the marker size.
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set fill and edge to the same color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.edge_color = color.clone();
        self.fill = color;
        self
    }

    /// Set the fill color.
    pub fn fill(mut self, color: impl Into<Color>) -> Self {
        self.fill = color.into();
        self
    }

    /// Set the edge color.
    pub fn edge_color(mut self, color: impl Into<Color>) -> Self {
        self.edge_color = color.into();
        self
    }

    /// Set the fill opacity.
    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        if self.marker.is_stroked() {
            let mut attrs = vec![
                "fill=\"none\"".to_string(),
                format!("stroke=\"{}\"", self.fill.to_svg_string()),
                format!("stroke-width=\"{}\"", self.edge_width.max(1.5)),
            ];
            let opacity = self.fill_opacity * self.fill.alpha();
            if opacity < 1.0 {
                attrs.push(format!("stroke-opacity=\"{}\"", opacity));
            }
            return attrs.join(" ");
        }

        let mut attrs = vec![
            format!("fill=\"{}\"", self.fill.to_svg_string()),
            format!("stroke=\"{}\"", self.edge_color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.edge_width),
        ];

        let opacity = self.fill_opacity * self.fill.alpha();
        if opacity < 1.0 {
            attrs.push(format!("fill-opacity=\"{}\"", opacity));
        }
        if self.edge_color.alpha() < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.edge_color.alpha()));
        }

        attrs.join(" ")
    }

    /// Render the marker at a specific position, returning SVG elements.
    pub fn render_at(&self, x: f64, y: f64) -> String {
        let style = self.to_svg_style();
        let radius = match self.marker {
            Marker::Point => self.size / 4.0,
            _ => self.size / 2.0,
        };

        if self.marker.is_circle() {
            format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>\n",
                x, y, radius, style
            )
        } else if let Some(path) = self.marker.to_svg_path(radius) {
            format!(
                "<path d=\"{}\" transform=\"translate({:.2},{:.2})\" {}/>\n",
                path, x, y, style
            )
        } else {
            String::new()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            marker: Marker::Circle,
            size: 6.0,
            fill: Color::default(),
            edge_color: Color::default(),
            edge_width: 1.0,
            fill_opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Marker::from_name("thin_diamond"), Some(Marker::ThinDiamond));
        assert_eq!(Marker::from_name("triangle_up"), Some(Marker::Triangle));
        assert_eq!(Marker::from_name("filled_x"), Some(Marker::FilledX));
        assert_eq!(Marker::from_name("P"), Some(Marker::FilledPlus));
        assert_eq!(Marker::from_name("o"), Some(Marker::Circle));
        assert_eq!(Marker::from_name("blob"), None);
        assert_eq!(Marker::from_name(""), None);
    }

    #[test]
    fn test_render_at() {
        let circle = MarkerStyle::new(Marker::Circle).size(10.0).render_at(5.0, 5.0);
        assert!(circle.starts_with("<circle"));
        assert!(circle.contains("r=\"5.00\""));

        let star = MarkerStyle::new(Marker::Star).render_at(0.0, 0.0);
        assert!(star.contains("translate(0.00,0.00)"));
        assert_eq!(star.matches(" L").count(), 9);

        assert!(MarkerStyle::new(Marker::None).render_at(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_stroked_marker_uses_fill_as_stroke() {
        let style = MarkerStyle::new(Marker::Cross).fill(Color::RED).to_svg_style();
        assert!(style.contains("fill=\"none\""));
        assert!(style.contains("stroke=\"rgb(255,0,0)\""));
    }
}

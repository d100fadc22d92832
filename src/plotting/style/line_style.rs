//! Line styling options.

use super::color::Color;

/// Dash pattern for lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashPattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line (default dash length)
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash-dot pattern
    DashDot,
    /// Alternating dash-dot-dot pattern
    DashDotDot,
    /// Custom on/off sequence, in multiples of the line width
    Custom(Vec<f64>),
}

impl DashPattern {
    /// Convert to an SVG stroke-dasharray value for a line of `width` pixels.
    pub fn to_svg_dasharray(&self, width: f64) -> Option<String> {
        let join = |arr: &[f64]| {
            arr.iter()
                .map(|v| format!("{:.1}", v))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            DashPattern::Solid => None,
            DashPattern::Dashed => Some("8,4".to_string()),
            DashPattern::Dotted => Some("2,2".to_string()),
            DashPattern::DashDot => Some("8,4,2,4".to_string()),
            DashPattern::DashDotDot => Some("8,4,2,4,2,4".to_string()),
            DashPattern::Custom(arr) if arr.is_empty() => None,
            DashPattern::Custom(arr) => {
                let scale = width.max(1.0);
                Some(join(&arr.iter().map(|v| v * scale).collect::<Vec<_>>()))
            }
        }
    }

    /// Parse from matplotlib-style format string (prefix match).
    pub fn from_format_str(s: &str) -> Option<Self> {
        // Check longest patterns first
        if s.starts_with("--") {
            Some(DashPattern::Dashed)
        } else if s.starts_with("-.") {
            Some(DashPattern::DashDot)
        } else if s.starts_with(':') {
            Some(DashPattern::Dotted)
        } else if s.starts_with('-') {
            Some(DashPattern::Solid)
        } else {
            None
        }
    }

    /// Parse a long name ("dashed") or a format token ("--").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(DashPattern::Solid),
            "dashed" => Some(DashPattern::Dashed),
            "dotted" => Some(DashPattern::Dotted),
            "dashdot" => Some(DashPattern::DashDot),
            "dashdotdot" => Some(DashPattern::DashDotDot),
            _ => match DashPattern::from_format_str(name) {
                // Only accept a token that is the whole string.
                Some(dash) if matches!(name, "-" | "--" | "-." | ":") => Some(dash),
                _ => None,
            },
        }
    }

    /// Number of format-string characters consumed by this pattern.
    pub(crate) fn format_len(&self) -> usize {
        match self {
            DashPattern::Dashed | DashPattern::DashDot => 2,
            _ => 1,
        }
    }
}

/// Style configuration for lines.
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Dash pattern
    pub dash: DashPattern,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl LineStyle {
    /// Create a new line style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the dash pattern.
    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Set the line cap style.
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        let mut attrs = vec![
            format!("stroke=\"{}\"", self.color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.width),
            format!("stroke-linecap=\"{}\"", self.cap.to_svg_string()),
            format!("stroke-linejoin=\"{}\"", self.join.to_svg_string()),
            "fill=\"none\"".to_string(),
        ];

        let opacity = self.opacity * self.color.alpha();
        if opacity < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", opacity));
        }

        if let Some(dasharray) = self.dash.to_svg_dasharray(self.width) {
            attrs.push(format!("stroke-dasharray=\"{}\"", dasharray));
        }

        attrs.join(" ")
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            dash: DashPattern::Solid,
            cap: LineCap::Round,
            join: LineJoin::Round,
            opacity: 1.0,
        }
    }
}

/// Line cap styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end at the exact endpoint
    Butt,
    /// Rounded end
    #[default]
    Round,
    /// Square end extending past the endpoint
    Square,
}

impl LineCap {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Line join styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner
    Miter,
    /// Rounded corner
    #[default]
    Round,
    /// Beveled corner
    Bevel,
}

impl LineJoin {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_from_name() {
        assert_eq!(DashPattern::from_name("dashed"), Some(DashPattern::Dashed));
        assert_eq!(DashPattern::from_name("--"), Some(DashPattern::Dashed));
        assert_eq!(DashPattern::from_name("-."), Some(DashPattern::DashDot));
        assert_eq!(DashPattern::from_name("-o"), None);
        assert_eq!(DashPattern::from_name("wavy"), None);
    }

    #[test]
    fn test_custom_dash_scales_with_width() {
        let dash = DashPattern::Custom(vec![1.0, 1.0]);
        assert_eq!(dash.to_svg_dasharray(2.0).as_deref(), Some("2.0,2.0"));
        assert_eq!(DashPattern::Custom(vec![]).to_svg_dasharray(2.0), None);
    }

    #[test]
    fn test_alpha_feeds_stroke_opacity() {
        let style = LineStyle::new().color(Color::rgba(0, 0, 0, 0.5));
        assert!(style.to_svg_style().contains("stroke-opacity=\"0.5\""));
    }
}

//! Legend configuration and rendering.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::Bounds;
use crate::plotting::style::{
    Color, DominantBaseline, FillStyle, LineStyle, MarkerStyle, TextStyle,
};

/// Position of the legend inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LegendPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Center,
    /// Custom position (x, y in normalized axes coordinates)
    Custom(f64, f64),
}

impl LegendPosition {
    /// Parse a location string such as `"upper right"` or `"center left"`.
    pub fn from_loc(loc: &str) -> Option<Self> {
        let loc = loc.trim().to_ascii_lowercase();
        let position = match loc.as_str() {
            "best" | "upper right" => LegendPosition::TopRight,
            "upper left" => LegendPosition::TopLeft,
            "lower left" => LegendPosition::BottomLeft,
            "lower right" => LegendPosition::BottomRight,
            "right" | "center right" => LegendPosition::Right,
            "center left" => LegendPosition::Left,
            "upper center" => LegendPosition::Top,
            "lower center" => LegendPosition::Bottom,
            "center" => LegendPosition::Center,
            _ => return None,
        };
        Some(position)
    }

    /// Get the anchor point for this position (in normalized coordinates).
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            LegendPosition::TopLeft => (0.0, 1.0),
            LegendPosition::TopRight => (1.0, 1.0),
            LegendPosition::BottomLeft => (0.0, 0.0),
            LegendPosition::BottomRight => (1.0, 0.0),
            LegendPosition::Top => (0.5, 1.0),
            LegendPosition::Bottom => (0.5, 0.0),
            LegendPosition::Left => (0.0, 0.5),
            LegendPosition::Right => (1.0, 0.5),
            LegendPosition::Center => (0.5, 0.5),
            LegendPosition::Custom(x, y) => (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
        }
    }
}

/// A single entry in the legend.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    /// Label text
    pub label: String,
    /// Line style (if applicable)
    pub line_style: Option<LineStyle>,
    /// Marker style (if applicable)
    pub marker_style: Option<MarkerStyle>,
    /// Fill style (for histograms and filled regions)
    pub fill_style: Option<FillStyle>,
}

impl LegendEntry {
    /// Create a new legend entry with just a label.
    pub fn new(label: impl Into<String>) -> Self {
        LegendEntry {
            label: label.into(),
            line_style: None,
            marker_style: None,
            fill_style: None,
        }
    }

    pub fn line_style(mut self, style: Option<LineStyle>) -> Self {
        self.line_style = style;
        self
    }

    pub fn marker_style(mut self, style: Option<MarkerStyle>) -> Self {
        self.marker_style = style;
        self
    }

    pub fn fill_style(mut self, style: Option<FillStyle>) -> Self {
        self.fill_style = style;
        self
    }
}

/// Legend configuration.
#[derive(Debug, Clone)]
pub struct Legend {
    /// Legend entries
    pub entries: Vec<LegendEntry>,
    /// Position of the legend
    pub position: LegendPosition,
    /// Whether the legend is visible
    pub visible: bool,
    /// Draw a box behind the entries
    pub frame: bool,
    /// Opacity of the frame background
    pub frame_alpha: f64,
    /// Gap between the legend box and the plotting area edge, in font-size units
    pub border_pad: f64,
    /// Frame background color
    pub background: Color,
    /// Frame edge color
    pub edge_color: Color,
    /// Text style for labels
    pub text_style: TextStyle,
    /// Padding inside the legend box
    pub padding: f64,
    /// Length of the line sample in the legend
    pub line_length: f64,
    /// Gap between line/marker and label
    pub label_gap: f64,
}

impl Legend {
    /// Create a new legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the legend.
    pub fn add_entry(&mut self, entry: LegendEntry) {
        self.entries.push(entry);
    }

    /// Set the position.
    pub fn position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Set the position from a location string. Unknown strings keep the current one.
    pub fn loc(mut self, loc: &str) -> Self {
        match LegendPosition::from_loc(loc) {
            Some(position) => self.position = position,
            None => log::warn!("Unknown legend location '{}', keeping {:?}", loc, self.position),
        }
        self
    }

    /// Set visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Draw or omit the frame.
    pub fn frame(mut self, frame: bool) -> Self {
        self.frame = frame;
        self
    }

    /// Set the frame background opacity.
    pub fn frame_alpha(mut self, alpha: f64) -> Self {
        self.frame_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the border padding in font-size units.
    pub fn border_pad(mut self, pad: f64) -> Self {
        self.border_pad = pad.max(0.0);
        self
    }

    /// Copy the placement and look of `other`, keeping this legend's entries.
    pub(crate) fn restyle(&mut self, other: &Legend) {
        let entries = std::mem::take(&mut self.entries);
        *self = Legend {
            entries,
            ..other.clone()
        };
    }

    /// Size of the legend box in pixels.
    pub fn box_size(&self) -> (f64, f64) {
        let line_height = self.text_style.font_size * 1.5;
        let label_width = self
            .entries
            .iter()
            .map(|e| self.text_style.approx_width(&e.label))
            .fold(0.0, f64::max);
        (
            self.padding * 2.0 + self.line_length + self.label_gap + label_width,
            self.padding * 2.0 + self.entries.len() as f64 * line_height,
        )
    }

    /// Draw the legend into `area`, the pixel box of the plotting area.
    pub fn render(&self, area: &Bounds, backend: &mut SvgBackend) {
        if !self.visible || self.entries.is_empty() {
            return;
        }

        let (width, height) = self.box_size();
        let pad = self.border_pad * self.text_style.font_size;
        let (ax, ay) = self.position.anchor();
        let lx = area.x_min + pad + ax * (area.width() - width - 2.0 * pad);
        let ly = area.y_min + pad + (1.0 - ay) * (area.height() - height - 2.0 * pad);

        backend.start_group("class=\"legend\"");
        if self.frame {
            let style = FillStyle::new(self.background.clone())
                .opacity(self.frame_alpha)
                .stroke(self.edge_color.clone())
                .stroke_width(0.8);
            backend.draw_rect(lx, ly, width, height, &style);
        }

        let line_height = self.text_style.font_size * 1.5;
        let label_style = self.text_style.clone().baseline(DominantBaseline::Middle);
        for (i, entry) in self.entries.iter().enumerate() {
            let ey = ly + self.padding + (i as f64 + 0.5) * line_height;
            let x1 = lx + self.padding;
            let x2 = x1 + self.line_length;
            let mid = (x1 + x2) / 2.0;

            if let Some(ref fill) = entry.fill_style {
                if entry.line_style.is_none() && entry.marker_style.is_none() {
                    let side = self.text_style.font_size * 0.8;
                    backend.draw_rect(mid - side, ey - side / 2.0, side * 2.0, side, fill);
                }
            }
            if let Some(ref line) = entry.line_style {
                backend.draw_line(x1, ey, x2, ey, line);
            }
            if let Some(ref marker) = entry.marker_style {
                backend.draw_marker(mid, ey, marker);
            }

            backend.draw_text(x2 + self.label_gap, ey, &entry.label, &label_style);
        }
        backend.end_group();
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            entries: Vec::new(),
            position: LegendPosition::TopRight,
            visible: true,
            frame: false,
            frame_alpha: 0.8,
            border_pad: 0.5,
            background: Color::WHITE,
            edge_color: Color::rgb(204, 204, 204),
            text_style: TextStyle::new().font_size(10.0),
            padding: 6.0,
            line_length: 20.0,
            label_gap: 8.0,
        }
    }
}

//! Property cycles for successive plot series.

use super::color::{Color, TAB10};
use super::line_style::DashPattern;
use super::marker::Marker;

/// Round-robin over a fixed list of values.
#[derive(Debug, Clone)]
pub struct Cycler<T> {
    items: Vec<T>,
    pos: usize,
}

impl<T: Clone> Cycler<T> {
    pub fn new(items: Vec<T>) -> Self {
        Cycler { items, pos: 0 }
    }

    /// Return the current item and advance. None only for an empty cycle.
    pub fn next_item(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let item = self.items[self.pos % self.items.len()].clone();
        self.pos = (self.pos + 1) % self.items.len();
        Some(item)
    }

    /// The item the next call to `next_item` returns.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.pos % self.items.len().max(1))
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The default marker cycle.
pub fn default_markers() -> Vec<Marker> {
    vec![
        Marker::Circle,
        Marker::ThinDiamond,
        Marker::Triangle,
        Marker::Square,
        Marker::TriangleDown,
        Marker::Hexagon,
        Marker::Pentagon,
        Marker::FilledPlus,
        Marker::HexagonFlat,
        Marker::FilledX,
    ]
}

/// The default line style cycle. Custom patterns are in units of line width.
pub fn default_dashes() -> Vec<DashPattern> {
    vec![
        DashPattern::Solid,
        DashPattern::Dashed,
        DashPattern::Dotted,
        DashPattern::Custom(vec![3.0, 1.0, 1.0, 1.0]),
        DashPattern::Custom(vec![5.0, 5.0]),
        DashPattern::Custom(vec![3.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
        DashPattern::Custom(vec![1.0, 1.0]),
        DashPattern::DashDot,
        DashPattern::Custom(vec![5.0, 10.0]),
        DashPattern::Custom(vec![5.0, 1.0]),
    ]
}

/// Independent color, marker and line style cycles for one axes.
#[derive(Debug, Clone)]
pub struct MultiCycler {
    pub color: Cycler<Color>,
    pub marker: Cycler<Marker>,
    pub dash: Cycler<DashPattern>,
}

impl MultiCycler {
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() { TAB10.to_vec() } else { colors };
        MultiCycler {
            color: Cycler::new(colors),
            marker: Cycler::new(default_markers()),
            dash: Cycler::new(default_dashes()),
        }
    }

    /// Use `explicit` if given, else take the next cycled color.
    pub fn color_or_next(&mut self, explicit: Option<Color>) -> Color {
        explicit
            .or_else(|| self.color.next_item())
            .unwrap_or_default()
    }

    pub fn marker_or_next(&mut self, explicit: Option<Marker>) -> Marker {
        explicit
            .or_else(|| self.marker.next_item())
            .unwrap_or(Marker::Circle)
    }

    pub fn dash_or_next(&mut self, explicit: Option<DashPattern>) -> DashPattern {
        explicit.or_else(|| self.dash.next_item()).unwrap_or_default()
    }
}

impl Default for MultiCycler {
    fn default() -> Self {
        MultiCycler::new(TAB10.to_vec())
    }
}

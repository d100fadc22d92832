//! Grid configuration.

use crate::plotting::style::{Color, LineStyle, ThemeConfig};

/// Configuration for grid lines, drawn at the major ticks.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Whether the grid is visible
    pub visible: bool,
    /// Style for grid lines
    pub style: LineStyle,
    /// Whether to show vertical lines at the x ticks
    pub show_x: bool,
    /// Whether to show horizontal lines at the y ticks
    pub show_y: bool,
}

impl GridConfig {
    /// Grid defaults taken from a theme.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        GridConfig {
            visible: theme.show_grid,
            style: LineStyle::new()
                .color(theme.grid_color.clone())
                .width(theme.grid_width)
                .opacity(theme.grid_opacity),
            show_x: true,
            show_y: true,
        }
    }

    /// Set grid visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the grid color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = color.into();
        self
    }

    /// Set which axes to show grid for.
    pub fn axes(mut self, show_x: bool, show_y: bool) -> Self {
        self.show_x = show_x;
        self.show_y = show_y;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::from_theme(&ThemeConfig::default())
    }
}

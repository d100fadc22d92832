//! Predefined themes for plots.

use std::str::FromStr;

use serde::Deserialize;

use super::color::{Color, TAB10};
use super::text_style::TextStyle;

/// Predefined plot themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// White background, tab10 colors
    #[default]
    Default,
    /// Dark background
    Dark,
    /// Reduced visual elements, no grid
    Minimal,
    /// Gray plot area with white grid
    Seaborn,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "dark" => Ok(Theme::Dark),
            "minimal" => Ok(Theme::Minimal),
            "seaborn" => Ok(Theme::Seaborn),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Theme configuration containing all style settings.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Background color for the figure
    pub background: Color,
    /// Background color for the plot area
    pub plot_background: Color,
    /// Color for axis lines
    pub axis_color: Color,
    /// Color for grid lines
    pub grid_color: Color,
    /// Grid line opacity
    pub grid_opacity: f64,
    /// Whether to show grid by default
    pub show_grid: bool,
    /// Default title style
    pub title_style: TextStyle,
    /// Default label style
    pub label_style: TextStyle,
    /// Default tick label style
    pub tick_style: TextStyle,
    /// Color cycle for plot series
    pub color_cycle: Vec<Color>,
    /// Default line width
    pub line_width: f64,
    /// Default marker size
    pub marker_size: f64,
    /// Axis line width
    pub axis_width: f64,
    /// Grid line width
    pub grid_width: f64,
}

impl Theme {
    /// Get the configuration for this theme.
    pub fn config(&self) -> ThemeConfig {
        match self {
            Theme::Default => ThemeConfig::default_theme(),
            Theme::Dark => ThemeConfig::dark_theme(),
            Theme::Minimal => ThemeConfig::minimal_theme(),
            Theme::Seaborn => ThemeConfig::seaborn_theme(),
        }
    }
}

impl ThemeConfig {
    fn with_text(text: Color, tick: Color, sizes: (f64, f64, f64), bold_title: bool) -> (TextStyle, TextStyle, TextStyle) {
        let mut title = TextStyle::new().font_size(sizes.0).color(text.clone());
        if bold_title {
            title = title.bold();
        }
        (
            title,
            TextStyle::new().font_size(sizes.1).color(text),
            TextStyle::new().font_size(sizes.2).color(tick),
        )
    }

    fn default_theme() -> Self {
        let (title_style, label_style, tick_style) =
            Self::with_text(Color::BLACK, Color::BLACK, (14.0, 12.0, 10.0), true);
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis_color: Color::BLACK,
            grid_color: Color::LIGHT_GRAY,
            grid_opacity: 0.8,
            show_grid: false,
            title_style,
            label_style,
            tick_style,
            color_cycle: TAB10.to_vec(),
            line_width: 1.5,
            marker_size: 6.0,
            axis_width: 1.0,
            grid_width: 0.5,
        }
    }

    fn dark_theme() -> Self {
        let text = Color::rgb(220, 220, 220);
        let (title_style, label_style, tick_style) =
            Self::with_text(text.clone(), text, (14.0, 12.0, 10.0), true);
        ThemeConfig {
            background: Color::rgb(30, 30, 30),
            plot_background: Color::rgb(40, 40, 40),
            axis_color: Color::rgb(180, 180, 180),
            grid_color: Color::rgb(80, 80, 80),
            grid_opacity: 0.5,
            show_grid: true,
            title_style,
            label_style,
            tick_style,
            color_cycle: vec![
                Color::Rgb(0x58, 0xa6, 0xff),
                Color::Rgb(0xf0, 0x88, 0x3e),
                Color::Rgb(0x3f, 0xb9, 0x50),
                Color::Rgb(0xf8, 0x51, 0x49),
                Color::Rgb(0xa3, 0x71, 0xf7),
                Color::Rgb(0xdb, 0x6d, 0x28),
                Color::Rgb(0xff, 0x7b, 0x72),
                Color::Rgb(0x8b, 0x94, 0x9e),
                Color::Rgb(0xd2, 0x99, 0x22),
                Color::Rgb(0x56, 0xd4, 0xdd),
            ],
            line_width: 1.5,
            marker_size: 6.0,
            axis_width: 1.0,
            grid_width: 0.5,
        }
    }

    fn minimal_theme() -> Self {
        let (title_style, label_style, tick_style) =
            Self::with_text(Color::DARK_GRAY, Color::GRAY, (13.0, 11.0, 9.0), false);
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis_color: Color::GRAY,
            grid_color: Color::LIGHT_GRAY,
            grid_opacity: 0.3,
            show_grid: false,
            title_style,
            label_style,
            tick_style,
            color_cycle: TAB10.to_vec(),
            line_width: 1.0,
            marker_size: 5.0,
            axis_width: 0.5,
            grid_width: 0.25,
        }
    }

    fn seaborn_theme() -> Self {
        let (title_style, label_style, tick_style) = Self::with_text(
            Color::rgb(50, 50, 50),
            Color::rgb(100, 100, 100),
            (14.0, 12.0, 10.0),
            true,
        );
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::rgb(234, 234, 242),
            axis_color: Color::rgb(100, 100, 100),
            grid_color: Color::WHITE,
            grid_opacity: 1.0,
            show_grid: true,
            title_style,
            label_style,
            tick_style,
            color_cycle: vec![
                Color::Rgb(0x4c, 0x72, 0xb0),
                Color::Rgb(0xdd, 0x84, 0x52),
                Color::Rgb(0x55, 0xa8, 0x68),
                Color::Rgb(0xc4, 0x4e, 0x52),
                Color::Rgb(0x81, 0x72, 0xb3),
                Color::Rgb(0x93, 0x78, 0x60),
                Color::Rgb(0xda, 0x8b, 0xc3),
                Color::Rgb(0x8c, 0x8c, 0x8c),
                Color::Rgb(0xcc, 0xb9, 0x74),
                Color::Rgb(0x64, 0xb5, 0xcd),
            ],
            line_width: 1.75,
            marker_size: 6.0,
            axis_width: 1.0,
            grid_width: 1.0,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_deserialize() {
        let theme: Theme = serde_json::from_str("\"seaborn\"").unwrap();
        assert_eq!(theme, Theme::Seaborn);
    }

    #[test]
    fn test_default_cycle_is_tab10() {
        assert_eq!(Theme::Default.config().color_cycle, TAB10.to_vec());
    }
}

//! Axis configuration.

use crate::plotting::scale::AxisScale;
use crate::plotting::style::{Color, LineStyle, TextStyle};

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Whether the axis is visible
    pub visible: bool,
    /// Axis line style
    pub line_style: LineStyle,
    /// Length of tick marks in pixels
    pub tick_length: f64,
    /// Style for tick labels
    pub tick_label_style: TextStyle,
    /// Number of ticks to aim for
    pub num_ticks: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Fixed number of decimals for tick labels, overriding the scale's format
    pub tick_decimals: Option<usize>,
}

impl AxisConfig {
    /// Create a new axis configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ticks.
    pub fn num_ticks(mut self, num: usize) -> Self {
        self.num_ticks = num;
        self
    }

    /// Set a fixed tick label precision.
    pub fn tick_decimals(mut self, decimals: usize) -> Self {
        self.tick_decimals = Some(decimals);
        self
    }

    /// Format a tick value as a label.
    pub fn format_tick(&self, scale: &dyn AxisScale, value: f64) -> String {
        match self.tick_decimals {
            Some(decimals) => format!("{:.prec$}", value, prec = decimals),
            None => scale.format_tick(value),
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            visible: true,
            line_style: LineStyle::new().color(Color::BLACK).width(1.0),
            tick_length: 5.0,
            tick_label_style: TextStyle::new().font_size(10.0),
            num_ticks: 6,
            tick_padding: 3.0,
            tick_decimals: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::{LinearScale, LogScale};

    #[test]
    fn test_format_tick_delegates_to_scale() {
        let axis = AxisConfig::new();
        let log = LogScale::new(1.0, 1000.0).unwrap();
        assert_eq!(axis.format_tick(&log, 100.0), "10²");

        let fixed = AxisConfig::new().tick_decimals(3);
        let linear = LinearScale::new(0.0, 1.0).unwrap();
        assert_eq!(fixed.format_tick(&linear, 0.5), "0.500");
    }
}

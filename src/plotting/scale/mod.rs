//! Axis scaling and transformation.

mod linear;
mod log;

pub use self::linear::LinearScale;
pub use self::log::LogScale;

use std::fmt;

use crate::plotting::error::PlotResult;

/// Scale type selectable per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// A fresh transform of this type with the placeholder range.
    pub fn build(self) -> Box<dyn AxisScale> {
        match self {
            Scale::Linear => Box::new(LinearScale::auto()),
            Scale::Log => Box::new(LogScale::auto()),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Linear => write!(f, "linear"),
            Scale::Log => write!(f, "log"),
        }
    }
}

/// Trait for axis scale transformations.
pub trait AxisScale: fmt::Debug {
    /// Which kind of scale this is.
    fn kind(&self) -> Scale;

    /// Transform a data value to normalized coordinates (0.0 - 1.0).
    fn transform(&self, value: f64) -> f64;

    /// Inverse transform from normalized coordinates to data value.
    fn inverse(&self, normalized: f64) -> f64;

    /// Set the data range for this scale. A zero-width range is widened.
    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()>;

    /// Get the current data range.
    fn range(&self) -> (f64, f64);

    /// Generate nice tick values for this scale.
    fn ticks(&self, num_ticks: usize) -> Vec<f64>;

    /// Label for a tick produced by `ticks`.
    fn format_tick(&self, value: f64) -> String;

    /// Whether a data value can be placed on this scale.
    fn accepts(&self, value: f64) -> bool {
        value.is_finite()
    }

    /// Grow `[min, max]` by `margin` of its span, measured in scale space.
    fn pad(&self, min: f64, max: f64, margin: f64) -> (f64, f64);

    /// Clone the scale into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AxisScale>;
}

impl Clone for Box<dyn AxisScale> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Compute "nice" numbers for axis ticks.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick positions for a given range.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if num_ticks < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let tick_spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let nice_min = (min / tick_spacing).floor() * tick_spacing;

    let mut ticks = Vec::new();
    let mut i = 0.0;
    loop {
        // Multiply rather than accumulate so the float error stays bounded.
        let tick = nice_min + i * tick_spacing;
        if tick > max + tick_spacing * 0.001 {
            break;
        }
        if tick >= min - tick_spacing * 0.001 {
            // Snap -0.0 and near-zero residue to 0.
            ticks.push(if tick.abs() < tick_spacing * 1e-9 { 0.0 } else { tick });
        }
        i += 1.0;
    }

    ticks
}

/// Format a tick value given the spacing between neighboring ticks.
pub fn format_number(value: f64, step: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e5 || magnitude < 1e-3 {
        return format!("{:.1e}", value);
    }
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        2
    };
    format!("{:.prec$}", value, prec = decimals.min(6))
}

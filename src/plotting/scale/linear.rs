//! Linear scale transformation.

use super::{format_number, nice_ticks, AxisScale, Scale};
use crate::plotting::error::{PlotError, PlotResult};

/// A linear scale for axis transformation.
#[derive(Debug, Clone)]
pub struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    /// Create a new linear scale with the given range.
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        let mut scale = LinearScale::auto();
        scale.set_range(min, max)?;
        Ok(scale)
    }

    /// Create a linear scale with automatic range (to be set later).
    pub fn auto() -> Self {
        LinearScale { min: 0.0, max: 1.0 }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale::auto()
    }
}

impl AxisScale for LinearScale {
    fn kind(&self) -> Scale {
        Scale::Linear
    }

    fn transform(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.5;
        }
        (value - self.min) / range
    }

    fn inverse(&self, normalized: f64) -> f64 {
        self.min + normalized * (self.max - self.min)
    }

    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PlotError::InvalidConfig(format!(
                "axis limits must be finite, got ({}, {})",
                min, max
            )));
        }
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        if min == max {
            let padding = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            self.min = min - padding;
            self.max = max + padding;
        } else {
            self.min = min;
            self.max = max;
        }
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn ticks(&self, num_ticks: usize) -> Vec<f64> {
        nice_ticks(self.min, self.max, num_ticks)
    }

    fn format_tick(&self, value: f64) -> String {
        let ticks = self.ticks(5);
        let step = match ticks.as_slice() {
            [a, b, ..] => b - a,
            _ => self.max - self.min,
        };
        format_number(value, step)
    }

    fn pad(&self, min: f64, max: f64, margin: f64) -> (f64, f64) {
        let span = max - min;
        (min - span * margin, max + span * margin)
    }

    fn clone_box(&self) -> Box<dyn AxisScale> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        let scale = LinearScale::new(-2.0, 6.0).unwrap();
        assert_eq!(scale.transform(2.0), 0.5);
        assert_eq!(scale.inverse(0.25), 0.0);
    }

    #[test]
    fn test_zero_width_range_widened() {
        let scale = LinearScale::new(3.0, 3.0).unwrap();
        let (lo, hi) = scale.range();
        assert!(lo < 3.0 && hi > 3.0);

        let zero = LinearScale::new(0.0, 0.0).unwrap();
        assert_eq!(zero.range(), (-1.0, 1.0));
    }

    #[test]
    fn test_reversed_and_non_finite_limits() {
        assert_eq!(LinearScale::new(5.0, 1.0).unwrap().range(), (1.0, 5.0));
        assert!(LinearScale::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_pad() {
        let scale = LinearScale::auto();
        assert_eq!(scale.pad(0.0, 10.0, 0.05), (-0.5, 10.5));
    }
}

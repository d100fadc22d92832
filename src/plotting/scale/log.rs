//! Base-10 logarithmic scale.

use super::{format_number, nice_ticks, AxisScale, Scale};
use crate::plotting::error::{PlotError, PlotResult};

/// A log10 scale. Only strictly positive values can be placed on it.
#[derive(Debug, Clone)]
pub struct LogScale {
    min: f64,
    max: f64,
}

impl LogScale {
    /// Create a log scale over a positive range.
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        let mut scale = LogScale::auto();
        scale.set_range(min, max)?;
        Ok(scale)
    }

    /// Create a log scale with a placeholder range of one decade.
    pub fn auto() -> Self {
        LogScale { min: 1.0, max: 10.0 }
    }
}

impl Default for LogScale {
    fn default() -> Self {
        LogScale::auto()
    }
}

impl AxisScale for LogScale {
    fn kind(&self) -> Scale {
        Scale::Log
    }

    fn transform(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return f64::NAN;
        }
        let (lo, hi) = (self.min.log10(), self.max.log10());
        (value.log10() - lo) / (hi - lo)
    }

    fn inverse(&self, normalized: f64) -> f64 {
        let (lo, hi) = (self.min.log10(), self.max.log10());
        10_f64.powf(lo + normalized * (hi - lo))
    }

    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if !(min > 0.0 && max > 0.0) || !min.is_finite() || !max.is_finite() {
            return Err(PlotError::InvalidConfig(format!(
                "log axis limits must be positive and finite, got ({}, {})",
                min, max
            )));
        }
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        if min == max {
            self.min = min / 2.0;
            self.max = max * 2.0;
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
        let first = self.min.log10().ceil() as i32;
        let last = self.max.log10().floor() as i32;
        if last - first < 1 {
            // Less than two decades visible: fall back to linear positions.
            return nice_ticks(self.min, self.max, num_ticks)
                .into_iter()
                .filter(|v| *v > 0.0)
                .collect();
        }
        let count = (last - first + 1) as usize;
        let stride = count.div_ceil(num_ticks.max(2)).max(1);
        (first..=last)
            .step_by(stride)
            .map(|e| 10_f64.powi(e))
            .collect()
    }

    fn format_tick(&self, value: f64) -> String {
        let exponent = value.log10().round();
        if (10_f64.powf(exponent) - value).abs() <= value * 1e-9 {
            format!("10{}", superscript(exponent as i32))
        } else {
            format_number(value, value / 10.0)
        }
    }

    fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value > 0.0
    }

    fn pad(&self, min: f64, max: f64, margin: f64) -> (f64, f64) {
        let (lo, hi) = (min.log10(), max.log10());
        let span = hi - lo;
        (
            10_f64.powf(lo - span * margin),
            10_f64.powf(hi + span * margin),
        )
    }

    fn clone_box(&self) -> Box<dyn AxisScale> {
        Box::new(self.clone())
    }
}

/// Render an integer with Unicode superscript digits.
pub fn superscript(n: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for c in n.unsigned_abs().to_string().chars() {
        if let Some(d) = c.to_digit(10) {
            out.push(DIGITS[d as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_ticks() {
        let scale = LogScale::new(0.5, 2000.0).unwrap();
        assert_eq!(scale.ticks(5), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_many_decades_are_thinned() {
        let scale = LogScale::new(1e-10, 1e10).unwrap();
        let ticks = scale.ticks(5);
        assert!(ticks.len() <= 6);
        assert!((ticks[0] / 1e-10 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_superscript_labels() {
        let scale = LogScale::auto();
        assert_eq!(scale.format_tick(1000.0), "10³");
        assert_eq!(scale.format_tick(0.01), "10⁻²");
        assert_eq!(scale.format_tick(1.0), "10⁰");
        assert_eq!(superscript(12), "¹²");
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogScale::new(0.0, 10.0).is_err());
        assert!(LogScale::new(-1.0, 10.0).is_err());
        let scale = LogScale::auto();
        assert!(!scale.accepts(0.0));
        assert!(scale.accepts(1e-300));
        assert!(scale.transform(-1.0).is_nan());
    }

    #[test]
    fn test_pad_in_log_space() {
        let scale = LogScale::auto();
        let (lo, hi) = scale.pad(1.0, 100.0, 0.5);
        assert!((lo - 0.1).abs() < 1e-12);
        assert!((hi - 1000.0).abs() < 1e-9);
    }
}

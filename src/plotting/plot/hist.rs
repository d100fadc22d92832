//! Histogram binning and bar rendering.

use log::warn;

use crate::plotting::backend::SvgBackend;
use crate::plotting::data::{finite_range, linspace};
use crate::plotting::element::{Bounds, RenderContext};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::{DataFilter, Plot};
use crate::plotting::style::FillStyle;

/// Upper limit on the number of bins a histogram may have.
pub const MAX_BINS: usize = 100_000;

/// How to divide the histogram range.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// This many equal-width bins
    Count(usize),
    /// Explicit, strictly increasing bin edges
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Bins::Count(10)
    }
}

/// Binning parameters. `binsize` wins over `bins`; `range` wins over `min`/`max`.
#[derive(Debug, Clone, Default)]
pub struct Binning {
    pub bins: Bins,
    pub binsize: Option<f64>,
    pub range: Option<(f64, f64)>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Compute bin edges and counts. Values outside the range and non-finite
/// values are ignored; the last bin includes its right edge.
pub fn histogram(values: &[f64], binning: &Binning) -> PlotResult<(Vec<f64>, Vec<f64>)> {
    let edges = bin_edges(values, binning)?;
    let (lo, hi) = (edges[0], edges[edges.len() - 1]);
    let mut counts = vec![0.0; edges.len() - 1];
    let mut skipped = 0usize;
    let last = counts.len() - 1;

    for &v in values {
        if !v.is_finite() || v < lo || v > hi {
            skipped += 1;
            continue;
        }
        let i = edges.partition_point(|e| *e <= v).saturating_sub(1);
        counts[i.min(last)] += 1.0;
    }

    if skipped > 0 {
        warn!("Histogram ignored {} value(s) outside [{}, {}] or not finite", skipped, lo, hi);
    }
    Ok((edges, counts))
}

fn bin_edges(values: &[f64], binning: &Binning) -> PlotResult<Vec<f64>> {
    if binning.binsize.is_none() {
        if let Bins::Edges(ref edges) = binning.bins {
            if edges.len() < 2 || edges.windows(2).any(|w| !(w[1] > w[0])) {
                return Err(PlotError::InvalidData(
                    "bin edges must be at least two strictly increasing values".to_string(),
                ));
            }
            return Ok(edges.clone());
        }
    }

    let (lo, hi) = match binning.range {
        Some(range) => range,
        None => {
            let data = finite_range(values);
            match (binning.min, binning.max, data) {
                (Some(lo), Some(hi), _) => (lo, hi),
                (lo, hi, Some((dmin, dmax))) => (lo.unwrap_or(dmin), hi.unwrap_or(dmax)),
                (_, _, None) => return Err(PlotError::EmptyData),
            }
        }
    };
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(PlotError::InvalidData(format!(
            "invalid histogram range ({}, {})",
            lo, hi
        )));
    }
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };

    let count = match (binning.binsize, &binning.bins) {
        (Some(size), _) if !(size > 0.0 && size.is_finite()) => {
            return Err(PlotError::InvalidData(format!("binsize must be positive, got {}", size)))
        }
        (Some(size), _) => {
            let n = ((hi - lo) / size).round().max(1.0);
            if !(n <= MAX_BINS as f64) {
                return Err(PlotError::InvalidData(format!(
                    "binsize {} gives more than {} bins over ({}, {})",
                    size, MAX_BINS, lo, hi
                )));
            }
            n as usize
        }
        (None, Bins::Count(0)) => {
            return Err(PlotError::InvalidData("bin count must be at least 1".to_string()))
        }
        (None, Bins::Count(n)) if *n > MAX_BINS => {
            return Err(PlotError::InvalidData(format!(
                "bin count {} exceeds the limit of {}",
                n, MAX_BINS
            )))
        }
        (None, Bins::Count(n)) => *n,
        // Explicit edges returned above.
        (None, Bins::Edges(_)) => 1,
    };

    Ok(linspace(lo, hi, count + 1))
}

/// Histogram bars.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<f64>,
    pub fill_style: FillStyle,
    pub label: Option<String>,
}

impl Histogram {
    pub fn new(edges: Vec<f64>, counts: Vec<f64>, fill_style: FillStyle) -> Self {
        Histogram {
            edges,
            counts,
            fill_style,
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Plot for Histogram {
    fn bounds(&self, filter: DataFilter) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for &e in self.edges.iter().filter(|e| filter.x_ok(**e)) {
            bounds.x_min = bounds.x_min.min(e);
            bounds.x_max = bounds.x_max.max(e);
        }
        // Bars grow from zero, which a log axis cannot show.
        if filter.y_ok(0.0) {
            bounds.y_min = 0.0;
            bounds.y_max = 0.0;
        }
        for &c in self.counts.iter().filter(|c| filter.y_ok(**c)) {
            bounds.y_min = bounds.y_min.min(c);
            bounds.y_max = bounds.y_max.max(c);
        }
        bounds.x_range().map(|_| bounds)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fill_style(&self) -> Option<FillStyle> {
        Some(self.fill_style.clone())
    }

    fn render(&self, ctx: &RenderContext, backend: &mut SvgBackend) {
        let base = ctx.y_px(0.0).unwrap_or(ctx.area.y_max);
        for (edge, &count) in self.edges.windows(2).zip(&self.counts) {
            if count <= 0.0 {
                continue;
            }
            let (Some(left), Some(right), Some(top)) =
                (ctx.x_px(edge[0]), ctx.x_px(edge[1]), ctx.y_px(count))
            else {
                continue;
            };
            backend.draw_rect(left, top, right - left, base - top, &self.fill_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bins_over_data_range() {
        let binning = Binning {
            bins: Bins::Count(2),
            ..Default::default()
        };
        let (edges, counts) = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], &binning).unwrap();
        assert_eq!(edges, vec![0.0, 2.0, 4.0]);
        // 2.0 falls in the second bin; 4.0 is the closed right edge.
        assert_eq!(counts, vec![2.0, 3.0]);
    }

    #[test]
    fn test_binsize_overrides_bins() {
        let binning = Binning {
            bins: Bins::Count(50),
            binsize: Some(0.3),
            range: Some((0.0, 1.0)),
            ..Default::default()
        };
        let (edges, _) = histogram(&[0.5], &binning).unwrap();
        // round(1.0 / 0.3) = 3 bins
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn test_min_max_and_outliers() {
        let binning = Binning {
            bins: Bins::Count(1),
            min: Some(0.0),
            ..Default::default()
        };
        let (edges, counts) = histogram(&[-5.0, 1.0, 2.0, f64::NAN], &binning).unwrap();
        assert_eq!(edges, vec![0.0, 2.0]);
        assert_eq!(counts, vec![2.0]);
    }

    #[test]
    fn test_explicit_edges() {
        let binning = Binning {
            bins: Bins::Edges(vec![0.0, 1.0, 10.0]),
            ..Default::default()
        };
        let (_, counts) = histogram(&[0.5, 1.0, 5.0, 10.0, 11.0], &binning).unwrap();
        assert_eq!(counts, vec![1.0, 3.0]);

        let bad = Binning {
            bins: Bins::Edges(vec![1.0, 1.0]),
            ..Default::default()
        };
        assert!(matches!(histogram(&[1.0], &bad), Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(histogram(&[], &Binning::default()), Err(PlotError::EmptyData)));
        let ranged = Binning {
            range: Some((0.0, 1.0)),
            ..Default::default()
        };
        let (_, counts) = histogram(&[], &ranged).unwrap();
        assert_eq!(counts.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn test_single_value_widened() {
        let (edges, counts) = histogram(&[3.0, 3.0], &Binning::default()).unwrap();
        assert_eq!(edges.first(), Some(&2.5));
        assert_eq!(edges.last(), Some(&3.5));
        assert_eq!(counts.iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn test_bad_binsize() {
        let binning = Binning {
            binsize: Some(0.0),
            ..Default::default()
        };
        assert!(histogram(&[1.0, 2.0], &binning).is_err());
    }

    #[test]
    fn test_tiny_binsize_rejected() {
        for size in [1e-300, 1e-9] {
            let binning = Binning {
                binsize: Some(size),
                ..Default::default()
            };
            let err = histogram(&[0.0, 1.0], &binning).unwrap_err();
            assert!(matches!(err, PlotError::InvalidData(_)));
        }

        let binning = Binning {
            binsize: Some(1.0 / MAX_BINS as f64),
            ..Default::default()
        };
        let (edges, counts) = histogram(&[0.0, 1.0], &binning).unwrap();
        assert_eq!(counts.len(), MAX_BINS);
        assert_eq!(edges.len(), MAX_BINS + 1);
    }

    #[test]
    fn test_too_many_bins_rejected() {
        let binning = Binning {
            bins: Bins::Count(MAX_BINS + 1),
            ..Default::default()
        };
        assert!(matches!(
            histogram(&[0.0, 1.0], &binning),
            Err(PlotError::InvalidData(_))
        ));
    }
}

//! Data handling traits and utilities.

/// Trait for types that can be converted into plot data.
pub trait IntoPlotData {
    /// Convert into a vector of f64 values.
    fn into_plot_data(self) -> Vec<f64>;
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self
    }
}

impl IntoPlotData for &Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self.clone()
    }
}

impl IntoPlotData for &[f64] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for [f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for &[f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

// Element-wise `as f64` for the other numeric element types.
macro_rules! widening_plot_data {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(|v| v as f64).collect()
                }
            }

            impl IntoPlotData for &Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }

            impl IntoPlotData for &[$t] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }

            impl<const N: usize> IntoPlotData for [$t; N] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }
        )*
    };
}

widening_plot_data!(f32, i32, i64, u32, usize);

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Min and max over the finite values, or None if there are none.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_widening_conversions() {
        assert_eq!(vec![1i32, 2, 3].into_plot_data(), vec![1.0, 2.0, 3.0]);
        assert_eq!([1usize, 4].into_plot_data(), vec![1.0, 4.0]);
        let v = vec![0.5f32];
        assert_eq!((&v).into_plot_data(), vec![0.5]);
    }

    #[test]
    fn test_finite_range_skips_nan() {
        assert_eq!(finite_range(&[f64::NAN, 2.0, -1.0, f64::INFINITY]), Some((-1.0, 2.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }
}

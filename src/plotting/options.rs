//! Named axis options, applied at construction or later through `Axes::set`.

use crate::plotting::element::Legend;
use crate::plotting::scale::Scale;

/// Legend request: a plain on/off switch or a fully configured legend.
#[derive(Debug, Clone)]
pub enum LegendSetting {
    Show(bool),
    Custom(Legend),
}

impl From<bool> for LegendSetting {
    fn from(show: bool) -> Self {
        LegendSetting::Show(show)
    }
}

impl From<Legend> for LegendSetting {
    fn from(legend: Legend) -> Self {
        LegendSetting::Custom(legend)
    }
}

/// Axis options. Unset fields leave the axes unchanged.
#[derive(Debug, Clone, Default)]
pub struct AxisOptions {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xscale: Option<Scale>,
    pub yscale: Option<Scale>,
    /// Autoscale padding as a fraction of the data span, both axes
    pub margin: Option<f64>,
    /// Plotting area height / width
    pub aspect: Option<f64>,
    pub legend: Option<LegendSetting>,
    pub grid: Option<bool>,
}

impl AxisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn xscale(mut self, scale: Scale) -> Self {
        self.xscale = Some(scale);
        self
    }

    pub fn yscale(mut self, scale: Scale) -> Self {
        self.yscale = Some(scale);
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    pub fn legend(mut self, legend: impl Into<LegendSetting>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Fields set in `other` override the ones here.
    pub fn merged(mut self, other: &AxisOptions) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        take!(xlabel, ylabel, title, xlim, ylim, xscale, yscale, margin, aspect, legend, grid);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_prefers_other() {
        let base = AxisOptions::new().xlabel("time").margin(0.1);
        let merged = base.merged(&AxisOptions::new().xlabel("t").yscale(Scale::Log));
        assert_eq!(merged.xlabel.as_deref(), Some("t"));
        assert_eq!(merged.margin, Some(0.1));
        assert_eq!(merged.yscale, Some(Scale::Log));
    }
}

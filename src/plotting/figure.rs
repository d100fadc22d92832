//! Figure (canvas) implementation.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::plotting::axes::Axes;
use crate::plotting::backend::{write_raster, OutputFormat, SvgBackend, BASE_DPI};
use crate::plotting::element::Bounds;
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::DataFilter;
use crate::plotting::style::{Color, TextAnchor, Theme, ThemeConfig};

// Subplot parameters, as fractions of the figure.
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
const BOTTOM: f64 = 0.11;
const TOP: f64 = 0.88;
const WSPACE: f64 = 0.2;
const HSPACE: f64 = 0.2;

/// A figure containing one or more axes (subplots).
#[derive(Debug)]
pub struct Figure {
    /// Figure width in pixels at 100 DPI
    pub width: f64,
    /// Figure height in pixels at 100 DPI
    pub height: f64,
    /// Background color
    pub background: Color,
    /// Axes in row-major order
    axes: Vec<Axes>,
    /// Grid shape the axes were laid out on
    shape: (usize, usize),
    /// Theme configuration
    pub theme: ThemeConfig,
    /// Figure title
    pub title: Option<String>,
    share_x: bool,
    share_y: bool,
}

impl Figure {
    /// Create an empty figure with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        let theme = Theme::Default.config();
        Figure {
            width,
            height,
            background: theme.background.clone(),
            axes: Vec::new(),
            shape: (1, 1),
            theme,
            title: None,
            share_x: false,
            share_y: false,
        }
    }

    /// Set the background color.
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = color.into();
        self
    }

    /// Set the theme. Existing axes are restyled.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme.config();
        self.background = self.theme.background.clone();
        for ax in &mut self.axes {
            ax.set_theme(self.theme.clone());
        }
        self
    }

    /// Set the figure title.
    pub fn suptitle(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Use the union of each column's x ranges for every cell in that column.
    pub fn share_x(mut self, share: bool) -> Self {
        self.share_x = share;
        self
    }

    /// Use the union of each row's y ranges for every cell in that row.
    pub fn share_y(mut self, share: bool) -> Self {
        self.share_y = share;
        self
    }

    /// Normalized position of cell `(row, col)` in a `rows x cols` grid.
    pub fn cell_position(rows: usize, cols: usize, row: usize, col: usize) -> Bounds {
        let cell_w = (RIGHT - LEFT) / (cols as f64 + WSPACE * (cols as f64 - 1.0));
        let cell_h = (TOP - BOTTOM) / (rows as f64 + HSPACE * (rows as f64 - 1.0));
        let left = LEFT + col as f64 * cell_w * (1.0 + WSPACE);
        let top = TOP - row as f64 * cell_h * (1.0 + HSPACE);
        Bounds::new(left, left + cell_w, top - cell_h, top)
    }

    /// Add a subplot at the given position.
    /// Uses matplotlib-style indexing: (rows, cols, index) where index is 1-based.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> PlotResult<&mut Axes> {
        if rows == 0 || cols == 0 || index == 0 || index > rows * cols {
            return Err(PlotError::InvalidConfig(format!(
                "subplot index {} invalid for a {}x{} grid",
                index, rows, cols
            )));
        }
        let (row, col) = ((index - 1) / cols, (index - 1) % cols);
        let mut axes = Axes::with_theme(self.theme.clone());
        axes.position = Self::cell_position(rows, cols, row, col);
        self.shape = (rows, cols);
        self.axes.push(axes);
        let last = self.axes.len() - 1;
        Ok(&mut self.axes[last])
    }

    /// Replace the axes with a `rows x cols` grid, in row-major order.
    pub fn subplots(&mut self, rows: usize, cols: usize) -> PlotResult<&mut [Axes]> {
        if rows == 0 || cols == 0 {
            return Err(PlotError::InvalidConfig(format!(
                "a subplot grid needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        self.axes.clear();
        for index in 1..=rows * cols {
            self.add_subplot(rows, cols, index)?;
        }
        debug!("Laid out {}x{} subplots", rows, cols);
        Ok(&mut self.axes)
    }

    /// Get the current axes, creating a single one if necessary.
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            let mut axes = Axes::with_theme(self.theme.clone());
            axes.position = Self::cell_position(1, 1, 0, 0);
            self.shape = (1, 1);
            self.axes.push(axes);
        }
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// `(rows, cols)` of the subplot grid.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Data ranges each axes should autoscale to when sharing is on.
    ///
    /// Each cell's union only counts values its own scale can place, so a log
    /// cell never inherits a non-positive range from a linear neighbour. A
    /// union with nothing left is `None`, and the cell falls back to its own data.
    fn shared_ranges(&self) -> Vec<(Option<(f64, f64)>, Option<(f64, f64)>)> {
        let (_, cols) = self.shape;
        let union = |acc: Option<(f64, f64)>, r: Option<(f64, f64)>| match (acc, r) {
            (Some((a, b)), Some((c, d))) => Some((a.min(c), b.max(d))),
            (a, b) => a.or(b),
        };

        self.axes
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let (row, col) = (i / cols, i % cols);
                let x = self.share_x.then(|| {
                    self.axes
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| j % cols == col)
                        .fold(None, |acc, (_, other)| {
                            let filter = DataFilter {
                                x: cell.xscale(),
                                y: other.yscale(),
                            };
                            union(acc, other.bounds_with(filter).x_range())
                        })
                });
                let y = self.share_y.then(|| {
                    self.axes
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| j / cols == row)
                        .fold(None, |acc, (_, other)| {
                            let filter = DataFilter {
                                x: other.xscale(),
                                y: cell.yscale(),
                            };
                            union(acc, other.bounds_with(filter).y_range())
                        })
                });
                (x.flatten(), y.flatten())
            })
            .collect()
    }

    /// Render the figure to an SVG string.
    pub fn render(&self) -> PlotResult<String> {
        let mut backend = SvgBackend::new(self.width, self.height);
        backend.fill_background(&self.background);

        if let Some(ref title) = self.title {
            let style = self
                .theme
                .title_style
                .clone()
                .font_size(self.theme.title_style.font_size + 2.0)
                .anchor(TextAnchor::Middle);
            backend.draw_text(self.width / 2.0, 24.0, title, &style);
        }

        let shared = self.shared_ranges();
        for (i, (axes, shared)) in self.axes.iter().zip(shared).enumerate() {
            axes.render(&mut backend, i, shared)?;
        }

        Ok(backend.render())
    }

    /// Save the figure at the base DPI. The format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        self.save_with_dpi(path, BASE_DPI)
    }

    /// Save the figure. DPI scales raster output and is ignored for SVG.
    pub fn save_with_dpi(&self, path: impl AsRef<Path>, dpi: f64) -> PlotResult<()> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;
        if !(dpi > 0.0 && dpi.is_finite()) {
            return Err(PlotError::InvalidConfig(format!("dpi must be positive, got {}", dpi)));
        }
        let svg = self.render()?;
        if format.is_raster() {
            write_raster(&svg, path, format, dpi)?;
        } else {
            fs::write(path, svg)?;
        }
        info!("Wrote {:?} figure to {}", format, path.display());
        Ok(())
    }
}

impl Default for Figure {
    /// 640x480.
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::Scale;

    #[test]
    fn test_subplots_row_major() {
        let mut fig = Figure::new(600.0, 400.0);
        let axes = fig.subplots(2, 3).unwrap();
        assert_eq!(axes.len(), 6);
        // Row 0 is on top; columns run left to right.
        assert!(axes[0].position.y_min > axes[3].position.y_max);
        assert!(axes[0].position.x_max < axes[1].position.x_min);
        assert_eq!(axes[1].position.y_max, axes[2].position.y_max);
        assert_eq!(fig.shape(), (2, 3));
    }

    #[test]
    fn test_cell_position_single() {
        let b = Figure::cell_position(1, 1, 0, 0);
        assert!((b.x_min - LEFT).abs() < 1e-12);
        assert!((b.x_max - RIGHT).abs() < 1e-12);
        assert!((b.y_min - BOTTOM).abs() < 1e-12);
        assert!((b.y_max - TOP).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_grid() {
        let mut fig = Figure::default();
        assert!(fig.subplots(0, 2).is_err());
        assert!(fig.add_subplot(1, 1, 2).is_err());
    }

    #[test]
    fn test_shared_x_per_column() {
        let mut fig = Figure::new(600.0, 400.0).share_x(true);
        let axes = fig.subplots(2, 2).unwrap();
        axes[0].plot(vec![0.0, 1.0], vec![0.0, 1.0]).build().unwrap();
        axes[2].plot(vec![5.0, 9.0], vec![0.0, 1.0]).build().unwrap();
        axes[1].plot(vec![-3.0, -2.0], vec![0.0, 1.0]).build().unwrap();

        let shared = fig.shared_ranges();
        assert_eq!(shared[0].0, Some((0.0, 9.0)));
        assert_eq!(shared[2].0, Some((0.0, 9.0)));
        assert_eq!(shared[1].0, Some((-3.0, -2.0)));
        assert_eq!(shared[3].0, Some((-3.0, -2.0)));
        assert!(shared.iter().all(|s| s.1.is_none()));
    }

    #[test]
    fn test_shared_y_per_row() {
        let mut fig = Figure::new(600.0, 400.0).share_y(true);
        let axes = fig.subplots(2, 2).unwrap();
        axes[0].plot(vec![0.0, 1.0], vec![0.0, 1.0]).build().unwrap();
        axes[1].plot(vec![0.0, 1.0], vec![-4.0, 3.0]).build().unwrap();
        axes[3].plot(vec![0.0, 1.0], vec![10.0, 20.0]).build().unwrap();

        let shared = fig.shared_ranges();
        assert_eq!(shared[0].1, Some((-4.0, 3.0)));
        assert_eq!(shared[1].1, Some((-4.0, 3.0)));
        assert_eq!(shared[2].1, Some((10.0, 20.0)));
        assert_eq!(shared[3].1, Some((10.0, 20.0)));
        assert!(shared.iter().all(|s| s.0.is_none()));
    }

    #[test]
    fn test_shared_x_log_cell_skips_non_positive() {
        let mut fig = Figure::new(600.0, 400.0).share_x(true);
        let axes = fig.subplots(2, 1).unwrap();
        axes[0].set_xscale(Scale::Log).unwrap();
        axes[0].plot(vec![1.0, 10.0], vec![0.0, 1.0]).build().unwrap();
        axes[1].plot(vec![-5.0, 5.0], vec![0.0, 1.0]).build().unwrap();

        let shared = fig.shared_ranges();
        assert_eq!(shared[0].0, Some((1.0, 10.0)));
        assert_eq!(shared[1].0, Some((-5.0, 10.0)));

        let (lo, hi) = fig.axes()[0].x_view(shared[0].0);
        assert!(lo > 0.0 && lo < 1.0 && hi > 10.0);

        let dir = tempfile::tempdir().unwrap();
        fig.save(dir.path().join("mixed.svg")).unwrap();
    }

    #[test]
    fn test_shared_x_log_cell_without_positive_data() {
        let mut fig = Figure::new(600.0, 400.0).share_x(true);
        let axes = fig.subplots(2, 1).unwrap();
        axes[0].set_xscale(Scale::Log).unwrap();
        axes[1].plot(vec![-5.0, 0.0], vec![0.0, 1.0]).build().unwrap();

        let shared = fig.shared_ranges();
        assert_eq!(shared[0].0, None);
        assert!(fig.render().is_ok());
    }

    #[test]
    fn test_render_contains_every_axes() {
        let mut fig = Figure::new(400.0, 300.0).suptitle("overview");
        fig.subplots(1, 2).unwrap();
        let svg = fig.render().unwrap();
        assert!(svg.contains("id=\"axes-0\""));
        assert!(svg.contains("id=\"axes-1\""));
        assert!(svg.contains("overview"));
    }

    #[test]
    fn test_save_svg_and_reject_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut fig = Figure::default();
        fig.gca().plot(vec![1.0, 2.0], vec![3.0, 4.0]).build().unwrap();

        let svg_path = dir.path().join("out.svg");
        fig.save(&svg_path).unwrap();
        assert!(fs::read_to_string(&svg_path).unwrap().starts_with("<?xml"));

        let err = fig.save(dir.path().join("out.pdf")).unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat { .. }));
        assert!(fig.save_with_dpi(dir.path().join("out.png"), 0.0).is_err());
    }
}

//! A single drawing surface with a fixed grid of coordinate regions.

use std::ops::{Index, IndexMut};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::display::{self, BackendResolver};
use crate::plotting::{Axes, AxisOptions, Figure, PlotError, PlotResult};

/// Table construction options.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub rows: usize,
    pub cols: usize,
    /// Figure width in pixels at 100 DPI; the configured width if unset
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub share_x: bool,
    pub share_y: bool,
    /// Applied to every cell
    pub axis: AxisOptions,
    /// Title centered above the grid
    pub title: Option<String>,
}

impl TableOptions {
    pub fn new(rows: usize, cols: usize) -> Self {
        TableOptions {
            rows,
            cols,
            width: None,
            height: None,
            share_x: false,
            share_y: false,
            axis: AxisOptions::default(),
            title: None,
        }
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn share_x(mut self, share: bool) -> Self {
        self.share_x = share;
        self
    }

    pub fn share_y(mut self, share: bool) -> Self {
        self.share_y = share;
        self
    }

    pub fn axis(mut self, axis: AxisOptions) -> Self {
        self.axis = axis;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One figure holding `rows * cols` axes, addressed by `(row, col)`.
#[derive(Debug)]
pub struct Table {
    figure: Figure,
    rows: usize,
    cols: usize,
    resolver: Arc<BackendResolver>,
    dpi: f64,
}

impl Table {
    pub fn new(rows: usize, cols: usize) -> PlotResult<Self> {
        Self::with_options(TableOptions::new(rows, cols))
    }

    pub fn with_options(options: TableOptions) -> PlotResult<Self> {
        Self::with_config(options, Config::global())
    }

    pub fn with_config(options: TableOptions, config: &Config) -> PlotResult<Self> {
        let TableOptions {
            rows,
            cols,
            width,
            height,
            share_x,
            share_y,
            axis,
            title,
        } = options;
        if rows == 0 || cols == 0 {
            return Err(PlotError::InvalidConfig(format!(
                "a table needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }

        let mut figure = Figure::new(
            width.unwrap_or(config.width),
            height.unwrap_or(config.height),
        )
        .theme(config.theme)
        .share_x(share_x)
        .share_y(share_y);
        if let Some(title) = title {
            figure = figure.suptitle(title);
        }
        for cell in figure.subplots(rows, cols)? {
            cell.set(&axis)?;
        }
        debug!("Created {}x{} table", rows, cols);

        Ok(Table {
            figure,
            rows,
            cols,
            resolver: BackendResolver::global(),
            dpi: config.dpi,
        })
    }

    /// Use `resolver` instead of the process-wide one for `show`.
    pub fn with_resolver(mut self, resolver: Arc<BackendResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    fn offset(&self, (row, col): (usize, usize)) -> PlotResult<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(PlotError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, index: (usize, usize)) -> PlotResult<&Axes> {
        let i = self.offset(index)?;
        Ok(&self.figure.axes()[i])
    }

    pub fn get_mut(&mut self, index: (usize, usize)) -> PlotResult<&mut Axes> {
        let i = self.offset(index)?;
        Ok(&mut self.figure.axes_mut()[i])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false; a table has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Axes> {
        self.figure.axes().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Axes> {
        self.figure.axes_mut().iter_mut()
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn render(&self) -> PlotResult<String> {
        self.figure.render()
    }

    /// Write every cell into one file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        self.figure.save_with_dpi(path, self.dpi)
    }

    pub fn save_with_dpi(&self, path: impl AsRef<Path>, dpi: f64) -> PlotResult<()> {
        self.figure.save_with_dpi(path, dpi)
    }

    /// Display interactively. Fails with a display error when headless.
    pub fn show(&self) -> PlotResult<()> {
        display::show_figure(&self.figure, &self.resolver, self.dpi)
    }
}

impl Index<(usize, usize)> for Table {
    type Output = Axes;

    /// Panics if the index is out of range; see [`Table::get`].
    fn index(&self, index: (usize, usize)) -> &Axes {
        match self.get(index) {
            Ok(axes) => axes,
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Table {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Axes {
        match self.offset(index) {
            Ok(i) => &mut self.figure.axes_mut()[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Axes;
    type IntoIter = std::slice::Iter<'a, Axes>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Table {
    type Item = &'a mut Axes;
    type IntoIter = std::slice::IterMut<'a, Axes>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::Scale;

    fn table(rows: usize, cols: usize) -> Table {
        Table::with_config(TableOptions::new(rows, cols), &Config::default()).unwrap()
    }

    #[test]
    fn test_every_cell_addressable() {
        for (rows, cols) in [(1, 1), (2, 3), (4, 1)] {
            let mut t = table(rows, cols);
            assert_eq!(t.len(), rows * cols);
            assert_eq!(t.shape(), (rows, cols));
            for r in 0..rows {
                for c in 0..cols {
                    t.get_mut((r, c))
                        .unwrap()
                        .plot(vec![r as f64], vec![c as f64])
                        .build()
                        .unwrap();
                }
            }
            assert!(t.iter().all(|axes| axes.len() == 1));
        }
    }

    #[test]
    fn test_out_of_range() {
        let t = table(2, 3);
        for index in [(2, 0), (0, 3), (5, 5)] {
            let err = t.get(index).unwrap_err();
            assert!(matches!(err, PlotError::IndexOutOfRange { rows: 2, cols: 3, .. }));
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics() {
        let t = table(1, 1);
        let _ = &t[(1, 0)];
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Table::with_config(TableOptions::new(0, 2), &Config::default()),
            Err(PlotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_row_major_order() {
        let mut t = table(2, 2);
        t[(0, 1)].set_title("top right");
        t[(1, 0)].set_title("bottom left");
        let titles: Vec<_> = t.iter().map(|a| a.title.clone()).collect();
        assert_eq!(
            titles,
            vec![None, Some("top right".to_string()), Some("bottom left".to_string()), None]
        );
    }

    #[test]
    fn test_cell_options_applied() {
        let t = Table::with_config(
            TableOptions::new(1, 2).axis(AxisOptions::new().xlabel("time")),
            &Config::default(),
        )
        .unwrap();
        assert!(t.iter().all(|a| a.x_label.as_deref() == Some("time")));
    }

    #[test]
    fn test_title_above_grid() {
        let t = Table::with_config(
            TableOptions::new(2, 2).title("runs by week"),
            &Config::default(),
        )
        .unwrap();
        assert!(t.render().unwrap().contains("runs by week"));
    }

    #[test]
    fn test_shared_x_with_log_cell_saves() {
        let mut t = Table::with_config(TableOptions::new(2, 1).share_x(true), &Config::default())
            .unwrap();
        t[(0, 0)].set_xscale(Scale::Log).unwrap();
        t[(0, 0)].plot(vec![1.0, 10.0], vec![1.0, 2.0]).build().unwrap();
        t[(1, 0)].plot(vec![-5.0, 5.0], vec![1.0, 2.0]).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.png");
        t.save(&path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}

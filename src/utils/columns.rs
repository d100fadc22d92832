//! Numeric column files: whitespace- or comma-separated, `#` comments.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A table of numeric columns, all the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    columns: Vec<Vec<f64>>,
}

impl Columns {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column `index`, 0-based.
    pub fn column(&self, index: usize) -> Result<&[f64]> {
        match self.columns.get(index) {
            Some(col) => Ok(col),
            None => bail!(
                "Column {} requested but the input has {} column(s)",
                index + 1,
                self.width()
            ),
        }
    }
}

pub fn read_columns(path: impl AsRef<Path>) -> Result<Columns> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Error opening data file {}", path.display()))?;
    read_columns_from_reader(BufReader::new(file))
        .with_context(|| format!("Error reading data file {}", path.display()))
}

pub fn read_columns_from_reader<R: BufRead>(reader: R) -> Result<Columns> {
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if columns.is_empty() {
            columns = vec![Vec::new(); fields.len()];
        } else if fields.len() != columns.len() {
            bail!(
                "Ragged line {} (expected {} columns, got {}): {}",
                i + 1,
                columns.len(),
                fields.len(),
                line
            );
        }

        for (col, field) in columns.iter_mut().zip(&fields) {
            let value: f64 = field
                .parse()
                .with_context(|| format!("Invalid number '{}' at line {}", field, i + 1))?;
            col.push(value);
        }
    }
    Ok(Columns { columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_mixed_separators() {
        let data = "# x y\n1 2\n3,4\n\n5\t6\n";
        let cols = read_columns_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(cols.width(), 2);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols.column(0).unwrap(), &[1.0, 3.0, 5.0]);
        assert_eq!(cols.column(1).unwrap(), &[2.0, 4.0, 6.0]);
        assert!(cols.column(2).is_err());
    }

    #[test]
    fn test_ragged_line() {
        let data = "1 2\n3\n";
        let err = read_columns_from_reader(Cursor::new(data)).unwrap_err();
        assert!(err.to_string().contains("Ragged line 2"));
    }

    #[test]
    fn test_non_numeric() {
        let data = "1 2\n3 x\n";
        let err = read_columns_from_reader(Cursor::new(data)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_input() {
        let cols = read_columns_from_reader(Cursor::new("# nothing\n")).unwrap();
        assert!(cols.is_empty());
        assert_eq!(cols.width(), 0);
    }
}

//! Load headerless CSV files as pivot matrices.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use featurizer_transform::{Matrix, TransformError};
use tracing::debug;

/// Options controlling how CSV cells become nullable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvMatrixOptions {
    /// A cell equal to this token is null.
    pub null_token: String,
    /// Trim surrounding whitespace from every cell.
    pub trim: bool,
}

impl Default for CsvMatrixOptions {
    fn default() -> Self {
        Self {
            null_token: String::new(),
            trim: true,
        }
    }
}

impl CsvMatrixOptions {
    #[must_use]
    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = token.into();
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn is_null(&self, cell: &str) -> bool {
        cell == self.null_token
    }
}

/// Owned matrix storage read from one CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixData<N> {
    pub values: Vec<N>,
    pub rows: usize,
    pub cols: usize,
}

impl<N> MatrixData<N> {
    /// Dense view over every column.
    pub fn view(&self) -> Result<Matrix<'_, N>, TransformError> {
        Matrix::new(&self.values, self.rows, self.cols)
    }

    /// View over the first `columns` cells of each row.
    pub fn view_columns(&self, columns: usize) -> Result<Matrix<'_, N>, TransformError> {
        Matrix::with_stride(&self.values, self.rows, columns, self.cols)
    }
}

/// Parse a numeric cell. Null cells and `NaN` both become NaN.
pub fn parse_f64_cell(cell: &str, options: &CsvMatrixOptions) -> Result<f64> {
    if options.is_null(cell) {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("invalid number: {cell:?}"))
}

/// Parse a string cell. Only the null token becomes null.
pub fn parse_string_cell(cell: &str, options: &CsvMatrixOptions) -> Result<Option<String>> {
    if options.is_null(cell) {
        Ok(None)
    } else {
        Ok(Some(cell.to_string()))
    }
}

/// Read a matrix from headerless CSV. Every row must have the same width.
pub fn read_matrix<N, R, F>(
    input: R,
    options: &CsvMatrixOptions,
    mut parse: F,
) -> Result<MatrixData<N>>
where
    R: Read,
    F: FnMut(&str, &CsvMatrixOptions) -> Result<N>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(input);

    let mut values = Vec::new();
    let mut cols = None;
    let mut rows = 0_usize;
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {}", index + 1))?;
        let width = *cols.get_or_insert(record.len());
        if record.len() != width {
            bail!(
                "row {} has {} cell(s), expected {width}",
                index + 1,
                record.len()
            );
        }
        for (col, cell) in record.iter().enumerate() {
            let value = parse(cell, options)
                .with_context(|| format!("row {}, column {}", index + 1, col + 1))?;
            values.push(value);
        }
        rows += 1;
    }

    let cols = cols.unwrap_or(0);
    debug!(rows, cols, "read csv matrix");
    Ok(MatrixData { values, rows, cols })
}

/// Read a matrix from a CSV file.
pub fn load_matrix<N, F>(
    path: &Path,
    options: &CsvMatrixOptions,
    parse: F,
) -> Result<MatrixData<N>>
where
    F: FnMut(&str, &CsvMatrixOptions) -> Result<N>,
{
    let file = File::open(path).with_context(|| format!("open csv: {}", path.display()))?;
    read_matrix(file, options, parse).with_context(|| format!("read csv: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_numbers(csv: &str) -> Result<MatrixData<f64>> {
        read_matrix(csv.as_bytes(), &CsvMatrixOptions::default(), parse_f64_cell)
    }

    #[test]
    fn test_reads_numeric_matrix_with_nulls() {
        let csv = "1, 4, 6,\n2,5,,\n3,,NaN,7\n";
        let data = read_numbers(csv).unwrap();

        assert_eq!(data.rows, 3);
        assert_eq!(data.cols, 4);
        assert_eq!(data.values[1], 4.0);
        assert!(data.values[3].is_nan());
        assert!(data.values[10].is_nan());
        assert_eq!(data.values[11], 7.0);
    }

    #[test]
    fn test_custom_null_token_keeps_empty_strings() {
        let options = CsvMatrixOptions::default().with_null_token("NA");
        let data = read_matrix("a,,NA\n".as_bytes(), &options, parse_string_cell).unwrap();
        assert_eq!(
            data.values,
            vec![Some("a".to_string()), Some(String::new()), None]
        );
    }

    #[test]
    fn test_untrimmed_cells_keep_whitespace() {
        let options = CsvMatrixOptions::default().with_trim(false);
        let data = read_matrix(" a ,b\n".as_bytes(), &options, parse_string_cell).unwrap();
        assert_eq!(data.values[0].as_deref(), Some(" a "));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = read_numbers("1,2,3\n4,5\n").unwrap_err();
        assert_eq!(err.to_string(), "row 2 has 2 cell(s), expected 3");
    }

    #[test]
    fn test_bad_number_names_the_cell() {
        let err = read_numbers("1,x\n").unwrap_err();
        assert_eq!(err.to_string(), "row 1, column 2");
        assert!(format!("{err:#}").contains("invalid number: \"x\""));
    }

    #[test]
    fn test_empty_input_is_an_empty_matrix() {
        let data = read_numbers("").unwrap();
        assert_eq!((data.rows, data.cols), (0, 0));
        assert!(data.view().unwrap().is_empty());
    }

    #[test]
    fn test_column_view_uses_csv_width_as_stride() {
        let data = read_numbers("1,2,3\n4,5,6\n").unwrap();
        let view = data.view_columns(2).unwrap();
        assert_eq!(view.stride(), 3);
        assert_eq!(view.row(1), Some(&[4.0, 5.0][..]));
        assert!(data.view_columns(4).is_err());
    }
}

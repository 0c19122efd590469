//! Borrowed row-major matrix views.
//!
//! A [`Matrix`] does not own its elements. It overlays a `rows x cols` grid on
//! a caller's slice, with an optional row stride for storage padded past the
//! last column.

use crate::error::{Result, TransformError};

/// Row-major view over borrowed storage.
#[derive(Debug, PartialEq, Eq)]
pub struct Matrix<'a, N> {
    data: &'a [N],
    rows: usize,
    cols: usize,
    stride: usize,
}

// Manual impls: the view is copyable whatever the element type.
impl<N> Clone for Matrix<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Matrix<'_, N> {}

impl<'a, N> Matrix<'a, N> {
    /// View `data` as a densely packed `rows x cols` matrix.
    pub fn new(data: &'a [N], rows: usize, cols: usize) -> Result<Self> {
        Self::with_stride(data, rows, cols, cols)
    }

    /// View `data` as `rows x cols` where row `r` starts at `r * stride`.
    pub fn with_stride(data: &'a [N], rows: usize, cols: usize, stride: usize) -> Result<Self> {
        if stride < cols {
            return Err(TransformError::invalid_shape(format!(
                "row stride {stride} is shorter than {cols} column(s)"
            )));
        }

        let required = match rows {
            0 => Some(0),
            _ => (rows - 1)
                .checked_mul(stride)
                .and_then(|offset| offset.checked_add(cols)),
        };
        match required {
            Some(required) if required <= data.len() => Ok(Self {
                data,
                rows,
                cols,
                stride,
            }),
            Some(required) => Err(TransformError::invalid_shape(format!(
                "{rows}x{cols} matrix with stride {stride} needs {required} element(s), found {}",
                data.len()
            ))),
            None => Err(TransformError::invalid_shape(format!(
                "{rows}x{cols} matrix with stride {stride} overflows the address space"
            ))),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row `row`, or `None` when out of range.
    pub fn row(&self, row: usize) -> Option<&'a [N]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.stride;
        self.data.get(start..start + self.cols)
    }

    /// Element at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&'a N> {
        if col >= self.cols {
            return None;
        }
        self.row(row).and_then(|values| values.get(col))
    }

    /// Iterate over rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &'a [N]> + use<'a, N> {
        let view = *self;
        (0..view.rows).filter_map(move |row| view.row(row))
    }

    /// Iterate over column `col` top to bottom. Empty when `col` is out of range.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &'a N> + use<'a, N> {
        let view = *self;
        (0..view.rows).filter_map(move |row| view.get(row, col))
    }
}

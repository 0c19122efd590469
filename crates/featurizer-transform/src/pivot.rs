//! Forecast-horizon pivot over aligned matrices.
//!
//! Each input matrix holds one block of forecast rows, with one column per
//! horizon step. The pivot walks the columns left to right and, for every
//! column that is fully populated across all matrices, emits the column's
//! values in matrix order then row order. A single null anywhere in a column
//! drops that column.
//!
//! ```text
//!  matrix 0            matrix 1
//!  one   six   three nine     1  null 5  6
//!  two   four  five  eight    2  null 3  4
//!  null  null  seven ten
//!
//!  column 2 -> [three, five, seven, 5, 3]
//!  column 3 -> [nine, eight, ten, 6, 4]
//! ```

use std::fmt;
use std::marker::PhantomData;

use featurizer_core::{ArchiveReader, ArchiveVersion, ArchiveWriter, NullableValue, ValueTraits};
use tracing::{debug, trace};

use crate::error::{Result, TransformError};
use crate::matrix::Matrix;

/// Value type emitted for a pivot over `T`.
pub type PivotValue<T> = <<T as ValueTraits>::Nullable as NullableValue>::Value;

/// Stateless pivot transformer for matrices of `T::Nullable`.
pub struct PivotTransformer<T> {
    _value: PhantomData<fn() -> T>,
}

impl<T> PivotTransformer<T> {
    /// Archive version written by [`PivotTransformer::save`].
    pub const VERSION: ArchiveVersion = ArchiveVersion::new(1, 0);

    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }

    /// Restore a transformer saved by [`PivotTransformer::save`].
    ///
    /// The version tag is checked before anything is constructed; a major
    /// version other than 1 fails with `UnsupportedVersion`.
    pub fn from_archive(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        ArchiveVersion::read_supported(archive, Self::VERSION.major)?;
        Ok(Self::new())
    }

    /// Persist the transformer. There are no fitted parameters, so only the
    /// version tag is written.
    pub fn save(&self, archive: &mut ArchiveWriter) -> Result<()> {
        Self::VERSION.write(archive);
        Ok(())
    }

    /// Emit any buffered output. The pivot never buffers.
    pub fn flush<F>(&mut self, _callback: F) -> Result<()>
    where
        F: FnMut(Vec<PivotValue<T>>),
        T: ValueTraits,
    {
        Ok(())
    }
}

impl<T> PivotTransformer<T>
where
    T: ValueTraits,
    PivotValue<T>: Clone,
{
    /// Pivot `matrices`, invoking `callback` once per fully populated column.
    ///
    /// # Errors
    ///
    /// - [`TransformError::NoInputMatrix`] when `matrices` is empty
    /// - [`TransformError::MismatchedColumns`] when column counts differ
    pub fn execute<F>(
        &mut self,
        matrices: &[Matrix<'_, T::Nullable>],
        mut callback: F,
    ) -> Result<()>
    where
        F: FnMut(Vec<PivotValue<T>>),
    {
        let cols = check_columns(matrices)?;
        let total_rows: usize = matrices.iter().map(Matrix::rows).sum();

        let mut emitted = 0_usize;
        for col in 0..cols {
            let mut values = matrices.iter().flat_map(|matrix| matrix.column(col));
            if values.any(T::is_null) {
                trace!(col, "column holds a null, dropping it");
                continue;
            }

            let mut sequence = Vec::with_capacity(total_rows);
            for value in matrices.iter().flat_map(|matrix| matrix.column(col)) {
                sequence.push(T::get_nullable_value(value)?.clone());
            }
            callback(sequence);
            emitted += 1;
        }

        debug!(
            matrices = matrices.len(),
            rows = total_rows,
            cols,
            emitted,
            "pivoted matrices"
        );
        Ok(())
    }
}

/// Shared column count of `matrices`.
fn check_columns<N>(matrices: &[Matrix<'_, N>]) -> Result<usize> {
    let (first, rest) = matrices
        .split_first()
        .ok_or(TransformError::NoInputMatrix)?;
    let expected = first.cols();

    for (offset, matrix) in rest.iter().enumerate() {
        if matrix.cols() != expected {
            return Err(TransformError::MismatchedColumns {
                expected,
                found: matrix.cols(),
                index: offset + 1,
            });
        }
    }
    Ok(expected)
}

impl<T> Default for PivotTransformer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PivotTransformer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> PartialEq for PivotTransformer<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for PivotTransformer<T> {}

impl<T> fmt::Debug for PivotTransformer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PivotTransformer")
            .field("version", &Self::VERSION)
            .finish()
    }
}

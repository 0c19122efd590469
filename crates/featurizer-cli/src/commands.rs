//! Command implementations for the `featurize` binary.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use featurizer_core::{ArchiveReader, ArchiveVersion, ArchiveWriter, ValueTraits};
use featurizer_transform::{
    Estimator, FitResult, Matrix, PivotEstimator, PivotTransformer, PivotValue,
};
use tracing::{info, info_span};

use crate::matrix_csv::{
    CsvMatrixOptions, MatrixData, load_matrix, parse_f64_cell, parse_string_cell,
};

/// Element type of the pivoted matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    #[default]
    F64,
    String,
}

/// Options for [`run_pivot`].
#[derive(Debug, Clone, Default)]
pub struct PivotOptions {
    pub kind: ValueKind,
    /// Pivot only the first N cells of each row.
    pub columns: Option<usize>,
    pub csv: CsvMatrixOptions,
}

/// Pivot the CSV matrices in `inputs` and render one line per sequence.
pub fn run_pivot(inputs: &[PathBuf], options: &PivotOptions) -> Result<Vec<String>> {
    let span = info_span!("pivot", inputs = inputs.len(), kind = ?options.kind);
    let _guard = span.enter();

    let lines = match options.kind {
        ValueKind::F64 => pivot_files::<f64, _>(inputs, options, parse_f64_cell)?,
        ValueKind::String => pivot_files::<String, _>(inputs, options, parse_string_cell)?,
    };
    info!(sequences = lines.len(), "pivot complete");
    Ok(lines)
}

fn pivot_files<T, F>(
    inputs: &[PathBuf],
    options: &PivotOptions,
    mut parse: F,
) -> Result<Vec<String>>
where
    T: ValueTraits,
    PivotValue<T>: Clone + ValueTraits,
    F: FnMut(&str, &CsvMatrixOptions) -> Result<T::Nullable>,
{
    let data = inputs
        .iter()
        .map(|path| load_matrix(path, &options.csv, &mut parse))
        .collect::<Result<Vec<MatrixData<T::Nullable>>>>()?;

    let views = data
        .iter()
        .zip(inputs)
        .map(|(matrix, path)| {
            let view = match options.columns {
                Some(columns) => matrix.view_columns(columns),
                None => matrix.view(),
            };
            view.with_context(|| format!("shape matrix: {}", path.display()))
        })
        .collect::<Result<Vec<Matrix<'_, T::Nullable>>>>()?;

    let mut estimator = PivotEstimator::<T>::new();
    estimator.begin_training()?;
    'fit: for matrix in &views {
        for row in matrix.iter_rows() {
            if estimator.fit(row)? == FitResult::Complete {
                break 'fit;
            }
        }
    }
    estimator.complete_training()?;
    let mut transformer = estimator.create_transformer()?;

    let mut lines = Vec::new();
    transformer.execute(&views, |sequence| lines.push(sequence.to_text()))?;
    transformer.flush(|sequence| lines.push(sequence.to_text()))?;
    Ok(lines)
}

/// Write a default pivot transformer archive to `path`. Returns the byte count.
pub fn run_save(path: &Path) -> Result<usize> {
    let mut out = ArchiveWriter::new();
    PivotTransformer::<f64>::default().save(&mut out)?;
    let bytes = out.commit();

    fs::write(path, &bytes).with_context(|| format!("write archive: {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved pivot transformer");
    Ok(bytes.len())
}

/// Summary of a validated archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub version: ArchiveVersion,
    /// Bytes following the version tag.
    pub payload_len: usize,
}

impl fmt::Display for ArchiveInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pivot transformer archive, version {}, payload {} byte(s)",
            self.version, self.payload_len
        )
    }
}

/// Read the archive at `path` and check that it loads as a pivot transformer.
pub fn run_inspect(path: &Path) -> Result<ArchiveInfo> {
    let bytes = fs::read(path).with_context(|| format!("read archive: {}", path.display()))?;
    inspect_bytes(&bytes).with_context(|| format!("inspect archive: {}", path.display()))
}

fn inspect_bytes(bytes: &[u8]) -> Result<ArchiveInfo> {
    let mut header = ArchiveReader::new(bytes);
    let version = ArchiveVersion::read(&mut header)?;
    let payload_len = header.remaining();

    let mut reader = ArchiveReader::new(bytes);
    PivotTransformer::<f64>::from_archive(&mut reader)?;
    reader.finish()?;

    Ok(ArchiveInfo {
        version,
        payload_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_default_archive() {
        let info = inspect_bytes(&[1, 0, 0, 0]).unwrap();
        assert_eq!(info.version, ArchiveVersion::new(1, 0));
        assert_eq!(info.payload_len, 0);
    }

    #[test]
    fn test_inspect_accepts_newer_minor() {
        let info = inspect_bytes(&[1, 0, 3, 0]).unwrap();
        assert_eq!(
            info.to_string(),
            "pivot transformer archive, version 1.3, payload 0 byte(s)"
        );
    }

    #[test]
    fn test_inspect_rejects_trailing_payload() {
        let err = inspect_bytes(&[1, 0, 0, 0, 9]).unwrap_err();
        assert_eq!(err.to_string(), "archive has 1 unread trailing byte(s)");
    }

    #[test]
    fn test_inspect_rejects_truncated_tag() {
        assert!(inspect_bytes(&[1]).is_err());
    }
}

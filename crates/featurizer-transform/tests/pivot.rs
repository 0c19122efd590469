//! Pivot transformer behaviour on reference matrices.

use featurizer_core::{ArchiveReader, ArchiveWriter, FeaturizerError, ValueTraits};
use featurizer_transform::{Matrix, PivotTransformer, TransformError};
use proptest::prelude::*;

fn some(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|value| Some(value.to_string())).collect()
}

#[test]
fn rejects_missing_and_mismatched_matrices() {
    let data = [0.0_f64; 12];
    let wide = Matrix::new(&data, 3, 4).unwrap();
    let tall = Matrix::new(&data, 4, 3).unwrap();
    let mut transformer = PivotTransformer::<f64>::new();
    let mut calls = 0;

    let err = transformer.execute(&[], |_| calls += 1).unwrap_err();
    assert_eq!(err, TransformError::NoInputMatrix);
    assert_eq!(err.to_string(), "no input matrix passed in");

    let err = transformer.execute(&[wide, tall], |_| calls += 1).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(
        err.to_string()
            .starts_with("all input matrices must have the same number of columns")
    );
    assert_eq!(calls, 0);
}

#[test]
fn one_matrix_of_double() {
    // 1    4    6 null
    // 2    5 null null
    // 3 null null    7
    let null = f64::create_null();
    let data = [
        1.0, 4.0, 6.0, null, //
        2.0, 5.0, null, null, //
        3.0, null, null, 7.0,
    ];
    let matrix = Matrix::new(&data, 3, 4).unwrap();

    let mut out = Vec::new();
    PivotTransformer::<f64>::new()
        .execute(&[matrix], |sequence| out.push(sequence))
        .unwrap();

    assert_eq!(out, vec![vec![1.0, 2.0, 3.0]]);
}

#[test]
fn two_matrices_of_string() {
    let mut first = some(&[
        "one", "six", "three", "nine", //
        "two", "four", "five", "eight", //
        "", "", "seven", "ten",
    ]);
    first[8] = None;
    first[9] = None;

    let mut second = some(&[
        "1", "", "5", "6", //
        "2", "", "3", "4",
    ]);
    second[1] = None;
    second[5] = None;

    let matrices = [
        Matrix::new(&first, 3, 4).unwrap(),
        Matrix::new(&second, 2, 4).unwrap(),
    ];

    let mut out = Vec::new();
    PivotTransformer::<String>::new()
        .execute(&matrices, |sequence| out.push(sequence))
        .unwrap();

    assert_eq!(
        out,
        vec![
            vec!["three", "five", "seven", "5", "3"],
            vec!["nine", "eight", "ten", "6", "4"],
        ]
    );
}

#[test]
fn strided_storage_pivots_like_dense() {
    // Same values as the double fixture with one padding column per row.
    let null = f64::NAN;
    let data = [
        1.0, 4.0, 6.0, null, -1.0, //
        2.0, 5.0, null, null, -1.0, //
        3.0, null, null, 7.0, -1.0,
    ];
    let matrix = Matrix::with_stride(&data, 3, 4, 5).unwrap();

    let mut out = Vec::new();
    PivotTransformer::<f64>::new()
        .execute(&[matrix], |sequence| out.push(sequence))
        .unwrap();
    assert_eq!(out, vec![vec![1.0, 2.0, 3.0]]);
}

#[test]
fn default_transformer_roundtrips() {
    let original = PivotTransformer::<String>::default();
    let mut out = ArchiveWriter::new();
    original.save(&mut out).unwrap();
    let bytes = out.commit();
    assert_eq!(bytes, vec![1, 0, 0, 0]);

    let mut reader = ArchiveReader::new(&bytes);
    let other = PivotTransformer::<String>::from_archive(&mut reader).unwrap();
    assert_eq!(other, original);
    assert!(reader.finish().is_ok());
}

#[test]
fn unsupported_version_is_rejected() {
    let mut out = ArchiveWriter::new();
    out.write_primitive(2_u16);
    out.write_primitive(0_u16);
    let bytes = out.commit();

    let mut reader = ArchiveReader::new(&bytes);
    let err = PivotTransformer::<String>::from_archive(&mut reader).unwrap_err();
    assert_eq!(
        err,
        TransformError::Core(FeaturizerError::UnsupportedVersion {
            major: 2,
            minor: 0,
            supported_major: 1,
        })
    );
    assert!(err.to_string().contains("Unsupported archive version"));
}

#[test]
fn truncated_archive_underflows() {
    let mut reader = ArchiveReader::new(&[1, 0]);
    let err = PivotTransformer::<f64>::from_archive(&mut reader).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Core(FeaturizerError::ArchiveUnderflow { .. })
    ));
}

proptest! {
    #[test]
    fn emits_each_null_free_column(
        (rows, cols, cells) in (0_usize..5, 1_usize..6).prop_flat_map(|(rows, cols)| {
            let cells = proptest::collection::vec(proptest::option::of(any::<i16>()), rows * cols);
            (Just(rows), Just(cols), cells)
        })
    ) {
        let matrix = Matrix::new(&cells, rows, cols).unwrap();

        let mut out = Vec::new();
        PivotTransformer::<i16>::new()
            .execute(&[matrix], |sequence| out.push(sequence))
            .unwrap();

        let expected: Vec<Vec<i16>> = (0..cols)
            .filter_map(|col| matrix.column(col).copied().collect::<Option<Vec<_>>>())
            .collect();
        prop_assert_eq!(out, expected);
    }
}

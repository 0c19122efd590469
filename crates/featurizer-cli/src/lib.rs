//! CLI library components for the `featurize` binary.

pub mod commands;
pub mod logging;
pub mod matrix_csv;

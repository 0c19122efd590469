//! Typed value traits and binary archives for streaming featurizers.
//!
//! This crate provides the pieces every featurizer shares:
//!
//! - **traits**: per-type nullable representation, text rendering and binary
//!   encoding, composed recursively for arrays, sequences, maps, tuples and
//!   optionals
//! - **archive**: an append-only writer and a bounds-checked reader
//! - **version**: the `(major, minor)` tag written before fitted model state
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use featurizer_core::{ArchiveReader, ArchiveWriter, ValueTraits};
//!
//! let value = BTreeMap::from([(5_i16, 35.8_f64), (93, 0.147)]);
//! assert_eq!(value.to_text(), "{5:35.800000,93:0.147000}");
//!
//! let mut out = ArchiveWriter::new();
//! out.serialize(&value).unwrap();
//! let bytes = out.commit();
//!
//! let mut reader = ArchiveReader::new(&bytes);
//! let decoded: BTreeMap<i16, f64> = reader.deserialize().unwrap();
//! assert_eq!(decoded, value);
//! assert!(reader.at_end());
//! ```

pub mod archive;
mod error;
pub mod traits;
pub mod version;

// Re-export error types
pub use error::{FeaturizerError, Result};

// Re-export core types
pub use archive::{ArchiveReader, ArchiveWriter, Primitive};
pub use traits::{DisplayValue, NULL_TEXT, NullableValue, ValueTraits};
pub use version::ArchiveVersion;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

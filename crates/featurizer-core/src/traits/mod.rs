//! Per-type traits for semantic values.
//!
//! Every supported value shape implements [`ValueTraits`], which bundles its
//! nullable representation, text rendering and archive encoding. Containers
//! are implemented generically and delegate to their element impls, so nested
//! shapes such as `Vec<[f64; 3]>` or `BTreeMap<String, Option<i32>>` compose
//! without any central dispatch.
//!
//! # Nullable representations
//!
//! `f32` and `f64` are their own nullable representation: NaN means "no
//! value". This saves a presence byte per float column, but it is lossy: a
//! genuine NaN input cannot be told apart from null after it enters a
//! nullable position. Every other type uses `Option<T>`, and `Option<T>` is
//! its own nullable representation, so nullability never nests.
//!
//! ```
//! use featurizer_core::{NullableValue, ValueTraits};
//!
//! let missing = <f64 as ValueTraits>::create_null();
//! assert!(missing.is_nan());
//! assert!(<f64 as ValueTraits>::is_null(&missing));
//!
//! let missing = <String as ValueTraits>::create_null();
//! assert_eq!(missing, None);
//!
//! assert_eq!(vec![1.5_f64, -2.0].to_text(), "[1.500000,-2.000000]");
//! assert_eq!(Some(3_i8).value().copied(), Ok(3));
//! ```

mod container;
mod scalar;

use std::fmt;

use crate::archive::{ArchiveReader, ArchiveWriter};
use crate::error::Result;

/// Text rendered for a null optional.
pub const NULL_TEXT: &str = "NULL";

/// A representation that can hold either a value or "no value".
pub trait NullableValue: Sized {
    /// The value type held when not null.
    type Value;

    /// Construct the null state.
    fn null() -> Self;

    /// Returns true if this holds no value.
    fn is_null(&self) -> bool;

    /// Borrow the held value, failing if this is null.
    fn value(&self) -> Result<&Self::Value>;
}

/// Capabilities every semantic value type provides.
pub trait ValueTraits: Sized {
    /// The representation used when this type may be missing.
    type Nullable: NullableValue;

    /// Construct a null value of the nullable representation.
    fn create_null() -> Self::Nullable {
        <Self::Nullable as NullableValue>::null()
    }

    /// Returns true if `value` holds no value.
    fn is_null(value: &Self::Nullable) -> bool {
        value.is_null()
    }

    /// Borrow the value held by `value`, failing on null.
    fn get_nullable_value(
        value: &Self::Nullable,
    ) -> Result<&<Self::Nullable as NullableValue>::Value> {
        value.value()
    }

    /// Append the text rendering of this value to `out`.
    fn write_text(&self, out: &mut String);

    /// Render this value as text.
    fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Append the binary encoding of this value.
    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()>;

    /// Decode one value from the archive.
    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self>;
}

/// [`fmt::Display`] adapter over [`ValueTraits::write_text`].
#[derive(Debug, Clone, Copy)]
pub struct DisplayValue<'a, T>(pub &'a T);

impl<T: ValueTraits> fmt::Display for DisplayValue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_text())
    }
}

/// Push a `,` before every element except the first.
fn push_separator(out: &mut String, index: usize) {
    if index > 0 {
        out.push(',');
    }
}

/// Render `items` between `open` and `close`, comma separated.
fn write_list<'a, T, I>(out: &mut String, open: char, close: char, items: I)
where
    T: ValueTraits + 'a,
    I: IntoIterator<Item = &'a T>,
{
    out.push(open);
    for (index, item) in items.into_iter().enumerate() {
        push_separator(out, index);
        item.write_text(out);
    }
    out.push(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeaturizerError;

    fn creates_null<T: ValueTraits>() -> bool {
        T::is_null(&T::create_null())
    }

    #[test]
    fn test_create_null_is_null_for_every_shape() {
        assert!(creates_null::<i8>());
        assert!(creates_null::<i16>());
        assert!(creates_null::<i32>());
        assert!(creates_null::<i64>());
        assert!(creates_null::<u8>());
        assert!(creates_null::<u16>());
        assert!(creates_null::<u32>());
        assert!(creates_null::<u64>());
        assert!(creates_null::<f32>());
        assert!(creates_null::<f64>());
        assert!(creates_null::<bool>());
        assert!(creates_null::<String>());
        assert!(creates_null::<[u8; 4]>());
        assert!(creates_null::<Vec<String>>());
        assert!(creates_null::<std::collections::BTreeMap<String, u32>>());
        assert!(creates_null::<(i32, String)>());
        assert!(creates_null::<Option<i8>>());
    }

    #[test]
    fn test_get_nullable_value() {
        assert_eq!(
            <Option<i64> as ValueTraits>::get_nullable_value(&Some(-7799)),
            Ok(&-7799)
        );
        assert_eq!(<f32 as ValueTraits>::get_nullable_value(&123.0), Ok(&123.0));
        assert_eq!(
            <i8 as ValueTraits>::get_nullable_value(&None),
            Err(FeaturizerError::NullOptionalAccess)
        );
    }

    #[test]
    fn test_null_float_access_names_the_type() {
        let err = <f32 as ValueTraits>::get_nullable_value(&f32::NAN).unwrap_err();
        assert!(err.to_string().contains("attempt on f32 null"));

        let err = <f64 as ValueTraits>::get_nullable_value(&f64::NAN).unwrap_err();
        assert!(err.to_string().contains("attempt on f64 null"));

        let err = <Option<i8> as ValueTraits>::get_nullable_value(&None).unwrap_err();
        assert!(err.to_string().contains("Optional type null"));
    }

    #[test]
    fn test_display_value() {
        let values = vec![Some(1_i8), None];
        assert_eq!(format!("{}", DisplayValue(&values)), "[1,NULL]");
    }
}

//! Scalar shapes: integers, floats, booleans and strings.

use std::fmt::Write;

use super::{NullableValue, ValueTraits};
use crate::archive::{ArchiveReader, ArchiveWriter};
use crate::error::{FeaturizerError, Result};

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ValueTraits for $ty {
                type Nullable = Option<$ty>;

                fn write_text(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }

                fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
                    archive.write_primitive(*self);
                    Ok(())
                }

                fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
                    archive.read_primitive()
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_float {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl NullableValue for $ty {
                type Value = $ty;

                fn null() -> Self {
                    <$ty>::NAN
                }

                fn is_null(&self) -> bool {
                    self.is_nan()
                }

                fn value(&self) -> Result<&Self::Value> {
                    if self.is_nan() {
                        Err(FeaturizerError::null_float($name))
                    } else {
                        Ok(self)
                    }
                }
            }

            impl ValueTraits for $ty {
                type Nullable = $ty;

                fn write_text(&self, out: &mut String) {
                    // `{:.6}` already renders NaN as "NaN".
                    let _ = write!(out, "{self:.6}");
                }

                fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
                    archive.write_primitive(*self);
                    Ok(())
                }

                fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
                    archive.read_primitive()
                }
            }
        )*
    };
}

impl_float!(f32 => "f32", f64 => "f64");

impl ValueTraits for bool {
    type Nullable = Option<bool>;

    fn write_text(&self, out: &mut String) {
        out.push_str(if *self { "True" } else { "False" });
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        archive.write_primitive(u8::from(*self));
        Ok(())
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        match archive.read_primitive::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(FeaturizerError::malformed(format!(
                "invalid bool byte: {other:#04x}"
            ))),
        }
    }
}

impl ValueTraits for String {
    type Nullable = Option<String>;

    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        archive.write_len(self.len())?;
        archive.write_bytes(self.as_bytes());
        Ok(())
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let len = archive.read_len()?;
        let bytes = archive.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| FeaturizerError::malformed(format!("invalid UTF-8 string: {e}")))
    }
}

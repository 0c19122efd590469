//! Container shapes: fixed arrays, sequences, ordered maps, tuples and optionals.
//!
//! Each impl recurses through the element type's [`ValueTraits`], so nesting is
//! unbounded: `Vec<[Option<f64>; 2]>` needs no impl of its own.

use std::collections::BTreeMap;
use std::mem;

use super::{NULL_TEXT, NullableValue, ValueTraits, push_separator, write_list};
use crate::archive::{ArchiveReader, ArchiveWriter};
use crate::error::{FeaturizerError, Result};

impl<T> NullableValue for Option<T> {
    type Value = T;

    fn null() -> Self {
        None
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn value(&self) -> Result<&T> {
        self.as_ref().ok_or(FeaturizerError::NullOptionalAccess)
    }
}

impl<T: ValueTraits> ValueTraits for Option<T> {
    // `Option<Option<T>>` never appears: an optional is its own nullable form.
    type Nullable = Option<T>;

    fn write_text(&self, out: &mut String) {
        match self {
            Some(value) => value.write_text(out),
            None => out.push_str(NULL_TEXT),
        }
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        match self {
            Some(value) => {
                archive.write_primitive(1_u8);
                value.serialize(archive)
            }
            None => {
                archive.write_primitive(0_u8);
                Ok(())
            }
        }
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let present: u8 = archive.read_primitive()?;
        if present == 0 {
            Ok(None)
        } else {
            T::deserialize(archive).map(Some)
        }
    }
}

impl<T: ValueTraits, const N: usize> ValueTraits for [T; N] {
    type Nullable = Option<[T; N]>;

    fn write_text(&self, out: &mut String) {
        write_list(out, '[', ']', self);
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        // The element count is part of the type, so no prefix is written.
        self.iter().try_for_each(|item| item.serialize(archive))
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::deserialize(archive)?);
        }
        items.try_into().map_err(|items: Vec<T>| {
            FeaturizerError::malformed(format!(
                "expected {N} array elements, decoded {}",
                items.len()
            ))
        })
    }
}

impl<T: ValueTraits> ValueTraits for Vec<T> {
    type Nullable = Option<Vec<T>>;

    fn write_text(&self, out: &mut String) {
        write_list(out, '[', ']', self);
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        archive.write_len(self.len())?;
        self.iter().try_for_each(|item| item.serialize(archive))
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let count = archive.read_len()?;
        // Never reserve more memory than the remaining bytes.
        let fit = archive.remaining() / mem::size_of::<T>().max(1);
        let mut items = Vec::with_capacity(count.min(fit));
        for _ in 0..count {
            items.push(T::deserialize(archive)?);
        }
        Ok(items)
    }
}

impl<K, V> ValueTraits for BTreeMap<K, V>
where
    K: ValueTraits + Ord,
    V: ValueTraits,
{
    type Nullable = Option<BTreeMap<K, V>>;

    fn write_text(&self, out: &mut String) {
        out.push('{');
        for (index, (key, value)) in self.iter().enumerate() {
            push_separator(out, index);
            key.write_text(out);
            out.push(':');
            value.write_text(out);
        }
        out.push('}');
    }

    fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
        archive.write_len(self.len())?;
        for (key, value) in self {
            key.serialize(archive)?;
            value.serialize(archive)?;
        }
        Ok(())
    }

    fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
        let count = archive.read_len()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = K::deserialize(archive)?;
            let value = V::deserialize(archive)?;
            if map.insert(key, value).is_some() {
                return Err(FeaturizerError::malformed("duplicate map key"));
            }
        }
        Ok(map)
    }
}

macro_rules! impl_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ValueTraits),+> ValueTraits for ($($name,)+) {
            type Nullable = Option<Self>;

            fn write_text(&self, out: &mut String) {
                out.push('(');
                $(
                    push_separator(out, $idx);
                    self.$idx.write_text(out);
                )+
                out.push(')');
            }

            fn serialize(&self, archive: &mut ArchiveWriter) -> Result<()> {
                $(self.$idx.serialize(archive)?;)+
                Ok(())
            }

            fn deserialize(archive: &mut ArchiveReader<'_>) -> Result<Self> {
                Ok(($($name::deserialize(archive)?,)+))
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

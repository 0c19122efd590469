//! Binary archive writer and reader.
//!
//! The writer is an append-only buffer that is consumed by [`ArchiveWriter::commit`];
//! the reader is a bounds-checked cursor over bytes it borrows.
//!
//! # Layout
//!
//! All multi-byte numerics are little-endian with no alignment padding.
//! Variable-length values carry a `u32` count prefix, never a terminator.
//!
//! | Shape            | Encoding                                        |
//! |------------------|-------------------------------------------------|
//! | `bool`           | 1 byte, 0 or 1                                  |
//! | integers         | exact width, two's complement                   |
//! | `f32` / `f64`    | raw IEEE-754 bytes (NaN doubles as null)        |
//! | `String`         | `u32` byte length, UTF-8 bytes                  |
//! | `[T; N]`         | N encoded `T`                                   |
//! | `Vec<T>`         | `u32` element count, encoded `T`s               |
//! | `BTreeMap<K, V>` | `u32` pair count, `K` `V` pairs in key order    |
//! | tuples           | each element in order                           |
//! | `Option<T>`      | 1-byte presence flag, then `T` if present       |

use crate::error::{FeaturizerError, Result};
use crate::traits::ValueTraits;

/// A fixed-width numeric with a little-endian byte encoding.
pub trait Primitive: Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Append the little-endian encoding to `out`.
    fn append_le(self, out: &mut Vec<u8>);

    /// Decode from exactly [`Self::WIDTH`] bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn append_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_primitive!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

/// Append-only archive writer.
///
/// A writer is single-use: [`commit`](Self::commit) consumes it and hands back
/// the accumulated bytes.
#[derive(Debug, Default)]
pub struct ArchiveWriter {
    buffer: Vec<u8>,
}

impl ArchiveWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Append a fixed-width numeric.
    pub fn write_primitive<P: Primitive>(&mut self, value: P) {
        value.append_le(&mut self.buffer);
    }

    /// Append a `u32` count prefix.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let count = u32::try_from(len).map_err(|_| FeaturizerError::LengthOverflow { len })?;
        self.write_primitive(count);
        Ok(())
    }

    /// Append the encoding of any supported value.
    pub fn serialize<T: ValueTraits>(&mut self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Finalize the archive and return its bytes.
    pub fn commit(self) -> Vec<u8> {
        tracing::trace!(bytes = self.buffer.len(), "committed archive");
        self.buffer
    }
}

/// Bounds-checked cursor over borrowed archive bytes.
#[derive(Debug, Clone)]
pub struct ArchiveReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ArchiveReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Read the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(FeaturizerError::ArchiveUnderflow {
                requested: len,
                remaining,
                offset: self.offset,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Read a fixed-width numeric.
    pub fn read_primitive<P: Primitive>(&mut self) -> Result<P> {
        let bytes = self.read_bytes(P::WIDTH)?;
        Ok(P::from_le_slice(bytes))
    }

    /// Read a `u32` count prefix.
    pub fn read_len(&mut self) -> Result<usize> {
        let count: u32 = self.read_primitive()?;
        usize::try_from(count).map_err(|_| FeaturizerError::LengthOverflow {
            len: usize::MAX,
        })
    }

    /// Decode any supported value.
    pub fn deserialize<T: ValueTraits>(&mut self) -> Result<T> {
        T::deserialize(self)
    }

    /// Returns true when every byte has been consumed.
    pub fn at_end(&self) -> bool {
        self.offset == self.data.len()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Consume the reader, failing if any bytes were left unread.
    pub fn finish(self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(FeaturizerError::TrailingBytes {
                remaining: self.remaining(),
            })
        }
    }
}

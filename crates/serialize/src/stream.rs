//! Field-by-field writing and reading.
//!
//! A [`Writer`] appends the encodings of consecutive values to one growing
//! buffer; a [`Reader`] walks the same buffer with a cursor, decoding values
//! of the same types in the same order. The reader advances by exactly the
//! number of bytes each decode consumed, so variable-length fields need no
//! manual offset bookkeeping.
//!
//! # Example
//!
//! ```
//! use wirepack_serialize::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write(&7u32)?.write("name")?.write(&vec![1u8, 2])?;
//! let bytes = writer.finish();
//!
//! let mut reader = Reader::new(&bytes);
//! let id: u32 = reader.read()?;
//! let name: String = reader.read()?;
//! let tags: Vec<u8> = reader.read()?;
//! reader.finish()?;
//!
//! assert_eq!((id, name.as_str(), tags.as_slice()), (7, "name", &[1, 2][..]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    config::Config,
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    error::{DecodeError, EncodeError},
};

/// Accumulates the encodings of consecutive values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self { Self { buffer: Vec::new() } }

    /// Creates an empty writer that can hold `capacity` bytes without
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity) }
    }

    /// Appends the encoding of `value`.
    ///
    /// Returns the writer again so that fields can be chained. If encoding
    /// fails, the buffer is restored to its length before the call.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Encode::encode`].
    pub fn write<T: Encode + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<&mut Self, EncodeError> {
        let start = self.buffer.len();

        if let Err(err) = value.encode(self) {
            self.buffer.truncate(start);
            return Err(err);
        }

        Ok(self)
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn len(&self) -> usize { self.buffer.len() }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.buffer }

    /// Returns a copy of the bytes written so far.
    ///
    /// The writer stays usable: calling `finish` again, possibly after more
    /// writes, returns the then-current contents.
    #[must_use]
    pub fn finish(&self) -> Vec<u8> { self.buffer.clone() }

    /// Consumes the writer and returns its buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> { self.buffer }
}

impl Encoder for Writer {
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

/// Decodes consecutive values from a borrowed buffer.
///
/// The source buffer is never modified; only the reader's own cursor moves.
/// Readers hold no shared state, so any number of them may walk different
/// (or the same) buffers independently.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    source: &'a [u8],
    position: usize,
    config: Config,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a [u8]) -> Self {
        Self::with_config(source, Config::new())
    }

    /// Creates a reader that enforces the limits in `config`.
    #[must_use]
    pub const fn with_config(source: &'a [u8], config: Config) -> Self {
        Self { source, position: 0, config }
    }

    /// Decodes the next value of type `T` and advances past it.
    ///
    /// If decoding fails, the cursor is left where it was before the call and
    /// no partially decoded value is produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining bytes do not start with an encoding
    /// of `T`.
    pub fn read<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let start = self.position;

        match T::decode(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::trace!(
                    offset = start,
                    failed_at = self.position,
                    error = %err,
                    "decode failed; cursor rewound"
                );
                self.position = start;
                Err(err)
            }
        }
    }

    /// Returns the total number of bytes consumed so far.
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize { self.position }

    /// Returns the number of bytes not yet consumed.
    #[must_use]
    pub const fn remaining_len(&self) -> usize {
        self.source.len() - self.position
    }

    /// Returns the length of the whole source buffer.
    #[must_use]
    pub const fn total_len(&self) -> usize { self.source.len() }

    /// Returns `true` if every byte has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position == self.source.len()
    }

    /// Returns the bytes not yet consumed.
    #[must_use]
    pub fn remaining_bytes(&self) -> &'a [u8] { &self.source[self.position..] }

    /// Checks that the whole source buffer has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TrailingData`] if any byte is left.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.is_exhausted() {
            return Ok(());
        }

        tracing::debug!(
            consumed = self.position,
            total = self.source.len(),
            "rejecting trailing data"
        );

        Err(DecodeError::TrailingData {
            consumed: self.position,
            total: self.source.len(),
        })
    }
}

impl Decoder for Reader<'_> {
    fn read_raw_bytes(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let remaining = self.remaining_len();
        if len > remaining {
            return Err(DecodeError::TruncatedInput {
                offset: self.position,
                needed: len,
                remaining,
            });
        }

        let start = self.position;
        self.position += len;
        Ok(&self.source[start..self.position])
    }

    fn position(&self) -> usize { self.position }

    fn remaining(&self) -> usize { self.remaining_len() }

    fn config(&self) -> &Config { &self.config }
}

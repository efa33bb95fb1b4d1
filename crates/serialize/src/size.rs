//! An encoder that only counts bytes.

use crate::{encode::Encoder, error::EncodeError};

/// Encoder that records how many bytes an encoding would occupy without
/// storing them.
///
/// Useful for sizing a [`Writer`](crate::Writer) up front or for checking
/// the length of an encoding without allocating it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeCounter {
    len: usize,
}

impl SizeCounter {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new() -> Self { Self { len: 0 } }

    /// Returns the number of bytes counted so far.
    #[must_use]
    pub const fn len(&self) -> usize { self.len }

    /// Returns `true` if nothing has been counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.len == 0 }
}

impl Encoder for SizeCounter {
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.len += bytes.len();
        Ok(())
    }
}

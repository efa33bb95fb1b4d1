//! Error types reported by encoding and decoding.
//!
//! Encoding only fails when a length does not fit the fixed-width prefix or
//! when a user [`Encode`](crate::Encode) implementation reports a problem.
//! Decoding fails whenever the input cannot be the encoding of the requested
//! type: every such case is reported, never repaired.

use std::str::Utf8Error;

/// Error returned when a value cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A text, sequence, or keyed length does not fit the `u32` prefix.
    #[error("length {len} does not fit the 4-byte length prefix")]
    LengthOverflow {
        /// The length that was attempted.
        len: usize,
    },

    /// A user-defined encoding rejected its value.
    #[error("{0}")]
    Custom(String),
}

impl EncodeError {
    /// Creates an [`EncodeError::Custom`] from any displayable message.
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// Error returned when a byte sequence cannot be decoded as the requested
/// type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A decode step needed more bytes than remain in the input.
    #[error(
        "truncated input at offset {offset}: needed {needed} bytes, \
         {remaining} remaining"
    )]
    TruncatedInput {
        /// Offset at which the failing read started.
        offset: usize,
        /// Bytes required by the read.
        needed: usize,
        /// Bytes that were still available.
        remaining: usize,
    },

    /// A keyed value decoded a different number of keys and values.
    #[error("keyed value has {keys} keys but {values} values")]
    PairingMismatch {
        /// Number of keys decoded.
        keys: usize,
        /// Number of values decoded.
        values: usize,
    },

    /// Bytes were left over after decoding was expected to be complete.
    #[error("trailing data: consumed {consumed} of {total} bytes")]
    TrailingData {
        /// Bytes consumed by decoding.
        consumed: usize,
        /// Total length of the input.
        total: usize,
    },

    /// A length prefix exceeds the configured maximum.
    #[error("length {len} at offset {offset} exceeds the maximum of {max}")]
    LengthLimitExceeded {
        /// Offset of the length prefix.
        offset: usize,
        /// The decoded length.
        len: u32,
        /// The configured maximum.
        max: u32,
    },

    /// Text decoded as a Rust string is not valid UTF-8.
    #[error("invalid UTF-8 in text at offset {offset}: {source}")]
    InvalidUtf8 {
        /// Offset of the text payload.
        offset: usize,
        /// The underlying UTF-8 error.
        source: Utf8Error,
    },

    /// A decoded `u32` is not a Unicode scalar value.
    #[error("invalid Unicode scalar value {value:#x} at offset {offset}")]
    InvalidChar {
        /// Offset of the code point.
        offset: usize,
        /// The decoded code point.
        value: u32,
    },

    /// A derived enum read a variant index it does not have.
    #[error("invalid variant index {index} for enum {ty} (expected 0..{count})")]
    InvalidVariant {
        /// Name of the enum type.
        ty: &'static str,
        /// The decoded index.
        index: u32,
        /// Number of variants the enum has.
        count: usize,
    },

    /// A user-defined decoding rejected its input.
    #[error("{0}")]
    Custom(String),
}

impl DecodeError {
    /// Creates a [`DecodeError::Custom`] from any displayable message.
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    /// Returns `true` if the error is [`DecodeError::TruncatedInput`].
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

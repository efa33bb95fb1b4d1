//! Decoding configuration.
//!
//! The wire format itself has no options. [`Config`] only bounds what a
//! [`Reader`](crate::Reader) is willing to accept from its input, which is
//! useful when the input comes from an untrusted peer.
//!
//! # Example
//!
//! ```
//! use wirepack_serialize::{Config, DecodeError, decode_with, encode};
//!
//! let bytes = encode(&vec![0u8; 64]).unwrap();
//!
//! let config = Config::new().with_max_len(16);
//! let err = decode_with::<Vec<u8>>(&bytes, &config).unwrap_err();
//! assert!(matches!(err, DecodeError::LengthLimitExceeded { len: 64, .. }));
//! ```

/// Limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    max_len: u32,
    max_zero_width_len: u32,
}

impl Config {
    /// Creates the default configuration, which accepts any length the wire
    /// format can express.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_len: u32::MAX, max_zero_width_len: 1 << 16 }
    }

    /// Sets the largest length or count prefix accepted for text, sequences,
    /// and each half of a keyed value.
    #[must_use]
    pub const fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len;
        self
    }

    /// Returns the largest accepted length or count prefix.
    #[must_use]
    pub const fn max_len(&self) -> u32 { self.max_len }

    /// Sets how many elements of a single sequence may decode without
    /// consuming any input.
    ///
    /// Elements such as `()` or unit structs occupy no bytes, so their count
    /// is not bounded by the input size. Defaults to 65 536.
    #[must_use]
    pub const fn with_max_zero_width_len(mut self, max: u32) -> Self {
        self.max_zero_width_len = max;
        self
    }

    /// Returns how many zero-width elements a single sequence may hold.
    #[must_use]
    pub const fn max_zero_width_len(&self) -> u32 { self.max_zero_width_len }
}

impl Default for Config {
    fn default() -> Self { Self::new() }
}

//! Wirepack Serialization Library
//!
//! This crate encodes in-memory values into a compact, schema-less byte
//! sequence and decodes them back. The wire format carries no type tags: the
//! reader must ask for exactly the types the writer wrote, in the same order.
//! Everything is host byte order and unpadded.
//!
//! # Overview
//!
//! The crate provides four core traits:
//!
//! - [`Encoder`]: Low-level sink for scalars and length-prefixed bytes
//! - [`Encode`]: High-level trait for types that can be serialized
//! - [`Decoder`]: Low-level, bounds-checked source of bytes
//! - [`Decode`]: High-level trait for types that can be deserialized
//!
//! and two stream types, [`Writer`] and [`Reader`], for writing and reading
//! a record field by field.
//!
//! # Wire Format
//!
//! | Type | Encoding |
//! |------|----------|
//! | scalar `T` | `size_of::<T>()` raw bytes |
//! | text | `u32` length, then the bytes |
//! | sequence of `T` | `u32` count, then each `T` |
//! | keyed `K -> V` | sequence of keys, then sequence of values |
//! | custom type | whatever its [`Encode`] impl writes |
//!
//! All ordered collections (`Vec`, `VecDeque`, `LinkedList`, slices, sets)
//! share the sequence layout, and all associative ones (`BTreeMap`,
//! `HashMap`, [`Pairs`]) share the keyed layout.
//!
//! # Custom Types
//!
//! Implement [`Encode`] and [`Decode`] by hand, or derive them:
//!
//! ```
//! use wirepack_serialize::{Decode, Encode, decode, encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Item {
//!     id: u32,
//!     name: String,
//!     tags: Vec<u8>,
//! }
//!
//! let item = Item { id: 7, name: "ok".into(), tags: vec![1, 2] };
//! let bytes = encode(&item).unwrap();
//! assert_eq!(bytes.len(), 4 + (4 + 2) + (4 + 2));
//!
//! assert_eq!(decode::<Item>(&bytes).unwrap(), (item, 16));
//! ```
//!
//! ## Field Attributes
//!
//! Use `#[serialize(skip)]` to skip a field during serialization. The field
//! must implement `Default` for deserialization:
//!
//! ```
//! use wirepack_serialize::{Decode, Encode};
//!
//! #[derive(Encode, Decode)]
//! struct Cached {
//!     key: String,
//!     #[serialize(skip)]
//!     hits: u64, // Uses Default::default() when decoding
//! }
//! ```
//!
//! # Errors
//!
//! Decoding never reads out of bounds. Short input is reported as
//! [`DecodeError::TruncatedInput`], mismatched keyed halves as
//! [`DecodeError::PairingMismatch`], and leftover bytes (when exact
//! consumption is requested) as [`DecodeError::TrailingData`].

// Allow derive macros to reference this crate as `wirepack_serialize`
// internally
extern crate self as wirepack_serialize;

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod keyed;
pub mod scalar;
pub mod sequence;
pub mod size;
pub mod stream;
pub mod text;

// Re-export main traits and types at the crate root for convenience
pub use config::Config;
pub use decode::{Decode, Decoder};
pub use encode::{Encode, Encoder};
pub use error::{DecodeError, EncodeError};
pub use keyed::Pairs;
pub use size::SizeCounter;
pub use stream::{Reader, Writer};
pub use text::ByteBuf;
// Re-export derive macros
pub use wirepack_serialize_derive::{Decode, Encode};

/// Encodes a single value into a new buffer.
///
/// # Errors
///
/// Propagates any error from [`Encode::encode`].
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(encoded_len(value)?);
    writer.write(value)?;
    Ok(writer.into_inner())
}

/// Returns the number of bytes [`encode`] would produce for `value`.
///
/// # Errors
///
/// Propagates any error from [`Encode::encode`].
pub fn encoded_len<T: Encode + ?Sized>(value: &T) -> Result<usize, EncodeError> {
    let mut counter = SizeCounter::new();
    value.encode(&mut counter)?;
    Ok(counter.len())
}

/// Decodes a value from the front of `bytes`, returning it together with the
/// number of bytes consumed. Trailing bytes are ignored.
///
/// # Errors
///
/// Returns an error if `bytes` does not start with an encoding of `T`.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<(T, usize), DecodeError> {
    decode_with(bytes, &Config::new())
}

/// Like [`decode`], with limits taken from `config`.
///
/// # Errors
///
/// Returns an error if `bytes` does not start with an encoding of `T` that
/// satisfies `config`.
pub fn decode_with<T: Decode>(
    bytes: &[u8],
    config: &Config,
) -> Result<(T, usize), DecodeError> {
    let mut reader = Reader::with_config(bytes, *config);
    let value = reader.read()?;
    Ok((value, reader.bytes_consumed()))
}

/// Decodes a value that must occupy all of `bytes`.
///
/// # Errors
///
/// Returns [`DecodeError::TrailingData`] if bytes are left over, or any
/// error from decoding `T`.
pub fn decode_exact<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_exact_with(bytes, &Config::new())
}

/// Like [`decode_exact`], with limits taken from `config`.
///
/// # Errors
///
/// Returns [`DecodeError::TrailingData`] if bytes are left over, or any
/// error from decoding `T` under `config`.
pub fn decode_exact_with<T: Decode>(
    bytes: &[u8],
    config: &Config,
) -> Result<T, DecodeError> {
    let mut reader = Reader::with_config(bytes, *config);
    let value = reader.read()?;
    reader.finish()?;
    Ok(value)
}

//! Length-prefixed codec for text and byte blobs.
//!
//! Text is written as a 4-byte `u32` length followed by that many raw bytes,
//! with no terminator. Decoding consumes `4 + len` bytes.

use std::{
    ops::{Deref, DerefMut},
    rc::Rc,
    sync::Arc,
};

use crate::{
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    error::{DecodeError, EncodeError},
};

impl Encode for str {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encoder.emit_str(self)
    }
}

impl Encode for String {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encoder.emit_str(self)
    }
}

impl Decode for String {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        decoder.read_str()
    }
}

impl Decode for Box<str> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decoder.read_str()?.into_boxed_str())
    }
}

impl Decode for Rc<str> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::from(decoder.read_str()?))
    }
}

impl Decode for Arc<str> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::from(decoder.read_str()?))
    }
}

/// An owned byte blob with the text layout.
///
/// `ByteBuf` is copied in and out in one step and, unlike [`String`], places
/// no UTF-8 requirement on its payload. Its encoding is identical to that of
/// a `Vec<u8>`, since both are a `u32` count followed by the bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteBuf(Vec<u8>);

impl ByteBuf {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self { Self(Vec::new()) }

    /// Consumes the buffer and returns its bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> { self.0 }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self { Self(bytes) }
}

impl From<&[u8]> for ByteBuf {
    fn from(bytes: &[u8]) -> Self { Self(bytes.to_vec()) }
}

impl From<ByteBuf> for Vec<u8> {
    fn from(buf: ByteBuf) -> Self { buf.0 }
}

impl Deref for ByteBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ByteBuf {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl Encode for ByteBuf {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encoder.emit_bytes(&self.0)
    }
}

impl Decode for ByteBuf {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self(decoder.read_bytes()?))
    }
}

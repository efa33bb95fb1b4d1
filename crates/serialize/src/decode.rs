//! Decoding traits and implementations for deserialization.
//!
//! This module provides the [`Decoder`] trait for bounds-checked byte
//! sources, and the [`Decode`] trait for types that can be deserialized.
//! Every primitive read checks the remaining length first, so no decode can
//! read past the end of its input.

use std::{borrow::Cow, rc::Rc, sync::Arc};

use crate::{config::Config, error::DecodeError, stream::Reader};

/// A bounds-checked source of encoded bytes.
///
/// Implementors track a cursor into their input. Each read either returns
/// exactly the requested bytes and advances the cursor by that many, or
/// fails with [`DecodeError::TruncatedInput`] without advancing.
pub trait Decoder {
    // =========================================================================
    // Required methods
    // =========================================================================

    /// Takes the next `len` bytes from the input.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedInput`] if fewer than `len` bytes
    /// remain.
    fn read_raw_bytes(&mut self, len: usize) -> Result<&[u8], DecodeError>;

    /// Returns the number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Returns the number of bytes still available.
    fn remaining(&self) -> usize;

    /// Returns the limits this decoder enforces.
    fn config(&self) -> &Config;

    // =========================================================================
    // Scalars, in host byte order
    // =========================================================================

    /// Takes the next `N` bytes as a fixed-size array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_raw_bytes(N)?);
        Ok(buf)
    }

    /// Reads a single unsigned byte.
    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(u8::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 16-bit unsigned integer.
    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 32-bit unsigned integer.
    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 64-bit unsigned integer.
    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 128-bit unsigned integer.
    fn read_u128(&mut self) -> Result<u128, DecodeError> {
        Ok(u128::from_ne_bytes(self.read_array()?))
    }

    /// Reads a platform-sized unsigned integer at its native width.
    fn read_usize(&mut self) -> Result<usize, DecodeError> {
        Ok(usize::from_ne_bytes(self.read_array()?))
    }

    /// Reads a single signed byte.
    fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(i8::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 16-bit signed integer.
    fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 32-bit signed integer.
    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 64-bit signed integer.
    fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 128-bit signed integer.
    fn read_i128(&mut self) -> Result<i128, DecodeError> {
        Ok(i128::from_ne_bytes(self.read_array()?))
    }

    /// Reads a platform-sized signed integer at its native width.
    fn read_isize(&mut self) -> Result<isize, DecodeError> {
        Ok(isize::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 32-bit float.
    fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_ne_bytes(self.read_array()?))
    }

    /// Reads a 64-bit float.
    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_ne_bytes(self.read_array()?))
    }

    /// Reads a boolean. Zero is `false`, anything else is `true`.
    fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a character from its 32-bit Unicode scalar value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidChar`] if the value is not a Unicode
    /// scalar value.
    fn read_char(&mut self) -> Result<char, DecodeError> {
        let offset = self.position();
        let value = self.read_u32()?;
        char::from_u32(value)
            .ok_or(DecodeError::InvalidChar { offset, value })
    }

    // =========================================================================
    // Length-prefixed data
    // =========================================================================

    /// Reads a 4-byte length or element count.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::LengthLimitExceeded`] if the length is larger
    /// than [`Config::max_len`].
    fn read_len(&mut self) -> Result<usize, DecodeError> {
        let offset = self.position();
        let len = self.read_u32()?;
        let max = self.config().max_len();

        if len > max {
            return Err(DecodeError::LengthLimitExceeded { offset, len, max });
        }

        usize::try_from(len)
            .map_err(|_| DecodeError::LengthLimitExceeded { offset, len, max })
    }

    /// Reads a length-prefixed byte blob.
    fn read_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_len()?;
        Ok(self.read_raw_bytes(len)?.to_vec())
    }

    /// Reads length-prefixed text as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidUtf8`] if the payload is not UTF-8.
    fn read_str(&mut self) -> Result<String, DecodeError> {
        let len = self.read_len()?;
        let offset = self.position();
        let bytes = self.read_raw_bytes(len)?;

        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|source| DecodeError::InvalidUtf8 { offset, source })
    }
}

/// A type that can reconstruct itself from its encoding.
///
/// This is the counterpart of [`Encode`](crate::Encode). An implementation
/// must read exactly the bytes its `encode` wrote, in the same order.
///
/// # Example
///
/// ```
/// use wirepack_serialize::{Decode, DecodeError, Decoder};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Decode for Point {
///     fn decode<D: Decoder + ?Sized>(
///         decoder: &mut D,
///     ) -> Result<Self, DecodeError> {
///         let x = i32::decode(decoder)?;
///         let y = i32::decode(decoder)?;
///         Ok(Point { x, y })
///     }
/// }
///
/// let mut bytes = 1i32.to_ne_bytes().to_vec();
/// bytes.extend_from_slice(&2i32.to_ne_bytes());
///
/// let (point, consumed) = Point::from_bytes(&bytes).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// assert_eq!(consumed, 8);
/// ```
pub trait Decode: Sized {
    /// Decodes a value from `decoder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or cannot be an encoding
    /// of this type.
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError>;

    /// Consumes a value from the front of `bytes`, returning it together with
    /// the number of bytes it occupied. Trailing bytes are left untouched.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Decode::decode`].
    fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut reader = Reader::new(bytes);
        let value = reader.read::<Self>()?;
        Ok((value, reader.bytes_consumed()))
    }
}

// =============================================================================
// Implementations for smart pointers
// =============================================================================

impl<T: Decode> Decode for Box<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::new(T::decode(decoder)?))
    }
}

impl<T: Decode> Decode for Rc<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::new(T::decode(decoder)?))
    }
}

impl<T: Decode> Decode for Arc<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::new(T::decode(decoder)?))
    }
}

impl<T: ToOwned + ?Sized> Decode for Cow<'_, T>
where
    T::Owned: Decode,
{
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Cow::Owned(T::Owned::decode(decoder)?))
    }
}

// =============================================================================
// Implementations for Option, tuples, and arrays
// =============================================================================

impl<T: Decode> Decode for Option<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        if decoder.read_bool()? {
            Ok(Some(T::decode(decoder)?))
        } else {
            Ok(None)
        }
    }
}

macro_rules! impl_decode_tuple {
    ($($name:ident),+) => {
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode<D: Decoder + ?Sized>(
                decoder: &mut D,
            ) -> Result<Self, DecodeError> {
                Ok(($(
                    $name::decode(decoder)?,
                )+))
            }
        }
    };
}

impl_decode_tuple!(A);
impl_decode_tuple!(A, B);
impl_decode_tuple!(A, B, C);
impl_decode_tuple!(A, B, C, D_);
impl_decode_tuple!(A, B, C, D_, E);
impl_decode_tuple!(A, B, C, D_, E, F);
impl_decode_tuple!(A, B, C, D_, E, F, G);
impl_decode_tuple!(A, B, C, D_, E, F, G, H);
impl_decode_tuple!(A, B, C, D_, E, F, G, H, I);
impl_decode_tuple!(A, B, C, D_, E, F, G, H, I, J);
impl_decode_tuple!(A, B, C, D_, E, F, G, H, I, J, K);
impl_decode_tuple!(A, B, C, D_, E, F, G, H, I, J, K, L);

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(decoder)?);
        }

        items.try_into().map_err(|items: Vec<T>| {
            DecodeError::custom(format!(
                "decoded {} elements for an array of length {N}",
                items.len()
            ))
        })
    }
}

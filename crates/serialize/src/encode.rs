//! Encoding traits and implementations for serialization.
//!
//! This module provides the [`Encoder`] trait for byte sinks, and the
//! [`Encode`] trait for types that can be serialized. Scalar, text,
//! sequence, and keyed implementations live in their own modules; this one
//! holds the traits and the structural impls that only delegate (references,
//! smart pointers, `Option`, tuples, and fixed-size arrays).

use std::{borrow::Cow, rc::Rc, sync::Arc};

use crate::{error::EncodeError, stream::Writer};

/// A sink for encoded bytes.
///
/// Only [`emit_raw_bytes`](Encoder::emit_raw_bytes) is required. Every scalar
/// is emitted as its `size_of::<T>()` bytes in host byte order, and every
/// length or count as a `u32` in host byte order.
///
/// # Example
///
/// ```
/// use wirepack_serialize::{EncodeError, Encoder};
///
/// /// Discards everything, keeping only a checksum.
/// struct Checksum(u32);
///
/// impl Encoder for Checksum {
///     fn emit_raw_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
///         for byte in bytes {
///             self.0 = self.0.wrapping_mul(31).wrapping_add(u32::from(*byte));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Encoder {
    // =========================================================================
    // Required methods
    // =========================================================================

    /// Appends raw bytes to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the bytes.
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError>;

    // =========================================================================
    // Scalars, in host byte order
    // =========================================================================

    /// Emits a single unsigned byte.
    fn emit_u8(&mut self, v: u8) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&[v])
    }

    /// Emits a 16-bit unsigned integer.
    fn emit_u16(&mut self, v: u16) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 32-bit unsigned integer.
    fn emit_u32(&mut self, v: u32) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 64-bit unsigned integer.
    fn emit_u64(&mut self, v: u64) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 128-bit unsigned integer.
    fn emit_u128(&mut self, v: u128) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a platform-sized unsigned integer at its native width.
    fn emit_usize(&mut self, v: usize) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a single signed byte.
    fn emit_i8(&mut self, v: i8) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 16-bit signed integer.
    fn emit_i16(&mut self, v: i16) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 32-bit signed integer.
    fn emit_i32(&mut self, v: i32) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 64-bit signed integer.
    fn emit_i64(&mut self, v: i64) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 128-bit signed integer.
    fn emit_i128(&mut self, v: i128) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a platform-sized signed integer at its native width.
    fn emit_isize(&mut self, v: isize) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 32-bit float. The bit pattern passes through unchanged.
    fn emit_f32(&mut self, v: f32) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a 64-bit float. The bit pattern passes through unchanged.
    fn emit_f64(&mut self, v: f64) -> Result<(), EncodeError> {
        self.emit_raw_bytes(&v.to_ne_bytes())
    }

    /// Emits a boolean as `1u8` or `0u8`.
    fn emit_bool(&mut self, v: bool) -> Result<(), EncodeError> {
        self.emit_u8(u8::from(v))
    }

    /// Emits a character as its 32-bit Unicode scalar value.
    fn emit_char(&mut self, v: char) -> Result<(), EncodeError> {
        self.emit_u32(u32::from(v))
    }

    // =========================================================================
    // Length-prefixed data
    // =========================================================================

    /// Emits a length or element count as a 4-byte `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::LengthOverflow`] if `len` exceeds `u32::MAX`.
    fn emit_len(&mut self, len: usize) -> Result<(), EncodeError> {
        let len = u32::try_from(len)
            .map_err(|_| EncodeError::LengthOverflow { len })?;
        self.emit_u32(len)
    }

    /// Emits a byte blob as a `u32` length followed by the raw bytes.
    fn emit_bytes(&mut self, v: &[u8]) -> Result<(), EncodeError> {
        self.emit_len(v.len())?;
        self.emit_raw_bytes(v)
    }

    /// Emits a string slice as its UTF-8 bytes, length-prefixed.
    fn emit_str(&mut self, v: &str) -> Result<(), EncodeError> {
        self.emit_bytes(v.as_bytes())
    }
}

/// A type that can produce its own encoding.
///
/// This is the extension hook for user-defined aggregates: any type that
/// implements [`Encode`] can be written directly, stored in a sequence, or
/// used as a key or value of a keyed collection. An implementation usually
/// encodes its fields one after another in a fixed order.
///
/// # Example
///
/// ```
/// use wirepack_serialize::{Encode, EncodeError, Encoder};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Encode for Point {
///     fn encode<E: Encoder + ?Sized>(
///         &self,
///         encoder: &mut E,
///     ) -> Result<(), EncodeError> {
///         self.x.encode(encoder)?;
///         self.y.encode(encoder)
///     }
/// }
///
/// assert_eq!(Point { x: 1, y: 2 }.to_bytes().unwrap().len(), 8);
/// ```
pub trait Encode {
    /// Encodes this value into `encoder`.
    ///
    /// # Errors
    ///
    /// Returns an error if a length does not fit the wire format or the
    /// encoder rejects the bytes.
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError>;

    /// Produces this value's encoding as an owned buffer.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Encode::encode`].
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        self.encode(&mut writer)?;
        Ok(writer.into_inner())
    }
}

// =============================================================================
// Implementations for references and smart pointers
// =============================================================================

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ToOwned + ?Sized> Encode for Cow<'_, T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

// =============================================================================
// Implementations for Option, tuples, and arrays
// =============================================================================

impl<T: Encode> Encode for Option<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        match self {
            Some(v) => {
                encoder.emit_bool(true)?;
                v.encode(encoder)
            }
            None => encoder.emit_bool(false),
        }
    }
}

macro_rules! impl_encode_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode<E: Encoder + ?Sized>(
                &self,
                encoder: &mut E,
            ) -> Result<(), EncodeError> {
                let ($($name,)+) = self;
                $(
                    $name.encode(encoder)?;
                )+
                Ok(())
            }
        }
    };
}

impl_encode_tuple!(A);
impl_encode_tuple!(A, B);
impl_encode_tuple!(A, B, C);
impl_encode_tuple!(A, B, C, D);
impl_encode_tuple!(A, B, C, D, E_);
impl_encode_tuple!(A, B, C, D, E_, F);
impl_encode_tuple!(A, B, C, D, E_, F, G);
impl_encode_tuple!(A, B, C, D, E_, F, G, H);
impl_encode_tuple!(A, B, C, D, E_, F, G, H, I);
impl_encode_tuple!(A, B, C, D, E_, F, G, H, I, J);
impl_encode_tuple!(A, B, C, D, E_, F, G, H, I, J, K);
impl_encode_tuple!(A, B, C, D, E_, F, G, H, I, J, K, L);

// The length is part of the type, so no count prefix is written.
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        for item in self {
            item.encode(encoder)?;
        }
        Ok(())
    }
}

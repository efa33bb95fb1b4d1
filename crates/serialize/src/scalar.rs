//! Fixed-width scalar codec.
//!
//! A scalar is written as exactly `size_of::<T>()` bytes of its host-order
//! representation and read back by reinterpreting the same number of bytes.
//! Floating-point bit patterns, NaN payloads included, pass through
//! unchanged.

use crate::{
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    error::{DecodeError, EncodeError},
};

macro_rules! impl_scalar {
    ($($ty:ty => $emit:ident, $read:ident);+ $(;)?) => {
        $(
            impl Encode for $ty {
                fn encode<E: Encoder + ?Sized>(
                    &self,
                    encoder: &mut E,
                ) -> Result<(), EncodeError> {
                    encoder.$emit(*self)
                }
            }

            impl Decode for $ty {
                fn decode<D: Decoder + ?Sized>(
                    decoder: &mut D,
                ) -> Result<Self, DecodeError> {
                    decoder.$read()
                }
            }
        )+
    };
}

impl_scalar! {
    u8 => emit_u8, read_u8;
    u16 => emit_u16, read_u16;
    u32 => emit_u32, read_u32;
    u64 => emit_u64, read_u64;
    u128 => emit_u128, read_u128;
    usize => emit_usize, read_usize;
    i8 => emit_i8, read_i8;
    i16 => emit_i16, read_i16;
    i32 => emit_i32, read_i32;
    i64 => emit_i64, read_i64;
    i128 => emit_i128, read_i128;
    isize => emit_isize, read_isize;
    f32 => emit_f32, read_f32;
    f64 => emit_f64, read_f64;
    bool => emit_bool, read_bool;
    char => emit_char, read_char;
}

impl Encode for () {
    fn encode<E: Encoder + ?Sized>(
        &self,
        _encoder: &mut E,
    ) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl Decode for () {
    fn decode<D: Decoder + ?Sized>(_decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(())
    }
}

#[cfg(test)]
mod test;

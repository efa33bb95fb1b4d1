//! Sequence codec shared by every ordered collection shape.
//!
//! A sequence is a `u32` element count followed by each element's encoding
//! in iteration order. Slices, vectors, deques, linked lists, and sets all go
//! through [`encode_sequence`] and [`decode_sequence`]; a shape only decides
//! how to iterate itself and how to rebuild itself from the decoded vector.
//!
//! ```
//! use wirepack_serialize::{decode, encode};
//!
//! assert_eq!(encode(&Vec::<i32>::new()).unwrap(), [0, 0, 0, 0]);
//! assert_eq!(decode::<Vec<i32>>(&[0, 0, 0, 0]).unwrap(), (vec![], 4));
//! ```

use std::{
    collections::{BTreeSet, HashSet, LinkedList, VecDeque},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

use crate::{
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    error::{DecodeError, EncodeError},
};

/// Upper bound on the memory preallocated for a decoded collection before
/// its elements have actually been read.
const MAX_PREALLOCATION_BYTES: usize = 1 << 20;

/// Encodes `items` as a count followed by each item in iteration order.
///
/// # Errors
///
/// Returns [`EncodeError::LengthOverflow`] if there are more than `u32::MAX`
/// items, or any error from encoding an item.
pub fn encode_sequence<'a, E, T, I>(
    encoder: &mut E,
    items: I,
) -> Result<(), EncodeError>
where
    E: Encoder + ?Sized,
    T: Encode + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: ExactSizeIterator,
{
    let items = items.into_iter();

    encoder.emit_len(items.len())?;
    for item in items {
        item.encode(encoder)?;
    }

    Ok(())
}

/// Decodes a count followed by that many elements, in order.
///
/// The elements are collected into a fresh vector; nothing is returned if any
/// element fails to decode. Elements that consume no input are counted
/// against [`Config::max_zero_width_len`](crate::Config::max_zero_width_len),
/// since their number is not bounded by the input size.
///
/// # Errors
///
/// Returns an error if the count exceeds the configured limit, if the input
/// ends early, or if an element fails to decode.
pub fn decode_sequence<D, T>(decoder: &mut D) -> Result<Vec<T>, DecodeError>
where
    D: Decoder + ?Sized,
    T: Decode,
{
    let offset = decoder.position();
    let len = decoder.read_len()?;
    let mut items = Vec::with_capacity(capacity_hint::<D, T>(decoder, len));

    let max_zero_width = decoder.config().max_zero_width_len();
    let mut zero_width = 0u32;

    for _ in 0..len {
        let start = decoder.position();
        items.push(T::decode(decoder)?);

        if decoder.position() == start {
            zero_width += 1;
            if zero_width > max_zero_width {
                return Err(DecodeError::LengthLimitExceeded {
                    offset,
                    len: u32::try_from(len).unwrap_or(u32::MAX),
                    max: max_zero_width,
                });
            }
        }
    }

    Ok(items)
}

/// Bounds preallocation by what the remaining input could plausibly hold, so
/// a forged count cannot allocate far beyond the input size.
pub(crate) fn capacity_hint<D: Decoder + ?Sized, T>(
    decoder: &D,
    len: usize,
) -> usize {
    bounded_capacity::<T>(len.min(decoder.remaining()))
}

/// Caps a reservation for `len` values of `T` at a fixed memory budget.
///
/// Hash-based shapes reserve from this rather than from the decoded length:
/// their table size does not scale with `size_of::<T>()`.
pub(crate) fn bounded_capacity<T>(len: usize) -> usize {
    len.min(MAX_PREALLOCATION_BYTES / size_of::<T>().max(1))
}

// =============================================================================
// Ordered shapes
// =============================================================================

impl<T: Encode> Encode for [T] {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        decode_sequence(decoder)
    }
}

impl<T: Decode> Decode for Box<[T]> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decode_sequence(decoder)?.into_boxed_slice())
    }
}

impl<T: Decode> Decode for Rc<[T]> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::from(decode_sequence::<D, T>(decoder)?))
    }
}

impl<T: Decode> Decode for Arc<[T]> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::from(decode_sequence::<D, T>(decoder)?))
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(Self::from(decode_sequence::<D, T>(decoder)?))
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decode_sequence::<D, T>(decoder)?.into_iter().collect())
    }
}

// =============================================================================
// Set shapes
//
// Duplicates in the input collapse on insertion; the wire format does not
// know about uniqueness.
// =============================================================================

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decode_sequence::<D, T>(decoder)?.into_iter().collect())
    }
}

impl<T: Encode, S: BuildHasher> Encode for HashSet<T, S> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        let items = decode_sequence::<D, T>(decoder)?;
        let mut set = Self::with_capacity_and_hasher(
            bounded_capacity::<T>(items.len()),
            S::default(),
        );
        for item in items {
            set.insert(item);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod test;

//! Keyed codec shared by every associative collection shape.
//!
//! A keyed value is split into two index-aligned sequences: first the
//! sequence of keys, then the sequence of values, each with its own `u32`
//! count. Decoding reads both sequences, checks that their lengths agree,
//! and re-pairs them by index. Whether duplicate keys survive is decided by
//! the target shape when it inserts the pairs; the wire format is the same
//! for a unique-key map and for [`Pairs`].

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    iter::Zip,
    vec,
};

use crate::{
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    error::{DecodeError, EncodeError},
    sequence::{bounded_capacity, decode_sequence, encode_sequence},
};

/// Encodes `pairs` as the sequence of their keys followed by the sequence of
/// their values, both in iteration order.
///
/// # Errors
///
/// Returns [`EncodeError::LengthOverflow`] if there are more than `u32::MAX`
/// pairs, or any error from encoding a key or value.
pub fn encode_keyed<'a, E, K, V, I>(
    encoder: &mut E,
    pairs: I,
) -> Result<(), EncodeError>
where
    E: Encoder + ?Sized,
    K: Encode + ?Sized + 'a,
    V: Encode + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let (keys, values): (Vec<&K>, Vec<&V>) = pairs.into_iter().unzip();

    encode_sequence(encoder, &keys)?;
    encode_sequence(encoder, &values)
}

/// Decodes a key sequence and then a value sequence, returning the pairs in
/// their encoded order.
///
/// # Errors
///
/// Returns [`DecodeError::PairingMismatch`] if the two sequences have
/// different lengths, or any error from decoding either sequence.
pub fn decode_keyed<D, K, V>(
    decoder: &mut D,
) -> Result<Zip<vec::IntoIter<K>, vec::IntoIter<V>>, DecodeError>
where
    D: Decoder + ?Sized,
    K: Decode,
    V: Decode,
{
    let keys = decode_sequence::<D, K>(decoder)?;
    let values = decode_sequence::<D, V>(decoder)?;

    if keys.len() != values.len() {
        return Err(DecodeError::PairingMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }

    Ok(keys.into_iter().zip(values))
}

// =============================================================================
// Unique-key shapes
// =============================================================================

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_keyed(encoder, self)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decode_keyed(decoder)?.collect())
    }
}

impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_keyed(encoder, self)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        let pairs = decode_keyed(decoder)?;
        let mut map = Self::with_capacity_and_hasher(
            bounded_capacity::<(K, V)>(pairs.len()),
            S::default(),
        );
        for (key, value) in pairs {
            map.insert(key, value);
        }
        Ok(map)
    }
}

// =============================================================================
// Multi-valued shape
// =============================================================================

/// An ordered list of key/value pairs that allows repeated keys.
///
/// `Pairs` is the multi-map shape of the keyed codec: it keeps every pair,
/// duplicates included, in insertion order.
///
/// ```
/// use wirepack_serialize::{Pairs, decode, encode};
///
/// let mut tags = Pairs::new();
/// tags.push("color", 1u8);
/// tags.push("color", 2u8);
///
/// let bytes = encode(&tags).unwrap();
/// let (decoded, _) = decode::<Pairs<String, u8>>(&bytes).unwrap();
/// assert_eq!(decoded.get_all("color").copied().collect::<Vec<_>>(), [1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pairs<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Pairs<K, V> {
    /// Creates an empty list of pairs.
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Appends a pair, keeping any existing pair with the same key.
    pub fn push(&mut self, key: K, value: V) { self.entries.push((key, value)); }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all<'a, Q>(&'a self, key: &'a Q) -> impl Iterator<Item = &'a V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .filter(move |(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns the number of pairs.
    #[must_use]
    pub const fn len(&self) -> usize { self.entries.len() }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Consumes the list and returns its pairs.
    #[must_use]
    pub fn into_inner(self) -> Vec<(K, V)> { self.entries }
}

impl<K, V> Default for Pairs<K, V> {
    fn default() -> Self { Self::new() }
}

impl<K, V> From<Vec<(K, V)>> for Pairs<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self { Self { entries } }
}

impl<K, V> FromIterator<(K, V)> for Pairs<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<K, V> Extend<(K, V)> for Pairs<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> IntoIterator for Pairs<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

impl<K: Encode, V: Encode> Encode for Pairs<K, V> {
    fn encode<E: Encoder + ?Sized>(
        &self,
        encoder: &mut E,
    ) -> Result<(), EncodeError> {
        encode_keyed(encoder, self.iter())
    }
}

impl<K: Decode, V: Decode> Decode for Pairs<K, V> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Self, DecodeError> {
        Ok(decode_keyed(decoder)?.collect())
    }
}

#[cfg(test)]
mod test;

use std::collections::{BTreeMap, HashMap};

use crate::{Config, DecodeError, Pairs, Writer, decode, decode_with, encode};

#[test]
fn keys_then_values_layout() {
    let map = BTreeMap::from([(1u8, 10u16), (2, 20)]);
    let bytes = encode(&map).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&2u32.to_ne_bytes());
    expected.extend_from_slice(&[1, 2]);
    expected.extend_from_slice(&2u32.to_ne_bytes());
    expected.extend_from_slice(&10u16.to_ne_bytes());
    expected.extend_from_slice(&20u16.to_ne_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn keyed_layout_is_two_sequences() {
    let map = BTreeMap::from([('a', 1.5f32), ('b', -0.25)]);

    let mut writer = Writer::new();
    writer.write(&vec!['a', 'b']).unwrap();
    writer.write(&vec![1.5f32, -0.25]).unwrap();

    assert_eq!(encode(&map).unwrap(), writer.into_inner());
}

#[test]
fn hash_map_pairing_integrity() {
    let map: HashMap<String, Vec<u32>> = HashMap::from([
        ("k1".to_owned(), vec![1]),
        ("k2".to_owned(), vec![2, 2]),
        ("k3".to_owned(), vec![]),
    ]);
    let bytes = encode(&map).unwrap();

    let (decoded, consumed) = decode::<HashMap<String, Vec<u32>>>(&bytes).unwrap();
    assert_eq!(decoded, map);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn empty_map_is_two_zero_counts() {
    let bytes = encode(&BTreeMap::<u8, u8>::new()).unwrap();
    assert_eq!(bytes, [0; 8]);
    assert_eq!(
        decode::<BTreeMap<u8, u8>>(&bytes).unwrap(),
        (BTreeMap::new(), 8)
    );
}

#[test]
fn unequal_counts_are_a_pairing_mismatch() {
    let mut writer = Writer::new();
    writer.write(&vec![1u8, 2, 3]).unwrap();
    writer.write(&vec![10u8, 20]).unwrap();
    let bytes = writer.into_inner();

    let err = decode::<BTreeMap<u8, u8>>(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::PairingMismatch { keys: 3, values: 2 });

    let err = decode::<Pairs<u8, u8>>(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::PairingMismatch { keys: 3, values: 2 });
}

#[test]
fn missing_value_sequence_is_truncated() {
    let bytes = encode(&vec![1u8, 2]).unwrap();

    let err = decode::<HashMap<u8, u8>>(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::TruncatedInput {
        offset: 6,
        needed: 4,
        remaining: 0,
    });
}

#[test]
fn unique_map_keeps_last_duplicate_but_pairs_keep_all() {
    let pairs: Pairs<u8, &str> =
        [(1, "first"), (2, "other"), (1, "second")].into_iter().collect();
    let bytes = encode(&pairs).unwrap();

    let (multi, _) = decode::<Pairs<u8, String>>(&bytes).unwrap();
    assert_eq!(multi.len(), 3);
    assert_eq!(multi.get_all(&1).collect::<Vec<_>>(), ["first", "second"]);

    let (unique, _) = decode::<BTreeMap<u8, String>>(&bytes).unwrap();
    assert_eq!(unique.len(), 2);
    assert_eq!(unique[&1], "second");
}

#[test]
fn maps_of_custom_values() {
    let map = BTreeMap::from([
        (7u32, BTreeMap::from([("x".to_owned(), 1i8)])),
        (9u32, BTreeMap::new()),
    ]);
    let bytes = encode(&map).unwrap();
    assert_eq!(decode::<BTreeMap<u32, BTreeMap<String, i8>>>(&bytes).unwrap().0, map);
}

#[test]
fn forged_count_of_zero_width_keys_is_rejected() {
    let mut bytes = u32::MAX.to_ne_bytes().to_vec();
    bytes.extend_from_slice(&u32::MAX.to_ne_bytes());

    for result in [
        decode::<HashMap<(), ()>>(&bytes).map(|_| ()),
        decode::<BTreeMap<(), ()>>(&bytes).map(|_| ()),
        decode::<Pairs<(), ()>>(&bytes).map(|_| ()),
    ] {
        assert!(matches!(
            result,
            Err(DecodeError::LengthLimitExceeded { offset: 0, .. })
        ));
    }
}

#[test]
fn zero_width_keys_collapse_in_hash_map() {
    let pairs = Pairs::from(vec![((), 1u8), ((), 2u8), ((), 3u8)]);
    let bytes = encode(&pairs).unwrap();

    let config = Config::new().with_max_zero_width_len(3);
    let (map, consumed) =
        decode_with::<HashMap<(), u8>>(&bytes, &config).unwrap();
    assert_eq!(map, HashMap::from([((), 3)]));
    assert_eq!(consumed, bytes.len());
}

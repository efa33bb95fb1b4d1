use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use crate::{Config, Decode, DecodeError, Encode, decode, decode_with, encode};

#[test]
fn empty_sequence_is_a_zero_count() {
    let bytes = encode(&Vec::<i32>::new()).unwrap();
    assert_eq!(bytes, [0, 0, 0, 0]);
    assert_eq!(decode::<Vec<i32>>(&bytes).unwrap(), (vec![], 4));
}

#[test]
fn sequence_layout() {
    let bytes = encode(&vec![1u16, 2, 3]).unwrap();

    let mut expected = 3u32.to_ne_bytes().to_vec();
    for v in [1u16, 2, 3] {
        expected.extend_from_slice(&v.to_ne_bytes());
    }
    assert_eq!(bytes, expected);
}

#[test]
fn order_is_preserved() {
    let value = vec!["c".to_owned(), "a".to_owned(), "b".to_owned()];
    let bytes = encode(&value).unwrap();

    let (decoded, consumed) = decode::<Vec<String>>(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn ordered_shapes_share_one_layout() {
    let vec = vec![10i64, -20, 30];
    let deque: VecDeque<i64> = vec.iter().copied().collect();
    let list: LinkedList<i64> = vec.iter().copied().collect();

    let expected = encode(&vec).unwrap();
    assert_eq!(encode(&deque).unwrap(), expected);
    assert_eq!(encode(&list).unwrap(), expected);
    assert_eq!(encode(vec.as_slice()).unwrap(), expected);

    assert_eq!(decode::<VecDeque<i64>>(&expected).unwrap().0, deque);
    assert_eq!(decode::<LinkedList<i64>>(&expected).unwrap().0, list);
    assert_eq!(&*decode::<Box<[i64]>>(&expected).unwrap().0, &vec[..]);
}

#[test]
fn sets_roundtrip_and_collapse_duplicates() {
    let set: BTreeSet<u8> = [3, 1, 2].into_iter().collect();
    let bytes = encode(&set).unwrap();
    assert_eq!(decode::<BTreeSet<u8>>(&bytes).unwrap().0, set);

    // A sequence with a repeated element decodes into a smaller set.
    let bytes = encode(&vec![5u8, 5, 6]).unwrap();
    let (decoded, consumed) = decode::<HashSet<u8>>(&bytes).unwrap();
    assert_eq!(decoded, HashSet::from([5, 6]));
    assert_eq!(consumed, 7);
}

#[test]
fn nested_sequences() {
    let value = vec![vec![1u8], vec![], vec![2, 3]];
    let bytes = encode(&value).unwrap();
    assert_eq!(bytes.len(), 4 + (4 + 1) + 4 + (4 + 2));
    assert_eq!(decode::<Vec<Vec<u8>>>(&bytes).unwrap(), (value, 19));
}

#[test]
fn missing_element_is_truncated() {
    let mut bytes = encode(&vec![1u32, 2]).unwrap();
    bytes.truncate(10);

    let err = decode::<Vec<u32>>(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::TruncatedInput {
        offset: 8,
        needed: 4,
        remaining: 2,
    });
}

#[test]
fn forged_count_fails_without_huge_allocation() {
    let bytes = u32::MAX.to_ne_bytes();
    let err = decode::<Vec<u64>>(&bytes).unwrap_err();
    assert!(err.is_truncated());
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
struct Marker;

#[test]
fn forged_count_of_zero_width_elements_is_limited() {
    let bytes = u32::MAX.to_ne_bytes();
    let limit = Config::new().max_zero_width_len();

    assert_eq!(
        decode::<Vec<()>>(&bytes),
        Err(DecodeError::LengthLimitExceeded {
            offset: 0,
            len: u32::MAX,
            max: limit,
        })
    );
    assert!(matches!(
        decode::<Vec<Marker>>(&bytes),
        Err(DecodeError::LengthLimitExceeded { .. })
    ));
}

#[test]
fn forged_count_of_zero_width_set_elements_is_rejected() {
    let bytes = u32::MAX.to_ne_bytes();

    assert!(matches!(
        decode::<HashSet<()>>(&bytes),
        Err(DecodeError::LengthLimitExceeded { .. })
    ));
    assert!(matches!(
        decode::<HashSet<Marker>>(&bytes),
        Err(DecodeError::LengthLimitExceeded { .. })
    ));
    assert!(matches!(
        decode::<BTreeSet<Marker>>(&bytes),
        Err(DecodeError::LengthLimitExceeded { .. })
    ));
}

#[test]
fn zero_width_elements_within_limit_roundtrip() {
    let units = vec![(); 1000];
    let bytes = encode(&units).unwrap();
    assert_eq!(bytes.len(), 4);
    assert_eq!(decode::<Vec<()>>(&bytes).unwrap(), (units, 4));

    let config = Config::new().with_max_zero_width_len(999);
    assert!(matches!(
        decode_with::<Vec<()>>(&bytes, &config),
        Err(DecodeError::LengthLimitExceeded { max: 999, .. })
    ));

    let set = decode::<HashSet<Marker>>(&encode(&vec![Marker; 3]).unwrap());
    assert_eq!(set.unwrap(), (HashSet::from([Marker]), 4));
}

#[test]
fn mixed_width_elements_only_count_empty_ones() {
    // Every `Option` consumes its flag byte, so none of these count.
    let items: Vec<Option<()>> = vec![None, Some(()), None];
    let bytes = encode(&items).unwrap();

    let config = Config::new().with_max_zero_width_len(0);
    assert_eq!(decode_with::<Vec<Option<()>>>(&bytes, &config).unwrap().0, items);

    let nested = vec![Vec::<()>::new(); 5];
    let bytes = encode(&nested).unwrap();
    assert_eq!(decode_with::<Vec<Vec<()>>>(&bytes, &config).unwrap().0, nested);
}

#[test]
fn count_limit_applies_to_sequences() {
    let bytes = encode(&vec![0u8; 3]).unwrap();

    let config = Config::new().with_max_len(3);
    assert_eq!(decode_with::<Vec<u8>>(&bytes, &config).unwrap().0.len(), 3);

    let config = Config::new().with_max_len(2);
    assert!(matches!(
        decode_with::<Vec<u8>>(&bytes, &config),
        Err(DecodeError::LengthLimitExceeded { len: 3, max: 2, .. })
    ));
}

#[test]
fn fixed_arrays_have_no_count() {
    let bytes = encode(&[1u8, 2, 3]).unwrap();
    assert_eq!(bytes, [1, 2, 3]);
    assert_eq!(decode::<[u8; 3]>(&bytes).unwrap(), ([1, 2, 3], 3));
}

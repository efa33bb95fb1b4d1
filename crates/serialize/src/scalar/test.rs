use crate::{DecodeError, Encode, decode, encode};

#[test]
fn scalar_width_matches_host_size() {
    assert_eq!(encode(&7u8).unwrap().len(), 1);
    assert_eq!(encode(&7i16).unwrap().len(), 2);
    assert_eq!(encode(&7u32).unwrap().len(), 4);
    assert_eq!(encode(&7i64).unwrap().len(), 8);
    assert_eq!(encode(&7u128).unwrap().len(), 16);
    assert_eq!(encode(&7usize).unwrap().len(), size_of::<usize>());
    assert_eq!(encode(&1.5f32).unwrap().len(), 4);
    assert_eq!(encode(&1.5f64).unwrap().len(), 8);
}

#[test]
fn scalar_bytes_are_host_order() {
    let value = 0x0102_0304u32;
    assert_eq!(encode(&value).unwrap(), value.to_ne_bytes());

    let value = -2i64;
    assert_eq!(encode(&value).unwrap(), value.to_ne_bytes());
}

#[test]
fn scalar_roundtrip_reports_consumed() {
    let bytes = encode(&-12_345i32).unwrap();
    assert_eq!(decode::<i32>(&bytes).unwrap(), (-12_345, 4));

    let bytes = encode(&u64::MAX).unwrap();
    assert_eq!(decode::<u64>(&bytes).unwrap(), (u64::MAX, 8));
}

#[test]
fn nan_bit_pattern_passes_through() {
    let nan = f64::from_bits(0x7ff8_0000_dead_beef);
    let bytes = encode(&nan).unwrap();
    let (decoded, _) = decode::<f64>(&bytes).unwrap();
    assert_eq!(decoded.to_bits(), nan.to_bits());
}

#[test]
fn short_scalar_is_truncated() {
    let err = decode::<u32>(&[1, 2, 3]).unwrap_err();
    assert_eq!(err, DecodeError::TruncatedInput {
        offset: 0,
        needed: 4,
        remaining: 3,
    });
}

#[test]
fn char_rejects_surrogates() {
    let bytes = 0xD800u32.to_bytes().unwrap();
    let err = decode::<char>(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::InvalidChar { offset: 0, value: 0xD800 });

    let bytes = encode(&'λ').unwrap();
    assert_eq!(decode::<char>(&bytes).unwrap(), ('λ', 4));
}

#[test]
fn unit_is_empty() {
    assert!(encode(&()).unwrap().is_empty());
    assert_eq!(decode::<()>(&[]).unwrap(), ((), 0));
}

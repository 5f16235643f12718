use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(
        decode(b"i-0e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(
        decode(b"i03e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(decode(b"ie"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i-e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(
        decode(b"i+5e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    // Larger than i64
    assert!(matches!(
        decode(b"i9223372036854775808e"),
        Err(BencodeError::InvalidInteger(_))
    ));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Bytes::from_static(b"")));
}

#[test]
fn test_decode_bytes_zero_padded_length() {
    assert!(matches!(
        decode(b"04:spam"),
        Err(BencodeError::InvalidStringLength)
    ));
}

#[test]
fn test_decode_bytes_binary_safe() {
    let data = b"6:a\x00b\xffc\x01";
    assert_eq!(
        decode(data).unwrap(),
        Value::Bytes(Bytes::from_static(b"a\x00b\xffc\x01"))
    );
}

#[test]
fn test_decode_prefix_consumed() {
    let (value, consumed) = decode_prefix(b"5:hello").unwrap();
    assert_eq!(value.as_str(), Some("hello"));
    assert_eq!(consumed, 7);

    let (value, consumed) = decode_prefix(b"i-42e").unwrap();
    assert_eq!(value.as_integer(), Some(-42));
    assert_eq!(consumed, 5);

    let (_, consumed) = decode_prefix(b"d3:cow3:mooe4:rest").unwrap();
    assert_eq!(consumed, 12);
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
    let dict = result.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(
        result.get(b"cow").and_then(|v| v.as_str()),
        Some("moo")
    );
    let spam = result.get(b"spam").and_then(|v| v.as_list()).unwrap();
    assert_eq!(spam.len(), 2);
    assert_eq!(spam[0].as_str(), Some("a"));
    assert_eq!(spam[1].as_str(), Some("b"));
}

#[test]
fn test_decode_dict_rejects_unsorted_keys() {
    assert!(matches!(
        decode(b"d4:spam4:eggs3:cow3:mooe"),
        Err(BencodeError::UnsortedKeys)
    ));
}

#[test]
fn test_decode_dict_rejects_duplicate_keys() {
    assert!(matches!(
        decode(b"d3:cow3:moo3:cow4:bulle"),
        Err(BencodeError::DuplicateKey)
    ));
}

#[test]
fn test_decode_dict_rejects_non_string_key() {
    assert!(matches!(
        decode(b"di1e3:mooe"),
        Err(BencodeError::InvalidDictKey)
    ));
}

#[test]
fn test_incremental_string() {
    assert!(matches!(decode(b"5:hel"), Err(BencodeError::UnexpectedEof)));
    assert_eq!(
        decode(b"5:hello").unwrap(),
        Value::Bytes(Bytes::from_static(b"hello"))
    );
}

#[test]
fn test_every_prefix_is_incomplete_not_invalid() {
    let inputs: &[&[u8]] = &[
        b"i-42e",
        b"5:hello",
        b"l4:spami42ee",
        b"d3:cow3:moo4:spaml1:a1:bee",
        b"d4:infod6:lengthi100e4:name5:t.txtee",
    ];

    for input in inputs {
        for cut in 0..input.len() {
            match decode(&input[..cut]) {
                Err(BencodeError::UnexpectedEof) => {}
                other => panic!(
                    "prefix {:?} of {:?} gave {:?}",
                    &input[..cut],
                    input,
                    other
                ),
            }
        }
        assert!(decode(input).is_ok());
    }
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"spam"))), b"4:spam");
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![
        Value::Bytes(Bytes::from_static(b"spam")),
        Value::Integer(42),
    ]);
    assert_eq!(encode(&list), b"l4:spami42ee");
}

#[test]
fn test_encode_dict() {
    let mut dict = BTreeMap::new();
    dict.insert(
        Bytes::from_static(b"cow"),
        Value::Bytes(Bytes::from_static(b"moo")),
    );
    assert_eq!(encode(&Value::Dict(dict)), b"d3:cow3:mooe");
}

#[test]
fn test_encode_into_returns_written() {
    let mut buf = b"prefix".to_vec();
    let written = encode_into(&Value::Integer(-42), &mut buf);
    assert_eq!(written, 5);
    assert_eq!(buf, b"prefixi-42e");
}

#[test]
fn test_roundtrip() {
    let sources: &[&[u8]] = &[
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee",
        b"d4:listl4:spami42eee",
        b"le",
        b"de",
        b"d1:ale1:bdee",
        b"10:\x00\x01\x02\x03\x04\x05\x06\x07\x08\x09",
    ];

    for source in sources {
        let decoded = decode(source).unwrap();
        assert_eq!(&encode(&decoded), source);
    }
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData)
    ));
}

#[test]
fn test_nesting_limit() {
    let mut deep = vec![b'l'; 100];
    deep.extend_from_slice(&[b'e'; 100]);
    assert!(matches!(decode(&deep), Err(BencodeError::NestingTooDeep)));
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
}

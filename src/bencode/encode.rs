use super::value::Value;

/// Encodes a bencode value into a fresh byte vector.
///
/// For any tree the decoder accepted, the output is identical to the bytes
/// it was decoded from: integers come out in minimal decimal form and
/// dictionaries in ascending key order, which is the only order the decoder
/// lets in. That byte-exactness is what makes the info hash deterministic.
///
/// # Examples
///
/// ```
/// use riptide::bencode::{decode, encode};
///
/// let source = b"d3:cow3:moo4:spaml1:a1:bee";
/// let value = decode(source).unwrap();
/// assert_eq!(encode(&value), source);
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf);
    buf
}

/// Encodes a bencode value onto the end of `buf`, returning the number of
/// bytes written.
pub fn encode_into(value: &Value, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();

    match value {
        Value::Integer(i) => {
            buf.push(b'i');
            buf.extend_from_slice(i.to_string().as_bytes());
            buf.push(b'e');
        }
        Value::Bytes(b) => {
            buf.extend_from_slice(b.len().to_string().as_bytes());
            buf.push(b':');
            buf.extend_from_slice(b);
        }
        Value::List(l) => {
            buf.push(b'l');
            for item in l {
                encode_into(item, buf);
            }
            buf.push(b'e');
        }
        Value::Dict(d) => {
            buf.push(b'd');
            for (key, val) in d {
                buf.extend_from_slice(key.len().to_string().as_bytes());
                buf.push(b':');
                buf.extend_from_slice(key);
                encode_into(val, buf);
            }
            buf.push(b'e');
        }
    }

    buf.len() - start
}

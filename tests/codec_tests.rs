//! Codec Tests
//!
//! Tests for request and reply encoding/decoding.

use std::io::Cursor;

use varstore::protocol::{
    decode_reply, decode_request, encode_reply, encode_request, read_reply, read_request,
    write_reply, write_request, Reply, Request, Status, HEADER_SIZE,
};
use varstore::VarError;

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_set() {
    let request = Request::Set {
        name: "a".to_string(),
        value: "10".to_string(),
    };
    let encoded = encode_request(&request);
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, request);
}

#[test]
fn test_encode_decode_get() {
    let request = Request::Get {
        name: "myvar".to_string(),
    };
    let encoded = encode_request(&request);
    let decoded = decode_request(&encoded).unwrap();

    assert_eq!(decoded, request);
}

#[test]
fn test_encode_decode_unset() {
    let request = Request::Unset {
        name: "myvar".to_string(),
    };
    let encoded = encode_request(&request);

    assert_eq!(decode_request(&encoded).unwrap(), request);
}

#[test]
fn test_encode_decode_num_equal_to() {
    let request = Request::NumEqualTo {
        value: "10".to_string(),
    };
    let encoded = encode_request(&request);

    assert_eq!(decode_request(&encoded).unwrap(), request);
}

#[test]
fn test_encode_decode_payloadless_requests() {
    for request in [Request::Undo, Request::Redo, Request::Reset, Request::Ping] {
        let encoded = encode_request(&request);
        assert_eq!(encoded.len(), HEADER_SIZE);
        assert_eq!(decode_request(&encoded).unwrap(), request);
    }
}

#[test]
fn test_set_value_may_contain_spaces_and_unicode() {
    let request = Request::Set {
        name: "greeting".to_string(),
        value: "héllo wörld".to_string(),
    };
    let encoded = encode_request(&request);

    assert_eq!(decode_request(&encoded).unwrap(), request);
}

// =============================================================================
// Request Error Tests
// =============================================================================

#[test]
fn test_decode_unknown_request_type() {
    let mut bytes = vec![0xAA];
    bytes.extend_from_slice(&0u32.to_be_bytes());

    assert!(matches!(
        decode_request(&bytes),
        Err(VarError::Protocol(_))
    ));
}

#[test]
fn test_decode_incomplete_header() {
    assert!(matches!(
        decode_request(&[0x01, 0x00]),
        Err(VarError::Protocol(_))
    ));
}

#[test]
fn test_decode_incomplete_payload() {
    let request = Request::Set {
        name: "a".to_string(),
        value: "10".to_string(),
    };
    let mut encoded = encode_request(&request);
    encoded.truncate(encoded.len() - 1);

    assert!(matches!(
        decode_request(&encoded),
        Err(VarError::Protocol(_))
    ));
}

#[test]
fn test_decode_invalid_utf8_name() {
    // SET frame with a name that is not valid UTF-8
    let name = [0xFFu8, 0xFE];
    let mut payload = Vec::new();
    payload.extend_from_slice(&(name.len() as u32).to_be_bytes());
    payload.extend_from_slice(&name);
    payload.extend_from_slice(b"10");

    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);

    assert!(matches!(
        decode_request(&bytes),
        Err(VarError::Protocol(_))
    ));
}

#[test]
fn test_decode_payload_on_payloadless_request() {
    let mut bytes = vec![0x05]; // UNDO
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(b"xx");

    assert!(matches!(
        decode_request(&bytes),
        Err(VarError::Protocol(_))
    ));
}

// =============================================================================
// Reply Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_ok_reply() {
    let reply = Reply::ok("a = 10");
    let encoded = encode_reply(&reply);
    let decoded = decode_reply(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.text, "a = 10");
}

#[test]
fn test_encode_decode_error_reply() {
    let reply = Reply::error("invalid argument: name must not be empty");
    let encoded = encode_reply(&reply);
    let decoded = decode_reply(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Error);
    assert_eq!(decoded.text, "invalid argument: name must not be empty");
}

#[test]
fn test_decode_unknown_status() {
    let mut bytes = vec![0x7F];
    bytes.extend_from_slice(&0u32.to_be_bytes());

    assert!(matches!(decode_reply(&bytes), Err(VarError::Protocol(_))));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_request_stream_round_trip() {
    let request = Request::Set {
        name: "a".to_string(),
        value: "10".to_string(),
    };

    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_request(&mut cursor).unwrap(), request);
}

#[test]
fn test_reply_stream_round_trip() {
    let reply = Reply::ok("NO COMMANDS");

    let mut buffer = Vec::new();
    write_reply(&mut buffer, &reply).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_reply(&mut cursor).unwrap(), reply);
}

#[test]
fn test_multiple_requests_on_one_stream() {
    let requests = vec![
        Request::Set {
            name: "a".to_string(),
            value: "10".to_string(),
        },
        Request::NumEqualTo {
            value: "10".to_string(),
        },
        Request::Undo,
    ];

    let mut buffer = Vec::new();
    for request in &requests {
        write_request(&mut buffer, request).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for request in &requests {
        assert_eq!(&read_request(&mut cursor).unwrap(), request);
    }
}

#[test]
fn test_read_request_truncated_stream() {
    let request = Request::Get {
        name: "a".to_string(),
    };
    let mut encoded = encode_request(&request);
    encoded.truncate(encoded.len() - 1);

    let mut cursor = Cursor::new(encoded);
    assert!(read_request(&mut cursor).is_err());
}

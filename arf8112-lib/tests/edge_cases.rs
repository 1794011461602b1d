//! Tests for short buffers and malformed input

mod common;

use common::*;

fn expect_short(result: Result<DecodedPayload, DecodeError>, expected_field: &str, expected_offset: usize) {
    match result {
        Err(DecodeError::ShortBuffer { field, offset, .. }) => {
            assert_eq!(field, expected_field);
            assert_eq!(offset, expected_offset);
        }
        Ok(p) => panic!("Expected ShortBuffer for {}, got Ok({:?})", expected_field, p),
        Err(other) => panic!("Expected ShortBuffer for {}, got {:?}", expected_field, other),
    }
}

#[test]
fn test_empty_payload() {
    expect_short(decode(Vec::new(), 1), "status", 0);
}

#[test]
fn test_missing_temperature() {
    expect_short(decode(vec![0x80], 1), "temperature", 1);
}

#[test]
fn test_truncated_gps_block() {
    let bytes = hex_to_bytes("9019451596900063");
    expect_short(decode(bytes, 1), "gps", 2);
}

#[test]
fn test_truncated_battery() {
    match decode(vec![0x02, 0x0E], 1) {
        Err(DecodeError::ShortBuffer {
            field,
            offset,
            needed,
            available,
        }) => {
            assert_eq!(field, "battery_level");
            assert_eq!(offset, 1);
            assert_eq!(needed, 2);
            assert_eq!(available, 1);
        }
        other => panic!("Expected ShortBuffer, got {:?}", other),
    }
}

#[test]
fn test_missing_snr() {
    expect_short(decode(vec![0x01, 0x0A], 1), "rssi_snr", 1);
}

#[test]
fn test_every_truncation_of_full_payload_fails() {
    let full = hex::decode(FULL_PAYLOAD).unwrap();
    for len in 0..full.len() {
        assert!(
            matches!(decode(full[..len].to_vec(), 1), Err(DecodeError::ShortBuffer { .. })),
            "truncated to {} bytes should fail",
            len
        );
    }
    assert!(decode(full, 1).is_ok());
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let payload = decode(vec![0x80, 0x19, 0xDE, 0xAD], 1).unwrap();
    assert_eq!(payload.temperature, Some(25));
    assert_eq!(payload.size, 4);
    assert_eq!(payload.bytes, "0x8019DEAD");
}

#[test]
fn test_invalid_hex() {
    assert!(matches!(decode_hex("80g9", 1), Err(DecodeError::InvalidHex(_))));
    assert!(matches!(decode_hex("801", 1), Err(DecodeError::InvalidHex(_))));
}

#[test]
fn test_error_messages() {
    let err = decode(vec![0x80], 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Short buffer reading temperature at offset 1: need 1 bytes, 0 available"
    );
}

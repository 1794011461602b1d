//! Common test utilities and shared imports

// Shared across test files; not every item is used in each one
#[allow(unused_imports)]
pub use arf8112_lib::error::DecodeError;
#[allow(unused_imports)]
pub use arf8112_lib::gps::{Hemisphere, Reception};
#[allow(unused_imports)]
pub use arf8112_lib::{DecodedPayload, StatusFlags, decode, decode_hex, decode_with_metadata, overlay};
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use serde_json::{Value, json};

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    Bytes::from(hex::decode(hex_data).expect("Failed to decode hex"))
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} got {}",
        expected,
        actual
    );
}

/// GPS block at 45°15.969'N 6°32.45'E, good reception, 3 satellites
#[allow(dead_code)]
pub const GPS_BLOCK: &str = "451596900063245013";

/// Every field present: temp 25 °C, GPS block, up 5, down 2, battery 3600, RSSI -10, SNR 3
#[allow(dead_code)]
pub const FULL_PAYLOAD: &str = "9F1945159690006324501305020E100A03";

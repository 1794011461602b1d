use serde::Serialize;
use std::fmt;

use crate::constants::*;

/// Temperature in °C. The device sends a sign bit followed by a 7-bit value,
/// so negative readings are `(byte & 0x7F) - 128` rather than the plain
/// two's complement of the byte.
pub fn decode_temperature(byte: u8) -> i8 {
    if byte & TEMPERATURE_SIGN_MASK != 0 {
        ((byte & TEMPERATURE_MAGNITUDE_MASK) as i16 - 128) as i8
    } else {
        byte as i8
    }
}

/// Battery level, big-endian
pub fn decode_battery(bytes: [u8; BATTERY_SIZE]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// RSSI in dBm. The device reports the magnitude only.
pub fn decode_rssi(byte: u8) -> i16 {
    -(byte as i16)
}

/// SNR in dB. The byte is read as two's complement, so `0xF6` is -10 dB
/// rather than 246; bytes up to `0x7F` pass through unchanged.
pub fn decode_snr(byte: u8) -> i8 {
    byte as i8
}

/// Link quality of the last downlink as seen by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadioLink {
    pub rssi: i16, // dBm, never positive
    pub snr: i8,   // dB
}

impl RadioLink {
    pub fn from_bytes(bytes: [u8; RADIO_LINK_SIZE]) -> Self {
        Self {
            rssi: decode_rssi(bytes[0]),
            snr: decode_snr(bytes[1]),
        }
    }
}

impl fmt::Display for RadioLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSSI: {} dBm, SNR: {} dB", self.rssi, self.snr)
    }
}

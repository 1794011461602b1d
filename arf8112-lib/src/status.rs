use modular_bitfield::prelude::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::constants::*;

/// Status byte leading every uplink. Each bit announces one optional field
/// or the trigger that caused the transmission. Bit 0 is the first field.
#[bitfield(bytes = 1)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusFlags {
    pub rssi_snr_reported: bool,
    pub battery_level_reported: bool,
    pub downlink_counter_reported: bool,
    pub uplink_counter_reported: bool,
    pub gps_reported: bool,
    pub triggered_by_pushbutton: bool,
    pub triggered_by_accelerometer: bool,
    pub temperature_reported: bool,
}

impl StatusFlags {
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bytes([byte])
    }

    pub fn as_byte(&self) -> u8 {
        self.into_bytes()[0]
    }

    /// Total payload length (status byte included) implied by the flags.
    pub fn payload_len(&self) -> usize {
        let mut len = STATUS_SIZE;
        if self.temperature_reported() {
            len += TEMPERATURE_SIZE;
        }
        if self.gps_reported() {
            len += GPS_BLOCK_SIZE;
        }
        if self.uplink_counter_reported() {
            len += UPLINK_COUNTER_SIZE;
        }
        if self.downlink_counter_reported() {
            len += DOWNLINK_COUNTER_SIZE;
        }
        if self.battery_level_reported() {
            len += BATTERY_SIZE;
        }
        if self.rssi_snr_reported() {
            len += RADIO_LINK_SIZE;
        }
        len
    }
}

impl Serialize for StatusFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StatusFlags", 8)?;
        state.serialize_field("rssi_snr_reported", &self.rssi_snr_reported())?;
        state.serialize_field("battery_level_reported", &self.battery_level_reported())?;
        state.serialize_field("downlink_counter_reported", &self.downlink_counter_reported())?;
        state.serialize_field("uplink_counter_reported", &self.uplink_counter_reported())?;
        state.serialize_field("gps_reported", &self.gps_reported())?;
        state.serialize_field("triggered_by_pushbutton", &self.triggered_by_pushbutton())?;
        state.serialize_field("triggered_by_accelerometer", &self.triggered_by_accelerometer())?;
        state.serialize_field("temperature_reported", &self.temperature_reported())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_bit_positions() {
        for byte in 0..=u8::MAX {
            let flags = StatusFlags::from_byte(byte);
            let bits = [
                flags.rssi_snr_reported(),
                flags.battery_level_reported(),
                flags.downlink_counter_reported(),
                flags.uplink_counter_reported(),
                flags.gps_reported(),
                flags.triggered_by_pushbutton(),
                flags.triggered_by_accelerometer(),
                flags.temperature_reported(),
            ];
            for (n, bit) in bits.iter().enumerate() {
                assert_eq!(*bit, (byte >> n) & 1 == 1, "byte {:#04x}, bit {}", byte, n);
            }
            assert_eq!(flags.as_byte(), byte);
        }
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(StatusFlags::from_byte(0x00).payload_len(), 1);
        assert_eq!(StatusFlags::from_byte(0x80).payload_len(), 2);
        assert_eq!(StatusFlags::from_byte(0x10).payload_len(), 10);
        // every field, both triggers
        assert_eq!(StatusFlags::from_byte(0xFF).payload_len(), 17);
    }
}

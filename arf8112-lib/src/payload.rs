use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::constants::*;
use crate::cursor::BufferCursor;
use crate::encoding::to_hex_upper;
use crate::error::DecodeError;
use crate::fields::{RadioLink, decode_battery, decode_temperature};
use crate::gps::{GpsBlockRaw, GpsFix};
use crate::status::StatusFlags;

/// A fully decoded ARF8112 uplink.
///
/// Optional fields are present exactly when the matching status flag is set.
/// Serializes to one flat object, omitting absent fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPayload {
    #[serde(flatten)]
    pub status: StatusFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i8>, // °C
    #[serde(flatten)]
    pub gps: Option<GpsFix>,
    #[serde(rename = "uplink_frame_count", skip_serializing_if = "Option::is_none")]
    pub uplink_counter: Option<u8>,
    #[serde(rename = "downlink_frame_count", skip_serializing_if = "Option::is_none")]
    pub downlink_counter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u16>,
    #[serde(flatten)]
    pub radio: Option<RadioLink>,
    /// Whole input as `0x`-prefixed uppercase hex
    pub bytes: String,
    pub size: usize,
    pub fport: u8,
}

/// Decode one uplink received on `port`.
///
/// Fields are read in a fixed order (temperature, GPS, uplink counter,
/// downlink counter, battery, RSSI/SNR), each only when its flag is set.
/// A payload shorter than its flags announce fails with
/// [`DecodeError::ShortBuffer`].
pub fn decode(payload: impl Into<Bytes>, port: u8) -> Result<DecodedPayload, DecodeError> {
    let payload: Bytes = payload.into();
    let mut cursor = BufferCursor::new(payload.clone());

    let status = StatusFlags::from_byte(cursor.u8("status")?);
    debug!(status = format_args!("{:#010b}", status.as_byte()), "status byte");

    let temperature = if status.temperature_reported() {
        let offset = cursor.position();
        let t = decode_temperature(cursor.u8("temperature")?);
        debug!(offset, temperature = t, "temperature");
        Some(t)
    } else {
        None
    };

    let gps = if status.gps_reported() {
        let offset = cursor.position();
        let raw = GpsBlockRaw::from(cursor.array::<GPS_BLOCK_SIZE>("gps")?);
        let fix = GpsFix::from(raw);
        debug!(offset, fix = %fix, "gps");
        Some(fix)
    } else {
        None
    };

    let uplink_counter = if status.uplink_counter_reported() {
        let count = cursor.u8("uplink_frame_count")?;
        debug!(count, "uplink counter");
        Some(count)
    } else {
        None
    };

    let downlink_counter = if status.downlink_counter_reported() {
        let count = cursor.u8("downlink_frame_count")?;
        debug!(count, "downlink counter");
        Some(count)
    } else {
        None
    };

    let battery_level = if status.battery_level_reported() {
        let level = decode_battery(cursor.array::<BATTERY_SIZE>("battery_level")?);
        debug!(level, "battery level");
        Some(level)
    } else {
        None
    };

    let radio = if status.rssi_snr_reported() {
        let link = RadioLink::from_bytes(cursor.array::<RADIO_LINK_SIZE>("rssi_snr")?);
        debug!(rssi = link.rssi, snr = link.snr, "radio link");
        Some(link)
    } else {
        None
    };

    if !cursor.is_exhausted() {
        debug!(trailing = cursor.remaining(), "ignoring trailing bytes");
    }

    Ok(DecodedPayload {
        status,
        temperature,
        gps,
        uplink_counter,
        downlink_counter,
        battery_level,
        radio,
        bytes: format!("0x{}", to_hex_upper(&payload)),
        size: payload.len(),
        fport: port,
    })
}

/// Decode a hex string, with or without a `0x` prefix.
pub fn decode_hex(payload: &str, port: u8) -> Result<DecodedPayload, DecodeError> {
    let trimmed = payload.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    decode(hex::decode(digits)?, port)
}

/// Decode and overlay caller metadata, port first like network-server codec hooks.
pub fn decode_with_metadata(
    port: u8,
    payload: impl Into<Bytes>,
    metadata: Value,
) -> Result<Map<String, Value>, DecodeError> {
    decode(payload, port)?.merge_metadata(metadata)
}

/// Shallow merge; keys in `metadata` replace keys in `base`.
pub fn overlay(mut base: Map<String, Value>, metadata: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in metadata {
        base.insert(key, value);
    }
    base
}

impl DecodedPayload {
    pub fn to_json_map(&self) -> Result<Map<String, Value>, DecodeError> {
        into_object(serde_json::to_value(self)?)
    }

    pub fn merge_metadata(&self, metadata: Value) -> Result<Map<String, Value>, DecodeError> {
        let metadata = match metadata {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => return Err(DecodeError::InvalidMetadata(json_kind(&other).to_string())),
        };
        Ok(overlay(self.to_json_map()?, metadata))
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::Serialization(serde::ser::Error::custom(format!(
            "decoded payload serialized to {}, expected an object",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for DecodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port {}, {} bytes ({})", self.fport, self.size, self.bytes)?;
        if self.status.triggered_by_pushbutton() {
            write!(f, ", pushbutton")?;
        }
        if self.status.triggered_by_accelerometer() {
            write!(f, ", accelerometer")?;
        }
        if let Some(t) = self.temperature {
            write!(f, ", Temp: {} °C", t)?;
        }
        if let Some(gps) = &self.gps {
            write!(f, ", GPS: {}", gps)?;
        }
        if let Some(up) = self.uplink_counter {
            write!(f, ", Up: {}", up)?;
        }
        if let Some(down) = self.downlink_counter {
            write!(f, ", Down: {}", down)?;
        }
        if let Some(level) = self.battery_level {
            write!(f, ", Battery: {}", level)?;
        }
        if let Some(radio) = &self.radio {
            write!(f, ", {}", radio)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_object_payload_is_serialization_error() {
        match into_object(Value::Array(Vec::new())) {
            Err(DecodeError::Serialization(e)) => assert!(e.to_string().contains("an array")),
            other => panic!("Expected Serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_to_json_map_is_object() {
        let map = decode(vec![0x80, 0x19], 1).unwrap().to_json_map().unwrap();
        assert_eq!(map["temperature"], 25);
        assert_eq!(map["fport"], 1);
    }
}

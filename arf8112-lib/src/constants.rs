// Field widths of the ARF8112AA uplink frame

/// Status byte (1 byte)
pub const STATUS_SIZE: usize = 1;

/// Temperature in °C, sign bit plus 7-bit magnitude (1 byte)
pub const TEMPERATURE_SIZE: usize = 1;

/// One encoded coordinate axis (4 bytes)
pub const COORDINATE_SIZE: usize = 4;

/// GPS block: latitude + longitude + quality (9 bytes)
pub const GPS_BLOCK_SIZE: usize = 2 * COORDINATE_SIZE + 1;

/// Uplink frame counter (1 byte)
pub const UPLINK_COUNTER_SIZE: usize = 1;

/// Downlink frame counter (1 byte)
pub const DOWNLINK_COUNTER_SIZE: usize = 1;

/// Battery level, big-endian (2 bytes)
pub const BATTERY_SIZE: usize = 2;

/// RSSI + SNR (2 bytes)
pub const RADIO_LINK_SIZE: usize = 2;

/// Number of nibble digits carried by a coordinate
pub const COORDINATE_DIGITS: usize = 7;

/// Mask for the hemisphere bit in the last coordinate byte
pub const HEMISPHERE_MASK: u8 = 0x01;

/// Mask for the sign bit of the temperature byte
pub const TEMPERATURE_SIGN_MASK: u8 = 0x80;

/// Mask for the magnitude bits of the temperature byte
pub const TEMPERATURE_MAGNITUDE_MASK: u8 = 0x7F;

/// Mask for the low nibble (satellite count, BCD digit)
pub const NIBBLE_MASK: u8 = 0x0F;

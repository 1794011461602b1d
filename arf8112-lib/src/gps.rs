use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::fmt;
use strum_macros::Display;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::constants::*;

/// Digits in the coordinate string: 7 transmitted plus a trailing zero
const DIGIT_COUNT: usize = COORDINATE_DIGITS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Axis {
    #[strum(to_string = "latitude")]
    Latitude,
    #[strum(to_string = "longitude")]
    Longitude,
}

impl Axis {
    /// Width of the degrees part: DD for latitude, DDD for longitude
    pub fn degree_digits(&self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    fn hemisphere(&self, negative: bool) -> Hemisphere {
        match (self, negative) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// One axis of a GPS position in degrees and decimal minutes.
///
/// The device packs the position as 7 nibbles, high nibble first, followed
/// by a hemisphere flag in bit 0 of the last byte:
///
/// ```text
/// latitude   D D M M m m m  . . . . . . . h   ->  DD°MM,mmm0
/// longitude  D D D M M m m  . . . . . . . h   ->  DDD°MM,mm0
/// ```
///
/// Nibbles above 9 are kept as-is; they count with their nibble value in
/// the arithmetic and print as a hex digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub axis: Axis,
    pub digits: [u8; DIGIT_COUNT],
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    pub fn decode(bytes: &[u8; COORDINATE_SIZE], axis: Axis) -> Self {
        let mut digits = [0u8; DIGIT_COUNT];
        for (digit, slot) in digits.iter_mut().take(COORDINATE_DIGITS).enumerate() {
            let shift = if digit % 2 == 0 { 4 } else { 0 };
            *slot = (bytes[digit / 2] >> shift) & NIBBLE_MASK;
        }

        let negative = bytes[COORDINATE_SIZE - 1] & HEMISPHERE_MASK != 0;
        Self {
            axis,
            digits,
            hemisphere: axis.hemisphere(negative),
        }
    }

    fn split(&self) -> (&[u8], &[u8]) {
        self.digits.split_at(self.axis.degree_digits())
    }

    /// Whole degrees, unsigned
    pub fn degrees(&self) -> u32 {
        self.split().0.iter().fold(0, |acc, &d| acc * 10 + d as u32)
    }

    /// Decimal minutes, unsigned
    pub fn minutes(&self) -> f64 {
        let minute_digits = self.split().1;
        let scaled = minute_digits.iter().fold(0u64, |acc, &d| acc * 10 + d as u64);
        // two digits of whole minutes, the rest are decimals
        let decimals = minute_digits.len() as i32 - 2;
        scaled as f64 / 10f64.powi(decimals)
    }

    pub fn decimal_degrees(&self) -> f64 {
        // + 0.0 folds -0.0 into 0.0
        self.hemisphere.sign() * (self.degrees() as f64 + self.minutes() / 60.0) + 0.0
    }

    /// Degrees-decimal-minutes, e.g. `45°15,9690N`
    pub fn ddm(&self) -> String {
        let (deg, min) = self.split();
        let mut out = String::with_capacity(DIGIT_COUNT + 4);
        out.extend(deg.iter().map(|&d| digit_char(d)));
        out.push('°');
        out.extend(min[..2].iter().map(|&d| digit_char(d)));
        out.push(',');
        out.extend(min[2..].iter().map(|&d| digit_char(d)));
        out.push(self.hemisphere.letter());
        out
    }
}

fn digit_char(d: u8) -> char {
    char::from_digit(d as u32, 16)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6})", self.ddm(), self.decimal_degrees())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Reception {
    Good,
    Average,
    Poor,
}

impl Reception {
    pub fn from_tier(tier: u8) -> Self {
        match tier {
            1 => Reception::Good,
            2 => Reception::Average,
            // 0 carries no rating; 3 and above are weak fixes
            0 | 3..=u8::MAX => Reception::Poor,
        }
    }
}

/// Fix quality: reception tier in the high nibble, satellites in the low one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsQuality {
    pub reception_tier: u8,
    pub reception: Reception,
    pub satellites: u8,
}

impl GpsQuality {
    pub fn from_byte(byte: u8) -> Self {
        let reception_tier = byte >> 4;
        Self {
            reception_tier,
            reception: Reception::from_tier(reception_tier),
            satellites: byte & NIBBLE_MASK,
        }
    }
}

impl fmt::Display for GpsQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} reception ({} satellites)", self.reception, self.satellites)
    }
}

/// Wire layout of the GPS block
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct GpsBlockRaw {
    pub latitude: [u8; COORDINATE_SIZE],
    pub longitude: [u8; COORDINATE_SIZE],
    pub quality: u8,
}

impl From<[u8; GPS_BLOCK_SIZE]> for GpsBlockRaw {
    fn from(bytes: [u8; GPS_BLOCK_SIZE]) -> Self {
        zerocopy::transmute!(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub quality: GpsQuality,
}

impl From<GpsBlockRaw> for GpsFix {
    fn from(raw: GpsBlockRaw) -> Self {
        Self {
            latitude: Coordinate::decode(&raw.latitude, Axis::Latitude),
            longitude: Coordinate::decode(&raw.longitude, Axis::Longitude),
            quality: GpsQuality::from_byte(raw.quality),
        }
    }
}

impl GpsFix {
    /// Position as `"<longitude>,<latitude>"` in decimal degrees
    pub fn position(&self) -> String {
        format!(
            "{},{}",
            self.longitude.decimal_degrees(),
            self.latitude.decimal_degrees()
        )
    }
}

impl fmt::Display for GpsFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.latitude, self.longitude, self.quality)
    }
}

// Serialized flat so it can be merged straight into the decoded payload.
impl Serialize for GpsFix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GpsFix", 10)?;
        state.serialize_field("gps_latitude", &self.latitude.decimal_degrees())?;
        state.serialize_field("gps_latitude_ddm", &self.latitude.ddm())?;
        state.serialize_field("gps_latitude_hemisphere", &self.latitude.hemisphere)?;
        state.serialize_field("gps_longitude", &self.longitude.decimal_degrees())?;
        state.serialize_field("gps_longitude_ddm", &self.longitude.ddm())?;
        state.serialize_field("gps_longitude_hemisphere", &self.longitude.hemisphere)?;
        state.serialize_field("gps", &self.position())?;
        state.serialize_field("gps_reception", &self.quality.reception_tier)?;
        state.serialize_field("gps_reception_text", &self.quality.reception)?;
        state.serialize_field("gps_satellites", &self.quality.satellites)?;
        state.end()
    }
}

use thiserror::Error;

/// The primary error type for the `arf8112-lib` decoder.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Short buffer reading {field} at offset {offset}: need {needed} bytes, {available} available")]
    ShortBuffer {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Metadata must be a JSON object, got {0}")]
    InvalidMetadata(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

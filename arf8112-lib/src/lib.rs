pub mod constants;
pub mod cursor;
pub mod encoding;
pub mod error;
pub mod fields;
pub mod gps;
pub mod payload;
pub mod status;


pub use error::DecodeError;
pub use payload::{DecodedPayload, decode, decode_hex, decode_with_metadata, overlay};
pub use status::StatusFlags;

use bytes::Bytes;
use tracing::trace;

use crate::error::DecodeError;

/// Forward-only reader over an uplink payload.
///
/// Every read is bounds checked; running past the end yields
/// [`DecodeError::ShortBuffer`] naming the field being read.
#[derive(Debug, Clone)]
pub struct BufferCursor {
    len: usize,
    rest: Bytes,
}

impl BufferCursor {
    pub fn new(payload: Bytes) -> Self {
        Self {
            len: payload.len(),
            rest: payload,
        }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.len - self.rest.len()
    }

    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn take(&mut self, field: &'static str, needed: usize) -> Result<Bytes, DecodeError> {
        if self.rest.len() < needed {
            return Err(DecodeError::ShortBuffer {
                field,
                offset: self.position(),
                needed,
                available: self.rest.len(),
            });
        }
        let offset = self.position();
        let chunk = self.rest.split_to(needed);
        trace!(field, offset, bytes = %hex::encode(&chunk), "read");
        Ok(chunk)
    }

    pub fn u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        let chunk = self.take(field, 1)?;
        Ok(chunk[0])
    }

    pub fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let chunk = self.take(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&chunk);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advances() {
        let mut cursor = BufferCursor::new(Bytes::from_static(&[0x01, 0x02, 0x03, 0x04]));
        assert_eq!(cursor.u8("a").unwrap(), 0x01);
        assert_eq!(cursor.array::<2>("b").unwrap(), [0x02, 0x03]);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.u8("c").unwrap(), 0x04);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_short_read() {
        let mut cursor = BufferCursor::new(Bytes::from_static(&[0xAA]));
        match cursor.array::<2>("battery_level") {
            Err(DecodeError::ShortBuffer {
                field,
                offset,
                needed,
                available,
            }) => {
                assert_eq!(field, "battery_level");
                assert_eq!(offset, 0);
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("Expected ShortBuffer, got {:?}", other),
        }
        // a failed read does not consume anything
        assert_eq!(cursor.position(), 0);
    }
}

use crate::common::reader::ByteReader;

use super::error::BodyError;
use super::layout;

/// Reader over a single TLV body. Every typed layout requires an exact width.
pub struct BodyReader<'a> {
    tag: u8,
    inner: ByteReader<'a>,
}

impl<'a> BodyReader<'a> {
    pub fn new(tag: u8, body: &'a [u8]) -> Self {
        Self {
            tag,
            inner: ByteReader::new(body),
        }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), BodyError> {
        if self.inner.len() != expected {
            return Err(BodyError::LengthMismatch {
                tag: self.tag,
                expected,
                actual: self.inner.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, BodyError> {
        Ok(self.inner.read_u8(offset)?)
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, BodyError> {
        Ok(self.inner.read_u32_le(range)?)
    }

    pub fn read_hash(&self) -> Result<[u8; layout::HASH_SIZE], BodyError> {
        Ok(self.inner.read_array(layout::HASH_RANGE)?)
    }
}

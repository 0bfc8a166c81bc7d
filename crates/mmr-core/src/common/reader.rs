use std::ops::Range;

use thiserror::Error;

/// A read that ran past the end of the underlying slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("need {needed} bytes, got {actual}")]
pub struct ShortRead {
    pub needed: usize,
    pub actual: usize,
}

/// Bounds-checked little-endian access to a byte slice.
///
/// Offsets are relative to the start of the slice the reader was built over.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ShortRead> {
        self.bytes.get(offset).copied().ok_or(ShortRead {
            needed: offset + 1,
            actual: self.bytes.len(),
        })
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, ShortRead> {
        Ok(u16::from_le_bytes(self.read_array(range)?))
    }

    pub fn read_u32_le(&self, range: Range<usize>) -> Result<u32, ShortRead> {
        Ok(u32::from_le_bytes(self.read_array(range)?))
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], ShortRead> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| ShortRead {
            needed: N,
            actual: bytes.len(),
        })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], ShortRead> {
        self.bytes.get(range.clone()).ok_or(ShortRead {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }
}

/// Lowercase hex with no separators.
pub(crate) fn lower_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::{ByteReader, ShortRead, lower_hex};

    #[test]
    fn reads_little_endian_fields() {
        let reader = ByteReader::new(&[0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u8(0).unwrap(), 0x01);
        assert_eq!(reader.read_u16_le(1..3).unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le(3..7).unwrap(), 0x1234_5678);
    }

    #[test]
    fn short_slice_reports_needed_len() {
        let reader = ByteReader::new(&[0x00, 0x01]);
        let err = reader.read_u32_le(0..4).unwrap_err();
        assert_eq!(
            err,
            ShortRead {
                needed: 4,
                actual: 2
            }
        );
        assert!(reader.read_u8(2).is_err());
    }

    #[test]
    fn mismatched_range_width_is_rejected() {
        let reader = ByteReader::new(&[0u8; 8]);
        let err = reader.read_u16_le(0..3).unwrap_err();
        assert_eq!(err.needed, 2);
        assert_eq!(err.actual, 3);
    }

    #[test]
    fn lower_hex_keeps_leading_zeros() {
        assert_eq!(lower_hex(&[0x00, 0x0a, 0xff]), "000aff");
        assert_eq!(lower_hex(&[]), "");
    }
}

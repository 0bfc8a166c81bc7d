use thiserror::Error;

use crate::common::reader::ShortRead;

/// Errors returned when a TLV body cannot be decoded into its typed layout.
///
/// These never fail a whole region: the projection falls back to the raw
/// body bytes and keeps going.
///
/// # Examples
/// ```
/// use mmr_core::BodyError;
///
/// let err = BodyError::UnknownType { tag: 0x7f };
/// assert!(err.to_string().contains("unknown meta TLV type"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("unknown meta TLV type: {tag}")]
    UnknownType { tag: u8 },
    #[error("invalid body length for TLV type {tag}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        tag: u8,
        expected: usize,
        actual: usize,
    },
    #[error("TLV body too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}

impl From<ShortRead> for BodyError {
    fn from(value: ShortRead) -> Self {
        BodyError::TooShort {
            needed: value.needed,
            actual: value.actual,
        }
    }
}

/// Errors returned when building the region model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("TLV body too large: {len} bytes exceeds the 16-bit size field")]
    BodyTooLarge { len: usize },
}

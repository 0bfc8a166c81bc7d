use crate::common::reader::lower_hex;
use crate::projection::Node;

use super::error::BodyError;
use super::layout;
use super::reader::BodyReader;
use super::{MetaTlv, MetaTlvType};

/// Decoded HASH body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTlvBodyHash {
    pub hash: [u8; layout::HASH_SIZE],
}

impl MetaTlvBodyHash {
    pub fn to_node(&self) -> Node {
        Node::map([("hash", Node::from(lower_hex(&self.hash)))])
    }
}

/// Decoded FLASH_AREA body: a contiguous range on a flash device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTlvBodyFlashArea {
    pub area: u8,
    pub device: u8,
    pub offset: u32,
    pub size: u32,
}

impl MetaTlvBodyFlashArea {
    pub fn to_node(&self) -> Node {
        Node::map([
            ("area", Node::from(self.area)),
            ("device", Node::from(self.device)),
            ("offset", Node::from(self.offset)),
            ("size", Node::from(self.size)),
        ])
    }
}

/// Decoded MMR_REF body: the flash area holding a chained region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTlvBodyMmrRef {
    pub area: u8,
}

impl MetaTlvBodyMmrRef {
    pub fn to_node(&self) -> Node {
        Node::map([("area", Node::from(self.area))])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvBody {
    Hash(MetaTlvBodyHash),
    FlashArea(MetaTlvBodyFlashArea),
    MmrRef(MetaTlvBodyMmrRef),
}

impl TlvBody {
    pub fn tlv_type(&self) -> MetaTlvType {
        match self {
            TlvBody::Hash(_) => MetaTlvType::Hash,
            TlvBody::FlashArea(_) => MetaTlvType::FlashArea,
            TlvBody::MmrRef(_) => MetaTlvType::MmrRef,
        }
    }

    pub fn to_node(&self) -> Node {
        match self {
            TlvBody::Hash(body) => body.to_node(),
            TlvBody::FlashArea(body) => body.to_node(),
            TlvBody::MmrRef(body) => body.to_node(),
        }
    }
}

/// Decode a TLV body by its type tag.
///
/// Fails for unknown tags and for bodies whose length differs from the
/// layout width. Callers are expected to fall back to the raw bytes.
///
/// # Examples
/// ```
/// use mmr_core::{TlvBody, decode_body};
///
/// let body = decode_body(0x04, &[7]).unwrap();
/// assert!(matches!(body, TlvBody::MmrRef(ref r) if r.area == 7));
/// assert!(decode_body(0x04, &[7, 8]).is_err());
/// ```
pub fn decode_body(tag: u8, body: &[u8]) -> Result<TlvBody, BodyError> {
    let tlv_type = MetaTlvType::from_tag(tag).ok_or(BodyError::UnknownType { tag })?;
    let reader = BodyReader::new(tag, body);
    reader.require_exact_len(tlv_type.body_size())?;

    match tlv_type {
        MetaTlvType::Hash => Ok(TlvBody::Hash(MetaTlvBodyHash {
            hash: reader.read_hash()?,
        })),
        MetaTlvType::FlashArea => Ok(TlvBody::FlashArea(MetaTlvBodyFlashArea {
            area: reader.read_u8(layout::FLASH_AREA_AREA_OFFSET)?,
            device: reader.read_u8(layout::FLASH_AREA_DEVICE_OFFSET)?,
            offset: reader.read_u32_le(layout::FLASH_AREA_OFFSET_RANGE)?,
            size: reader.read_u32_le(layout::FLASH_AREA_SIZE_RANGE)?,
        })),
        MetaTlvType::MmrRef => Ok(TlvBody::MmrRef(MetaTlvBodyMmrRef {
            area: reader.read_u8(layout::MMR_REF_AREA_OFFSET)?,
        })),
    }
}

/// A TLV body as it will be projected: typed, or the raw bytes it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvData<'a> {
    Typed(TlvBody),
    /// The decode failed; `error` is kept for diagnostics only.
    Opaque { raw: &'a [u8], error: BodyError },
}

impl<'a> TlvData<'a> {
    pub fn decode(tlv: &'a MetaTlv) -> Self {
        let tag = tlv.header().type_tag;
        match decode_body(tag, tlv.data()) {
            Ok(body) => TlvData::Typed(body),
            Err(error) => {
                tracing::debug!(tag, size = tlv.data().len(), %error, "TLV body kept as hex");
                TlvData::Opaque {
                    raw: tlv.data(),
                    error,
                }
            }
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, TlvData::Opaque { .. })
    }

    /// Typed field map, or a hex string of the full raw body.
    pub fn to_node(&self) -> Node {
        match self {
            TlvData::Typed(body) => body.to_node(),
            TlvData::Opaque { raw, .. } => Node::from(lower_hex(raw)),
        }
    }
}

//! Manufacturing meta region model and TLV body decoding.
//!
//! A region is a tightly packed run of TLV records followed by a fixed-size
//! footer. The model here is read-only once built: `MetaTlv` derives its
//! header size from the body it owns, so `data.len() == header.size` holds for
//! every value that exists.
//!
//! Body decoding follows the same split as the rest of the crate:
//! - `layout`: wire offsets, widths, and tag values (source of truth)
//! - `reader`: exact-width access to one TLV body
//! - `parser`: tag dispatch into typed bodies, with an opaque fallback
//! - `offsets`: region-relative and absolute positions
//! - `error`: explicit, non-fatal decode errors

pub mod error;
pub mod layout;
pub mod offsets;
pub mod parser;
pub mod reader;

pub use error::{BodyError, MetaError};
pub use offsets::{Offsets, region_start};
pub use parser::{
    MetaTlvBodyFlashArea, MetaTlvBodyHash, MetaTlvBodyMmrRef, TlvBody, TlvData, decode_body,
};

/// Display name used for tags outside the known registry.
pub const UNKNOWN_TYPE_NAME: &str = "???";

/// Known TLV types. Dispatch is always by tag value; names are for display.
///
/// # Examples
/// ```
/// use mmr_core::MetaTlvType;
///
/// let ty = MetaTlvType::from_tag(0x02).unwrap();
/// assert_eq!(ty, MetaTlvType::FlashArea);
/// assert_eq!(ty.name(), "FLASH_AREA");
/// assert_eq!(ty.body_size(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaTlvType {
    Hash,
    FlashArea,
    MmrRef,
}

impl MetaTlvType {
    pub const ALL: [MetaTlvType; 3] = [
        MetaTlvType::Hash,
        MetaTlvType::FlashArea,
        MetaTlvType::MmrRef,
    ];

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            layout::TLV_TYPE_HASH => Some(MetaTlvType::Hash),
            layout::TLV_TYPE_FLASH_AREA => Some(MetaTlvType::FlashArea),
            layout::TLV_TYPE_MMR_REF => Some(MetaTlvType::MmrRef),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            MetaTlvType::Hash => layout::TLV_TYPE_HASH,
            MetaTlvType::FlashArea => layout::TLV_TYPE_FLASH_AREA,
            MetaTlvType::MmrRef => layout::TLV_TYPE_MMR_REF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MetaTlvType::Hash => "HASH",
            MetaTlvType::FlashArea => "FLASH_AREA",
            MetaTlvType::MmrRef => "MMR_REF",
        }
    }

    /// Exact body width, in bytes, of this type's layout.
    pub fn body_size(self) -> usize {
        match self {
            MetaTlvType::Hash => layout::HASH_SIZE,
            MetaTlvType::FlashArea => layout::FLASH_AREA_BODY_SIZE,
            MetaTlvType::MmrRef => layout::MMR_REF_BODY_SIZE,
        }
    }
}

/// Human-readable name for a TLV tag, or `"???"` when the tag is unknown.
///
/// # Examples
/// ```
/// use mmr_core::type_name;
///
/// assert_eq!(type_name(0x01), "HASH");
/// assert_eq!(type_name(0x7f), "???");
/// ```
pub fn type_name(tag: u8) -> &'static str {
    MetaTlvType::from_tag(tag).map_or(UNKNOWN_TYPE_NAME, MetaTlvType::name)
}

/// Fixed 3-byte TLV header: type tag and body size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTlvHeader {
    /// Raw type tag.
    pub type_tag: u8,
    /// Body length in bytes.
    pub size: u16,
}

/// One TLV record. Owns its body; the header always matches the body length.
///
/// # Examples
/// ```
/// use mmr_core::MetaTlv;
///
/// let tlv = MetaTlv::new(0x04, vec![3]).unwrap();
/// assert_eq!(tlv.header().size, 1);
/// assert_eq!(tlv.encoded_len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTlv {
    header: MetaTlvHeader,
    data: Vec<u8>,
}

impl MetaTlv {
    pub fn new(type_tag: u8, data: Vec<u8>) -> Result<Self, MetaError> {
        let size =
            u16::try_from(data.len()).map_err(|_| MetaError::BodyTooLarge { len: data.len() })?;
        Ok(Self {
            header: MetaTlvHeader { type_tag, size },
            data,
        })
    }

    pub fn header(&self) -> &MetaTlvHeader {
        &self.header
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// On-wire length: header plus body.
    pub fn encoded_len(&self) -> usize {
        layout::TLV_HEADER_SIZE + self.data.len()
    }

    /// Decode the body, keeping the raw bytes when the layout does not apply.
    pub fn decode(&self) -> TlvData<'_> {
        TlvData::decode(self)
    }
}

/// Region footer. Always the last structure in the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaFooter {
    /// Total region size, footer included.
    pub size: u16,
    pub magic: u32,
    pub version: u8,
}

/// One complete manufacturing meta region, TLVs in physical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub tlvs: Vec<MetaTlv>,
    pub footer: MetaFooter,
}

impl Meta {
    pub fn new(tlvs: Vec<MetaTlv>, footer: MetaFooter) -> Self {
        Self { tlvs, footer }
    }

    /// Region-relative offsets of every TLV and of the footer.
    pub fn offsets(&self) -> Offsets {
        Offsets::compute(&self.tlvs)
    }

    /// Absolute start of the region that ends at `end_offset`.
    ///
    /// Negative when the footer claims more bytes than precede `end_offset`.
    pub fn start_offset(&self, end_offset: i64) -> i64 {
        region_start(end_offset, self.footer.size)
    }
}

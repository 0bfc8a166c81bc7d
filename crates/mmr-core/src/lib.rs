//! MMR core library for inspecting manufacturing meta regions.
//!
//! A manufacturing meta region (MMR) is a small trailer appended to firmware
//! images: a packed run of TLV records followed by a fixed-size footer. This
//! crate decodes TLV bodies by type tag, computes where every record and the
//! footer sit relative to the offset the region ends at, and builds a generic,
//! ordered tree ready for JSON rendering. Decoding is byte-oriented and side
//! effect free; file access is isolated in the `source` module.
//!
//! Invariants:
//! - Projections are deterministic: same region and end offset, same tree and
//!   same text.
//! - A TLV whose body cannot be decoded is rendered as the hex of its raw
//!   bytes; it never prevents the rest of the region from being projected.
//! - Region start offsets are never clamped; a negative start flags a footer
//!   that claims more bytes than precede the end offset.
//!
//! # Examples
//! ```
//! use mmr_core::{Meta, MetaFooter, MetaTlv, Node, project, render};
//!
//! let mut body = vec![1u8, 0];
//! body.extend_from_slice(&0x0002_0000u32.to_le_bytes());
//! body.extend_from_slice(&0x0006_0000u32.to_le_bytes());
//! let meta = Meta::new(
//!     vec![MetaTlv::new(0x02, body)?],
//!     MetaFooter { size: 16, magic: 0x96f3_b83c, version: 2 },
//! );
//!
//! let tree = project(&meta, 1024);
//! assert_eq!(tree.get("_offset").and_then(Node::as_i64), Some(1008));
//! let json = render(&meta, 1024)?;
//! assert!(json.contains("\"FLASH_AREA\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod common;
pub mod meta;
pub mod projection;
mod source;

pub use meta::layout::{META_MAGIC, META_VERSION};
pub use meta::{
    BodyError, Meta, MetaError, MetaFooter, MetaTlv, MetaTlvBodyFlashArea, MetaTlvBodyHash,
    MetaTlvBodyMmrRef, MetaTlvHeader, MetaTlvType, Offsets, TlvBody, TlvData, decode_body,
    region_start, type_name,
};
pub use projection::{
    Node, RenderError, RenderStyle, project, project_footer, project_tlv, render, render_compact,
    render_node,
};
pub use source::{RegionFile, SourceError, parse_region};

use crate::common::reader::ByteReader;
use crate::meta::{Meta, MetaFooter, MetaTlv, layout};

use super::SourceError;

/// Split the region that ends at `end_offset` within `buf` into a [`Meta`].
///
/// The footer is read from the last bytes before `end_offset` and its size
/// names where the region starts. Bytes after `end_offset` are ignored. Only
/// structural checks are made here: magic, footer size bounds, and that every
/// TLV fits before the footer. TLV bodies are not decoded.
///
/// # Examples
/// ```
/// use mmr_core::parse_region;
///
/// // One MMR_REF TLV (area 3) followed by the footer.
/// let buf = [
///     0x04, 0x01, 0x00, 0x03, // TLV
///     0x0b, 0x00, 0x3c, 0xb8, 0xf3, 0x96, 0x02, // footer
/// ];
/// let meta = parse_region(&buf, buf.len())?;
/// assert_eq!(meta.tlvs.len(), 1);
/// assert_eq!(meta.footer.size, 11);
/// # Ok::<(), mmr_core::SourceError>(())
/// ```
pub fn parse_region(buf: &[u8], end_offset: usize) -> Result<Meta, SourceError> {
    if end_offset > buf.len() {
        return Err(SourceError::EndOffsetOutOfBounds {
            end_offset: end_offset as u64,
            len: buf.len() as u64,
        });
    }
    let footer_start =
        end_offset
            .checked_sub(layout::FOOTER_SIZE)
            .ok_or(SourceError::TooShort {
                needed: layout::FOOTER_SIZE,
                actual: end_offset,
            })?;

    let footer = read_footer(&buf[footer_start..end_offset])?;
    if footer.magic != layout::META_MAGIC {
        return Err(SourceError::InvalidMagic {
            magic: footer.magic,
        });
    }
    if footer.version != layout::META_VERSION {
        tracing::warn!(
            version = footer.version,
            expected = layout::META_VERSION,
            "unexpected meta region version"
        );
    }

    let size = usize::from(footer.size);
    if size < layout::FOOTER_SIZE || size > end_offset {
        return Err(SourceError::InvalidFooterSize { size, end_offset });
    }
    let start = end_offset - size;

    let tlvs = read_tlvs(&buf[start..footer_start])?;
    tracing::debug!(
        start = format_args!("{:#x}", start),
        end = format_args!("{:#x}", end_offset),
        bytes = size,
        count = tlvs.len(),
        "parsed meta region"
    );
    Ok(Meta::new(tlvs, footer))
}

fn read_footer(bytes: &[u8]) -> Result<MetaFooter, SourceError> {
    let reader = ByteReader::new(bytes);
    Ok(MetaFooter {
        size: reader.read_u16_le(layout::FOOTER_SIZE_RANGE)?,
        magic: reader.read_u32_le(layout::FOOTER_MAGIC_RANGE)?,
        version: reader.read_u8(layout::FOOTER_VERSION_OFFSET)?,
    })
}

/// Read packed TLVs until the area is consumed. Offsets in errors are
/// relative to the region start.
fn read_tlvs(area: &[u8]) -> Result<Vec<MetaTlv>, SourceError> {
    let reader = ByteReader::new(area);
    let mut tlvs = Vec::new();
    let mut cursor = 0usize;

    while cursor < reader.len() {
        let available = reader.len() - cursor;
        if available < layout::TLV_HEADER_SIZE {
            return Err(SourceError::TruncatedTlv {
                offset: cursor,
                needed: layout::TLV_HEADER_SIZE,
                available,
            });
        }
        let type_tag = reader.read_u8(cursor + layout::TLV_TYPE_OFFSET)?;
        let size = reader.read_u16_le(
            cursor + layout::TLV_SIZE_RANGE.start..cursor + layout::TLV_SIZE_RANGE.end,
        )?;

        let needed = layout::TLV_HEADER_SIZE + usize::from(size);
        if available < needed {
            return Err(SourceError::TruncatedTlv {
                offset: cursor,
                needed,
                available,
            });
        }
        let body_start = cursor + layout::TLV_HEADER_SIZE;
        let body = reader.read_slice(body_start..cursor + needed)?;
        tracing::trace!(offset = cursor, type_tag, size, "read meta TLV");
        tlvs.push(MetaTlv::new(type_tag, body.to_vec())?);
        cursor += needed;
    }

    Ok(tlvs)
}

#[cfg(test)]
mod tests {
    use super::parse_region;
    use crate::meta::layout;
    use crate::source::SourceError;

    fn tlv(type_tag: u8, body: &[u8]) -> Vec<u8> {
        let mut out = vec![type_tag];
        out.extend_from_slice(&(body.len() as u16).to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    fn region(tlvs: &[Vec<u8>], magic: u32, version: u8) -> Vec<u8> {
        let mut out: Vec<u8> = tlvs.concat();
        let size = (out.len() + layout::FOOTER_SIZE) as u16;
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&magic.to_le_bytes());
        out.push(version);
        out
    }

    #[test]
    fn parses_tlvs_in_order() {
        let mut buf = vec![0xff; 16];
        buf.extend(region(
            &[
                tlv(layout::TLV_TYPE_HASH, &[0xab; layout::HASH_SIZE]),
                tlv(layout::TLV_TYPE_MMR_REF, &[2]),
                tlv(0x7f, &[]),
            ],
            layout::META_MAGIC,
            layout::META_VERSION,
        ));
        let end = buf.len();

        let meta = parse_region(&buf, end).unwrap();
        assert_eq!(meta.tlvs.len(), 3);
        assert_eq!(meta.tlvs[0].header().type_tag, layout::TLV_TYPE_HASH);
        assert_eq!(meta.tlvs[0].data(), &[0xab; layout::HASH_SIZE]);
        assert_eq!(meta.tlvs[1].data(), &[2]);
        assert!(meta.tlvs[2].data().is_empty());
        assert_eq!(usize::from(meta.footer.size), end - 16);
        assert_eq!(meta.footer.version, layout::META_VERSION);
    }

    #[test]
    fn ignores_bytes_after_end_offset() {
        let mut buf = region(&[tlv(layout::TLV_TYPE_MMR_REF, &[1])], layout::META_MAGIC, 2);
        let end = buf.len();
        buf.extend_from_slice(&[0u8; 32]);
        let meta = parse_region(&buf, end).unwrap();
        assert_eq!(meta.tlvs.len(), 1);
    }

    #[test]
    fn accepts_empty_region() {
        let buf = region(&[], layout::META_MAGIC, layout::META_VERSION);
        let meta = parse_region(&buf, buf.len()).unwrap();
        assert!(meta.tlvs.is_empty());
        assert_eq!(usize::from(meta.footer.size), layout::FOOTER_SIZE);
    }

    #[test]
    fn accepts_unexpected_version() {
        let buf = region(&[], layout::META_MAGIC, 9);
        let meta = parse_region(&buf, buf.len()).unwrap();
        assert_eq!(meta.footer.version, 9);
    }

    #[test]
    fn rejects_bad_magic() {
        let buf = region(&[], 0xdead_beef, layout::META_VERSION);
        let err = parse_region(&buf, buf.len()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidMagic { magic: 0xdead_beef }));
    }

    #[test]
    fn rejects_end_offset_past_buffer() {
        let buf = region(&[], layout::META_MAGIC, layout::META_VERSION);
        let err = parse_region(&buf, buf.len() + 1).unwrap_err();
        assert!(matches!(err, SourceError::EndOffsetOutOfBounds { .. }));
    }

    #[test]
    fn rejects_buffer_shorter_than_footer() {
        let err = parse_region(&[0u8; 4], 4).unwrap_err();
        assert!(matches!(
            err,
            SourceError::TooShort {
                needed: layout::FOOTER_SIZE,
                actual: 4
            }
        ));
    }

    #[test]
    fn rejects_footer_size_past_start() {
        let mut buf = region(&[], layout::META_MAGIC, layout::META_VERSION);
        buf[layout::FOOTER_SIZE_RANGE].copy_from_slice(&64u16.to_le_bytes());
        let err = parse_region(&buf, buf.len()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidFooterSize {
                size: 64,
                end_offset: 7
            }
        ));

        buf[layout::FOOTER_SIZE_RANGE].copy_from_slice(&3u16.to_le_bytes());
        let err = parse_region(&buf, buf.len()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidFooterSize { size: 3, .. }));
    }

    #[test]
    fn rejects_tlv_running_into_footer() {
        let mut body = tlv(layout::TLV_TYPE_MMR_REF, &[1]);
        body[layout::TLV_SIZE_RANGE].copy_from_slice(&5u16.to_le_bytes());
        let buf = region(&[tlv(layout::TLV_TYPE_MMR_REF, &[1]), body], layout::META_MAGIC, 2);
        let err = parse_region(&buf, buf.len()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::TruncatedTlv {
                offset: 4,
                needed: 8,
                available: 4
            }
        ));
    }

    #[test]
    fn rejects_partial_tlv_header() {
        let buf = region(&[vec![0x04, 0x01]], layout::META_MAGIC, 2);
        let err = parse_region(&buf, buf.len()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::TruncatedTlv {
                offset: 0,
                needed: layout::TLV_HEADER_SIZE,
                available: 2
            }
        ));
    }
}

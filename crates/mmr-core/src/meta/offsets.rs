use super::MetaTlv;

/// Region-relative byte offsets of every TLV and of the footer.
///
/// The region is a packed concatenation of TLVs followed by the footer, so
/// offsets start at 0, strictly increase, and leave no gaps.
///
/// # Examples
/// ```
/// use mmr_core::{MetaTlv, Offsets};
///
/// let tlvs = vec![
///     MetaTlv::new(0x04, vec![1]).unwrap(),
///     MetaTlv::new(0x04, vec![2]).unwrap(),
/// ];
/// let offsets = Offsets::compute(&tlvs);
/// assert_eq!(offsets.tlvs, vec![0, 4]);
/// assert_eq!(offsets.footer, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offsets {
    pub tlvs: Vec<usize>,
    pub footer: usize,
}

impl Offsets {
    /// Walk the TLVs once, counting header and body bytes. Bodies are never
    /// inspected.
    pub fn compute(tlvs: &[MetaTlv]) -> Self {
        let mut cursor = 0usize;
        let mut offsets = Vec::with_capacity(tlvs.len());
        for tlv in tlvs {
            offsets.push(cursor);
            cursor += tlv.encoded_len();
        }
        Self {
            tlvs: offsets,
            footer: cursor,
        }
    }
}

/// Absolute start of a region of `footer_size` bytes ending at `end_offset`.
///
/// Not clamped: a footer size larger than `end_offset` yields a negative
/// start, which callers treat as a malformed or truncated footer.
///
/// # Examples
/// ```
/// use mmr_core::region_start;
///
/// assert_eq!(region_start(1024, 16), 1008);
/// assert_eq!(region_start(8, 16), -8);
/// ```
pub fn region_start(end_offset: i64, footer_size: u16) -> i64 {
    end_offset.saturating_sub(i64::from(footer_size))
}

/// Shift a region-relative offset onto the absolute scale of `start`.
pub(crate) fn absolute(start: i64, relative: usize) -> i64 {
    start.saturating_add(i64::try_from(relative).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{Offsets, absolute, region_start};
    use crate::meta::{MetaTlv, layout};

    fn tlvs(sizes: &[usize]) -> Vec<MetaTlv> {
        sizes
            .iter()
            .map(|&size| MetaTlv::new(0x7f, vec![0; size]).unwrap())
            .collect()
    }

    #[test]
    fn offsets_are_contiguous_from_zero() {
        let tlvs = tlvs(&[32, 10, 1, 0, 200]);
        let offsets = Offsets::compute(&tlvs);

        assert_eq!(offsets.tlvs.len(), tlvs.len());
        assert_eq!(offsets.tlvs[0], 0);
        for i in 0..tlvs.len() - 1 {
            assert!(offsets.tlvs[i] < offsets.tlvs[i + 1]);
            assert_eq!(
                offsets.tlvs[i + 1] - offsets.tlvs[i],
                layout::TLV_HEADER_SIZE + tlvs[i].data().len()
            );
        }
        let last = tlvs.len() - 1;
        assert_eq!(
            offsets.footer,
            offsets.tlvs[last] + layout::TLV_HEADER_SIZE + tlvs[last].data().len()
        );
    }

    #[test]
    fn empty_region_puts_footer_at_zero() {
        let offsets = Offsets::compute(&[]);
        assert!(offsets.tlvs.is_empty());
        assert_eq!(offsets.footer, 0);
    }

    #[test]
    fn oversized_footer_gives_negative_start() {
        assert_eq!(region_start(10, 16), -6);
        assert_eq!(region_start(0, 7), -7);
        assert_eq!(absolute(-6, 3), -3);
    }

    #[test]
    fn absolute_offsets_follow_start() {
        assert_eq!(absolute(region_start(1024, 16), 13), 1021);
    }
}

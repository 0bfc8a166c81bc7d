//! Projection of a decoded region into a generic, JSON-ready tree.
//!
//! Keys starting with `_` are computed or positional (indices and absolute
//! offsets); every other key echoes data stored in the region. Key order is
//! fixed by the builders below and is preserved when rendering.

pub mod error;
pub mod tree;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::meta::offsets::absolute;
use crate::meta::{Meta, MetaFooter, MetaTlv, type_name};

pub use error::RenderError;
pub use tree::Node;

const PRETTY_INDENT: &[u8] = b"    ";

/// Output style for rendered projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Four-space indented, one field per line.
    #[default]
    Pretty,
    /// Single line, no whitespace.
    Compact,
}

/// Project one TLV found at `offset` (absolute) and position `index`.
pub fn project_tlv(tlv: &MetaTlv, index: usize, offset: i64) -> Node {
    let header = tlv.header();
    let header_node = Node::map([
        ("_type_name", Node::from(type_name(header.type_tag))),
        ("type", Node::from(header.type_tag)),
        ("size", Node::from(header.size)),
    ]);

    Node::map([
        ("_index", Node::Int(index as i64)),
        ("_offset", Node::Int(offset)),
        ("header", header_node),
        ("data", tlv.decode().to_node()),
    ])
}

/// Project the footer found at `offset` (absolute).
pub fn project_footer(footer: &MetaFooter, offset: i64) -> Node {
    Node::map([
        ("_offset", Node::Int(offset)),
        ("size", Node::from(footer.size)),
        ("magic", Node::from(footer.magic)),
        ("version", Node::from(footer.version)),
    ])
}

/// Project a whole region ending at `end_offset`.
///
/// One malformed TLV body only degrades that TLV's `data` to a hex string;
/// every other node is built as usual.
///
/// # Examples
/// ```
/// use mmr_core::{Meta, MetaFooter, MetaTlv, project};
///
/// let meta = Meta::new(
///     vec![MetaTlv::new(0x04, vec![5]).unwrap()],
///     MetaFooter { size: 11, magic: 0x96f3_b83c, version: 2 },
/// );
/// let tree = project(&meta, 64);
/// assert_eq!(tree.get("_offset").and_then(|n| n.as_i64()), Some(53));
/// ```
pub fn project(meta: &Meta, end_offset: i64) -> Node {
    let offsets = meta.offsets();
    let start = meta.start_offset(end_offset);

    let tlvs = meta
        .tlvs
        .iter()
        .zip(&offsets.tlvs)
        .enumerate()
        .map(|(index, (tlv, &relative))| project_tlv(tlv, index, absolute(start, relative)))
        .collect::<Vec<_>>();

    let footer = project_footer(&meta.footer, absolute(start, offsets.footer));

    Node::map([
        ("_offset", Node::Int(start)),
        ("_end_offset", Node::Int(end_offset)),
        ("_size", Node::from(meta.footer.size)),
        ("tlvs", Node::List(tlvs)),
        ("footer", footer),
    ])
}

/// Render any projection tree as JSON text.
pub fn render_node(node: &Node, style: RenderStyle) -> Result<String, RenderError> {
    match style {
        RenderStyle::Compact => Ok(serde_json::to_string(node)?),
        RenderStyle::Pretty => {
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(
                &mut out,
                PrettyFormatter::with_indent(PRETTY_INDENT),
            );
            node.serialize(&mut serializer)?;
            Ok(String::from_utf8(out)?)
        }
    }
}

/// Project and render a region as indented JSON.
pub fn render(meta: &Meta, end_offset: i64) -> Result<String, RenderError> {
    render_node(&project(meta, end_offset), RenderStyle::Pretty)
}

/// Project and render a region as single-line JSON.
pub fn render_compact(meta: &Meta, end_offset: i64) -> Result<String, RenderError> {
    render_node(&project(meta, end_offset), RenderStyle::Compact)
}

#[cfg(test)]
mod tests {
    use super::{Node, RenderStyle, project, project_footer, project_tlv, render, render_node};
    use crate::meta::{Meta, MetaFooter, MetaTlv, layout};

    fn footer(size: u16) -> MetaFooter {
        MetaFooter {
            size,
            magic: layout::META_MAGIC,
            version: layout::META_VERSION,
        }
    }

    #[test]
    fn tlv_node_key_order() {
        let tlv = MetaTlv::new(layout::TLV_TYPE_MMR_REF, vec![9]).unwrap();
        let node = project_tlv(&tlv, 2, 100);
        assert_eq!(
            node.keys().collect::<Vec<_>>(),
            vec!["_index", "_offset", "header", "data"]
        );
        let header = node.get("header").unwrap();
        assert_eq!(
            header.keys().collect::<Vec<_>>(),
            vec!["_type_name", "type", "size"]
        );
        assert_eq!(header.get("_type_name").and_then(Node::as_str), Some("MMR_REF"));
        assert_eq!(
            node.get("data"),
            Some(&Node::map([("area", Node::Int(9))]))
        );
    }

    #[test]
    fn footer_node_echoes_fields() {
        let node = project_footer(&footer(20), -4);
        assert_eq!(
            node,
            Node::map([
                ("_offset", Node::Int(-4)),
                ("size", Node::Int(20)),
                ("magic", Node::Int(i64::from(layout::META_MAGIC))),
                ("version", Node::Int(2)),
            ])
        );
    }

    #[test]
    fn empty_region_projects_footer_at_start() {
        let meta = Meta::new(Vec::new(), footer(7));
        let tree = project(&meta, 7);
        assert_eq!(tree.get("_offset").and_then(Node::as_i64), Some(0));
        assert_eq!(tree.get("tlvs").and_then(Node::as_list).map(<[Node]>::len), Some(0));
        let footer = tree.get("footer").unwrap();
        assert_eq!(footer.get("_offset").and_then(Node::as_i64), Some(0));
    }

    #[test]
    fn pretty_render_uses_four_space_indent() {
        let meta = Meta::new(Vec::new(), footer(7));
        let text = render(&meta, 7).unwrap();
        assert!(text.starts_with("{\n    \"_offset\": 0,"));
        assert!(text.contains("\n        \"magic\": "));
        assert!(text.contains("\"tlvs\": [],"));
    }

    #[test]
    fn compact_render_is_single_line() {
        let node = Node::map([("a", Node::Int(1)), ("b", Node::List(vec![]))]);
        let text = render_node(&node, RenderStyle::Compact).unwrap();
        assert_eq!(text, r#"{"a":1,"b":[]}"#);
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use mmr_core::{Node, RegionFile, RenderStyle};

fn golden_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(name)
}

fn load_expected(name: &str) -> (String, Node) {
    let path = golden_dir(name).join("expected_region.json");
    let text = fs::read_to_string(&path).expect("read expected_region.json");
    let node = serde_json::from_str(&text).expect("parse expected region");
    (text, node)
}

fn run_golden(name: &str) {
    let input = golden_dir(name).join("input.bin");
    let (expected_text, expected_node) = load_expected(name);

    let region = RegionFile::open(&input, None).expect("open region");
    let actual_node = region.project();
    assert_eq!(actual_node, expected_node, "golden tree mismatch in {name}");

    let actual_text = region.render(RenderStyle::Pretty).expect("render region");
    assert_eq!(
        actual_text.trim_end(),
        expected_text.trim_end(),
        "golden text mismatch in {name}"
    );
}

#[test]
fn golden_flash_area() {
    run_golden("flash_area");
}

#[test]
fn golden_mixed() {
    run_golden("mixed");
}

#[test]
fn golden_flash_area_is_anchored_after_padding() {
    let (_, expected) = load_expected("flash_area");
    assert_eq!(expected.get("_offset").and_then(Node::as_i64), Some(16));
    let footer = expected.get("footer").expect("footer");
    assert_eq!(footer.get("_offset").and_then(Node::as_i64), Some(29));
}

#[test]
fn golden_mixed_keeps_undecodable_bodies_as_hex() {
    let (_, expected) = load_expected("mixed");
    let tlvs = expected.get("tlvs").and_then(Node::as_list).expect("tlvs");
    assert_eq!(tlvs.len(), 5);
    assert_eq!(tlvs[3].get("data").and_then(Node::as_str), Some("dead"));
    assert_eq!(tlvs[4].get("data").and_then(Node::as_str), Some("0506"));
    let header = tlvs[3].get("header").expect("header");
    assert_eq!(header.get("_type_name").and_then(Node::as_str), Some("???"));
}

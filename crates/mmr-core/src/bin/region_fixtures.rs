use std::fs;
use std::path::{Path, PathBuf};

const TLV_TYPE_HASH: u8 = 0x01;
const TLV_TYPE_FLASH_AREA: u8 = 0x02;
const TLV_TYPE_MMR_REF: u8 = 0x04;
const TLV_TYPE_UNKNOWN: u8 = 0x7f;

const FOOTER_SIZE: usize = 7;
const META_MAGIC: u32 = 0x96f3_b83c;
const META_VERSION: u8 = 2;

const IMAGE_PADDING: u8 = 0xff;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(
        root.join("flash_area").join("input.bin"),
        RegionSpec::padded(16, vec![flash_area_tlv(1, 0, 0x0002_0000, 0x0006_0000)]),
    )?;
    write_fixture(
        root.join("mixed").join("input.bin"),
        RegionSpec::padded(
            0,
            vec![
                tlv(TLV_TYPE_HASH, &hash_bytes()),
                flash_area_tlv(1, 0, 0x0002_0000, 0x0006_0000),
                tlv(TLV_TYPE_MMR_REF, &[3]),
                tlv(TLV_TYPE_UNKNOWN, &[0xde, 0xad]),
                tlv(TLV_TYPE_MMR_REF, &[5, 6]),
            ],
        ),
    )?;
    Ok(())
}

/// A region preceded by `padding` bytes of erased flash.
struct RegionSpec {
    padding: usize,
    tlvs: Vec<Vec<u8>>,
}

impl RegionSpec {
    fn padded(padding: usize, tlvs: Vec<Vec<u8>>) -> Self {
        Self { padding, tlvs }
    }
}

fn write_fixture(path: PathBuf, spec: RegionSpec) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }

    let mut output = vec![IMAGE_PADDING; spec.padding];
    output.extend_from_slice(&build_region(&spec.tlvs)?);
    write_bytes(&path, &output)
}

fn build_region(tlvs: &[Vec<u8>]) -> Result<Vec<u8>, String> {
    let mut region = tlvs.concat();
    let size = u16::try_from(region.len() + FOOTER_SIZE)
        .map_err(|_| format!("region too large: {} bytes", region.len()))?;
    region.extend_from_slice(&size.to_le_bytes());
    region.extend_from_slice(&META_MAGIC.to_le_bytes());
    region.push(META_VERSION);
    Ok(region)
}

fn tlv(type_tag: u8, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(3 + body.len());
    out.push(type_tag);
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

fn flash_area_tlv(area: u8, device: u8, offset: u32, size: u32) -> Vec<u8> {
    let mut body = vec![area, device];
    body.extend_from_slice(&offset.to_le_bytes());
    body.extend_from_slice(&size.to_le_bytes());
    tlv(TLV_TYPE_FLASH_AREA, &body)
}

fn hash_bytes() -> [u8; 32] {
    let mut hash = [0u8; 32];
    for (idx, value) in hash.iter_mut().enumerate() {
        *value = idx as u8;
    }
    hash
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

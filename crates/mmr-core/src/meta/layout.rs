pub const TLV_TYPE_OFFSET: usize = 0;
pub const TLV_SIZE_RANGE: std::ops::Range<usize> = 1..3;
pub const TLV_HEADER_SIZE: usize = 3;

pub const TLV_TYPE_HASH: u8 = 0x01;
pub const TLV_TYPE_FLASH_AREA: u8 = 0x02;
pub const TLV_TYPE_MMR_REF: u8 = 0x04;

pub const HASH_SIZE: usize = 32;
pub const HASH_RANGE: std::ops::Range<usize> = 0..HASH_SIZE;

pub const FLASH_AREA_AREA_OFFSET: usize = 0;
pub const FLASH_AREA_DEVICE_OFFSET: usize = 1;
pub const FLASH_AREA_OFFSET_RANGE: std::ops::Range<usize> = 2..6;
pub const FLASH_AREA_SIZE_RANGE: std::ops::Range<usize> = 6..10;
pub const FLASH_AREA_BODY_SIZE: usize = 10;

pub const MMR_REF_AREA_OFFSET: usize = 0;
pub const MMR_REF_BODY_SIZE: usize = 1;

pub const FOOTER_SIZE_RANGE: std::ops::Range<usize> = 0..2;
pub const FOOTER_MAGIC_RANGE: std::ops::Range<usize> = 2..6;
pub const FOOTER_VERSION_OFFSET: usize = 6;
pub const FOOTER_SIZE: usize = 7;

pub const META_MAGIC: u32 = 0x96f3_b83c;
pub const META_VERSION: u8 = 2;

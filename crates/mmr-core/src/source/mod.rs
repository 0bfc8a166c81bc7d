//! Region sources: turn raw bytes into a [`Meta`] for the projection layer.
//!
//! This is the only place the crate touches the filesystem. The caller names
//! where the region ends; nothing here scans an image for the footer.

mod region;

pub use region::parse_region;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::common::reader::ShortRead;
use crate::meta::{Meta, MetaError};
use crate::projection::{Node, RenderError, RenderStyle, project, render_node};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("end offset {end_offset} is past the end of the input ({len} bytes)")]
    EndOffsetOutOfBounds { end_offset: u64, len: u64 },
    #[error("input too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid footer magic: {magic:#010x}")]
    InvalidMagic { magic: u32 },
    #[error("invalid footer size {size} for region ending at {end_offset}")]
    InvalidFooterSize { size: usize, end_offset: usize },
    #[error("truncated TLV at region offset {offset}: need {needed} bytes, {available} available")]
    TruncatedTlv {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid TLV: {0}")]
    Meta(#[from] MetaError),
}

impl From<ShortRead> for SourceError {
    fn from(value: ShortRead) -> Self {
        SourceError::TooShort {
            needed: value.needed,
            actual: value.actual,
        }
    }
}

/// A region loaded from a file, together with the offset it ends at.
#[derive(Debug, Clone)]
pub struct RegionFile {
    pub path: PathBuf,
    pub end_offset: i64,
    pub meta: Meta,
}

impl RegionFile {
    /// Read `path` and parse the region ending at `end_offset`, or at the end
    /// of the file when `None`.
    pub fn open(path: &Path, end_offset: Option<u64>) -> Result<Self, SourceError> {
        let bytes = fs::read(path)?;
        let len = bytes.len() as u64;
        let end = end_offset.unwrap_or(len);
        let out_of_bounds = || SourceError::EndOffsetOutOfBounds {
            end_offset: end,
            len,
        };
        let end_usize = usize::try_from(end).map_err(|_| out_of_bounds())?;
        let end_offset = i64::try_from(end).map_err(|_| out_of_bounds())?;

        let meta = parse_region(&bytes, end_usize)?;
        tracing::info!(
            path = %path.display(),
            end = format_args!("{:#x}", end),
            tlvs = meta.tlvs.len(),
            "loaded meta region"
        );
        Ok(Self {
            path: path.to_path_buf(),
            end_offset,
            meta,
        })
    }

    pub fn project(&self) -> Node {
        project(&self.meta, self.end_offset)
    }

    pub fn render(&self, style: RenderStyle) -> Result<String, RenderError> {
        render_node(&self.project(), style)
    }
}

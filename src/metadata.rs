use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("unknown fileblock: {0}")]
    UnknownBlock(String),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("bad metadata manifest: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One file of a block as the bookkeeping catalog reports it.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BlockFile {
    pub logical_file_name: String,
    pub checksum: String,
    #[serde(default)]
    pub adler32: Option<String>,
    pub file_size: u64,
}

// Source of fileblock content for building drops
pub trait MetadataSource {
    fn block_files(&self, block: &str) -> Result<Vec<BlockFile>, MetadataError>;
    fn block_is_open(&self, block: &str) -> Result<bool, MetadataError>;
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct BlockEntry {
    pub open: bool,
    #[serde(default)]
    pub files: Vec<BlockFile>,
}

/// Catalog snapshot held in memory, optionally loaded from a JSON manifest
/// of `{ "<block>": { "Open": bool, "Files": [ ... ] } }`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct MemoryMetadata {
    blocks: HashMap<String, BlockEntry>,
}

impl MemoryMetadata {
    pub fn new() -> Self {
        MemoryMetadata::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, MetadataError> {
        let reader = BufReader::new(File::open(path)?);
        let meta: MemoryMetadata = serde_json::from_reader(reader)?;
        debug!("Loaded {} blocks from {}", meta.blocks.len(), path.display());
        Ok(meta)
    }

    pub fn insert_block(&mut self, block: impl Into<String>, open: bool, files: Vec<BlockFile>) {
        self.blocks.insert(block.into(), BlockEntry { open, files });
    }

    fn entry(&self, block: &str) -> Result<&BlockEntry, MetadataError> {
        self.blocks
            .get(block)
            .ok_or_else(|| MetadataError::UnknownBlock(block.to_string()))
    }
}

impl MetadataSource for MemoryMetadata {
    fn block_files(&self, block: &str) -> Result<Vec<BlockFile>, MetadataError> {
        Ok(self.entry(block)?.files.clone())
    }

    fn block_is_open(&self, block: &str) -> Result<bool, MetadataError> {
        Ok(self.entry(block)?.open)
    }
}

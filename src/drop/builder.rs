use log::debug;

use crate::drop::{Checksums, DropError, InjectionSpec};
use crate::metadata::MetadataSource;

// Checksum every catalog file carries
const PRIMARY_CHECKSUM: &str = "cksum";
const ADLER32: &str = "adler32";

/// Spec for `blocks` of one dataset, with their files pulled from `source`.
///
/// Blocks are looked up one after the other in the order given. The first
/// lookup failure aborts the whole build, no partial document comes back.
pub fn spec_for_blocks<M: MetadataSource, S: AsRef<str>>(
    source: &M,
    service: &str,
    dataset_path: &str,
    blocks: &[S],
) -> Result<InjectionSpec, DropError> {
    let mut spec = InjectionSpec::new(service);
    let dataset = spec.get_or_create_dataset(dataset_path, true, false);

    for name in blocks {
        let name = name.as_ref();
        let files = source.block_files(name)?;
        let is_open = source.block_is_open(name)?;
        debug!("Block {} (open: {}) has {} files", name, is_open, files.len());

        let block = dataset.get_or_create_fileblock(name, is_open);
        for file in files {
            let mut checksums = Checksums::new();
            checksums.insert(PRIMARY_CHECKSUM.to_string(), file.checksum);
            if let Some(adler) = file.adler32.filter(|a| !a.is_empty()) {
                checksums.insert(ADLER32.to_string(), adler);
            }
            block.add_file(file.logical_file_name, checksums, file.file_size);
        }
    }

    Ok(spec)
}

/// Rendered [`spec_for_blocks`].
pub fn build_drop_for_blocks<M: MetadataSource, S: AsRef<str>>(
    source: &M,
    service: &str,
    dataset_path: &str,
    blocks: &[S],
) -> Result<String, DropError> {
    spec_for_blocks(source, service, dataset_path, blocks)?.to_xml()
}

/// Spec announcing bare datasets, without any blocks.
pub fn spec_for_dataset_paths<S: AsRef<str>>(service: &str, dataset_paths: &[S]) -> InjectionSpec {
    let mut spec = InjectionSpec::new(service);
    for path in dataset_paths {
        spec.get_or_create_dataset(path.as_ref(), true, false);
    }
    spec
}

pub fn build_drop_for_dataset_paths<S: AsRef<str>>(
    service: &str,
    dataset_paths: &[S],
) -> Result<String, DropError> {
    spec_for_dataset_paths(service, dataset_paths).to_xml()
}

//! Injection drop document
//!
//! A drop announces new data to the data-placement service. It is a three
//! level model built in memory, rendered into an [`AttributedNode`] tree and
//! only then turned into text:
//!
//! ```text
//! <data version="2">
//!   <dbs name="{service}" dls="dbs">
//!     <dataset name="{path}" is-open="y|n" is-transient="y|n">
//!       <block name="{block}" is-open="y|n">
//!         <file name="{lfn}" checksum="{alg:value[,alg:value...]}" bytes="{size}"/>
//!       </block>
//!     </dataset>
//!   </dbs>
//! </data>
//! ```
//!
//! | Type               | Element   | Keyed by      | Children in       |
//! | ------------------ | --------- | ------------- | ----------------- |
//! | [`InjectionSpec`]  | `data`    | service       | registration order |
//! | [`Dataset`]        | `dataset` | dataset path  | registration order |
//! | [`Fileblock`]      | `block`   | block name    | `add_file` order  |
//!
//! Datasets and blocks are created through get-or-create accessors. The
//! first registration fixes the flags; asking again with other flags hands
//! back the existing entry untouched.
//!
//! [`AttributedNode`]: crate::node::AttributedNode
pub mod builder;
mod dataset;
mod fileblock;
mod spec;

pub use dataset::Dataset;
pub use fileblock::{Checksums, FileRecord, Fileblock};
pub use spec::InjectionSpec;

use thiserror::Error;

use crate::metadata::MetadataError;

#[derive(Error, Debug)]
pub enum DropError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("xml rendering failed: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("rendered document is not utf-8")]
    EncodingError(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    MetadataError(#[from] MetadataError),
}

// Flags are rendered the way the injection service expects them
pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "y"
    } else {
        "n"
    }
}

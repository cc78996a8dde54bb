//! Client side tools for announcing data to the data-placement service.
//!
//! - [`drop`] builds the injection XML for datasets and fileblocks.
//! - [`sitedb`] answers site naming questions from a cached copy of the
//!   site directory.
pub mod config;
pub mod drop;
pub mod metadata;
pub mod node;
pub mod sitedb;

pub use drop::builder::{build_drop_for_blocks, build_drop_for_dataset_paths};
pub use drop::{Dataset, DropError, Fileblock, InjectionSpec};
pub use node::AttributedNode;

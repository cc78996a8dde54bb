use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::drop::dataset::Dataset;
use crate::drop::DropError;
use crate::node::AttributedNode;

// Schema version of the injection document
const DROP_VERSION: &str = "2";

/// Root of a drop: the target service plus every dataset announced to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionSpec {
    service: String,
    datasets: IndexMap<String, Dataset>,
}

impl InjectionSpec {
    pub fn new(service: impl Into<String>) -> Self {
        InjectionSpec {
            service: service.into(),
            datasets: IndexMap::new(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    /// Same first-registration-wins rule as
    /// [`Dataset::get_or_create_fileblock`].
    pub fn get_or_create_dataset(&mut self, path: &str, is_open: bool, is_transient: bool) -> &mut Dataset {
        self.datasets.entry(path.to_string()).or_insert_with(|| {
            debug!("Registering dataset {} (open: {}, transient: {})", path, is_open, is_transient);
            Dataset::new(path, is_open, is_transient)
        })
    }

    pub fn render(&self) -> AttributedNode {
        let mut dbs = AttributedNode::new("dbs")
            .with_attr("name", self.service.as_str())
            .with_attr("dls", "dbs");

        for dataset in self.datasets.values() {
            dbs.add_node(dataset.render());
        }

        let mut data = AttributedNode::new("data").with_attr("version", DROP_VERSION);
        data.add_node(dbs);
        data
    }

    pub fn to_xml(&self) -> Result<String, DropError> {
        self.render().to_xml()
    }

    /// Renders and writes the document to `path`, replacing what is there.
    ///
    /// The text goes to a temporary file next to `path` which is renamed over
    /// it once fully written, so a failed write never leaves a truncated drop
    /// behind.
    pub fn write_to_file(&self, path: &Path) -> Result<(), DropError> {
        let text = self.to_xml()?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!("Wrote drop for {} to {}", self.service, path.display());
        Ok(())
    }
}

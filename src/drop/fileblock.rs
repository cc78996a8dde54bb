use indexmap::IndexMap;

use crate::drop::yes_no;
use crate::node::AttributedNode;

/// Checksum algorithm name -> value, rendered in insertion order.
pub type Checksums = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub lfn: String,
    pub checksums: Checksums,
    pub size: String,
}

impl FileRecord {
    // "alg:value" pairs, empty values dropped, algorithm lowercased
    fn formatted_checksums(&self) -> String {
        self.checksums
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(alg, value)| format!("{}:{}", alg.to_lowercase(), value))
            .collect::<Vec<String>>()
            .join(",")
    }

    fn render(&self) -> AttributedNode {
        AttributedNode::new("file")
            .with_attr("name", self.lfn.as_str())
            .with_attr("checksum", self.formatted_checksums())
            .with_attr("bytes", self.size.as_str())
    }
}

/// Ordered batch of files making up one block of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fileblock {
    name: String,
    is_open: bool,
    files: Vec<FileRecord>,
}

impl Fileblock {
    pub fn new(name: impl Into<String>, is_open: bool) -> Self {
        Fileblock {
            name: name.into(),
            is_open,
            files: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Appends a file. Duplicate names are kept as separate entries and the
    /// size is taken as-is through its string form.
    pub fn add_file(&mut self, lfn: impl Into<String>, checksums: Checksums, size: impl ToString) {
        self.files.push(FileRecord {
            lfn: lfn.into(),
            checksums,
            size: size.to_string(),
        });
    }

    pub fn render(&self) -> AttributedNode {
        let mut block = AttributedNode::new("block")
            .with_attr("name", self.name.as_str())
            .with_attr("is-open", yes_no(self.is_open));

        for file in &self.files {
            block.add_node(file.render());
        }
        block
    }
}

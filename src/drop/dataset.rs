use indexmap::IndexMap;

use crate::drop::fileblock::Fileblock;
use crate::drop::yes_no;
use crate::node::AttributedNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    path: String,
    is_open: bool,
    is_transient: bool,
    fileblocks: IndexMap<String, Fileblock>,
}

impl Dataset {
    pub fn new(path: impl Into<String>, is_open: bool, is_transient: bool) -> Self {
        Dataset {
            path: path.into(),
            is_open,
            is_transient,
            fileblocks: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_transient(&self) -> bool {
        self.is_transient
    }

    pub fn fileblocks(&self) -> impl Iterator<Item = &Fileblock> {
        self.fileblocks.values()
    }

    /// Returns the block with this name, registering it with `is_open` if it
    /// is new. An existing block keeps the flag it was first created with.
    pub fn get_or_create_fileblock(&mut self, name: &str, is_open: bool) -> &mut Fileblock {
        self.fileblocks
            .entry(name.to_string())
            .or_insert_with(|| Fileblock::new(name, is_open))
    }

    pub fn render(&self) -> AttributedNode {
        let mut dataset = AttributedNode::new("dataset")
            .with_attr("name", self.path.as_str())
            .with_attr("is-open", yes_no(self.is_open))
            .with_attr("is-transient", yes_no(self.is_transient));

        for block in self.fileblocks.values() {
            dataset.add_node(block.render());
        }
        dataset
    }
}

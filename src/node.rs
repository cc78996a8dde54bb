use std::io::Write;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::drop::DropError;

// Indent width of the rendered document
const INDENT: usize = 2;

/// Generic element tree the drop model renders into.
///
/// Nothing here knows about XML text until [`AttributedNode::to_xml`] is
/// called, so two trees can be compared directly without caring about
/// whitespace. Attributes keep the order they were set in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedNode {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<AttributedNode>,
}

impl AttributedNode {
    pub fn new(name: impl Into<String>) -> Self {
        AttributedNode {
            name: name.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn add_node(&mut self, child: AttributedNode) {
        self.children.push(child);
    }

    /// Pretty printed XML text, declaration first, one element per line.
    pub fn to_xml(&self) -> Result<String, DropError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        self.write_to(&mut writer)?;

        let mut out = String::from_utf8(writer.into_inner())?;
        out.push('\n');
        Ok(out)
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), DropError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attrs {
            // (&str, &str) attributes are escaped by quick-xml on the way in
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }
        Ok(())
    }
}

// Rebuilds a tree from rendered text so tests can compare structure
#[cfg(test)]
pub(crate) fn parse(text: &str) -> AttributedNode {
    use quick_xml::Reader;

    fn open(e: &BytesStart) -> AttributedNode {
        let mut node = AttributedNode::new(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
        for attr in e.attributes() {
            let attr = attr.unwrap();
            node.set_attr(
                String::from_utf8(attr.key.as_ref().to_vec()).unwrap(),
                attr.unescape_value().unwrap().into_owned(),
            );
        }
        node
    }

    fn attach(stack: &mut Vec<AttributedNode>, root: &mut Option<AttributedNode>, node: AttributedNode) {
        match stack.last_mut() {
            Some(parent) => parent.add_node(node),
            None => *root = Some(node),
        }
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack = Vec::new();
    let mut root = None;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => stack.push(open(&e)),
            Event::Empty(e) => {
                let node = open(&e);
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let node = stack.pop().unwrap();
                attach(&mut stack, &mut root, node);
            }
            Event::Eof => break,
            _ => (),
        }
    }
    root.unwrap()
}

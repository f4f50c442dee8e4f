//! DOM Nodes
//!
//! Output nodes are plain owned data. They are built once by the projector
//! and never mutated afterwards, so the whole tree is `Send + Sync`.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::ops::Range;

use crate::{Attribute, Descendants, Document, Namespace, SourcePosition};

/// DOM Level 1 `nodeType` discriminants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    Comment = 8,
    Document = 9,
}

impl NodeType {
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// One node of the output tree
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum OutputNode {
    Document(Document),
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl OutputNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            OutputNode::Document(_) => NodeType::Document,
            OutputNode::Element(_) => NodeType::Element,
            OutputNode::Text(_) => NodeType::Text,
            OutputNode::Comment(_) => NodeType::Comment,
        }
    }

    pub fn node_name(&self) -> &str {
        match self {
            OutputNode::Document(_) => Document::NODE_NAME,
            OutputNode::Element(e) => e.node_name(),
            OutputNode::Text(t) => t.node_name(),
            OutputNode::Comment(_) => Comment::NODE_NAME,
        }
    }

    /// Child nodes in document order (empty for character data)
    pub fn children(&self) -> &[OutputNode] {
        match self {
            OutputNode::Document(d) => &d.child_nodes,
            OutputNode::Element(e) => &e.child_nodes,
            OutputNode::Text(_) | OutputNode::Comment(_) => &[],
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            OutputNode::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            OutputNode::Text(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            OutputNode::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// DOM `textContent`: concatenated text of all descendant text nodes for
    /// containers, the node's own data for character data.
    pub fn text_content(&self) -> String {
        match self {
            OutputNode::Text(t) => t.text_content.clone(),
            OutputNode::Comment(c) => c.text_content.clone(),
            _ => self
                .descendants()
                .filter_map(OutputNode::as_text)
                .map(|t| t.text_content.as_str())
                .collect(),
        }
    }

    /// Pre-order iterator over this node and everything below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }
}

impl From<Document> for OutputNode {
    fn from(doc: Document) -> Self {
        OutputNode::Document(doc)
    }
}

impl From<Element> for OutputNode {
    fn from(element: Element) -> Self {
        OutputNode::Element(element)
    }
}

impl From<Text> for OutputNode {
    fn from(text: Text) -> Self {
        OutputNode::Text(text)
    }
}

impl From<Comment> for OutputNode {
    fn from(comment: Comment) -> Self {
        OutputNode::Comment(comment)
    }
}

/// Element node
///
/// `nodeName` is always the tag name. Elements inserted by parser error
/// recovery have an empty `original_tag` and no positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub namespace: Namespace,
    /// Start tag exactly as written in the source
    pub original_tag: String,
    /// End tag exactly as written in the source
    pub original_end_tag: String,
    pub child_nodes: Vec<OutputNode>,
    pub attributes: Vec<Attribute>,
    /// Opening `<` of the start tag
    pub start_pos: Option<SourcePosition>,
    /// Opening `<` of the end tag, or the end of the element's source extent
    /// when the end tag is implied
    pub end_pos: Option<SourcePosition>,
}

impl Element {
    #[inline]
    pub fn node_name(&self) -> &str {
        &self.tag_name
    }

    /// True when the element has no literal source text
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        self.original_tag.is_empty()
    }

    /// Look up an attribute value. HTML attribute names match ASCII
    /// case-insensitively, foreign content matches exactly.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| match self.namespace {
            Namespace::Html => a.name.eq_ignore_ascii_case(name),
            Namespace::Svg | Namespace::MathMl => a.name == name,
        })
    }

    /// Child elements, skipping character data
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.child_nodes.iter().filter_map(OutputNode::as_element)
    }

    /// Byte range from the start tag to `end_pos`
    pub fn source_range(&self) -> Option<Range<usize>> {
        match (self.start_pos, self.end_pos) {
            (Some(start), Some(end)) => Some(start.offset..end.offset),
            _ => None,
        }
    }
}

impl Drop for Element {
    /// Releases descendants from an explicit stack rather than one nested
    /// drop per level.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.child_nodes);
        while let Some(mut node) = stack.pop() {
            match &mut node {
                OutputNode::Element(element) => stack.append(&mut element.child_nodes),
                OutputNode::Document(document) => stack.append(&mut document.child_nodes),
                OutputNode::Text(_) | OutputNode::Comment(_) => {}
            }
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Element", 10)?;
        s.serialize_field("nodeType", &NodeType::Element)?;
        s.serialize_field("nodeName", self.node_name())?;
        s.serialize_field("tagName", &self.tag_name)?;
        s.serialize_field("tagNamespace", &self.namespace)?;
        s.serialize_field("originalTag", &self.original_tag)?;
        s.serialize_field("originalEndTag", &self.original_end_tag)?;
        s.serialize_field("childNodes", &self.child_nodes)?;
        s.serialize_field("attributes", &self.attributes)?;
        match &self.start_pos {
            Some(pos) => s.serialize_field("startPos", pos)?,
            None => s.skip_field("startPos")?,
        }
        match &self.end_pos {
            Some(pos) => s.serialize_field("endPos", pos)?,
            None => s.skip_field("endPos")?,
        }
        s.end()
    }
}

/// Flavor of a character data node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Ordinary text, including whitespace-only runs
    Text,
    /// `<![CDATA[...]]>` content inside foreign elements
    CData,
}

impl TextKind {
    pub fn node_name(self) -> &'static str {
        match self {
            TextKind::Text => "#text",
            TextKind::CData => "#cdata-section",
        }
    }
}

/// Text or CDATA node
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub kind: TextKind,
    pub text_content: String,
    pub start_pos: SourcePosition,
}

impl Text {
    #[inline]
    pub fn node_name(&self) -> &'static str {
        self.kind.node_name()
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Text", 4)?;
        s.serialize_field("nodeType", &NodeType::Text)?;
        s.serialize_field("nodeName", self.node_name())?;
        s.serialize_field("textContent", &self.text_content)?;
        s.serialize_field("startPos", &self.start_pos)?;
        s.end()
    }
}

/// Comment node. Comments carry no position.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text_content: String,
}

impl Comment {
    pub const NODE_NAME: &'static str = "#comment";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text_content: text.into() }
    }

    /// DOM `nodeValue`, identical to `textContent` for comments
    #[inline]
    pub fn node_value(&self) -> &str {
        &self.text_content
    }
}

impl Serialize for Comment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Comment", 4)?;
        s.serialize_field("nodeType", &NodeType::Comment)?;
        s.serialize_field("nodeName", Self::NODE_NAME)?;
        s.serialize_field("textContent", &self.text_content)?;
        s.serialize_field("nodeValue", self.node_value())?;
        s.end()
    }
}

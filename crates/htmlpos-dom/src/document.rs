//! Document - Root of the output tree

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{Element, NodeType, OutputNode};

/// Document node
///
/// Doctype information lives here rather than in a separate child node.
/// The three doctype strings are empty when the input has no doctype.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub has_doctype: bool,
    pub name: String,
    pub public_identifier: String,
    pub system_identifier: String,
    pub child_nodes: Vec<OutputNode>,
}

impl Document {
    pub const NODE_NAME: &'static str = "#document";

    #[inline]
    pub fn node_type(&self) -> NodeType {
        NodeType::Document
    }

    /// The root element (normally `<html>`)
    pub fn document_element(&self) -> Option<&Element> {
        self.child_nodes.iter().find_map(OutputNode::as_element)
    }

    /// First element in tree order with the given tag name
    pub fn find_element(&self, tag_name: &str) -> Option<&Element> {
        self.child_nodes
            .iter()
            .flat_map(OutputNode::descendants)
            .filter_map(OutputNode::as_element)
            .find(|e| e.tag_name == tag_name)
    }

    /// All elements in tree order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.child_nodes
            .iter()
            .flat_map(OutputNode::descendants)
            .filter_map(OutputNode::as_element)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Document", 7)?;
        s.serialize_field("nodeType", &NodeType::Document)?;
        s.serialize_field("nodeName", Self::NODE_NAME)?;
        s.serialize_field("hasDoctype", &self.has_doctype)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("publicIdentifier", &self.public_identifier)?;
        s.serialize_field("systemIdentifier", &self.system_identifier)?;
        s.serialize_field("childNodes", &self.child_nodes)?;
        s.end()
    }
}

//! Attribute nodes

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::ops::Range;

use crate::{NodeType, SourcePosition};

/// A single attribute with the source positions of its name and value.
///
/// Attributes without a value have a zero-width value range located at
/// the end of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub name_start: SourcePosition,
    pub name_end: SourcePosition,
    pub value_start: SourcePosition,
    pub value_end: SourcePosition,
}

impl Attribute {
    #[inline]
    pub fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }

    pub fn name_range(&self) -> Range<usize> {
        self.name_start.offset..self.name_end.offset
    }

    /// Byte range of the raw value text, quotes excluded
    pub fn value_range(&self) -> Range<usize> {
        self.value_start.offset..self.value_end.offset
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Attribute", 7)?;
        s.serialize_field("nodeType", &NodeType::Attribute)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("nameStart", &self.name_start)?;
        s.serialize_field("nameEnd", &self.name_end)?;
        s.serialize_field("valueStart", &self.value_start)?;
        s.serialize_field("valueEnd", &self.value_end)?;
        s.end()
    }
}

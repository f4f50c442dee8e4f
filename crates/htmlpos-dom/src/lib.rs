//! htmlpos DOM - Position-annotated Document Object Model
//!
//! DOM Level 1 shaped output tree. Every node that has literal source
//! backing carries the `(line, column, offset)` of where it came from, so
//! linters and formatters can map nodes back to byte ranges of the input.

mod attributes;
mod document;
mod namespace;
mod node;
mod position;
mod tree;

pub use attributes::Attribute;
pub use document::Document;
pub use namespace::Namespace;
pub use node::{Comment, Element, NodeType, OutputNode, Text, TextKind};
pub use position::SourcePosition;
pub use tree::Descendants;

//! Raw tree to output tree projection

use htmlpos_dom::{Attribute, Comment, Document, Element, OutputNode, Text, TextKind};

use crate::engine::{RawAttribute, RawDocument, RawElement, RawNode, RawText, RawTextKind};
use crate::namespace::resolve_namespace;
use crate::position::encode_position;
use crate::tags::{canonical_tag_name, tag_from_original_text};
use crate::Result;

/// Project one raw node and everything below it.
///
/// Walks the raw tree with an explicit stack of partly built nodes, so
/// nesting depth is not bounded by the call stack.
pub fn project_node(node: &RawNode<'_>) -> Result<OutputNode> {
    let mut stack = Vec::new();
    let mut frame = Frame::open(node)?;
    loop {
        if let Some(child) = frame.children.next() {
            let child = Frame::open(&child)?;
            stack.push(std::mem::replace(&mut frame, child));
            continue;
        }
        let Some(mut parent) = stack.pop() else {
            return Ok(frame.node);
        };
        match &mut parent.node {
            OutputNode::Document(document) => document.child_nodes.push(frame.node),
            OutputNode::Element(element) => element.child_nodes.push(frame.node),
            OutputNode::Text(_) | OutputNode::Comment(_) => {}
        }
        frame = parent;
    }
}

/// A node projected without its children, and the raw children still to go
struct Frame<'t> {
    node: OutputNode,
    children: std::vec::IntoIter<RawNode<'t>>,
}

impl<'t> Frame<'t> {
    fn open(node: &RawNode<'t>) -> Result<Self> {
        let (node, children): (OutputNode, Vec<RawNode<'t>>) = match node {
            RawNode::Document(document) => (document_shell(document).into(), document.children()),
            RawNode::Element(element) => (element_shell(element)?.into(), element.children()),
            RawNode::Text(text) => (project_text(text).into(), Vec::new()),
            RawNode::Comment(comment) => (Comment::new(comment.text.as_str()).into(), Vec::new()),
        };
        Ok(Self {
            node,
            children: children.into_iter(),
        })
    }
}

pub fn project_document(document: &RawDocument<'_>) -> Result<Document> {
    let mut projected = document_shell(document);
    projected.child_nodes = project_children(document.children())?;
    Ok(projected)
}

fn document_shell(document: &RawDocument<'_>) -> Document {
    let (has_doctype, (name, public_identifier, system_identifier)) = match document.doctype() {
        Some(doctype) => (true, doctype),
        None => (false, Default::default()),
    };

    Document {
        has_doctype,
        name,
        public_identifier,
        system_identifier,
        child_nodes: Vec::new(),
    }
}

pub fn project_element(element: &RawElement<'_>) -> Result<Element> {
    let mut projected = element_shell(element)?;
    projected.child_nodes = project_children(element.children())?;
    Ok(projected)
}

/// Everything but the children
fn element_shell(element: &RawElement<'_>) -> Result<Element> {
    let original_tag = element.original_tag();
    let original_end_tag = element.original_end_tag();

    let tag_name = match canonical_tag_name(element.local_name()) {
        Some(name) => name.to_string(),
        None => match tag_from_original_text(original_tag) {
            "" => element.local_name().to_string(),
            custom => custom.to_string(),
        },
    };
    let namespace = resolve_namespace(element.namespace())?;
    let attributes = element.attributes().iter().map(project_attribute).collect();

    let (start_pos, end_pos) = match element.positions() {
        Some((start, end)) if !original_tag.is_empty() => {
            (Some(encode_position(start)), Some(encode_position(end)))
        }
        _ => (None, None),
    };

    Ok(Element {
        tag_name,
        namespace,
        original_tag: original_tag.to_string(),
        original_end_tag: original_end_tag.to_string(),
        child_nodes: Vec::new(),
        attributes,
        start_pos,
        end_pos,
    })
}

pub fn project_text(text: &RawText) -> Text {
    let kind = match text.kind {
        RawTextKind::Text | RawTextKind::Whitespace => TextKind::Text,
        RawTextKind::Cdata => TextKind::CData,
    };
    Text {
        kind,
        text_content: text.text.clone(),
        start_pos: encode_position(text.start),
    }
}

pub fn project_attribute(attr: &RawAttribute) -> Attribute {
    Attribute {
        name: attr.name.clone(),
        value: attr.value.clone(),
        name_start: encode_position(attr.name_start),
        name_end: encode_position(attr.name_end),
        value_start: encode_position(attr.value_start),
        value_end: encode_position(attr.value_end),
    }
}

fn project_children(children: Vec<RawNode<'_>>) -> Result<Vec<OutputNode>> {
    children.iter().map(project_node).collect()
}

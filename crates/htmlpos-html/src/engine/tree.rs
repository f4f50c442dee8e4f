//! Raw parse tree with source spans
//!
//! `RawTree` owns the engine's document together with everything recorded
//! while building it. Projection reads it through the borrowed views below;
//! dropping it releases the engine's nodes.

use std::collections::HashMap;
use std::ops::Range;

use markup5ever_rcdom::{Handle, NodeData};

use super::attribute_name;
use super::attrs::{AttributeSpan, scan_attributes, tag_name_end};
use super::tracker::{ElementRecord, NodeKey, SourceRecords, node_key};
use crate::position::{LineIndex, RawPosition};

pub struct RawTree<'a> {
    source: &'a str,
    index: LineIndex<'a>,
    document: Handle,
    records: SourceRecords,
    /// End of the source text covered by each source-backed element
    extents: HashMap<NodeKey, usize>,
}

impl<'a> RawTree<'a> {
    pub(crate) fn new(source: &'a str, tab_stop: usize, document: Handle, records: SourceRecords) -> Self {
        let extents = compute_extents(&document, &records);
        Self {
            source,
            index: LineIndex::new(source, tab_stop),
            document,
            records,
            extents,
        }
    }

    pub fn document(&self) -> RawDocument<'_> {
        RawDocument {
            tree: self,
            node: self.document.clone(),
        }
    }

    pub fn position(&self, offset: usize) -> RawPosition {
        self.index.position(offset)
    }

    /// Parse errors reported by the engine, in the order they were raised
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, RawPosition)> + '_ {
        self.records
            .errors
            .iter()
            .map(|e| (e.message.as_ref(), self.position(e.offset)))
    }

    #[cfg(test)]
    pub(crate) fn document_handle(&self) -> Handle {
        self.document.clone()
    }

    fn node(&self, node: &Handle) -> Option<RawNode<'_>> {
        let text = match &node.data {
            NodeData::Document => {
                return Some(RawNode::Document(RawDocument {
                    tree: self,
                    node: node.clone(),
                }));
            }
            NodeData::Element { name, attrs, .. } => {
                return Some(RawNode::Element(RawElement {
                    tree: self,
                    node: node.clone(),
                    name: name.clone(),
                    attrs: attrs.borrow().clone(),
                }));
            }
            NodeData::Comment { contents } => {
                return Some(RawNode::Comment(RawComment {
                    text: contents.to_string(),
                }));
            }
            NodeData::Text { contents } => contents.borrow().to_string(),
            NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => return None,
        };

        let start = self
            .records
            .texts
            .get(&node_key(node))
            .map_or(0, |record| record.start);
        let kind = if self.source.get(start..).is_some_and(|s| s.starts_with("<![CDATA[")) {
            RawTextKind::Cdata
        } else if text.bytes().all(|b| matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')) {
            RawTextKind::Whitespace
        } else {
            RawTextKind::Text
        };
        Some(RawNode::Text(RawText {
            kind,
            text,
            start: self.position(start),
        }))
    }

    fn children(&self, node: &Handle) -> Vec<RawNode<'_>> {
        child_handles(node)
            .iter()
            .filter_map(|child| self.node(child))
            .collect()
    }
}

impl Drop for RawTree<'_> {
    fn drop(&mut self) {
        tracing::trace!(
            elements = self.records.elements.len(),
            texts = self.records.texts.len(),
            "releasing raw tree"
        );
    }
}

/// Children in tree order. Template contents stand in for the children of
/// a `<template>`.
fn child_handles(node: &Handle) -> Vec<Handle> {
    if let NodeData::Element { template_contents, .. } = &node.data {
        if let Some(contents) = template_contents.borrow().as_ref() {
            return contents.children.borrow().clone();
        }
    }
    node.children.borrow().clone()
}

/// Source extent of every element, computed bottom-up with an explicit
/// stack so nesting depth is not bounded by the call stack.
fn compute_extents(root: &Handle, records: &SourceRecords) -> HashMap<NodeKey, usize> {
    struct Frame {
        node: Handle,
        children: std::vec::IntoIter<Handle>,
        children_end: Option<usize>,
    }

    impl Frame {
        fn new(node: Handle) -> Self {
            let children = child_handles(&node).into_iter();
            Self {
                node,
                children,
                children_end: None,
            }
        }
    }

    let mut extents = HashMap::new();
    let mut stack = vec![Frame::new(root.clone())];
    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.children.next() {
            stack.push(Frame::new(child));
            continue;
        }
        let Some(frame) = stack.pop() else {
            break;
        };
        let key = node_key(&frame.node);
        let end = match &frame.node.data {
            NodeData::Text { .. } => records.texts.get(&key).map(|text| text.end),
            NodeData::Element { .. } => {
                let own = records.elements.get(&key).and_then(|record| {
                    record
                        .end_tag
                        .as_ref()
                        .or(record.start_tag.as_ref())
                        .map(|range| range.end)
                });
                let extent = own.max(frame.children_end);
                if let Some(end) = extent {
                    extents.insert(key, end);
                }
                extent
            }
            _ => frame.children_end,
        };
        if let Some(parent) = stack.last_mut() {
            parent.children_end = parent.children_end.max(end);
        }
    }
    extents
}

/// One raw node, closed over the kinds that have a projection
pub enum RawNode<'t> {
    Document(RawDocument<'t>),
    Element(RawElement<'t>),
    Text(RawText),
    Comment(RawComment),
}

pub struct RawDocument<'t> {
    tree: &'t RawTree<'t>,
    node: Handle,
}

impl<'t> RawDocument<'t> {
    /// Doctype name, public and system identifiers
    pub fn doctype(&self) -> Option<(String, String, String)> {
        self.node.children.borrow().iter().find_map(|child| match &child.data {
            NodeData::Doctype {
                name,
                public_id,
                system_id,
            } => Some((name.to_string(), public_id.to_string(), system_id.to_string())),
            _ => None,
        })
    }

    pub fn children(&self) -> Vec<RawNode<'t>> {
        self.tree.children(&self.node)
    }
}

pub struct RawElement<'t> {
    tree: &'t RawTree<'t>,
    node: Handle,
    name: html5ever::QualName,
    attrs: Vec<html5ever::Attribute>,
}

/// Attribute with the positions of its name and value
#[derive(Debug, Clone)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
    pub name_start: RawPosition,
    pub name_end: RawPosition,
    pub value_start: RawPosition,
    pub value_end: RawPosition,
}

impl<'t> RawElement<'t> {
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    pub fn namespace(&self) -> &html5ever::Namespace {
        &self.name.ns
    }

    fn record(&self) -> Option<&'t ElementRecord> {
        self.tree.records.elements.get(&node_key(&self.node))
    }

    fn start_tag(&self) -> Option<Range<usize>> {
        self.record().and_then(|r| r.start_tag.clone())
    }

    /// Start tag as written, empty for synthetic elements
    pub fn original_tag(&self) -> &'t str {
        self.slice(self.start_tag())
    }

    /// End tag as written, empty when implied
    pub fn original_end_tag(&self) -> &'t str {
        self.slice(self.record().and_then(|r| r.end_tag.clone()))
    }

    fn slice(&self, range: Option<Range<usize>>) -> &'t str {
        range
            .and_then(|range| self.tree.source.get(range))
            .unwrap_or("")
    }

    /// Start and end positions; `None` for synthetic elements
    pub fn positions(&self) -> Option<(RawPosition, RawPosition)> {
        let record = self.record()?;
        let start_tag = record.start_tag.as_ref()?;
        let end = record
            .end_tag
            .as_ref()
            .map(|range| range.start)
            .or_else(|| self.tree.extents.get(&node_key(&self.node)).copied())
            .unwrap_or(start_tag.end);
        Some((self.tree.position(start_tag.start), self.tree.position(end)))
    }

    pub fn children(&self) -> Vec<RawNode<'t>> {
        self.tree.children(&self.node)
    }

    /// Attributes in declaration order, located in the source
    pub fn attributes(&self) -> Vec<RawAttribute> {
        let tree = self.tree;
        let key = node_key(&self.node);
        let start_tag = self.start_tag();
        let own_spans = start_tag
            .as_ref()
            .map(|range| (range.start, scan_attributes(&tree.source[range.clone()])))
            .unwrap_or_default();

        // Zero-width location for attributes with no source text
        let fallback = match &start_tag {
            Some(range) => range.start + tag_name_end(&tree.source[range.clone()]),
            None => self.record().map_or(0, |r| r.created_at),
        };

        self.attrs
            .iter()
            .map(|attr| {
                let name = attribute_name(&attr.name);
                let located = match tree.records.attribute_origins.get(&(key, name.clone())) {
                    Some(origin) => {
                        let spans = scan_attributes(&tree.source[origin.clone()]);
                        find_span(&spans, &name).map(|span| shift(span, origin.start))
                    }
                    None => find_span(&own_spans.1, &name).map(|span| shift(span, own_spans.0)),
                };
                let (name_range, value_range) = located.unwrap_or((fallback..fallback, fallback..fallback));
                RawAttribute {
                    name,
                    value: attr.value.to_string(),
                    name_start: tree.position(name_range.start),
                    name_end: tree.position(name_range.end),
                    value_start: tree.position(value_range.start),
                    value_end: tree.position(value_range.end),
                }
            })
            .collect()
    }
}

fn find_span<'s>(spans: &'s [(String, AttributeSpan)], name: &str) -> Option<&'s AttributeSpan> {
    spans
        .iter()
        .find(|(scanned, _)| scanned.eq_ignore_ascii_case(name))
        .map(|(_, span)| span)
}

fn shift(span: &AttributeSpan, base: usize) -> (Range<usize>, Range<usize>) {
    (
        base + span.name.start..base + span.name.end,
        base + span.value.start..base + span.value.end,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTextKind {
    Text,
    Whitespace,
    Cdata,
}

pub struct RawText {
    pub kind: RawTextKind,
    pub text: String,
    pub start: RawPosition,
}

pub struct RawComment {
    pub text: String,
}

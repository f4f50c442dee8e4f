//! Source span bookkeeping
//!
//! Shared between the token observer (which knows which token is being
//! processed and where it sits in the input) and the tree sink (which sees
//! the nodes the tree builder creates for it).

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

use html5ever::LocalName;
use markup5ever_rcdom::{Handle, Node, NodeData};

/// Identity of an engine node. Nodes are kept alive by the records that use
/// them as keys, so an address is never reused while the map exists.
pub(crate) type NodeKey = *const Node;

#[inline]
pub(crate) fn node_key(node: &Handle) -> NodeKey {
    Rc::as_ptr(node)
}

pub(crate) fn element_local_name(node: &Handle) -> Option<&LocalName> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    StartTag,
    EndTag,
    Characters,
    /// Comments and doctypes
    Markup,
    Eof,
    Error,
}

/// Byte range of the token being processed
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenSpan {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

pub(crate) struct ElementRecord {
    pub node: Handle,
    /// Creation order
    pub seq: usize,
    /// Start of the token being processed when the element was created
    pub created_at: usize,
    pub start_tag: Option<Range<usize>>,
    pub end_tag: Option<Range<usize>>,
}

pub(crate) struct TextRecord {
    /// Only held so the node's key is not reused
    pub _node: Handle,
    pub start: usize,
    pub end: usize,
}

pub(crate) struct RawDiagnostic {
    pub message: Cow<'static, str>,
    pub offset: usize,
}

/// Everything recorded during one parse
#[derive(Default)]
pub(crate) struct SourceRecords {
    pub elements: HashMap<NodeKey, ElementRecord>,
    pub texts: HashMap<NodeKey, TextRecord>,
    /// Attributes merged into an existing element from a later start tag
    pub attribute_origins: HashMap<(NodeKey, String), Range<usize>>,
    pub errors: Vec<RawDiagnostic>,
}

pub(crate) struct SourceTracker<'a> {
    source: &'a str,
    /// Bytes handed to the tokenizer so far
    fed: Cell<usize>,
    /// End of the previous token emission
    last_emit: Cell<usize>,
    current: Cell<Option<TokenSpan>>,
    in_run: Cell<bool>,
    run_start: Cell<usize>,
    run_end: Cell<usize>,
    /// Elements created while processing the current token
    created: RefCell<Vec<Handle>>,
    seq: Cell<usize>,
    records: RefCell<SourceRecords>,
}

impl<'a> SourceTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            fed: Cell::new(0),
            last_emit: Cell::new(0),
            current: Cell::new(None),
            in_run: Cell::new(false),
            run_start: Cell::new(0),
            run_end: Cell::new(0),
            created: RefCell::new(Vec::new()),
            seq: Cell::new(0),
            records: RefCell::new(SourceRecords::default()),
        }
    }

    #[inline]
    pub fn advance(&self, fed: usize) {
        self.fed.set(fed);
    }

    pub fn has_errors(&self) -> bool {
        !self.records.borrow().errors.is_empty()
    }

    /// Start processing a token emitted by the tokenizer.
    ///
    /// The input is fed one character at a time, so a token ends at the
    /// number of bytes fed so far and starts where the previous emission
    /// ended.
    pub fn begin_token(&self, kind: TokenKind) -> TokenSpan {
        let end = self.fed.get();
        let last = self.last_emit.get().min(end);
        let start = match kind {
            TokenKind::StartTag | TokenKind::EndTag | TokenKind::Markup => {
                self.markup_start(last, end)
            }
            TokenKind::Characters => last,
            TokenKind::Eof | TokenKind::Error => end,
        };
        let span = TokenSpan { kind, start, end };

        match kind {
            TokenKind::Characters => {
                if !self.in_run.get() {
                    self.run_start.set(start);
                    self.in_run.set(true);
                }
                self.run_end.set(end);
            }
            TokenKind::Error => {}
            _ => self.in_run.set(false),
        }
        if kind != TokenKind::Error {
            self.last_emit.set(end);
        }

        self.created.borrow_mut().clear();
        self.current.set(Some(span));
        span
    }

    /// Opening `<` of a markup token.
    ///
    /// Lookahead can leave the previous emission ending just past the `<`
    /// (character references, a stray `<` emitted as text), and a discarded
    /// byte order mark leaves it before.
    fn markup_start(&self, last: usize, end: usize) -> usize {
        let bytes = self.source.as_bytes();
        if bytes.get(last) == Some(&b'<') {
            return last;
        }
        if last > 0 && bytes.get(last - 1) == Some(&b'<') {
            return last - 1;
        }
        bytes
            .get(last..end)
            .and_then(|window| window.iter().position(|&b| b == b'<'))
            .map_or(last, |p| last + p)
    }

    /// Attribute the token's source to the nodes it produced
    pub fn finish_token(&self, span: TokenSpan, tag_name: Option<&LocalName>, closed: &[NodeKey]) {
        let created = std::mem::take(&mut *self.created.borrow_mut());
        self.current.set(None);

        let Some(tag_name) = tag_name else {
            return;
        };
        let mut records = self.records.borrow_mut();

        match span.kind {
            TokenKind::StartTag => {
                let own = created.iter().rev().find(|node| produced_by(node, tag_name));
                if let Some(record) = own.and_then(|node| records.elements.get_mut(&node_key(node))) {
                    record.start_tag = Some(span.range());
                }
            }
            TokenKind::EndTag => {
                let closed_by = |from_source: bool| {
                    closed
                        .iter()
                        .filter_map(|key| records.elements.get(key).map(|r| (*key, r)))
                        .filter(|(_, r)| {
                            r.start_tag.is_some() == from_source
                                && r.end_tag.is_none()
                                && produced_by(&r.node, tag_name)
                        })
                        .max_by_key(|(_, r)| r.seq)
                        .map(|(key, _)| key)
                };
                // Adoption agency clones are created during the end tag too,
                // so a closed element with a start tag wins over them.
                let target = closed_by(true)
                    .or_else(|| {
                        // An element made up on the spot for a stray end tag
                        created
                            .iter()
                            .rev()
                            .find(|node| produced_by(node, tag_name))
                            .map(node_key)
                    })
                    .or_else(|| closed_by(false))
                    .or_else(|| {
                        // The tree builder keeps these open past their end tags
                        if !matches!(&**tag_name, "html" | "head" | "body") {
                            return None;
                        }
                        records
                            .elements
                            .iter()
                            .filter(|(_, r)| {
                                r.start_tag.is_some()
                                    && r.end_tag.is_none()
                                    && produced_by(&r.node, tag_name)
                            })
                            .max_by_key(|(_, r)| r.seq)
                            .map(|(key, _)| *key)
                    });
                if let Some(record) = target.and_then(|key| records.elements.get_mut(&key)) {
                    record.end_tag = Some(span.range());
                }
            }
            _ => {}
        }
    }

    pub fn element_created(&self, node: &Handle) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        let created_at = self
            .current
            .get()
            .map_or(self.fed.get(), |span| span.start);

        self.created.borrow_mut().push(Rc::clone(node));
        self.records.borrow_mut().elements.insert(
            node_key(node),
            ElementRecord {
                node: Rc::clone(node),
                seq,
                created_at,
                start_tag: None,
                end_tag: None,
            },
        );
    }

    /// A text node was created or extended
    pub fn text_appended(&self, node: &Handle) {
        // Text inserted while handling a non-character token was buffered
        // by the tree builder (table text) and comes from the last run.
        let (start, end) = match self.current.get() {
            Some(span) if span.kind == TokenKind::Characters => (span.start, span.end),
            _ => (self.run_start.get(), self.run_end.get()),
        };
        self.records
            .borrow_mut()
            .texts
            .entry(node_key(node))
            .and_modify(|text| text.end = text.end.max(end))
            .or_insert_with(|| TextRecord {
                _node: Rc::clone(node),
                start,
                end,
            });
    }

    /// Attributes copied onto an existing element from the current start tag
    pub fn attributes_added(&self, node: &Handle, names: Vec<String>) {
        let Some(span) = self.current.get().filter(|s| s.kind == TokenKind::StartTag) else {
            return;
        };
        let key = node_key(node);
        let mut records = self.records.borrow_mut();
        for name in names {
            records.attribute_origins.insert((key, name), span.range());
        }
    }

    pub fn record_error(&self, message: Cow<'static, str>) {
        let offset = self.fed.get();
        self.records
            .borrow_mut()
            .errors
            .push(RawDiagnostic { message, offset });
    }

    /// Hand over everything recorded so far
    pub fn take_records(&self) -> SourceRecords {
        self.created.borrow_mut().clear();
        self.records.take()
    }
}

/// Whether an element is the one a tag token with this name produces.
/// Foreign elements get case-adjusted names (`foreignObject`), and the
/// tree builder turns `<image>` into `<img>`.
fn produced_by(node: &Handle, tag_name: &LocalName) -> bool {
    let Some(local) = element_local_name(node) else {
        return false;
    };
    local.eq_ignore_ascii_case(tag_name) || (&**tag_name == "image" && &**local == "img")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_spans_follow_feed() {
        let tracker = SourceTracker::new("ab<p>");
        tracker.advance(1);
        let a = tracker.begin_token(TokenKind::Characters);
        assert_eq!((a.start, a.end), (0, 1));
        tracker.advance(2);
        let b = tracker.begin_token(TokenKind::Characters);
        assert_eq!((b.start, b.end), (1, 2));
        tracker.advance(5);
        let p = tracker.begin_token(TokenKind::StartTag);
        assert_eq!((p.start, p.end), (2, 5));
    }

    #[test]
    fn test_markup_start_after_lookahead() {
        // "&amp<b>": the reference resolves only once '<' has been fed
        let tracker = SourceTracker::new("&amp<b>");
        tracker.advance(5);
        tracker.begin_token(TokenKind::Characters);
        tracker.advance(7);
        let tag = tracker.begin_token(TokenKind::StartTag);
        assert_eq!((tag.start, tag.end), (4, 7));
    }

    #[test]
    fn test_markup_start_after_bom() {
        let source = "\u{feff}<p>";
        let tracker = SourceTracker::new(source);
        tracker.advance(source.len());
        let tag = tracker.begin_token(TokenKind::StartTag);
        assert_eq!(tag.start, 3);
    }

    #[test]
    fn test_errors_do_not_move_emission_point() {
        let tracker = SourceTracker::new("<p>x");
        tracker.advance(3);
        tracker.begin_token(TokenKind::StartTag);
        tracker.advance(4);
        tracker.begin_token(TokenKind::Error);
        let text = tracker.begin_token(TokenKind::Characters);
        assert_eq!(text.start, 3);
    }

    #[test]
    fn test_record_error_uses_fed_offset() {
        let tracker = SourceTracker::new("<p></x>");
        assert!(!tracker.has_errors());
        tracker.advance(7);
        tracker.record_error(Cow::Borrowed("Unexpected end tag"));
        assert!(tracker.has_errors());
        let records = tracker.take_records();
        assert_eq!(records.errors[0].offset, 7);
        assert!(!tracker.has_errors());
    }
}

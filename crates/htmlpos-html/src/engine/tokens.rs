//! Token sink sitting between the tokenizer and the tree builder

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use html5ever::tokenizer::{TagKind, Token, TokenSink, TokenSinkResult};
use html5ever::tree_builder::{Tracer, TreeBuilder};
use html5ever::LocalName;
use markup5ever_rcdom::Handle;

use super::sink::TrackingSink;
use super::tracker::{NodeKey, SourceTracker, TokenKind, node_key};

pub(crate) struct TokenObserver<'a> {
    builder: TreeBuilder<Handle, TrackingSink<'a>>,
    tracker: Rc<SourceTracker<'a>>,
}

impl<'a> TokenObserver<'a> {
    pub fn new(builder: TreeBuilder<Handle, TrackingSink<'a>>, tracker: Rc<SourceTracker<'a>>) -> Self {
        Self { builder, tracker }
    }

    /// Every element the tree builder currently holds on to
    fn open_elements(&self) -> HashSet<NodeKey> {
        let collector = HandleCollector::default();
        self.builder.trace_handles(&collector);
        collector.seen.into_inner()
    }
}

#[derive(Default)]
struct HandleCollector {
    seen: RefCell<HashSet<NodeKey>>,
}

impl Tracer for HandleCollector {
    type Handle = Handle;

    fn trace_handle(&self, node: &Handle) {
        self.seen.borrow_mut().insert(node_key(node));
    }
}

fn classify(token: &Token) -> (TokenKind, Option<LocalName>) {
    match token {
        Token::TagToken(tag) => {
            let kind = match tag.kind {
                TagKind::StartTag => TokenKind::StartTag,
                TagKind::EndTag => TokenKind::EndTag,
            };
            (kind, Some(tag.name.clone()))
        }
        Token::CharacterTokens(_) | Token::NullCharacterToken => (TokenKind::Characters, None),
        Token::EOFToken => (TokenKind::Eof, None),
        Token::ParseError(_) => (TokenKind::Error, None),
        _ => (TokenKind::Markup, None),
    }
}

impl<'a> TokenSink for TokenObserver<'a> {
    type Handle = Handle;

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<Handle> {
        let (kind, tag_name) = classify(&token);
        let span = self.tracker.begin_token(kind);

        let before = (kind == TokenKind::EndTag).then(|| self.open_elements());
        let result = self.builder.process_token(token, line_number);

        let closed: Vec<NodeKey> = match before {
            Some(before) => {
                let after = self.open_elements();
                before.into_iter().filter(|key| !after.contains(key)).collect()
            }
            None => Vec::new(),
        };
        self.tracker.finish_token(span, tag_name.as_ref(), &closed);

        result
    }

    fn end(&self) {
        self.builder.end();
    }

    fn adjusted_current_node_present_but_not_in_html_namespace(&self) -> bool {
        self.builder
            .adjusted_current_node_present_but_not_in_html_namespace()
    }
}

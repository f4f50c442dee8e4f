//! html5ever binding
//!
//! html5ever builds the tree but keeps no source locations. The input is fed
//! to the tokenizer one character at a time; every token therefore ends at
//! the number of bytes fed so far, and a token observer placed in front of
//! the tree builder attributes each token's span to the nodes it produces.

mod attrs;
mod sink;
mod tokens;
mod tracker;
mod tree;

use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{BufferQueue, Tokenizer, TokenizerOpts};
use html5ever::tree_builder::{TreeBuilder, TreeBuilderOpts, TreeSink};
use html5ever::{QualName, TokenizerResult};
use markup5ever_rcdom::RcDom;

use crate::ParseOptions;

pub use tree::{RawAttribute, RawDocument, RawElement, RawNode, RawText, RawTextKind, RawTree};

#[cfg(test)]
pub(crate) use sink::TrackingSink;
#[cfg(test)]
pub(crate) use tracker::SourceTracker;

/// Qualified attribute name as written, e.g. `xlink:href`
pub(crate) fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

/// Run the engine over `source` and collect the tree with its source spans
pub fn parse_raw<'a>(source: &'a str, options: &ParseOptions) -> RawTree<'a> {
    let tracker = Rc::new(tracker::SourceTracker::new(source));
    let sink = sink::TrackingSink::new(RcDom::default(), Rc::clone(&tracker));
    let document = sink.get_document();

    let builder = TreeBuilder::new(sink, TreeBuilderOpts::default());
    let observer = tokens::TokenObserver::new(builder, Rc::clone(&tracker));
    let tokenizer = Tokenizer::new(observer, TokenizerOpts::default());

    let input = BufferQueue::default();
    for (offset, ch) in source.char_indices() {
        tracker.advance(offset + ch.len_utf8());
        input.push_back(StrTendril::from_char(ch));
        // Script results only pause the tokenizer, keep draining
        loop {
            match tokenizer.feed(&input) {
                TokenizerResult::Done => break,
                _ if input.is_empty() => break,
                _ => {}
            }
        }

        if options.stop_on_first_error && tracker.has_errors() {
            tracing::debug!(offset, "stopping at first parse error");
            break;
        }
    }
    tokenizer.end();
    drop(tokenizer);

    RawTree::new(source, options.tab_stop, document, tracker.take_records())
}

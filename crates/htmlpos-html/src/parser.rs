//! Parse adapter
//!
//! Runs the engine with the caller's options, projects the raw tree and
//! releases it before returning.

use htmlpos_dom::{Document, SourcePosition};
use serde::Serialize;

use crate::engine::{self, RawTree};
use crate::position::encode_position;
use crate::projector::project_document;
use crate::{ParseOptions, Result};

/// Result of one parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub document: Document,

    /// Engine diagnostics, only present when `collect_errors` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ParseDiagnostic>>,
}

/// Parse error reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub message: String,
    pub position: SourcePosition,
}

/// HTML5 parser producing position-annotated trees
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse HTML text into a document
    pub fn parse(&self, html: &str) -> Result<ParseOutput> {
        tracing::debug!(
            bytes = html.len(),
            tab_stop = self.options.tab_stop,
            stop_on_first_error = self.options.stop_on_first_error,
            "parsing HTML document"
        );
        self.project(engine::parse_raw(html, &self.options))
    }

    /// Parse raw bytes. Anything that is not UTF-8 text is rejected before
    /// the engine runs.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseOutput> {
        let html = std::str::from_utf8(bytes)?;
        self.parse(html)
    }

    /// Consumes the raw tree, so it is released on success and failure alike
    fn project(&self, tree: RawTree<'_>) -> Result<ParseOutput> {
        let diagnostics: Vec<ParseDiagnostic> = tree
            .diagnostics()
            .map(|(message, position)| ParseDiagnostic {
                message: message.to_string(),
                position: encode_position(position),
            })
            .collect();
        for diagnostic in &diagnostics {
            tracing::debug!(
                line = diagnostic.position.line,
                column = diagnostic.position.column,
                "{}",
                diagnostic.message
            );
        }

        let document = project_document(&tree.document())?;
        tracing::debug!(elements = document.elements().count(), "projected document");

        Ok(ParseOutput {
            document,
            errors: self.options.collect_errors.then_some(diagnostics),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectionError;
    use crate::engine::{SourceTracker, TrackingSink};
    use html5ever::tree_builder::{ElementFlags, NodeOrText, TreeSink};
    use html5ever::{LocalName, QualName, ns};
    use markup5ever_rcdom::RcDom;
    use std::rc::Rc;

    #[test]
    fn test_parse_simple() {
        let parser = HtmlParser::new();
        let output = parser.parse("<html><body><p>Hello</p></body></html>").unwrap();
        assert!(output.errors.is_none());
        let p = output.document.find_element("p").unwrap();
        assert_eq!(p.child_nodes[0].text_content(), "Hello");
    }

    #[test]
    fn test_errors_collected_on_request() {
        let parser = HtmlParser::with_options(ParseOptions::new().with_collect_errors(true));
        let output = parser.parse("<p>a</span>").unwrap();
        let errors = output.errors.unwrap();
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| e.position.line == 1));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = HtmlParser::new().parse_bytes(&[b'<', b'p', b'>', 0xff]).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput(_)));
    }

    #[test]
    fn test_unknown_namespace_releases_tree() {
        let tracker = Rc::new(SourceTracker::new(""));
        let sink = TrackingSink::new(RcDom::default(), Rc::clone(&tracker));
        let document = sink.get_document();
        let foreign = sink.create_element(
            QualName::new(None, ns!(xlink), LocalName::from("foo")),
            Vec::new(),
            ElementFlags::default(),
        );
        sink.append(&document, NodeOrText::AppendNode(foreign));
        drop(sink);

        let tree = RawTree::new("", 8, document, tracker.take_records());
        let released = Rc::downgrade(&tree.document_handle());

        let err = HtmlParser::new().project(tree).unwrap_err();
        match err {
            ProjectionError::UnknownNamespace { namespace } => {
                assert_eq!(namespace, "http://www.w3.org/1999/xlink");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(released.upgrade().is_none());
    }
}

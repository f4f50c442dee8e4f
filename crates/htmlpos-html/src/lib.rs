//! htmlpos HTML - Position-annotated HTML5 parsing
//!
//! Parses HTML with html5ever and projects the result onto the
//! `htmlpos-dom` tree. Elements, attributes and text runs carry the line,
//! column and byte offset of the source text they came from.
//!
//! ```no_run
//! use htmlpos_html::{ParseOptions, parse};
//!
//! let output = parse("<p class=\"x\">hi</p>", &ParseOptions::default())?;
//! let p = output.document.find_element("p").unwrap();
//! assert_eq!(p.start_pos.unwrap().offset, 0);
//! # Ok::<(), htmlpos_html::ProjectionError>(())
//! ```

mod engine;
mod error;
mod namespace;
mod options;
mod parser;
mod position;
mod projector;
mod tags;

pub use error::{ProjectionError, Result};
pub use namespace::resolve_namespace;
pub use options::ParseOptions;
pub use parser::{HtmlParser, ParseDiagnostic, ParseOutput};
pub use position::{LineIndex, RawPosition, encode_position};
pub use tags::{canonical_tag_name, tag_from_original_text};

pub use htmlpos_dom as dom;

/// Parse an HTML string into a position-annotated document
pub fn parse(html: &str, options: &ParseOptions) -> Result<ParseOutput> {
    HtmlParser::with_options(options.clone()).parse(html)
}

/// Parse a byte buffer that must hold UTF-8 text
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<ParseOutput> {
    HtmlParser::with_options(options.clone()).parse_bytes(bytes)
}

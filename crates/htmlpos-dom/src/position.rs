//! Source positions

use serde::Serialize;

/// A point in the original input.
///
/// `line` and `column` are 1-based, `offset` is a 0-based byte offset.
/// Columns count Unicode scalar values with tabs expanded to the configured
/// tab stop, so two positions on the same line can have a column distance
/// that differs from their offset distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

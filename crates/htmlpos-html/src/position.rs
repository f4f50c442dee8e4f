//! Line/column computation and position encoding

use htmlpos_dom::SourcePosition;

/// Position triple as produced by the engine binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Convert a raw position into its output form.
///
/// Every recorded location goes through here: element tags, attribute
/// boundaries and text starts all share one representation.
#[inline]
pub fn encode_position(raw: RawPosition) -> SourcePosition {
    SourcePosition::new(raw.line, raw.column, raw.offset)
}

/// Byte offset to `(line, column)` lookup over one input buffer.
///
/// Line starts are indexed once; a lookup is a binary search for the line
/// followed by a walk from the line start to expand tabs.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
    tab_stop: usize,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str, tab_stop: usize) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'\n' => line_starts.push(i + 1),
                // A CR on its own is a line break, CRLF breaks at the LF
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push(i + 1),
                _ => {}
            }
        }
        Self {
            source,
            line_starts,
            tab_stop: tab_stop.max(1),
        }
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end clamp to the end,
    /// offsets inside a multi-byte character snap back to its first byte.
    pub fn position(&self, offset: usize) -> RawPosition {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line];

        let mut column = 1;
        for ch in self.source[line_start..offset].chars() {
            column = match ch {
                '\t' => ((column - 1) / self.tab_stop + 1) * self.tab_stop + 1,
                '\r' => column,
                _ => column + 1,
            };
        }

        RawPosition {
            line: line + 1,
            column,
            offset,
        }
    }
}

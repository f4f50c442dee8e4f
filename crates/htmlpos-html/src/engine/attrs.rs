//! Attribute spans inside a start tag
//!
//! The engine hands us decoded attribute names and values but not where they
//! were written. The start tag text is already known, so the spans are
//! recovered by walking it with the tokenizer's attribute rules.

use std::ops::Range;

/// Byte ranges of one attribute, relative to the start of the tag text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeSpan {
    pub name: Range<usize>,
    /// Excludes quotes. Empty and located at `name.end` when there is no value.
    pub value: Range<usize>,
}

/// Scan a start tag such as `<a href="x" hidden>`.
///
/// Returns spans in declaration order. A repeated name (ASCII
/// case-insensitive) is skipped after its first occurrence, as the engine
/// drops duplicates.
pub(crate) fn scan_attributes(tag: &str) -> Vec<(String, AttributeSpan)> {
    let bytes = tag.as_bytes();
    let len = bytes.len();
    let mut spans: Vec<(String, AttributeSpan)> = Vec::new();

    if bytes.first() != Some(&b'<') {
        return spans;
    }

    // Tag name
    let mut i = 1;
    while i < len && !is_space(bytes[i]) && bytes[i] != b'/' && bytes[i] != b'>' {
        i += 1;
    }

    loop {
        while i < len && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            break;
        }

        // A leading '=' belongs to the name
        let name_start = i;
        i += 1;
        while i < len && !is_space(bytes[i]) && !matches!(bytes[i], b'/' | b'>' | b'=') {
            i += 1;
        }
        let name_end = i;

        let mut j = i;
        while j < len && is_space(bytes[j]) {
            j += 1;
        }

        let value = if j < len && bytes[j] == b'=' {
            j += 1;
            while j < len && is_space(bytes[j]) {
                j += 1;
            }
            match bytes.get(j) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let start = j + 1;
                    let end = bytes[start..]
                        .iter()
                        .position(|&b| b == quote)
                        .map_or(len, |p| start + p);
                    i = (end + 1).min(len);
                    start..end
                }
                _ => {
                    let start = j;
                    while j < len && !is_space(bytes[j]) && bytes[j] != b'>' {
                        j += 1;
                    }
                    i = j;
                    start..j
                }
            }
        } else {
            name_end..name_end
        };

        let name = tag[name_start..name_end].to_ascii_lowercase();
        if !spans.iter().any(|(seen, _)| *seen == name) {
            spans.push((
                name,
                AttributeSpan {
                    name: name_start..name_end,
                    value,
                },
            ));
        }
    }

    spans
}

/// Byte length of the tag name, counted from the `<`
pub(crate) fn tag_name_end(tag: &str) -> usize {
    tag.bytes()
        .skip(1)
        .position(|b| is_space(b) || b == b'/' || b == b'>')
        .map_or(tag.len(), |p| p + 1)
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(tag: &str) -> Vec<(String, &str, &str)> {
        scan_attributes(tag)
            .into_iter()
            .map(|(name, span)| (name, &tag[span.name], &tag[span.value]))
            .collect()
    }

    #[test]
    fn test_quoted_values() {
        let tag = r#"<div id="main" class='a b'>"#;
        assert_eq!(
            spans(tag),
            [
                ("id".to_string(), "id", "main"),
                ("class".to_string(), "class", "a b"),
            ]
        );
    }

    #[test]
    fn test_unquoted_and_bare() {
        let tag = "<input type=text disabled value = x>";
        assert_eq!(
            spans(tag),
            [
                ("type".to_string(), "type", "text"),
                ("disabled".to_string(), "disabled", ""),
                ("value".to_string(), "value", "x"),
            ]
        );
        let (_, disabled) = &scan_attributes(tag)[1];
        assert_eq!(disabled.value, disabled.name.end..disabled.name.end);
    }

    #[test]
    fn test_self_closing() {
        let tag = r#"<circle r="4"/>"#;
        assert_eq!(spans(tag), [("r".to_string(), "r", "4")]);
        assert!(scan_attributes("<br/>").is_empty());
        assert!(scan_attributes("<br />").is_empty());
    }

    #[test]
    fn test_markup_inside_values() {
        let tag = r#"<a title="x > y" data-a='<b>'>"#;
        assert_eq!(
            spans(tag),
            [
                ("title".to_string(), "title", "x > y"),
                ("data-a".to_string(), "data-a", "<b>"),
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first() {
        let tag = r#"<p id="a" ID="b">"#;
        assert_eq!(spans(tag), [("id".to_string(), "id", "a")]);
    }

    #[test]
    fn test_names_keep_case_in_span() {
        let tag = r##"<svg viewBox="0 0 1 1" xlink:href="#x">"##;
        assert_eq!(
            spans(tag),
            [
                ("viewbox".to_string(), "viewBox", "0 0 1 1"),
                ("xlink:href".to_string(), "xlink:href", "#x"),
            ]
        );
    }

    #[test]
    fn test_tag_name_end() {
        assert_eq!(tag_name_end("<p>"), 2);
        assert_eq!(tag_name_end("<my-widget foo>"), 10);
        assert_eq!(tag_name_end("<br/>"), 3);
        assert_eq!(tag_name_end("<x"), 2);
    }
}

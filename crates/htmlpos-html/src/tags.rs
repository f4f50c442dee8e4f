//! Canonical tag table and custom tag names

/// Tag names the engine knows by name, sorted for binary search.
///
/// HTML elements (current and obsolete) plus the SVG and MathML elements
/// that take part in tree construction. Everything else is a custom or
/// unknown element and gets its name from the source text.
static TAG_NAMES: &[&str] = &[
    "a",
    "abbr",
    "acronym",
    "address",
    "annotation-xml",
    "applet",
    "area",
    "article",
    "aside",
    "audio",
    "b",
    "base",
    "basefont",
    "bdi",
    "bdo",
    "bgsound",
    "big",
    "blink",
    "blockquote",
    "body",
    "br",
    "button",
    "canvas",
    "caption",
    "center",
    "cite",
    "code",
    "col",
    "colgroup",
    "data",
    "datalist",
    "dd",
    "del",
    "desc",
    "details",
    "dfn",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "em",
    "embed",
    "fieldset",
    "figcaption",
    "figure",
    "font",
    "footer",
    "foreignobject",
    "form",
    "frame",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hgroup",
    "hr",
    "html",
    "i",
    "iframe",
    "image",
    "img",
    "input",
    "ins",
    "isindex",
    "kbd",
    "keygen",
    "label",
    "legend",
    "li",
    "link",
    "listing",
    "main",
    "malignmark",
    "map",
    "mark",
    "marquee",
    "math",
    "menu",
    "menuitem",
    "meta",
    "meter",
    "mglyph",
    "mi",
    "mn",
    "mo",
    "ms",
    "mtext",
    "multicol",
    "nav",
    "nextid",
    "nobr",
    "noembed",
    "noframes",
    "noscript",
    "object",
    "ol",
    "optgroup",
    "option",
    "output",
    "p",
    "param",
    "picture",
    "plaintext",
    "pre",
    "progress",
    "q",
    "rb",
    "rp",
    "rt",
    "rtc",
    "ruby",
    "s",
    "samp",
    "script",
    "search",
    "section",
    "select",
    "slot",
    "small",
    "source",
    "spacer",
    "span",
    "strike",
    "strong",
    "style",
    "sub",
    "summary",
    "sup",
    "svg",
    "table",
    "tbody",
    "td",
    "template",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "time",
    "title",
    "tr",
    "track",
    "tt",
    "u",
    "ul",
    "var",
    "video",
    "wbr",
    "xmp",
];

/// Canonical (lowercase) name for a known tag, `None` for custom elements
pub fn canonical_tag_name(name: &str) -> Option<&'static str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        let lower = name.to_ascii_lowercase();
        lookup(&lower)
    } else {
        lookup(name)
    }
}

fn lookup(lower: &str) -> Option<&'static str> {
    TAG_NAMES
        .binary_search(&lower)
        .ok()
        .map(|idx| TAG_NAMES[idx])
}

/// Bare tag name token of a raw tag, e.g. `"my-widget"` for
/// `<my-widget foo="bar">`.
///
/// Takes everything after `<` (or `</`) up to the first whitespace, `/` or
/// `>`. The token is passed through with its original case and is not
/// validated.
pub fn tag_from_original_text(original: &str) -> &str {
    let Some(rest) = original
        .strip_prefix("</")
        .or_else(|| original.strip_prefix('<'))
    else {
        return "";
    };
    let end = rest
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    &rest[..end]
}

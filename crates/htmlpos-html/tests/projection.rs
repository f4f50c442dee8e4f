//! Projection tests for htmlpos-html
//!
//! Tree shape, naming, namespaces and node kinds of the projected output.

use htmlpos_html::dom::{Namespace, NodeType, OutputNode, TextKind};
use htmlpos_html::{ParseOptions, ProjectionError, parse, parse_bytes};

fn parse_default(html: &str) -> htmlpos_html::ParseOutput {
    parse(html, &ParseOptions::default()).unwrap()
}

/// Source text of a subtree made of elements and text only
fn reconstruct(node: &OutputNode) -> String {
    match node {
        OutputNode::Element(element) => {
            let mut out = element.original_tag.clone();
            for child in &element.child_nodes {
                out.push_str(&reconstruct(child));
            }
            out.push_str(&element.original_end_tag);
            out
        }
        OutputNode::Text(text) => text.text_content.clone(),
        _ => String::new(),
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[test]
fn test_document_without_doctype() {
    let doc = parse_default("<p>x</p>").document;
    assert_eq!(doc.node_type(), NodeType::Document);
    assert_eq!(doc.node_type().code(), 9);
    assert!(!doc.has_doctype);
    assert_eq!(doc.name, "");
    assert_eq!(doc.public_identifier, "");
    assert_eq!(doc.system_identifier, "");
}

#[test]
fn test_document_with_doctype() {
    let html = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><p>x</p>"#;
    let doc = parse_default(html).document;
    assert!(doc.has_doctype);
    assert_eq!(doc.name, "html");
    assert_eq!(doc.public_identifier, "-//W3C//DTD HTML 4.01//EN");
    assert_eq!(doc.system_identifier, "http://www.w3.org/TR/html4/strict.dtd");
    // The doctype is not a child node
    assert!(doc.child_nodes.iter().all(|n| n.node_type() != NodeType::Document));
    assert_eq!(doc.document_element().unwrap().tag_name, "html");
}

#[test]
fn test_empty_input() {
    let doc = parse_default("").document;
    let html = doc.document_element().unwrap();
    assert!(html.is_synthetic());
    let names: Vec<_> = html.child_elements().map(|e| e.tag_name.as_str()).collect();
    assert_eq!(names, ["head", "body"]);
}

// ============================================================================
// ELEMENTS
// ============================================================================

#[test]
fn test_custom_element_name() {
    let doc = parse_default("<my-widget></my-widget>").document;
    let widget = doc.find_element("my-widget").unwrap();
    assert_eq!(widget.tag_name, "my-widget");
    assert_eq!(widget.node_name(), "my-widget");
    assert_eq!(widget.original_tag, "<my-widget>");
    assert_eq!(widget.original_end_tag, "</my-widget>");
    assert_eq!(widget.namespace, Namespace::Html);
}

#[test]
fn test_custom_element_with_attributes() {
    let doc = parse_default(r#"<x-card size="2"/>"#).document;
    let card = doc.find_element("x-card").unwrap();
    assert_eq!(card.original_tag, r#"<x-card size="2"/>"#);
    assert_eq!(card.get_attribute("size"), Some("2"));
}

#[test]
fn test_svg_namespace() {
    let doc = parse_default(r#"<svg viewBox="0 0 10 10"><rect/><foreignObject><p>x</p></foreignObject></svg>"#).document;
    let svg = doc.find_element("svg").unwrap();
    assert_eq!(svg.namespace, Namespace::Svg);
    assert_eq!(svg.namespace.label(), "SVG");
    assert_eq!(doc.find_element("rect").unwrap().namespace, Namespace::Svg);
    assert_eq!(doc.find_element("foreignobject").unwrap().namespace, Namespace::Svg);
    assert_eq!(doc.find_element("p").unwrap().namespace, Namespace::Html);
}

#[test]
fn test_mathml_namespace() {
    let doc = parse_default("<math><mi>x</mi></math>").document;
    assert_eq!(doc.find_element("math").unwrap().namespace, Namespace::MathMl);
    assert_eq!(doc.find_element("mi").unwrap().namespace, Namespace::MathMl);
}

#[test]
fn test_template_contents_are_children() {
    let doc = parse_default("<template><p>x</p></template>").document;
    let template = doc.find_element("template").unwrap();
    let p = template.child_elements().next().unwrap();
    assert_eq!(p.tag_name, "p");
    assert_eq!(p.original_tag, "<p>");
}

#[test]
fn test_round_trip_substring() {
    let html = "<div><p>a<b>b</b></p>c</div>";
    let doc = parse_default(html).document;
    let body = doc.find_element("body").unwrap();
    let div = &body.child_nodes[0];
    let text = reconstruct(div);
    assert_eq!(text, html);

    let input = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>\n";
    let doc = parse_default(input).document;
    let ul = doc.find_element("ul").unwrap();
    let text = reconstruct(&OutputNode::Element(ul.clone()));
    let start = ul.start_pos.unwrap().offset;
    assert_eq!(&input[start..start + text.len()], text);
}

#[test]
fn test_implied_end_tags_are_empty() {
    let doc = parse_default("<ul><li>one<li>two</ul>").document;
    let items: Vec<_> = doc.elements().filter(|e| e.tag_name == "li").collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].original_tag, "<li>");
    assert_eq!(items[0].original_end_tag, "");
    assert_eq!(doc.find_element("ul").unwrap().original_end_tag, "</ul>");
}

// ============================================================================
// TEXT AND COMMENTS
// ============================================================================

#[test]
fn test_comment() {
    let doc = parse_default("<!-- hi -->").document;
    let comment = doc.child_nodes[0].as_comment().unwrap();
    assert_eq!(doc.child_nodes[0].node_type().code(), 8);
    assert_eq!(doc.child_nodes[0].node_name(), "#comment");
    assert_eq!(comment.text_content, " hi ");
    assert_eq!(comment.node_value(), " hi ");
}

#[test]
fn test_text_content_is_decoded() {
    let doc = parse_default("<p>a&amp;b</p>").document;
    let p = doc.find_element("p").unwrap();
    let text = p.child_nodes[0].as_text().unwrap();
    assert_eq!(text.text_content, "a&b");
    assert_eq!(text.kind, TextKind::Text);
    assert_eq!(text.start_pos.offset, 3);
}

#[test]
fn test_cdata_section() {
    let doc = parse_default("<svg><![CDATA[a<b]]></svg>").document;
    let svg = doc.find_element("svg").unwrap();
    let text = svg.child_nodes[0].as_text().unwrap();
    assert_eq!(text.node_name(), "#cdata-section");
    assert_eq!(text.text_content, "a<b");
    assert_eq!(text.start_pos.offset, 5);
}

#[test]
fn test_foster_parented_text() {
    let doc = parse_default("<table>x<tr><td>y</td></tr></table>").document;
    let body = doc.find_element("body").unwrap();
    let text = body.child_nodes[0].as_text().unwrap();
    assert_eq!(text.text_content, "x");
    assert_eq!(text.start_pos.offset, 7);
    assert_eq!(body.child_nodes[1].node_name(), "table");
}

// ============================================================================
// OPTIONS AND ERRORS
// ============================================================================

#[test]
fn test_idempotent() {
    let html = "<!DOCTYPE html>\n<div id=a>\n\t<p>one<p>two</div><!-- c -->";
    let options = ParseOptions::default().with_tab_stop(4);
    let first = parse(html, &options).unwrap();
    let second = parse(html, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_stop_on_first_error() {
    let html = "<!DOCTYPE html><p>one</p></span><p>two</p>";

    let full = parse(html, &ParseOptions::default()).unwrap().document;
    assert_eq!(full.elements().filter(|e| e.tag_name == "p").count(), 2);

    let options = ParseOptions::default().with_stop_on_first_error(true);
    let partial = parse(html, &options).unwrap().document;
    assert_eq!(partial.elements().filter(|e| e.tag_name == "p").count(), 1);
}

#[test]
fn test_errors_omitted_by_default() {
    let output = parse_default("<p></span>");
    assert!(output.errors.is_none());
    let json = serde_json::to_value(&output).unwrap();
    assert!(json.get("errors").is_none());
}

#[test]
fn test_errors_collected() {
    let options = ParseOptions::default().with_collect_errors(true);
    let output = parse("<!DOCTYPE html><p>one</p></span>", &options).unwrap();
    let errors = output.errors.unwrap();
    assert!(!errors.is_empty());
    // Reported once the whole end tag has been read
    assert_eq!(errors[0].position.offset, 32);

    let clean = parse("<!DOCTYPE html><p>one</p>", &options).unwrap();
    assert_eq!(clean.errors, Some(Vec::new()));
}

#[test]
fn test_invalid_utf8() {
    let err = parse_bytes(b"<p>\xff\xfe</p>", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ProjectionError::InvalidInput(_)));
    assert!(err.to_string().starts_with("The input needs to be a UTF-8 string"));

    let output = parse_bytes(b"<p>ok</p>", &ParseOptions::default()).unwrap();
    assert!(output.document.find_element("p").is_some());
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_json_field_names() {
    let output = parse_default("<!-- c --><div class=\"x\">t</div>");
    let json = serde_json::to_value(&output).unwrap();
    let doc = &json["document"];
    assert_eq!(doc["nodeType"], 9);
    assert_eq!(doc["nodeName"], "#document");
    assert_eq!(doc["hasDoctype"], false);

    let comment = &doc["childNodes"][0];
    assert_eq!(comment["nodeType"], 8);
    assert_eq!(comment["textContent"], " c ");
    assert_eq!(comment["nodeValue"], " c ");
    assert!(comment.get("startPos").is_none());

    let html = &doc["childNodes"][1];
    assert_eq!(html["tagName"], "html");
    assert_eq!(html["tagNamespace"], "HTML");
    assert_eq!(html["originalTag"], "");
    assert!(html.get("startPos").is_none());
    assert!(html.get("endPos").is_none());

    let body = &html["childNodes"][1];
    let div = &body["childNodes"][0];
    assert_eq!(div["nodeType"], 1);
    assert_eq!(div["nodeName"], "div");
    assert_eq!(div["startPos"]["offset"], 10);
    assert_eq!(div["attributes"][0]["nodeType"], 2);
    assert_eq!(div["attributes"][0]["name"], "class");
    assert_eq!(div["childNodes"][0]["nodeName"], "#text");
    assert_eq!(div["childNodes"][0]["nodeType"], 3);
}

//! Markup serialization: the `innerHTML` getter for arena subtrees.

use super::dom::{Document, NodeId, NodeKind};

/// Serialize the children of `id` back to markup.
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for i in 0..doc.get(id).children.len() {
        let child = doc.get(id).children[i];
        serialize_node(doc, child, &mut out);
    }
    out
}

fn serialize_node(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.get(id).kind {
        NodeKind::Document => {
            for &child in &doc.get(id).children {
                serialize_node(doc, child, out);
            }
        },
        NodeKind::Text(text) => {
            // Raw-text parents (`script`, `style`) keep their content
            // verbatim; everywhere else text is escaped.
            let raw_parent = doc
                .get(id)
                .parent
                .and_then(|p| doc.element(p))
                .is_some_and(|e| e.tag.is_raw_text());
            if raw_parent {
                out.push_str(text);
            } else {
                push_escaped_text(out, text);
            }
        },
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        },
        NodeKind::Element(elem) => {
            out.push('<');
            out.push_str(elem.tag.as_str());
            for attr in &elem.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                if !attr.value.is_empty() {
                    out.push_str("=\"");
                    push_escaped_attr(out, &attr.value);
                    out.push('"');
                }
            }
            out.push('>');
            if elem.tag.is_void() {
                return;
            }
            for i in 0..doc.get(id).children.len() {
                let child = doc.get(id).children[i];
                serialize_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(elem.tag.as_str());
            out.push('>');
        },
    }
}

/// Escape text content (`&`, `<`, `>`).
fn push_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value (`&`, `"`).
fn push_escaped_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

//! HTML pipeline: tokenizer, tree builder, arena DOM, serializer.

pub mod dom;
pub mod serialize;
pub mod tokenizer;
pub mod tree_builder;

use self::dom::{Document, NodeId};

/// Parse a complete HTML document.
pub fn parse_document(input: &str) -> Document {
    tree_builder::TreeBuilder::parse_document(input)
}

/// Serialize the children of `id` back to markup (`innerHTML` getter).
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    serialize::inner_html(doc, id)
}

/// Replace the children of `id` with nodes parsed from `markup`
/// (`innerHTML` setter). Scripts in the markup become inert raw-text
/// nodes; nothing is executed.
pub fn set_inner_html(doc: &mut Document, id: NodeId, markup: &str) {
    doc.detach_children(id);
    tree_builder::TreeBuilder::parse_into(doc, id, markup);
}

//! HTML tree builder.
//!
//! Consumes a token stream and constructs an arena-based DOM tree using a
//! plain open-element stack: unmatched end tags are ignored, elements left
//! open at EOF are closed implicitly. There is no implicit `<html>` /
//! `<head>` / `<body>` synthesis, so the same builder parses full
//! documents and markup fragments.

use super::dom::{Attribute as DomAttribute, Document, ElementData, NodeId, NodeKind, TagName};
use super::tokenizer::{StartTagToken, Token, Tokenizer};

/// Builds DOM subtrees from a token stream.
pub struct TreeBuilder<'a> {
    doc: &'a mut Document,
    /// Stack of open element node IDs; the bottom entry is the parse root.
    open: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    /// Parse a complete document.
    pub fn parse_document(input: &str) -> Document {
        let mut doc = Document::new();
        let root = doc.root;
        TreeBuilder::parse_into(&mut doc, root, input);
        doc
    }

    /// Parse `input` as a fragment, appending the resulting nodes as
    /// children of `parent` in an existing document.
    pub fn parse_into(doc: &'a mut Document, parent: NodeId, input: &str) {
        let tokens = Tokenizer::new(input).tokenize();
        let mut builder = TreeBuilder {
            doc,
            open: vec![parent],
        };
        for token in tokens {
            builder.process_token(token);
        }
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::StartTag(tag) => self.insert_element(tag),
            Token::EndTag(tag) => self.close_element(&TagName::from_str(&tag.name)),
            Token::Character(text) => self.insert_text(text),
            Token::Comment(text) => {
                let id = self.doc.add_node(NodeKind::Comment(text));
                self.doc.append_child(self.current(), id);
            },
            Token::Eof => {},
        }
    }

    fn insert_element(&mut self, tag: StartTagToken) {
        let name = TagName::from_str(&tag.name);
        let mut data = ElementData::new(name.clone());
        for attr in tag.attributes {
            // First occurrence wins for duplicate attribute names.
            if data.get_attribute(&attr.name).is_none() {
                data.attributes.push(DomAttribute {
                    name: attr.name,
                    value: attr.value,
                });
            }
        }

        let id = self.doc.add_node(NodeKind::Element(data));
        self.doc.append_child(self.current(), id);

        if !name.is_void() && !tag.self_closing {
            self.open.push(id);
        }
    }

    /// Pop the open stack down to (and including) the nearest element
    /// with the given tag. An end tag with no open counterpart is
    /// ignored, leaving the stack untouched.
    fn close_element(&mut self, tag: &TagName) {
        let matching = self.open[1..]
            .iter()
            .rposition(|&id| self.doc.element(id).is_some_and(|e| e.tag == *tag));
        if let Some(index) = matching {
            self.open.truncate(index + 1);
        }
    }

    fn insert_text(&mut self, text: String) {
        let parent = self.current();
        // Merge with a preceding text sibling so `text_content` and the
        // serializer see one run.
        if let Some(&last) = self.doc.get(parent).children.last()
            && let NodeKind::Text(existing) = &mut self.doc.nodes[last].kind
        {
            existing.push_str(&text);
            return;
        }
        let id = self.doc.add_node(NodeKind::Text(text));
        self.doc.append_child(parent, id);
    }

    fn current(&self) -> NodeId {
        *self.open.last().expect("open stack never empty")
    }
}

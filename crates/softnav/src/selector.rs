//! Minimal CSS-style selector matching.
//!
//! Supports exactly the grammar the page contract uses: a compound of an
//! optional tag name plus class names (`main`, `.header-nav`,
//! `a.nav-link`), and the descendant combinator (`.header-nav a`). The
//! selector strings stay configuration; matching operates on resolved
//! node ids.

use crate::html::dom::{Document, ElementData, NodeId, TagName};

/// One compound selector: optional tag name plus required classes.
#[derive(Debug, Clone, PartialEq)]
struct Compound {
    tag: Option<TagName>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Option<Compound> {
        let mut tag = None;
        let mut classes = Vec::new();
        for (i, part) in s.split('.').enumerate() {
            if i == 0 {
                if !part.is_empty() {
                    tag = Some(TagName::from_str(&part.to_ascii_lowercase()));
                }
            } else if part.is_empty() {
                return None;
            } else {
                classes.push(part.to_string());
            }
        }
        if tag.is_none() && classes.is_empty() {
            return None;
        }
        Some(Compound { tag, classes })
    }

    fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag
            && elem.tag != *tag
        {
            return false;
        }
        self.classes.iter().all(|c| elem.has_class(c))
    }
}

/// A parsed selector: compounds joined by descendant combinators,
/// rightmost compound last.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string. Returns `None` for anything outside the
    /// supported grammar (including the empty string).
    pub fn parse(s: &str) -> Option<Selector> {
        let compounds: Option<Vec<Compound>> =
            s.split_ascii_whitespace().map(Compound::parse).collect();
        let compounds = compounds?;
        if compounds.is_empty() {
            return None;
        }
        Some(Selector { compounds })
    }

    /// Whether the element at `id` matches: the rightmost compound must
    /// match the element itself, each remaining compound some strict
    /// ancestor, in order.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(elem) = doc.element(id) else {
            return false;
        };
        let (last, rest) = self.compounds.split_last().expect("nonempty compounds");
        if !last.matches(elem) {
            return false;
        }

        // Walk ancestors right-to-left through the remaining compounds.
        let mut remaining = rest.iter().rev();
        let mut needle = remaining.next();
        let mut current = doc.get(id).parent;
        while let (Some(compound), Some(ancestor_id)) = (needle, current) {
            if doc
                .element(ancestor_id)
                .is_some_and(|e| compound.matches(e))
            {
                needle = remaining.next();
            }
            current = doc.get(ancestor_id).parent;
        }
        needle.is_none()
    }
}

/// All reachable elements matching `selector`, in depth-first order.
pub fn select_all(doc: &Document, selector: &Selector) -> Vec<NodeId> {
    doc.reachable()
        .into_iter()
        .filter(|&id| selector.matches(doc, id))
        .collect()
}

/// The first reachable element matching `selector`.
pub fn select_first(doc: &Document, selector: &Selector) -> Option<NodeId> {
    doc.reachable()
        .into_iter()
        .find(|&id| selector.matches(doc, id))
}

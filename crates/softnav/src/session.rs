//! Page session state: the live document and its navigation-relevant
//! views.
//!
//! A session owns the parsed DOM of the page the browser is showing,
//! the resolved main content region, the document title, and the
//! current location. The navigator mutates it on every soft
//! navigation; its lifetime is the page lifetime.

use crate::html;
use crate::html::dom::{Document, NodeId, TagName};
use crate::loader::split_path_query_fragment;
use crate::selector::{Selector, select_all, select_first};

/// Session-scoped page state.
pub struct PageSession {
    doc: Document,
    main_id: NodeId,
    title: Option<String>,
    path: String,
    query: Option<String>,
}

impl PageSession {
    /// Build a session from the already-rendered page markup and the
    /// current location (path with optional query).
    ///
    /// Returns `None` when no element matches `main_selector` -- the
    /// capability precondition for soft navigation.
    pub fn from_html(page: &str, location: &str, main_selector: &Selector) -> Option<Self> {
        let doc = html::parse_document(page);
        let main_id = select_first(&doc, main_selector)?;
        let title = doc.title();
        let (path, query, _) = split_path_query_fragment(location);
        Some(Self {
            doc,
            main_id,
            title,
            path,
            query,
        })
    }

    /// The live document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The main content region's node id.
    pub fn main_id(&self) -> NodeId {
        self.main_id
    }

    /// The current document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the document title (after a swap found a `<title>`).
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// The current location's path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The current location as path plus optional query.
    pub fn location(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Update the current location (after the history entry changed).
    pub fn set_location(&mut self, target: &str) {
        let (path, query, _) = split_path_query_fragment(target);
        self.path = path;
        self.query = query;
    }

    /// The main region's markup (`innerHTML` getter).
    pub fn main_inner_html(&self) -> String {
        html::inner_html(&self.doc, self.main_id)
    }

    /// Replace the main region's markup verbatim (`innerHTML` setter).
    pub fn replace_main_content(&mut self, markup: &str) {
        html::set_inner_html(&mut self.doc, self.main_id, markup);
    }

    /// Nearest enclosing anchor of `id`, if any.
    pub fn closest_anchor(&self, id: NodeId) -> Option<NodeId> {
        self.doc.closest(id, &TagName::A)
    }

    /// Recompute active-link marking for `path`.
    ///
    /// Every anchor matched by `nav_selectors` is compared by its raw
    /// `href` attribute -- an exact string match, deliberately not
    /// resolved, so equivalent-but-different path spellings do not
    /// match. The matching anchor gains `active_class` and
    /// `current_attr="page"`; every other anchor loses the class and
    /// gets `current_attr="false"`.
    pub fn mark_active_links(
        &mut self,
        path: &str,
        nav_selectors: &[Selector],
        active_class: &str,
        current_attr: &str,
    ) {
        for selector in nav_selectors {
            let matched = select_all(&self.doc, selector);
            for id in matched {
                let Some(elem) = self.doc.element_mut(id) else {
                    continue;
                };
                let is_active = elem.get_attribute("href") == Some(path);
                elem.set_class_enabled(active_class, is_active);
                elem.set_attribute(current_attr, if is_active { "page" } else { "false" });
            }
        }
    }
}

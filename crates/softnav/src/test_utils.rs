//! Shared test utilities for the navigation engine.
//!
//! Provides a [`MockHost`] that records every history operation and a
//! [`MapFetcher`] that serves canned responses, for assertions in
//! integration and unit tests across modules.

use std::cell::RefCell;
use std::collections::HashMap;

use softnav_types::{NavError, Result};

use crate::host::NavHost;
use crate::loader::{FetchResponse, PageFetcher};

/// A recorded history operation from the mock host.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOp {
    Push(String),
    Replace(String),
    Assign(String),
}

/// A mock host that records all history operations for test assertions.
pub struct MockHost {
    pub history_supported: bool,
    pub ops: Vec<HistoryOp>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            history_supported: true,
            ops: Vec::new(),
        }
    }

    /// A host without history manipulation support.
    pub fn without_history() -> Self {
        Self {
            history_supported: false,
            ops: Vec::new(),
        }
    }

    /// URLs pushed, in order.
    pub fn pushes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HistoryOp::Push(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// URLs that replaced the current entry, in order.
    pub fn replaces(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HistoryOp::Replace(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Full-page loads requested, in order.
    pub fn assigns(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HistoryOp::Assign(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl NavHost for MockHost {
    fn history_supported(&self) -> bool {
        self.history_supported
    }

    fn push_entry(&mut self, url: &str) {
        self.ops.push(HistoryOp::Push(url.to_string()));
    }

    fn replace_entry(&mut self, url: &str) {
        self.ops.push(HistoryOp::Replace(url.to_string()));
    }

    fn assign(&mut self, url: &str) {
        self.ops.push(HistoryOp::Assign(url.to_string()));
    }
}

/// A fetcher serving canned responses from a target -> response map,
/// recording every fetch.
pub struct MapFetcher {
    pages: HashMap<String, FetchResponse>,
    log: RefCell<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Register a response for `target`.
    pub fn insert_page(&mut self, target: &str, status: u16, body: &str) {
        self.pages.insert(
            target.to_string(),
            FetchResponse {
                url: target.to_string(),
                status,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.log.borrow().len()
    }

    /// Targets fetched, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl PageFetcher for MapFetcher {
    fn fetch(&self, target: &str) -> Result<FetchResponse> {
        self.log.borrow_mut().push(target.to_string());
        self.pages
            .get(target)
            .cloned()
            .ok_or_else(|| NavError::Fetch(format!("no route to {target}")))
    }
}

/// Standard page markup: a header nav with links to `/a` and `/b`, a
/// footer link to `/c`, and the given title and main region content.
pub fn site_page(title: &str, main_html: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head><body>\
         <header><nav class=\"header-nav\">\
         <a href=\"/a\">Alpha</a>\
         <a href=\"/b\">Beta</a>\
         </nav></header>\
         <main>{main_html}</main>\
         <footer><div class=\"footer-right\">\
         <a href=\"/c\">Gamma</a>\
         </div></footer>\
         </body></html>"
    )
}

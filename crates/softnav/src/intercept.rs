//! Click classification: which link activations the navigator owns.
//!
//! The host forwards every document-level click; classification walks
//! to the nearest enclosing anchor and applies the native-skip rules.
//! Anything the engine should not own (external origins, downloads,
//! new-tab targets, in-page fragment jumps, modified clicks) stays with
//! the browser's default handling.

use softnav_types::{Modifiers, PointerButton};

use crate::html::dom::NodeId;
use crate::loader::Url;
use crate::session::PageSession;

/// A document-level click, delivered by the host.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// The event target node in the session document.
    pub target: NodeId,
    /// Which pointer button was pressed.
    pub button: PointerButton,
    /// Modifier keys held during the click.
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// An unmodified primary-button click on `target`.
    pub fn primary(target: NodeId) -> Self {
        Self {
            target,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }
}

/// An event the host forwards to the navigator.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A document-level click.
    Click(ClickEvent),
    /// The browser moved through its history (back/forward); `location`
    /// is the path+query the browser restored.
    HistoryTraversal { location: String },
}

/// The outcome of classifying a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    /// Suppress the default action and soft-navigate to `target`
    /// (path + optional query).
    Intercept { target: String },
    /// Leave the click to the browser's native handling.
    Native,
}

/// Classify a click against the session state.
///
/// `origin` is the page origin hrefs resolve against; the current path
/// comes from the session (for the same-page fragment rule).
pub fn classify_click(session: &PageSession, event: &ClickEvent, origin: &Url) -> ClickAction {
    let Some(anchor_id) = session.closest_anchor(event.target) else {
        return ClickAction::Native;
    };
    let doc = session.document();
    let Some(anchor) = doc.element(anchor_id) else {
        return ClickAction::Native;
    };
    let Some(href) = anchor.get_attribute("href") else {
        return ClickAction::Native;
    };

    // Hrefs we cannot interpret (mailto:, javascript:, malformed) are
    // never ours.
    let Some(resolved) = origin.resolve(href) else {
        return ClickAction::Native;
    };

    let external = resolved.origin() != origin.origin();
    let has_target = anchor
        .get_attribute("target")
        .is_some_and(|t| !t.is_empty() && t != "_self");
    let is_download = anchor.get_attribute("download").is_some();
    let hash_only = resolved.path == session.path()
        && resolved.fragment.as_deref().is_some_and(|f| !f.is_empty());
    let modified = event.modifiers.any() || !event.button.is_primary();

    if external || has_target || is_download || hash_only || modified {
        return ClickAction::Native;
    }

    ClickAction::Intercept {
        target: resolved.request_target(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    const ORIGIN: &str = "http://site.test";

    fn origin() -> Url {
        Url::parse(ORIGIN).unwrap()
    }

    /// Build a session for a page containing one anchor with the given
    /// extra attributes, and return it with the anchor's node id.
    fn page_with_anchor(attrs: &str) -> (PageSession, NodeId) {
        let page = format!(
            "<body><main><a {attrs}><span>go</span></a></main></body>"
        );
        let session =
            PageSession::from_html(&page, "/a", &Selector::parse("main").unwrap()).unwrap();
        let doc = session.document();
        let anchor = doc
            .find_first_element(doc.root, &crate::html::dom::TagName::A)
            .unwrap();
        // Click on the inner <span> to exercise anchor resolution.
        let span = doc.get(anchor).children[0];
        (session, span)
    }

    #[test]
    fn plain_internal_link_intercepted() {
        let (session, target) = page_with_anchor("href=\"/b\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(
            action,
            ClickAction::Intercept {
                target: "/b".into()
            }
        );
    }

    #[test]
    fn query_survives_fragment_stripped() {
        let (session, target) = page_with_anchor("href=\"/posts?page=2#top\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(
            action,
            ClickAction::Intercept {
                target: "/posts?page=2".into()
            }
        );
    }

    #[test]
    fn click_outside_any_anchor_is_native() {
        let (session, _) = page_with_anchor("href=\"/b\"");
        // The main region itself has no enclosing anchor.
        let action = classify_click(
            &session,
            &ClickEvent::primary(session.main_id()),
            &origin(),
        );
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn anchor_without_href_is_native() {
        let (session, target) = page_with_anchor("class=\"btn\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn external_origin_is_native() {
        let (session, target) = page_with_anchor("href=\"https://other.example/x\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn same_host_different_port_is_native() {
        let (session, target) = page_with_anchor("href=\"http://site.test:8080/x\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn mailto_is_native() {
        let (session, target) = page_with_anchor("href=\"mailto:ben@site.test\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn blank_target_is_native() {
        let (session, target) = page_with_anchor("href=\"/b\" target=\"_blank\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn self_target_is_still_intercepted() {
        let (session, target) = page_with_anchor("href=\"/b\" target=\"_self\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert!(matches!(action, ClickAction::Intercept { .. }));
    }

    #[test]
    fn download_link_is_native() {
        let (session, target) = page_with_anchor("href=\"/files/cv.pdf\" download");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn same_page_fragment_is_native() {
        // Session path is "/a"; an "/a#section" link is a pure in-page
        // jump.
        let (session, target) = page_with_anchor("href=\"/a#section\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(action, ClickAction::Native);
    }

    #[test]
    fn fragment_to_other_page_is_intercepted() {
        let (session, target) = page_with_anchor("href=\"/b#section\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert_eq!(
            action,
            ClickAction::Intercept {
                target: "/b".into()
            }
        );
    }

    #[test]
    fn empty_fragment_on_same_page_is_intercepted() {
        // `href="/a#"` has an empty fragment; the original engine only
        // skips non-empty ones.
        let (session, target) = page_with_anchor("href=\"/a#\"");
        let action = classify_click(&session, &ClickEvent::primary(target), &origin());
        assert!(matches!(action, ClickAction::Intercept { .. }));
    }

    #[test]
    fn modified_clicks_are_native() {
        let (session, target) = page_with_anchor("href=\"/b\"");
        for modifiers in [
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            },
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
            Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
        ] {
            let event = ClickEvent {
                target,
                button: PointerButton::Primary,
                modifiers,
            };
            assert_eq!(
                classify_click(&session, &event, &origin()),
                ClickAction::Native,
                "{modifiers:?} must skip interception",
            );
        }
    }

    #[test]
    fn non_primary_buttons_are_native() {
        let (session, target) = page_with_anchor("href=\"/b\"");
        for button in [PointerButton::Auxiliary, PointerButton::Secondary] {
            let event = ClickEvent {
                target,
                button,
                modifiers: Modifiers::NONE,
            };
            assert_eq!(
                classify_click(&session, &event, &origin()),
                ClickAction::Native,
            );
        }
    }
}

//! Progressive-enhancement soft navigation.
//!
//! This crate ties together the HTML pipeline (tokenizer, tree builder,
//! arena DOM, serializer) with click classification, page fetching,
//! history synchronization, active-link marking, post-swap hooks, and
//! scroll state into the [`SoftNavigator`] -- the component an embedding
//! host drives with page events.
//!
//! The navigator intercepts same-origin link clicks and history
//! traversals, fetches the target page, swaps the single main content
//! region, and keeps the document title, navigation markers, history
//! stack, and scroll position mutually consistent. Anything it cannot
//! own degrades to the host's native navigation.

pub mod config;
pub mod hooks;
pub mod host;
pub mod html;
pub mod intercept;
pub mod loader;
pub mod scroll;
pub mod selector;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use config::NavConfig;
pub use hooks::{SwapHook, SwapHookRegistry};
pub use host::NavHost;
pub use intercept::{ClickAction, ClickEvent, PageEvent};
pub use loader::http::HttpFetcher;
pub use loader::{FetchResponse, PageFetcher, Url};
pub use scroll::ScrollState;
pub use session::PageSession;
pub use softnav_types::{Modifiers, NavError, PointerButton, Result};

// -----------------------------------------------------------------------
// Imports
// -----------------------------------------------------------------------

use log::{debug, error, warn};

use intercept::classify_click;
use selector::Selector;

// -----------------------------------------------------------------------
// PendingNavigation
// -----------------------------------------------------------------------

/// A navigation in flight, parked at its single suspension point (the
/// fetch).
///
/// Obtained from [`SoftNavigator::begin_navigation`], which claims the
/// navigation lock; passing it back to
/// [`SoftNavigator::finish_navigation`] releases the lock on every
/// path.
#[derive(Debug)]
pub struct PendingNavigation {
    target: String,
    replace: bool,
}

impl PendingNavigation {
    /// The navigation target (path + optional query).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether this navigation replaces the current history entry
    /// instead of pushing a new one.
    pub fn is_replace(&self) -> bool {
        self.replace
    }
}

/// How a fetched response was applied to the session.
enum SwapOutcome {
    /// The main region was swapped.
    Swapped,
    /// The fetched document has no main region; fall back.
    RegionMissing,
}

// -----------------------------------------------------------------------
// SoftNavigator
// -----------------------------------------------------------------------

/// The navigation interceptor: session state plus the navigate
/// operation.
///
/// Construction is feature-detected: [`SoftNavigator::attach`] returns
/// `None` when the host lacks history support, when the live page has
/// no main content region, or when the configured selectors are
/// unsupported. A page without a navigator simply keeps its native
/// navigation.
pub struct SoftNavigator {
    /// DOM contract configuration.
    config: NavConfig,

    /// Parsed selector for the main content region.
    main_selector: Selector,

    /// Parsed selectors for the navigation link regions.
    nav_selectors: Vec<Selector>,

    /// The page origin hrefs resolve against.
    origin: Url,

    /// Live page state (document, main region, title, location).
    session: PageSession,

    /// Viewport scroll state, reset to origin after each swap.
    scroll: ScrollState,

    /// Post-swap hooks (icon re-initialization et al).
    hooks: SwapHookRegistry,

    /// Navigation lock: true while a navigation is in flight.
    navigating: bool,
}

impl SoftNavigator {
    /// Attach to an already-rendered page.
    ///
    /// `page` is the live page markup, `origin` the page origin (e.g.
    /// `"http://localhost:8000"`), and `location` the current path with
    /// optional query. Marks the active navigation link for `location`
    /// immediately; no fetch is needed since the page is already
    /// rendered.
    pub fn attach(
        page: &str,
        origin: &str,
        location: &str,
        config: NavConfig,
        host: &dyn NavHost,
    ) -> Option<SoftNavigator> {
        if !host.history_supported() {
            debug!("history manipulation unsupported; soft navigation disabled");
            return None;
        }

        let Some(origin) = Url::parse(origin) else {
            warn!("invalid page origin {origin:?}; soft navigation disabled");
            return None;
        };

        let (main_selector, nav_selectors) = match parse_selectors(&config) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{e}; soft navigation disabled");
                return None;
            },
        };

        let Some(mut session) = PageSession::from_html(page, location, &main_selector) else {
            debug!(
                "no element matches {:?}; soft navigation disabled",
                config.main_selector,
            );
            return None;
        };

        let path = session.path().to_string();
        session.mark_active_links(
            &path,
            &nav_selectors,
            &config.active_class,
            &config.current_attr,
        );

        Some(SoftNavigator {
            config,
            main_selector,
            nav_selectors,
            origin,
            session,
            scroll: ScrollState::default(),
            hooks: SwapHookRegistry::new(),
            navigating: false,
        })
    }

    // ---------------------------------------------------------------
    // Event handling
    // ---------------------------------------------------------------

    /// Handle a page event. Returns `true` if the event was consumed
    /// (the host must suppress the default action).
    pub fn handle_event(
        &mut self,
        event: &PageEvent,
        fetcher: &dyn PageFetcher,
        host: &mut dyn NavHost,
    ) -> bool {
        match event {
            PageEvent::Click(click) => {
                match classify_click(&self.session, click, &self.origin) {
                    ClickAction::Intercept { target } => {
                        self.navigate(&target, false, fetcher, host);
                        true
                    },
                    ClickAction::Native => false,
                }
            },
            PageEvent::HistoryTraversal { location } => {
                // The history entry already exists; only re-render to
                // match it.
                self.navigate(location, true, fetcher, host);
                true
            },
        }
    }

    // ---------------------------------------------------------------
    // The navigate operation
    // ---------------------------------------------------------------

    /// Navigate to `target` (path + optional query), blocking on the
    /// fetch.
    ///
    /// A call while another navigation is in flight is a silent no-op.
    /// Every failure falls back to a full page load through the host;
    /// no error reaches the caller.
    pub fn navigate(
        &mut self,
        target: &str,
        replace: bool,
        fetcher: &dyn PageFetcher,
        host: &mut dyn NavHost,
    ) {
        let Some(pending) = self.begin_navigation(target, replace) else {
            return;
        };
        let fetched = fetcher.fetch(target);
        self.finish_navigation(pending, fetched, host);
    }

    /// Claim the navigation lock and describe the navigation about to
    /// suspend on its fetch. Returns `None` (dropping the attempt) when
    /// a navigation is already in flight.
    pub fn begin_navigation(&mut self, target: &str, replace: bool) -> Option<PendingNavigation> {
        if self.navigating {
            debug!("navigation already in flight; dropping {target}");
            return None;
        }
        self.navigating = true;
        Some(PendingNavigation {
            target: target.to_string(),
            replace,
        })
    }

    /// Complete a navigation with the result of its fetch.
    ///
    /// On success: swaps the main region, runs the post-swap hooks,
    /// updates the title and active links, synchronizes the history
    /// entry, and resets scroll to the origin. On any failure (or a
    /// fetched document without a main region): falls back to a full
    /// page load. The navigation lock is released on every path.
    pub fn finish_navigation(
        &mut self,
        pending: PendingNavigation,
        fetched: Result<FetchResponse>,
        host: &mut dyn NavHost,
    ) {
        let outcome = fetched.and_then(|resp| self.apply_response(&pending.target, resp));
        match outcome {
            Ok(SwapOutcome::Swapped) => {
                if pending.replace {
                    host.replace_entry(&pending.target);
                } else {
                    host.push_entry(&pending.target);
                }
                self.session.set_location(&pending.target);
                self.scroll.reset_to_origin();
            },
            Ok(SwapOutcome::RegionMissing) => {
                debug!(
                    "fetched document has no {:?} region; full load of {}",
                    self.config.main_selector, pending.target,
                );
                host.assign(&pending.target);
            },
            Err(e) => {
                error!("soft navigation to {} failed: {e}", pending.target);
                host.assign(&pending.target);
            },
        }
        self.navigating = false;
    }

    /// Apply a fetched response to the session: status check, parse,
    /// locate the region, swap, hooks, title, active links.
    fn apply_response(&mut self, target: &str, resp: FetchResponse) -> Result<SwapOutcome> {
        if !resp.is_success() {
            return Err(NavError::Status(resp.status));
        }

        let fetched = html::parse_document(&resp.text());
        let Some(new_main) = selector::select_first(&fetched, &self.main_selector) else {
            return Ok(SwapOutcome::RegionMissing);
        };
        let markup = html::inner_html(&fetched, new_main);
        let new_title = fetched.title();

        self.session.replace_main_content(&markup);
        // Newly injected icon placeholders need the icon library to
        // re-scan the region.
        self.hooks.run_after_swap();

        if let Some(title) = new_title {
            self.session.set_title(&title);
        }

        let (path, _, _) = loader::split_path_query_fragment(target);
        self.session.mark_active_links(
            &path,
            &self.nav_selectors,
            &self.config.active_class,
            &self.config.current_attr,
        );

        Ok(SwapOutcome::Swapped)
    }

    // ---------------------------------------------------------------
    // Active-link marking
    // ---------------------------------------------------------------

    /// Recompute active-link marking for `path`.
    pub fn mark_active_links(&mut self, path: &str) {
        self.session.mark_active_links(
            path,
            &self.nav_selectors,
            &self.config.active_class,
            &self.config.current_attr,
        );
    }

    // ---------------------------------------------------------------
    // Hooks
    // ---------------------------------------------------------------

    /// Register a post-swap hook.
    pub fn register_hook(&mut self, hook: Box<dyn SwapHook>) {
        self.hooks.register(hook);
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// The live page session.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// The current document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.session.title()
    }

    /// The current location (path + optional query).
    pub fn current_location(&self) -> String {
        self.session.location()
    }

    /// The page origin.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Whether a navigation is currently in flight.
    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// The active configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The viewport scroll state.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Mutable viewport scroll state (for the host to mirror user
    /// scrolling and sizes).
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

/// Parse the configured selector strings, rejecting anything outside
/// the supported grammar.
fn parse_selectors(config: &NavConfig) -> Result<(Selector, Vec<Selector>)> {
    let main_selector = Selector::parse(&config.main_selector).ok_or_else(|| {
        NavError::Config(format!(
            "unsupported main selector: {:?}",
            config.main_selector,
        ))
    })?;
    let mut nav_selectors = Vec::with_capacity(config.nav_selectors.len());
    for s in &config.nav_selectors {
        let selector = Selector::parse(s)
            .ok_or_else(|| NavError::Config(format!("unsupported nav selector: {s:?}")))?;
        nav_selectors.push(selector);
    }
    Ok((main_selector, nav_selectors))
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

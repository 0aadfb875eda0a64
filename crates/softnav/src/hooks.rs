//! Post-swap hooks: callbacks the navigator runs after every content
//! swap.
//!
//! The page contract requires re-initializing the icon-rendering library
//! after new markup is injected; embedders register that (and anything
//! else that must re-scan the content region) as a [`SwapHook`]. Hooks
//! run in registration order.

use log::debug;

/// A named callback run after every successful content swap.
///
/// Implementations must be `Send` so the registry can be moved between
/// threads (e.g. into a worker or across an FFI boundary).
pub trait SwapHook: Send {
    /// A unique human-readable name for this hook (used for logging).
    fn name(&self) -> &str;

    /// Called with no arguments after new markup has been injected into
    /// the main content region.
    fn after_swap(&self);
}

/// Registry of post-swap hooks.
///
/// The navigator holds one of these and runs it at the end of every
/// successful swap; a fallback navigation never reaches the hooks.
pub struct SwapHookRegistry {
    hooks: Vec<Box<dyn SwapHook>>,
}

impl SwapHookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a hook. Hooks run in registration order.
    pub fn register(&mut self, hook: Box<dyn SwapHook>) {
        self.hooks.push(hook);
    }

    /// Run all hooks in registration order.
    pub fn run_after_swap(&self) {
        for hook in &self.hooks {
            debug!("running swap hook: {}", hook.name());
            hook.after_swap();
        }
    }

    /// Whether any hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// List all registered hook names (in registration order).
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for SwapHookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

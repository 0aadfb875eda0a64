//! The host seam: browser-side services the navigator drives.

/// History manipulation and full-page loads, supplied by the embedding
/// host.
///
/// History entries carry an empty state payload, so the methods take
/// only the URL (a path with optional query).
pub trait NavHost {
    /// Whether the host supports history entry manipulation. When this
    /// is `false` the navigator never attaches and every link behaves
    /// natively.
    fn history_supported(&self) -> bool {
        true
    }

    /// Push a new history entry for `url`.
    fn push_entry(&mut self, url: &str);

    /// Replace the current history entry with `url`.
    fn replace_entry(&mut self, url: &str);

    /// Abandon in-page navigation and perform a full page load of
    /// `url`.
    fn assign(&mut self, url: &str);
}

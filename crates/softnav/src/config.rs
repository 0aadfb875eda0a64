//! Navigator configuration: the fixed DOM contract.
//!
//! The selectors and marker names are part of the page template, not
//! internal tuning -- they name the single main content region, the
//! navigation link regions, and the active-link markers the templates
//! style against. Defaults match the standard page template; deployments
//! with different templates load overrides from TOML.

use serde::Deserialize;
use softnav_types::Result;

/// DOM contract configuration for the navigator.
#[derive(Debug, Clone, Deserialize)]
pub struct NavConfig {
    /// Selector for the single swappable content region.
    #[serde(default = "default_main_selector")]
    pub main_selector: String,

    /// Selectors for the navigation link regions whose anchors get
    /// active-state marking.
    #[serde(default = "default_nav_selectors")]
    pub nav_selectors: Vec<String>,

    /// Class toggled on the anchor matching the current path.
    #[serde(default = "default_active_class")]
    pub active_class: String,

    /// Accessibility attribute set to `"page"` on the active anchor and
    /// `"false"` on the rest.
    #[serde(default = "default_current_attr")]
    pub current_attr: String,
}

fn default_main_selector() -> String {
    "main".to_string()
}

fn default_nav_selectors() -> Vec<String> {
    vec![".header-nav a".to_string(), ".footer-right a".to_string()]
}

fn default_active_class() -> String {
    "is-active".to_string()
}

fn default_current_attr() -> String {
    "aria-current".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            main_selector: default_main_selector(),
            nav_selectors: default_nav_selectors(),
            active_class: default_active_class(),
            current_attr: default_current_attr(),
        }
    }
}

impl NavConfig {
    /// Load a config from TOML text; missing keys fall back to the
    /// defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

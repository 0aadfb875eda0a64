//! Error types for softnav.

use std::io;

/// Errors produced by the softnav engine.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NavError>;

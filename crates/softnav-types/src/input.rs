//! Platform-agnostic pointer input types.
//!
//! Every host maps its native click events to these types. The engine
//! never sees raw platform input.

use serde::{Deserialize, Serialize};

/// The pointer button that triggered a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Main button (usually the left mouse button, or a tap).
    Primary,
    /// Middle button / wheel press.
    Auxiliary,
    /// Context-menu button (usually the right mouse button).
    Secondary,
}

impl PointerButton {
    /// Whether this is the main activation button.
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    /// No modifier keys held.
    pub const NONE: Modifiers = Modifiers {
        meta: false,
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Whether any modifier key is held.
    pub fn any(self) -> bool {
        self.meta || self.ctrl || self.shift || self.alt
    }
}

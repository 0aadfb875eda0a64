//! Foundation types for softnav.
//!
//! This crate contains the platform-agnostic types shared by the softnav
//! workspace: pointer input events and error types. Hosts map their native
//! input into these; the engine never sees raw platform events.

pub mod error;
pub mod input;

pub use error::{NavError, Result};
pub use input::{Modifiers, PointerButton};

//! Frontend-agnostic input events.
//!
//! Frontends translate their native event streams (crossterm) into this enum
//! so the host loop only handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers};

/// Events emitted by frontends, converted to a unified format
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
}

impl FrontendEvent {
    /// Create a key event
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    /// Create a resize event
    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }
}

//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the core. The host loop polls events,
/// ticks the core, then asks the frontend to draw.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events without blocking; frame pacing belongs to
    /// the caller.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal size as `(width, height)`
    fn size(&self) -> (u16, u16);
}

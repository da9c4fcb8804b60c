//! Widget state structs (rendering-agnostic)
//!
//! These structs hold data and provide methods for state manipulation,
//! but contain no rendering logic. The TUI frontend (ratatui) renders
//! them in `frontend::tui`.

pub mod cursor_blink;
pub mod typewriter;

pub use cursor_blink::CursorBlink;
pub use typewriter::{Phase, TypewriterError, TypewriterState, TypewriterTiming, TypewriterView};

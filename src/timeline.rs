//! Headless timeline of a typewriter
//!
//! Mounts a typewriter at time zero and steps the clock from one pending
//! deadline to the next, recording a frame every time the visible state
//! changes. Used by the `simulate` subcommand.

use crate::widgets::{Phase, TypewriterState};
use std::fmt;
use std::time::Duration;

/// Snapshot of a typewriter after the callbacks due at `at` have run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub phase: Phase,
    pub cycle: usize,
    pub text: String,
}

impl Frame {
    fn capture(at: Duration, state: &TypewriterState) -> Self {
        Self {
            at,
            phase: state.phase(),
            cycle: state.cycle_index(),
            text: state.displayed().to_string(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7}ms  {:<9} cycle={}  {:?}",
            self.at.as_millis(),
            self.phase.name(),
            self.cycle,
            self.text
        )
    }
}

/// Iterator over state changes of a mounted typewriter, up to `until`
pub struct Timeline {
    state: TypewriterState,
    until: Duration,
    started: bool,
}

impl Timeline {
    /// `state` should be unmounted; it is mounted at time zero
    pub fn new(mut state: TypewriterState, until: Duration) -> Self {
        state.mount(Duration::ZERO);
        Self {
            state,
            until,
            started: false,
        }
    }
}

impl Iterator for Timeline {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if !self.started {
            self.started = true;
            return Some(Frame::capture(Duration::ZERO, &self.state));
        }

        let deadline = self.state.next_deadline()?;
        if deadline > self.until {
            return None;
        }

        self.state.advance_to(deadline);
        Some(Frame::capture(deadline, &self.state))
    }
}

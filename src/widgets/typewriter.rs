//! Typewriter text animation state (rendering-agnostic)
//!
//! Cycles through a list of strings, typing each one character at a time,
//! holding it on screen, then deleting it before moving to the next one.
//!
//! Time is supplied by the caller as a `Duration` since an arbitrary epoch
//! (the host uses time since startup). At most one timer is pending at any
//! moment; each callback schedules the next one relative to its own deadline,
//! so the sequence of states is identical whether the clock is advanced one
//! millisecond at a time or in a single jump.

use std::time::Duration;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Delay between mount and the first typed character
pub const START_UP_DELAY: Duration = Duration::from_millis(1500);

/// Delay between two typed (or deleted) characters
pub const TYPE_INTERVAL: Duration = Duration::from_millis(100);

/// How long a fully typed string stays on screen before deletion starts
pub const DWELL_PERIOD: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    #[error("typewriter needs at least one text to display")]
    EmptyTargets,
    #[error("typewriter {0} must be longer than zero")]
    ZeroInterval(&'static str),
}

/// Timer settings for one typewriter instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub start_delay: Duration,
    pub type_interval: Duration,
    pub dwell: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            start_delay: START_UP_DELAY,
            type_interval: TYPE_INTERVAL,
            dwell: DWELL_PERIOD,
        }
    }
}

impl TypewriterTiming {
    /// Build timing from millisecond values (config representation)
    pub fn from_millis(start_delay_ms: u64, type_interval_ms: u64, dwell_ms: u64) -> Self {
        Self {
            start_delay: Duration::from_millis(start_delay_ms),
            type_interval: Duration::from_millis(type_interval_ms),
            dwell: Duration::from_millis(dwell_ms),
        }
    }

    /// A zero interval or dwell lets the chain fire forever at one instant.
    pub fn validate(&self) -> Result<(), TypewriterError> {
        if self.type_interval.is_zero() {
            return Err(TypewriterError::ZeroInterval("typing interval"));
        }
        if self.dwell.is_zero() {
            return Err(TypewriterError::ZeroInterval("dwell period"));
        }
        Ok(())
    }
}

/// Observable phase of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet mounted
    Idle,
    /// Adding characters (includes the start-up wait before the first one)
    Typing,
    /// Full target shown, waiting for deletion to start
    Dwelling,
    /// Removing characters
    Deleting,
    /// Unmounted; terminal
    TornDown,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Typing => "typing",
            Self::Dwelling => "dwelling",
            Self::Deleting => "deleting",
            Self::TornDown => "torn-down",
        }
    }
}

/// Callback a pending timer will run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Type,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    deadline: Duration,
    step: Step,
}

/// What the renderer paints: the displayed text and whether a cursor follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterView<'a> {
    pub text: &'a str,
    pub cursor: bool,
}

/// Typewriter animation state
///
/// Owns the target list, the displayed prefix and the single pending timer.
/// Only `mount`, `advance_to` and `unmount` mutate it.
#[derive(Debug, Clone)]
pub struct TypewriterState {
    texts: Vec<String>,
    timing: TypewriterTiming,
    cycle: usize,
    displayed: String,
    phase: Phase,
    pending: Option<PendingTimer>,
    mounted_at: Option<Duration>,
}

impl TypewriterState {
    /// Create a new typewriter over `texts`
    ///
    /// Fails if `texts` is empty or the timing has a zero interval.
    pub fn new(texts: Vec<String>, timing: TypewriterTiming) -> Result<Self, TypewriterError> {
        if texts.is_empty() {
            return Err(TypewriterError::EmptyTargets);
        }
        timing.validate()?;

        Ok(Self {
            texts,
            timing,
            cycle: 0,
            displayed: String::new(),
            phase: Phase::Idle,
            pending: None,
            mounted_at: None,
        })
    }

    /// Start the timer chain: the first character is typed after the start-up delay
    pub fn mount(&mut self, now: Duration) {
        if self.phase != Phase::Idle {
            tracing::warn!(
                phase = self.phase.name(),
                "Ignoring mount of an already mounted typewriter"
            );
            return;
        }

        self.mounted_at = Some(now);
        self.phase = Phase::Typing;
        self.schedule(now + self.timing.start_delay, Step::Type);
        tracing::debug!(texts = self.texts.len(), "Typewriter mounted");
    }

    /// Cancel the pending timer. Safe to call any number of times.
    pub fn unmount(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }

        self.pending = None;
        self.phase = Phase::TornDown;
        tracing::debug!(cycle = self.cycle, "Typewriter unmounted");
    }

    /// Run every timer due at or before `now`
    ///
    /// Returns the number of callbacks fired.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;

        while let Some(timer) = self.pending {
            if timer.deadline > now {
                break;
            }
            self.pending = None;
            match timer.step {
                Step::Type => self.type_next(timer.deadline),
                Step::Clear => self.clear_next(timer.deadline),
            }
            fired += 1;
        }

        fired
    }

    fn schedule(&mut self, deadline: Duration, step: Step) {
        debug_assert!(self.pending.is_none(), "typewriter already has a pending timer");
        self.pending = Some(PendingTimer { deadline, step });
    }

    fn type_next(&mut self, at: Duration) {
        let target = &self.texts[self.cycle];

        if self.displayed.len() < target.len() {
            if let Some(next) = target[self.displayed.len()..].graphemes(true).next() {
                self.displayed.push_str(next);
            }
            self.phase = Phase::Typing;
            self.schedule(at + self.timing.type_interval, Step::Type);
        } else {
            self.phase = Phase::Dwelling;
            self.schedule(at + self.timing.dwell, Step::Clear);
        }
    }

    fn clear_next(&mut self, at: Duration) {
        if let Some(last) = self.displayed.graphemes(true).next_back() {
            let keep = self.displayed.len() - last.len();
            self.displayed.truncate(keep);
            self.phase = Phase::Deleting;
            self.schedule(at + self.timing.type_interval, Step::Clear);
        } else {
            self.rotate();
            self.type_next(at);
        }
    }

    /// Move to the next target (wrapping) with an empty display
    fn rotate(&mut self) {
        self.cycle = (self.cycle + 1) % self.texts.len();
        self.displayed.clear();
        tracing::debug!(cycle = self.cycle, target = %self.current_target(), "Typewriter advanced");
    }

    pub fn view(&self) -> TypewriterView<'_> {
        TypewriterView {
            text: &self.displayed,
            cursor: self.phase != Phase::TornDown,
        }
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn current_target(&self) -> &str {
        &self.texts[self.cycle]
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// When the widget was mounted, if it has been
    pub fn mounted_at(&self) -> Option<Duration> {
        self.mounted_at
    }

    /// Deadline of the pending timer, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|timer| timer.deadline)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Typing | Phase::Dwelling | Phase::Deleting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn typewriter(texts: &[&str]) -> TypewriterState {
        TypewriterState::new(
            texts.iter().map(|s| s.to_string()).collect(),
            TypewriterTiming::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = TypewriterState::new(Vec::new(), TypewriterTiming::default()).unwrap_err();
        assert_eq!(err, TypewriterError::EmptyTargets);
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let texts = vec!["a".to_string()];
        let err = TypewriterState::new(texts.clone(), TypewriterTiming::from_millis(0, 0, 2500))
            .unwrap_err();
        assert_eq!(err, TypewriterError::ZeroInterval("typing interval"));

        let err = TypewriterState::new(texts, TypewriterTiming::from_millis(0, 100, 0)).unwrap_err();
        assert_eq!(err, TypewriterError::ZeroInterval("dwell period"));
    }

    #[test]
    fn test_initial_state() {
        let tw = typewriter(&["Engineer", "Builder"]);
        assert_eq!(tw.phase(), Phase::Idle);
        assert_eq!(tw.cycle_index(), 0);
        assert_eq!(tw.current_target(), "Engineer");
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.next_deadline(), None);
    }

    #[test]
    fn test_nothing_fires_before_mount() {
        let mut tw = typewriter(&["Engineer"]);
        assert_eq!(tw.advance_to(ms(60_000)), 0);
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.phase(), Phase::Idle);
    }

    #[test]
    fn test_engineer_builder_timeline() {
        let mut tw = typewriter(&["Engineer", "Builder"]);
        tw.mount(Duration::ZERO);
        assert_eq!(tw.next_deadline(), Some(ms(1500)));

        tw.advance_to(ms(1499));
        assert_eq!(tw.displayed(), "");

        tw.advance_to(ms(1500));
        assert_eq!(tw.displayed(), "E");
        tw.advance_to(ms(1600));
        assert_eq!(tw.displayed(), "En");

        tw.advance_to(ms(2200));
        assert_eq!(tw.displayed(), "Engineer");
        assert_eq!(tw.phase(), Phase::Typing);

        tw.advance_to(ms(2300));
        assert_eq!(tw.phase(), Phase::Dwelling);
        assert_eq!(tw.next_deadline(), Some(ms(4800)));

        tw.advance_to(ms(4799));
        assert_eq!(tw.displayed(), "Engineer");

        tw.advance_to(ms(4800));
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.displayed(), "Enginee");

        tw.advance_to(ms(5500));
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.cycle_index(), 0);

        tw.advance_to(ms(5600));
        assert_eq!(tw.cycle_index(), 1);
        assert_eq!(tw.current_target(), "Builder");
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.displayed(), "B");
        assert_eq!(tw.next_deadline(), Some(ms(5700)));
    }

    #[test]
    fn test_single_jump_matches_stepping() {
        let mut stepped = typewriter(&["Engineer", "Builder"]);
        let mut jumped = stepped.clone();
        stepped.mount(Duration::ZERO);
        jumped.mount(Duration::ZERO);

        for t in 0..=9_000 {
            stepped.advance_to(ms(t));
        }
        jumped.advance_to(ms(9_000));

        assert_eq!(stepped.displayed(), jumped.displayed());
        assert_eq!(stepped.cycle_index(), jumped.cycle_index());
        assert_eq!(stepped.phase(), jumped.phase());
        assert_eq!(stepped.next_deadline(), jumped.next_deadline());
    }

    #[test]
    fn test_typing_grows_by_one_prefix() {
        let mut tw = typewriter(&["Engineer"]);
        tw.mount(Duration::ZERO);

        let mut last_len = 0;
        let mut t = 1500;
        while tw.displayed() != "Engineer" {
            assert_eq!(tw.advance_to(ms(t)), 1);
            let shown = tw.displayed();
            assert_eq!(shown.len(), last_len + 1);
            assert!("Engineer".starts_with(shown));
            last_len = shown.len();
            t += 100;
        }
    }

    #[test]
    fn test_deleting_shrinks_by_one() {
        let mut tw = typewriter(&["abc", "xy"]);
        tw.mount(Duration::ZERO);
        // typed by 1700, dwell scheduled at 1800, clear at 4300
        tw.advance_to(ms(4299));
        assert_eq!(tw.phase(), Phase::Dwelling);

        let mut lens = Vec::new();
        for t in [4300, 4400, 4500] {
            tw.advance_to(ms(t));
            assert_eq!(tw.phase(), Phase::Deleting);
            lens.push(tw.displayed().len());
        }
        assert_eq!(lens, vec![2, 1, 0]);
    }

    #[test]
    fn test_cycle_returns_to_start() {
        let texts = ["one", "two", "three"];
        let mut tw = typewriter(&texts);
        tw.mount(Duration::ZERO);

        let mut advances = 0;
        let mut last_cycle = tw.cycle_index();
        let mut t = 0;
        while advances < texts.len() {
            t += 10;
            tw.advance_to(ms(t));
            if tw.cycle_index() != last_cycle {
                advances += 1;
                assert_eq!(tw.cycle_index(), (last_cycle + 1) % texts.len());
                last_cycle = tw.cycle_index();
            }
        }
        assert_eq!(tw.cycle_index(), 0);
        assert_eq!(tw.current_target(), "one");
    }

    #[test]
    fn test_single_text_wraps_to_itself() {
        let mut tw = typewriter(&["hi"]);
        tw.mount(Duration::ZERO);
        // 1500 h, 1600 hi, 1700 dwell, 4200 i, 4300 "", 4400 advance + type
        tw.advance_to(ms(4400));
        assert_eq!(tw.cycle_index(), 0);
        assert_eq!(tw.displayed(), "h");
    }

    #[test]
    fn test_empty_target_string_dwells_then_advances() {
        let mut tw = typewriter(&["", "ok"]);
        tw.mount(Duration::ZERO);
        tw.advance_to(ms(1500));
        assert_eq!(tw.phase(), Phase::Dwelling);
        tw.advance_to(ms(4000));
        assert_eq!(tw.cycle_index(), 1);
        assert_eq!(tw.displayed(), "o");
    }

    #[test]
    fn test_graphemes_are_not_split() {
        let mut tw = typewriter(&["e\u{301}h"]);
        tw.mount(Duration::ZERO);
        tw.advance_to(ms(1500));
        assert_eq!(tw.displayed(), "e\u{301}");
        tw.advance_to(ms(1600));
        assert_eq!(tw.displayed(), "e\u{301}h");
    }

    #[test]
    fn test_unmount_stops_all_callbacks() {
        let mut tw = typewriter(&["Engineer", "Builder"]);
        tw.mount(Duration::ZERO);
        tw.advance_to(ms(1700));
        assert_eq!(tw.displayed(), "Eng");

        tw.unmount();
        assert_eq!(tw.next_deadline(), None);
        assert_eq!(tw.advance_to(ms(1_000_000)), 0);
        assert_eq!(tw.displayed(), "Eng");
        assert_eq!(tw.cycle_index(), 0);
        assert_eq!(tw.phase(), Phase::TornDown);
        assert!(!tw.view().cursor);
    }

    #[test]
    fn test_unmount_while_dwelling_and_deleting() {
        for (at, phase, frozen) in [
            (3000, Phase::Dwelling, "Engineer"),
            (5000, Phase::Deleting, "Engin"),
        ] {
            let mut tw = typewriter(&["Engineer", "Builder"]);
            tw.mount(Duration::ZERO);
            tw.advance_to(ms(at));
            assert_eq!(tw.phase(), phase);
            assert_eq!(tw.displayed(), frozen);

            tw.unmount();
            assert_eq!(tw.advance_to(ms(1_000_000)), 0);
            assert_eq!(tw.displayed(), frozen);
            assert_eq!(tw.cycle_index(), 0);
            assert_eq!(tw.phase(), Phase::TornDown);
        }
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let mut tw = typewriter(&["Engineer"]);
        tw.unmount();
        tw.unmount();
        assert_eq!(tw.phase(), Phase::TornDown);

        // A torn down widget cannot be restarted
        tw.mount(Duration::ZERO);
        assert_eq!(tw.phase(), Phase::TornDown);
        assert_eq!(tw.advance_to(ms(10_000)), 0);
    }

    #[test]
    fn test_second_mount_is_ignored() {
        let mut tw = typewriter(&["Engineer"]);
        tw.mount(Duration::ZERO);
        tw.mount(ms(1000));
        assert_eq!(tw.mounted_at(), Some(Duration::ZERO));
        assert_eq!(tw.next_deadline(), Some(ms(1500)));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = typewriter(&["aaa"]);
        let mut b = typewriter(&["bbb"]);
        a.mount(Duration::ZERO);
        b.mount(ms(500));

        a.advance_to(ms(1500));
        b.advance_to(ms(1500));
        assert_eq!(a.displayed(), "a");
        assert_eq!(b.displayed(), "");

        a.unmount();
        b.advance_to(ms(2000));
        assert_eq!(b.displayed(), "b");
        assert_eq!(a.displayed(), "a");
    }
}

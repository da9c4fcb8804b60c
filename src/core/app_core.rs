use crate::config::Config;
use crate::theme::AppTheme;
use crate::widgets::{CursorBlink, TypewriterState};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;
use std::time::Duration;

/// A mounted typewriter plus the chrome drawn around it
#[derive(Debug, Clone)]
pub struct TypewriterInstance {
    pub title: Option<String>,
    pub state: TypewriterState,
}

/// Core application state (frontend-agnostic)
///
/// Hosts every configured typewriter, drives their clocks and decides when
/// a frame must be drawn. Each instance keeps its own pending timer; the core
/// only mounts, ticks and unmounts them.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Resolved theme (with any cursor color override applied)
    pub theme: AppTheme,

    /// Cursor blink curve shared by all instances
    pub blink: CursorBlink,

    /// Hosted typewriters, in display order
    pub typewriters: Vec<TypewriterInstance>,

    /// Application running flag
    pub running: bool,

    /// Set when state changed since the last render
    pub needs_render: bool,

    /// Time of the last tick, relative to startup
    pub now: Duration,
}

impl AppCore {
    /// Build every configured typewriter (unmounted)
    pub fn new(config: Config) -> Result<Self> {
        if config.typewriters.is_empty() {
            anyhow::bail!("No typewriters configured - add a [[typewriters]] entry or pass texts");
        }

        let typewriters = config
            .typewriters
            .iter()
            .enumerate()
            .map(|(idx, tw)| {
                let state = tw
                    .build()
                    .with_context(|| format!("Invalid configuration for typewriter #{}", idx + 1))?;
                Ok(TypewriterInstance {
                    title: tw.title.clone(),
                    state,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            theme: config.ui.theme(),
            blink: config.ui.cursor_blink(),
            config,
            typewriters,
            running: true,
            needs_render: true,
            now: Duration::ZERO,
        })
    }

    /// Start every timer chain
    pub fn mount_all(&mut self, now: Duration) {
        self.now = now;
        for instance in &mut self.typewriters {
            instance.state.mount(now);
        }
        tracing::info!("Mounted {} typewriter(s)", self.typewriters.len());
        self.needs_render = true;
    }

    /// Cancel every pending timer
    pub fn unmount_all(&mut self) {
        for instance in &mut self.typewriters {
            instance.state.unmount();
        }
        tracing::info!("Unmounted {} typewriter(s)", self.typewriters.len());
    }

    /// Advance every instance to `now`
    ///
    /// Returns the number of timer callbacks fired.
    pub fn tick(&mut self, now: Duration) -> usize {
        self.now = now;
        let fired: usize = self
            .typewriters
            .iter_mut()
            .map(|instance| instance.state.advance_to(now))
            .sum();

        if fired > 0 || self.any_cursor_animating() {
            self.needs_render = true;
        }

        fired
    }

    fn any_cursor_animating(&self) -> bool {
        self.typewriters.iter().any(|instance| {
            instance.state.is_active()
                && instance
                    .state
                    .mounted_at()
                    .is_some_and(|at| self.blink.is_animating(self.now.saturating_sub(at)))
        })
    }

    /// Cursor color for one instance at the current time
    pub fn cursor_color(&self, instance: &TypewriterInstance) -> Color {
        if !self.blink.enabled {
            return self.theme.link_color;
        }

        let opacity = instance
            .state
            .mounted_at()
            .and_then(|at| self.blink.opacity(self.now.saturating_sub(at)));
        self.theme.cursor_color(opacity)
    }

    /// Handle a key press; q, Esc and Ctrl+C quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            _ => {}
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        tracing::debug!("Terminal resized to {}x{}", width, height);
        self.needs_render = true;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypewriterConfig;
    use crate::widgets::Phase;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn core_with(texts: &[&[&str]]) -> AppCore {
        let mut config = Config::default();
        config.typewriters = texts
            .iter()
            .map(|t| TypewriterConfig::new(t.iter().map(|s| s.to_string()).collect()))
            .collect();
        AppCore::new(config).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_typewriter() {
        let mut config = Config::default();
        config.typewriters.push(TypewriterConfig::new(Vec::new()));
        let err = AppCore::new(config).err().unwrap();
        assert!(err.to_string().contains("typewriter #2"));
    }

    #[test]
    fn test_new_rejects_no_typewriters() {
        let mut config = Config::default();
        config.typewriters.clear();
        assert!(AppCore::new(config).is_err());
    }

    #[test]
    fn test_tick_drives_every_instance() {
        let mut core = core_with(&[&["ab"], &["xyz"]]);
        core.mount_all(Duration::ZERO);
        core.needs_render = false;

        assert_eq!(core.tick(ms(1500)), 2);
        assert!(core.needs_render);
        assert_eq!(core.typewriters[0].state.displayed(), "a");
        assert_eq!(core.typewriters[1].state.displayed(), "x");
    }

    #[test]
    fn test_no_render_while_idle_before_blink() {
        let mut core = core_with(&[&["ab"]]);
        core.mount_all(Duration::ZERO);
        core.needs_render = false;

        assert_eq!(core.tick(ms(500)), 0);
        assert!(!core.needs_render);

        // Blink starts at 1s and keeps frames coming
        core.tick(ms(1100));
        assert!(core.needs_render);
    }

    #[test]
    fn test_unmount_all_freezes_state() {
        let mut core = core_with(&[&["Engineer", "Builder"]]);
        core.mount_all(Duration::ZERO);
        core.tick(ms(1600));
        core.unmount_all();
        core.unmount_all();

        assert_eq!(core.tick(ms(100_000)), 0);
        assert_eq!(core.typewriters[0].state.displayed(), "En");
        assert_eq!(core.typewriters[0].state.phase(), Phase::TornDown);
    }

    #[test]
    fn test_cursor_color_blinks() {
        let mut core = core_with(&[&["ab"]]);
        core.mount_all(Duration::ZERO);

        core.tick(ms(500));
        assert_eq!(core.cursor_color(&core.typewriters[0]), core.theme.text_primary);

        core.tick(ms(1400));
        assert_eq!(core.cursor_color(&core.typewriters[0]), core.theme.link_color);

        core.tick(ms(1800));
        assert_eq!(
            core.cursor_color(&core.typewriters[0]),
            crate::theme::blend_colors(core.theme.background_primary, core.theme.link_color, 0.0)
        );
    }

    #[test]
    fn test_steady_cursor_when_blink_disabled() {
        let mut config = Config::default();
        config.ui.cursor_blink = false;
        let mut core = AppCore::new(config).unwrap();
        core.mount_all(Duration::ZERO);
        core.tick(ms(1800));
        assert_eq!(core.cursor_color(&core.typewriters[0]), core.theme.link_color);
    }

    #[test]
    fn test_quit_keys() {
        let mut core = core_with(&[&["a"]]);
        core.handle_key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(core.running);
        core.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!core.running);

        let mut core = core_with(&[&["a"]]);
        core.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!core.running);
    }
}

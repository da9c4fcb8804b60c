use super::typewriter::{layout_rects, parse_border_type, widget_width, Typewriter};
use crate::core::AppCore;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Style, widgets::Block, Terminal};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
///
/// Renders the typewriters with ratatui and reads input via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode and enters alternate screen.
    pub fn new() -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::ZERO, // Frame pacing is done by the host loop
            restored: false,
        })
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        while event::poll(self.poll_timeout)? {
            match event::read() {
                Ok(ev) => {
                    if let Some(frontend_event) = Self::convert_event(ev) {
                        events.push(frontend_event);
                    }
                }
                Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
            }
        }

        Ok(events)
    }

    fn render(&mut self, core: &AppCore) -> Result<()> {
        let ui = &core.config.ui;
        let theme = &core.theme;
        let border_type = parse_border_type(&ui.border_style);

        self.terminal.draw(|f| {
            let terminal_area = f.area();

            f.render_widget(
                Block::default().style(Style::default().bg(theme.background_primary)),
                terminal_area,
            );

            let widths: Vec<u16> = core
                .typewriters
                .iter()
                .map(|instance| {
                    widget_width(instance.state.texts(), &ui.cursor_glyph, ui.show_border)
                })
                .collect();
            let rects = layout_rects(terminal_area, &widths, ui.show_border);

            for (instance, rect) in core.typewriters.iter().zip(rects) {
                let widget = Typewriter::new(instance.state.view())
                    .title(instance.title.as_deref())
                    .cursor(&ui.cursor_glyph, core.cursor_color(instance))
                    .text_color(theme.text_primary)
                    .border(ui.show_border, border_type, theme.window_border, theme.window_title);
                f.render_widget(widget, rect);
            }
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // Restore terminal
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

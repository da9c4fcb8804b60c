//! Typewriter widget: the displayed text followed by a blinking cursor.
//!
//! The text and cursor color are computed by the core; this widget only
//! paints them, optionally inside a titled border.

use crate::widgets::TypewriterView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Rows taken by one typewriter
pub fn widget_height(show_border: bool) -> u16 {
    if show_border {
        3
    } else {
        1
    }
}

/// Columns needed to show the longest of `texts` plus the cursor without clipping
pub fn widget_width(texts: &[String], cursor_glyph: &str, show_border: bool) -> u16 {
    let longest = texts
        .iter()
        .map(|t| Span::raw(t.as_str()).width())
        .max()
        .unwrap_or(0);
    let chrome = if show_border { 4 } else { 0 };
    (longest + Span::raw(cursor_glyph).width() + chrome).min(u16::MAX as usize) as u16
}

/// Stack widgets of the given widths vertically, centered in `area`
pub fn layout_rects(area: Rect, widths: &[u16], show_border: bool) -> Vec<Rect> {
    let height = widget_height(show_border);
    let rows = Layout::vertical(widths.iter().map(|_| Constraint::Length(height)))
        .flex(Flex::Center)
        .split(area);

    rows.iter()
        .zip(widths)
        .map(|(row, width)| {
            let [col] = Layout::horizontal([Constraint::Length((*width).min(row.width))])
                .flex(Flex::Center)
                .areas(*row);
            col
        })
        .collect()
}

/// Map a border style name to a ratatui border type
pub fn parse_border_type(style: &str) -> BorderType {
    match style {
        "double" => BorderType::Double,
        "rounded" => BorderType::Rounded,
        "thick" => BorderType::Thick,
        _ => BorderType::Plain,
    }
}

/// Renders one typewriter view
pub struct Typewriter<'a> {
    view: TypewriterView<'a>,
    title: Option<&'a str>,
    cursor_glyph: &'a str,
    cursor_color: Color,
    text_color: Color,
    show_border: bool,
    border_type: BorderType,
    border_color: Color,
    title_color: Color,
}

impl<'a> Typewriter<'a> {
    pub fn new(view: TypewriterView<'a>) -> Self {
        Self {
            view,
            title: None,
            cursor_glyph: " |",
            cursor_color: Color::White,
            text_color: Color::White,
            show_border: false,
            border_type: BorderType::Plain,
            border_color: Color::White,
            title_color: Color::White,
        }
    }

    pub fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    pub fn cursor(mut self, glyph: &'a str, color: Color) -> Self {
        self.cursor_glyph = glyph;
        self.cursor_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn border(
        mut self,
        show: bool,
        border_type: BorderType,
        color: Color,
        title_color: Color,
    ) -> Self {
        self.show_border = show;
        self.border_type = border_type;
        self.border_color = color;
        self.title_color = title_color;
        self
    }
}

impl Widget for Typewriter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let inner_area = if self.show_border {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_type(self.border_type)
                .border_style(Style::default().fg(self.border_color));
            if let Some(title) = self.title {
                block = block.title(Span::styled(title, Style::default().fg(self.title_color)));
            }
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.width == 0 || inner_area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled(self.view.text, Style::default().fg(self.text_color))];
        if self.view.cursor {
            spans.push(Span::styled(
                self.cursor_glyph,
                Style::default().fg(self.cursor_color),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner_area, buf);
    }
}

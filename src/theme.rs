//! Application-wide theme system
//!
//! Provides the handful of colors the typewriter needs, a set of built-in
//! presets, and color blending used to fade the cursor in and out.

use ratatui::style::Color;
use std::collections::HashMap;

/// Complete application theme defining all UI colors
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub name: String,
    pub description: String,

    // Window colors
    pub window_border: Color,
    pub window_title: Color,

    // Text colors
    pub text_primary: Color,

    // Background colors
    pub background_primary: Color,

    // Cursor "visible" color
    pub link_color: Color,
}

impl AppTheme {
    /// Replace the link color (used for `ui.cursor_color` overrides)
    pub fn with_link_color(mut self, color: Color) -> Self {
        self.link_color = color;
        self
    }

    /// Cursor color for a blink opacity
    ///
    /// `None` means the blink has not started and the cursor uses the text
    /// color. Zero opacity is the background, a terminal's "transparent".
    pub fn cursor_color(&self, opacity: Option<f32>) -> Color {
        match opacity {
            None => self.text_primary,
            Some(opacity) => blend_colors(self.background_primary, self.link_color, opacity),
        }
    }
}

fn color_to_rgb_components(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(index) => indexed_color_to_rgb(index),
        Color::Reset => (0, 0, 0),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 102, 102),
        Color::LightGreen => (102, 255, 102),
        Color::LightYellow => (255, 255, 102),
        Color::LightBlue => (173, 216, 230),
        Color::LightMagenta => (255, 119, 255),
        Color::LightCyan => (224, 255, 255),
        Color::White => (255, 255, 255),
    }
}

fn indexed_color_to_rgb(index: u8) -> (u8, u8, u8) {
    const STANDARD_COLORS: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];

    if index < 16 {
        return STANDARD_COLORS[index as usize];
    }

    if index <= 231 {
        let level = index as usize - 16;
        let r = level / 36;
        let g = (level % 36) / 6;
        let b = level % 6;
        let levels = [0, 95, 135, 175, 215, 255];
        return (levels[r], levels[g], levels[b]);
    }

    let gray = 8 + (index.saturating_sub(232)) * 10;
    (gray, gray, gray)
}

/// Linear blend from `base` (ratio 0.0) to `other` (ratio 1.0)
pub fn blend_colors(base: Color, other: Color, ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let (br, bg, bb) = color_to_rgb_components(base);
    let (or, og, ob) = color_to_rgb_components(other);
    let blend_component = |a: u8, b: u8| -> u8 {
        let value = (a as f32) * (1.0 - ratio) + (b as f32) * ratio;
        value.round().clamp(0.0, 255.0) as u8
    };

    Color::Rgb(
        blend_component(br, or),
        blend_component(bg, og),
        blend_component(bb, ob),
    )
}

/// Parse a `#rrggbb` hex color string
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Built-in theme presets
pub struct ThemePresets;

impl ThemePresets {
    /// Get all available built-in themes
    pub fn all() -> HashMap<String, AppTheme> {
        let mut themes = HashMap::new();
        themes.insert("dark".to_string(), Self::dark());
        themes.insert("light".to_string(), Self::light());
        themes.insert("nord".to_string(), Self::nord());
        themes.insert("dracula".to_string(), Self::dracula());
        themes.insert("monokai".to_string(), Self::monokai());
        themes.insert("reduced-motion".to_string(), Self::reduced_motion());
        themes
    }

    /// Look up a preset by id, falling back to dark
    pub fn get(id: &str) -> AppTheme {
        match Self::all().remove(id) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown theme '{}', using dark", id);
                Self::dark()
            }
        }
    }

    /// Default dark theme
    pub fn dark() -> AppTheme {
        AppTheme {
            name: "Dark".to_string(),
            description: "Classic dark theme with cyan accents".to_string(),
            window_border: Color::Cyan,
            window_title: Color::White,
            text_primary: Color::White,
            background_primary: Color::Black,
            link_color: Color::Rgb(71, 122, 179),
        }
    }

    /// Light theme for daytime use
    pub fn light() -> AppTheme {
        AppTheme {
            name: "Light".to_string(),
            description: "Bright light theme for daytime use".to_string(),
            window_border: Color::Blue,
            window_title: Color::Black,
            text_primary: Color::Black,
            background_primary: Color::White,
            link_color: Color::Rgb(0, 0, 238),
        }
    }

    pub fn nord() -> AppTheme {
        AppTheme {
            name: "Nord".to_string(),
            description: "Arctic, north-bluish color palette".to_string(),
            window_border: Color::Rgb(136, 192, 208), // Nord frost
            window_title: Color::Rgb(236, 239, 244),  // Nord snow storm
            text_primary: Color::Rgb(236, 239, 244),
            background_primary: Color::Rgb(46, 52, 64),
            link_color: Color::Rgb(136, 192, 208),
        }
    }

    pub fn dracula() -> AppTheme {
        AppTheme {
            name: "Dracula".to_string(),
            description: "Dark theme with vibrant purple accents".to_string(),
            window_border: Color::Rgb(189, 147, 249), // Purple
            window_title: Color::Rgb(248, 248, 242),  // Foreground
            text_primary: Color::Rgb(248, 248, 242),
            background_primary: Color::Rgb(40, 42, 54),
            link_color: Color::Rgb(189, 147, 249),
        }
    }

    pub fn monokai() -> AppTheme {
        AppTheme {
            name: "Monokai".to_string(),
            description: "Warm dark theme from the classic editor scheme".to_string(),
            window_border: Color::Rgb(102, 217, 239),
            window_title: Color::Rgb(248, 248, 240),
            text_primary: Color::Rgb(248, 248, 240),
            background_primary: Color::Rgb(39, 40, 34),
            link_color: Color::Rgb(102, 217, 239),
        }
    }

    /// Reduced Motion - Subtle colors to minimize visual stress
    ///
    /// Pair with `ui.cursor_blink = false` for a steady cursor.
    pub fn reduced_motion() -> AppTheme {
        AppTheme {
            name: "Reduced Motion".to_string(),
            description: "Subtle colors to minimize visual stress and motion sensitivity"
                .to_string(),
            window_border: Color::Rgb(90, 93, 97),
            window_title: Color::Rgb(212, 212, 212),
            text_primary: Color::Rgb(212, 212, 212),
            background_primary: Color::Rgb(43, 45, 48),
            link_color: Color::Rgb(136, 163, 196),
        }
    }
}

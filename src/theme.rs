//! Picker colors, optionally read from a kitty-style color file
//! (`foreground #cdd6f4`, `color1 #f38ba8`, ...)

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,       // Focused border, selected marker (color2)
    pub danger: Color,       // Configuration errors (color1)
    pub text: Color,         // Labels (foreground)
    pub text_dim: Color,     // Disabled control, placeholder, icons (color8)
    pub bg_selected: Color,  // Focused / highlighted row
    pub inactive: Color,     // Unfocused borders
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
        }
    }
}

impl Theme {
    /// Load from a color file, falling back to defaults for anything missing
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_colors(&parse_color_file(&content)),
            Err(e) => {
                tracing::warn!("Could not read theme {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn from_colors(colors: &HashMap<String, Color>) -> Self {
        let defaults = Self::default();
        let pick = |keys: &[&str], fallback: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(fallback)
        };

        Self {
            accent: pick(&["color2", "color10"], defaults.accent),
            danger: pick(&["color1", "color9"], defaults.danger),
            text: pick(&["foreground"], defaults.text),
            text_dim: pick(&["color8"], defaults.text_dim),
            bg_selected: pick(&["selection_background", "color0"], defaults.bg_selected),
            inactive: pick(&["inactive_border_color", "color8"], defaults.inactive),
        }
    }
}

/// `key value` lines; comments and non-color values are skipped
fn parse_color_file(content: &str) -> HashMap<String, Color> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(char::is_whitespace))
        .filter_map(|(key, value)| Some((key.to_string(), parse_hex_color(value)?)))
        .collect()
}

/// `#RRGGBB` or `#RGB`
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}

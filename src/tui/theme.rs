use ratatui::style::Color;

use crate::model::UiConfig;

/// Colors used by the list UI. Each field can be overridden from
/// `[ui.colors]` by its name.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Focus border, selection marker, help keys
    pub accent: Color,
    /// Placeholder, completed rows, inactive tabs
    pub muted: Color,
    /// Delete button
    pub danger: Color,
    /// Checked checkbox
    pub done: Color,
    pub title: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            accent: Color::Rgb(0xFB, 0x41, 0x96),
            muted: Color::Rgb(0x7D, 0x78, 0xBF),
            danger: Color::Rgb(0xFF, 0x44, 0x44),
            done: Color::Rgb(0x44, 0xFF, 0x88),
            title: Color::Rgb(0xCC, 0x66, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            border: Color::Rgb(0x4A, 0x3F, 0x7A),
        }
    }
}

impl Theme {
    /// Defaults with any valid `[ui.colors]` entries applied
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (slot, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(%slot, %value, "ignoring invalid color");
                continue;
            };
            match theme.slot_mut(slot) {
                Some(target) => *target = color,
                None => tracing::warn!(%slot, "unknown color slot"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "accent" => &mut self.accent,
            "muted" => &mut self.muted,
            "danger" => &mut self.danger,
            "done" => &mut self.done,
            "title" => &mut self.title,
            "selection_bg" => &mut self.selection_bg,
            "border" => &mut self.border,
            _ => return None,
        };
        Some(slot)
    }

    /// Checkbox color for a row
    pub fn check_color(&self, completed: bool) -> Color {
        if completed { self.done } else { self.text }
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

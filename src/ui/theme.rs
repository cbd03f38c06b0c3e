//! Catppuccin palette (https://catppuccin.com), trimmed to what the
//! renderer uses

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark
    Latte, // Light
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mauve: Color,
    pub yellow: Color,
    pub lavender: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay0: Color,
    pub surface0: Color,
    pub base: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay0: Color::Rgb(0x6c, 0x70, 0x86),
            surface0: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
        }
    }

    fn latte() -> Self {
        Self {
            mauve: Color::Rgb(0x88, 0x39, 0xef),
            yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
            lavender: Color::Rgb(0x72, 0x87, 0xfd),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
            overlay0: Color::Rgb(0x9c, 0xa0, 0xb0),
            surface0: Color::Rgb(0xcc, 0xd0, 0xda),
            base: Color::Rgb(0xef, 0xf1, 0xf5),
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.mauve).add_modifier(Modifier::BOLD)
    }

    pub fn cell_style(&self, selected: bool, enabled: bool) -> Style {
        match (selected, enabled) {
            (true, _) => Style::default().fg(self.base).bg(self.lavender).add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(self.text),
            (false, false) => Style::default().fg(self.overlay0),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.lavender)
        } else {
            Style::default().fg(self.overlay0)
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.subtext0).bg(self.surface0)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.yellow).bg(self.surface0)
    }
}

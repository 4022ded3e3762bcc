//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Color constants and the component styles built from them.
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PINK: Color = Color::Rgb(245, 194, 231); // Pink
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn base_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn border_style() -> Style {
    Style::default().fg(PURPLE)
}

pub fn focused_border_style() -> Style {
    Style::default().fg(CYAN)
}

pub fn muted_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(CURRENT_LINE)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn chip_style(active: bool, focused: bool) -> Style {
    let style = if active {
        Style::default().bg(PURPLE).fg(BACKGROUND)
    } else {
        Style::default().bg(CURRENT_LINE).fg(FOREGROUND)
    };
    if focused {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

pub fn tag_style() -> Style {
    Style::default().bg(CURRENT_LINE).fg(PINK)
}

/// Action label; dimmed when the action is unavailable.
pub fn action_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COMMENT).add_modifier(Modifier::CROSSED_OUT)
    }
}

pub fn key_hint_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn link_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::UNDERLINED)
}

pub fn toast_style() -> Style {
    Style::default().bg(GREEN).fg(BACKGROUND).add_modifier(Modifier::BOLD)
}

pub fn warning_style() -> Style {
    Style::default().fg(ORANGE)
}

pub fn error_style() -> Style {
    Style::default().fg(RED)
}

//! Keyboard shortcuts popover.
use crate::config::KeyConfig;
use crate::view::theme;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct ShortcutsOverlay<'a> {
    keys: &'a KeyConfig,
}

impl<'a> ShortcutsOverlay<'a> {
    pub fn new(keys: &'a KeyConfig) -> Self {
        Self { keys }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard shortcuts ")
            .title_alignment(Alignment::Center)
            .border_style(theme::focused_border_style())
            .style(theme::base_style());

        let paragraph = Paragraph::new(self.lines()).block(block);
        frame.render_widget(paragraph, area);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let k = self.keys;
        let mut lines = vec![section("Gallery")];
        lines.extend([
            binding("↑ ↓", "Select resource"),
            binding("← →", "Move between categories"),
            binding("Space / a", "Toggle category / show all"),
            binding("Enter", "View resource"),
            binding(&k.remix.to_string(), "Remix selected resource"),
            binding(&format!("Ctrl+K / {}", k.search), "Search"),
            binding("q", "Quit"),
        ]);
        lines.push(Line::from(""));
        lines.push(section("Resource"));
        lines.extend([
            binding("← →", "Previous / next resource"),
            binding(&k.remix.to_string(), "Remix in Figma"),
            binding(&k.share.to_string(), "Copy link"),
            binding(&format!("Ctrl+K / {}", k.search), "Search and jump"),
            binding("Esc", "Close"),
        ]);
        lines.push(Line::from(""));
        lines.push(section("History"));
        lines.extend([
            binding("Alt+← / Backspace", "Back"),
            binding("Alt+→", "Forward"),
        ]);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Press Esc or {} to close", k.shortcuts),
            theme::muted_style(),
        )));
        lines
    }
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<20}"), theme::key_hint_style()),
        Span::raw(description),
    ])
}

//! Single toast pinned to the bottom-right corner.
use crate::model::toast::Toast;
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub struct ToastOverlay;

impl ToastOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, toast: &Toast, screen: Rect) {
        let area = toast_rect(toast.message(), screen);
        frame.render_widget(Clear, area);
        let body = Paragraph::new(format!(" {} ", toast.message()))
            .style(theme::toast_style())
            .alignment(Alignment::Center);
        frame.render_widget(body, area);
    }
}

impl Default for ToastOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// One row above the status bar, right-aligned, clipped to the screen.
fn toast_rect(message: &str, screen: Rect) -> Rect {
    let width = (message.width() as u16 + 2).min(screen.width);
    let height = 1.min(screen.height);
    Rect {
        x: screen.x + screen.width - width,
        y: screen.y + screen.height.saturating_sub(2),
        width,
        height,
    }
}

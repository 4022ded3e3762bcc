//! src/view/components/status_bar.rs
//!
//! Bottom line: current route and input context on the left, the pending
//! notification (or key hints) on the right.

use crate::{
    controller::handlers::InputContext,
    model::{
        route::Route,
        ui_state::{Notification, NotificationLevel},
    },
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        route: &Route,
        context: InputContext,
        notification: Option<&Notification>,
        area: Rect,
    ) {
        let context_str = match context {
            InputContext::Listing => "Gallery",
            InputContext::Modal => "Resource",
            InputContext::Search => "Search",
            InputContext::Shortcuts => "Shortcuts",
        };
        let left_text = format!(" {context_str} | {}", route.path());

        let (right_text, right_style) = match notification {
            Some(n) => {
                let style = match n.level {
                    NotificationLevel::Info => Style::default().fg(theme::CYAN),
                    NotificationLevel::Warning => theme::warning_style(),
                    NotificationLevel::Error => theme::error_style(),
                };
                (format!("{} ", n.message), style)
            }
            None => ("? shortcuts | q quit ".to_string(), theme::muted_style()),
        };

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        Paragraph::new(left_text)
            .style(theme::base_style())
            .alignment(Alignment::Left)
            .render(left, frame.buffer_mut());

        Paragraph::new(right_text)
            .style(theme::base_style().patch(right_style))
            .alignment(Alignment::Right)
            .render(right, frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

//! Category chips above the gallery. The leading "All" chip is active while
//! no category is selected.

use crate::model::library::ResourceLibraryStore;
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const ALL_CHIP: &str = "All";

pub struct CategoryBar;

impl CategoryBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        store: &ResourceLibraryStore,
        chip_cursor: usize,
        focused: bool,
        area: Rect,
    ) {
        let mut spans = Vec::with_capacity(store.categories().len() * 2 + 2);
        spans.push(Span::styled(
            format!(" {ALL_CHIP} "),
            theme::chip_style(store.selection().is_empty(), focused && chip_cursor == 0),
        ));

        for (i, category) in store.categories().iter().enumerate() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", category.title),
                theme::chip_style(
                    store.is_selected(&category.id),
                    focused && chip_cursor == i + 1,
                ),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Categories ")
            .border_style(if focused {
                theme::focused_border_style()
            } else {
                theme::border_style()
            })
            .style(theme::base_style());

        let chips = Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(chips, area);
    }
}

impl Default for CategoryBar {
    fn default() -> Self {
        Self::new()
    }
}

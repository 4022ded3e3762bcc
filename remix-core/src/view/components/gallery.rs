//! Resource cards of the filtered view.

use crate::model::library::ResourceLibraryStore;
use crate::model::resource::Resource;
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct Gallery;

impl Gallery {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        store: &ResourceLibraryStore,
        resources: &[&Resource],
        selected: usize,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Resources ({}) ", resources.len()))
            .border_style(theme::border_style())
            .style(theme::base_style());

        if resources.is_empty() {
            let empty = Paragraph::new("No resources in the selected categories.")
                .style(theme::muted_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = resources
            .iter()
            .map(|resource| ListItem::new(card_line(store, resource)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ");

        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

fn card_line<'a>(store: &'a ResourceLibraryStore, resource: &'a Resource) -> Line<'a> {
    let category = resource
        .category_ref
        .as_deref()
        .and_then(|id| store.category_title(id))
        .unwrap_or("Uncategorized");

    Line::from(vec![
        Span::styled(resource.name.as_str(), Style::default().fg(theme::FOREGROUND)),
        Span::styled(format!("  {category}"), Style::default().fg(theme::PURPLE)),
        Span::raw("  "),
        Span::styled("[Remix]", theme::action_style(resource.can_remix())),
    ])
}

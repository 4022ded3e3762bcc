//! Search overlay: query input, live results over the full collection.
use crate::model::resource::Resource;
use crate::model::search_index::{SearchIndex, SearchOverlayState};
use crate::view::theme;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub const NO_RESULTS: &str = "No results found.";

pub struct SearchOverlay;

impl SearchOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        index: &SearchIndex,
        state: &SearchOverlayState,
        results: &[&Resource],
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let [input_area, results_area, footer_area] = Layout::vertical([
            Constraint::Length(3), // Input field
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Key hints
        ])
        .areas(area);

        self.render_input(frame, state, input_area);
        self.render_results(frame, index, state, results, results_area);
        self.render_footer(frame, results.get(state.selected).copied(), footer_area);
    }

    fn render_input(&self, frame: &mut Frame<'_>, state: &SearchOverlayState, area: Rect) {
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .title_alignment(Alignment::Center)
            .border_style(theme::focused_border_style())
            .style(theme::base_style());

        let input = Paragraph::new(format!("{}│", state.input)).block(input_block);
        frame.render_widget(input, area);
    }

    fn render_results(
        &self,
        frame: &mut Frame<'_>,
        index: &SearchIndex,
        state: &SearchOverlayState,
        results: &[&Resource],
        area: Rect,
    ) {
        let results_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} results ", results.len()))
            .title_alignment(Alignment::Center)
            .border_style(theme::border_style())
            .style(theme::base_style());

        if results.is_empty() {
            let empty = Paragraph::new(NO_RESULTS)
                .style(theme::muted_style())
                .alignment(Alignment::Center)
                .block(results_block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = results
            .iter()
            .map(|resource| {
                let category = resource
                    .category_ref
                    .as_deref()
                    .and_then(|id| index.category_title(id))
                    .unwrap_or("");
                let tags = resource.tag_titles().collect::<Vec<_>>().join(", ");

                let mut spans = vec![
                    Span::styled(resource.name.as_str(), Style::default().fg(theme::FOREGROUND)),
                    Span::styled(format!("  {category}"), Style::default().fg(theme::PURPLE)),
                ];
                if !tags.is_empty() {
                    spans.push(Span::styled(format!("  {tags}"), theme::muted_style()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(results_block)
            .highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default().with_selected(Some(state.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_footer(&self, frame: &mut Frame<'_>, highlighted: Option<&Resource>, area: Rect) {
        let can_remix = highlighted.is_some_and(Resource::can_remix);
        let hints = Line::from(vec![
            Span::styled("Enter", theme::key_hint_style()),
            Span::styled(" view  ", theme::muted_style()),
            Span::styled("Ctrl+R", theme::key_hint_style()),
            Span::styled(" remix", theme::action_style(can_remix)),
            Span::styled("  Esc", theme::key_hint_style()),
            Span::styled(" close", theme::muted_style()),
        ]);
        frame.render_widget(Paragraph::new(hints).style(theme::base_style()), area);
    }
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self::new()
    }
}

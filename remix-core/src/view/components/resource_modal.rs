//! Detail view of the open resource.

use crate::config::KeyConfig;
use crate::model::library::ResourceLibraryStore;
use crate::model::modal::ModalNavigator;
use crate::model::resource::Resource;
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const TAG_GAP: usize = 1;

/// Cells taken by a tag chip: the title padded by one space on each side.
fn chip_width(title: &str) -> usize {
    title.width() + 2
}

fn overflow_label(hidden: usize) -> String {
    format!("+{hidden} more")
}

/// How many leading tags fit in `max_width` cells. When not all of them fit,
/// every shown tag must also leave room for the "+N more" chip after it.
pub fn fit_tags(titles: &[&str], max_width: usize) -> usize {
    let total: usize = titles.iter().map(|t| chip_width(t)).sum::<usize>()
        + TAG_GAP * titles.len().saturating_sub(1);
    if total <= max_width {
        return titles.len();
    }

    let mut used = 0;
    for (i, title) in titles.iter().enumerate() {
        let gap = if i == 0 { 0 } else { TAG_GAP };
        let hidden_after = titles.len() - i - 1;
        let reserve = if hidden_after == 0 {
            0
        } else {
            TAG_GAP + chip_width(&overflow_label(hidden_after))
        };
        if used + gap + chip_width(title) + reserve > max_width {
            return i;
        }
        used += gap + chip_width(title);
    }
    titles.len()
}

pub struct ResourceModal<'a> {
    keys: &'a KeyConfig,
}

impl<'a> ResourceModal<'a> {
    pub fn new(keys: &'a KeyConfig) -> Self {
        Self { keys }
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        store: &ResourceLibraryStore,
        modal: &ModalNavigator,
        area: Rect,
    ) {
        let Some(resource) = modal.current_resource(store) else {
            return;
        };
        frame.render_widget(Clear, area);

        let position = modal
            .position()
            .map(|(at, len)| format!(" {at} / {len} "))
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", resource.name))
            .title_bottom(Line::from(position).right_aligned())
            .border_style(theme::focused_border_style())
            .style(theme::base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            self.nav_line(modal.can_navigate()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Image   ", theme::muted_style()),
                Span::raw(resource.image_url.as_deref().unwrap_or("none")),
            ]),
            Line::from(vec![
                Span::styled("Alt     ", theme::muted_style()),
                Span::raw(resource.display_alt()),
            ]),
            Line::from(vec![
                Span::styled("Category ", theme::muted_style()),
                Span::styled(
                    resource
                        .category_ref
                        .as_deref()
                        .and_then(|id| store.category_title(id))
                        .unwrap_or("Uncategorized"),
                    Style::default().fg(theme::PURPLE),
                ),
            ]),
        ];

        lines.extend(tag_lines(resource, inner.width as usize));
        lines.push(source_line(resource));
        lines.push(Line::from(""));
        lines.push(self.action_line(resource));

        let body = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(body, inner);
    }

    fn nav_line(&self, can_navigate: bool) -> Line<'static> {
        Line::from(vec![
            Span::styled("← Prev", theme::action_style(can_navigate)),
            Span::raw("   "),
            Span::styled("Next →", theme::action_style(can_navigate)),
            Span::raw("   "),
            Span::styled("Esc", theme::key_hint_style()),
            Span::styled(" close", theme::muted_style()),
        ])
    }

    fn action_line(&self, resource: &Resource) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("[{}]", self.keys.remix), theme::key_hint_style()),
            Span::styled(" Remix in Figma", theme::action_style(resource.can_remix())),
            Span::raw("   "),
            Span::styled(format!("[{}]", self.keys.share), theme::key_hint_style()),
            Span::styled(" Copy link", theme::action_style(true)),
        ])
    }
}

fn tag_lines(resource: &Resource, width: usize) -> Vec<Line<'_>> {
    let titles: Vec<&str> = resource.tag_titles().collect();
    if titles.is_empty() {
        return Vec::new();
    }

    let shown = fit_tags(&titles, width);
    let mut spans = Vec::with_capacity(shown * 2 + 1);
    for (i, title) in titles[..shown].iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".repeat(TAG_GAP)));
        }
        spans.push(Span::styled(format!(" {title} "), theme::tag_style()));
    }

    let hidden = &titles[shown..];
    let mut lines = Vec::with_capacity(2);
    if hidden.is_empty() {
        lines.push(Line::from(spans));
    } else {
        if shown > 0 {
            spans.push(Span::raw(" ".repeat(TAG_GAP)));
        }
        spans.push(Span::styled(
            format!(" {} ", overflow_label(hidden.len())),
            theme::chip_style(false, false),
        ));
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            hidden.join(", "),
            theme::muted_style(),
        )));
    }
    lines
}

fn source_line(resource: &Resource) -> Line<'_> {
    let mut spans = vec![
        Span::styled("Source  ", theme::muted_style()),
        Span::raw(resource.source_label()),
    ];
    if let Some(url) = resource.source_url.as_deref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(url, theme::link_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tags_fit() {
        assert_eq!(fit_tags(&["ui", "web"], 40), 2);
        assert_eq!(fit_tags(&[], 0), 0);
    }

    #[test]
    fn overflow_reserves_room_for_more_chip() {
        // " alpha " is 7 cells, " +2 more " is 9 cells.
        let titles = ["alpha", "beta", "gamma"];
        assert_eq!(fit_tags(&titles, 7 + 1 + 9), 1);
        assert_eq!(fit_tags(&titles, 7 + 1 + 9 - 1), 0);
    }

    #[test]
    fn last_tag_needs_no_reservation() {
        // " a " + gap + " b " = 7 cells.
        assert_eq!(fit_tags(&["a", "b"], 7), 2);
        assert_eq!(fit_tags(&["a", "b"], 6), 0);
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(chip_width("日本"), 6);
    }
}

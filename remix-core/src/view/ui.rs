//! src/view/ui.rs
//! ============================================================
//! Frame renderer that draws the whole TUI from the current `AppState`.

use ratatui::prelude::*;
use tracing::instrument;

use crate::{
    model::app_state::AppState,
    view::components::{
        category_bar::CategoryBar, gallery::Gallery, resource_modal::ResourceModal,
        search_overlay::SearchOverlay, shortcuts_overlay::ShortcutsOverlay,
        status_bar::StatusBar, toast_overlay::ToastOverlay,
    },
};

/// ---------------------------------------------------------------------------
/// Renderer struct (layout cache + stats)
/// ---------------------------------------------------------------------------
#[derive(Debug, Default)]
pub struct UIRenderer {
    cache: LayoutCache,
    frames: u64,
}

#[derive(Debug, Default)]
struct LayoutCache {
    screen: Rect,
    main: [Rect; 3],
    hit: u64,
    miss: u64,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// ---------------------------------------------------------------------------
/// public API
/// ---------------------------------------------------------------------------
impl UIRenderer {
    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &AppState) {
        let screen = f.area();
        self.update_layout_cache(screen);
        let [chips, cards, status] = self.cache.main;

        let listing_focused = !app.modal.is_open() && !app.ui.search_open();
        CategoryBar::new().render(f, &app.store, app.ui.chip_cursor, listing_focused, chips);
        Gallery::new().render(f, &app.store, &app.gallery(), app.ui.selected, cards);
        StatusBar::new().render(
            f,
            app.history.current(),
            app.input_context(),
            app.ui.notification.as_ref(),
            status,
        );

        self.draw_overlays(f, app, screen);
        self.frames += 1;
    }
}

/// ---------------------------------------------------------------------------
/// overlays, innermost last
/// ---------------------------------------------------------------------------
impl UIRenderer {
    fn draw_overlays(&self, f: &mut Frame<'_>, app: &AppState, screen: Rect) {
        let keys = &app.config().keys;

        if app.modal.is_open() {
            ResourceModal::new(keys).render(f, &app.store, &app.modal, centered(screen, 80, 80));
        }

        if let Some(search) = app.ui.search.as_ref() {
            SearchOverlay::new().render(
                f,
                &app.search_index,
                search,
                &app.search_results(),
                centered(screen, 70, 70),
            );
        }

        if app.ui.shortcuts_open {
            ShortcutsOverlay::new(keys).render(f, centered(screen, 60, 80));
        }

        if let Some(toast) = app.toasts.current() {
            ToastOverlay::new().render(f, toast, screen);
        }
    }
}

/// ---------------------------------------------------------------------------
/// util: layout / rectangles
/// ---------------------------------------------------------------------------
impl UIRenderer {
    fn update_layout_cache(&mut self, scr: Rect) {
        if self.cache.screen == scr && self.cache.hit + self.cache.miss > 0 {
            self.cache.hit += 1;
            return;
        }

        self.cache.screen = scr;
        self.cache.miss += 1;
        self.cache.main = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(scr);
    }
}

/// Rectangle of `w_pct` x `h_pct` percent centered in `r`.
pub fn centered(r: Rect, w_pct: u16, h_pct: u16) -> Rect {
    // u32 keeps wide terminals from overflowing before the division
    let scale = |len: u16, pct: u16| {
        let scaled = u32::from(len) * u32::from(pct) / 100;
        u16::try_from(scaled).unwrap_or(len).min(len)
    };
    let w = scale(r.width, w_pct);
    let h = scale(r.height, h_pct);
    Rect {
        x: r.x + (r.width - w) / 2,
        y: r.y + (r.height - h) / 2,
        width: w,
        height: h,
    }
}

//! Presentation state that is not part of the library itself: cursors,
//! open overlays and the status-line notification.

use std::time::Instant;

use compact_str::CompactString;

use crate::model::modal::Direction;
use crate::model::search_index::SearchOverlayState;

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Status-line message, cleared by the next key press.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Highlighted card in the filtered gallery.
    pub selected: usize,
    /// Chip cursor; 0 is the "All" chip, `n` is category `n - 1`.
    pub chip_cursor: usize,
    pub search: Option<SearchOverlayState>,
    pub shortcuts_open: bool,
    pub notification: Option<Notification>,
}

impl UiState {
    pub fn search_open(&self) -> bool {
        self.search.is_some()
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Move over `chip_count + 1` chips (the leading "All" chip included),
    /// stopping at both ends.
    pub fn move_chip_cursor(&mut self, direction: Direction, chip_count: usize) {
        self.chip_cursor = match direction {
            Direction::Prev => self.chip_cursor.saturating_sub(1),
            Direction::Next => (self.chip_cursor + 1).min(chip_count),
        };
    }

    pub fn notify(&mut self, message: impl Into<CompactString>, level: NotificationLevel) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut ui = UiState::default();
        ui.select_next(3);
        ui.select_next(3);
        ui.select_next(3);
        assert_eq!(ui.selected, 2);

        ui.clamp_selection(1);
        assert_eq!(ui.selected, 0);
        ui.clamp_selection(0);
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn chip_cursor_covers_all_chip() {
        let mut ui = UiState::default();
        ui.move_chip_cursor(Direction::Prev, 2);
        assert_eq!(ui.chip_cursor, 0);
        for _ in 0..5 {
            ui.move_chip_cursor(Direction::Next, 2);
        }
        assert_eq!(ui.chip_cursor, 2);
    }
}

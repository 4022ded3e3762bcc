//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Every key press, terminal event and background completion is turned into
//! an `Action` before it touches state. `AppState::dispatch` is the only
//! place actions are applied.

use crate::controller::event_loop::TaskResult;
use crate::model::modal::Direction;

/// Represents a high-level action that the application can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Clear the category selection ("All" chip).
    ClearChips,

    /// Close the resource modal.
    CloseModal,

    /// Close the search overlay.
    CloseSearch,

    /// Close the shortcuts popover.
    CloseShortcuts,

    /// Move the chip cursor left or right.
    MoveChipCursor(Direction),

    /// Move the gallery selection down.
    MoveSelectionDown,

    /// Move the gallery selection up.
    MoveSelectionUp,

    /// Session history back.
    HistoryBack,

    /// Session history forward.
    HistoryForward,

    /// Step the modal to the previous or next resource.
    NavigateModal(Direction),

    /// No operation. The key was consumed but nothing changes.
    NoOp,

    /// Open the modal for the selected gallery card.
    OpenSelected,

    /// Open the search overlay.
    OpenSearch,

    /// Quit the application.
    Quit,

    /// Copy the current modal resource's payload.
    RemixCurrent,

    /// Copy the selected gallery card's payload.
    RemixSelected,

    /// A terminal resize event.
    Resize(u16, u16),

    /// Delete the last character of the search query.
    SearchBackspace,

    /// Append a character to the search query.
    SearchInput(char),

    /// Move the search highlight down.
    SearchNext,

    /// Open the highlighted search hit.
    SearchOpen,

    /// Move the search highlight up.
    SearchPrev,

    /// Copy the highlighted search hit's payload.
    SearchRemix,

    /// Copy the current modal resource's share link.
    ShareCurrent,

    /// A result from a background task.
    TaskResult(TaskResult),

    /// Toggle the category under the chip cursor.
    ToggleChip,

    /// Toggle the shortcuts popover.
    ToggleShortcuts,
}

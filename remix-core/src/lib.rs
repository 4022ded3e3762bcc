pub mod error;

pub mod config;

pub mod data {
    pub mod catalog;
    pub use catalog::{Catalog, CatalogError};

    pub mod source;
    pub use source::{Dataset, JsonFileSource, ResourceSource, StaticSource};
}

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod clipboard_worker;
    pub use clipboard_worker::ClipboardWorker;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod handlers;
}

pub mod model {
    pub mod app_state;

    pub mod history;
    pub use history::{HistoryEvent, SessionHistory};

    pub mod library;
    pub use library::{ResourceLibraryStore, SelectionState};

    pub mod modal;
    pub use modal::{Direction, ModalNavigator, ModalState};

    pub mod resource;
    pub use resource::{Category, Resource, ResourceKey, Tag};

    pub mod route;
    pub use route::Route;

    pub mod search_index;
    pub use search_index::SearchIndex;

    pub mod toast;
    pub use toast::{Toast, ToastKind, ToastScheduler, ToastScope};

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, UiState};
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod category_bar;
        pub use category_bar::CategoryBar;
        pub mod gallery;
        pub use gallery::Gallery;
        pub mod resource_modal;
        pub use resource_modal::ResourceModal;
        pub mod search_overlay;
        pub use search_overlay::SearchOverlay;
        pub mod shortcuts_overlay;
        pub use shortcuts_overlay::ShortcutsOverlay;
        pub mod status_bar;
        pub use status_bar::StatusBar;
        pub mod toast_overlay;
        pub use toast_overlay::ToastOverlay;
    }
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::app_state::AppState;

//! Key handlers, one per input context, chained by `KeyRouter`.

pub mod gallery_handler;
pub mod keyboard_handler;
pub mod key_router;
pub mod modal_handler;
pub mod search_handler;
pub mod shortcuts_handler;

pub mod utils;
pub use utils::*;

pub use key_router::KeyRouter;

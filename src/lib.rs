//! Modal keyboard navigation for web pages
//!
//! The host forwards page events (keys, focus, frames, timers, runtime
//! messages) to an [`Engine`], which owns the page model and all state.

pub mod actions;
pub mod config;
pub mod dom;
mod engine;
pub mod error;
pub mod field_nav;
pub mod find;
pub mod key_hint;
pub mod keyboard;
mod keyboard_handler;
pub mod link_hints;
pub mod messaging;
pub mod scheduler;
pub mod scroll_mode;
pub mod state;

use std::io::Write;

pub use actions::{Action, PrefixKey, TabAction};
pub use config::{EngineConfig, Settings, ToggleShortcut};
pub use dom::{Document, NodeId};
pub use engine::Engine;
pub use error::EngineError;
pub use keyboard::KeyEvent;
pub use keyboard_handler::KeyResult;
pub use messaging::{ChannelMessenger, Envelope, Messenger, OutboundMessage};
pub use state::Mode;

/// Install the stderr logger. Level comes from `RUST_LOG`, default `info`.
/// Safe to call more than once.
pub fn init_logger() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(buf, "[{}] {} - {}", timestamp, record.level(), record.args())
        })
        .try_init();
    if result.is_err() {
        log::debug!("Logger already installed");
    }
}

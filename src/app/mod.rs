//! Snippet dashboard state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete dashboard state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::markup::RenderOptions;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    snippets_path: PathBuf,
    watch_enabled: bool,
    render_options: RenderOptions,
}

impl App {
    /// Create a dashboard over the given snippet file.
    pub fn new(snippets_path: PathBuf) -> Self {
        Self {
            snippets_path,
            watch_enabled: false,
            render_options: RenderOptions::default(),
        }
    }

    /// Enable or disable file watching.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Options used for every preview render.
    pub const fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }
}

#[cfg(test)]
mod tests;

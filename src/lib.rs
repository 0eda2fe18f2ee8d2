// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. snippet::SnippetStore)
    clippy::module_name_repetitions
)]

//! # snipmark
//!
//! Inline markup and abbreviation tooling for a text expander.
//!
//! Snippet expansions may be written with a tiny markup language
//! (`**bold**`, `*italic*`, `[label](target)`). snipmark:
//! - Parses markup into a [`markup::Segment`] tree (never fails)
//! - Builds the rich (HTML) and plain clipboard payloads
//! - Stores snippets and simulates abbreviation matching on keystrokes
//! - Mirrors prefixed snippets into a replacement table for mobile sync
//! - Browses snippets in a terminal dashboard with live reload
//!
//! ## Architecture
//!
//! The dashboard uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`markup`]: Markup parsing, HTML and plain payloads
//! - [`snippet`]: Snippet records and storage
//! - [`matcher`]: Keystroke buffer and abbreviation matching
//! - [`sync`]: Replacement-table sync planning
//! - [`app`]: Dashboard state and main loop
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching
//! - [`config`]: Saved flag defaults
//! - [`perf`]: Timing instrumentation

pub mod app;
pub mod config;
pub mod markup;
pub mod matcher;
pub mod perf;
pub mod snippet;
pub mod sync;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::markup::{RenderOptions, Segment, has_formatting, render, to_html};
    pub use crate::matcher::{Expansion, Key, Matcher, Payload};
    pub use crate::snippet::{JsonSnippetStore, Snippet, SnippetStore};
}

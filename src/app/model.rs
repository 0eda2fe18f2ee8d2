use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::markup::{RenderOptions, Segment, render_with_options};
use crate::snippet::{self, Snippet};

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete dashboard state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    /// Snippets in file order
    pub snippets: Vec<Snippet>,
    /// Index into `snippets`; `None` only when the table is empty
    pub selected: Option<usize>,
    pub snippets_path: PathBuf,
    pub watch_enabled: bool,
    pub render_options: RenderOptions,
    pub help_visible: bool,
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Model {
    pub fn new(snippets_path: PathBuf, snippets: Vec<Snippet>) -> Self {
        let selected = (!snippets.is_empty()).then_some(0);
        Self {
            snippets,
            selected,
            snippets_path,
            ..Self::default()
        }
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        self.selected.and_then(|idx| self.snippets.get(idx))
    }

    /// Render an expansion with the dashboard's options.
    pub fn preview(&self, snippet: &Snippet) -> Vec<Segment> {
        render_with_options(&snippet.expansion, &self.render_options)
    }

    /// Replace the table, keeping the cursor on the same snippet id when it
    /// survives and clamping it otherwise.
    pub fn set_snippets(&mut self, snippets: Vec<Snippet>) {
        let selected_id = self.selected_snippet().map(|s| s.id.clone());
        let previous = self.selected.unwrap_or(0);
        self.snippets = snippets;
        self.selected = if self.snippets.is_empty() {
            None
        } else if let Some(idx) = selected_id
            .as_deref()
            .and_then(|id| self.snippets.iter().position(|s| s.id == id))
        {
            Some(idx)
        } else {
            Some(previous.min(self.snippets.len() - 1))
        };
    }

    /// Re-read the snippet file.
    ///
    /// # Errors
    /// Returns the store error when the file cannot be read or parsed; the
    /// current table is kept in that case.
    pub fn reload_from_disk(&mut self) -> snippet::Result<usize> {
        let snippets = snippet::load_snippets(&self.snippets_path)?;
        let count = snippets.len();
        self.set_snippets(snippets);
        Ok(count)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

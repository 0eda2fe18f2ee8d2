//! Abbreviation matching over a keystroke stream.
//!
//! The matcher is a pure state machine: the platform layer translates OS key
//! events into [`Key`]s, feeds them in, and performs whatever [`Expansion`]
//! comes back (erase the abbreviation, then type or paste the payload).

use crate::markup::{has_formatting, plain_text, render, to_html};
use crate::snippet::Snippet;

/// Keys the matcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    Space,
    Enter,
    Tab,
    Backspace,
    /// Anything else (arrows, modifiers, function keys)
    Other,
}

impl Key {
    /// Space, Enter and Tab end a word.
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::Space | Self::Enter | Self::Tab)
    }

    /// Map a typed character, treating whitespace controls as their keys.
    pub const fn from_char(ch: char) -> Self {
        match ch {
            ' ' => Self::Space,
            '\n' | '\r' => Self::Enter,
            '\t' => Self::Tab,
            _ => Self::Char(ch),
        }
    }
}

/// What to insert in place of the abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Typed character by character
    Plain(String),
    /// Placed on the clipboard in both flavours and pasted
    Rich { html: String, plain: String },
}

impl Payload {
    /// Text a plain-only target ends up with.
    pub fn plain(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Rich { plain: text, .. } => text,
        }
    }
}

/// A fired abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub abbreviation: String,
    /// Number of backspaces to send before inserting the payload
    pub erase: usize,
    pub payload: Payload,
}

impl Expansion {
    fn build(snippet: &Snippet, trailing_reset: bool) -> Self {
        let erase = snippet.abbreviation.chars().count() + usize::from(trailing_reset);
        let payload = if has_formatting(&snippet.expansion) {
            let segments = render(&snippet.expansion);
            Payload::Rich {
                html: to_html(&segments),
                plain: plain_text(&segments),
            }
        } else {
            Payload::Plain(snippet.expansion.clone())
        };
        Self {
            abbreviation: snippet.abbreviation.clone(),
            erase,
            payload,
        }
    }
}

/// Keystroke buffer plus the active snippet table.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    snippets: Vec<Snippet>,
    buffer: String,
    paused: bool,
}

impl Matcher {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self {
            snippets,
            ..Self::default()
        }
    }

    /// Swap in a freshly synced table. The typed buffer is kept.
    pub fn set_snippets(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            tracing::info!(paused, "expansion state changed");
        }
        self.paused = paused;
        self.buffer.clear();
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Process one key, returning the expansion it triggers, if any.
    pub fn feed(&mut self, key: Key) -> Option<Expansion> {
        if self.paused {
            return None;
        }
        match key {
            key if key.is_reset() => {
                if !self.buffer.is_empty()
                    && let Some(expansion) = self.check(true)
                {
                    return Some(expansion);
                }
                self.buffer.clear();
                None
            }
            Key::Backspace => {
                self.buffer.pop();
                None
            }
            Key::Char(ch) => {
                self.buffer.push(ch);
                self.check(false)
            }
            _ => None,
        }
    }

    /// Feed every character of `typed`, collecting what fires.
    pub fn feed_str(&mut self, typed: &str) -> Vec<Expansion> {
        typed
            .chars()
            .filter_map(|ch| self.feed(Key::from_char(ch)))
            .collect()
    }

    fn check(&mut self, trailing_reset: bool) -> Option<Expansion> {
        let snippet = self
            .snippets
            .iter()
            .find(|s| !s.abbreviation.is_empty() && self.buffer.ends_with(&s.abbreviation))?;
        let expansion = Expansion::build(snippet, trailing_reset);
        tracing::debug!(
            abbreviation = %expansion.abbreviation,
            erase = expansion.erase,
            "abbreviation matched"
        );
        self.buffer.clear();
        Some(expansion)
    }
}

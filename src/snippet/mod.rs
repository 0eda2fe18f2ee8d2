//! Snippet records and the storage seam behind them.
//!
//! A [`Snippet`] maps an abbreviation to its expansion text. Stores implement
//! [`SnippetStore`]; [`JsonSnippetStore`] keeps them in a local JSON file, the
//! same shape the expander caches between syncs.

mod store;

pub use store::{JsonSnippetStore, load_snippets, save_snippets};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One abbreviation → expansion mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub abbreviation: String,
    pub expansion: String,
}

impl Snippet {
    pub fn new(
        id: impl Into<String>,
        abbreviation: impl Into<String>,
        expansion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            abbreviation: abbreviation.into(),
            expansion: expansion.into(),
        }
    }
}

/// Errors raised by snippet stores.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("snippet not found: {0}")]
    NotFound(String),
    #[error("abbreviation must not be empty")]
    EmptyAbbreviation,
    #[error("snippet file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snippet file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnippetError>;

/// CRUD over the abbreviation table.
///
/// Implementations own their validation policy; the only rule enforced here
/// is that an abbreviation is never empty, since an empty suffix would fire
/// on every keystroke.
pub trait SnippetStore {
    /// All snippets in stored order.
    fn list(&self) -> Result<Vec<Snippet>>;

    /// Add a snippet and return its new id.
    fn create(&mut self, abbreviation: &str, expansion: &str) -> Result<String>;

    /// Replace the given fields of an existing snippet.
    fn update(
        &mut self,
        id: &str,
        abbreviation: Option<&str>,
        expansion: Option<&str>,
    ) -> Result<Snippet>;

    /// Remove a snippet.
    fn delete(&mut self, id: &str) -> Result<()>;
}

pub(crate) fn validate_abbreviation(abbreviation: &str) -> Result<()> {
    if abbreviation.is_empty() {
        return Err(SnippetError::EmptyAbbreviation);
    }
    Ok(())
}

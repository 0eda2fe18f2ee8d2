use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{Result, Snippet, SnippetError, SnippetStore, validate_abbreviation};

/// Read a snippet file. A missing file is an empty table.
pub fn load_snippets(path: &Path) -> Result<Vec<Snippet>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Write a snippet file as pretty JSON, creating its directory if needed.
pub fn save_snippets(path: &Path, snippets: &[Snippet]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(snippets)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Snippet store backed by a JSON file.
///
/// Every call re-reads the file so edits made by another process (the
/// dashboard, a sync run) are never overwritten with stale data.
#[derive(Debug, Clone)]
pub struct JsonSnippetStore {
    path: PathBuf,
}

impl JsonSnippetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnippetStore for JsonSnippetStore {
    fn list(&self) -> Result<Vec<Snippet>> {
        load_snippets(&self.path)
    }

    fn create(&mut self, abbreviation: &str, expansion: &str) -> Result<String> {
        validate_abbreviation(abbreviation)?;
        let mut snippets = load_snippets(&self.path)?;
        let id = Uuid::new_v4().to_string();
        snippets.push(Snippet::new(id.clone(), abbreviation, expansion));
        save_snippets(&self.path, &snippets)?;
        tracing::debug!(%id, abbreviation, "created snippet");
        Ok(id)
    }

    fn update(
        &mut self,
        id: &str,
        abbreviation: Option<&str>,
        expansion: Option<&str>,
    ) -> Result<Snippet> {
        if let Some(abbreviation) = abbreviation {
            validate_abbreviation(abbreviation)?;
        }
        let mut snippets = load_snippets(&self.path)?;
        let snippet = snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SnippetError::NotFound(id.to_string()))?;
        if let Some(abbreviation) = abbreviation {
            abbreviation.clone_into(&mut snippet.abbreviation);
        }
        if let Some(expansion) = expansion {
            expansion.clone_into(&mut snippet.expansion);
        }
        let updated = snippet.clone();
        save_snippets(&self.path, &snippets)?;
        tracing::debug!(id, "updated snippet");
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut snippets = load_snippets(&self.path)?;
        let before = snippets.len();
        snippets.retain(|s| s.id != id);
        if snippets.len() == before {
            return Err(SnippetError::NotFound(id.to_string()));
        }
        save_snippets(&self.path, &snippets)?;
        tracing::debug!(id, "deleted snippet");
        Ok(())
    }
}

//! Mobile text-replacement sync.
//!
//! Snippets whose abbreviation starts with the sync prefix are mirrored into
//! the OS text-replacement table so they reach the phone. The table is only
//! touched through the entries it owns (those carrying the prefix): new
//! abbreviations are inserted, changed phrases updated, entries that vanished
//! from the snippet list soft-deleted, and soft-deleted entries that came
//! back restored. Phrases are the raw expansion text.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::snippet::Snippet;

/// Default abbreviation prefix for snippets that sync to mobile.
///
/// The prefix marks which table rows sync owns. An empty prefix would claim
/// every row, so [`check_prefix`] rejects it.
pub const DEFAULT_SYNC_PREFIX: &str = "m";

/// Errors raised while reading or writing the replacement table.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("replacement table not found at {0}")]
    MissingTable(String),
    #[error("sync prefix must not be empty")]
    EmptyPrefix,
    #[error("replacement table I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("replacement table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the text-replacement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub pk: i64,
    pub shortcut: String,
    pub phrase: String,
    #[serde(default)]
    pub was_deleted: bool,
    #[serde(default)]
    pub unique_name: String,
}

/// A single change to the replacement table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Insert {
        pk: i64,
        shortcut: String,
        phrase: String,
    },
    Update {
        pk: i64,
        shortcut: String,
        phrase: String,
    },
    Restore {
        pk: i64,
        shortcut: String,
        phrase: String,
    },
    SoftDelete {
        pk: i64,
        shortcut: String,
    },
}

impl SyncAction {
    pub fn shortcut(&self) -> &str {
        match self {
            Self::Insert { shortcut, .. }
            | Self::Update { shortcut, .. }
            | Self::Restore { shortcut, .. }
            | Self::SoftDelete { shortcut, .. } => shortcut,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "Added:   ",
            Self::Update { .. } => "Updated: ",
            Self::Restore { .. } => "Restored:",
            Self::SoftDelete { .. } => "Deleted: ",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.shortcut())
    }
}

/// Ordered list of changes needed to bring the table in line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub actions: Vec<SyncAction>,
}

/// Change counts for a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub restored: usize,
}

impl SyncSummary {
    pub const fn total(&self) -> usize {
        self.added + self.updated + self.deleted + self.restored
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total() == 0 {
            return write!(f, "Already in sync. No changes needed.");
        }
        write!(
            f,
            "Sync complete: {} added, {} updated, {} deleted, {} restored.",
            self.added, self.updated, self.deleted, self.restored
        )
    }
}

/// Refuse prefixes that would hand every table row to sync.
///
/// # Errors
/// Returns [`SyncError::EmptyPrefix`] for `""`.
pub fn check_prefix(prefix: &str) -> Result<(), SyncError> {
    if prefix.is_empty() {
        return Err(SyncError::EmptyPrefix);
    }
    Ok(())
}

/// Work out the changes that mirror prefixed snippets into `table`.
///
/// `table` is the whole replacement table; entries without the prefix are
/// left alone but still count when picking fresh primary keys.
pub fn plan_sync(snippets: &[Snippet], table: &[ReplacementEntry], prefix: &str) -> SyncPlan {
    // Later duplicates win, first-seen order is kept.
    let mut wanted: Vec<(&str, &str)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for snippet in snippets
        .iter()
        .filter(|s| s.abbreviation.starts_with(prefix))
    {
        let abbreviation = snippet.abbreviation.as_str();
        if let Some(&slot) = index.get(abbreviation) {
            wanted[slot].1 = snippet.expansion.as_str();
        } else {
            index.insert(abbreviation, wanted.len());
            wanted.push((abbreviation, snippet.expansion.as_str()));
        }
    }

    let existing: HashMap<&str, &ReplacementEntry> = table
        .iter()
        .filter(|e| e.shortcut.starts_with(prefix))
        .map(|e| (e.shortcut.as_str(), e))
        .collect();
    let mut next_pk = table.iter().map(|e| e.pk).max().unwrap_or(0) + 1;

    let mut actions = Vec::new();
    for &(shortcut, phrase) in &wanted {
        match existing.get(shortcut) {
            Some(entry) if entry.was_deleted => actions.push(SyncAction::Restore {
                pk: entry.pk,
                shortcut: shortcut.to_string(),
                phrase: phrase.to_string(),
            }),
            Some(entry) if entry.phrase != phrase => actions.push(SyncAction::Update {
                pk: entry.pk,
                shortcut: shortcut.to_string(),
                phrase: phrase.to_string(),
            }),
            Some(_) => {}
            None => {
                actions.push(SyncAction::Insert {
                    pk: next_pk,
                    shortcut: shortcut.to_string(),
                    phrase: phrase.to_string(),
                });
                next_pk += 1;
            }
        }
    }

    for entry in table.iter().filter(|e| e.shortcut.starts_with(prefix)) {
        if !entry.was_deleted && !index.contains_key(entry.shortcut.as_str()) {
            actions.push(SyncAction::SoftDelete {
                pk: entry.pk,
                shortcut: entry.shortcut.clone(),
            });
        }
    }

    SyncPlan { actions }
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn summary(&self) -> SyncSummary {
        let mut summary = SyncSummary::default();
        for action in &self.actions {
            match action {
                SyncAction::Insert { .. } => summary.added += 1,
                SyncAction::Update { .. } => summary.updated += 1,
                SyncAction::Restore { .. } => summary.restored += 1,
                SyncAction::SoftDelete { .. } => summary.deleted += 1,
            }
        }
        summary
    }

    /// Apply every action to an in-memory table.
    pub fn apply(&self, table: &mut Vec<ReplacementEntry>) {
        for action in &self.actions {
            match action {
                SyncAction::Insert {
                    pk,
                    shortcut,
                    phrase,
                } => table.push(ReplacementEntry {
                    pk: *pk,
                    shortcut: shortcut.clone(),
                    phrase: phrase.clone(),
                    was_deleted: false,
                    unique_name: Uuid::new_v4().to_string().to_uppercase(),
                }),
                SyncAction::Update { pk, phrase, .. } => {
                    if let Some(entry) = table.iter_mut().find(|e| e.pk == *pk) {
                        entry.phrase.clone_from(phrase);
                    }
                }
                SyncAction::Restore { pk, phrase, .. } => {
                    if let Some(entry) = table.iter_mut().find(|e| e.pk == *pk) {
                        entry.phrase.clone_from(phrase);
                        entry.was_deleted = false;
                    }
                }
                SyncAction::SoftDelete { pk, .. } => {
                    if let Some(entry) = table.iter_mut().find(|e| e.pk == *pk) {
                        entry.was_deleted = true;
                    }
                }
            }
        }
    }
}

/// Read a replacement table. Unlike the snippet cache, a missing table is an
/// error: it means text replacements were never set up on this machine.
pub fn load_table(path: &Path) -> Result<Vec<ReplacementEntry>, SyncError> {
    if !path.exists() {
        return Err(SyncError::MissingTable(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_table(path: &Path, table: &[ReplacementEntry]) -> Result<(), SyncError> {
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

//! Snippet file watching for live reload.
//!
//! The dashboard watches the snippet file so entries added from another
//! shell (`snipmark add ...`) or written by a sync show up without a restart.
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one file and reports debounced changes.
///
/// Editors and `serde_json` writers often replace a file rather than modify
/// it in place, so the parent directory is watched and events are filtered
/// down to the target by path or file name.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    dir: PathBuf,
    file: PathBuf,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        let path = path.as_ref();
        // Event paths from the OS are canonical; match them against a
        // canonical target where the file already exists.
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = parent_dir(&file);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(file = %file.display(), "watching snippet file");

        Ok(Self {
            _watcher: watcher,
            rx,
            dir,
            file,
            debounce,
            pending_since: None,
        })
    }

    /// The path being watched.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Drain pending events; true once a change has settled for the
    /// debounce interval.
    pub fn poll_changed(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.touches_target(&ev) => {
                    self.pending_since = Some(Instant::now());
                }
                Ok(ev) => {
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignoring unrelated event");
                }
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn touches_target(&self, event: &Event) -> bool {
        let name = self.file.file_name();
        event.paths.iter().any(|path| {
            path == &self.dir
                || path == &self.file
                || name.is_some_and(|name| path.file_name() == Some(name))
        })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event_for(path: PathBuf) -> Event {
        Event {
            kind: EventKind::Any,
            paths: vec![path],
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_parent_dir_of_bare_file_is_dot() {
        assert_eq!(parent_dir(Path::new("snippets.json")), PathBuf::from("."));
    }

    #[test]
    fn test_directory_and_sibling_events() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("snippets.json");
        std::fs::write(&path, "[]").expect("write");
        let watcher = FileWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(watcher.touches_target(&event_for(canonical_dir.clone())));
        assert!(watcher.touches_target(&event_for(path)));
        assert!(!watcher.touches_target(&event_for(canonical_dir.join("other.json"))));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("snippets.json");
        std::fs::write(&path, "[]").expect("write");

        let mut watcher = FileWatcher::new(&path, Duration::from_millis(50)).expect("watcher");

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));

        std::fs::write(
            &path,
            r#"[{"id":"1","abbreviation":"x","expansion":"y"}]"#,
        )
        .expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.poll_changed() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        assert!(detected, "watcher should report the rewrite within 5 seconds");
    }
}

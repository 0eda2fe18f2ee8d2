use std::path::Path;
use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::snippet::{JsonSnippetStore, SnippetStore};
use crate::watcher::FileWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(150);

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path, WATCH_DEBOUNCE)
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_file_watcher(&model.snippets_path) {
                        Ok(watcher) => {
                            *file_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching snippet file");
                        }
                        Err(err) => {
                            tracing::warn!(%err, "could not watch snippet file");
                            model.watch_enabled = false;
                            model.show_toast(ToastLevel::Error, format!("Watch failed: {err}"));
                        }
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::FileChanged => Self::reload(model, msg),
            Message::DeleteSelected => Self::delete_selected(model),
            _ => {}
        }
    }

    fn reload(model: &mut Model, msg: &Message) {
        let _scope = crate::perf::scope("app.reload");
        match model.reload_from_disk() {
            Ok(count) => {
                tracing::debug!(count, trigger = ?msg, "snippets reloaded");
                if *msg == Message::ForceReload {
                    model.show_toast(ToastLevel::Info, format!("Reloaded {count} snippets"));
                }
            }
            Err(err) => {
                tracing::warn!(%err, "snippet reload failed");
                model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
            }
        }
    }

    fn delete_selected(model: &mut Model) {
        let Some(snippet) = model.selected_snippet().cloned() else {
            model.show_toast(ToastLevel::Warning, "Nothing to delete");
            return;
        };
        let mut store = JsonSnippetStore::new(model.snippets_path.clone());
        if let Err(err) = store.delete(&snippet.id) {
            tracing::warn!(%err, id = %snippet.id, "delete failed");
            model.show_toast(ToastLevel::Error, format!("Delete failed: {err}"));
            return;
        }
        match store.list() {
            Ok(snippets) => {
                model.set_snippets(snippets);
                model.show_toast(
                    ToastLevel::Info,
                    format!("Deleted {}", snippet.abbreviation),
                );
            }
            Err(err) => {
                model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
            }
        }
    }
}

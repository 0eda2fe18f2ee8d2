use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

use super::*;
use crate::snippet::{Snippet, load_snippets, save_snippets};

fn snippets() -> Vec<Snippet> {
    vec![
        Snippet::new("a", "addr", "1 Main St"),
        Snippet::new("b", "brb", "be right back"),
        Snippet::new("c", ";sig", "**Sam**"),
    ]
}

fn model() -> Model {
    Model::new(PathBuf::from("snippets.json"), snippets())
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_new_model_selects_first_snippet() {
    assert_eq!(model().selected, Some(0));
    assert_eq!(Model::new(PathBuf::new(), Vec::new()).selected, None);
}

#[test]
fn test_selection_clamps_at_both_ends() {
    let mut m = update(model(), Message::SelectPrev);
    assert_eq!(m.selected, Some(0));
    for _ in 0..5 {
        m = update(m, Message::SelectNext);
    }
    assert_eq!(m.selected, Some(2));
    m = update(m, Message::SelectFirst);
    assert_eq!(m.selected, Some(0));
    m = update(m, Message::SelectLast);
    assert_eq!(m.selected, Some(2));
}

#[test]
fn test_selection_on_empty_table_stays_none() {
    let mut m = Model::new(PathBuf::new(), Vec::new());
    for msg in [
        Message::SelectNext,
        Message::SelectPrev,
        Message::SelectFirst,
        Message::SelectLast,
    ] {
        m = update(m, msg);
        assert_eq!(m.selected, None);
    }
}

#[test]
fn test_toggles_and_quit() {
    let m = update(model(), Message::ToggleWatch);
    assert!(m.watch_enabled);
    let m = update(m, Message::ToggleHelp);
    assert!(m.help_visible);
    let m = update(m, Message::HideHelp);
    assert!(!m.help_visible);
    let m = update(m, Message::Quit);
    assert!(m.should_quit);
}

#[test]
fn test_set_snippets_keeps_selected_id() {
    let mut m = update(model(), Message::SelectNext);
    assert_eq!(m.selected_snippet().unwrap().id, "b");

    let mut reordered = snippets();
    reordered.reverse();
    m.set_snippets(reordered);
    assert_eq!(m.selected_snippet().unwrap().id, "b");
    assert_eq!(m.selected, Some(1));
}

#[test]
fn test_set_snippets_clamps_when_selected_is_gone() {
    let mut m = update(model(), Message::SelectLast);
    m.set_snippets(vec![Snippet::new("a", "addr", "x")]);
    assert_eq!(m.selected, Some(0));
    m.set_snippets(Vec::new());
    assert_eq!(m.selected, None);
}

#[test]
fn test_toast_expires() {
    let mut m = model();
    m.show_toast(ToastLevel::Info, "hello");
    assert_eq!(m.active_toast(), Some(("hello", ToastLevel::Info)));
    assert!(!m.expire_toast(Instant::now()));
    assert!(m.expire_toast(Instant::now() + Duration::from_secs(60)));
    assert!(m.active_toast().is_none());
}

#[test]
fn test_key_mapping() {
    let m = model();
    assert_eq!(App::handle_event(&press(KeyCode::Char('j')), &m), Some(Message::SelectNext));
    assert_eq!(App::handle_event(&press(KeyCode::Up), &m), Some(Message::SelectPrev));
    assert_eq!(App::handle_event(&press(KeyCode::Char('d')), &m), Some(Message::DeleteSelected));
    assert_eq!(App::handle_event(&press(KeyCode::Char('r')), &m), Some(Message::ForceReload));
    assert_eq!(App::handle_event(&press(KeyCode::Char('w')), &m), Some(Message::ToggleWatch));
    assert_eq!(App::handle_event(&press(KeyCode::Esc), &m), Some(Message::Quit));
    assert_eq!(App::handle_event(&press(KeyCode::Char('x')), &m), None);

    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(App::handle_event(&ctrl_c, &m), Some(Message::Quit));
}

#[test]
fn test_release_events_are_ignored() {
    let mut key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    assert_eq!(App::handle_key(key, &model()), None);
}

#[test]
fn test_any_key_closes_help() {
    let m = update(model(), Message::ToggleHelp);
    assert_eq!(App::handle_event(&press(KeyCode::Char('j')), &m), Some(Message::HideHelp));
    assert_eq!(App::handle_event(&press(KeyCode::Char('q')), &m), Some(Message::Quit));
}

#[test]
fn test_delete_selected_removes_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    save_snippets(&path, &snippets()).unwrap();

    let mut m = Model::new(path.clone(), snippets());
    let mut watcher = None;
    App::dispatch(&mut m, &mut watcher, Message::SelectNext);
    App::dispatch(&mut m, &mut watcher, Message::DeleteSelected);

    let on_disk = load_snippets(&path).unwrap();
    assert_eq!(on_disk.len(), 2);
    assert!(on_disk.iter().all(|s| s.id != "b"));
    assert_eq!(m.snippets.len(), 2);
    assert_eq!(m.selected_snippet().unwrap().id, "c");
    assert_eq!(m.active_toast().map(|(msg, _)| msg), Some("Deleted brb"));
}

#[test]
fn test_delete_on_empty_table_warns() {
    let mut m = Model::new(PathBuf::from("missing.json"), Vec::new());
    let mut watcher = None;
    App::dispatch(&mut m, &mut watcher, Message::DeleteSelected);
    assert_eq!(m.active_toast().map(|(_, level)| level), Some(ToastLevel::Warning));
}

#[test]
fn test_reload_picks_up_external_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    save_snippets(&path, &snippets()).unwrap();
    let mut m = Model::new(path.clone(), snippets());

    save_snippets(&path, &[Snippet::new("z", "zz", "sleep")]).unwrap();
    let mut watcher = None;
    App::dispatch(&mut m, &mut watcher, Message::FileChanged);
    assert_eq!(m.snippets.len(), 1);
    assert_eq!(m.selected, Some(0));
}

#[test]
fn test_reload_failure_keeps_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    std::fs::write(&path, "not json").unwrap();
    let mut m = Model::new(path, snippets());

    let mut watcher = None;
    App::dispatch(&mut m, &mut watcher, Message::ForceReload);
    assert_eq!(m.snippets.len(), 3);
    assert_eq!(m.active_toast().map(|(_, level)| level), Some(ToastLevel::Error));
}

#[test]
fn test_toggle_watch_creates_and_drops_watcher() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    save_snippets(&path, &snippets()).unwrap();
    let mut m = Model::new(path, snippets());

    let mut watcher = None;
    App::dispatch(&mut m, &mut watcher, Message::ToggleWatch);
    assert!(m.watch_enabled);
    assert!(watcher.is_some());

    App::dispatch(&mut m, &mut watcher, Message::ToggleWatch);
    assert!(!m.watch_enabled);
    assert!(watcher.is_none());
}

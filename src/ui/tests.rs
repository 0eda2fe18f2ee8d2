use super::*;
use crate::app::{Message, Model, update};
use crate::snippet::Snippet;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 40);
    Terminal::new(backend).unwrap()
}

fn sample_model() -> Model {
    Model::new(
        PathBuf::from("/tmp/snippets.json"),
        vec![
            Snippet::new("1", "addr", "1 Main St"),
            Snippet::new("2", ";sig", "Best,\n**Sam**"),
            Snippet::new("3", "docs", "See [the docs](https://example.com)"),
        ],
    )
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_list_shows_abbreviations_and_previews() {
    let mut terminal = create_test_terminal();
    let model = sample_model();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("Snippets (3)"));
    assert!(screen.contains("addr"));
    assert!(screen.contains(";sig"));
    assert!(screen.contains("1 Main St"));
}

#[test]
fn test_detail_pane_follows_selection() {
    let mut terminal = create_test_terminal();
    let model = update(update(sample_model(), Message::SelectNext), Message::SelectNext);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("https://example.com"));
    assert!(screen.contains("See the docs"));
}

#[test]
fn test_status_bar_shows_position_and_watch() {
    let mut terminal = create_test_terminal();
    let mut model = sample_model();
    model.watch_enabled = true;
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let screen = screen_text(&terminal);
    let last_row = screen.lines().last().unwrap();
    assert!(last_row.contains("snippets.json"));
    assert!(last_row.contains("1/3"));
    assert!(last_row.contains("[watching]"));
}

#[test]
fn test_empty_table_shows_hint() {
    let mut terminal = create_test_terminal();
    let model = Model::new(PathBuf::from("snippets.json"), Vec::new());
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("No snippets"));
    assert!(screen.contains("empty"));
}

#[test]
fn test_help_overlay_lists_keys() {
    let mut terminal = create_test_terminal();
    let model = update(sample_model(), Message::ToggleHelp);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("Keys"));
    assert!(screen.contains("toggle file watching"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let mut terminal = Terminal::new(TestBackend::new(8, 3)).unwrap();
    let model = update(sample_model(), Message::ToggleHelp);
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

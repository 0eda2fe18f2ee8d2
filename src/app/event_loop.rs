use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::snippet::load_snippets;
use crate::watcher::FileWatcher;

const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the dashboard until the user quits.
    ///
    /// # Errors
    /// Fails when the snippet file cannot be read or the terminal cannot be
    /// put into raw mode.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");
        let snippets = load_snippets(&self.snippets_path).with_context(|| {
            format!("Failed to load snippets from {}", self.snippets_path.display())
        })?;
        tracing::info!(
            path = %self.snippets_path.display(),
            count = snippets.len(),
            "dashboard starting"
        );

        let mut model = Model::new(self.snippets_path.clone(), snippets);
        model.watch_enabled = self.watch_enabled;
        model.render_options = self.render_options;

        let mut file_watcher = if model.watch_enabled {
            match Self::make_file_watcher(&model.snippets_path) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    tracing::warn!(%err, "could not watch snippet file");
                    model.watch_enabled = false;
                    model.show_toast(ToastLevel::Error, format!("Watch failed: {err}"));
                    None
                }
            }
        } else {
            None
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - the dashboard needs an interactive TTY")?;
        let result = Self::event_loop(&mut terminal, &mut model, &mut file_watcher);
        ratatui::restore();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::poll_changed)
            {
                Self::dispatch(model, file_watcher, Message::FileChanged);
                needs_render = true;
            }

            if needs_render {
                let _draw_scope = crate::perf::scope("app.draw");
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if event::poll(IDLE_POLL)? {
                let ev = event::read()?;
                if let Some(msg) = Self::handle_event(&ev, model) {
                    Self::dispatch(model, file_watcher, msg);
                }
                // Resizes and unmapped keys still repaint.
                needs_render = true;
            }

            if model.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub(super) fn dispatch(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: Message,
    ) {
        *model = update(std::mem::take(model), msg.clone());
        Self::handle_message_side_effects(model, file_watcher, &msg);
    }
}

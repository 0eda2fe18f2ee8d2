use crate::app::Model;

/// All possible events and actions in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    /// Remove the selected snippet from the store (performed as an effect)
    DeleteSelected,
    /// Re-read the snippet file on request
    ForceReload,
    /// The watcher saw the snippet file change
    FileChanged,
    ToggleWatch,
    ToggleHelp,
    HideHelp,
    Quit,
}

/// Pure state transition.
///
/// Messages that touch the store or the watcher leave the model as is here;
/// the event loop performs them afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    let len = model.snippets.len();
    match msg {
        Message::SelectNext => {
            model.selected = model
                .selected
                .map(|idx| (idx + 1).min(len.saturating_sub(1)));
        }
        Message::SelectPrev => {
            model.selected = model.selected.map(|idx| idx.saturating_sub(1));
        }
        Message::SelectFirst => {
            model.selected = (len > 0).then_some(0);
        }
        Message::SelectLast => {
            model.selected = len.checked_sub(1);
        }
        Message::ToggleWatch => model.watch_enabled = !model.watch_enabled,
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
        Message::DeleteSelected | Message::ForceReload | Message::FileChanged => {}
    }
    model
}

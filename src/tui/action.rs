// Explicit commands dispatched from input handling to the list store.
// Key handlers only translate events into these; no mutation happens
// inside the handler itself.
use crate::model::Priority;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { text: String, priority: Priority },
    Remove(String),
    Toggle(String),
    UpdateText { id: String, text: String },
    ClearCompleted,
    ClearAll,
    Reorder { moved: String, target: String },
    CycleFilter,
    CommitSearch(String),
    ClearSearch,
    ToggleTheme,
    Quit,
}

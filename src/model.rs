// File: src/model.rs
// The task record and its priority level.
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;
use uuid::Uuid;

/// Priority assigned when a task is created; immutable afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Next level, wrapping. Used by the TUI to cycle the selection
    /// while composing a new task.
    pub fn cycled(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub time: String,
}

impl Task {
    /// Creates a task with a fresh id and the current local timestamp.
    /// Callers are responsible for rejecting empty text first; see
    /// `ListStore::add`.
    pub fn new(text: &str, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            checked: false,
            priority,
            time: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    pub fn checkbox_symbol(&self) -> &'static str {
        if self.checked { "[x]" } else { "[ ]" }
    }

    /// Case-insensitive substring match against the task text.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.text.to_lowercase().contains(&query.to_lowercase())
    }
}

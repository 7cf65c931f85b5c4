// File: src/store.rs
// The list store: owns the ordered task sequence and keeps storage
// consistent with it after every mutating call.
use crate::context::SharedContext;
use crate::model::{Priority, Task};
use crate::storage::ListStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Which end of the list new tasks are inserted at.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    #[default]
    Head,
    Tail,
}

/// Presentation-layer visibility predicate. Never mutates the list.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, EnumIter)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub fn cycled(self) -> Self {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    fn admits(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.checked,
            Filter::Completed => task.checked,
        }
    }
}

pub struct ListStore {
    ctx: SharedContext,
    tasks: Vec<Task>,
    insert: InsertPosition,
}

impl ListStore {
    /// Populates the store from persisted storage (empty when nothing
    /// is stored or the file is malformed).
    pub fn load(ctx: SharedContext, insert: InsertPosition) -> Result<Self> {
        let tasks = ListStorage::load(ctx.as_ref())?;
        Ok(Self { ctx, tasks, insert })
    }

    /// Serializes the full current sequence to storage. Called by every
    /// mutating operation before it returns.
    pub fn persist(&self) -> Result<()> {
        ListStorage::save(self.ctx.as_ref(), &self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// (completed, total) for the progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.checked).count();
        (done, self.tasks.len())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    // --- Mutating operations (write-through) ---

    /// Creates a task from user input. Returns `None` without touching
    /// the list or storage when the text trims to empty; the caller is
    /// expected to notify the user.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<Option<Task>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let task = Task::new(text, priority);
        match self.insert {
            InsertPosition::Head => self.tasks.insert(0, task.clone()),
            InsertPosition::Tail => self.tasks.push(task.clone()),
        }
        self.persist()?;
        Ok(Some(task))
    }

    /// Removes the matching task. Absent ids are a no-op (idempotent)
    /// and skip the storage write.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        match self.position(id) {
            Some(idx) => {
                self.tasks.remove(idx);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flips the completion flag; returns the new value, or `None` when
    /// the id is unknown.
    pub fn toggle_checked(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.checked = !task.checked;
        let now = task.checked;
        self.persist()?;
        Ok(Some(now))
    }

    /// Replaces the task text. Empty-after-trim input is rejected, the
    /// same rule `add` applies.
    pub fn update_text(&mut self, id: &str, new_text: &str) -> Result<bool> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.text = trimmed.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Removes every checked task; returns how many were dropped.
    /// Confirmation happens in the UI layer before this is called.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.checked);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Removes every task. Confirmation happens in the UI layer.
    pub fn clear_all(&mut self) -> Result<usize> {
        let removed = self.tasks.len();
        if removed > 0 {
            self.tasks.clear();
            self.persist()?;
        }
        Ok(removed)
    }

    /// Relocates `moved_id` to the position currently held by
    /// `target_id` by exchanging the two positions. Exchanging keeps
    /// the operation self-inverse, which is what step-wise movement in
    /// the UI relies on. No-op when either id is absent or both are
    /// the same task.
    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> Result<bool> {
        if moved_id == target_id {
            return Ok(false);
        }
        let (Some(a), Some(b)) = (self.position(moved_id), self.position(target_id)) else {
            return Ok(false);
        };
        self.tasks.swap(a, b);
        self.persist()?;
        Ok(true)
    }

    // --- Read / visibility ---

    /// Snapshot of the tasks admitted by `filter` and matching `query`,
    /// in list order. Pure presentation query.
    pub fn visible(&self, filter: Filter, query: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| filter.admits(t) && t.matches_search(query))
            .cloned()
            .collect()
    }
}

//! Task list entity and its partial-update type.

use super::{ElapsedTime, ListId, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Title of the list created when no saved board exists.
pub const DEFAULT_LIST_TITLE: &str = "To Do";

/// Title given to lists appended through the board.
pub const NEW_LIST_TITLE: &str = "New List";

/// Display classification derived from a list's importance and urgency flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListPriority {
    /// Neither important nor urgent.
    Normal,
    /// Important only.
    Important,
    /// Urgent only.
    Urgent,
    /// Both important and urgent.
    Critical,
}

/// Ordered column of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    id: ListId,
    title: String,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    is_important: bool,
    #[serde(default)]
    is_urgent: bool,
}

impl TaskList {
    /// Creates an empty list with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            title: title.into(),
            tasks: Vec::new(),
            is_important: false,
            is_urgent: false,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the tasks in on-screen order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns whether the list is flagged important.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.is_important
    }

    /// Returns whether the list is flagged urgent.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Classifies the list's flags for display.
    #[must_use]
    pub const fn priority(&self) -> ListPriority {
        match (self.is_important, self.is_urgent) {
            (true, true) => ListPriority::Critical,
            (false, true) => ListPriority::Urgent,
            (true, false) => ListPriority::Important,
            (false, false) => ListPriority::Normal,
        }
    }

    /// Sums the tracked time of every task in the list.
    #[must_use]
    pub fn total_time_spent(&self) -> ElapsedTime {
        self.tasks.iter().map(Task::time_spent).sum()
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the position of a task in the list.
    #[must_use]
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    pub(super) fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    pub(super) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub(super) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Inserts a task, clamping the index to the end of the list.
    pub(super) fn insert_task(&mut self, index: usize, task: Task) {
        let at = index.min(self.tasks.len());
        self.tasks.insert(at, task);
    }

    pub(super) fn remove_task(&mut self, task_id: TaskId) -> Option<Task> {
        let index = self.position_of(task_id)?;
        Some(self.tasks.remove(index))
    }

    /// Applies a partial update and reports whether anything changed.
    pub(super) fn apply(&mut self, patch: &ListPatch) -> bool {
        let mut changed = false;
        if let Some(title) = &patch.title {
            changed |= self.title != *title;
            title.clone_into(&mut self.title);
        }
        if let Some(important) = patch.is_important {
            changed |= self.is_important != important;
            self.is_important = important;
        }
        if let Some(urgent) = patch.is_urgent {
            changed |= self.is_urgent != urgent;
            self.is_urgent = urgent;
        }
        changed
    }
}

/// Partial update for a [`TaskList`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    title: Option<String>,
    is_important: Option<bool>,
    is_urgent: Option<bool>,
}

impl ListPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the importance flag.
    #[must_use]
    pub const fn with_important(mut self, important: bool) -> Self {
        self.is_important = Some(important);
        self
    }

    /// Sets the urgency flag.
    #[must_use]
    pub const fn with_urgent(mut self, urgent: bool) -> Self {
        self.is_urgent = Some(urgent);
        self
    }
}

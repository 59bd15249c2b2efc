//! Task entity, color palette, and the patch type through which every task
//! field is mutated.

use super::{ElapsedTime, ParseTaskColorError, TaskId};
use serde::{Deserialize, Serialize};

/// Title shown for a task whose title is still empty.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Fixed palette of task colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    /// Purple swatch.
    Purple,
    /// Blue swatch.
    Blue,
    /// Green swatch.
    Green,
    /// Orange swatch.
    Orange,
    /// Red swatch.
    Red,
    /// Pink swatch.
    Pink,
}

impl TaskColor {
    /// Every palette entry in display order.
    pub const ALL: [Self; 6] = [
        Self::Purple,
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Red,
        Self::Pink,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Pink => "pink",
        }
    }
}

impl TryFrom<&str> for TaskColor {
    type Error = ParseTaskColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
            .ok_or_else(|| ParseTaskColorError(value.to_owned()))
    }
}

/// A unit of work with free-form text, a color, and tracked time.
///
/// `is_finished` is terminal: once set, the task never runs again and its
/// elapsed time is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    title: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_text: Option<String>,
    color: Option<TaskColor>,
    time_spent: ElapsedTime,
    is_running: bool,
    is_finished: bool,
}

/// Wire shape of a persisted task. Missing optional fields take defaults and
/// a record claiming to be both running and finished is repaired on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    details: String,
    #[serde(default)]
    original_text: Option<String>,
    #[serde(default)]
    color: Option<TaskColor>,
    #[serde(default)]
    time_spent: ElapsedTime,
    #[serde(default)]
    is_running: bool,
    #[serde(default)]
    is_finished: bool,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            details: record.details,
            original_text: record.original_text,
            color: record.color,
            time_spent: record.time_spent,
            is_running: record.is_running && !record.is_finished,
            is_finished: record.is_finished,
        }
    }
}

impl Task {
    /// Creates an empty, stopped, unfinished task with a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TaskId::new(),
            title: String::new(),
            details: String::new(),
            original_text: None,
            color: None,
            time_spent: ElapsedTime::ZERO,
            is_running: false,
            is_finished: false,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title, possibly empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the title, or [`UNTITLED_TASK`] when the title is blank.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_TASK
        } else {
            &self.title
        }
    }

    /// Returns the task details, possibly empty.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the text captured before the first enhancement, if any.
    #[must_use]
    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    /// Returns the task color, if set.
    #[must_use]
    pub const fn color(&self) -> Option<TaskColor> {
        self.color
    }

    /// Returns the tracked time.
    #[must_use]
    pub const fn time_spent(&self) -> ElapsedTime {
        self.time_spent
    }

    /// Returns whether the timer is accumulating.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Returns whether the task is finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Applies a partial update and reports whether anything changed.
    ///
    /// Finishing always stops the timer in the same step. Starting a
    /// finished task, un-finishing it, or changing the time of a finished
    /// task are ignored, as is any attempt to lower the tracked time.
    /// `original_text` is recorded only once.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        let before = self.clone();

        if let Some(title) = &patch.title {
            title.clone_into(&mut self.title);
        }
        if let Some(details) = &patch.details {
            details.clone_into(&mut self.details);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if self.original_text.is_none() {
            self.original_text.clone_from(&patch.original_text);
        }
        if let Some(time_spent) = patch.time_spent {
            if !self.is_finished && time_spent > self.time_spent {
                self.time_spent = time_spent;
            }
        }
        if patch.is_finished == Some(true) {
            self.is_finished = true;
            self.is_running = false;
        }
        match patch.is_running {
            Some(true) if !self.is_finished => self.is_running = true,
            Some(false) => self.is_running = false,
            _ => {}
        }

        *self != before
    }

    /// Advances the timer by one second when the task is running.
    ///
    /// Returns `true` when time was added.
    pub const fn tick(&mut self) -> bool {
        if self.is_running && !self.is_finished {
            self.time_spent = self.time_spent.tick();
            return true;
        }
        false
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`Task`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    details: Option<String>,
    color: Option<Option<TaskColor>>,
    original_text: Option<String>,
    time_spent: Option<ElapsedTime>,
    is_running: Option<bool>,
    is_finished: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that starts the timer.
    #[must_use]
    pub fn start() -> Self {
        Self::new().with_running(true)
    }

    /// Patch that pauses the timer.
    #[must_use]
    pub fn pause() -> Self {
        Self::new().with_running(false)
    }

    /// Patch that finishes the task.
    #[must_use]
    pub fn finish() -> Self {
        Self::new().with_finished(true)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets or clears the color.
    #[must_use]
    pub const fn with_color(mut self, color: Option<TaskColor>) -> Self {
        self.color = Some(color);
        self
    }

    /// Records the pre-enhancement text if none was recorded yet.
    #[must_use]
    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = Some(text.into());
        self
    }

    /// Sets the tracked time.
    #[must_use]
    pub const fn with_time_spent(mut self, time_spent: ElapsedTime) -> Self {
        self.time_spent = Some(time_spent);
        self
    }

    /// Sets the running flag.
    #[must_use]
    pub const fn with_running(mut self, running: bool) -> Self {
        self.is_running = Some(running);
        self
    }

    /// Sets the finished flag.
    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.is_finished = Some(finished);
        self
    }
}

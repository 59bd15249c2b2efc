//! Board aggregate root: the ordered lists and every structural mutation
//! over them, including the drag primitives.

use super::{
    DEFAULT_LIST_TITLE, ItemId, ListId, ListPatch, NEW_LIST_TITLE, Task, TaskId, TaskList,
    TaskPatch,
};
use serde::{Deserialize, Serialize};

/// Where an [`ItemId`] resolves to on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    /// The id names a list.
    List {
        /// Index of the list on the board.
        list_index: usize,
    },
    /// The id names a task.
    Task {
        /// Index of the containing list on the board.
        list_index: usize,
        /// Index of the task within that list.
        task_index: usize,
    },
}

impl ItemLocation {
    /// Returns the index of the list the item is, or is contained in.
    #[must_use]
    pub const fn list_index(self) -> usize {
        match self {
            Self::List { list_index } | Self::Task { list_index, .. } => list_index,
        }
    }
}

/// The full ordered collection of lists and their tasks.
///
/// Operations addressing an unknown list or task are no-ops that report
/// `false` or `None`; a stale id is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    lists: Vec<TaskList>,
}

impl Board {
    /// Creates the initial board: a single empty list titled
    /// [`DEFAULT_LIST_TITLE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: vec![TaskList::new(DEFAULT_LIST_TITLE)],
        }
    }

    /// Returns the lists in on-screen order.
    #[must_use]
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// Finds a list by identifier.
    #[must_use]
    pub fn find_list(&self, list_id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|list| list.id() == list_id)
    }

    /// Finds a task within a specific list.
    #[must_use]
    pub fn find_task(&self, list_id: ListId, task_id: TaskId) -> Option<&Task> {
        self.find_list(list_id)?.task(task_id)
    }

    /// Returns the list currently holding a task.
    #[must_use]
    pub fn list_of_task(&self, task_id: TaskId) -> Option<&TaskList> {
        self.lists.iter().find(|list| list.task(task_id).is_some())
    }

    /// Counts tasks across every list.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|list| list.tasks().len()).sum()
    }

    /// Appends an empty list titled [`NEW_LIST_TITLE`] and returns its id.
    pub fn add_list(&mut self) -> ListId {
        let list = TaskList::new(NEW_LIST_TITLE);
        let list_id = list.id();
        self.lists.push(list);
        list_id
    }

    /// Removes a list together with all of its tasks.
    pub fn delete_list(&mut self, list_id: ListId) -> bool {
        let before = self.lists.len();
        self.lists.retain(|list| list.id() != list_id);
        self.lists.len() != before
    }

    /// Applies a partial update to a list.
    pub fn update_list(&mut self, list_id: ListId, patch: &ListPatch) -> bool {
        self.list_mut(list_id)
            .is_some_and(|list| list.apply(patch))
    }

    /// Appends a default task to a list and returns its id.
    pub fn add_task(&mut self, list_id: ListId) -> Option<TaskId> {
        let list = self.list_mut(list_id)?;
        let task = Task::new();
        let task_id = task.id();
        list.push_task(task);
        Some(task_id)
    }

    /// Applies a partial update to a task.
    pub fn update_task(&mut self, list_id: ListId, task_id: TaskId, patch: &TaskPatch) -> bool {
        self.list_mut(list_id)
            .and_then(|list| list.task_mut(task_id))
            .is_some_and(|task| task.apply(patch))
    }

    /// Removes a task from a list.
    pub fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> bool {
        self.list_mut(list_id)
            .and_then(|list| list.remove_task(task_id))
            .is_some()
    }

    /// Advances every running, unfinished task by one second.
    ///
    /// Returns the number of tasks that accumulated time.
    pub fn tick(&mut self) -> usize {
        self.lists
            .iter_mut()
            .flat_map(|list| list.tasks_mut().iter_mut())
            .map(Task::tick)
            .filter(|ticked| *ticked)
            .count()
    }

    /// Resolves a drag id to a task or list position. Tasks are matched
    /// before lists.
    #[must_use]
    pub fn locate(&self, item: ItemId) -> Option<ItemLocation> {
        let task_id = item.as_task();
        let task_location = self.lists.iter().enumerate().find_map(|(list_index, list)| {
            list.position_of(task_id).map(|task_index| ItemLocation::Task {
                list_index,
                task_index,
            })
        });
        task_location.or_else(|| {
            let list_id = item.as_list();
            self.lists
                .iter()
                .position(|list| list.id() == list_id)
                .map(|list_index| ItemLocation::List { list_index })
        })
    }

    /// Moves a task to the end of the list that `over` names or contains.
    ///
    /// Returns `false` when the task or target cannot be resolved, or when
    /// the target is the task's current list.
    pub fn transfer_task(&mut self, task_id: TaskId, over: ItemId) -> bool {
        let Some(ItemLocation::Task {
            list_index: source, ..
        }) = self.locate(task_id.into())
        else {
            return false;
        };
        let Some(target) = self.locate(over).map(ItemLocation::list_index) else {
            return false;
        };
        if source == target {
            return false;
        }
        let Some(task) = self
            .lists
            .get_mut(source)
            .and_then(|list| list.remove_task(task_id))
        else {
            return false;
        };
        self.lists.get_mut(target).is_some_and(|list| {
            list.push_task(task);
            true
        })
    }

    /// Places a task at `index` in a list, moving it out of wherever it sits
    /// now. Used to undo eager transfers made during a drag gesture.
    ///
    /// Returns `false` when the task or list is unknown, or when the task
    /// already sits at that position.
    pub fn restore_task(&mut self, task_id: TaskId, list_id: ListId, index: usize) -> bool {
        let Some(home_len) = self.find_list(list_id).map(|list| list.tasks().len()) else {
            return false;
        };
        let Some(ItemLocation::Task {
            list_index,
            task_index,
        }) = self.locate(task_id.into())
        else {
            return false;
        };
        let in_home = self
            .lists
            .get(list_index)
            .is_some_and(|list| list.id() == list_id);
        if in_home && task_index == index.min(home_len.saturating_sub(1)) {
            return false;
        }
        let Some(task) = self
            .lists
            .get_mut(list_index)
            .and_then(|list| list.remove_task(task_id))
        else {
            return false;
        };
        self.list_mut(list_id).is_some_and(|list| {
            list.insert_task(index, task);
            true
        })
    }

    /// Moves `active` to the current index of `over`.
    ///
    /// Two tasks in the same list reorder that list; two lists reorder the
    /// board. Any other combination, or `active == over`, is a no-op.
    pub fn reorder(&mut self, active: ItemId, over: ItemId) -> bool {
        if active == over {
            return false;
        }
        match (self.locate(active), self.locate(over)) {
            (
                Some(ItemLocation::Task {
                    list_index: from_list,
                    task_index: from,
                }),
                Some(ItemLocation::Task {
                    list_index: to_list,
                    task_index: to,
                }),
            ) if from_list == to_list => self
                .lists
                .get_mut(from_list)
                .is_some_and(|list| move_item(list.tasks_mut(), from, to)),
            (
                Some(ItemLocation::List { list_index: from }),
                Some(ItemLocation::List { list_index: to }),
            ) => move_item(&mut self.lists, from, to),
            _ => false,
        }
    }

    fn list_mut(&mut self, list_id: ListId) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|list| list.id() == list_id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the element at `from` and reinserts it at `to`; every element in
/// between shifts by one.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

// Derived view state and intent dispatch

use crate::filter::Filter;
use crate::kv::KvStore;
use crate::store::{Change, TaskStore};
use crate::task::{Task, TaskId};
use eyre::Result;
use tracing::debug;

/// Aggregate counts over the whole list, regardless of filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Counters {
    /// Count the whole list
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let active = tasks.iter().filter(|t| !t.completed).count();
        Self {
            total: tasks.len(),
            active,
            completed: tasks.len() - active,
        }
    }

    /// Percentage of completed tasks, 0 for an empty list
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Message shown in place of an empty filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub message: &'static str,
    pub hint: Option<&'static str>,
}

/// Empty-state text for a filter, `None` when there is something to show
pub fn empty_state(filter: Filter, filtered_count: usize) -> Option<EmptyState> {
    if filtered_count > 0 {
        return None;
    }

    let state = match filter {
        Filter::All => EmptyState {
            message: "No tasks yet",
            hint: Some("Add a task to get started"),
        },
        Filter::Active => EmptyState {
            message: "No active tasks",
            hint: None,
        },
        Filter::Completed => EmptyState {
            message: "No completed tasks",
            hint: None,
        },
    };
    Some(state)
}

/// "1 task remaining" / "3 tasks remaining"
pub fn remaining_label(active: usize) -> String {
    let noun = if active == 1 { "task" } else { "tasks" };
    format!("{} {} remaining", active, noun)
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub filter: Filter,
    pub visible: Vec<Task>,
    pub counters: Counters,
    pub progress: f64,
    pub empty_state: Option<EmptyState>,
    /// Whether a "clear completed" action should be offered
    pub has_completed: bool,
}

impl ViewModel {
    /// Derive the frame for `filter` from the full list
    pub fn compute(tasks: &[Task], filter: Filter) -> Self {
        let visible: Vec<Task> = filter.apply(tasks).into_iter().cloned().collect();
        let counters = Counters::from_tasks(tasks);

        Self {
            filter,
            empty_state: empty_state(filter, visible.len()),
            visible,
            progress: counters.progress(),
            has_completed: counters.completed > 0,
            counters,
        }
    }

    /// Remaining-count label for the active tasks
    pub fn remaining_label(&self) -> String {
        remaining_label(self.counters.active)
    }
}

/// A user action against the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(TaskId),
    Edit(TaskId, String),
    Delete(TaskId),
    Reorder(Vec<TaskId>),
    Move(TaskId, usize),
    SetFilter(Filter),
    ClearCompleted,
}

/// One-shot side effect for the renderer to fire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A task was just completed
    Celebrate(TaskId),
}

/// Filter selection plus the view model derived from a [`TaskStore`]
pub struct TaskListView {
    filter: Filter,
    model: ViewModel,
    revision: u64,
}

impl TaskListView {
    /// Start with the default filter over `tasks`
    pub fn new(tasks: &[Task]) -> Self {
        Self {
            filter: Filter::default(),
            model: ViewModel::compute(tasks, Filter::default()),
            revision: 0,
        }
    }

    /// Currently selected filter
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// View model from the last recompute
    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    /// Number of recomputes since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute the view model from the current list
    pub fn refresh(&mut self, tasks: &[Task]) {
        self.model = ViewModel::compute(tasks, self.filter);
        self.revision += 1;
    }

    /// Apply an intent to the store and recompute once
    ///
    /// When the store's write fails it restores the list, so the error is
    /// returned with no effects and the refreshed view shows the list
    /// unchanged.
    pub fn dispatch<K: KvStore>(&mut self, store: &mut TaskStore<K>, intent: Intent) -> Result<Vec<Effect>> {
        debug!(?intent, "dispatch");

        let result = match intent {
            Intent::Add(text) => store.add(&text),
            Intent::Toggle(id) => store.toggle(&id),
            Intent::Edit(id, text) => store.edit(&id, &text),
            Intent::Delete(id) => store.delete(&id),
            Intent::Reorder(order) => store.reorder(&order),
            Intent::Move(id, index) => store.move_to(&id, index),
            Intent::ClearCompleted => store.clear_completed(),
            Intent::SetFilter(filter) => {
                self.filter = filter;
                Ok(Change::Unchanged)
            }
        };

        self.refresh(store.tasks());

        let effects = match result? {
            Change::Completed(id) => vec![Effect::Celebrate(id)],
            _ => Vec::new(),
        };
        Ok(effects)
    }
}

// Ordered task list with snapshot persistence

use crate::kv::{KvStore, validate_key};
use crate::snapshot;
use crate::task::{Task, TaskId, normalize_text};
use eyre::Result;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Key the list is stored under unless configured otherwise
pub const DEFAULT_KEY: &str = "todos";

/// What a mutation did to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Rejected or no-op; nothing was written
    Unchanged,
    Added(TaskId),
    /// A task's text changed, or it went from completed back to active
    Updated,
    /// A task went from active to completed
    Completed(TaskId),
    Removed(usize),
    Reordered,
}

impl Change {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

/// Owns the ordered task list and snapshots it into a [`KvStore`]
///
/// Every mutation that changes the list writes the whole list once. Until
/// [`TaskStore::load`] has run, mutations are ignored and report
/// [`Change::Unchanged`], so a store that has not read its snapshot yet can
/// never overwrite it. A failed write restores the list as it was.
pub struct TaskStore<K: KvStore> {
    kv: K,
    key: String,
    tasks: Vec<Task>,
    loaded: bool,
}

impl<K: KvStore> TaskStore<K> {
    /// Create an unloaded store using [`DEFAULT_KEY`]
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            key: DEFAULT_KEY.to_string(),
            tasks: Vec::new(),
            loaded: false,
        }
    }

    /// Create an unloaded store persisting under `key`
    pub fn with_key(kv: K, key: &str) -> Result<Self> {
        validate_key(key)?;
        let mut store = Self::new(kv);
        store.key = key.to_string();
        Ok(store)
    }

    /// Create a store and load its snapshot
    pub fn open(kv: K) -> Self {
        let mut store = Self::new(kv);
        store.load();
        store
    }

    /// Read the persisted snapshot, replacing the in-memory list
    ///
    /// Never fails: a read error, a missing key, or malformed data all load
    /// as an empty list.
    pub fn load(&mut self) -> &[Task] {
        let raw = match self.kv.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = ?e, "Failed to read saved tasks, starting empty");
                None
            }
        };

        self.tasks = snapshot::decode(raw.as_deref());
        self.loaded = true;
        &self.tasks
    }

    /// Whether the snapshot has been read; mutations are ignored until then
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The current list, in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the list
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Key the list is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a reference to the storage backend
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Consume the store, returning its storage backend
    pub fn into_kv(self) -> K {
        self.kv
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Prepend a new active task; blank text is a no-op
    pub fn add(&mut self, text: &str) -> Result<Change> {
        let Some(task) = Task::new(text) else {
            debug!("add: ignoring blank text");
            return Ok(Change::Unchanged);
        };

        self.apply("add", |tasks| {
            let id = task.id.clone();
            tasks.insert(0, task);
            Change::Added(id)
        })
    }

    /// Flip a task's completion flag
    pub fn toggle(&mut self, id: &TaskId) -> Result<Change> {
        self.apply("toggle", |tasks| {
            let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
                return Change::Unchanged;
            };

            task.completed = !task.completed;
            if task.completed {
                Change::Completed(id.clone())
            } else {
                Change::Updated
            }
        })
    }

    /// Replace a task's text; blank text discards the edit
    pub fn edit(&mut self, id: &TaskId, text: &str) -> Result<Change> {
        let Some(text) = normalize_text(text) else {
            debug!(%id, "edit: discarding blank text");
            return Ok(Change::Unchanged);
        };

        self.apply("edit", |tasks| {
            match tasks.iter_mut().find(|t| &t.id == id) {
                Some(task) if task.text != text => {
                    task.text = text;
                    Change::Updated
                }
                _ => Change::Unchanged,
            }
        })
    }

    /// Remove a task by id; unknown ids are a no-op
    pub fn delete(&mut self, id: &TaskId) -> Result<Change> {
        self.apply("delete", |tasks| {
            let Some(index) = tasks.iter().position(|t| &t.id == id) else {
                return Change::Unchanged;
            };

            tasks.remove(index);
            Change::Removed(1)
        })
    }

    /// Remove every completed task, keeping the rest in order
    pub fn clear_completed(&mut self) -> Result<Change> {
        self.apply("clear_completed", |tasks| {
            let before = tasks.len();
            tasks.retain(|t| !t.completed);

            match before - tasks.len() {
                0 => Change::Unchanged,
                removed => Change::Removed(removed),
            }
        })
    }

    /// Replace the list order with a permutation of the current ids
    ///
    /// Anything that is not an exact permutation (wrong length, unknown or
    /// repeated ids) is rejected unchanged.
    pub fn reorder(&mut self, order: &[TaskId]) -> Result<Change> {
        if !self.is_permutation(order) {
            warn!(
                expected = self.tasks.len(),
                given = order.len(),
                "reorder: rejecting order that is not a permutation of the list"
            );
            return Ok(Change::Unchanged);
        }

        self.apply("reorder", |tasks| {
            if tasks.iter().map(|t| &t.id).eq(order.iter()) {
                return Change::Unchanged;
            }

            let mut by_id: HashMap<TaskId, Task> = tasks.drain(..).map(|t| (t.id.clone(), t)).collect();
            *tasks = order.iter().filter_map(|id| by_id.remove(id)).collect();
            Change::Reordered
        })
    }

    /// Move one task to `index`, clamped to the end of the list
    pub fn move_to(&mut self, id: &TaskId, index: usize) -> Result<Change> {
        let Some(from) = self.tasks.iter().position(|t| &t.id == id) else {
            return Ok(Change::Unchanged);
        };

        let mut order: Vec<TaskId> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let moved = order.remove(from);
        let to = index.min(order.len());
        order.insert(to, moved);

        self.reorder(&order)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn is_permutation(&self, order: &[TaskId]) -> bool {
        if order.len() != self.tasks.len() {
            return false;
        }

        let current: HashSet<&TaskId> = self.tasks.iter().map(|t| &t.id).collect();
        let mut seen = HashSet::with_capacity(order.len());
        order.iter().all(|id| current.contains(id) && seen.insert(id))
    }

    /// Run a mutation and persist it, restoring the previous list if the write fails
    ///
    /// Before `load` the mutation is not run at all, so nothing can be
    /// reported as changed that a later load would discard.
    fn apply<F>(&mut self, op: &'static str, mutation: F) -> Result<Change>
    where
        F: FnOnce(&mut Vec<Task>) -> Change,
    {
        if !self.loaded {
            debug!(op, key = %self.key, "Ignoring mutation before load");
            return Ok(Change::Unchanged);
        }

        let previous = self.tasks.clone();
        let change = mutation(&mut self.tasks);
        if !change.is_changed() {
            return Ok(change);
        }

        if let Err(e) = self.persist() {
            self.tasks = previous;
            return Err(e.wrap_err(format!("Failed to save after {}", op)));
        }
        Ok(change)
    }

    fn persist(&mut self) -> Result<()> {
        let value = snapshot::encode(&self.tasks)?;
        self.kv.set(&self.key, &value)?;
        debug!(key = %self.key, count = self.tasks.len(), "Saved tasks");
        Ok(())
    }
}

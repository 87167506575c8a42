// TaskList - Ordered to-do list with fail-soft key-value persistence

pub mod config;
pub mod filter;
pub mod kv;
pub mod snapshot;
pub mod sqlite;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use config::{Backend, Config};
pub use filter::Filter;
pub use kv::{FileKv, KvStore, MemoryKv};
pub use sqlite::SqliteKv;
pub use store::{Change, DEFAULT_KEY, TaskStore};
pub use task::{Task, TaskId};
pub use view::{Effect, EmptyState, Intent, TaskListView, ViewModel};

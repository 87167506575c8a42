// Property tests for list mutations and snapshot loading

use proptest::prelude::*;
use std::collections::HashSet;
use tasklist::{Change, DEFAULT_KEY, Filter, KvStore, MemoryKv, Task, TaskId, TaskStore, snapshot};

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,6}[a-zA-Z0-9][a-zA-Z0-9 ]{0,6}"
}

fn blank_strategy() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,8}"
}

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((text_strategy(), any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (text, completed))| Task {
                id: TaskId::from(format!("task-{}", i)),
                text: text.trim().to_string(),
                completed,
            })
            .collect()
    })
}

fn store_with(tasks: &[Task]) -> TaskStore<MemoryKv> {
    let mut kv = MemoryKv::new();
    kv.set(DEFAULT_KEY, &snapshot::encode(tasks).unwrap()).unwrap();
    TaskStore::open(kv)
}

proptest! {
    #[test]
    fn prop_blank_add_and_edit_are_noops(tasks in tasks_strategy(), blank in blank_strategy(), pick in any::<prop::sample::Index>()) {
        let mut store = store_with(&tasks);

        prop_assert_eq!(store.add(&blank).unwrap(), Change::Unchanged);
        prop_assert_eq!(store.tasks(), tasks.as_slice());

        if !tasks.is_empty() {
            let id = tasks[pick.index(tasks.len())].id.clone();
            prop_assert_eq!(store.edit(&id, &blank).unwrap(), Change::Unchanged);
            prop_assert_eq!(store.tasks(), tasks.as_slice());
        }
    }

    #[test]
    fn prop_add_prepends(tasks in tasks_strategy(), text in text_strategy()) {
        let mut store = store_with(&tasks);
        store.add(&text).unwrap();

        prop_assert_eq!(store.len(), tasks.len() + 1);
        prop_assert_eq!(&store.tasks()[0].text, text.trim());
        prop_assert!(!store.tasks()[0].completed);
        prop_assert_eq!(&store.tasks()[1..], tasks.as_slice());
    }

    #[test]
    fn prop_toggle_twice_restores(tasks in tasks_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!tasks.is_empty());
        let mut store = store_with(&tasks);
        let id = tasks[pick.index(tasks.len())].id.clone();

        store.toggle(&id).unwrap();
        store.toggle(&id).unwrap();
        prop_assert_eq!(store.tasks(), tasks.as_slice());
    }

    #[test]
    fn prop_delete_is_idempotent(tasks in tasks_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!tasks.is_empty());
        let mut store = store_with(&tasks);
        let id = tasks[pick.index(tasks.len())].id.clone();

        store.delete(&id).unwrap();
        let after_first = store.tasks().to_vec();
        prop_assert_eq!(store.delete(&id).unwrap(), Change::Unchanged);
        prop_assert_eq!(store.tasks(), after_first.as_slice());
        prop_assert!(store.get(&id).is_none());
    }

    #[test]
    fn prop_clear_completed_keeps_active_in_order(tasks in tasks_strategy()) {
        let mut store = store_with(&tasks);
        store.clear_completed().unwrap();

        let expected: Vec<Task> = tasks.iter().filter(|t| !t.completed).cloned().collect();
        prop_assert!(store.tasks().iter().all(|t| !t.completed));
        prop_assert_eq!(store.tasks(), expected.as_slice());
    }

    #[test]
    fn prop_reorder_preserves_membership(
        (tasks, order) in tasks_strategy().prop_flat_map(|tasks| {
            let ids: Vec<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
            (Just(tasks), Just(ids).prop_shuffle())
        })
    ) {
        let mut store = store_with(&tasks);
        store.reorder(&order).unwrap();

        let after: Vec<TaskId> = store.tasks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(&after, &order);

        let mut before_sorted: Vec<&Task> = tasks.iter().collect();
        let mut after_sorted: Vec<&Task> = store.tasks().iter().collect();
        before_sorted.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        after_sorted.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        prop_assert_eq!(before_sorted, after_sorted);
    }

    #[test]
    fn prop_snapshot_roundtrip(tasks in tasks_strategy()) {
        let store = store_with(&tasks);
        prop_assert_eq!(store.tasks(), tasks.as_slice());
    }

    #[test]
    fn prop_load_arbitrary_data_never_fails(raw in ".*") {
        let mut kv = MemoryKv::new();
        kv.set(DEFAULT_KEY, &raw).unwrap();
        let store = TaskStore::open(kv);

        let ids: HashSet<&TaskId> = store.tasks().iter().map(|t| &t.id).collect();
        prop_assert_eq!(ids.len(), store.len());
        prop_assert!(store.tasks().iter().all(|t| !t.text.trim().is_empty()));
    }

    #[test]
    fn prop_filters_partition_list(tasks in tasks_strategy()) {
        let active = Filter::Active.apply(&tasks);
        let completed = Filter::Completed.apply(&tasks);
        let all = Filter::All.apply(&tasks);

        prop_assert_eq!(active.len() + completed.len(), tasks.len());
        prop_assert_eq!(all.len(), tasks.len());
        prop_assert!(active.iter().all(|t| !t.completed));
        prop_assert!(completed.iter().all(|t| t.completed));
    }
}

// Snapshot encoding for the persisted task list

use crate::task::{Task, normalize_text};
use eyre::{Context, Result};
use std::collections::HashSet;
use tracing::{info, warn};

/// Serialize the full list as a JSON array
pub fn encode(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize task list")
}

/// Decode a stored snapshot, falling back to an empty list
///
/// Absent or unparseable data yields an empty list. Entries with a duplicate
/// id (after the first) or blank text are skipped so a loaded list always
/// holds the list invariants.
pub fn decode(raw: Option<&str>) -> Vec<Task> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let parsed: Vec<Task> = match serde_json::from_str(raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(error = ?e, "Failed to parse saved tasks, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(parsed.len());

    for (index, mut task) in parsed.into_iter().enumerate() {
        let Some(text) = normalize_text(&task.text) else {
            warn!(index, id = %task.id, "Skipping saved task with blank text");
            continue;
        };

        if !seen.insert(task.id.clone()) {
            warn!(index, id = %task.id, "Skipping saved task with duplicate id");
            continue;
        }

        task.text = text;
        tasks.push(task);
    }

    info!(count = tasks.len(), "Loaded saved tasks");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    fn task(id: &str, text: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn test_encode_shape() {
        let json = encode(&[task("1", "a", false)]).unwrap();
        assert_eq!(json, r#"[{"id":"1","text":"a","completed":false}]"#);
    }

    #[test]
    fn test_decode_absent() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn test_decode_roundtrip_preserves_order() {
        let tasks = vec![task("2", "b", true), task("1", "a", false), task("3", "c", false)];
        let json = encode(&tasks).unwrap();

        assert_eq!(decode(Some(&json)), tasks);
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode(Some("not json")).is_empty());
        assert!(decode(Some("{malformed json}")).is_empty());
        assert!(decode(Some(r#"{"id":"1","text":"a","completed":false}"#)).is_empty());
        assert!(decode(Some(r#"[{"id":"1","text":"a","completed":"yes"}]"#)).is_empty());
        assert!(decode(Some(r#"[{"id":"1","completed":false}]"#)).is_empty());
        assert!(decode(Some("")).is_empty());
    }

    #[test]
    fn test_decode_skips_duplicate_ids() {
        let raw = r#"[
            {"id":"1","text":"first","completed":false},
            {"id":"1","text":"second","completed":true},
            {"id":"2","text":"other","completed":false}
        ]"#;

        let tasks = decode(Some(raw));
        assert_eq!(tasks, vec![task("1", "first", false), task("2", "other", false)]);
    }

    #[test]
    fn test_decode_skips_blank_text() {
        let raw = r#"[{"id":"1","text":"   ","completed":false},{"id":"2","text":" b ","completed":false}]"#;

        let tasks = decode(Some(raw));
        assert_eq!(tasks, vec![task("2", "b", false)]);
    }
}

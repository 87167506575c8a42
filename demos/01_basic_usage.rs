//! Example 01: Basic Usage
//!
//! This example drives a TaskStore through a TaskListView: adding, completing,
//! editing, reordering, filtering and clearing tasks, then reopening the
//! store to show the list was saved.
//!
//! Run with: cargo run --example 01_basic_usage

use eyre::Result;
use tasklist::{Effect, FileKv, Filter, Intent, TaskListView, TaskStore};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("TaskList Basic Usage Example");
    println!("============================\n");
    println!("Store path: {}\n", store_path.display());

    // Open the store; a missing snapshot loads as an empty list
    let mut store = TaskStore::open(FileKv::open(&store_path)?);
    let mut view = TaskListView::new(store.tasks());
    println!("Store opened with {} tasks.\n", store.len());

    // ADD: newest tasks go to the top
    println!("1. ADD - Adding three tasks...");
    for text in ["Write the report", "Water the plants", "Book train tickets"] {
        view.dispatch(&mut store, Intent::Add(text.to_string()))?;
    }
    print_tasks(&view);

    // TOGGLE: completing a task returns a celebration effect
    println!("2. TOGGLE - Completing 'Water the plants'...");
    let plants = store.tasks()[1].id.clone();
    for effect in view.dispatch(&mut store, Intent::Toggle(plants))? {
        match effect {
            Effect::Celebrate(id) => println!("   Celebrate! {}", id),
        }
    }
    println!("   Progress: {:.0}%\n", view.model().progress);

    // EDIT: blank text would be discarded
    println!("3. EDIT - Renaming a task...");
    let report = store.tasks()[2].id.clone();
    view.dispatch(&mut store, Intent::Edit(report.clone(), "Write the quarterly report".to_string()))?;
    view.dispatch(&mut store, Intent::Edit(report.clone(), "   ".to_string()))?;
    print_tasks(&view);

    // MOVE: drag-and-drop resolves to a move
    println!("4. MOVE - Moving the report to the top...");
    view.dispatch(&mut store, Intent::Move(report, 0))?;
    print_tasks(&view);

    // FILTER: only changes what is shown
    println!("5. FILTER - Showing active tasks...");
    view.dispatch(&mut store, Intent::SetFilter(Filter::Active))?;
    print_tasks(&view);

    // CLEAR: remove completed tasks
    println!("6. CLEAR - Removing completed tasks...");
    view.dispatch(&mut store, Intent::SetFilter(Filter::All))?;
    view.dispatch(&mut store, Intent::ClearCompleted)?;
    print_tasks(&view);

    // Reopen to show the list was persisted after every change
    println!("7. REOPEN - Loading the saved list...");
    let reopened = TaskStore::open(FileKv::open(&store_path)?);
    for task in reopened.tasks() {
        println!("   - {}", task.text);
    }

    println!("\nExample completed successfully!");
    Ok(())
}

fn print_tasks(view: &TaskListView) {
    let model = view.model();
    println!("   [{}] {}", model.filter, model.remaining_label());

    if let Some(empty) = model.empty_state {
        println!("   {}", empty.message);
    }
    for task in &model.visible {
        let mark = if task.completed { "x" } else { " " };
        println!("   [{}] {}", mark, task.text);
    }
    println!();
}

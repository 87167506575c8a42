use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::path::PathBuf;
use tasklist::{Backend, Config, Effect, Filter, Intent, KvStore, Task, TaskId, TaskListView, TaskStore, ViewModel};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList CLI - Ordered to-do list with local persistence")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Directory holding the saved list (default: <data dir>/tasklist)
    #[arg(short, long, global = true)]
    store_path: Option<PathBuf>,

    /// Storage backend: file or sqlite
    #[arg(short, long, global = true)]
    backend: Option<String>,

    /// Key the list is saved under
    #[arg(short, long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Add a task to the top of the list
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Mark a task completed, or active again
    Toggle {
        /// Task id, id prefix, or 1-based position
        task: String,
    },

    /// Change a task's text
    Edit {
        /// Task id, id prefix, or 1-based position
        task: String,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Remove a task
    Delete {
        /// Task id, id prefix, or 1-based position
        task: String,
    },

    /// Remove all completed tasks
    ClearCompleted,

    /// Move a task to a 1-based position
    Move {
        /// Task id, id prefix, or 1-based position
        task: String,
        position: usize,
    },

    /// Set the full list order
    Reorder {
        /// Every task, in the new order
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Show counters and progress
    Stats,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let backend = cli.backend.as_deref().map(str::parse::<Backend>).transpose()?;
    let config = Config::resolve(cli.store_path, backend, cli.key)?;

    // Open store
    let mut store = TaskStore::with_key(config.open_kv()?, &config.key)?;
    store.load();
    let mut view = TaskListView::new(store.tasks());

    let intent = match cli.command {
        Commands::List { filter } => Intent::SetFilter(filter.parse::<Filter>()?),
        Commands::Add { text } => Intent::Add(text.join(" ")),
        Commands::Toggle { task } => Intent::Toggle(resolve_task(&store, &task)?),
        Commands::Edit { task, text } => Intent::Edit(resolve_task(&store, &task)?, text.join(" ")),
        Commands::Delete { task } => Intent::Delete(resolve_task(&store, &task)?),
        Commands::ClearCompleted => Intent::ClearCompleted,
        Commands::Move { task, position } => Intent::Move(resolve_task(&store, &task)?, position.saturating_sub(1)),
        Commands::Reorder { tasks } => {
            let order = tasks
                .iter()
                .map(|t| resolve_task(&store, t))
                .collect::<Result<Vec<TaskId>>>()?;
            Intent::Reorder(order)
        }
        Commands::Stats => {
            print_stats(view.model());
            return Ok(());
        }
    };

    let effects = view.dispatch(&mut store, intent)?;

    for effect in effects {
        match effect {
            Effect::Celebrate(id) => {
                let text = store.get(&id).map(|t| t.text.as_str()).unwrap_or_default();
                println!("{} {}", "🎉 Completed:".green().bold(), text);
            }
        }
    }

    print_list(view.model(), store.tasks());
    Ok(())
}

/// Find a task by exact id, 1-based position, or unique id prefix, in that order
fn resolve_task<K: KvStore>(store: &TaskStore<K>, reference: &str) -> Result<TaskId> {
    let id = TaskId::from(reference);
    if store.get(&id).is_some() {
        return Ok(id);
    }

    if let Some(task) = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|i| store.tasks().get(i))
    {
        return Ok(task.id.clone());
    }

    let mut matches = store.tasks().iter().filter(|t| t.id.as_str().starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(task), None) if !reference.is_empty() => Ok(task.id.clone()),
        (Some(_), Some(_)) => Err(eyre!("Task reference is ambiguous: {}", reference)),
        _ => Err(eyre!("No task matching: {}", reference)),
    }
}

/// Numbers are positions in the full list, so they can be passed back as task references
fn print_list(model: &ViewModel, all: &[Task]) {
    println!(
        "{} {}%  {}",
        "Progress".bold(),
        model.progress.round() as u32,
        model.remaining_label().dimmed()
    );

    if let Some(empty) = model.empty_state {
        println!("{}", empty.message);
        if let Some(hint) = empty.hint {
            println!("{}", hint.dimmed());
        }
        return;
    }

    for task in &model.visible {
        let position = all.iter().position(|t| t.id == task.id).map_or(0, |i| i + 1);
        let short_id: String = task.id.as_str().chars().take(13).collect();
        if task.completed {
            println!(
                "{:>3}. {} {}  {}",
                position,
                "[x]".green(),
                task.text.strikethrough().dimmed(),
                short_id.dimmed()
            );
        } else {
            println!("{:>3}. [ ] {}  {}", position, task.text, short_id.dimmed());
        }
    }
}

fn print_stats(model: &ViewModel) {
    let counters = model.counters;
    println!("Total:     {}", counters.total);
    println!("Active:    {}", counters.active);
    println!("Completed: {}", counters.completed);
    println!("Progress:  {}%", model.progress.round() as u32);
}

//! Task management commands.

use chrono::NaiveDate;
use clap::Subcommand;
use studypro_core::task::TaskDraft;
use studypro_core::{Priority, TaskFilter, TaskStats, TaskStore};

use crate::common::{
    load_collection, open_kv, parse_id, print_json, save_collection, today, CliResult, TASKS_KEY,
};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Priority: low, medium or high (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// Subject name (free text)
        #[arg(long, default_value = "")]
        subject: String,
    },
    /// List tasks
    List {
        /// Filter: all, pending or completed (default: all)
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New subject
        #[arg(long)]
        subject: Option<String>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Toggle a task's completed flag
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Task counts (total / completed / pending / overdue)
    Stats,
}

fn parse_priority(raw: &str) -> Priority {
    match raw {
        "low" => Priority::Low,
        "high" => Priority::High,
        _ => Priority::Medium,
    }
}

fn parse_filter(raw: &str) -> TaskFilter {
    match raw {
        "pending" => TaskFilter::Pending,
        "completed" => TaskFilter::Completed,
        _ => TaskFilter::All,
    }
}

pub fn run(action: TaskAction) -> CliResult {
    let kv = open_kv()?;
    let mut tasks: TaskStore = load_collection(&kv, TASKS_KEY)?;

    match action {
        TaskAction::Create {
            title,
            description,
            priority,
            due,
            subject,
        } => {
            let task = tasks.add(TaskDraft {
                title,
                description,
                priority: parse_priority(&priority),
                due_date: due,
                subject,
                created_at: today(),
            });
            println!("Task created: {}", task.id);
            print_json(task)?;
            save_collection(&kv, TASKS_KEY, &tasks)?;
        }
        TaskAction::List { filter } => {
            let filter = parse_filter(&filter);
            let listed: Vec<_> = tasks.filter(|t| filter.matches(t)).collect();
            print_json(&listed)?;
        }
        TaskAction::Get { id } => match tasks.get(parse_id(&id)?) {
            Some(task) => print_json(task)?,
            None => println!("Task not found: {id}"),
        },
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            due,
            subject,
            completed,
        } => {
            let task = tasks.update(parse_id(&id)?, |task| {
                if let Some(t) = title {
                    task.title = t;
                }
                if let Some(d) = description {
                    task.description = d;
                }
                if let Some(p) = priority {
                    task.priority = parse_priority(&p);
                }
                if let Some(d) = due {
                    task.due_date = d;
                }
                if let Some(s) = subject {
                    task.subject = s;
                }
                if let Some(c) = completed {
                    task.completed = c;
                }
            })?;
            println!("Task updated:");
            print_json(task)?;
            save_collection(&kv, TASKS_KEY, &tasks)?;
        }
        TaskAction::Complete { id } => {
            let task = tasks.update(parse_id(&id)?, |task| task.completed = !task.completed)?;
            let status = if task.completed { "completed" } else { "pending" };
            println!("Task marked as {status}: {id}");
            save_collection(&kv, TASKS_KEY, &tasks)?;
        }
        TaskAction::Delete { id } => {
            if tasks.remove(parse_id(&id)?) {
                println!("Task deleted: {id}");
                save_collection(&kv, TASKS_KEY, &tasks)?;
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Stats => {
            print_json(&TaskStats::compute(&tasks, today()))?;
        }
    }
    Ok(())
}

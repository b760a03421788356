//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kanban_core` linkage.
//! - Walk one optimistic-concurrency round trip against the configured backend.
//!
//! Usage: `kanban_cli [CONFIG_JSON]`. Without an argument the board runs in
//! memory with demo data.

use kanban_core::{open_board, BoardConfig, BoardError, TaskFilter, TaskStatus, UpdateTaskRequest};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(raw) => BoardConfig::from_json(&raw)?,
        None => BoardConfig::memory().with_demo_data(),
    };
    let board = open_board(&config)?;
    println!("backend={}", config.backend.kind_name());

    let Some(first) = board.list_tasks(&TaskFilter::default())?.into_iter().next() else {
        println!("board is empty");
        return Ok(());
    };

    let moved = board.update_task(
        UpdateTaskRequest::new(first.id.as_str(), first.version).status(TaskStatus::InProgress),
    )?;
    println!(
        "update id={} version={}->{} status={}",
        moved.id,
        first.version,
        moved.version,
        moved.status.as_str()
    );

    let stale = UpdateTaskRequest::new(first.id.as_str(), first.version).status(TaskStatus::Done);
    match board.update_task(stale) {
        Err(err @ BoardError::Conflict { .. }) => {
            println!("stale update status={} error={err}", err.status_code());
        }
        Err(err) => return Err(err.into()),
        Ok(task) => println!("stale update unexpectedly applied version={}", task.version),
    }

    let columns = board.board_columns(&TaskFilter::default())?;
    for status in TaskStatus::ALL {
        let titles: Vec<&str> = columns
            .column(status)
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        println!("{}: {}", status.display_label(), titles.join(", "));
    }
    Ok(())
}

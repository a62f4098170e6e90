//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `checklist_core` linkage and slot hydration outside Flutter.
//! - Print a deterministic summary of the stored collection.
//!
//! Usage: `checklist_cli [db_path]` (defaults to `checklist.sqlite3`).

use checklist_core::{ChecklistService, CoreConfig};
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "checklist.sqlite3";

fn main() -> ExitCode {
    println!("checklist_core ping={}", checklist_core::ping());
    println!("checklist_core version={}", checklist_core::core_version());

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    let service = match ChecklistService::open_sqlite(&db_path, &CoreConfig::from_env()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = service.summary();
    println!(
        "lists={} items={}",
        summary.list_count, summary.item_count
    );
    for list in &service.snapshot().lists {
        let progress = list.progress();
        println!(
            "{} [{}] {}/{} {}%",
            list.title, list.created_at, progress.completed, progress.total, progress.percent
        );
    }
    ExitCode::SUCCESS
}

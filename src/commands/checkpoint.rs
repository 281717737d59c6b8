use std::path::Path;

use chrono::NaiveDate;
use colored::Colorize;
use tracing::info;

use crate::checkpoint::{self, Checkpoint};

/// Shows the stored checkpoint, or moves the priority date while keeping
/// the last update date.
pub fn checkpoint(path: &Path, priority_date: Option<NaiveDate>) -> crate::Result<Checkpoint> {
    let mut current = checkpoint::load(path);
    if let Some(priority) = priority_date {
        info!("Setting priority date to {}", priority);
        checkpoint::save(path, current.last_update, priority)?;
        current.priority = priority;
    }
    println!("{} {}", "Last update:".bold(), current.last_update);
    println!("{} {}", "Priority date:".bold(), current.priority);
    Ok(current)
}

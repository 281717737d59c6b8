use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use colored::Colorize;
use tracing::{debug, warn};
use tracing_unwrap::OptionExt;

use crate::error::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Mods updated after this date need downloading.
    pub last_update: NaiveDate,
    /// Mods updated after this date are also handed off.
    pub priority: NaiveDate,
}

impl Checkpoint {
    pub fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2010, 4, 1).expect_or_log("Default checkpoint date is invalid")
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Checkpoint {
            last_update: Checkpoint::epoch(),
            priority: Checkpoint::epoch(),
        }
    }
}

/// Reads the checkpoint file, falling back to defaults for both dates if
/// the file is absent or either line is unusable.
pub fn load(path: &Path) -> Checkpoint {
    if !path.is_file() {
        debug!("No checkpoint at {}, using defaults", path.display());
        return Checkpoint::default();
    }
    match read(path) {
        Ok(checkpoint) => {
            debug!(
                "Loaded checkpoint: last update {}, priority {}",
                checkpoint.last_update, checkpoint.priority
            );
            checkpoint
        }
        Err(e) => {
            warn!("{}", e);
            eprintln!("{} Resetting to default.", e.to_string().yellow());
            Checkpoint::default()
        }
    }
}

fn read(path: &Path) -> Result<Checkpoint, Error> {
    let contents = std::fs::read_to_string(path)?;
    let mut lines = contents.lines().map(str::trim);
    let parse = |line: Option<&str>| -> Result<NaiveDate, Error> {
        let line = line.unwrap_or_default();
        NaiveDate::parse_from_str(line, DATE_FORMAT).map_err(|e| Error::CheckpointParse {
            path: PathBuf::from(path),
            reason: format!("'{}' ({})", line, e),
        })
    };
    let last_update = parse(lines.next())?;
    let priority = parse(lines.next())?;
    Ok(Checkpoint {
        last_update,
        priority,
    })
}

pub fn save(path: &Path, run_date: NaiveDate, priority: NaiveDate) -> std::io::Result<()> {
    debug!(
        "Saving checkpoint to {}: {} / {}",
        path.display(),
        run_date,
        priority
    );
    std::fs::write(
        path,
        format!(
            "{}\n{}",
            run_date.format(DATE_FORMAT),
            priority.format(DATE_FORMAT)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = load(&dir.path().join("last_update.txt"));
        assert_eq!(checkpoint, Checkpoint::default());
        assert_eq!(checkpoint.last_update, date(2010, 4, 1));
        assert_eq!(checkpoint.priority, date(2010, 4, 1));
    }

    #[test]
    fn reads_both_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        std::fs::write(&path, "2023-06-15\n2022-01-31\n").unwrap();
        let checkpoint = load(&path);
        assert_eq!(checkpoint.last_update, date(2023, 6, 15));
        assert_eq!(checkpoint.priority, date(2022, 1, 31));
    }

    #[test]
    fn bad_second_line_resets_both() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        std::fs::write(&path, "2023-06-15\nyesterday").unwrap();
        assert_eq!(load(&path), Checkpoint::default());
    }

    #[test]
    fn single_line_resets_both() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        std::fs::write(&path, "2023-06-15").unwrap();
        assert_eq!(load(&path), Checkpoint::default());
    }

    #[test]
    fn garbage_and_empty_files_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        for contents in ["", "\n\n", "15/06/2023\n2022-01-31", "not a date at all"] {
            std::fs::write(&path, contents).unwrap();
            assert_eq!(load(&path), Checkpoint::default(), "{:?}", contents);
        }
    }

    #[test]
    fn save_then_load_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        let original = "2021-05-01\n2019-12-24";
        std::fs::write(&path, original).unwrap();

        let checkpoint = load(&path);
        save(&path, checkpoint.last_update, checkpoint.priority).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn save_replaces_run_date_and_keeps_priority() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        save(&path, date(2020, 1, 1), date(2015, 3, 3)).unwrap();
        save(&path, date(2024, 2, 29), load(&path).priority).unwrap();

        let checkpoint = load(&path);
        assert_eq!(checkpoint.last_update, date(2024, 2, 29));
        assert_eq!(checkpoint.priority, date(2015, 3, 3));
    }
}

mod check;
mod checkpoint;
mod update;
mod util;

pub use check::check;
pub use checkpoint::checkpoint;
pub use update::update;
pub use util::{AssumeYes, InquirePrompt, Prompt};

use tracing::info;

use crate::{classify::UpdateSets, download::DownloadReport};

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    MissingModList,
    UpToDate,
    Checked(UpdateSets),
    Declined(UpdateSets),
    Downloaded {
        sets: UpdateSets,
        report: DownloadReport,
    },
}

impl Outcome {
    pub fn summary(&self) -> String {
        match self {
            Outcome::MissingModList => "no mod list".to_string(),
            Outcome::UpToDate => "all mods up to date".to_string(),
            Outcome::Checked(sets) => format!(
                "{} to update, {} to hand off",
                sets.needs_update.len(),
                sets.priority_handoff.len()
            ),
            Outcome::Declined(sets) => {
                format!("declined {} updates", sets.needs_update.len())
            }
            Outcome::Downloaded { sets, report } => format!(
                "downloaded {} of {}, {} failed, {} to hand off",
                report.succeeded.len(),
                sets.needs_update.len(),
                report.failed.len(),
                sets.priority_handoff.len()
            ),
        }
    }
}

pub fn log_outcome(outcome: &Outcome) {
    info!("Finished: {}", outcome.summary());
}

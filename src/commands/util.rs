use colored::Colorize;
use inquire::error::InquireResult;
use inquire::{Confirm, InquireError};
use tracing::debug;

use crate::{
    checkpoint::{self, Checkpoint},
    classify::{classify, UpdateSets},
    config::Config,
    error::Error,
    modlist::{self, ModReference},
    probe::{probe_all, UpdateProbe},
    Result as CrateResult,
};

pub trait Prompt {
    fn confirm(&self, message: &str) -> CrateResult<bool>;
}

trait InterruptedDefault<T> {
    fn with_interrupted_default(self, d: T) -> InquireResult<T>;
}

impl<T> InterruptedDefault<T> for InquireResult<T> {
    fn with_interrupted_default(self, d: T) -> InquireResult<T> {
        match &self {
            Ok(_) => self,
            Err(ie) => match ie {
                InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(d),
                _ => self,
            },
        }
    }
}

/// Interactive prompt on the terminal. Escaping or interrupting counts as no.
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn confirm(&self, message: &str) -> CrateResult<bool> {
        Ok(Confirm::new(message)
            .with_default(false)
            .prompt()
            .with_interrupted_default(false)?)
    }
}

pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, message: &str) -> CrateResult<bool> {
        debug!("Answering yes to: {}", message);
        Ok(true)
    }
}

pub enum Scan {
    MissingModList,
    Classified {
        checkpoint: Checkpoint,
        sets: UpdateSets,
    },
}

/// Loads the checkpoint and mod list, probes every mod, and sorts out which
/// ones changed.
pub async fn scan<P>(config: &Config, prober: &P) -> CrateResult<Scan>
where
    P: UpdateProbe + ?Sized,
{
    let checkpoint = checkpoint::load(&config.checkpoint_file);

    let mods = match modlist::load(&config.mods_file) {
        Ok(mods) => mods,
        Err(e @ Error::MissingFile(_)) => {
            eprintln!("{}", e.to_string().red());
            return Ok(Scan::MissingModList);
        }
        Err(e) => return Err(e.into()),
    };

    let records = probe_all(prober, &mods).await;
    let sets = classify(&records, &checkpoint);
    for reference in &sets.needs_update {
        println!("{} requires an update.", reference.to_string().yellow().bold());
    }
    Ok(Scan::Classified { checkpoint, sets })
}

pub fn handoff_report(mods: &[ModReference]) -> String {
    let title = "Send to Vlad";
    let title_corner = boxy::Char::upper_left(boxy::Weight::Thick);
    let title_side_h = boxy::Char::horizontal(boxy::Weight::Thick).to_string();
    let title_side_v = boxy::Char::vertical(boxy::Weight::Thick);
    let title_branch = boxy::Char::right_tee(boxy::Weight::Thick).down(boxy::Weight::Normal);
    let left_branch_more_str = boxy::Char::right_tee(boxy::Weight::Normal).to_string();
    let left_branch_done_str = boxy::Char::lower_left(boxy::Weight::Normal).to_string();
    let left_node = boxy::Char::left_half(boxy::Weight::Normal);

    let mut lines = vec![
        format!(
            "{}{}{}",
            title_corner,
            title_side_h.repeat(title.len() + 2),
            title_corner.rotate_cw(1)
        ),
        format!("{} {} {}", title_side_v, title.bold(), title_side_v),
        format!(
            "{}{}{}",
            title_branch,
            title_side_h.repeat(title.len() + 2),
            title_corner.rotate_cw(2)
        ),
    ];
    let mut mods = mods.iter().peekable();
    while let Some(reference) = mods.next() {
        lines.push(format!(
            "{}{}{}",
            if mods.peek().is_some() {
                &left_branch_more_str
            } else {
                &left_branch_done_str
            },
            left_node,
            reference
        ));
    }
    lines.join("\n")
}

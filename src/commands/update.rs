use colored::Colorize;
use tracing::info;

use super::util::{handoff_report, scan, Prompt, Scan};
use super::Outcome;
use crate::{
    checkpoint,
    config::Config,
    download::{print_summary, Browser, DownloadDriver, DownloadTrigger},
    probe::UpdateProbe,
};

/// Checks every mod for updates and, once the user agrees, downloads the
/// updated ones and moves the checkpoint to today.
pub async fn update<P>(
    config: &Config,
    prober: &P,
    browser: &dyn Browser,
    trigger: &dyn DownloadTrigger,
    prompt: &dyn Prompt,
) -> crate::Result<Outcome>
where
    P: UpdateProbe + ?Sized,
{
    let (current, sets) = match scan(config, prober).await? {
        Scan::MissingModList => return Ok(Outcome::MissingModList),
        Scan::Classified { checkpoint, sets } => (checkpoint, sets),
    };

    if sets.needs_update.is_empty() {
        println!("{}", "All mods up to date".green());
        return Ok(Outcome::UpToDate);
    }

    if !prompt.confirm("Do you want to update beamer mods?")? {
        println!("Ok, leaving everything as it is.");
        return Ok(Outcome::Declined(sets));
    }

    let driver = DownloadDriver::new(browser, trigger, config.download.clone());
    let report = driver.download_all(&sets.needs_update).await;
    print_summary(&report);

    if !sets.priority_handoff.is_empty() {
        println!("\n{}", handoff_report(&sets.priority_handoff));
    }

    let today = chrono::offset::Local::now().date_naive();
    info!("Moving checkpoint to {}", today);
    checkpoint::save(&config.checkpoint_file, today, current.priority)?;
    Ok(Outcome::Downloaded { sets, report })
}

use colored::Colorize;

use super::util::{handoff_report, scan, Scan};
use super::Outcome;
use crate::{config::Config, probe::UpdateProbe};

pub async fn check<P>(config: &Config, prober: &P) -> crate::Result<Outcome>
where
    P: UpdateProbe + ?Sized,
{
    let sets = match scan(config, prober).await? {
        Scan::MissingModList => return Ok(Outcome::MissingModList),
        Scan::Classified { sets, .. } => sets,
    };

    if sets.needs_update.is_empty() {
        println!("{}", "All mods up to date".green());
        return Ok(Outcome::UpToDate);
    }

    println!(
        "{} mod(s) need an update. Run the update command to download them.",
        sets.needs_update.len().to_string().bold()
    );
    if !sets.priority_handoff.is_empty() {
        println!("\n{}", handoff_report(&sets.priority_handoff));
    }
    Ok(Outcome::Checked(sets))
}

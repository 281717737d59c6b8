mod browser;
mod trigger;

pub use browser::{Browser, BrowserSession, WebDriverBrowser, DEFAULT_WEBDRIVER_URL};
pub use trigger::{AnchorClickTrigger, DownloadTrigger};

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use colored::Colorize;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use crate::{error::Error, modlist::ModReference, progress};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub download_dir: PathBuf,
    pub archive_extension: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub succeeded: Vec<ModReference>,
    pub failed: Vec<ModReference>,
}

pub struct DownloadDriver<'a> {
    browser: &'a dyn Browser,
    trigger: &'a dyn DownloadTrigger,
    settings: DownloadSettings,
}

impl<'a> DownloadDriver<'a> {
    pub fn new(
        browser: &'a dyn Browser,
        trigger: &'a dyn DownloadTrigger,
        settings: DownloadSettings,
    ) -> Self {
        DownloadDriver {
            browser,
            trigger,
            settings,
        }
    }

    pub async fn download_all(&self, mods: &[ModReference]) -> DownloadReport {
        let mut report = DownloadReport::default();
        println!();
        for (i, reference) in mods.iter().enumerate() {
            let name = reference.display_name();
            progress::print(i, mods.len(), "Progress:", &format!("Downloading {}", name));
            match self.download(reference).await {
                Ok(()) => {
                    info!("Downloaded {}", name.trim_end());
                    report.succeeded.push(reference.clone());
                }
                Err(e) => {
                    error!(
                        "Error downloading mod {} from {}: {}",
                        name.trim_end(),
                        reference,
                        e
                    );
                    report.failed.push(reference.clone());
                }
            }
        }
        progress::print(1, 1, "Progress:", &format!("{:<50}", "Completed"));
        report
    }

    // The session is closed whatever the outcome.
    pub async fn download(&self, reference: &ModReference) -> Result<(), Error> {
        let dir = &self.settings.download_dir;
        let mut session = self.browser.open(dir).await?;
        let result = self.run_session(session.as_mut(), reference).await;
        if let Err(e) = session.close().await {
            warn!("Failed to close browser session for {}: {}", reference, e);
        }
        result
    }

    async fn run_session(
        &self,
        session: &mut dyn BrowserSession,
        reference: &ModReference,
    ) -> Result<(), Error> {
        let dir = &self.settings.download_dir;
        let ext = &self.settings.archive_extension;
        let before = count_archives(dir, ext)?;
        debug!("{} archives in {} before download", before, dir.display());

        session.goto(reference.url()).await?;
        let started = Instant::now();
        self.trigger.trigger(session).await?;

        loop {
            sleep(self.settings.poll_interval).await;
            if count_archives(dir, ext)? > before {
                debug!(
                    "Archive for {} arrived after {:?}",
                    reference,
                    started.elapsed()
                );
                return Ok(());
            }
            if started.elapsed() > self.settings.timeout {
                return Err(Error::DownloadTimeout(self.settings.timeout));
            }
        }
    }
}

fn count_archives(dir: &Path, extension: &str) -> std::io::Result<usize> {
    let suffix = format!(".{}", extension);
    let mut count = 0;
    for entry in dir.read_dir()? {
        if entry?.file_name().to_string_lossy().ends_with(&suffix) {
            count += 1;
        }
    }
    Ok(count)
}

pub fn print_summary(report: &DownloadReport) {
    let total = report.succeeded.len() + report.failed.len();
    let line = format!("Downloaded {} of {} mods", report.succeeded.len(), total);
    if report.failed.is_empty() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.yellow().bold());
        for reference in &report.failed {
            println!("  {} {}", "failed:".red(), reference);
        }
    }
}

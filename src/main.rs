mod checkpoint;
mod classify;
mod commands;
mod config;
mod download;
mod error;
mod modlist;
mod probe;
mod progress;
mod util;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::{
    config::Config,
    download::{AnchorClickTrigger, DownloadSettings, WebDriverBrowser},
    probe::HttpProber,
};

/// Checks mod pages for updates and downloads the updated mods
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// File with one mod page URL per line
    #[arg(long, global = true, default_value = config::DEFAULT_MODS_FILE)]
    mods_file: PathBuf,

    /// File holding the last update and priority dates
    #[arg(long, global = true, default_value = config::DEFAULT_CHECKPOINT_FILE)]
    checkpoint_file: PathBuf,

    /// Where downloaded mods end up [default: <Downloads>/beamer-mods]
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Checks for updated mods and offers to download them
    Update {
        /// WebDriver endpoint to drive the browser through
        #[arg(long, default_value = download::DEFAULT_WEBDRIVER_URL)]
        webdriver_url: String,

        /// Show the browser window instead of running headless
        #[arg(long)]
        show_browser: bool,

        /// Seconds to wait for each download to finish
        #[arg(long, default_value_t = download::DEFAULT_TIMEOUT.as_secs())]
        timeout_secs: u64,

        /// Extension of finished downloads
        #[arg(long, default_value = config::DEFAULT_ARCHIVE_EXTENSION)]
        archive_extension: String,

        /// Download without asking first
        #[arg(short, long)]
        yes: bool,
    },
    /// Lists updated mods without downloading anything
    Check,
    /// Shows or changes the stored checkpoint
    Checkpoint {
        /// New priority hand-off date (YYYY-MM-DD)
        #[arg(short, long)]
        priority_date: Option<NaiveDate>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
    info!(
        "Starting beamer-mod-checker version {}",
        env!("CARGO_PKG_VERSION")
    );
    let args = Args::parse();
    debug!("{:?}", args);

    let download_dir = args
        .download_dir
        .clone()
        .unwrap_or_else(util::default_download_dir);
    let mut config = Config {
        mods_file: args.mods_file,
        checkpoint_file: args.checkpoint_file,
        download: DownloadSettings {
            download_dir,
            archive_extension: config::DEFAULT_ARCHIVE_EXTENSION.to_string(),
            timeout: download::DEFAULT_TIMEOUT,
            poll_interval: download::DEFAULT_POLL_INTERVAL,
        },
    };

    match args.command {
        Command::Update {
            webdriver_url,
            show_browser,
            timeout_secs,
            archive_extension,
            yes,
        } => {
            config.download.download_dir = util::prepare_download_dir(&config.download.download_dir)?;
            config.download.archive_extension = archive_extension;
            config.download.timeout = Duration::from_secs(timeout_secs);

            let prober = HttpProber::new()?;
            let browser = WebDriverBrowser::new(webdriver_url, !show_browser);
            let prompt: &dyn commands::Prompt = if yes {
                &commands::AssumeYes
            } else {
                &commands::InquirePrompt
            };
            let outcome =
                commands::update(&config, &prober, &browser, &AnchorClickTrigger, prompt).await?;
            commands::log_outcome(&outcome);
        }
        Command::Check => {
            let prober = HttpProber::new()?;
            let outcome = commands::check(&config, &prober).await?;
            commands::log_outcome(&outcome);
        }
        Command::Checkpoint { priority_date } => {
            commands::checkpoint(&config.checkpoint_file, priority_date)?;
        }
    }
    Ok(())
}

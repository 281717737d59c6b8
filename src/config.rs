use std::path::PathBuf;

use crate::download::DownloadSettings;

pub const DEFAULT_MODS_FILE: &str = "mods.txt";
pub const DEFAULT_CHECKPOINT_FILE: &str = "last_update.txt";
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, Clone)]
pub struct Config {
    pub mods_file: PathBuf,
    pub checkpoint_file: PathBuf,
    pub download: DownloadSettings,
}

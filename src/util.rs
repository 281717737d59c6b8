use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| {
            warn!("Could not locate the Downloads directory, using the working directory");
            PathBuf::from(".")
        })
        .join("beamer-mods")
}

/// Creates the download directory if needed. The browser wants an absolute
/// path for its download preference.
pub fn prepare_download_dir(dir: &Path) -> crate::Result<PathBuf> {
    if !dir.is_dir() {
        info!("Creating download directory {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    let dir = std::path::absolute(dir)?;
    debug!("Download directory: {}", dir.display());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_creates_nested_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("b");
        let prepared = prepare_download_dir(&dir).unwrap();
        assert!(prepared.is_absolute());
        assert!(prepared.is_dir());
    }
}

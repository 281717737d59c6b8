use std::path::Path;

use tracing::debug;

use crate::error::Error;

const DISPLAY_WIDTH: usize = 40;

/// A mod page URL, exactly as it appears in the mod list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModReference(String);

impl ModReference {
    pub fn new(url: impl Into<String>) -> Self {
        ModReference(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }

    /// Second-to-last path segment of the URL, fixed to 40 columns.
    /// Only meant for console output.
    pub fn display_name(&self) -> String {
        let name = url::Url::parse(&self.0)
            .ok()
            .and_then(|url| {
                let segments: Vec<String> = url.path_segments()?.map(str::to_string).collect();
                segments
                    .len()
                    .checked_sub(2)
                    .map(|i| segments[i].clone())
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.0.clone());
        format!("{:<width$.width$}", name, width = DISPLAY_WIDTH)
    }
}

impl std::fmt::Display for ModReference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads one mod reference per line. Blank lines are kept and simply fail
/// to probe later.
pub fn load(path: &Path) -> Result<Vec<ModReference>, Error> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let mods: Vec<ModReference> = contents
        .lines()
        .map(|line| ModReference::new(line.trim_end()))
        .collect();
    debug!("Read {} mod references from {}", mods.len(), path.display());
    Ok(mods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mods.txt");
        assert!(matches!(load(&path), Err(Error::MissingFile(p)) if p == path));
    }

    #[test]
    fn keeps_order_strips_trailing_whitespace_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mods.txt");
        std::fs::write(
            &path,
            "http://example.com/mods/foo/  \r\n\nhttp://example.com/mods/bar/\t\n",
        )
        .unwrap();

        let mods = load(&path).unwrap();
        assert_eq!(
            mods,
            vec![
                ModReference::new("http://example.com/mods/foo/"),
                ModReference::new(""),
                ModReference::new("http://example.com/mods/bar/"),
            ]
        );
    }

    #[test]
    fn display_name_uses_second_to_last_segment() {
        let name = ModReference::new("http://example.com/mods/foo/").display_name();
        assert_eq!(name.trim_end(), "foo");
        assert_eq!(name.chars().count(), DISPLAY_WIDTH);
    }

    #[test]
    fn display_name_is_truncated() {
        let long = "x".repeat(60);
        let name = ModReference::new(format!("https://example.com/resources/{}/", long))
            .display_name();
        assert_eq!(name, "x".repeat(DISPLAY_WIDTH));
    }

    #[test]
    fn display_name_falls_back_to_url() {
        let name = ModReference::new("not a url").display_name();
        assert_eq!(name.trim_end(), "not a url");
    }
}

use std::path::Path;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Error;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Starts a fresh browser session that drops downloads into a directory
/// without asking.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn open(&self, download_dir: &Path) -> Result<Box<dyn BrowserSession>, Error>;
}

#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), Error>;
    async fn execute(&mut self, script: &str) -> Result<(), Error>;
    async fn close(&mut self) -> Result<(), Error>;
}

pub struct WebDriverBrowser {
    webdriver_url: String,
    headless: bool,
}

impl WebDriverBrowser {
    pub fn new(webdriver_url: impl Into<String>, headless: bool) -> Self {
        WebDriverBrowser {
            webdriver_url: webdriver_url.into(),
            headless,
        }
    }

    fn capabilities(&self, download_dir: &Path) -> serde_json::Map<String, Value> {
        let mut args = vec!["--log-level=3"];
        if self.headless {
            args.push("--headless");
        }
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "excludeSwitches": ["enable-logging"],
                "prefs": {
                    "download.default_directory": download_dir.display().to_string(),
                    "download.prompt_for_download": false,
                    "download.directory_upgrade": true,
                },
            }),
        );
        caps
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn open(&self, download_dir: &Path) -> Result<Box<dyn BrowserSession>, Error> {
        debug!("Starting browser session at {}", self.webdriver_url);
        let client = ClientBuilder::native()
            .capabilities(self.capabilities(download_dir))
            .connect(&self.webdriver_url)
            .await?;
        Ok(Box::new(WebDriverSession {
            client: Some(client),
        }))
    }
}

struct WebDriverSession {
    client: Option<Client>,
}

impl WebDriverSession {
    fn client(&self) -> Result<&Client, Error> {
        self.client
            .as_ref()
            .ok_or_else(|| Error::Download("browser session already closed".to_string()))
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), Error> {
        self.client()?.goto(url).await?;
        Ok(())
    }

    async fn execute(&mut self, script: &str) -> Result<(), Error> {
        self.client()?.execute(script, vec![]).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Error> {
        if let Some(client) = self.client.take() {
            debug!("Closing browser session");
            client.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_point_downloads_at_directory() {
        let browser = WebDriverBrowser::new(DEFAULT_WEBDRIVER_URL, true);
        let caps = browser.capabilities(Path::new("/tmp/mods"));
        let options = &caps["goog:chromeOptions"];
        assert_eq!(options["prefs"]["download.default_directory"], "/tmp/mods");
        assert_eq!(options["prefs"]["download.prompt_for_download"], false);
        assert!(options["args"]
            .as_array()
            .unwrap()
            .contains(&json!("--headless")));
    }

    #[test]
    fn visible_browser_skips_headless_flag() {
        let browser = WebDriverBrowser::new(DEFAULT_WEBDRIVER_URL, false);
        let caps = browser.capabilities(Path::new("/tmp/mods"));
        assert!(!caps["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .contains(&json!("--headless")));
    }
}

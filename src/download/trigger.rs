use async_trait::async_trait;

use super::browser::BrowserSession;
use crate::error::Error;

/// Whatever has to happen on an open mod page to make it start a download.
#[async_trait]
pub trait DownloadTrigger: Send + Sync {
    async fn trigger(&self, session: &mut dyn BrowserSession) -> Result<(), Error>;
}

/// Clicks the first link whose target mentions "download". A headless
/// browser cannot click through the page itself, so the click is synthesized.
pub struct AnchorClickTrigger;

pub const ANCHOR_CLICK_SCRIPT: &str = r#"
const downloadButton = document.querySelector('a[href*="download"]');
if (downloadButton) {
    downloadButton.click();
}
"#;

#[async_trait]
impl DownloadTrigger for AnchorClickTrigger {
    async fn trigger(&self, session: &mut dyn BrowserSession) -> Result<(), Error> {
        session.execute(ANCHOR_CLICK_SCRIPT).await
    }
}

mod extract;

pub use extract::DateExtractor;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{error::ProbeError, modlist::ModReference, progress};

/// Some mod sites turn away anything that does not look like a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Clone, PartialEq)]
pub struct ModUpdateRecord {
    pub reference: ModReference,
    pub updated: Option<NaiveDate>,
}

#[async_trait]
pub trait UpdateProbe {
    /// Never fails: problems are logged and reported as `None`.
    async fn probe(&self, reference: &ModReference) -> Option<NaiveDate>;
}

pub struct HttpProber {
    client: reqwest::Client,
    extractor: DateExtractor,
}

impl HttpProber {
    pub fn new() -> Result<Self, ProbeError> {
        Self::build(reqwest::Client::builder())
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self, ProbeError> {
        Ok(HttpProber {
            client: builder.user_agent(USER_AGENT).build()?,
            extractor: DateExtractor::default(),
        })
    }

    // Error statuses are not failures by themselves: the page is still
    // searched for a date.
    async fn fetch_date(&self, reference: &ModReference) -> Result<NaiveDate, ProbeError> {
        let url = url::Url::parse(reference.url())?;
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", reference, status);
        }
        let body = response.text().await?;
        self.extractor.extract(&body)
    }
}

#[async_trait]
impl UpdateProbe for HttpProber {
    async fn probe(&self, reference: &ModReference) -> Option<NaiveDate> {
        match self.fetch_date(reference).await {
            Ok(date) => {
                debug!("{} last updated {}", reference, date);
                Some(date)
            }
            Err(e) => {
                warn!("Error fetching mod info for {}: {}", reference, e);
                None
            }
        }
    }
}

pub async fn probe_all<P>(prober: &P, mods: &[ModReference]) -> Vec<ModUpdateRecord>
where
    P: UpdateProbe + ?Sized,
{
    let mut records = Vec::with_capacity(mods.len());
    for (i, reference) in mods.iter().enumerate() {
        let updated = prober.probe(reference).await;
        progress::print(i + 1, mods.len(), "Checking Mods:", "Complete");
        records.push(ModUpdateRecord {
            reference: reference.clone(),
            updated,
        });
    }
    records
}

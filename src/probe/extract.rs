use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use tracing_unwrap::ResultExt;

use crate::error::ProbeError;

/// One place a mod page may keep its last update date.
#[derive(Debug, Clone)]
pub enum DateStrategy {
    Text(Selector),
    Attribute { selector: Selector, attr: &'static str },
}

impl DateStrategy {
    pub fn text(selector: &str) -> Self {
        DateStrategy::Text(parse_selector(selector))
    }

    pub fn attribute(selector: &str, attr: &'static str) -> Self {
        DateStrategy::Attribute {
            selector: parse_selector(selector),
            attr,
        }
    }

    fn extract(&self, container: ElementRef) -> Option<String> {
        match self {
            DateStrategy::Text(selector) => container
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>()),
            DateStrategy::Attribute { selector, attr } => container
                .select(selector)
                .next()
                .and_then(|el| el.value().attr(attr))
                .map(str::to_string),
        }
    }
}

fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector)
        .map_err(|e| e.to_string())
        .expect_or_log("Built-in selector failed to parse")
}

/// Pulls the "last updated" date out of a mod page.
///
/// Strategies are tried in order within the container element. The first
/// one that finds its element decides the date text, even if that text
/// turns out to be unparsable.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    container_name: &'static str,
    container: Selector,
    strategies: Vec<DateStrategy>,
    format: &'static str,
}

impl DateExtractor {
    pub fn new(
        container: &'static str,
        strategies: Vec<DateStrategy>,
        format: &'static str,
    ) -> Self {
        DateExtractor {
            container_name: container,
            container: parse_selector(container),
            strategies,
            format,
        }
    }

    pub fn extract(&self, html: &str) -> Result<NaiveDate, ProbeError> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.container)
            .next()
            .ok_or(ProbeError::MissingContainer(self.container_name))?;

        let text = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let found = strategy.extract(container);
                trace!("{:?} -> {:?}", strategy, found);
                found
            })
            .ok_or(ProbeError::MissingDate(self.container_name))?;

        let text = text.trim();
        NaiveDate::parse_from_str(text, self.format).map_err(|source| ProbeError::BadDate {
            text: text.to_string(),
            source,
        })
    }
}

impl Default for DateExtractor {
    /// The forum layout used by the mod pages: a `dl.lastUpdate` block
    /// holding either a `span.DateTime` or an `abbr.DateTime` with the date
    /// in `data-datestring`.
    fn default() -> Self {
        DateExtractor::new(
            "dl.lastUpdate",
            vec![
                DateStrategy::text("span.DateTime"),
                DateStrategy::attribute("abbr.DateTime", "data-datestring"),
            ],
            "%b %d, %Y",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(inner: &str) -> String {
        format!(
            r#"<html><body><div class="secondaryContent">
                <dl class="firstRelease"><dt>First Release:</dt>
                    <dd><span class="DateTime">Feb 01, 2015</span></dd></dl>
                <dl class="lastUpdate"><dt>Last Update:</dt><dd>{}</dd></dl>
            </div></body></html>"#,
            inner
        )
    }

    #[test]
    fn reads_span_text() {
        let html = page(r#"<span class="DateTime" title="May 1, 2021 at 3:14 PM"> May 01, 2021 </span>"#);
        assert_eq!(
            DateExtractor::default().extract(&html).unwrap(),
            NaiveDate::from_ymd_opt(2021, 5, 1).unwrap()
        );
    }

    #[test]
    fn falls_back_to_abbr_attribute() {
        let html = page(
            r#"<abbr class="DateTime" data-time="1660000000" data-datestring="Aug 08, 2022" data-timestring="11:06 PM">Yesterday at 11:06 PM</abbr>"#,
        );
        assert_eq!(
            DateExtractor::default().extract(&html).unwrap(),
            NaiveDate::from_ymd_opt(2022, 8, 8).unwrap()
        );
    }

    #[test]
    fn ignores_dates_outside_the_container() {
        let html = r#"<span class="DateTime">Feb 01, 2015</span><dl class="lastUpdate"></dl>"#;
        assert!(matches!(
            DateExtractor::default().extract(html),
            Err(ProbeError::MissingDate(_))
        ));
    }

    #[test]
    fn missing_container() {
        assert!(matches!(
            DateExtractor::default().extract("<html><body>Not found</body></html>"),
            Err(ProbeError::MissingContainer("dl.lastUpdate"))
        ));
    }

    #[test]
    fn span_with_bad_text_does_not_fall_back() {
        let html = page(
            r#"<span class="DateTime">sometime</span><abbr class="DateTime" data-datestring="Aug 08, 2022"></abbr>"#,
        );
        match DateExtractor::default().extract(&html) {
            Err(ProbeError::BadDate { text, .. }) => assert_eq!(text, "sometime"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn abbr_without_attribute_is_missing() {
        let html = page(r#"<abbr class="DateTime">Aug 08, 2022</abbr>"#);
        assert!(matches!(
            DateExtractor::default().extract(&html),
            Err(ProbeError::MissingDate(_))
        ));
    }

    #[test]
    fn custom_strategies_are_tried_in_order() {
        let extractor = DateExtractor::new(
            "#info",
            vec![
                DateStrategy::attribute("time", "datetime"),
                DateStrategy::text("p.updated"),
            ],
            "%Y-%m-%d",
        );
        let html = r#"<div id="info"><p class="updated">2020-02-02</p></div>"#;
        assert_eq!(
            extractor.extract(html).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 2).unwrap()
        );
    }

    #[test]
    fn one_extractor_reads_many_pages() {
        let extractor = DateExtractor::default();
        let first = page(r#"<span class="DateTime">Jan 02, 2006</span>"#);
        let second = page(r#"<abbr class="DateTime" data-datestring="Dec 31, 2019"></abbr>"#);
        assert_eq!(
            extractor.extract(&first).unwrap(),
            NaiveDate::from_ymd_opt(2006, 1, 2).unwrap()
        );
        assert_eq!(
            extractor.extract(&second).unwrap(),
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
        );
        assert!(extractor.extract("<p></p>").is_err());
        assert_eq!(
            extractor.extract(&first).unwrap(),
            NaiveDate::from_ymd_opt(2006, 1, 2).unwrap()
        );
    }
}

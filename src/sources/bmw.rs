//! BMW Group careers portal source, driven through a live browser session
//!
//! The portal renders entirely client-side, so this source scripts a
//! WebDriver session: dismiss the consent drawer (isolated in a shadow
//! root), narrow the board to Munich and the last 7 days, search for
//! "Werkstudent" and walk the result pages.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::{WebDriverError, WebDriverResult};
use thirtyfour::prelude::{ElementQueryable, ElementWaitable};
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};
use crate::traits::JobSource;

const JOB_BOARD_URL: &str = "https://www.bmwgroup.jobs/de/en/jobs.html";
const CITY: &str = "Munich";
const SEARCH_TERM: &str = "Werkstudent";

// Consent drawer. The accept button sits inside the host's shadow root and
// is only reachable through a script bridge.
const CONSENT_HOST: &str = "epaas-consent-drawer-shell";
const CONSENT_ACCEPT: &str =
    "body > div > div > section > div.actions > div > div.buttons > button.accept-button.button-primary";

const LOCATION_FILTER: &str = "//div[@title='Location filter']";
const PUBLICATION_FILTER: &str = "//div[@title='Publication filter']";
const MUNICH_CHECKBOX: &str = "location_DE/Munich";
const LAST_7_DAYS_CHECKBOX: &str = "postingDate_7";
const SEARCH_INPUT: &str = "input.grp-text-search";
const SEARCH_BUTTON: &str = "button.grp-text-search-icon";

const RESULT_ROW: &str = "tr.grp-jobfinder__row";
const ROW_TITLE: &str = ".grp-jobfinder__cell-title";
const ROW_LINK: &str = "a.grp-jobfinder__link-jobdescription";
const NEXT_BUTTON: &str = "button.grp-jobfinder__pagination-button.next";

const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const CONSENT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A next-page control that is missing or marked disabled ends pagination
fn next_control_exhausted(class_attr: Option<&str>) -> bool {
    match class_attr {
        Some(class) => class.contains("disabled"),
        None => true,
    }
}

/// Scraper for the BMW Group job finder portal
pub struct BmwSource {
    employer: String,
    webdriver_url: String,
}

impl BmwSource {
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            employer: "BMW".to_string(),
            webdriver_url: webdriver_url.to_string(),
        }
    }

    /// Best-effort consent handling. An absent dialog is the expected case
    /// on sessions that already carry consent state; anything else that
    /// goes wrong here is surfaced as a warning but never aborts the run.
    async fn handle_consent(&self, driver: &WebDriver) {
        match self.accept_consent(driver).await {
            Ok(()) => info!("{}: consent dialog accepted", self.employer),
            Err(WebDriverError::NoSuchElement(_)) => {
                info!("{}: no consent dialog present", self.employer);
            }
            Err(e) => warn!("{}: consent handling failed: {}", self.employer, e),
        }
    }

    async fn accept_consent(&self, driver: &WebDriver) -> WebDriverResult<()> {
        let host = driver
            .query(By::Css(CONSENT_HOST))
            .wait(CONSENT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;

        let script = format!("return arguments[0].shadowRoot.querySelector('{CONSENT_ACCEPT}');");
        let button = driver
            .execute(&script, vec![host.to_json()?])
            .await?
            .element()?;
        button.click().await?;

        Ok(())
    }

    /// Open a filter dropdown and tick one checkbox inside it
    async fn apply_filter(
        &self,
        driver: &WebDriver,
        dropdown_xpath: &str,
        checkbox_id: &str,
    ) -> WebDriverResult<()> {
        let dropdown = driver
            .query(By::XPath(dropdown_xpath))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        dropdown
            .wait_until()
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .clickable()
            .await?;
        dropdown.click().await?;

        let checkbox = driver
            .query(By::Id(checkbox_id))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        checkbox.scroll_into_view().await?;
        checkbox.click().await?;

        Ok(())
    }

    async fn submit_search(&self, driver: &WebDriver) -> WebDriverResult<()> {
        let search_input = driver
            .query(By::Css(SEARCH_INPUT))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        search_input.clear().await?;
        search_input.send_keys(SEARCH_TERM).await?;

        let search_button = driver
            .query(By::Css(SEARCH_BUTTON))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        search_button
            .wait_until()
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .clickable()
            .await?;
        search_button.click().await?;

        Ok(())
    }

    /// Read every result page, one record per row container.
    ///
    /// Title and link are looked up within the same row, so a row missing
    /// either is skipped instead of shifting the pairing of the others.
    async fn collect_pages(&self, driver: &WebDriver) -> Result<Vec<JobRecord>, FetchError> {
        let mut records: Vec<JobRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let first_row = match driver
                .query(By::Css(RESULT_ROW))
                .wait(WAIT_TIMEOUT, POLL_INTERVAL)
                .first()
                .await
            {
                Ok(row) => row,
                // A search with no hits renders no rows at all; that is an
                // empty result, not a failure. Rows missing after a page
                // flip still surface as an error.
                Err(WebDriverError::NoSuchElement(_)) if records.is_empty() => break,
                Err(e) => return Err(e.into()),
            };

            for row in driver.find_all(By::Css(RESULT_ROW)).await? {
                let Ok(title_el) = row.find(By::Css(ROW_TITLE)).await else {
                    continue;
                };
                let Ok(link_el) = row.find(By::Css(ROW_LINK)).await else {
                    continue;
                };

                let title = title_el.text().await?;
                let Some(href) = link_el.attr("href").await? else {
                    continue;
                };
                if title.trim().is_empty() {
                    continue;
                }

                let record =
                    JobRecord::new(&self.employer, title.trim(), &href).with_location(CITY);
                if seen.insert(record.id.clone()) {
                    records.push(record);
                }
            }

            let next_button = match driver.find(By::Css(NEXT_BUTTON)).await {
                Ok(button) => button,
                Err(WebDriverError::NoSuchElement(_)) => break,
                Err(e) => return Err(e.into()),
            };
            let class_attr = next_button.attr("class").await?;
            if next_control_exhausted(class_attr.as_deref()) {
                break;
            }

            next_button.click().await?;

            // The old rows going stale marks the next page as rendered.
            first_row
                .wait_until()
                .wait(WAIT_TIMEOUT, POLL_INTERVAL)
                .stale()
                .await?;
        }

        Ok(records)
    }

    async fn scrape(&self, driver: &WebDriver) -> Result<Vec<JobRecord>, FetchError> {
        driver.goto(JOB_BOARD_URL).await?;

        // The consent query doubles as the initial-render wait: it polls
        // until the page chrome exists instead of sleeping a fixed delay.
        self.handle_consent(driver).await;

        self.apply_filter(driver, LOCATION_FILTER, MUNICH_CHECKBOX)
            .await?;
        self.apply_filter(driver, PUBLICATION_FILTER, LAST_7_DAYS_CHECKBOX)
            .await?;
        self.submit_search(driver).await?;

        self.collect_pages(driver).await
    }
}

#[async_trait]
impl JobSource for BmwSource {
    fn employer(&self) -> &str {
        &self.employer
    }

    // The portal's own search already scopes results to the keyword, so the
    // shared criteria are not re-applied to the scraped titles.
    async fn fetch(&self, _criteria: &FilterCriteria) -> Result<Vec<JobRecord>, FetchError> {
        info!("{}: starting browser session", self.employer);

        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        let driver = WebDriver::new(&self.webdriver_url, caps).await?;

        // The session must be closed on the failure path too, so the scrape
        // runs first and its result is only unwrapped after quit().
        let result = self.scrape(&driver).await;
        driver.quit().await?;

        let records = result?;
        info!(
            "{}: {} postings scraped from the portal",
            self.employer,
            records.len()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_ends_on_disabled_marker_class() {
        assert!(next_control_exhausted(Some(
            "grp-jobfinder__pagination-button next disabled"
        )));
        assert!(next_control_exhausted(None));
        assert!(!next_control_exhausted(Some(
            "grp-jobfinder__pagination-button next"
        )));
    }
}

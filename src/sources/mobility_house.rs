//! The Mobility House career-page source (static HTML)

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};
use crate::sources::USER_AGENT;
use crate::traits::JobSource;

const CAREER_URL: &str = "https://www.mobilityhouse.com/de_de/unser-unternehmen/karriere#jobs";
const BASE_URL: &str = "https://www.mobilityhouse.com";

/// Scraper for The Mobility House's server-rendered career page
pub struct MobilityHouseSource {
    client: Client,
    employer: String,
}

impl MobilityHouseSource {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            employer: "MobilityHouse".to_string(),
        })
    }

    fn parse_jobs(&self, html: &str, criteria: &FilterCriteria) -> Vec<JobRecord> {
        let document = Html::parse_document(html);

        let link_selector = Selector::parse(r#"a[data-cy="jobOpeningLink"]"#).unwrap();
        let title_selector = Selector::parse("span").unwrap();
        let type_selector = Selector::parse(r#"span[data-cy="employmentType"]"#).unwrap();

        let mut records = Vec::new();

        for link in document.select(&link_selector) {
            if let Some(href) = link.value().attr("href")
                && let Some(title_el) = link.select(&title_selector).next()
            {
                let title = title_el.text().collect::<String>().trim().to_string();
                if title.is_empty() {
                    continue;
                }

                // Some openings carry the working-student marker only in the
                // employment-type badge, not in the title.
                let employment_type = link.select(&type_selector).next().map_or_else(
                    String::new,
                    |el| el.text().collect::<String>().trim().to_string(),
                );

                if !criteria.matches_title(&title) && !criteria.matches_title(&employment_type) {
                    continue;
                }

                let url = if href.starts_with("http") {
                    href.to_string()
                } else {
                    format!("{BASE_URL}{href}")
                };

                records.push(JobRecord::new(&self.employer, &title, &url));
            }
        }

        records
    }
}

#[async_trait]
impl JobSource for MobilityHouseSource {
    fn employer(&self) -> &str {
        &self.employer
    }

    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<JobRecord>, FetchError> {
        info!("Fetching career page for {}", self.employer);

        let response = self
            .client
            .get(CAREER_URL)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: CAREER_URL.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: CAREER_URL.to_string(),
                status: response.status(),
            });
        }

        let html = response.text().await.map_err(|source| FetchError::Http {
            url: CAREER_URL.to_string(),
            source,
        })?;

        let records = self.parse_jobs(&html, criteria);
        info!(
            "{}: {} matching postings on the career page",
            self.employer,
            records.len()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <a data-cy="jobOpeningLink" href="/jobs/42">
            <span>Werkstudent Marketing</span>
            <span data-cy="employmentType">Werkstudium</span>
        </a>
        <a data-cy="jobOpeningLink" href="https://x.com/j/1">
            <span>Data Analyst</span>
            <span data-cy="employmentType">Werkstudium</span>
        </a>
        <a data-cy="jobOpeningLink" href="/jobs/77">
            <span>Senior Backend Engineer</span>
            <span data-cy="employmentType">Vollzeit</span>
        </a>
        <a href="/not-a-job"><span>Werkstudent somewhere else</span></a>
    </body></html>"#;

    fn source() -> MobilityHouseSource {
        MobilityHouseSource::new().unwrap()
    }

    #[test]
    fn relative_links_are_rewritten_to_absolute() {
        let records = source().parse_jobs(PAGE, &FilterCriteria::working_student());

        assert_eq!(records[0].url, "https://www.mobilityhouse.com/jobs/42");
    }

    #[test]
    fn absolute_links_pass_through_unchanged() {
        let records = source().parse_jobs(PAGE, &FilterCriteria::working_student());

        assert_eq!(records[1].url, "https://x.com/j/1");
    }

    #[test]
    fn employment_type_alone_qualifies_a_posting() {
        let records = source().parse_jobs(PAGE, &FilterCriteria::working_student());

        // "Data Analyst" matches through its Werkstudium badge only.
        assert!(records.iter().any(|r| r.title == "Data Analyst"));
    }

    #[test]
    fn unmarked_anchors_and_other_roles_are_ignored() {
        let records = source().parse_jobs(PAGE, &FilterCriteria::working_student());

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.title != "Senior Backend Engineer"));
        assert!(records.iter().all(|r| r.title != "Werkstudent somewhere else"));
    }
}

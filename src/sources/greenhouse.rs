//! Greenhouse boards-API source

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};
use crate::sources::USER_AGENT;
use crate::traits::JobSource;

/// One employer's job board on the Greenhouse boards API
pub struct GreenhouseSource {
    client: Client,
    employer: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct BoardResponse {
    #[serde(default)]
    jobs: Vec<BoardJob>,
}

#[derive(Debug, Deserialize)]
struct BoardJob {
    title: String,
    absolute_url: String,
}

impl GreenhouseSource {
    pub fn new(employer: &str, api_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            employer: employer.to_string(),
            api_url: api_url.to_string(),
        })
    }

    fn matching_records(&self, jobs: Vec<BoardJob>, criteria: &FilterCriteria) -> Vec<JobRecord> {
        jobs.into_iter()
            .filter(|job| !job.title.is_empty() && criteria.matches_title(&job.title))
            .map(|job| JobRecord::new(&self.employer, &job.title, &job.absolute_url))
            .collect()
    }
}

#[async_trait]
impl JobSource for GreenhouseSource {
    fn employer(&self) -> &str {
        &self.employer
    }

    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<JobRecord>, FetchError> {
        info!("Fetching Greenhouse board for {}", self.employer);

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: self.api_url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.api_url.clone(),
                status: response.status(),
            });
        }

        let board: BoardResponse = response.json().await.map_err(|e| FetchError::Malformed {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;

        let records = self.matching_records(board.jobs, criteria);
        info!(
            "{}: {} matching postings on Greenhouse",
            self.employer,
            records.len()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> GreenhouseSource {
        GreenhouseSource::new("Isar Aerospace", "https://boards-api.greenhouse.io/v1/boards/isaraerospace/jobs").unwrap()
    }

    #[test]
    fn keeps_only_working_student_titles() {
        let body = r#"{
            "jobs": [
                {"title": "Werkstudent (m/w/d) Controlling", "absolute_url": "https://boards.greenhouse.io/isar/jobs/1"},
                {"title": "Senior Engineer", "absolute_url": "https://boards.greenhouse.io/isar/jobs/2"},
                {"title": "Working Student Avionics", "absolute_url": "https://boards.greenhouse.io/isar/jobs/3"}
            ]
        }"#;
        let board: BoardResponse = serde_json::from_str(body).unwrap();

        let records = source().matching_records(board.jobs, &FilterCriteria::working_student());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Werkstudent (m/w/d) Controlling");
        assert_eq!(records[0].url, "https://boards.greenhouse.io/isar/jobs/1");
        assert_eq!(records[1].title, "Working Student Avionics");
        assert!(records.iter().all(|r| r.employer == "Isar Aerospace"));
    }

    #[test]
    fn missing_jobs_array_yields_no_records() {
        let board: BoardResponse = serde_json::from_str("{}").unwrap();

        let records = source().matching_records(board.jobs, &FilterCriteria::working_student());

        assert!(records.is_empty());
    }
}

//! Personio XML feed source
//!
//! The feed lists `<position>` elements; job URLs are not part of the feed
//! and are synthesized from the employer subdomain and the position id.

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};
use crate::sources::USER_AGENT;
use crate::traits::JobSource;

/// One employer's job feed on Personio
pub struct PersonioSource {
    client: Client,
    employer: String,
    xml_url: String,
}

/// Fields of one `<position>` as they appear in the feed
#[derive(Debug, Default)]
struct RawPosition {
    name: Option<String>,
    seniority: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum PositionField {
    Name,
    Seniority,
    Id,
}

/// Pull the name/seniority/id triple out of every `<position>` element.
///
/// Only the first occurrence of each child is captured; later duplicates
/// (e.g. `<name>` nested inside job description blocks) are ignored.
fn parse_positions(xml: &str) -> Result<Vec<RawPosition>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut positions = Vec::new();
    let mut current: Option<RawPosition> = None;
    let mut capture: Option<PositionField> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"position" => current = Some(RawPosition::default()),
                b"name" if current.is_some() => capture = Some(PositionField::Name),
                b"seniority" if current.is_some() => capture = Some(PositionField::Seniority),
                b"id" if current.is_some() => capture = Some(PositionField::Id),
                _ => {}
            },
            Event::Text(e) => {
                if let (Some(pos), Some(field)) = (current.as_mut(), capture) {
                    let text = e.decode()?.trim().to_string();
                    if text.is_empty() {
                        continue;
                    }

                    let slot = match field {
                        PositionField::Name => &mut pos.name,
                        PositionField::Seniority => &mut pos.seniority,
                        PositionField::Id => &mut pos.id,
                    };
                    if slot.is_none() {
                        *slot = Some(text);
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"position" => {
                    if let Some(pos) = current.take() {
                        positions.push(pos);
                    }
                }
                b"name" | b"seniority" | b"id" => capture = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(positions)
}

impl PersonioSource {
    pub fn new(employer: &str, xml_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            employer: employer.to_string(),
            xml_url: xml_url.to_string(),
        })
    }

    fn job_url(&self, id: &str) -> String {
        format!(
            "https://{}.jobs.personio.de/job/{}",
            self.employer.to_lowercase(),
            id
        )
    }

    fn matching_records(
        &self,
        positions: Vec<RawPosition>,
        criteria: &FilterCriteria,
    ) -> Vec<JobRecord> {
        let mut records = Vec::new();

        for pos in positions {
            let (Some(name), Some(id)) = (pos.name, pos.id) else {
                debug!("Skipping {} position with missing name or id", self.employer);
                continue;
            };

            let seniority = pos.seniority.unwrap_or_default();
            if criteria.matches_seniority(&seniority) || criteria.matches_title(&name) {
                records.push(JobRecord::new(&self.employer, &name, &self.job_url(&id)));
            }
        }

        records
    }
}

#[async_trait]
impl JobSource for PersonioSource {
    fn employer(&self) -> &str {
        &self.employer
    }

    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<JobRecord>, FetchError> {
        info!("Fetching Personio feed for {}", self.employer);

        let response = self
            .client
            .get(&self.xml_url)
            .query(&[("language", "en")])
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: self.xml_url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.xml_url.clone(),
                status: response.status(),
            });
        }

        let xml = response.text().await.map_err(|source| FetchError::Http {
            url: self.xml_url.clone(),
            source,
        })?;

        let positions = parse_positions(&xml).map_err(|e| FetchError::Malformed {
            url: self.xml_url.clone(),
            reason: e.to_string(),
        })?;

        let records = self.matching_records(positions, criteria);
        info!(
            "{}: {} matching postings on Personio",
            self.employer,
            records.len()
        );

        Ok(records)
    }
}

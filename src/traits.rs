//! Traits and interfaces for source-agnostic job fetching

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};

/// Trait for employer-specific job sources
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Display name of the employer this source scrapes
    fn employer(&self) -> &str;

    /// Fetch all postings matching the given criteria
    ///
    /// # Returns
    /// * `Result<Vec<JobRecord>, FetchError>` - Matching records or the fetch failure
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<JobRecord>, FetchError>;
}

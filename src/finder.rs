use tracing::{error, info};

use crate::error::FetchError;
use crate::models::{FilterCriteria, JobRecord};
use crate::traits::JobSource;

/// Outcome of one aggregation pass across all registered sources
pub struct AggregateOutcome {
    /// Matching records, in source-invocation order
    pub records: Vec<JobRecord>,
    /// Sources that failed outright, with the failure
    pub failures: Vec<(String, FetchError)>,
}

pub struct JobFinder {
    sources: Vec<Box<dyn JobSource>>,
    criteria: FilterCriteria,
}

impl JobFinder {
    pub fn new(sources: Vec<Box<dyn JobSource>>, criteria: FilterCriteria) -> Self {
        Self { sources, criteria }
    }

    /// Run every source once, sequentially, in registration order.
    ///
    /// A failing source is logged and carried in the outcome; it never
    /// aborts the pass or hides the other sources' results.
    pub async fn collect_jobs(&self) -> AggregateOutcome {
        let mut records = Vec::new();
        let mut failures = Vec::new();

        for source in &self.sources {
            match source.fetch(&self.criteria).await {
                Ok(jobs) => {
                    info!("{}: {} matching postings", source.employer(), jobs.len());
                    records.extend(jobs);
                }
                Err(e) => {
                    error!("{} fetch failed: {}", source.employer(), e);
                    failures.push((source.employer().to_string(), e));
                }
            }
        }

        AggregateOutcome { records, failures }
    }
}

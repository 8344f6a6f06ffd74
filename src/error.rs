//! Error types shared by every job source

use thiserror::Error;

/// Failure of a single source fetch.
///
/// Every source returns `Result<Vec<JobRecord>, FetchError>`, so the
/// aggregator can tell "source failed" apart from "source had no matches".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure talking to an endpoint
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered, but not with a success status
    #[error("unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Response body did not have the expected shape
    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// Browser automation failure on an interactive portal
    #[error("browser automation failed: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
}

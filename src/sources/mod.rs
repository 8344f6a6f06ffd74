//! Employer-specific job sources

mod bmw;
mod greenhouse;
mod mobility_house;
mod personio;

pub use bmw::BmwSource;
pub use greenhouse::GreenhouseSource;
pub use mobility_house::MobilityHouseSource;
pub use personio::PersonioSource;

/// User agent sent on plain HTTP fetches
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

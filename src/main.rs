use anyhow::Result;
use tracing::info;

mod error;
mod finder;
mod models;
mod report;
mod sources;
mod traits;

use finder::JobFinder;
use models::FilterCriteria;
use sources::{BmwSource, GreenhouseSource, MobilityHouseSource, PersonioSource};
use traits::JobSource;

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    info!("Starting working-student job aggregation");

    let webdriver_url =
        std::env::var("WEBDRIVER_URL").unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string());

    let criteria = FilterCriteria::working_student();
    let sources: Vec<Box<dyn JobSource>> = vec![
        Box::new(GreenhouseSource::new(
            "Isar Aerospace",
            "https://boards-api.greenhouse.io/v1/boards/isaraerospace/jobs",
        )?),
        Box::new(PersonioSource::new(
            "OroraTech",
            "https://ororatech.jobs.personio.de/xml",
        )?),
        Box::new(PersonioSource::new(
            "GridX",
            "https://gridx.jobs.personio.de/xml",
        )?),
        Box::new(MobilityHouseSource::new()?),
        Box::new(BmwSource::new(&webdriver_url)),
    ];

    let finder = JobFinder::new(sources, criteria);
    let outcome = finder.collect_jobs().await;

    report::print(&outcome);

    Ok(())
}

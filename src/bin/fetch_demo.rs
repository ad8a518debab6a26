//! One-shot probe: runs the aggregation pipeline against the configured
//! providers and prints the merged result as JSON. Handy for checking
//! upstream credentials and field mapping without starting the server.
//!
//! Usage: `cargo run --bin fetch_demo -- [search] [location]`

use applitrak_aggregator::aggregate::config::AggregatorConfig;
use applitrak_aggregator::aggregate::providers::default_providers;
use applitrak_aggregator::{fetch_external_jobs, JobQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let config = AggregatorConfig::load()?;
    let providers = default_providers(&config)?;

    let mut args = std::env::args().skip(1);
    let query = JobQuery {
        search: args.next().unwrap_or_default(),
        location: args.next().unwrap_or_default(),
        page: 1,
    };

    let jobs = fetch_external_jobs(&providers, &query).await;
    println!("{}", serde_json::to_string_pretty(&jobs)?);
    eprintln!("{} jobs after dedup", jobs.len());
    Ok(())
}

// src/aggregate/providers/mod.rs
pub mod arbeitnow;
pub mod findwork;
pub mod remotive;

use anyhow::Result;

use crate::aggregate::config::AggregatorConfig;
use crate::aggregate::types::JobProvider;

/// Assemble the production provider list in the canonical merge order.
/// The order matters: deduplication keeps the first-seen entry, so
/// FindWork wins ties over Arbeitnow, which wins over Remotive.
pub fn default_providers(config: &AggregatorConfig) -> Result<Vec<Box<dyn JobProvider>>> {
    let client = config.http_client()?;
    Ok(vec![
        Box::new(findwork::FindworkProvider::from_config(config, client.clone())),
        Box::new(arbeitnow::ArbeitnowProvider::from_config(config, client.clone())),
        Box::new(remotive::RemotiveProvider::from_config(config, client)),
    ])
}

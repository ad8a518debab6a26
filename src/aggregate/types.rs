// src/aggregate/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which upstream board a job came from. Set by the producing adapter,
/// never inferred after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    Findwork,
    Arbeitnow,
    Remotive,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Findwork => "findwork",
            JobSource::Arbeitnow => "arbeitnow",
            JobSource::Remotive => "remotive",
        }
    }
}

/// The common job record every adapter produces. Every field is always
/// populated; fallback values stand in for anything the upstream omits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub posted: String,
    pub image: String,
    pub external_url: String,
    pub source: JobSource,
    pub is_active: bool,
}

/// Search parameters passed through to every adapter. Adapters that
/// cannot forward a parameter upstream either ignore it (Remotive and
/// `page`) or apply it client-side (Arbeitnow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub search: String,
    pub location: String,
    pub page: u32,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: String::new(),
            page: 1,
        }
    }
}

#[async_trait::async_trait]
pub trait JobProvider: Send + Sync {
    /// Fetch one page of listings. Errors returned here are absorbed at
    /// the aggregation boundary as an empty contribution.
    async fn fetch_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>>;
    fn name(&self) -> &'static str;
}

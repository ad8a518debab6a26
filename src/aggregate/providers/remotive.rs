use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::aggregate::config::{AggregatorConfig, DEFAULT_PLACEHOLDER_LOGO};
use crate::aggregate::types::{JobProvider, JobQuery, JobSource, NormalizedJob};
use crate::aggregate::{days_ago, non_empty, slugify, synthetic_id};

// Remotive returns its whole board in one response; keep the head only.
const MAX_RESULTS: usize = 20;

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    id: Option<i64>,
    url: Option<String>,
    title: Option<String>,
    company_name: Option<String>,
    company_logo: Option<String>,
    job_type: Option<String>,
    publication_date: Option<String>,
    candidate_required_location: Option<String>,
    salary: Option<String>,
    description: Option<String>,
}

/// Remotive adapter. Remote-only board: both `location` and `type` fall
/// back to "Remote". Honors search/location upstream, has no paging.
pub struct RemotiveProvider {
    mode: Mode,
    placeholder_logo: String,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RemotiveProvider {
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
            placeholder_logo: DEFAULT_PLACEHOLDER_LOGO.to_string(),
        }
    }

    pub fn from_config(config: &AggregatorConfig, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: config.remotive_url.clone(),
                client,
            },
            placeholder_logo: config.placeholder_logo.clone(),
        }
    }

    fn map_jobs(&self, body: &str) -> Result<Vec<NormalizedJob>> {
        let t0 = std::time::Instant::now();
        let resp: RemotiveResponse =
            serde_json::from_str(body).context("parsing remotive response")?;
        let now = chrono::Utc::now();

        let mut out = Vec::with_capacity(MAX_RESULTS.min(resp.jobs.len()));
        for job in resp.jobs.into_iter().take(MAX_RESULTS) {
            let title = non_empty(job.title);
            let company_name = non_empty(job.company_name);

            let id = job
                .id
                .map(|n| n.to_string())
                .unwrap_or_else(|| synthetic_id("remotive"));
            let stem = slugify(title.as_deref().or(company_name.as_deref()).unwrap_or_default());

            out.push(NormalizedJob {
                slug: format!("remotive-{stem}-{id}"),
                id,
                title: title.unwrap_or_else(|| "Untitled Position".to_string()),
                company: company_name.unwrap_or_else(|| "Company Not Specified".to_string()),
                description: job.description.unwrap_or_default(),
                location: non_empty(job.candidate_required_location)
                    .unwrap_or_else(|| "Remote".to_string()),
                salary: non_empty(job.salary).unwrap_or_else(|| "Not specified".to_string()),
                employment_type: non_empty(job.job_type).unwrap_or_else(|| "Remote".to_string()),
                posted: job
                    .publication_date
                    .as_deref()
                    .map(|d| days_ago(d, now))
                    .unwrap_or_else(|| "recently".to_string()),
                image: non_empty(job.company_logo)
                    .unwrap_or_else(|| self.placeholder_logo.clone()),
                external_url: non_empty(job.url).unwrap_or_else(|| "#".to_string()),
                source: JobSource::Remotive,
                is_active: true,
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("jobs_parse_ms").record(ms);
        counter!("jobs_fetched_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl JobProvider for RemotiveProvider {
    async fn fetch_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        match &self.mode {
            Mode::Fixture(body) => self.map_jobs(body),

            // no `page` parameter: the upstream API does not paginate
            Mode::Http { url, client } => {
                let resp = client
                    .get(url)
                    .query(&[
                        ("search", query.search.clone()),
                        ("location", query.location.clone()),
                    ])
                    .send()
                    .await
                    .context("remotive http get")?
                    .error_for_status()
                    .context("remotive http status")?;
                let body = resp.text().await.context("remotive http body")?;
                self.map_jobs(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "remotive"
    }
}

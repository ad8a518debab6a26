use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::aggregate::config::{AggregatorConfig, DEFAULT_PLACEHOLDER_LOGO};
use crate::aggregate::types::{JobProvider, JobQuery, JobSource, NormalizedJob};
use crate::aggregate::{days_ago, non_empty, slugify, synthetic_id};

#[derive(Debug, Deserialize)]
struct FindworkResponse {
    results: Vec<FindworkJob>,
}

#[derive(Debug, Deserialize)]
struct FindworkJob {
    id: Option<i64>,
    role: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    text: Option<String>,
    date_posted: Option<String>,
    remote: Option<bool>,
    employment_type: Option<String>,
    logo: Option<String>,
    url: Option<String>,
}

/// FindWork adapter. The only board of the three that requires a token
/// (`Authorization: Token <key>`); it honors search, location, and page
/// as upstream query parameters.
pub struct FindworkProvider {
    mode: Mode,
    placeholder_logo: String,
}

enum Mode {
    Fixture(String),
    Http {
        url: String,
        api_key: String,
        client: reqwest::Client,
    },
}

impl FindworkProvider {
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
            placeholder_logo: DEFAULT_PLACEHOLDER_LOGO.to_string(),
        }
    }

    pub fn from_config(config: &AggregatorConfig, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: config.findwork_url.clone(),
                api_key: config.findwork_api_key.clone(),
                client,
            },
            placeholder_logo: config.placeholder_logo.clone(),
        }
    }

    fn map_jobs(&self, body: &str) -> Result<Vec<NormalizedJob>> {
        let t0 = std::time::Instant::now();
        let resp: FindworkResponse =
            serde_json::from_str(body).context("parsing findwork response")?;
        let now = chrono::Utc::now();

        let mut out = Vec::with_capacity(resp.results.len());
        for job in resp.results {
            let role = non_empty(job.role);
            let company_name = non_empty(job.company_name);

            let id = job
                .id
                .map(|n| n.to_string())
                .unwrap_or_else(|| synthetic_id("findwork"));
            let stem = slugify(role.as_deref().or(company_name.as_deref()).unwrap_or_default());

            out.push(NormalizedJob {
                slug: format!("findwork-{stem}-{id}"),
                id,
                title: role.unwrap_or_else(|| "Untitled Position".to_string()),
                company: company_name.unwrap_or_else(|| "Company Not Specified".to_string()),
                description: job.text.unwrap_or_default(),
                location: non_empty(job.location).unwrap_or_else(|| {
                    if job.remote.unwrap_or(false) {
                        "Remote".to_string()
                    } else {
                        "Not specified".to_string()
                    }
                }),
                // FindWork publishes no salary data
                salary: "Not specified".to_string(),
                employment_type: non_empty(job.employment_type)
                    .unwrap_or_else(|| "Full time".to_string()),
                posted: job
                    .date_posted
                    .as_deref()
                    .map(|d| days_ago(d, now))
                    .unwrap_or_else(|| "recently".to_string()),
                image: non_empty(job.logo).unwrap_or_else(|| self.placeholder_logo.clone()),
                external_url: non_empty(job.url).unwrap_or_else(|| "#".to_string()),
                source: JobSource::Findwork,
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
impl JobProvider for FindworkProvider {
    async fn fetch_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        match &self.mode {
            Mode::Fixture(body) => self.map_jobs(body),

            Mode::Http {
                url,
                api_key,
                client,
            } => {
                let resp = client
                    .get(url)
                    .header("Authorization", format!("Token {api_key}"))
                    .query(&[
                        ("search", query.search.clone()),
                        ("location", query.location.clone()),
                        ("page", query.page.to_string()),
                    ])
                    .send()
                    .await
                    .context("findwork http get")?
                    .error_for_status()
                    .context("findwork http status")?;
                let body = resp.text().await.context("findwork http body")?;
                self.map_jobs(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "findwork"
    }
}

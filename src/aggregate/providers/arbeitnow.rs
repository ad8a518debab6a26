use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::aggregate::config::{AggregatorConfig, DEFAULT_PLACEHOLDER_LOGO};
use crate::aggregate::types::{JobProvider, JobQuery, JobSource, NormalizedJob};
use crate::aggregate::{days_ago_from_unix, non_empty, slugify, synthetic_id};

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    data: Vec<ArbeitnowJob>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowJob {
    slug: Option<String>,
    company_name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    remote: Option<bool>,
    url: Option<String>,
    #[serde(default)]
    job_types: Vec<String>,
    location: Option<String>,
    created_at: Option<i64>,
}

/// Arbeitnow adapter. The upstream API only paginates; search and
/// location are applied client-side after mapping, matching against
/// title/company (search) and location only.
pub struct ArbeitnowProvider {
    mode: Mode,
    placeholder_logo: String,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl ArbeitnowProvider {
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
            placeholder_logo: DEFAULT_PLACEHOLDER_LOGO.to_string(),
        }
    }

    pub fn from_config(config: &AggregatorConfig, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: config.arbeitnow_url.clone(),
                client,
            },
            placeholder_logo: config.placeholder_logo.clone(),
        }
    }

    fn map_jobs(&self, body: &str, query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        let t0 = std::time::Instant::now();
        let resp: ArbeitnowResponse =
            serde_json::from_str(body).context("parsing arbeitnow response")?;
        let now = chrono::Utc::now();

        let mut out = Vec::with_capacity(resp.data.len());
        for job in resp.data {
            let title = non_empty(job.title);
            let company_name = non_empty(job.company_name);
            let upstream_slug = non_empty(job.slug);

            let (id, slug) = match upstream_slug {
                Some(s) => (s.clone(), s),
                None => {
                    let stem =
                        slugify(title.as_deref().or(company_name.as_deref()).unwrap_or_default());
                    (synthetic_id("arbeitnow"), format!("arbeitnow-{stem}"))
                }
            };

            let mapped = NormalizedJob {
                id,
                slug,
                title: title.unwrap_or_else(|| "Untitled Position".to_string()),
                company: company_name.unwrap_or_else(|| "Company Not Specified".to_string()),
                description: job.description.unwrap_or_default(),
                location: non_empty(job.location).unwrap_or_else(|| {
                    if job.remote.unwrap_or(false) {
                        "Remote".to_string()
                    } else {
                        "Not specified".to_string()
                    }
                }),
                salary: "Not specified".to_string(),
                employment_type: non_empty(job.job_types.into_iter().next())
                    .unwrap_or_else(|| "Full time".to_string()),
                posted: job
                    .created_at
                    .map(|ts| days_ago_from_unix(ts, now))
                    .unwrap_or_else(|| "recently".to_string()),
                image: self.placeholder_logo.clone(),
                external_url: non_empty(job.url).unwrap_or_else(|| "#".to_string()),
                source: JobSource::Arbeitnow,
                is_active: true,
            };

            if matches_query(&mapped, query) {
                out.push(mapped);
            }
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("jobs_parse_ms").record(ms);
        counter!("jobs_fetched_total").increment(out.len() as u64);
        Ok(out)
    }
}

/// Client-side stand-in for the query filters the upstream API lacks.
/// `search` matches title or company (not description); `location`
/// matches the mapped location. Both are lowercased substring checks.
fn matches_query(job: &NormalizedJob, query: &JobQuery) -> bool {
    let search = query.search.trim().to_lowercase();
    if !search.is_empty()
        && !job.title.to_lowercase().contains(&search)
        && !job.company.to_lowercase().contains(&search)
    {
        return false;
    }

    let location = query.location.trim().to_lowercase();
    if !location.is_empty() && !job.location.to_lowercase().contains(&location) {
        return false;
    }

    true
}

#[async_trait]
impl JobProvider for ArbeitnowProvider {
    async fn fetch_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        match &self.mode {
            Mode::Fixture(body) => self.map_jobs(body, query),

            Mode::Http { url, client } => {
                let resp = client
                    .get(url)
                    .query(&[("page", query.page.to_string())])
                    .send()
                    .await
                    .context("arbeitnow http get")?
                    .error_for_status()
                    .context("arbeitnow http status")?;
                let body = resp.text().await.context("arbeitnow http body")?;
                self.map_jobs(&body, query)
            }
        }
    }

    fn name(&self) -> &'static str {
        "arbeitnow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, location: &str) -> NormalizedJob {
        NormalizedJob {
            id: "x".into(),
            slug: "x".into(),
            title: title.into(),
            company: company.into(),
            description: "an engineer is mentioned here".into(),
            location: location.into(),
            salary: "Not specified".into(),
            employment_type: "Full time".into(),
            posted: "today".into(),
            image: "/placeholder-logo.png".into(),
            external_url: "#".into(),
            source: JobSource::Arbeitnow,
            is_active: true,
        }
    }

    #[test]
    fn search_matches_title_or_company_only() {
        let q = JobQuery {
            search: "engineer".into(),
            ..Default::default()
        };
        assert!(matches_query(&job("Senior Engineer", "Acme", "Berlin"), &q));
        assert!(matches_query(&job("Designer", "Engineering GmbH", "Berlin"), &q));
        // description mentions "engineer" but title/company do not
        assert!(!matches_query(&job("Designer", "Acme", "Berlin"), &q));
    }

    #[test]
    fn location_filter_is_a_substring_check() {
        let q = JobQuery {
            location: "berlin".into(),
            ..Default::default()
        };
        assert!(matches_query(&job("Dev", "Acme", "Berlin, Germany"), &q));
        assert!(!matches_query(&job("Dev", "Acme", "Hamburg"), &q));
    }

    #[test]
    fn blank_query_matches_everything() {
        let q = JobQuery::default();
        assert!(matches_query(&job("Dev", "Acme", "Remote"), &q));
    }
}

// src/aggregate/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use crate::aggregate::types::{JobProvider, JobQuery, NormalizedJob};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("jobs_fetched_total", "Jobs mapped from upstream responses.");
        describe_counter!("jobs_kept_total", "Jobs kept after deduplication.");
        describe_counter!("jobs_dedup_total", "Jobs removed as title+company duplicates.");
        describe_counter!(
            "jobs_provider_errors_total",
            "Provider fetch/parse errors absorbed by the aggregator."
        );
        describe_histogram!("jobs_parse_ms", "Upstream response parse time in milliseconds.");
        describe_gauge!(
            "jobs_pipeline_last_run_ts",
            "Unix ts when the aggregation pipeline last ran."
        );
    });
}

/// URL-safe slug: lowercase, trim, strip everything outside word chars,
/// whitespace, and hyphens, then collapse separator runs into one hyphen.
pub fn slugify(s: &str) -> String {
    static RE_STRIP: OnceCell<regex::Regex> = OnceCell::new();
    let re_strip = RE_STRIP.get_or_init(|| regex::Regex::new(r"[^\w\s-]").unwrap());
    static RE_SEP: OnceCell<regex::Regex> = OnceCell::new();
    let re_sep = RE_SEP.get_or_init(|| regex::Regex::new(r"[\s_-]+").unwrap());

    let lowered = s.trim().to_lowercase();
    let stripped = re_strip.replace_all(&lowered, "");
    let joined = re_sep.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

/// Human-relative posting age from an upstream date string.
/// Unparsable input yields "recently"; the function never panics.
pub fn days_ago(date: &str, now: DateTime<Utc>) -> String {
    match parse_upstream_date(date) {
        Some(then) => relative_from(then, now),
        None => "recently".to_string(),
    }
}

/// Same contract as [`days_ago`] for boards that publish unix seconds.
pub fn days_ago_from_unix(secs: i64, now: DateTime<Utc>) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(then) => relative_from(then, now),
        None => "recently".to_string(),
    }
}

fn parse_upstream_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Remotive publishes naive timestamps, e.g. "2026-08-01T08:00:00".
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn relative_from(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days();
    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{days} days ago")
    }
}

/// Treat empty/blank upstream strings the same as absent ones.
pub(crate) fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Fallback id for boards that omit one: `<source>-<unix-millis>-<rand>`.
pub(crate) fn synthetic_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{prefix}-{millis}-{:08x}", rand::random::<u32>())
}

/// Drop later occurrences of the same lowercased title+company pair,
/// keeping encounter order. Returns (kept, dropped count).
pub fn dedup_by_title_company(jobs: Vec<NormalizedJob>) -> (Vec<NormalizedJob>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(jobs.len());
    let mut dropped = 0usize;

    for job in jobs {
        let key = format!(
            "{}-{}",
            job.title.to_lowercase(),
            job.company.to_lowercase()
        );
        if !seen.insert(key) {
            dropped += 1;
            continue;
        }
        kept.push(job);
    }

    (kept, dropped)
}

/// Query every provider concurrently, absorb individual failures, merge
/// in provider order, and deduplicate by title+company.
///
/// Never fails: a provider error is logged, counted, and contributes an
/// empty list, so the caller always gets a (possibly empty) Vec.
pub async fn fetch_external_jobs(
    providers: &[Box<dyn JobProvider>],
    query: &JobQuery,
) -> Vec<NormalizedJob> {
    ensure_metrics_described();

    let results = join_all(providers.iter().map(|p| async move {
        match p.fetch_jobs(query).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                counter!("jobs_provider_errors_total").increment(1);
                Vec::new()
            }
        }
    }))
    .await;

    let merged: Vec<NormalizedJob> = results.into_iter().flatten().collect();
    let (kept, dedup_cnt) = dedup_by_title_company(merged);

    // Telemetry
    counter!("jobs_kept_total").increment(kept.len() as u64);
    counter!("jobs_dedup_total").increment(dedup_cnt as u64);
    gauge!("jobs_pipeline_last_run_ts").set(Utc::now().timestamp().max(0) as f64);

    kept
}

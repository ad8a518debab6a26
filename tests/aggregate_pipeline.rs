// tests/aggregate_pipeline.rs
//
// Pipeline-level behavior with stub providers: settle-all fan-out,
// per-provider failure isolation, merge order, dedup.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use applitrak_aggregator::{
    fetch_external_jobs, JobProvider, JobQuery, JobSource, NormalizedJob,
};

fn job(title: &str, company: &str, source: JobSource) -> NormalizedJob {
    NormalizedJob {
        id: format!("{}-{title}", source.as_str()),
        slug: format!("{}-{title}", source.as_str()),
        title: title.into(),
        company: company.into(),
        description: String::new(),
        location: "Remote".into(),
        salary: "Not specified".into(),
        employment_type: "Full time".into(),
        posted: "today".into(),
        image: "/placeholder-logo.png".into(),
        external_url: "#".into(),
        source,
        is_active: true,
    }
}

struct StaticProvider {
    name: &'static str,
    jobs: Vec<NormalizedJob>,
}

#[async_trait]
impl JobProvider for StaticProvider {
    async fn fetch_jobs(&self, _query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        Ok(self.jobs.clone())
    }
    fn name(&self) -> &'static str {
        self.name
    }
}

struct FailingProvider(&'static str);

#[async_trait]
impl JobProvider for FailingProvider {
    async fn fetch_jobs(&self, _query: &JobQuery) -> Result<Vec<NormalizedJob>> {
        Err(anyhow!("upstream returned 500"))
    }
    fn name(&self) -> &'static str {
        self.0
    }
}

#[tokio::test]
async fn all_providers_failing_yields_an_empty_list() {
    let providers: Vec<Box<dyn JobProvider>> = vec![
        Box::new(FailingProvider("findwork")),
        Box::new(FailingProvider("arbeitnow")),
        Box::new(FailingProvider("remotive")),
    ];

    let out = fetch_external_jobs(&providers, &JobQuery::default()).await;
    assert!(out.is_empty());
}

#[tokio::test]
async fn one_failing_provider_does_not_block_the_others() {
    let providers: Vec<Box<dyn JobProvider>> = vec![
        Box::new(FailingProvider("findwork")),
        Box::new(StaticProvider {
            name: "arbeitnow",
            jobs: vec![
                job("Backend Dev", "Acme", JobSource::Arbeitnow),
                job("Frontend Dev", "Acme", JobSource::Arbeitnow),
                job("Data Engineer", "Beta", JobSource::Arbeitnow),
            ],
        }),
        Box::new(FailingProvider("remotive")),
    ];

    let out = fetch_external_jobs(&providers, &JobQuery::default()).await;
    let titles: Vec<&str> = out.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["Backend Dev", "Frontend Dev", "Data Engineer"]);
}

#[tokio::test]
async fn cross_source_duplicates_keep_the_first_provider_entry() {
    let providers: Vec<Box<dyn JobProvider>> = vec![
        Box::new(StaticProvider {
            name: "findwork",
            jobs: vec![job("Rust Developer", "Ferrous", JobSource::Findwork)],
        }),
        Box::new(StaticProvider {
            name: "remotive",
            jobs: vec![job("RUST DEVELOPER", "ferrous", JobSource::Remotive)],
        }),
    ];

    let out = fetch_external_jobs(&providers, &JobQuery::default()).await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].source, JobSource::Findwork);
}

#[tokio::test]
async fn duplicate_scenario_across_all_three_sources() {
    // FindWork reports the same posting twice, Arbeitnow repeats it once
    // more, Remotive adds one genuinely new job.
    let providers: Vec<Box<dyn JobProvider>> = vec![
        Box::new(StaticProvider {
            name: "findwork",
            jobs: vec![
                job("Dev", "A", JobSource::Findwork),
                job("Dev", "A", JobSource::Findwork),
            ],
        }),
        Box::new(StaticProvider {
            name: "arbeitnow",
            jobs: vec![job("Dev", "A", JobSource::Arbeitnow)],
        }),
        Box::new(StaticProvider {
            name: "remotive",
            jobs: vec![job("PM", "B", JobSource::Remotive)],
        }),
    ];

    let out = fetch_external_jobs(&providers, &JobQuery::default()).await;
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].title, "Dev");
    assert_eq!(out[0].source, JobSource::Findwork);
    assert_eq!(out[1].title, "PM");
    assert_eq!(out[1].source, JobSource::Remotive);
}

#[tokio::test]
async fn empty_provider_set_is_fine() {
    let providers: Vec<Box<dyn JobProvider>> = vec![];
    let out = fetch_external_jobs(&providers, &JobQuery::default()).await;
    assert!(out.is_empty());
}

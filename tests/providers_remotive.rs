use applitrak_aggregator::aggregate::providers::remotive::RemotiveProvider;
use applitrak_aggregator::{JobProvider, JobQuery, JobSource};
use std::fs;

#[tokio::test]
async fn remotive_fixture_parses_and_passes_salary_through() {
    let body = fs::read_to_string("tests/fixtures/remotive.json")
        .expect("missing tests/fixtures/remotive.json");
    let provider = RemotiveProvider::from_fixture_str(&body);

    let jobs = provider
        .fetch_jobs(&JobQuery::default())
        .await
        .expect("remotive parse ok");

    assert_eq!(jobs.len(), 3);
    assert!(jobs.iter().all(|j| j.source == JobSource::Remotive));

    let pm = &jobs[0];
    assert_eq!(pm.id, "1987654");
    assert_eq!(pm.slug, "remotive-product-manager-1987654");
    assert_eq!(pm.salary, "$90k - $120k");
    assert_eq!(pm.location, "Worldwide");
    assert_eq!(pm.employment_type, "full_time");
    assert_eq!(pm.image, "https://remotive.com/job/1987654/logo");
}

#[tokio::test]
async fn remotive_blank_fields_fall_back_to_remote_defaults() {
    let body = fs::read_to_string("tests/fixtures/remotive.json").expect("fixture");
    let provider = RemotiveProvider::from_fixture_str(&body);
    let jobs = provider.fetch_jobs(&JobQuery::default()).await.expect("parse ok");

    // empty-string fields behave like absent ones
    let rustdev = &jobs[1];
    assert_eq!(rustdev.salary, "Not specified");
    assert_eq!(rustdev.location, "Remote");
    assert_eq!(rustdev.employment_type, "Remote");
    assert_eq!(rustdev.image, "/placeholder-logo.png");

    // null id/title, unparsable date
    let nameless = &jobs[2];
    assert!(nameless.id.starts_with("remotive-"));
    assert_eq!(nameless.title, "Untitled Position");
    assert_eq!(nameless.company, "Nameless Collective");
    assert!(nameless.slug.starts_with("remotive-nameless-collective-"));
    assert_eq!(nameless.posted, "recently");
    assert_eq!(nameless.external_url, "#");
}

#[tokio::test]
async fn remotive_missing_jobs_field_is_an_error() {
    let provider = RemotiveProvider::from_fixture_str(r#"{"job-count": 0}"#);
    assert!(provider.fetch_jobs(&JobQuery::default()).await.is_err());
}

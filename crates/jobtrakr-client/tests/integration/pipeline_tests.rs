use std::time::Duration;

use jobtrakr_client::build_extractor;
use jobtrakr_core::config::FetchConfig;
use jobtrakr_core::extract::extract_from_url;
use jobtrakr_core::models::{EmploymentType, ExperienceLevel, JobExtraction};

use crate::integration::common::{Behavior, FixtureServer, LINKEDIN_PAGE, refused_addr};

const SLUG_PATH: &str = "/jobs/view/4411-contract-qa-engineer-at-initech/?trk=public";

fn fast_config() -> FetchConfig {
    FetchConfig::default()
        .with_timeout(Duration::from_millis(200))
        .with_initial_backoff(Duration::from_millis(20))
}

#[tokio::test]
async fn extracts_fields_from_page() {
    let server = FixtureServer::spawn(Behavior::html(200, LINKEDIN_PAGE)).await;
    let extractor = build_extractor(&fast_config()).unwrap();

    let record = extractor.extract_job(&server.url(SLUG_PATH)).await;

    assert_eq!(
        record,
        JobExtraction {
            title: "Senior Rust Engineer".into(),
            company: "Globex".into(),
            employment_type: EmploymentType::FullTime,
            experience_level: ExperienceLevel::SeniorLevel,
        }
    );
}

#[tokio::test]
async fn sparse_page_infers_from_meta_title() {
    let html = r#"<html><head>
        <meta property="og:title" content="Part-time Barista at Central Perk">
        </head><body></body></html>"#;
    let server = FixtureServer::spawn(Behavior::html(200, html)).await;
    let extractor = build_extractor(&fast_config()).unwrap();

    let record = extractor.extract_job(&server.url("/careers/1")).await;

    assert_eq!(record.title, "Part-time Barista");
    assert_eq!(record.company, "Central Perk");
    assert_eq!(record.employment_type, EmploymentType::PartTime);
    assert_eq!(record.experience_level, ExperienceLevel::MidLevel);
}

#[tokio::test]
async fn not_found_page_equals_url_fallback() {
    let server = FixtureServer::spawn(Behavior::html(404, LINKEDIN_PAGE)).await;
    let extractor = build_extractor(&fast_config()).unwrap();
    let url = server.url(SLUG_PATH);

    let record = extractor.extract_job(&url).await;

    assert_eq!(record, extract_from_url(&url));
    assert_eq!(record.title, "Contract Qa Engineer Initech");
    assert_eq!(record.employment_type, EmploymentType::Contract);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn exhausted_timeouts_equal_url_fallback() {
    let server = FixtureServer::spawn(Behavior::Hang).await;
    let extractor = build_extractor(&fast_config()).unwrap();
    let url = server.url(SLUG_PATH);

    let record = extractor.extract_job(&url).await;

    assert_eq!(record, extract_from_url(&url));
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn unreachable_host_equals_url_fallback() {
    let addr = refused_addr().await;
    let extractor = build_extractor(&fast_config()).unwrap();
    let url = format!("http://{addr}{SLUG_PATH}");

    let record = extractor.extract_job(&url).await;

    assert_eq!(record, extract_from_url(&url));
}

#[tokio::test]
async fn empty_body_degrades_to_url_fallback() {
    let server = FixtureServer::spawn(Behavior::html(200, "   ")).await;
    let extractor = build_extractor(&fast_config()).unwrap();
    let url = server.url(SLUG_PATH);

    let record = extractor.extract_job(&url).await;

    assert_eq!(record, extract_from_url(&url));
    assert_eq!(record.company, "Unknown Company");
}

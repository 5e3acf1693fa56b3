use std::time::Duration;

use jobtrakr_client::ReqwestFetcher;
use jobtrakr_core::error::FetchError;
use jobtrakr_core::retry::{RetryPolicy, RetryingFetcher};
use jobtrakr_core::traits::Fetcher;

use crate::integration::common::{Behavior, FixtureServer, refused_addr};

#[tokio::test]
async fn ok_response_returns_body() {
    let server = FixtureServer::spawn(Behavior::html(200, "<h1>Hello</h1>")).await;
    let fetcher = ReqwestFetcher::new().unwrap();

    let page = fetcher.fetch(&server.url("/jobs/view/1")).await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "<h1>Hello</h1>");
}

#[tokio::test]
async fn sends_browser_headers() {
    let server = FixtureServer::spawn(Behavior::html(200, "ok")).await;
    let fetcher = ReqwestFetcher::new().unwrap();

    fetcher.fetch(&server.url("/")).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(head.contains("chrome/120"));
    assert!(head.contains("sec-fetch-mode: navigate"));
    assert!(head.contains("referer: https://www.google.com/"));
}

#[tokio::test]
async fn follows_redirects() {
    let target = FixtureServer::spawn(Behavior::html(200, "moved here")).await;
    let origin = FixtureServer::spawn(Behavior::redirect(&target.url("/final"))).await;
    let fetcher = ReqwestFetcher::new().unwrap();

    let page = fetcher.fetch(&origin.url("/start")).await.unwrap();

    assert_eq!(page.body, "moved here");
    assert_eq!(target.hits(), 1);
}

#[tokio::test]
async fn non_ok_status_is_reported() {
    let server = FixtureServer::spawn(Behavior::html(404, "gone")).await;
    let fetcher = ReqwestFetcher::new().unwrap();

    let err = fetcher.fetch(&server.url("/")).await.unwrap_err();

    assert_eq!(err, FetchError::NonOkStatus(404));
}

#[tokio::test]
async fn non_200_success_status_is_not_ok() {
    let server = FixtureServer::spawn(Behavior::html(204, "")).await;
    let fetcher = ReqwestFetcher::new().unwrap();

    let err = fetcher.fetch(&server.url("/")).await.unwrap_err();

    assert_eq!(err, FetchError::NonOkStatus(204));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let addr = refused_addr().await;
    let fetcher = ReqwestFetcher::new().unwrap();

    let err = fetcher.fetch(&format!("http://{addr}/")).await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = FixtureServer::spawn(Behavior::Hang).await;
    let fetcher = ReqwestFetcher::with_timeout(Duration::from_millis(200)).unwrap();

    let err = fetcher.fetch(&server.url("/")).await.unwrap_err();

    assert_eq!(err, FetchError::Timeout { attempts: 1 });
}

#[tokio::test]
async fn retrying_fetcher_makes_three_attempts() {
    let server = FixtureServer::spawn(Behavior::Hang).await;
    let fetcher = RetryingFetcher::new(
        ReqwestFetcher::with_timeout(Duration::from_millis(200)).unwrap(),
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(20),
        },
    );

    let err = fetcher.fetch(&server.url("/")).await.unwrap_err();

    assert_eq!(err, FetchError::Timeout { attempts: 3 });
    assert_eq!(server.hits(), 3);
}

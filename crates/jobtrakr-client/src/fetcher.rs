use std::time::Duration;

use jobtrakr_core::error::{AppError, FetchError};
use jobtrakr_core::models::{FetchOutcome, FetchedPage};
use jobtrakr_core::traits::Fetcher;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Navigation headers a desktop Chrome sends for a top-level page load.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "max-age=0"),
    ("dnt", "1"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    (
        "sec-ch-ua",
        "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("referer", "https://www.google.com/"),
];

const MAX_REDIRECTS: usize = 10;

/// HTTP fetcher using reqwest.
///
/// Performs a single GET per call with browser-like headers, following
/// redirects. Wrap it in a [`RetryingFetcher`](jobtrakr_core::RetryingFetcher)
/// to retry timeouts.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(browser_headers()?)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        check_scheme(url)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { attempts: 1 }
            } else if e.is_connect() {
                FetchError::Network(format!("Connection failed: {e}"))
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        tracing::debug!(%url, status, "Received response");
        if status != 200 {
            return Err(FetchError::NonOkStatus(status));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { attempts: 1 }
            } else {
                FetchError::Network(format!("Failed to read response body: {e}"))
            }
        })?;

        Ok(FetchedPage { status, body })
    }
}

fn browser_headers() -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    for &(name, value) in BROWSER_HEADERS {
        let name = HeaderName::from_static(name);
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::HttpError(format!("Invalid header {name}: {e}")))?;
        headers.insert(name, value);
    }
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

/// Only `http` and `https` URLs are fetched.
fn check_scheme(url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::Network(format!("Invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FetchError::Network(format!(
            "URL scheme '{scheme}' is not allowed (only http/https)"
        ))),
    }
}

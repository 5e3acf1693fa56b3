use std::future::Future;

use crate::error::AppError;
use crate::models::{FetchOutcome, PartialJob};

/// Fetches a job posting page.
///
/// Implementations report every failure through the returned
/// [`FetchOutcome`] rather than panicking or retrying implicitly; retry
/// behaviour is layered on with [`RetryingFetcher`](crate::retry::RetryingFetcher).
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Locates job fields in fetched markup.
pub trait PageParser: Send + Sync + Clone {
    /// Scan `html` for title, company, employment type, and experience level.
    ///
    /// `url` is the page address, used to recover a title from its slug when
    /// the markup has none. An `Err` means the markup could not be scanned at
    /// all; the caller decides how to degrade.
    fn parse(&self, html: &str, url: &str) -> Result<PartialJob, AppError>;
}

pub mod fetcher;
pub mod page;

pub use fetcher::ReqwestFetcher;
pub use page::{DEFAULT_LOCATORS, LocatorTable, ScraperPageParser};

use jobtrakr_core::config::FetchConfig;
use jobtrakr_core::error::AppError;
use jobtrakr_core::extract::JobExtractor;
use jobtrakr_core::retry::{RetryPolicy, RetryingFetcher};

/// The production pipeline: reqwest with timeout retries, parsed by `scraper`.
pub type DefaultJobExtractor = JobExtractor<RetryingFetcher<ReqwestFetcher>, ScraperPageParser>;

/// Build the production pipeline from `config`.
pub fn build_extractor(config: &FetchConfig) -> Result<DefaultJobExtractor, AppError> {
    let fetcher = RetryingFetcher::new(
        ReqwestFetcher::with_timeout(config.timeout)?,
        RetryPolicy::from(config),
    );
    Ok(JobExtractor::new(fetcher, ScraperPageParser::new()?))
}

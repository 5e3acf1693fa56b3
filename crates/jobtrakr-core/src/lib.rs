pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod retry;
pub mod slug;
pub mod traits;


pub use config::FetchConfig;
pub use error::{AppError, FetchError};
pub use extract::{JobExtractor, extract_from_url};
pub use models::{
    EmploymentType, ExperienceLevel, FetchOutcome, FetchedPage, JobExtraction, PartialJob,
};
pub use retry::{RetryPolicy, RetryingFetcher};
pub use traits::{Fetcher, PageParser};

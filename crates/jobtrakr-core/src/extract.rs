use crate::classify::{infer_employment_from_title, infer_experience_from_title};
use crate::models::{
    EmploymentType, ExperienceLevel, JobExtraction, UNKNOWN_COMPANY, UNKNOWN_TITLE,
};
use crate::slug::extract_title_from_url;
use crate::traits::{Fetcher, PageParser};

/// Orchestrates job extraction: fetch → parse → normalize → infer → default.
///
/// Generic over the fetcher and parser so the pipeline runs without real
/// HTTP in tests. Every failure along the way degrades to
/// [`extract_from_url`]; callers always receive a fully populated record.
pub struct JobExtractor<F, P>
where
    F: Fetcher,
    P: PageParser,
{
    fetcher: F,
    parser: P,
}

impl<F, P> JobExtractor<F, P>
where
    F: Fetcher,
    P: PageParser,
{
    pub fn new(fetcher: F, parser: P) -> Self {
        Self { fetcher, parser }
    }

    /// Extract a job record for `url`. Never fails.
    ///
    /// 1. Fetch the page (retries, if any, belong to the fetcher)
    /// 2. Parse the markup into partial fields
    /// 3. Normalize the title, infer missing categories, fill placeholders
    ///
    /// A failed fetch skips parsing entirely; a failed parse discards any
    /// partial findings. Both fall back to the URL slug.
    pub async fn extract_job(&self, url: &str) -> JobExtraction {
        tracing::info!("Fetching {}", url);
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Fetch failed, extracting from URL");
                return extract_from_url(url);
            }
        };
        tracing::info!(status = page.status, "Fetched {} bytes of HTML", page.body.len());

        let partial = match self.parser.parse(&page.body, url) {
            Ok(partial) => partial,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Parse failed, extracting from URL");
                return extract_from_url(url);
            }
        };

        let record = partial.into_extraction();
        tracing::info!(
            title = %record.title,
            company = %record.company,
            employment_type = %record.employment_type,
            experience_level = %record.experience_level,
            "Extraction complete"
        );
        record
    }
}

/// Build a record from the URL alone, for when the page is unavailable.
///
/// The company is never inferred from the URL. Without a slug title the
/// categories take the title-inference defaults.
pub fn extract_from_url(url: &str) -> JobExtraction {
    let record = match extract_title_from_url(url) {
        Some(title) => JobExtraction {
            employment_type: infer_employment_from_title(&title),
            experience_level: infer_experience_from_title(&title),
            company: UNKNOWN_COMPANY.to_string(),
            title,
        },
        None => JobExtraction {
            title: UNKNOWN_TITLE.to_string(),
            company: UNKNOWN_COMPANY.to_string(),
            employment_type: EmploymentType::FullTime,
            experience_level: ExperienceLevel::MidLevel,
        },
    };
    tracing::info!(
        title = %record.title,
        employment_type = %record.employment_type,
        experience_level = %record.experience_level,
        "Extracted from URL"
    );
    record
}

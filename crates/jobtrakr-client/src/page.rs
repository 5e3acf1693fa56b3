use std::sync::Arc;

use jobtrakr_core::classify::CategoryScan;
use jobtrakr_core::error::AppError;
use jobtrakr_core::models::PartialJob;
use jobtrakr_core::slug::extract_title_from_url;
use jobtrakr_core::traits::PageParser;
use scraper::{ElementRef, Html, Selector};

/// Ordered CSS locators for each field, most specific first.
#[derive(Debug, Clone, Copy)]
pub struct LocatorTable {
    pub meta_title: &'static str,
    pub title: &'static [&'static str],
    pub containers: &'static [&'static str],
    pub company: &'static [&'static str],
}

/// Locators for LinkedIn's public and logged-in job views, with a bare
/// `h1` as the generic title fallback.
pub const DEFAULT_LOCATORS: LocatorTable = LocatorTable {
    meta_title: r#"meta[property="og:title"]"#,
    title: &[
        "h1.top-card-layout__title",
        "h1.job-details-jobs-unified-top-card__job-title",
        "h1.jobs-unified-top-card__job-title",
        "h1.topcard__title",
        "h1",
    ],
    containers: &[
        ".job-details-jobs-unified-top-card__job-insight",
        ".job-details-jobs-unified-top-card__workplace-type",
        ".jobs-unified-top-card__job-insight",
        ".jobs-unified-top-card__workplace-type",
        ".job-criteria__list",
        ".description__job-criteria-list",
        ".description__job-criteria-text",
    ],
    company: &[
        ".topcard__org-name-link",
        ".company-name",
        ".job-details-jobs-unified-top-card__company-name",
        ".jobs-unified-top-card__company-name",
        ".job-details-jobs-unified-top-card__primary-description",
    ],
};

/// Text nodes under these elements are not page content.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript"];

struct CompiledLocators {
    meta_title: Selector,
    title: Vec<Selector>,
    containers: Vec<Selector>,
    company: Vec<Selector>,
}

/// Page parser over the `scraper` DOM.
///
/// Selectors are compiled once at construction and shared between clones.
pub struct ScraperPageParser {
    locators: Arc<CompiledLocators>,
}

impl Clone for ScraperPageParser {
    fn clone(&self) -> Self {
        Self {
            locators: Arc::clone(&self.locators),
        }
    }
}

impl ScraperPageParser {
    pub fn new() -> Result<Self, AppError> {
        Self::with_locators(&DEFAULT_LOCATORS)
    }

    pub fn with_locators(table: &LocatorTable) -> Result<Self, AppError> {
        let locators = CompiledLocators {
            meta_title: compile(table.meta_title)?,
            title: compile_all(table.title)?,
            containers: compile_all(table.containers)?,
            company: compile_all(table.company)?,
        };
        Ok(Self {
            locators: Arc::new(locators),
        })
    }

    /// `og:title` content of the form "<title> at <company>".
    fn meta_title_and_company(&self, document: &Html) -> Option<(String, String)> {
        let content = document
            .select(&self.locators.meta_title)
            .next()?
            .value()
            .attr("content")?;
        let (title, company) = content.split_once(" at ")?;
        Some((title.trim().to_string(), company.trim().to_string()))
    }

    fn scan_categories(&self, document: &Html) -> CategoryScan {
        let mut scan = CategoryScan::default();
        for selector in &self.locators.containers {
            for element in document.select(selector) {
                scan.observe(&element_text(element));
                if scan.is_complete() {
                    return scan;
                }
            }
        }
        scan
    }

    /// Company from the first matching locator, cut at the first `·`.
    fn company_from_locators(&self, document: &Html) -> Option<String> {
        let text = first_text(document, &self.locators.company)?;
        non_empty(text.split('·').next().unwrap_or_default())
    }
}

impl PageParser for ScraperPageParser {
    fn parse(&self, html: &str, url: &str) -> Result<PartialJob, AppError> {
        if html.trim().is_empty() {
            return Err(AppError::ParseError("empty response body".into()));
        }
        let document = Html::parse_document(html);
        let mut partial = PartialJob::default();

        if let Some((title, company)) = self.meta_title_and_company(&document) {
            tracing::debug!(%title, %company, "Found title and company in meta tags");
            partial.title = non_empty(&title);
            partial.company = non_empty(&company);
        }

        if partial.title.is_none() {
            partial.title = first_text(&document, &self.locators.title);
        }

        if partial.title.is_none() {
            partial.title = extract_title_from_url(url);
        }

        let scan = self.scan_categories(&document);
        partial.employment_type = scan.employment_type;
        partial.experience_level = scan.experience_level;

        if partial.company.is_none() {
            partial.company = self.company_from_locators(&document);
        }
        if partial.company.is_none() {
            partial.company = company_before_hiring(&document);
        }

        tracing::debug!(?partial, "Parsed page");
        Ok(partial)
    }
}

fn compile(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector)
        .map_err(|e| AppError::ParseError(format!("Invalid selector '{selector}': {e:?}")))
}

fn compile_all(selectors: &[&str]) -> Result<Vec<Selector>, AppError> {
    selectors.iter().map(|s| compile(s)).collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of the first element of the first locator whose match has
/// any text.
fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        non_empty(&element_text(element))
    })
}

/// Text preceding "hiring" in the first content text node that mentions it.
fn company_before_hiring(document: &Html) -> Option<String> {
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let in_non_content = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| NON_CONTENT_TAGS.iter().any(|tag| *tag == name));
        if in_non_content {
            continue;
        }

        let text: &str = text;
        if let Some(idx) = text.to_ascii_lowercase().find("hiring") {
            return non_empty(&text[..idx]);
        }
    }
    None
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

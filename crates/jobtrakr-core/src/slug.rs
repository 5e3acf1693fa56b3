//! Title recovery from the posting URL alone.

/// Path marker preceding the slug segment.
const SLUG_MARKER: &str = "view/";

/// Slug tokens that carry no title meaning (compared case-insensitively).
pub const SLUG_STOPWORDS: &[&str] = &["r", "at", "in", "for", "the", "a", "an"];

/// Derive a human-readable title from the slug after `view/` in `url`.
///
/// Example: `https://example.com/jobs/view/98765-senior-software-engineer/`
/// yields `"Senior Software Engineer"`. Returns `None` when the URL has no
/// slug or every token in it is a numeric id or stopword.
pub fn extract_title_from_url(url: &str) -> Option<String> {
    let start = url.find(SLUG_MARKER)? + SLUG_MARKER.len();
    let rest = &url[start..];
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    let segment = &rest[..end];

    let tokens: Vec<String> = segment
        .split('-')
        .filter(|token| !is_job_id(token) && !is_stopword(token))
        .map(|token| token.replace("%20", " ").replace("%2C", ","))
        .collect();

    let title = tokens
        .join(" ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        tracing::debug!(%url, "No title tokens in URL slug");
        None
    } else {
        Some(title)
    }
}

fn is_job_id(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_stopword(token: &str) -> bool {
    SLUG_STOPWORDS
        .iter()
        .any(|stop| token.eq_ignore_ascii_case(stop))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Suffix markers stripped from titles, applied in this order.
pub const TITLE_SUFFIX_MARKERS: &[&str] = &[
    " R-",
    "-R-",
    " ID:",
    " Job ID:",
    "(Remote)",
    "(Hybrid)",
    "(On-site)",
];

/// Collapse whitespace and strip requisition/location suffixes from a title.
///
/// Markers are applied cumulatively: each one is checked against the title
/// as already truncated by the markers before it.
pub fn normalize_title(title: &str) -> String {
    let mut title = collapse_whitespace(title);
    for marker in TITLE_SUFFIX_MARKERS {
        if let Some(idx) = title.find(marker) {
            title = title[..idx].trim().to_string();
        }
    }
    title
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Keyword classification of employment type and experience level.
//!
//! Each classifier is an ordered table of [`KeywordRule`]s evaluated
//! first-match-wins against lowercased text. Two rule sets exist per field:
//! the page rules scan descriptive DOM text and may find nothing, while the
//! title rules always resolve to a category.

use crate::models::{EmploymentType, ExperienceLevel};

/// Maps any of a set of substrings to a category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub category: T,
}

impl<T: Copy> KeywordRule<T> {
    const fn new(keywords: &'static [&'static str], category: T) -> Self {
        Self { keywords, category }
    }

    /// `text` must already be lowercase.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Employment rules applied to page text.
pub const EMPLOYMENT_RULES: &[KeywordRule<EmploymentType>] = &[
    KeywordRule::new(&["full-time", "full time"], EmploymentType::FullTime),
    KeywordRule::new(&["part-time", "part time"], EmploymentType::PartTime),
    KeywordRule::new(
        &["contract", "temporary", "contractor"],
        EmploymentType::Contract,
    ),
    KeywordRule::new(&["internship"], EmploymentType::Internship),
];

/// Experience rules applied to page text.
pub const EXPERIENCE_RULES: &[KeywordRule<ExperienceLevel>] = &[
    KeywordRule::new(
        &[
            "0-1 years",
            "1-2 years",
            "entry level",
            "junior",
            "associate",
            "intern",
            "internship",
        ],
        ExperienceLevel::EntryLevel,
    ),
    KeywordRule::new(
        &[
            "2-3 years",
            "3-5 years",
            "mid level",
            "mid-level",
            "intermediate",
        ],
        ExperienceLevel::MidLevel,
    ),
    KeywordRule::new(
        &[
            "5+ years",
            "7+ years",
            "8+ years",
            "senior",
            "sr.",
            "lead",
            "principal",
            "staff",
        ],
        ExperienceLevel::SeniorLevel,
    ),
    KeywordRule::new(
        &["10+ years", "manager", "director", "head of", "vp", "chief"],
        ExperienceLevel::Management,
    ),
];

/// Employment rules applied to a bare job title.
pub const TITLE_EMPLOYMENT_RULES: &[KeywordRule<EmploymentType>] = &[
    KeywordRule::new(&["contract", "contractor"], EmploymentType::Contract),
    KeywordRule::new(&["intern", "internship"], EmploymentType::Internship),
    KeywordRule::new(&["part time", "part-time"], EmploymentType::PartTime),
];

/// Experience rules applied to a bare job title.
pub const TITLE_EXPERIENCE_RULES: &[KeywordRule<ExperienceLevel>] = &[
    KeywordRule::new(
        &["senior", "sr.", "lead", "principal", "staff"],
        ExperienceLevel::SeniorLevel,
    ),
    KeywordRule::new(
        &["junior", "jr.", "entry", "graduate", "associate"],
        ExperienceLevel::EntryLevel,
    ),
    KeywordRule::new(&["intern", "internship"], ExperienceLevel::Internship),
    KeywordRule::new(
        &["manager", "director", "head", "vp", "chief"],
        ExperienceLevel::Management,
    ),
];

/// Title inference falls back to these when no title rule matches.
pub const TITLE_EMPLOYMENT_DEFAULT: EmploymentType = EmploymentType::FullTime;
pub const TITLE_EXPERIENCE_DEFAULT: ExperienceLevel = ExperienceLevel::MidLevel;

/// Return the category of the first rule matching `text` (case-insensitive).
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.category)
}

pub fn classify_employment(text: &str) -> Option<EmploymentType> {
    first_match(EMPLOYMENT_RULES, text)
}

pub fn classify_experience(text: &str) -> Option<ExperienceLevel> {
    first_match(EXPERIENCE_RULES, text)
}

pub fn infer_employment_from_title(title: &str) -> EmploymentType {
    first_match(TITLE_EMPLOYMENT_RULES, title).unwrap_or(TITLE_EMPLOYMENT_DEFAULT)
}

pub fn infer_experience_from_title(title: &str) -> ExperienceLevel {
    first_match(TITLE_EXPERIENCE_RULES, title).unwrap_or(TITLE_EXPERIENCE_DEFAULT)
}

/// Accumulates classifications across many text blocks.
///
/// A field, once assigned, is never overwritten by a later block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScan {
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
}

impl CategoryScan {
    /// Classify one block of text, filling only the fields still unset.
    pub fn observe(&mut self, text: &str) {
        if self.employment_type.is_none() {
            self.employment_type = classify_employment(text);
        }
        if self.experience_level.is_none() {
            self.experience_level = classify_experience(text);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.employment_type.is_some() && self.experience_level.is_some()
    }
}

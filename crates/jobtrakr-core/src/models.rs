use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::{infer_employment_from_title, infer_experience_from_title};
use crate::error::FetchError;
use crate::normalize::normalize_title;

/// Placeholder title when no strategy produced one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder company when no strategy produced one.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Employment arrangement advertised by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Unknown,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
            EmploymentType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full-time" => Ok(EmploymentType::FullTime),
            "part-time" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            "internship" => Ok(EmploymentType::Internship),
            "unknown" => Ok(EmploymentType::Unknown),
            _ => Err(format!("Unknown employment type: {}", s)),
        }
    }
}

/// Seniority band advertised by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Mid Level")]
    MidLevel,
    #[serde(rename = "Senior Level")]
    SeniorLevel,
    Management,
    Internship,
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::MidLevel => "Mid Level",
            ExperienceLevel::SeniorLevel => "Senior Level",
            ExperienceLevel::Management => "Management",
            ExperienceLevel::Internship => "Internship",
            ExperienceLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry level" => Ok(ExperienceLevel::EntryLevel),
            "mid level" => Ok(ExperienceLevel::MidLevel),
            "senior level" => Ok(ExperienceLevel::SeniorLevel),
            "management" => Ok(ExperienceLevel::Management),
            "internship" => Ok(ExperienceLevel::Internship),
            "unknown" => Ok(ExperienceLevel::Unknown),
            _ => Err(format!("Unknown experience level: {}", s)),
        }
    }
}

/// The normalized record produced for every extraction call.
///
/// All four fields are always populated; unresolved values carry the
/// `Unknown ...` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobExtraction {
    pub title: String,
    pub company: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
}

/// A page returned with status 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Result of fetching a posting: the page, or why there is none.
pub type FetchOutcome = Result<FetchedPage, FetchError>;

/// Fields located in fetched markup before cleanup and defaulting.
///
/// Any field may still be missing at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
}

impl PartialJob {
    /// Normalize the title, infer missing categories from it, and fill
    /// placeholders for anything still unresolved.
    pub fn into_extraction(self) -> JobExtraction {
        let title = self
            .title
            .map(|t| normalize_title(&t))
            .filter(|t| !t.is_empty());

        let (employment_type, experience_level) = match &title {
            Some(t) => (
                self.employment_type
                    .unwrap_or_else(|| infer_employment_from_title(t)),
                self.experience_level
                    .unwrap_or_else(|| infer_experience_from_title(t)),
            ),
            None => (
                self.employment_type.unwrap_or(EmploymentType::Unknown),
                self.experience_level.unwrap_or(ExperienceLevel::Unknown),
            ),
        };

        JobExtraction {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            company: self
                .company
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            employment_type,
            experience_level,
        }
    }
}

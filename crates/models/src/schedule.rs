use crate::term::Term;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// One generated class meeting of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Section {
    pub num: String,
    pub building: String,
    pub room: String,
    pub professor: String,
    #[serde(default)]
    pub days: Vec<String>,
    pub num_seats: u32,
    #[serde(default)]
    pub num_enroll: u32,
    pub start_time: String,
    pub end_time: String,
}

/// A course paired with its generated sections within one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseOffering {
    pub course: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// The offerings of one term; `term` keeps the label the schedule was generated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TermSchedule {
    pub term: String,
    #[serde(default)]
    pub courses: Vec<CourseOffering>,
}

/// A timetable for one academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Schedule {
    pub year: i32,
    pub terms: Vec<TermSchedule>,
}

/// Where a schedule sits in its lifecycle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Lifecycle {
    /// Generated and pending approval
    Draft,
    /// Approved and kept for record-keeping
    Approved,
}

impl Lifecycle {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl Schedule {
    /// Identity fields of a stored schedule
    pub const PROTECTED_FIELDS: &'static [&'static str] = &["year"];

    pub fn new(year: i32, term: TermSchedule) -> Self {
        Self {
            year,
            terms: vec![term],
        }
    }

    /// The term entry matching `term`, compared case-insensitively
    pub fn term(&self, term: Term) -> Option<&TermSchedule> {
        self.terms.iter().find(|t| term.matches(&t.term))
    }

    /// The term this schedule is keyed by: the first term entry
    pub fn key_term(&self) -> Option<Term> {
        self.terms.first().and_then(|t| Term::parse(&t.term).ok())
    }

    /// Total number of generated sections across all terms
    pub fn section_count(&self) -> usize {
        self.terms
            .iter()
            .flat_map(|t| &t.courses)
            .map(|c| c.sections.len())
            .sum()
    }
}

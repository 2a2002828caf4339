use crate::{requisite::RequisiteGroups, term::Term};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

lazy_static! {
    static ref THREE_DIGITS: Regex = Regex::new(r"[0-9]{3}").unwrap();
}

/// Minimum enrollment a section needs before the generator will schedule it
pub const MIN_ENROLLMENT: u32 = 5;

/// Default weekly (lecture, lab, tutorial) hours sent for every course
pub const DEFAULT_HOURS: [u32; 3] = [3, 0, 0];

/// Checks that a course shorthand contains three consecutive ASCII digits (e.g. `CSC225`)
pub fn is_valid_shorthand(shorthand: &str) -> bool {
    THREE_DIGITS.is_match(shorthand)
}

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub shorthand: String,
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub equipment: BTreeSet<String>,
    #[serde(default)]
    pub prerequisites: RequisiteGroups,
    #[serde(default)]
    pub corequisites: RequisiteGroups,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub terms_offered: BTreeSet<String>,
}

impl Course {
    /// Whether any of the offered term names denotes `term`
    pub fn is_offered_in(&self, term: Term) -> bool {
        self.terms_offered.iter().any(|label| term.matches(label))
    }

    /// The first requisite entry that cannot name a course, or that names this course itself
    pub fn invalid_requisite(&self) -> Option<&str> {
        self.prerequisites
            .courses()
            .chain(self.corequisites.courses())
            .find(|req| !is_valid_shorthand(req) || *req == self.shorthand)
    }

    /// Field names a generic update may not touch
    pub const PROTECTED_FIELDS: &'static [&'static str] = &["shorthand"];
}

/// A course paired with the enrollment figures the timetable generator needs.
///
/// Lives only for the duration of one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseWithCapacity {
    pub course: String,
    pub peng: bool,
    pub prerequisites: RequisiteGroups,
    pub corequisites: RequisiteGroups,
    pub pre_enroll: u32,
    pub min_enroll: u32,
    #[schema(value_type = Vec<u32>)]
    pub hours: [u32; 3],
}

impl CourseWithCapacity {
    pub fn new(course: &Course, pre_enroll: u32) -> Self {
        Self {
            course: course.shorthand.clone(),
            peng: false,
            prerequisites: course.prerequisites.clone(),
            corequisites: course.corequisites.clone(),
            pre_enroll,
            min_enroll: MIN_ENROLLMENT,
            hours: DEFAULT_HOURS,
        }
    }
}

/// Predicted enrollment for one course, as returned by the estimation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CapacityEstimate {
    pub course: String,
    pub estimate: u32,
}

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Prerequisite or co-requisite structure of a course.
///
/// Each inner list is a conjunction of course shorthands and the outer list
/// holds the alternatives: `[["CSC115", "MATH122"], ["CSC110"]]` reads as
/// `(CSC115 and MATH122) or CSC110`. An empty structure has no requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RequisiteGroups(pub Vec<Vec<String>>);

impl RequisiteGroups {
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|group| group.is_empty())
    }

    /// Every course shorthand mentioned in any group
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flatten().map(String::as_str)
    }
}

impl Display for RequisiteGroups {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let groups: Vec<&Vec<String>> = self.0.iter().filter(|g| !g.is_empty()).collect();
        let multiple = groups.len() > 1;

        let rendered: Vec<String> = groups
            .into_iter()
            .map(|group| {
                let joined = group.join(" and ");
                if multiple && group.len() > 1 {
                    format!("({joined})")
                } else {
                    joined
                }
            })
            .collect();

        write!(f, "{}", rendered.join(" or "))
    }
}

impl From<Vec<Vec<&str>>> for RequisiteGroups {
    fn from(groups: Vec<Vec<&str>>) -> Self {
        Self(
            groups
                .into_iter()
                .map(|group| group.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }
}

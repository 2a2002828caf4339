use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// An academic term a schedule can be generated for
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Term {
    Fall,
    Spring,
    Summer,
}

/// Error returned when a string does not name one of the three terms
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid term '{0}', expected one of fall, spring or summer")]
pub struct InvalidTerm(pub String);

impl Term {
    /// Canonical lowercase form, used as the storage key
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Parses a term name, ignoring ASCII case and surrounding whitespace
    pub fn parse(label: &str) -> Result<Self, InvalidTerm> {
        Term::from_str(label.trim()).map_err(|_| InvalidTerm(label.to_string()))
    }

    /// Whether a free-form label (as stored in a schedule document) names this term
    pub fn matches(&self, label: &str) -> bool {
        Term::parse(label).is_ok_and(|term| term == *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Term::parse("fall").unwrap(), Term::Fall);
        assert_eq!(Term::parse("Fall").unwrap(), Term::Fall);
        assert_eq!(Term::parse("SPRING").unwrap(), Term::Spring);
        assert_eq!(Term::parse(" summer ").unwrap(), Term::Summer);
    }

    #[test]
    fn test_parse_rejects_unknown_terms() {
        for label in ["winter", "", "fal", "summer1", "autumn"] {
            assert_eq!(Term::parse(label), Err(InvalidTerm(label.to_string())));
        }
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Term::Fall.to_string(), "fall");
        assert_eq!(Term::Summer.as_str(), "summer");
    }

    #[test]
    fn test_matches_label() {
        assert!(Term::Fall.matches("FALL"));
        assert!(!Term::Fall.matches("spring"));
        assert!(!Term::Fall.matches("not a term"));
    }

    #[test]
    fn test_serde_round_trips_lowercase() {
        let json = serde_json::to_string(&Term::Spring).unwrap();
        assert_eq!(json, "\"spring\"");
    }
}

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A window of time during which an instructor is free
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeInterval {
    #[schema(value_type = String, example = "09:00:00")]
    pub start: NaiveTime,
    #[schema(value_type = String, example = "10:20:00")]
    pub end: NaiveTime,
}

impl TimeInterval {
    /// Creates a new `TimeInterval` if `start` is before `end`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

/// Free intervals keyed by day or term slot (e.g. `"monday"`, `"fall"`)
pub type Availability = BTreeMap<String, Vec<TimeInterval>>;

/// A user account; instructors are users with scheduling preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub availability: Availability,
}

impl User {
    /// Identity and role fields are never changed through a generic update
    pub const PROTECTED_FIELDS: &'static [&'static str] = &["username", "isAdmin"];

    /// Returns the first malformed availability interval, if any
    pub fn invalid_interval(&self) -> Option<(&str, &TimeInterval)> {
        self.availability.iter().find_map(|(slot, intervals)| {
            intervals
                .iter()
                .find(|interval| !interval.is_valid())
                .map(|interval| (slot.as_str(), interval))
        })
    }
}

/// The scheduling-relevant view of a user sent to the timetable generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Instructor {
    pub username: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub preferences: BTreeMap<String, String>,
    pub qualifications: Vec<String>,
    #[schema(value_type = Object)]
    pub availability: Availability,
}

impl From<User> for Instructor {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            preferences: user.preferences,
            qualifications: user.qualifications,
            availability: user.availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_interval_requires_start_before_end() {
        assert!(TimeInterval::new(time(9, 0), time(10, 20)).is_some());
        assert!(TimeInterval::new(time(10, 20), time(9, 0)).is_none());
        assert!(TimeInterval::new(time(9, 0), time(9, 0)).is_none());
    }

    #[test]
    fn test_is_admin_defaults_to_false() {
        let user: User =
            serde_json::from_str(r#"{"username":"rich","email":"rich@uvic.ca"}"#).unwrap();
        assert!(!user.is_admin);
        assert!(user.availability.is_empty());
    }

    #[test]
    fn test_invalid_interval_is_reported() {
        let mut user: User =
            serde_json::from_str(r#"{"username":"rich","email":"rich@uvic.ca"}"#).unwrap();
        user.availability.insert(
            "monday".to_string(),
            vec![TimeInterval {
                start: time(12, 0),
                end: time(11, 0),
            }],
        );

        let (slot, _) = user.invalid_interval().unwrap();
        assert_eq!(slot, "monday");
    }

    #[test]
    fn test_instructor_view_drops_admin_flag() {
        let user: User = serde_json::from_str(
            r#"{"username":"rich","email":"rich@uvic.ca","isAdmin":true,"qualifications":["CSC225"]}"#,
        )
        .unwrap();

        let json = serde_json::to_value(Instructor::from(user)).unwrap();
        assert!(json.get("isAdmin").is_none());
        assert_eq!(json["qualifications"][0], "CSC225");
    }
}

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
};
use utoipa::ToSchema;

/// A room that sections can be scheduled into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Classroom {
    pub building: String,
    pub room: String,
    pub capacity: u32,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub equipment: BTreeSet<String>,
}

/// Natural key of a classroom: building shorthand plus room number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassroomKey {
    pub building: String,
    pub room: String,
}

impl ClassroomKey {
    pub fn new(building: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            building: building.into(),
            room: room.into(),
        }
    }
}

impl Display for ClassroomKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.building, self.room)
    }
}

impl Classroom {
    pub fn key(&self) -> ClassroomKey {
        ClassroomKey::new(self.building.clone(), self.room.clone())
    }

    /// Whether every piece of required equipment is available in this room
    pub fn has_equipment(&self, required: &BTreeSet<String>) -> bool {
        required.is_subset(&self.equipment)
    }

    pub const PROTECTED_FIELDS: &'static [&'static str] = &["building", "room"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(ClassroomKey::new("ECS", "104").to_string(), "ECS 104");
    }

    #[test]
    fn test_negative_capacity_is_rejected_when_decoding() {
        let result = serde_json::from_str::<Classroom>(
            r#"{"building":"ECS","room":"104","capacity":-1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_has_equipment() {
        let classroom = Classroom {
            building: "ECS".to_string(),
            room: "104".to_string(),
            capacity: 120,
            equipment: ["projector", "whiteboard"].into_iter().map(String::from).collect(),
        };

        let required = ["projector"].into_iter().map(String::from).collect();
        assert!(classroom.has_equipment(&required));

        let required = ["lab benches"].into_iter().map(String::from).collect();
        assert!(!classroom.has_equipment(&required));
        assert!(classroom.has_equipment(&BTreeSet::new()));
    }
}

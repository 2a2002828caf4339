use crate::error::{StoreError, StoreResult};
use sea_orm::prelude::Json;
use serde::{Serialize, de::DeserializeOwned};

pub mod classroom;
pub mod course;
pub mod schedule;
pub mod user;

/// Serializes a domain value into a JSONB column
pub(crate) fn encode<T: Serialize>(entity: &'static str, value: &T) -> StoreResult<Json> {
    serde_json::to_value(value).map_err(|e| StoreError::corrupt(entity, e))
}

/// Decodes a JSONB column back into its domain value
pub(crate) fn decode<T: DeserializeOwned>(entity: &'static str, value: Json) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::corrupt(entity, e))
}

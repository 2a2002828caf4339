use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Errors produced while applying a partial update to a record
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("update body must be a JSON object")]
    NotAnObject,
    #[error("field '{0}' cannot be changed")]
    ProtectedField(String),
    #[error("update produces an invalid record: {0}")]
    Malformed(String),
}

/// Applies a top-level field merge (`$set` semantics) to `target`.
///
/// Every key of `patch` replaces the field of the same name. Keys listed in
/// `protected` are rejected. The merged document must still decode as `T`.
pub fn merge_fields<T>(target: &T, patch: &Value, protected: &[&str]) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let fields = patch.as_object().ok_or(PatchError::NotAnObject)?;

    if let Some(key) = fields.keys().find(|key| protected.contains(&key.as_str())) {
        return Err(PatchError::ProtectedField(key.clone()));
    }

    let mut document =
        serde_json::to_value(target).map_err(|e| PatchError::Malformed(e.to_string()))?;
    let Value::Object(existing) = &mut document else {
        return Err(PatchError::NotAnObject);
    };

    for (key, value) in fields {
        existing.insert(key.clone(), value.clone());
    }

    serde_json::from_value(document).map_err(|e| PatchError::Malformed(e.to_string()))
}

//! Error taxonomy of the scheduling pipeline.

use database::StoreError;
use models::{patch::PatchError, term::InvalidTerm};
use std::time::Duration;

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Errors surfaced by the schedule lifecycle operations.
///
/// A degraded capacity estimation service is not an error: it is absorbed
/// by the fallback policy and only logged.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// The term is not one of fall, spring or summer
    #[error(transparent)]
    InvalidTerm(#[from] InvalidTerm),

    /// The year is not an integer
    #[error("invalid year '{0}'")]
    InvalidYear(String),

    /// A request body or update is malformed
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// The timetable generation service failed; nothing was persisted
    #[error("timetable generation failed: {0}")]
    GenerationService(String),

    /// The pipeline did not finish before its deadline
    #[error("schedule generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A store operation failed; the message is for logs only
    #[error("store failure: {0}")]
    Store(String),
}

impl SchedulingError {
    /// Whether the caller's input caused this error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTerm(_)
                | Self::InvalidYear(_)
                | Self::Validation(_)
                | Self::NotFound(_)
                | Self::Conflict(_)
        )
    }
}

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            StoreError::Corrupt { .. } | StoreError::Backend(_) => Self::Store(err.to_string()),
        }
    }
}

impl From<PatchError> for SchedulingError {
    fn from(err: PatchError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_their_category() {
        let err: SchedulingError = StoreError::not_found("draft schedule", "2025/fall").into();
        assert!(matches!(err, SchedulingError::NotFound(_)));
        assert_eq!(err.to_string(), "draft schedule '2025/fall' not found");

        let err: SchedulingError = StoreError::conflict("classroom", "ECS 104").into();
        assert!(matches!(err, SchedulingError::Conflict(_)));

        let err: SchedulingError = StoreError::Backend("connection reset".to_string()).into();
        assert!(matches!(err, SchedulingError::Store(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_timeout_message() {
        let err = SchedulingError::Timeout(Duration::from_secs(120));
        assert_eq!(err.to_string(), "schedule generation timed out after 120s");
    }
}

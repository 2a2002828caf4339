pub mod assembly;
pub mod capacity;
pub mod error;
pub mod generation;
pub mod lifecycle;

pub use capacity::{CapacityEstimator, CapacityOutcome, HttpCapacityClient};
pub use error::{SchedulingError, SchedulingResult};
pub use generation::{HttpGenerationClient, TimetableGenerator};
pub use lifecycle::ScheduleManager;

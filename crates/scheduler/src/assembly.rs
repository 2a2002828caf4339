//! Building the generator request and the final schedule document.

use crate::capacity::CapacityOutcome;
use log::{debug, info};
use models::{
    course::{Course, CourseWithCapacity},
    schedule::{CourseOffering, Schedule, TermSchedule},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{ops::RangeInclusive, sync::Mutex};

/// Enrollment assumed for a course the estimation service gave no figure for
pub const FALLBACK_ENROLLMENT_BAND: RangeInclusive<u32> = 80..=119;

/// Source of synthetic enrollment figures
pub trait EnrollmentSampler: Send + Sync {
    /// Returns a value inside `band`
    fn sample(&self, band: RangeInclusive<u32>) -> u32;
}

/// Uniform draws from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl EnrollmentSampler for ThreadRngSampler {
    fn sample(&self, band: RangeInclusive<u32>) -> u32 {
        rand::rng().random_range(band)
    }
}

/// Reproducible draws from a fixed seed
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EnrollmentSampler for SeededSampler {
    fn sample(&self, band: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(band)
    }
}

/// Pairs every course with an enrollment figure.
///
/// Courses keep their order and none are dropped: a course without an
/// estimate gets a sampled figure from [`FALLBACK_ENROLLMENT_BAND`].
pub fn resolve_capacities(
    courses: &[Course],
    outcome: &CapacityOutcome,
    sampler: &dyn EnrollmentSampler,
) -> Vec<CourseWithCapacity> {
    let mut synthesized = 0;
    let resolved = courses
        .iter()
        .map(|course| {
            let pre_enroll = outcome.estimate_for(&course.shorthand).unwrap_or_else(|| {
                synthesized += 1;
                sampler.sample(FALLBACK_ENROLLMENT_BAND)
            });
            debug!("{} -> pre_enroll {pre_enroll}", course.shorthand);
            CourseWithCapacity::new(course, pre_enroll)
        })
        .collect();

    if synthesized > 0 {
        info!(
            "Synthesized enrollment for {synthesized} of {} courses",
            courses.len()
        );
    }

    resolved
}

/// Wraps generated offerings into a one-term schedule
pub fn assemble_schedule(year: i32, term_label: &str, offerings: Vec<CourseOffering>) -> Schedule {
    Schedule::new(
        year,
        TermSchedule {
            term: term_label.to_string(),
            courses: offerings,
        },
    )
}

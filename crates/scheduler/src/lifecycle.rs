//! Draft and approved schedule lifecycle.
//!
//! [`ScheduleManager`] runs the generation pipeline (catalog reads, capacity
//! estimation, timetable generation, draft insert) and moves drafts to the
//! approved stage. Generation for one `(year, term)` is serialized by a
//! per-key lock and the store refuses a second draft for the same key.
//! Lock entries live only while some request holds or waits on them.

use crate::{
    assembly::{EnrollmentSampler, ThreadRngSampler, assemble_schedule, resolve_capacities},
    capacity::CapacityEstimator,
    error::{SchedulingError, SchedulingResult},
    generation::{GenerationInput, TimetableGenerator},
};
use dashmap::DashMap;
use database::{CatalogStore, ScheduleStore};
use log::{error, info};
use models::{
    patch::merge_fields,
    schedule::{Lifecycle, Schedule},
    term::Term,
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::timeout};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Parses a year given as text, e.g. a path segment
pub fn parse_year(year: &str) -> SchedulingResult<i32> {
    year.trim()
        .parse()
        .map_err(|_| SchedulingError::InvalidYear(year.to_string()))
}

/// A handle on one key's generation lock.
///
/// Dropping the last handle removes the map entry, also when the request
/// future is cancelled mid-run.
struct LockLease<'a> {
    locks: &'a DashMap<(i32, Term), Arc<Mutex<()>>>,
    key: (i32, Term),
    lock: Arc<Mutex<()>>,
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        // the map and this lease are the only holders
        self.locks.remove_if(&self.key, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2
        });
    }
}

pub struct ScheduleManager {
    catalog: Arc<dyn CatalogStore>,
    schedules: Arc<dyn ScheduleStore>,
    estimator: Arc<dyn CapacityEstimator>,
    generator: Arc<dyn TimetableGenerator>,
    sampler: Arc<dyn EnrollmentSampler>,
    locks: DashMap<(i32, Term), Arc<Mutex<()>>>,
    deadline: Duration,
}

impl ScheduleManager {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        schedules: Arc<dyn ScheduleStore>,
        estimator: Arc<dyn CapacityEstimator>,
        generator: Arc<dyn TimetableGenerator>,
    ) -> Self {
        Self {
            catalog,
            schedules,
            estimator,
            generator,
            sampler: Arc::new(ThreadRngSampler),
            locks: DashMap::new(),
            deadline: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn EnrollmentSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Upper bound on one whole generation request
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    fn generation_lock(&self, year: i32, term: Term) -> LockLease<'_> {
        let lock = self
            .locks
            .entry((year, term))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        LockLease {
            locks: &self.locks,
            key: (year, term),
            lock,
        }
    }

    /// Generates and stores a draft schedule for `(year, term)`.
    ///
    /// Both inputs are validated before any store access. The schedule
    /// document keeps `term` as the caller spelled it. The deadline covers
    /// waiting for the key and the pipeline up to the generator's answer;
    /// the draft insert that follows always runs to completion, so a
    /// `Timeout` means nothing was stored.
    pub async fn generate_schedule(&self, year: &str, term: &str) -> SchedulingResult<Schedule> {
        let key_term = Term::parse(term)?;
        let year = parse_year(year)?;
        let label = term.trim();

        let lease = self.generation_lock(year, key_term);
        self.generate_locked(&lease.lock, year, key_term, label).await
    }

    async fn generate_locked(
        &self,
        lock: &Mutex<()>,
        year: i32,
        term: Term,
        label: &str,
    ) -> SchedulingResult<Schedule> {
        let pipeline = async {
            let guard = lock.lock().await;
            let schedule = self.prepare_draft(year, term, label).await?;
            Ok::<_, SchedulingError>((guard, schedule))
        };

        let (_guard, schedule) = match timeout(self.deadline, pipeline).await {
            Ok(prepared) => prepared?,
            Err(_) => {
                error!("Generation for {year} {label} exceeded {:?}", self.deadline);
                return Err(SchedulingError::Timeout(self.deadline));
            }
        };

        self.schedules.insert_draft(year, term, &schedule).await?;
        info!(
            "Stored draft schedule for {year} {label} with {} sections",
            schedule.section_count()
        );
        Ok(schedule)
    }

    async fn prepare_draft(&self, year: i32, term: Term, label: &str) -> SchedulingResult<Schedule> {
        if self.schedules.draft_exists(year, term).await? {
            return Err(SchedulingError::Conflict(format!(
                "a draft schedule for {year} {term} already exists"
            )));
        }

        let courses = self.catalog.courses_offered_in(term).await?;
        info!("Generating schedule for {year} {label}: {} courses", courses.len());

        let outcome = self.estimator.estimate(year, term, &courses).await;
        let resolved = resolve_capacities(&courses, &outcome, self.sampler.as_ref());

        let instructors = self.catalog.list_instructors().await?;
        let classrooms = self.catalog.list_classrooms().await?;

        let offerings = self
            .generator
            .generate(GenerationInput {
                year,
                term_label: label,
                instructors: &instructors,
                courses: &resolved,
                classrooms: &classrooms,
            })
            .await?;

        Ok(assemble_schedule(year, label, offerings))
    }

    /// Moves the draft for `(year, term)` to the approved stage.
    ///
    /// A second approval of the same key finds no draft and fails with `NotFound`.
    pub async fn approve_schedule(&self, year: i32, term: &str) -> SchedulingResult<Schedule> {
        let term = Term::parse(term)?;
        let schedule = self.schedules.approve_draft(year, term).await?;
        info!("Approved schedule for {year} {term}");
        Ok(schedule)
    }

    pub async fn list_schedules(&self, lifecycle: Lifecycle) -> SchedulingResult<Vec<Schedule>> {
        Ok(self.schedules.list_schedules(lifecycle).await?)
    }

    pub async fn get_schedule(
        &self,
        lifecycle: Lifecycle,
        year: &str,
        term: &str,
    ) -> SchedulingResult<Schedule> {
        let term = Term::parse(term)?;
        let year = parse_year(year)?;

        self.schedules
            .find_schedule(lifecycle, year, term)
            .await?
            .ok_or_else(|| SchedulingError::NotFound(format!("no {lifecycle} schedule for {year} {term}")))
    }

    /// Applies a field merge to the draft for `(year, term)` and stores the result
    pub async fn update_draft(&self, year: &str, term: &str, patch: &Value) -> SchedulingResult<Schedule> {
        let key_term = Term::parse(term)?;
        let year = parse_year(year)?;

        let current = self
            .schedules
            .find_schedule(Lifecycle::Draft, year, key_term)
            .await?
            .ok_or_else(|| SchedulingError::NotFound(format!("no draft schedule for {year} {key_term}")))?;

        let merged = merge_fields(&current, patch, Schedule::PROTECTED_FIELDS)?;
        if merged.term(key_term).is_none() {
            return Err(SchedulingError::Validation(format!(
                "updated schedule must keep a '{key_term}' term"
            )));
        }

        self.schedules.replace_draft(year, key_term, &merged).await?;
        info!("Updated draft schedule for {year} {key_term}");
        Ok(merged)
    }

    /// Records a schedule produced elsewhere directly as approved
    pub async fn create_historical(&self, schedule: Schedule) -> SchedulingResult<Schedule> {
        let Some(first) = schedule.terms.first() else {
            return Err(SchedulingError::Validation(
                "schedule must contain at least one term".to_string(),
            ));
        };
        let Some(term) = schedule.key_term() else {
            return Err(SchedulingError::Validation(format!(
                "first term '{}' must be one of fall, spring or summer",
                first.term
            )));
        };

        self.schedules
            .insert_approved(schedule.year, term, &schedule)
            .await?;
        info!("Recorded historical schedule for {} {term}", schedule.year);
        Ok(schedule)
    }
}

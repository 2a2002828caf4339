//! Storage abstractions consumed by the scheduling core and the HTTP layer.
//!
//! Two traits split the persistence surface: [`CatalogStore`] for the
//! records the generator reads (courses, classrooms, users) and
//! [`ScheduleStore`] for generated timetables. Both are object safe so
//! callers hold them as `Arc<dyn ...>` and can swap the Postgres-backed
//! [`crate::PgStore`] for the in-memory [`crate::MemoryStore`].

use crate::error::StoreResult;
use async_trait::async_trait;
use models::{
    classroom::{Classroom, ClassroomKey},
    course::Course,
    schedule::{Lifecycle, Schedule},
    term::Term,
    user::{Instructor, User},
};

/// Courses, classrooms and users
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_courses(&self) -> StoreResult<Vec<Course>>;

    /// Courses whose `terms_offered` names `term`, in shorthand order
    async fn courses_offered_in(&self, term: Term) -> StoreResult<Vec<Course>> {
        let courses = self.list_courses().await?;
        Ok(courses.into_iter().filter(|c| c.is_offered_in(term)).collect())
    }

    async fn get_course(&self, shorthand: &str) -> StoreResult<Course>;

    /// Fails with `Conflict` when the shorthand is taken
    async fn insert_course(&self, course: &Course) -> StoreResult<()>;

    /// Fails with `NotFound` when no course has this shorthand
    async fn replace_course(&self, course: &Course) -> StoreResult<()>;

    async fn delete_course(&self, shorthand: &str) -> StoreResult<()>;

    async fn list_classrooms(&self) -> StoreResult<Vec<Classroom>>;

    async fn get_classroom(&self, key: &ClassroomKey) -> StoreResult<Classroom>;

    /// Fails with `Conflict` when the (building, room) pair is taken
    async fn insert_classroom(&self, classroom: &Classroom) -> StoreResult<()>;

    async fn replace_classroom(&self, classroom: &Classroom) -> StoreResult<()>;

    async fn delete_classroom(&self, key: &ClassroomKey) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn get_user(&self, username: &str) -> StoreResult<User>;

    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    async fn replace_user(&self, user: &User) -> StoreResult<()>;

    async fn delete_user(&self, username: &str) -> StoreResult<()>;

    /// Every user, reduced to the fields the timetable generator consumes
    async fn list_instructors(&self) -> StoreResult<Vec<Instructor>> {
        let users = self.list_users().await?;
        Ok(users.into_iter().map(Instructor::from).collect())
    }
}

/// Draft and approved schedules, keyed by `(year, term)`.
///
/// At most one draft exists per key; implementations enforce this in
/// [`ScheduleStore::insert_draft`]. Approved schedules are never modified.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All schedules in the given lifecycle stage, oldest first
    async fn list_schedules(&self, lifecycle: Lifecycle) -> StoreResult<Vec<Schedule>>;

    /// The schedule stored under `(year, term)`; for approved schedules the newest one
    async fn find_schedule(
        &self,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
    ) -> StoreResult<Option<Schedule>>;

    async fn draft_exists(&self, year: i32, term: Term) -> StoreResult<bool> {
        Ok(self.find_schedule(Lifecycle::Draft, year, term).await?.is_some())
    }

    /// Fails with `Conflict` when a draft already exists for the key
    async fn insert_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()>;

    /// Fails with `NotFound` when there is no draft for the key
    async fn replace_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()>;

    /// Records an already-approved schedule directly
    async fn insert_approved(&self, year: i32, term: Term, schedule: &Schedule)
    -> StoreResult<()>;

    /// Moves the draft for the key to the approved stage in one atomic step.
    ///
    /// Fails with `NotFound` when there is no draft, including when a
    /// concurrent caller approved it first.
    async fn approve_draft(&self, year: i32, term: Term) -> StoreResult<Schedule>;
}

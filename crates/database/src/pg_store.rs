use crate::{
    error::StoreResult,
    services::{
        classroom::ClassroomService, course::CourseService, schedule::ScheduleService,
        user::UserService,
    },
    store::{CatalogStore, ScheduleStore},
};
use async_trait::async_trait;
use models::{
    classroom::{Classroom, ClassroomKey},
    course::Course,
    schedule::{Lifecycle, Schedule},
    term::Term,
    user::User,
};
use sea_orm::DatabaseConnection;

/// Postgres-backed stores sharing one connection pool
#[derive(Clone)]
pub struct PgStore {
    db: DatabaseConnection,
}

impl PgStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        CourseService::list(&self.db).await
    }

    async fn courses_offered_in(&self, term: Term) -> StoreResult<Vec<Course>> {
        CourseService::offered_in(&self.db, term).await
    }

    async fn get_course(&self, shorthand: &str) -> StoreResult<Course> {
        CourseService::get(&self.db, shorthand).await
    }

    async fn insert_course(&self, course: &Course) -> StoreResult<()> {
        CourseService::insert(&self.db, course).await
    }

    async fn replace_course(&self, course: &Course) -> StoreResult<()> {
        CourseService::replace(&self.db, course).await
    }

    async fn delete_course(&self, shorthand: &str) -> StoreResult<()> {
        CourseService::delete(&self.db, shorthand).await
    }

    async fn list_classrooms(&self) -> StoreResult<Vec<Classroom>> {
        ClassroomService::list(&self.db).await
    }

    async fn get_classroom(&self, key: &ClassroomKey) -> StoreResult<Classroom> {
        ClassroomService::get(&self.db, key).await
    }

    async fn insert_classroom(&self, classroom: &Classroom) -> StoreResult<()> {
        ClassroomService::insert(&self.db, classroom).await
    }

    async fn replace_classroom(&self, classroom: &Classroom) -> StoreResult<()> {
        ClassroomService::replace(&self.db, classroom).await
    }

    async fn delete_classroom(&self, key: &ClassroomKey) -> StoreResult<()> {
        ClassroomService::delete(&self.db, key).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        UserService::list(&self.db).await
    }

    async fn get_user(&self, username: &str) -> StoreResult<User> {
        UserService::get(&self.db, username).await
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        UserService::insert(&self.db, user).await
    }

    async fn replace_user(&self, user: &User) -> StoreResult<()> {
        UserService::replace(&self.db, user).await
    }

    async fn delete_user(&self, username: &str) -> StoreResult<()> {
        UserService::delete(&self.db, username).await
    }
}

#[async_trait]
impl ScheduleStore for PgStore {
    async fn list_schedules(&self, lifecycle: Lifecycle) -> StoreResult<Vec<Schedule>> {
        ScheduleService::list(&self.db, lifecycle).await
    }

    async fn find_schedule(
        &self,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
    ) -> StoreResult<Option<Schedule>> {
        ScheduleService::find(&self.db, lifecycle, year, term).await
    }

    async fn draft_exists(&self, year: i32, term: Term) -> StoreResult<bool> {
        ScheduleService::draft_exists(&self.db, year, term).await
    }

    async fn insert_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()> {
        ScheduleService::insert(&self.db, Lifecycle::Draft, year, term, schedule).await
    }

    async fn replace_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()> {
        ScheduleService::replace_draft(&self.db, year, term, schedule).await
    }

    async fn insert_approved(
        &self,
        year: i32,
        term: Term,
        schedule: &Schedule,
    ) -> StoreResult<()> {
        ScheduleService::insert(&self.db, Lifecycle::Approved, year, term, schedule).await
    }

    async fn approve_draft(&self, year: i32, term: Term) -> StoreResult<Schedule> {
        ScheduleService::approve(&self.db, year, term).await
    }
}

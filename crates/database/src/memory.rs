//! In-memory implementation of the stores for tests and local development.

use crate::{
    error::{StoreError, StoreResult},
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
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredSchedule {
    year: i32,
    term: Term,
    lifecycle: Lifecycle,
    document: Schedule,
}

#[derive(Debug, Default)]
struct State {
    courses: BTreeMap<String, Course>,
    classrooms: BTreeMap<ClassroomKey, Classroom>,
    users: BTreeMap<String, User>,
    // insertion order doubles as creation order
    schedules: Vec<StoredSchedule>,
}

/// Catalog and schedule stores kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutating operations performed so far
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn key(year: i32, term: Term) -> String {
    format!("{year}/{term}")
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.state.read().await.courses.values().cloned().collect())
    }

    async fn get_course(&self, shorthand: &str) -> StoreResult<Course> {
        self.state
            .read()
            .await
            .courses
            .get(shorthand)
            .cloned()
            .ok_or_else(|| StoreError::not_found("course", shorthand))
    }

    async fn insert_course(&self, course: &Course) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if state.courses.contains_key(&course.shorthand) {
            return Err(StoreError::conflict("course", &course.shorthand));
        }

        state.courses.insert(course.shorthand.clone(), course.clone());
        self.record_write();
        Ok(())
    }

    async fn replace_course(&self, course: &Course) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let slot = state
            .courses
            .get_mut(&course.shorthand)
            .ok_or_else(|| StoreError::not_found("course", &course.shorthand))?;

        *slot = course.clone();
        self.record_write();
        Ok(())
    }

    async fn delete_course(&self, shorthand: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .courses
            .remove(shorthand)
            .ok_or_else(|| StoreError::not_found("course", shorthand))?;

        self.record_write();
        Ok(())
    }

    async fn list_classrooms(&self) -> StoreResult<Vec<Classroom>> {
        Ok(self.state.read().await.classrooms.values().cloned().collect())
    }

    async fn get_classroom(&self, key: &ClassroomKey) -> StoreResult<Classroom> {
        self.state
            .read()
            .await
            .classrooms
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found("classroom", key))
    }

    async fn insert_classroom(&self, classroom: &Classroom) -> StoreResult<()> {
        let key = classroom.key();
        let mut state = self.state.write().await;
        if state.classrooms.contains_key(&key) {
            return Err(StoreError::conflict("classroom", &key));
        }

        state.classrooms.insert(key, classroom.clone());
        self.record_write();
        Ok(())
    }

    async fn replace_classroom(&self, classroom: &Classroom) -> StoreResult<()> {
        let key = classroom.key();
        let mut state = self.state.write().await;
        let slot = state
            .classrooms
            .get_mut(&key)
            .ok_or_else(|| StoreError::not_found("classroom", &key))?;

        *slot = classroom.clone();
        self.record_write();
        Ok(())
    }

    async fn delete_classroom(&self, key: &ClassroomKey) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .classrooms
            .remove(key)
            .ok_or_else(|| StoreError::not_found("classroom", key))?;

        self.record_write();
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, username: &str) -> StoreResult<User> {
        self.state
            .read()
            .await
            .users
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", username))
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.username) {
            return Err(StoreError::conflict("user", &user.username));
        }

        state.users.insert(user.username.clone(), user.clone());
        self.record_write();
        Ok(())
    }

    async fn replace_user(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let slot = state
            .users
            .get_mut(&user.username)
            .ok_or_else(|| StoreError::not_found("user", &user.username))?;

        // the admin flag is owned by the stored record, not the update
        let is_admin = slot.is_admin;
        *slot = User {
            is_admin,
            ..user.clone()
        };
        self.record_write();
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .users
            .remove(username)
            .ok_or_else(|| StoreError::not_found("user", username))?;

        self.record_write();
        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list_schedules(&self, lifecycle: Lifecycle) -> StoreResult<Vec<Schedule>> {
        let state = self.state.read().await;
        Ok(state
            .schedules
            .iter()
            .filter(|s| s.lifecycle == lifecycle)
            .map(|s| s.document.clone())
            .collect())
    }

    async fn find_schedule(
        &self,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
    ) -> StoreResult<Option<Schedule>> {
        let state = self.state.read().await;
        Ok(state
            .schedules
            .iter()
            .rev()
            .find(|s| s.lifecycle == lifecycle && s.year == year && s.term == term)
            .map(|s| s.document.clone()))
    }

    async fn insert_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let exists = state
            .schedules
            .iter()
            .any(|s| s.lifecycle == Lifecycle::Draft && s.year == year && s.term == term);
        if exists {
            return Err(StoreError::conflict("draft schedule", key(year, term)));
        }

        state.schedules.push(StoredSchedule {
            year,
            term,
            lifecycle: Lifecycle::Draft,
            document: schedule.clone(),
        });
        self.record_write();
        Ok(())
    }

    async fn replace_draft(&self, year: i32, term: Term, schedule: &Schedule) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .schedules
            .iter_mut()
            .find(|s| s.lifecycle == Lifecycle::Draft && s.year == year && s.term == term)
            .ok_or_else(|| StoreError::not_found("draft schedule", key(year, term)))?;

        stored.document = schedule.clone();
        self.record_write();
        Ok(())
    }

    async fn insert_approved(
        &self,
        year: i32,
        term: Term,
        schedule: &Schedule,
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.schedules.push(StoredSchedule {
            year,
            term,
            lifecycle: Lifecycle::Approved,
            document: schedule.clone(),
        });
        self.record_write();
        Ok(())
    }

    async fn approve_draft(&self, year: i32, term: Term) -> StoreResult<Schedule> {
        let mut state = self.state.write().await;
        let stored = state
            .schedules
            .iter_mut()
            .find(|s| s.lifecycle == Lifecycle::Draft && s.year == year && s.term == term)
            .ok_or_else(|| StoreError::not_found("draft schedule", key(year, term)))?;

        stored.lifecycle = Lifecycle::Approved;
        self.record_write();
        Ok(stored.document.clone())
    }
}

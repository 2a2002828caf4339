use super::{decode, encode};
use crate::{
    entities::schedule,
    error::{StoreError, StoreResult},
};
use chrono::Utc;
use log::info;
use models::{
    schedule::{Lifecycle, Schedule},
    term::Term,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, prelude::Expr,
};
use uuid::Uuid;

const ENTITY: &str = "schedule";

pub struct ScheduleService;

impl ScheduleService {
    pub async fn list(
        db: &DatabaseConnection,
        lifecycle: Lifecycle,
    ) -> StoreResult<Vec<Schedule>> {
        schedule::Entity::find()
            .filter(schedule::Column::Status.eq(lifecycle.as_str()))
            .order_by_asc(schedule::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    pub async fn find(
        db: &DatabaseConnection,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
    ) -> StoreResult<Option<Schedule>> {
        Self::find_model(db, lifecycle, year, term)
            .await?
            .map(Self::from_model)
            .transpose()
    }

    pub async fn draft_exists(db: &DatabaseConnection, year: i32, term: Term) -> StoreResult<bool> {
        let count = schedule::Entity::find()
            .filter(schedule::Column::Year.eq(year))
            .filter(schedule::Column::Term.eq(term.as_str()))
            .filter(schedule::Column::Status.eq(Lifecycle::Draft.as_str()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a schedule; the `uq_schedules_live_draft` index rejects a second draft per key
    pub async fn insert(
        db: &DatabaseConnection,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
        document: &Schedule,
    ) -> StoreResult<()> {
        if lifecycle == Lifecycle::Draft && Self::draft_exists(db, year, term).await? {
            return Err(StoreError::conflict("draft schedule", key(year, term)));
        }

        let now = Utc::now().naive_utc();
        let model = schedule::ActiveModel {
            id: Set(Uuid::new_v4()),
            year: Set(year),
            term: Set(term.as_str().to_owned()),
            status: Set(lifecycle.as_str().to_owned()),
            terms: Set(encode(ENTITY, &document.terms)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        schedule::Entity::insert(model)
            .exec(db)
            .await
            .map_err(|e| StoreError::from_insert(e, "draft schedule", key(year, term)))?;

        Ok(())
    }

    /// Rewrites the draft's terms, only while the row is still a draft
    pub async fn replace_draft(
        db: &DatabaseConnection,
        year: i32,
        term: Term,
        document: &Schedule,
    ) -> StoreResult<()> {
        let existing = Self::find_model(db, Lifecycle::Draft, year, term)
            .await?
            .ok_or_else(|| StoreError::not_found("draft schedule", key(year, term)))?;

        let result = schedule::Entity::update_many()
            .col_expr(
                schedule::Column::Terms,
                Expr::value(encode(ENTITY, &document.terms)?),
            )
            .col_expr(
                schedule::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(schedule::Column::Id.eq(existing.id))
            .filter(schedule::Column::Status.eq(Lifecycle::Draft.as_str()))
            .exec(db)
            .await?;

        // Approved between the read and the update; approved rows stay untouched
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("draft schedule", key(year, term)));
        }

        Ok(())
    }

    /// Flips the draft row to approved with a single conditional update
    pub async fn approve(db: &DatabaseConnection, year: i32, term: Term) -> StoreResult<Schedule> {
        let draft = Self::find_model(db, Lifecycle::Draft, year, term)
            .await?
            .ok_or_else(|| StoreError::not_found("draft schedule", key(year, term)))?;

        let result = schedule::Entity::update_many()
            .col_expr(
                schedule::Column::Status,
                Expr::value(Lifecycle::Approved.as_str()),
            )
            .col_expr(
                schedule::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(schedule::Column::Id.eq(draft.id))
            .filter(schedule::Column::Status.eq(Lifecycle::Draft.as_str()))
            .exec(db)
            .await?;

        // Another request approved the same row between the read and the update
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("draft schedule", key(year, term)));
        }

        info!("Approved schedule {} for {} {}", draft.id, term, year);
        Self::from_model(draft)
    }

    async fn find_model(
        db: &DatabaseConnection,
        lifecycle: Lifecycle,
        year: i32,
        term: Term,
    ) -> StoreResult<Option<schedule::Model>> {
        let model = schedule::Entity::find()
            .filter(schedule::Column::Year.eq(year))
            .filter(schedule::Column::Term.eq(term.as_str()))
            .filter(schedule::Column::Status.eq(lifecycle.as_str()))
            .order_by_desc(schedule::Column::CreatedAt)
            .one(db)
            .await?;

        Ok(model)
    }

    fn from_model(model: schedule::Model) -> StoreResult<Schedule> {
        Ok(Schedule {
            year: model.year,
            terms: decode(ENTITY, model.terms)?,
        })
    }
}

fn key(year: i32, term: Term) -> String {
    format!("{year}/{term}")
}

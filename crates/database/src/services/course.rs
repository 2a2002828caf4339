use super::{decode, encode};
use crate::{
    entities::course,
    error::{StoreError, StoreResult},
};
use chrono::Utc;
use models::{course::Course, term::Term};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, prelude::Expr,
};

const ENTITY: &str = "course";

pub struct CourseService;

impl CourseService {
    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<Course>> {
        course::Entity::find()
            .order_by_asc(course::Column::Shorthand)
            .all(db)
            .await?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    /// Courses whose `terms_offered` array names the term, compared case-insensitively.
    ///
    /// Labels keep their stored casing, so this is a scan over `courses`.
    pub async fn offered_in(db: &DatabaseConnection, term: Term) -> StoreResult<Vec<Course>> {
        course::Entity::find()
            .filter(Expr::cust_with_values(
                "EXISTS (SELECT 1 FROM jsonb_array_elements_text(courses.terms_offered) AS t WHERE lower(t) = $1)",
                [term.as_str()],
            ))
            .order_by_asc(course::Column::Shorthand)
            .all(db)
            .await?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    pub async fn get(db: &DatabaseConnection, shorthand: &str) -> StoreResult<Course> {
        let model = course::Entity::find_by_id(shorthand.to_owned())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, shorthand))?;

        Self::from_model(model)
    }

    pub async fn insert(db: &DatabaseConnection, course: &Course) -> StoreResult<()> {
        let existing = course::Entity::find_by_id(course.shorthand.clone())
            .count(db)
            .await?;
        if existing > 0 {
            return Err(StoreError::conflict(ENTITY, &course.shorthand));
        }

        let now = Utc::now().naive_utc();
        let model = course::ActiveModel {
            shorthand: Set(course.shorthand.clone()),
            created_at: Set(now),
            ..Self::to_active_model(course)?
        };

        course::Entity::insert(model)
            .exec(db)
            .await
            .map_err(|e| StoreError::from_insert(e, ENTITY, &course.shorthand))?;

        Ok(())
    }

    pub async fn replace(db: &DatabaseConnection, course: &Course) -> StoreResult<()> {
        let existing = course::Entity::find_by_id(course.shorthand.clone())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, &course.shorthand))?;

        let changes = Self::to_active_model(course)?;
        let mut active: course::ActiveModel = existing.into();
        active.name = changes.name;
        active.equipment = changes.equipment;
        active.prerequisites = changes.prerequisites;
        active.corequisites = changes.corequisites;
        active.terms_offered = changes.terms_offered;
        active.updated_at = changes.updated_at;
        active.update(db).await?;

        Ok(())
    }

    pub async fn delete(db: &DatabaseConnection, shorthand: &str) -> StoreResult<()> {
        let result = course::Entity::delete_by_id(shorthand.to_owned())
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, shorthand));
        }
        Ok(())
    }

    /// Builds the mutable columns of a course row; identity and creation time are left unset
    fn to_active_model(course: &Course) -> StoreResult<course::ActiveModel> {
        Ok(course::ActiveModel {
            name: Set(course.name.clone()),
            equipment: Set(encode(ENTITY, &course.equipment)?),
            prerequisites: Set(encode(ENTITY, &course.prerequisites)?),
            corequisites: Set(encode(ENTITY, &course.corequisites)?),
            terms_offered: Set(encode(ENTITY, &course.terms_offered)?),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        })
    }

    fn from_model(model: course::Model) -> StoreResult<Course> {
        Ok(Course {
            shorthand: model.shorthand,
            name: model.name,
            equipment: decode(ENTITY, model.equipment)?,
            prerequisites: decode(ENTITY, model.prerequisites)?,
            corequisites: decode(ENTITY, model.corequisites)?,
            terms_offered: decode(ENTITY, model.terms_offered)?,
        })
    }
}

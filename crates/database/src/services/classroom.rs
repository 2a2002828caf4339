use super::{decode, encode};
use crate::{
    entities::classroom,
    error::{StoreError, StoreResult},
};
use chrono::Utc;
use models::classroom::{Classroom, ClassroomKey};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder,
};

const ENTITY: &str = "classroom";

pub struct ClassroomService;

impl ClassroomService {
    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<Classroom>> {
        classroom::Entity::find()
            .order_by_asc(classroom::Column::Building)
            .order_by_asc(classroom::Column::Room)
            .all(db)
            .await?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    pub async fn get(db: &DatabaseConnection, key: &ClassroomKey) -> StoreResult<Classroom> {
        let model = classroom::Entity::find_by_id((key.building.clone(), key.room.clone()))
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, key))?;

        Self::from_model(model)
    }

    async fn exists(db: &DatabaseConnection, key: &ClassroomKey) -> StoreResult<bool> {
        let count = classroom::Entity::find_by_id((key.building.clone(), key.room.clone()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn insert(db: &DatabaseConnection, classroom: &Classroom) -> StoreResult<()> {
        let key = classroom.key();
        if Self::exists(db, &key).await? {
            return Err(StoreError::conflict(ENTITY, &key));
        }

        let now = Utc::now().naive_utc();
        let model = classroom::ActiveModel {
            building: Set(classroom.building.clone()),
            room: Set(classroom.room.clone()),
            created_at: Set(now),
            ..Self::to_active_model(classroom)?
        };

        classroom::Entity::insert(model)
            .exec(db)
            .await
            .map_err(|e| StoreError::from_insert(e, ENTITY, &key))?;

        Ok(())
    }

    pub async fn replace(db: &DatabaseConnection, classroom: &Classroom) -> StoreResult<()> {
        let key = classroom.key();
        let existing = classroom::Entity::find_by_id((key.building.clone(), key.room.clone()))
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, &key))?;

        let changes = Self::to_active_model(classroom)?;
        let mut active: classroom::ActiveModel = existing.into();
        active.capacity = changes.capacity;
        active.equipment = changes.equipment;
        active.updated_at = changes.updated_at;
        active.update(db).await?;

        Ok(())
    }

    pub async fn delete(db: &DatabaseConnection, key: &ClassroomKey) -> StoreResult<()> {
        let result = classroom::Entity::delete_by_id((key.building.clone(), key.room.clone()))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, key));
        }
        Ok(())
    }

    fn to_active_model(classroom: &Classroom) -> StoreResult<classroom::ActiveModel> {
        let capacity =
            i32::try_from(classroom.capacity).map_err(|e| StoreError::corrupt(ENTITY, e))?;

        Ok(classroom::ActiveModel {
            capacity: Set(capacity),
            equipment: Set(encode(ENTITY, &classroom.equipment)?),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        })
    }

    fn from_model(model: classroom::Model) -> StoreResult<Classroom> {
        Ok(Classroom {
            building: model.building,
            room: model.room,
            capacity: u32::try_from(model.capacity).map_err(|e| StoreError::corrupt(ENTITY, e))?,
            equipment: decode(ENTITY, model.equipment)?,
        })
    }
}

use super::{decode, encode};
use crate::{
    entities::user,
    error::{StoreError, StoreResult},
};
use chrono::Utc;
use models::user::User;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};

const ENTITY: &str = "user";

pub struct UserService;

impl UserService {
    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<User>> {
        user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(db)
            .await?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    pub async fn get(db: &DatabaseConnection, username: &str) -> StoreResult<User> {
        let model = user::Entity::find_by_id(username.to_owned())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, username))?;

        Self::from_model(model)
    }

    pub async fn insert(db: &DatabaseConnection, user: &User) -> StoreResult<()> {
        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            username: Set(user.username.clone()),
            is_admin: Set(user.is_admin),
            created_at: Set(now),
            ..Self::to_active_model(user)?
        };

        user::Entity::insert(model)
            .exec(db)
            .await
            .map_err(|e| StoreError::from_insert(e, ENTITY, &user.username))?;

        Ok(())
    }

    /// Replaces the profile fields of a user; `is_admin` is left untouched
    pub async fn replace(db: &DatabaseConnection, user: &User) -> StoreResult<()> {
        let existing = user::Entity::find_by_id(user.username.clone())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, &user.username))?;

        let changes = Self::to_active_model(user)?;
        let mut active: user::ActiveModel = existing.into();
        active.email = changes.email;
        active.firstname = changes.firstname;
        active.lastname = changes.lastname;
        active.preferences = changes.preferences;
        active.qualifications = changes.qualifications;
        active.availability = changes.availability;
        active.updated_at = changes.updated_at;
        active.update(db).await?;

        Ok(())
    }

    pub async fn delete(db: &DatabaseConnection, username: &str) -> StoreResult<()> {
        let result = user::Entity::delete_by_id(username.to_owned())
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, username));
        }
        Ok(())
    }

    fn to_active_model(user: &User) -> StoreResult<user::ActiveModel> {
        Ok(user::ActiveModel {
            email: Set(user.email.clone()),
            firstname: Set(user.firstname.clone()),
            lastname: Set(user.lastname.clone()),
            preferences: Set(encode(ENTITY, &user.preferences)?),
            qualifications: Set(encode(ENTITY, &user.qualifications)?),
            availability: Set(encode(ENTITY, &user.availability)?),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        })
    }

    fn from_model(model: user::Model) -> StoreResult<User> {
        Ok(User {
            username: model.username,
            email: model.email,
            firstname: model.firstname,
            lastname: model.lastname,
            is_admin: model.is_admin,
            preferences: decode(ENTITY, model.preferences)?,
            qualifications: decode(ENTITY, model.qualifications)?,
            availability: decode(ENTITY, model.availability)?,
        })
    }
}

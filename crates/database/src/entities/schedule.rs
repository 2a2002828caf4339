use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Drafts and approved schedules share this table; `status` tells them apart
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub year: i32,
    pub term: String,   // fall, spring, summer
    pub status: String, // draft, approved
    #[sea_orm(column_type = "JsonBinary")]
    pub terms: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

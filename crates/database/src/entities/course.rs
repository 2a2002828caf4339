use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub shorthand: String,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub equipment: Json, // ["projector", ...]
    #[sea_orm(column_type = "JsonBinary")]
    pub prerequisites: Json, // [["CSC115"], ...]
    #[sea_orm(column_type = "JsonBinary")]
    pub corequisites: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub terms_offered: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub domain1: String,
    pub domain2: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub difficulty: String,
    pub project_type: String,
    pub duration_weeks: i32,
    pub weekly_hours: i32,
    pub num_mentees: i32,
    pub resources_link: String,
    pub previously_completed: bool,
    pub owner_id: i32,
    pub co_mentor_id: Option<i32>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::preferences::Entity")]
    Preferences,
    #[sea_orm(has_many = "super::rankings::Entity")]
    Rankings,
}

impl Related<super::preferences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Preferences.def()
    }
}

impl Related<super::rankings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rankings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

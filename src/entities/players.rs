use sea_orm::entity::prelude::*;

/// Reference roster data. The API never writes this table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nickname: String,
    pub real_name: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub biography: Option<String>,
    /// Comma-joined set of year identifiers the player was active in.
    pub years: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

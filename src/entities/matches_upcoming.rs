use sea_orm::entity::prelude::*;

/// Persisted upcoming matches. The table holds exactly the output of the most
/// recent successful sync; every sync fully replaces its contents.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches_upcoming")]
pub struct Model {
    /// Derived deterministically from team names, normalized date and best-of,
    /// so repeated syncs of the same match collapse to one row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub team1: String,
    pub team1_logo: Option<String>,
    pub team2: String,
    pub team2_logo: Option<String>,
    pub best_of: Option<String>,
    /// RFC 3339 instant; lexical order matches chronological order.
    pub date: String,
    pub stream_twitch: Option<String>,
    pub stream_youtube: Option<String>,
    pub tournament_name: Option<String>,
    pub tournament_url: Option<String>,
    pub tournament_logo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

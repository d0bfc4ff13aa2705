use crate::entities::{players, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Repository for roster lookups. Read-only: players are reference data.
pub struct PlayerRepository {
    conn: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<players::Model>> {
        let rows = Players::find()
            .order_by_asc(players::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Looks a player up by numeric id or by nickname, whichever matches.
    /// Both comparisons are bound parameters.
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Option<players::Model>> {
        let mut condition = Condition::any().add(players::Column::Nickname.eq(identifier));
        if let Ok(id) = identifier.parse::<i32>() {
            condition = condition.add(players::Column::Id.eq(id));
        }

        let row = Players::find().filter(condition).one(&self.conn).await?;
        Ok(row)
    }

    /// Players whose comma-joined `years` column contains the given year
    /// identifier (`years LIKE ?` with a bound parameter).
    pub async fn list_by_year(&self, year: &str) -> Result<Vec<players::Model>> {
        let rows = Players::find()
            .filter(players::Column::Years.contains(year))
            .order_by_asc(players::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}

use crate::entities::{prelude::*, years};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// Repository for the competitive-season reference table.
pub struct YearRepository {
    conn: DatabaseConnection,
}

impl YearRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<years::Model>> {
        let rows = Years::find()
            .order_by_asc(years::Column::YearIdentifier)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}

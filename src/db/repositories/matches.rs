use crate::entities::{matches_upcoming, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

/// Repository for the synced upcoming-matches table. Reads are always live;
/// writes happen only through `replace_all`.
pub struct MatchRepository {
    conn: DatabaseConnection,
}

impl MatchRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_upcoming(&self) -> Result<Vec<matches_upcoming::Model>> {
        let rows = MatchesUpcoming::find()
            .order_by_asc(matches_upcoming::Column::Date)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Full replace: delete every existing row, then insert the fetched set.
    /// Not transactional; a retriggered sync converges because it starts with
    /// the delete again.
    pub async fn replace_all(&self, matches: Vec<matches_upcoming::Model>) -> Result<u64> {
        let deleted = MatchesUpcoming::delete_many().exec(&self.conn).await?;

        if matches.is_empty() {
            info!("Match sync cleared {} rows, nothing to insert", deleted.rows_affected);
            return Ok(0);
        }

        let count = matches.len() as u64;
        let active_models: Vec<matches_upcoming::ActiveModel> = matches
            .into_iter()
            .map(|m| matches_upcoming::ActiveModel {
                id: Set(m.id),
                team1: Set(m.team1),
                team1_logo: Set(m.team1_logo),
                team2: Set(m.team2),
                team2_logo: Set(m.team2_logo),
                best_of: Set(m.best_of),
                date: Set(m.date),
                stream_twitch: Set(m.stream_twitch),
                stream_youtube: Set(m.stream_youtube),
                tournament_name: Set(m.tournament_name),
                tournament_url: Set(m.tournament_url),
                tournament_logo: Set(m.tournament_logo),
            })
            .collect();

        MatchesUpcoming::insert_many(active_models)
            .exec(&self.conn)
            .await?;

        info!(
            "Match sync replaced {} rows with {} fetched matches",
            deleted.rows_affected, count
        );
        Ok(count)
    }
}

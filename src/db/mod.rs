use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{matches_upcoming, players, years};

pub mod migrator;
pub mod repositories;

/// Thin gateway over the relational store. A pass-through to the underlying
/// connection plus per-table repositories; every lookup binds its parameters.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn year_repo(&self) -> repositories::years::YearRepository {
        repositories::years::YearRepository::new(self.conn.clone())
    }

    fn player_repo(&self) -> repositories::players::PlayerRepository {
        repositories::players::PlayerRepository::new(self.conn.clone())
    }

    fn match_repo(&self) -> repositories::matches::MatchRepository {
        repositories::matches::MatchRepository::new(self.conn.clone())
    }

    pub async fn list_years(&self) -> Result<Vec<years::Model>> {
        self.year_repo().list_all().await
    }

    pub async fn list_players(&self) -> Result<Vec<players::Model>> {
        self.player_repo().list_all().await
    }

    pub async fn get_player(&self, identifier: &str) -> Result<Option<players::Model>> {
        self.player_repo().get_by_identifier(identifier).await
    }

    pub async fn list_players_by_year(&self, year: &str) -> Result<Vec<players::Model>> {
        self.player_repo().list_by_year(year).await
    }

    pub async fn list_upcoming_matches(&self) -> Result<Vec<matches_upcoming::Model>> {
        self.match_repo().list_upcoming().await
    }

    pub async fn replace_upcoming_matches(
        &self,
        matches: Vec<matches_upcoming::Model>,
    ) -> Result<u64> {
        self.match_repo().replace_all(matches).await
    }
}

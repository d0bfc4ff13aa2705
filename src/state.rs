use anyhow::Result;
use std::sync::Arc;

use crate::cache::FreshnessCache;
use crate::clients::{
    MatchSource, RankingSource, ScheduleClient, SoloqRankingClient, build_shared_http_client,
};
use crate::config::Config;
use crate::db::Store;
use crate::services::SyncService;

/// Application state shared by every handler and the scheduler.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub cache: Arc<FreshnessCache>,

    pub ranking: Arc<dyn RankingSource>,

    pub sync_service: Arc<SyncService>,
}

impl SharedState {
    pub async fn new(config: Config) -> Result<Self> {
        let http = build_shared_http_client(u64::from(config.scrape.request_timeout_seconds))?;

        let ranking: Arc<dyn RankingSource> = Arc::new(SoloqRankingClient::new(
            http.clone(),
            config.scrape.ranking_url.clone(),
        ));
        let matches: Arc<dyn MatchSource> =
            Arc::new(ScheduleClient::new(http, config.scrape.schedule_url.clone()));

        Self::with_sources(config, ranking, matches).await
    }

    /// Builds the state around caller-supplied sources. Tests hand in mocks
    /// here instead of hitting the real remote endpoints.
    pub async fn with_sources(
        config: Config,
        ranking: Arc<dyn RankingSource>,
        matches: Arc<dyn MatchSource>,
    ) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let sync_service = Arc::new(SyncService::new(store.clone(), matches));

        Ok(Self {
            config,
            store,
            cache: Arc::new(FreshnessCache::new()),
            ranking,
            sync_service,
        })
    }
}

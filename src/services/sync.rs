//! Fetch-then-full-replace orchestration for the upcoming-matches table.
//!
//! A sync never deletes anything before it holds a successful fetch, and it
//! always starts with a full delete, so retriggering after a partial failure
//! converges to a correct final state.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::{FetchError, MatchSource, ScrapedMatch};
use crate::db::Store;
use crate::entities::matches_upcoming;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote fetch failed; the persisted set was left untouched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetch succeeded but persisting did not. The table may be empty or
    /// partially populated; the caller is expected to retry.
    #[error("failed to persist fetched matches: {0}")]
    Persist(#[source] anyhow::Error),
}

/// Lowercases and collapses everything non-alphanumeric to single dashes.
fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Deterministic match id from the opponents, normalized date and best-of.
/// Repeated syncs of the same underlying match collapse to one row. Known
/// gap: an upstream rename or date-format change between syncs produces a
/// different id.
pub fn match_id(m: &ScrapedMatch) -> String {
    let bo = m.best_of.as_deref().unwrap_or("bo");
    format!(
        "{}_{}_{}_{}",
        slug(&m.team1),
        slug(&m.team2),
        slug(&m.date),
        slug(bo)
    )
}

fn to_model(m: ScrapedMatch) -> matches_upcoming::Model {
    matches_upcoming::Model {
        id: match_id(&m),
        team1: m.team1,
        team1_logo: m.team1_logo,
        team2: m.team2,
        team2_logo: m.team2_logo,
        best_of: m.best_of,
        date: m.date,
        stream_twitch: m.stream_twitch,
        stream_youtube: m.stream_youtube,
        tournament_name: m.tournament_name,
        tournament_url: m.tournament_url,
        tournament_logo: m.tournament_logo,
    }
}

/// Runs the fetch → replace cycle for upcoming matches.
pub struct SyncService {
    store: Store,
    source: Arc<dyn MatchSource>,
}

impl SyncService {
    pub fn new(store: Store, source: Arc<dyn MatchSource>) -> Self {
        Self { store, source }
    }

    /// Fetches the upcoming matches and fully replaces the persisted set,
    /// returning the number of rows written.
    pub async fn sync_upcoming_matches(&self) -> Result<u64, SyncError> {
        let fetched = self.source.fetch_upcoming().await?;

        let mut seen = HashSet::new();
        let mut models = Vec::with_capacity(fetched.len());
        for scraped in fetched {
            let model = to_model(scraped);
            if seen.insert(model.id.clone()) {
                models.push(model);
            } else {
                warn!("Dropping duplicate match id during sync: {}", model.id);
            }
        }

        let updated = self
            .store
            .replace_upcoming_matches(models)
            .await
            .map_err(SyncError::Persist)?;

        info!("Upcoming-match sync complete: {} rows", updated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scraped(team1: &str, team2: &str, date: &str) -> ScrapedMatch {
        ScrapedMatch {
            team1: team1.to_string(),
            team2: team2.to_string(),
            date: date.to_string(),
            best_of: Some("BO3".to_string()),
            ..Default::default()
        }
    }

    struct FixedSource {
        matches: Vec<ScrapedMatch>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(matches: Vec<ScrapedMatch>) -> Self {
            Self {
                matches,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MatchSource for FixedSource {
        async fn fetch_upcoming(&self) -> Result<Vec<ScrapedMatch>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.matches.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MatchSource for FailingSource {
        async fn fetch_upcoming(&self) -> Result<Vec<ScrapedMatch>, FetchError> {
            Err(FetchError::Timeout {
                url: "https://example.test/schedule".to_string(),
            })
        }
    }

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    #[test]
    fn test_match_id_is_deterministic() {
        let m = scraped("Karmine Corp", "Los Ratones", "2026-09-01T15:00:00Z");
        assert_eq!(match_id(&m), match_id(&m.clone()));
        assert_eq!(
            match_id(&m),
            "karmine-corp_los-ratones_2026-09-01t15-00-00z_bo3"
        );
    }

    #[test]
    fn test_match_id_changes_with_inputs() {
        let a = scraped("A", "B", "2026-09-01T15:00:00Z");
        let b = scraped("A", "B", "2026-09-02T15:00:00Z");
        assert_ne!(match_id(&a), match_id(&b));
    }

    #[tokio::test]
    async fn test_sync_replaces_persisted_set() {
        let store = memory_store().await;
        let source = Arc::new(FixedSource::new(vec![
            scraped("A", "B", "2026-09-02T15:00:00Z"),
            scraped("C", "D", "2026-09-01T15:00:00Z"),
            scraped("E", "F", "2026-09-03T15:00:00Z"),
        ]));
        let sync = SyncService::new(store.clone(), source);

        let updated = sync.sync_upcoming_matches().await.unwrap();
        assert_eq!(updated, 3);

        let rows = store.list_upcoming_matches().await.unwrap();
        assert_eq!(rows.len(), 3);
        // Reads come back ordered by date ascending.
        assert_eq!(rows[0].team1, "C");
        assert_eq!(rows[1].team1, "A");
        assert_eq!(rows[2].team1, "E");
    }

    #[tokio::test]
    async fn test_sync_is_idempotent_with_unchanged_upstream() {
        let store = memory_store().await;
        let source = Arc::new(FixedSource::new(vec![
            scraped("A", "B", "2026-09-02T15:00:00Z"),
            scraped("C", "D", "2026-09-01T15:00:00Z"),
        ]));
        let sync = SyncService::new(store.clone(), source);

        sync.sync_upcoming_matches().await.unwrap();
        let first: Vec<_> = store.list_upcoming_matches().await.unwrap();

        let updated = sync.sync_upcoming_matches().await.unwrap();
        assert_eq!(updated, 2);
        let second: Vec<_> = store.list_upcoming_matches().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_existing_rows_untouched() {
        let store = memory_store().await;
        let seed = SyncService::new(
            store.clone(),
            Arc::new(FixedSource::new(vec![scraped(
                "A",
                "B",
                "2026-09-02T15:00:00Z",
            )])),
        );
        seed.sync_upcoming_matches().await.unwrap();

        let sync = SyncService::new(store.clone(), Arc::new(FailingSource));
        let err = sync.sync_upcoming_matches().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)));

        let rows = store.list_upcoming_matches().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team1, "A");
    }

    #[tokio::test]
    async fn test_duplicate_upstream_records_collapse_to_one_row() {
        let store = memory_store().await;
        let m = scraped("A", "B", "2026-09-02T15:00:00Z");
        let source = Arc::new(FixedSource::new(vec![m.clone(), m]));
        let sync = SyncService::new(store.clone(), source);

        let updated = sync.sync_upcoming_matches().await.unwrap();
        assert_eq!(updated, 1);
        assert_eq!(store.list_upcoming_matches().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_upstream_clears_the_table() {
        let store = memory_store().await;
        let seed = SyncService::new(
            store.clone(),
            Arc::new(FixedSource::new(vec![scraped(
                "A",
                "B",
                "2026-09-02T15:00:00Z",
            )])),
        );
        seed.sync_upcoming_matches().await.unwrap();

        let sync = SyncService::new(store.clone(), Arc::new(FixedSource::new(vec![])));
        let updated = sync.sync_upcoming_matches().await.unwrap();
        assert_eq!(updated, 0);
        assert!(store.list_upcoming_matches().await.unwrap().is_empty());
    }
}

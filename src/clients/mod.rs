use async_trait::async_trait;
use thiserror::Error;

pub mod schedule;
pub mod soloq;

pub use schedule::ScheduleClient;
pub use soloq::SoloqRankingClient;

/// Build a shared HTTP client with reasonable defaults for scrape calls.
/// Reused across all remote sources for connection pooling.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(crate::constants::USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Failure of a remote fetch, carrying the source URL and underlying cause.
/// Partial extraction is not a failure; records merely lose optional fields.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected page structure at {url}: {reason}")]
    Extract { url: String, reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// One row of the scraped SoloQ ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub nickname: String,
    pub tier: String,
    pub league_points: u32,
    /// 1-based position after sorting by league points descending.
    pub rank: u32,
}

/// An upcoming match as extracted from the schedule source, before the sync
/// orchestrator assigns the persisted id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedMatch {
    pub team1: String,
    pub team1_logo: Option<String>,
    pub team2: String,
    pub team2_logo: Option<String>,
    pub best_of: Option<String>,
    pub date: String,
    pub stream_twitch: Option<String>,
    pub stream_youtube: Option<String>,
    pub tournament_name: Option<String>,
    pub tournament_url: Option<String>,
    pub tournament_logo: Option<String>,
}

/// Narrow seam over the volatile ranking-page extraction rules, so the
/// site-specific markup handling stays swappable and mockable.
#[async_trait]
pub trait RankingSource: Send + Sync {
    /// Fetches the roster's SoloQ ranking, sorted by league points descending
    /// (stable: ties keep the source page order). Zero entries is a valid
    /// empty result, not an error.
    async fn fetch_ranking(&self) -> Result<Vec<RankingEntry>, FetchError>;
}

/// Narrow seam over the upcoming-matches schedule source.
#[async_trait]
pub trait MatchSource: Send + Sync {
    async fn fetch_upcoming(&self) -> Result<Vec<ScrapedMatch>, FetchError>;
}

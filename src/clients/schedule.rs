use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{FetchError, MatchSource, ScrapedMatch};

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    matches: Vec<ScheduleMatch>,
}

#[derive(Debug, Deserialize)]
struct ScheduleMatch {
    teams: Vec<ScheduleTeam>,
    #[serde(rename = "bestOf")]
    best_of: Option<u32>,
    #[serde(rename = "startTime")]
    start_time: Option<StartTime>,
    streams: Option<ScheduleStreams>,
    tournament: Option<ScheduleTournament>,
}

#[derive(Debug, Deserialize)]
struct ScheduleTeam {
    name: String,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StartTime {
    Iso(String),
    EpochMillis(i64),
}

#[derive(Debug, Deserialize)]
struct ScheduleStreams {
    twitch: Option<String>,
    youtube: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleTournament {
    name: Option<String>,
    url: Option<String>,
    logo: Option<String>,
}

/// Normalizes an upstream timestamp to RFC 3339 UTC. Unrecognized strings are
/// kept verbatim; the calendar endpoint reports those as invalid when asked.
fn normalize_date(raw: &StartTime) -> String {
    match raw {
        StartTime::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| ms.to_string()),
        StartTime::Iso(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return dt
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Secs, true);
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
                return naive
                    .and_utc()
                    .to_rfc3339_opts(SecondsFormat::Secs, true);
            }
            s.clone()
        }
    }
}

fn best_of_label(best_of: Option<u32>) -> Option<String> {
    best_of.map(|n| format!("BO{n}"))
}

/// A match entry needs both opponents; anything else degrades to `None`.
fn map_match(m: ScheduleMatch) -> Option<ScrapedMatch> {
    let mut teams = m.teams.into_iter();
    let team1 = teams.next()?;
    let team2 = teams.next()?;

    let date = m
        .start_time
        .as_ref()
        .map(normalize_date)
        .unwrap_or_default();

    let (stream_twitch, stream_youtube) = m
        .streams
        .map(|s| (s.twitch, s.youtube))
        .unwrap_or((None, None));

    let (tournament_name, tournament_url, tournament_logo) = m
        .tournament
        .map(|t| (t.name, t.url, t.logo))
        .unwrap_or((None, None, None));

    Some(ScrapedMatch {
        team1: team1.name,
        team1_logo: team1.logo,
        team2: team2.name,
        team2_logo: team2.logo,
        best_of: best_of_label(m.best_of),
        date,
        stream_twitch,
        stream_youtube,
        tournament_name,
        tournament_url,
        tournament_logo,
    })
}

/// Fetches the roster's upcoming matches from the schedule endpoint. Output is
/// unpersisted; the sync orchestrator assigns ids and writes the table.
#[derive(Clone)]
pub struct ScheduleClient {
    client: Client,
    url: String,
}

impl ScheduleClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MatchSource for ScheduleClient {
    async fn fetch_upcoming(&self) -> Result<Vec<ScrapedMatch>, FetchError> {
        debug!("Fetching upcoming matches from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&self.url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }

        let payload: ScheduleResponse =
            response.json().await.map_err(|e| FetchError::Extract {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        Ok(payload.matches.into_iter().filter_map(map_match).collect())
    }
}

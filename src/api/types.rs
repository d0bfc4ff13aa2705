use serde::Serialize;

use crate::clients::RankingEntry;
use crate::entities::{matches_upcoming, players, years};

/// Every failure body is a JSON object with a single `error` field.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub status: &'static str,
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct YearDto {
    pub year_identifier: String,
    pub label: String,
}

impl From<years::Model> for YearDto {
    fn from(m: years::Model) -> Self {
        Self {
            year_identifier: m.year_identifier,
            label: m.label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerDto {
    pub id: i32,
    pub nickname: String,
    pub real_name: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub biography: Option<String>,
    pub years: Vec<String>,
}

impl From<players::Model> for PlayerDto {
    fn from(m: players::Model) -> Self {
        let years = m
            .years
            .split(',')
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(String::from)
            .collect();

        Self {
            id: m.id,
            nickname: m.nickname,
            real_name: m.real_name,
            role: m.role,
            country: m.country,
            biography: m.biography,
            years,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankingEntryDto {
    pub nickname: String,
    pub tier: String,
    pub lp: u32,
    pub rank: u32,
}

impl From<RankingEntry> for RankingEntryDto {
    fn from(e: RankingEntry) -> Self {
        Self {
            nickname: e.nickname,
            tier: e.tier,
            lp: e.league_points,
            rank: e.rank,
        }
    }
}

/// Wire shape kept compatible with the persisted schema's column names.
#[derive(Debug, Serialize)]
pub struct UpcomingMatchDto {
    pub id: String,
    pub team1: String,
    #[serde(rename = "team1Logo")]
    pub team1_logo: Option<String>,
    pub team2: String,
    #[serde(rename = "team2Logo")]
    pub team2_logo: Option<String>,
    pub bo: Option<String>,
    pub date: String,
    pub streams_twitch: Option<String>,
    pub streams_youtube: Option<String>,
    pub tournament_name: Option<String>,
    pub tournament_url: Option<String>,
    pub tournament_logo: Option<String>,
}

impl From<matches_upcoming::Model> for UpcomingMatchDto {
    fn from(m: matches_upcoming::Model) -> Self {
        Self {
            id: m.id,
            team1: m.team1,
            team1_logo: m.team1_logo,
            team2: m.team2,
            team2_logo: m.team2_logo,
            bo: m.best_of,
            date: m.date,
            streams_twitch: m.stream_twitch,
            streams_youtube: m.stream_youtube,
            tournament_name: m.tournament_name,
            tournament_url: m.tournament_url,
            tournament_logo: m.tournament_logo,
        }
    }
}

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::{FetchError, RankingEntry, RankingSource};

/// Consolidates the ranking-page regexes to avoid per-call overhead.
struct SoloqRegex {
    row: Regex,
    nickname: Regex,
    tier: Regex,
    league_points: Regex,
}

impl SoloqRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<SoloqRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    row: Regex::new(r#"(?s)<tr[^>]*data-summoner[^>]*>(.*?)</tr>"#).ok()?,
                    nickname: Regex::new(r#"class="summoner-name"[^>]*>([^<]+)<"#).ok()?,
                    tier: Regex::new(r#"class="tier-rank"[^>]*>([^<]+)<"#).ok()?,
                    league_points: Regex::new(r#"class="league-points"[^>]*>([\d,]+)\s*LP<"#)
                        .ok()?,
                })
            })
            .as_ref()
    }
}

fn extract_field(row_html: &str, re: &Regex) -> Option<String> {
    re.captures(row_html)
        .and_then(|c| c.get(1))
        .map(|m| html_escape::decode_html_entities(m.as_str().trim()).to_string())
}

/// Parses one table row. A row without a nickname is dropped; every other
/// field degrades to a default instead of aborting the fetch.
fn parse_row(row_html: &str) -> Option<RankingEntry> {
    let re = SoloqRegex::get()?;
    let nickname = extract_field(row_html, &re.nickname)?;

    let tier = extract_field(row_html, &re.tier).unwrap_or_else(|| "Unranked".to_string());
    let league_points = extract_field(row_html, &re.league_points)
        .map(|lp| lp.replace(',', ""))
        .and_then(|lp| lp.parse().ok())
        .unwrap_or(0);

    Some(RankingEntry {
        nickname,
        tier,
        league_points,
        rank: 0,
    })
}

/// Extracts every ranking row from the page, sorts by league points
/// descending (stable, ties keep page order) and assigns 1-based ranks.
fn parse_ranking_page(html: &str) -> Vec<RankingEntry> {
    let Some(re) = SoloqRegex::get() else {
        return Vec::new();
    };

    let mut entries: Vec<RankingEntry> = re
        .row
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .filter_map(|m| parse_row(m.as_str()))
        .collect();

    entries.sort_by(|a, b| b.league_points.cmp(&a.league_points));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }
    entries
}

/// Scrapes the roster's SoloQ ranking from the configured leaderboard page.
/// The markup rules here are an unstable contract with the third-party site;
/// only the output shape and degradation policy are load-bearing.
#[derive(Clone)]
pub struct SoloqRankingClient {
    client: Client,
    url: String,
}

impl SoloqRankingClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RankingSource for SoloqRankingClient {
    async fn fetch_ranking(&self) -> Result<Vec<RankingEntry>, FetchError> {
        debug!("Fetching SoloQ ranking from {}", self.url);

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

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&self.url, e))?;

        let entries = parse_ranking_page(&html);
        if entries.is_empty() {
            warn!("Ranking page at {} yielded no rows", self.url);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <table>
        <tr data-summoner="1"><td class="summoner-name">MidLaner</td>
            <td class="tier-rank">Grandmaster</td>
            <td class="league-points">512 LP</td></tr>
        <tr data-summoner="2"><td class="summoner-name">TopLaner</td>
            <td class="tier-rank">Challenger</td>
            <td class="league-points">1,024 LP</td></tr>
        <tr data-summoner="3"><td class="summoner-name">Support</td>
            <td class="tier-rank">Grandmaster</td>
            <td class="league-points">512 LP</td></tr>
        </table>
    "#;

    #[test]
    fn test_parse_sorts_by_league_points_descending() {
        let entries = parse_ranking_page(FIXTURE);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].nickname, "TopLaner");
        assert_eq!(entries[0].league_points, 1024);
        assert_eq!(entries[0].rank, 1);
        // Stable sort: the 512 LP tie keeps page order.
        assert_eq!(entries[1].nickname, "MidLaner");
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[2].nickname, "Support");
        assert_eq!(entries[2].rank, 3);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let html = r#"<tr data-summoner="1">
            <td class="summoner-name">FreshAccount</td></tr>"#;
        let entries = parse_ranking_page(html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tier, "Unranked");
        assert_eq!(entries[0].league_points, 0);
    }

    #[test]
    fn test_row_without_nickname_is_dropped() {
        let html = r#"<tr data-summoner="1">
            <td class="tier-rank">Diamond</td>
            <td class="league-points">75 LP</td></tr>"#;
        assert!(parse_ranking_page(html).is_empty());
    }

    #[test]
    fn test_empty_page_yields_empty_list() {
        assert!(parse_ranking_page("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_html_entities_are_decoded() {
        let html = r#"<tr data-summoner="1">
            <td class="summoner-name">L&amp;L Player</td>
            <td class="tier-rank">Master</td>
            <td class="league-points">200 LP</td></tr>"#;
        let entries = parse_ranking_page(html);
        assert_eq!(entries[0].nickname, "L&L Player");
    }
}

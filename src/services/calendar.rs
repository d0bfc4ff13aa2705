//! Stateless `.ics` formatting for a single upcoming match.
//!
//! Pure transform: given a persisted match row, produce a complete calendar
//! document with a fixed one-hour event window, or fail before emitting
//! anything. Never a half-written body.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::entities::matches_upcoming;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("match {0} not found")]
    MatchNotFound(String),

    #[error("match {id} has an unparseable date: {date}")]
    InvalidDate { id: String, date: String },
}

/// Linear scan of the live matches listing for the requested id.
pub fn find_match<'a>(
    matches: &'a [matches_upcoming::Model],
    id: &str,
) -> Option<&'a matches_upcoming::Model> {
    matches.iter().find(|m| m.id == id)
}

fn parse_start(m: &matches_upcoming::Model) -> Result<DateTime<Utc>, CalendarError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(&m.date) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&m.date, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    Err(CalendarError::InvalidDate {
        id: m.id.clone(),
        date: m.date.clone(),
    })
}

/// Escapes text per RFC 5545 (commas, semicolons, backslashes, newlines).
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn ics_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Serializes the match into a calendar document with a one-hour window.
pub fn build_event(m: &matches_upcoming::Model) -> Result<String, CalendarError> {
    let start = parse_start(m)?;
    let end = start + chrono::Duration::hours(1);

    let summary = escape_text(&format!("{} vs {}", m.team1, m.team2));

    let mut description = Vec::new();
    if let Some(tournament) = &m.tournament_name {
        description.push(escape_text(tournament));
    }
    if let Some(best_of) = &m.best_of {
        description.push(escape_text(best_of));
    }

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//rosterd//match calendar//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@rosterd", m.id),
        format!("DTSTAMP:{}", ics_timestamp(start)),
        format!("DTSTART:{}", ics_timestamp(start)),
        format!("DTEND:{}", ics_timestamp(end)),
        format!("SUMMARY:{summary}"),
    ];

    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", description.join(" - ")));
    }
    if let Some(url) = m.stream_twitch.as_ref().or(m.stream_youtube.as_ref()) {
        lines.push(format!("URL:{url}"));
    }

    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    Ok(lines.join("\r\n") + "\r\n")
}

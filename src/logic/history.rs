//! Cross-tournament history: title counts, attendance, and head-to-head records.

use crate::models::{parse_score, PlayerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of one past tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub winner: Option<PlayerId>,
    pub runner_up: Option<PlayerId>,
    #[serde(default)]
    pub winner_lower: Option<PlayerId>,
    #[serde(default)]
    pub runner_up_lower: Option<PlayerId>,
    pub participants: u32,
    /// Kind of meeting (regular, special event, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single game between two players. `score` is oriented `p1-p2`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryMatch {
    pub date: String,
    pub p1: PlayerId,
    pub p2: PlayerId,
    pub score: String,
    pub winner: PlayerId,
}

/// Number of titles per player.
pub fn win_counts<'a, F>(entries: &'a [HistoryEntry], pick: F) -> BTreeMap<PlayerId, u32>
where
    F: Fn(&'a HistoryEntry) -> Option<&'a PlayerId>,
{
    let mut counts = BTreeMap::new();
    for e in entries {
        if let Some(p) = pick(e) {
            *counts.entry(p.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Number of distinct dates each player appears on.
pub fn attendance_counts(matches: &[HistoryMatch]) -> BTreeMap<PlayerId, u32> {
    let mut dates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for m in matches {
        dates.entry(&m.p1).or_default().insert(&m.date);
        dates.entry(&m.p2).or_default().insert(&m.date);
    }
    dates
        .into_iter()
        .map(|(p, d)| (p.to_string(), d.len() as u32))
        .collect()
}

/// Highest counts first; equal counts by name. At most `n` entries.
pub fn top_n(counts: &BTreeMap<PlayerId, u32>, n: usize) -> Vec<(PlayerId, u32)> {
    let mut sorted: Vec<(PlayerId, u32)> = counts.iter().map(|(p, c)| (p.clone(), *c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}

/// One meeting seen from the first player's side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub date: String,
    pub won: bool,
    /// Sets of the first player, then the second.
    pub score: (u32, u32),
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub player: PlayerId,
    pub opponent: PlayerId,
    pub wins: u32,
    pub losses: u32,
    /// Most recent first.
    pub meetings: Vec<Meeting>,
}

fn date_key(date: &str) -> Option<NaiveDate> {
    let head = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Head-to-head record of `player` against `opponent`. Games with unreadable scores are skipped.
pub fn head_to_head(matches: &[HistoryMatch], player: &str, opponent: &str) -> HeadToHead {
    let mut meetings: Vec<Meeting> = matches
        .iter()
        .filter(|m| {
            (m.p1 == player && m.p2 == opponent) || (m.p1 == opponent && m.p2 == player)
        })
        .filter_map(|m| {
            let score = parse_score(&m.score)?;
            let score = if m.p1 == player { score } else { score.flipped() };
            Some(Meeting {
                date: m.date.clone(),
                won: m.winner == player,
                score: (score.a, score.b),
            })
        })
        .collect();
    meetings.sort_by(|a, b| date_key(&b.date).cmp(&date_key(&a.date)));

    let wins = meetings.iter().filter(|m| m.won).count() as u32;
    HeadToHead {
        player: player.to_string(),
        opponent: opponent.to_string(),
        wins,
        losses: meetings.len() as u32 - wins,
        meetings,
    }
}

//! Group standings: per-player round-robin records and automatic ranks.

use crate::models::{pair_key, score_for, MatchResult, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A placement, or no placement at all when a group has no recorded games.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Rank {
    #[default]
    Unranked,
    Ranked(u32),
}

impl Rank {
    pub fn value(self) -> Option<u32> {
        match self {
            Rank::Ranked(n) => Some(n),
            Rank::Unranked => None,
        }
    }

    pub fn is_ranked(self) -> bool {
        matches!(self, Rank::Ranked(_))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ranked(n) => write!(f, "{}", n),
            Rank::Unranked => Ok(()),
        }
    }
}

/// Round-robin record of one player within one group.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub player: PlayerId,
    pub played: u32,
    pub win: u32,
    pub lose: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub rank: Rank,
}

impl StandingRecord {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }

    pub fn set_diff(&self) -> i64 {
        i64::from(self.sets_for) - i64::from(self.sets_against)
    }

    /// Standings points: one per win.
    pub fn points(&self) -> u32 {
        self.win
    }

    fn record_match(&mut self, sets_for: u32, sets_against: u32) {
        self.played += 1;
        self.sets_for += sets_for;
        self.sets_against += sets_against;
        if sets_for > sets_against {
            self.win += 1;
        } else {
            self.lose += 1;
        }
    }
}

/// Better records order first: wins, then set difference, then sets won.
pub fn compare_records(a: &StandingRecord, b: &StandingRecord) -> Ordering {
    b.win
        .cmp(&a.win)
        .then_with(|| b.set_diff().cmp(&a.set_diff()))
        .then_with(|| b.sets_for.cmp(&a.sets_for))
}

/// Standings of one group. `records` keeps the member order that was passed in.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group_id: String,
    pub records: Vec<StandingRecord>,
    pub any_played: bool,
}

impl GroupStandings {
    pub fn record(&self, player: &str) -> Option<&StandingRecord> {
        self.records.iter().find(|r| r.player == player)
    }

    /// Records in rank order. Unranked groups come back in member order.
    pub fn ranked(&self) -> Vec<&StandingRecord> {
        let mut out: Vec<&StandingRecord> = self.records.iter().collect();
        out.sort_by_key(|r| r.rank.value().unwrap_or(u32::MAX));
        out
    }

    /// Number of recorded results that counted towards the standings.
    pub fn counted_results(&self) -> u32 {
        self.records.iter().map(|r| r.played).sum::<u32>() / 2
    }
}

/// Compute records and automatic ranks for one group.
///
/// Every unordered pair of members is looked up by canonical key. Missing results,
/// unparsable scores and level scores are skipped for both players. Ranks follow
/// [`compare_records`]; players level on all three criteria keep their member order.
/// A group without any counted result is left entirely unranked.
pub fn compute_standings(
    group_id: &str,
    members: &[PlayerId],
    results: Option<&HashMap<String, MatchResult>>,
) -> GroupStandings {
    let mut records: Vec<StandingRecord> = members.iter().map(StandingRecord::new).collect();

    if let Some(results) = results {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let (p1, p2) = (&members[i], &members[j]);
                let Some(result) = results.get(&pair_key(p1, p2)) else {
                    continue;
                };
                let Some(score) = score_for(p1, p2, result) else {
                    continue;
                };
                if !score.is_decisive() {
                    continue;
                }
                records[i].record_match(score.a, score.b);
                records[j].record_match(score.b, score.a);
            }
        }
    }

    let any_played = records.iter().any(|r| r.played > 0);
    if any_played {
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by(|&a, &b| compare_records(&records[a], &records[b]));
        for (pos, idx) in order.into_iter().enumerate() {
            records[idx].rank = Rank::Ranked(pos as u32 + 1);
        }
    }

    GroupStandings {
        group_id: group_id.to_string(),
        records,
        any_played,
    }
}

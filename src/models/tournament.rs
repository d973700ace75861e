//! Tournament value object built from a snapshot, and ViewerError.

use crate::models::bracket::{BracketNodeId, BracketState};
use crate::models::game::MatchResult;
use crate::models::player::{group_number, GroupId, Player, PlayerId};
use crate::models::snapshot::{FinalSummary, Metadata, Snapshot};
use std::collections::HashMap;

/// Errors at the boundary of the viewer (backend access, decoding, export).
/// The engine itself never fails; it degrades to "no data" values instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViewerError {
    /// The persistence backend could not be reached or answered with an error.
    UpstreamUnavailable(String),
    /// A snapshot document could not be decoded.
    MalformedSnapshot(String),
    /// No snapshot is stored for this date.
    SnapshotNotFound(String),
    /// Local file access failed.
    Io(String),
    /// Writing an export failed.
    Export(String),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::UpstreamUnavailable(msg) => write!(f, "Snapshot backend unavailable: {}", msg),
            ViewerError::MalformedSnapshot(msg) => write!(f, "Malformed snapshot: {}", msg),
            ViewerError::SnapshotNotFound(date) => write!(f, "No snapshot for {}", date),
            ViewerError::Io(msg) => write!(f, "I/O error: {}", msg),
            ViewerError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

/// A round-robin group and its members, in snapshot order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Group {
    pub id: GroupId,
    /// 1-based display number (`team-0` is group 1).
    pub number: u32,
    pub members: Vec<PlayerId>,
}

/// Immutable in-memory view of one snapshot. Engine functions take it by reference;
/// nothing here is mutated after construction.
#[derive(Clone, Debug, Default)]
pub struct Tournament {
    pub metadata: Metadata,
    /// All players in snapshot order.
    pub players: Vec<Player>,
    /// Groups ordered by display number.
    pub groups: Vec<Group>,
    results: HashMap<GroupId, HashMap<String, MatchResult>>,
    manual_ranks: HashMap<GroupId, HashMap<PlayerId, u32>>,
    pub bracket: BracketState,
    pub final_summary: Option<FinalSummary>,
}

impl Tournament {
    /// Build the value object from a decoded snapshot. Malformed bracket node ids are skipped.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let players: Vec<Player> = snapshot
            .players_state
            .iter()
            .map(|(name, state)| Player::from_state(name.clone(), state))
            .collect();

        let mut groups: Vec<Group> = Vec::new();
        for p in &players {
            let Some(group_id) = &p.group else { continue };
            match groups.iter_mut().find(|g| &g.id == group_id) {
                Some(g) => {
                    if !g.members.contains(&p.name) {
                        g.members.push(p.name.clone());
                    }
                }
                None => groups.push(Group {
                    id: group_id.clone(),
                    number: 0,
                    members: vec![p.name.clone()],
                }),
            }
        }
        groups.sort_by(|a, b| {
            match (group_number(&a.id), group_number(&b.id)) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.id.cmp(&b.id),
            }
        });
        for (i, g) in groups.iter_mut().enumerate() {
            g.number = i as u32 + 1;
        }

        let results = snapshot
            .results_by_team
            .iter()
            .map(|(group, pairs)| (group.clone(), pairs.iter().cloned().collect()))
            .collect();

        // A zero rank is treated as "no override".
        let manual_ranks = snapshot
            .manual_rank_by_team
            .iter()
            .map(|(group, ranks)| {
                let ranks = ranks
                    .iter()
                    .filter_map(|(p, r)| r.filter(|&r| r > 0).map(|r| (p.clone(), r)))
                    .collect();
                (group.clone(), ranks)
            })
            .collect();

        let mut bracket = BracketState::new();
        for (raw_id, value) in &snapshot.bracket_state {
            match raw_id.parse::<BracketNodeId>() {
                Ok(id) => bracket.insert(id, value.clone()),
                Err(e) => log::debug!("Skipping bracket entry: {}", e),
            }
        }

        Self {
            metadata: snapshot.metadata.clone(),
            players,
            groups,
            results,
            manual_ranks,
            bracket,
            final_summary: snapshot.final_summary.clone(),
        }
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Group count from metadata, never less than the number of groups present.
    pub fn groups_count(&self) -> u32 {
        let present = self.groups.len() as u32;
        match self.metadata.groups_count {
            Some(n) if n < present => {
                log::debug!("groupsCount {} is below the {} groups present", n, present);
                present
            }
            Some(n) => n,
            None => present,
        }
    }

    /// Results of one group keyed by canonical pair key. Unknown groups have no results.
    pub fn results(&self, group_id: &str) -> Option<&HashMap<String, MatchResult>> {
        self.results.get(group_id)
    }

    /// Manual rank overrides of one group.
    pub fn manual_ranks(&self, group_id: &str) -> Option<&HashMap<PlayerId, u32>> {
        self.manual_ranks.get(group_id)
    }
}

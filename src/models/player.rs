//! Player and group placement data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player: the display name, unique within a tournament.
pub type PlayerId = String;

/// Identifier of a round-robin group (e.g. `team-0`).
pub type GroupId = String;

/// Where a player sits in the snapshot: inside a group, or anywhere else (waiting pool, absent).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Team,
    #[default]
    #[serde(other)]
    Pool,
}

/// Per-player entry of `playersState` in a snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    #[serde(rename = "where", default)]
    pub placement: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<GroupId>,
    /// Display-only tier badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
}

/// A player in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerId,
    pub grade: Option<u32>,
    /// Group the player plays round-robin in; `None` when not placed in a group.
    pub group: Option<GroupId>,
}

impl Player {
    /// Build a player from its snapshot entry. Only `where == "team"` entries keep their group.
    pub fn from_state(name: impl Into<String>, state: &PlayerState) -> Self {
        let group = match state.placement {
            Placement::Team => state.team_id.clone(),
            Placement::Pool => None,
        };
        Self {
            name: name.into(),
            grade: state.grade,
            group,
        }
    }
}

/// Display number of a group id: `team-N` is shown as group `N + 1`.
pub fn group_number(group_id: &str) -> Option<u32> {
    group_id
        .rsplit('-')
        .next()
        .and_then(|n| n.trim().parse::<u32>().ok())
        .map(|n| n + 1)
}

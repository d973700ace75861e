//! Snapshot document: one point-in-time JSON export of a tournament.

use crate::models::bracket::NodeValue;
use crate::models::game::MatchResult;
use crate::models::player::{GroupId, PlayerId, PlayerState};
use crate::models::tournament::ViewerError;
use serde::{Deserialize, Serialize};

fn default_match_format() -> String {
    "bo3".to_string()
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_match_format")]
    pub match_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_count: Option<u32>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            match_format: default_match_format(),
            groups_count: None,
        }
    }
}

/// Third place in a summary: one name, or the two losing semi-finalists.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placings {
    One(PlayerId),
    Many(Vec<PlayerId>),
}

impl Placings {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Placings::One(p) => vec![p.as_str()],
            Placings::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<PlayerId>,
    #[serde(default, alias = "semiFinalists", skip_serializing_if = "Option::is_none")]
    pub third: Option<Placings>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    #[serde(default)]
    pub upper: BracketSummary,
    #[serde(default)]
    pub lower: BracketSummary,
}

/// The snapshot exchanged with the persistence backend. Maps are stored as pair lists.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub players_state: Vec<(PlayerId, PlayerState)>,
    #[serde(default)]
    pub results_by_team: Vec<(GroupId, Vec<(String, MatchResult)>)>,
    #[serde(default)]
    pub manual_rank_by_team: Vec<(GroupId, Vec<(PlayerId, Option<u32>)>)>,
    #[serde(default)]
    pub bracket_state: Vec<(String, NodeValue)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_summary: Option<FinalSummary>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        serde_json::from_str(json).map_err(|e| ViewerError::MalformedSnapshot(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ViewerError> {
        serde_json::from_value(value).map_err(|e| ViewerError::MalformedSnapshot(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ViewerError> {
        serde_json::to_string(self).map_err(|e| ViewerError::MalformedSnapshot(e.to_string()))
    }
}

//! Bracket node identifiers, recorded node values, and slot values.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Leaf text marking a structurally empty position.
pub const BYE: &str = "BYE";

/// Which of the two elimination brackets a node belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    /// Node id prefix: `U` or `L`.
    pub fn prefix(self) -> &'static str {
        match self {
            Side::Upper => "U",
            Side::Lower => "L",
        }
    }

    fn from_prefix(s: &str) -> Option<Self> {
        match s {
            "U" => Some(Side::Upper),
            "L" => Some(Side::Lower),
            _ => None,
        }
    }
}

/// Position of a node inside one bracket.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodePosition {
    /// `round >= 1`, `index >= 1` within the round. Round 1 holds the leaves.
    Slot { round: u32, index: u32 },
    /// The champion node above the last round.
    Champion,
}

/// Bracket node identity, written as `{U|L}-r{round}-{index}` or `{U|L}-winner`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BracketNodeId {
    pub side: Side,
    pub position: NodePosition,
}

impl BracketNodeId {
    pub fn slot(side: Side, round: u32, index: u32) -> Self {
        Self {
            side,
            position: NodePosition::Slot { round, index },
        }
    }

    pub fn champion(side: Side) -> Self {
        Self {
            side,
            position: NodePosition::Champion,
        }
    }
}

impl fmt::Display for BracketNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            NodePosition::Slot { round, index } => {
                write!(f, "{}-r{}-{}", self.side.prefix(), round, index)
            }
            NodePosition::Champion => write!(f, "{}-winner", self.side.prefix()),
        }
    }
}

/// Error for node ids that do not follow the `{prefix}-r{round}-{index}` format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidNodeId(pub String);

impl fmt::Display for InvalidNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bracket node id: {}", self.0)
    }
}

impl FromStr for BracketNodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidNodeId(s.to_string());
        let mut parts = s.trim().split('-');
        let side = parts
            .next()
            .and_then(Side::from_prefix)
            .ok_or_else(invalid)?;
        let position = match (parts.next(), parts.next(), parts.next()) {
            (Some("winner"), None, None) => NodePosition::Champion,
            (Some(round), Some(index), None) => {
                let round: u32 = round
                    .strip_prefix('r')
                    .and_then(|r| r.parse().ok())
                    .ok_or_else(invalid)?;
                let index: u32 = index.parse().map_err(|_| invalid())?;
                if round == 0 || index == 0 {
                    return Err(invalid());
                }
                NodePosition::Slot { round, index }
            }
            _ => return Err(invalid()),
        };
        Ok(Self { side, position })
    }
}

/// Outcome recorded on a match node. Any field may be absent.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordedOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
}

/// Value stored for a node in `bracketState`: a bare name (or `BYE`) or a match outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Leaf(String),
    Outcome(RecordedOutcome),
}

impl NodeValue {
    /// Name shown on the node itself: the leaf text, or the outcome's winner.
    pub fn display_value(&self) -> Option<&str> {
        match self {
            NodeValue::Leaf(s) => Some(s.as_str()),
            NodeValue::Outcome(o) => o.winner.as_deref(),
        }
    }

    pub fn outcome(&self) -> Option<&RecordedOutcome> {
        match self {
            NodeValue::Outcome(o) => Some(o),
            NodeValue::Leaf(_) => None,
        }
    }
}

/// Sparse recorded bracket data. A missing node means "unknown", never "empty".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BracketState {
    nodes: HashMap<BracketNodeId, NodeValue>,
}

impl BracketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: BracketNodeId, value: NodeValue) {
        self.nodes.insert(id, value);
    }

    pub fn get(&self, id: &BracketNodeId) -> Option<&NodeValue> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All recorded nodes of one side.
    pub fn side_nodes(&self, side: Side) -> impl Iterator<Item = (&BracketNodeId, &NodeValue)> {
        self.nodes.iter().filter(move |(id, _)| id.side == side)
    }
}

/// Value of one bracket position as shown to the renderer.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Slot {
    Player(PlayerId),
    /// Structurally no entrant; the paired entrant advances without playing.
    Bye,
    /// Not resolved from the available data.
    #[default]
    Unknown,
}

impl Slot {
    /// Interpret a leaf text: `BYE` marks a bye, blank or `?` stays unknown.
    pub fn from_leaf(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(BYE) {
            Slot::Bye
        } else if value.is_empty() || value == "?" {
            Slot::Unknown
        } else {
            Slot::Player(value.to_string())
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Slot::Unknown)
    }

    pub fn player(&self) -> Option<&str> {
        match self {
            Slot::Player(p) => Some(p.as_str()),
            _ => None,
        }
    }
}

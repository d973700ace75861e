//! Data structures for the viewer: players, results, bracket nodes, snapshots.

mod bracket;
mod game;
mod player;
mod snapshot;
mod tournament;

pub use bracket::{
    BracketNodeId, BracketState, InvalidNodeId, NodePosition, NodeValue, RecordedOutcome, Side,
    Slot, BYE,
};
pub use game::{pair_key, parse_score, score_for, MatchResult, Score, PAIR_KEY_SEPARATOR};
pub use player::{group_number, GroupId, Placement, Player, PlayerId, PlayerState};
pub use snapshot::{BracketSummary, FinalSummary, Metadata, Placings, Snapshot};
pub use tournament::{Group, Tournament, ViewerError};

//! Elimination bracket reconstruction from sparse recorded node data.
//!
//! Positions are resolved in priority order, each step only filling positions that are
//! still unknown:
//!
//! 1. values recorded on the node itself (a name, `BYE`, or an outcome's winner);
//! 2. `{p1, p2}` pairs recorded on a round-2 match fill the two round-1 slots below it;
//! 3. pairs recorded on later rounds and the champion node fill the round below them;
//! 4. a known participant whose two feeders hold one unknown and one bye or other
//!    player must have come from the unknown feeder. Applied from the champion down.
//!
//! The only winner ever inferred is the structural one: a player paired with a bye
//! advances, and two byes leave a bye.

use crate::models::{BracketNodeId, BracketState, NodePosition, Side, Slot};
use serde::{Deserialize, Serialize};

/// Brackets larger than this are never inferred from node ids.
pub const MAX_BRACKET_SIZE: u32 = 1024;

/// Number of match rounds in a bracket of `size` slots.
pub fn round_count(size: u32) -> u32 {
    size.trailing_zeros()
}

/// Smallest power-of-two size, at least `min_size`, that contains every recorded node of `side`.
pub fn detect_bracket_size(state: &BracketState, side: Side, min_size: u32) -> u32 {
    let clamped = min_size.clamp(2, MAX_BRACKET_SIZE);
    if clamped != min_size {
        log::debug!("Minimum bracket size {} clamped to {}", min_size, clamped);
    }
    let mut size = clamped.next_power_of_two();
    for (id, _) in state.side_nodes(side) {
        let NodePosition::Slot { round, index } = id.position else {
            continue;
        };
        let implied = u64::from(index) << round.saturating_sub(1).min(31);
        let implied = implied.max(1u64 << round.min(31));
        if implied > u64::from(MAX_BRACKET_SIZE) {
            log::debug!("Ignoring node {} for bracket size detection", id);
            continue;
        }
        if let Some(needed) = (implied as u32).checked_next_power_of_two() {
            size = size.max(needed);
        }
    }
    size
}

/// Which entrant of a match a result refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    A,
    B,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// At least one entrant is still unknown.
    Pending,
    /// Two players known, no recorded winner.
    Ready,
    /// A player faces a bye and advances without playing.
    Walkover,
    /// The recorded next-round occupant is one of the two entrants.
    Decided,
    /// Two byes; nobody advances.
    Void,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// Round of the two entrants (1 = first round).
    pub round: u32,
    /// 1-based match number inside the round.
    pub index: u32,
    pub a: Slot,
    pub b: Slot,
    /// Occupant of the node the winner moves to.
    pub advancing: Slot,
    /// Node id the winner moves to.
    pub to: String,
    pub state: MatchState,
    /// Winning entrant, when the advancing occupant matches one of them.
    pub winner: Option<Lane>,
}

impl BracketMatch {
    fn new(round: u32, index: u32, a: Slot, b: Slot, advancing: Slot, to: String) -> Self {
        let winner = match advancing.player() {
            Some(p) if a.player() == Some(p) => Some(Lane::A),
            Some(p) if b.player() == Some(p) => Some(Lane::B),
            _ => None,
        };
        let state = match (&a, &b) {
            (Slot::Bye, Slot::Bye) => MatchState::Void,
            (Slot::Bye, Slot::Player(_)) | (Slot::Player(_), Slot::Bye) => MatchState::Walkover,
            _ if winner.is_some() => MatchState::Decided,
            (Slot::Player(_), Slot::Player(_)) => MatchState::Ready,
            _ => MatchState::Pending,
        };
        Self {
            round,
            index,
            a,
            b,
            advancing,
            to,
            state,
            winner,
        }
    }
}

/// Fully reconciled bracket for rendering.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub side: Side,
    pub size: u32,
    /// Participants per round; `rounds[0]` is the first-round slot array.
    pub rounds: Vec<Vec<Slot>>,
    pub champion: Slot,
    pub matches: Vec<BracketMatch>,
}

impl BracketView {
    pub fn first_round(&self) -> &[Slot] {
        self.rounds.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Participants per level; the last level is the champion node.
struct Grid {
    side: Side,
    levels: Vec<Vec<Slot>>,
}

impl Grid {
    fn new(side: Side, size: u32) -> Self {
        let levels = (0..=round_count(size))
            .map(|k| vec![Slot::Unknown; (size >> k) as usize])
            .collect();
        Self { side, levels }
    }

    fn top(&self) -> usize {
        self.levels.len() - 1
    }

    fn node_id(&self, level: usize, index: usize) -> BracketNodeId {
        if level == self.top() {
            BracketNodeId::champion(self.side)
        } else {
            BracketNodeId::slot(self.side, level as u32 + 1, index as u32 + 1)
        }
    }

    fn fill(&mut self, level: usize, index: usize, value: Slot) {
        if let Some(slot) = self.levels[level].get_mut(index) {
            if slot.is_unknown() {
                *slot = value;
            }
        }
    }

    fn apply_node_values(&mut self, state: &BracketState) {
        for level in 0..self.levels.len() {
            for index in 0..self.levels[level].len() {
                let id = self.node_id(level, index);
                if let Some(value) = state.get(&id).and_then(|v| v.display_value()) {
                    self.fill(level, index, Slot::from_leaf(value));
                }
            }
        }
    }

    /// Pairs recorded on a match node fill the level below it.
    fn apply_pairs(&mut self, state: &BracketState) {
        for level in 1..self.levels.len() {
            for index in 0..self.levels[level].len() {
                let id = self.node_id(level, index);
                let Some(outcome) = state.get(&id).and_then(|v| v.outcome()) else {
                    continue;
                };
                if let Some(p1) = &outcome.p1 {
                    self.fill(level - 1, 2 * index, Slot::from_leaf(p1));
                }
                if let Some(p2) = &outcome.p2 {
                    self.fill(level - 1, 2 * index + 1, Slot::from_leaf(p2));
                }
            }
        }
    }

    fn infer_feeders(&mut self) {
        for level in (1..self.levels.len()).rev() {
            for index in 0..self.levels[level].len() {
                let Slot::Player(p) = self.levels[level][index].clone() else {
                    continue;
                };
                let (ia, ib) = (2 * index, 2 * index + 1);
                let a = self.levels[level - 1][ia].clone();
                let b = self.levels[level - 1][ib].clone();
                let excludes = |s: &Slot| match s {
                    Slot::Bye => true,
                    Slot::Player(q) => *q != p,
                    Slot::Unknown => false,
                };
                if a.is_unknown() && excludes(&b) {
                    self.fill(level - 1, ia, Slot::Player(p.clone()));
                } else if b.is_unknown() && excludes(&a) {
                    self.fill(level - 1, ib, Slot::Player(p.clone()));
                }
            }
        }
    }

    fn apply_seeding(&mut self, seeded: &[Slot]) {
        for (index, slot) in seeded.iter().enumerate() {
            self.fill(0, index, slot.clone());
        }
    }

    fn advance_byes(&mut self) {
        for level in 0..self.top() {
            for index in 0..self.levels[level + 1].len() {
                let advanced = match (
                    &self.levels[level][2 * index],
                    &self.levels[level][2 * index + 1],
                ) {
                    (Slot::Player(p), Slot::Bye) | (Slot::Bye, Slot::Player(p)) => {
                        Slot::Player(p.clone())
                    }
                    (Slot::Bye, Slot::Bye) => Slot::Bye,
                    _ => continue,
                };
                self.fill(level + 1, index, advanced);
            }
        }
    }

    fn resolve_recorded(&mut self, state: &BracketState) {
        self.apply_node_values(state);
        self.apply_pairs(state);
        self.infer_feeders();
    }
}

fn valid_size(size: u32) -> bool {
    size >= 2 && size.is_power_of_two() && size <= MAX_BRACKET_SIZE
}

/// First-round slot array of length `size` reconstructed from recorded data only.
/// Unresolved positions stay [`Slot::Unknown`]; they are never turned into byes.
/// Sizes that are not a power of two yield an empty array.
pub fn assemble_first_round(state: &BracketState, side: Side, size: u32) -> Vec<Slot> {
    if !valid_size(size) {
        return Vec::new();
    }
    let mut grid = Grid::new(side, size);
    grid.resolve_recorded(state);
    grid.levels.swap_remove(0)
}

/// Full bracket: recorded data first, `seeded` first-round slots for whatever is still
/// unknown, then bye walkovers.
pub fn assemble_bracket(state: &BracketState, side: Side, size: u32, seeded: &[Slot]) -> BracketView {
    if !valid_size(size) {
        return BracketView {
            side,
            size,
            rounds: Vec::new(),
            champion: Slot::Unknown,
            matches: Vec::new(),
        };
    }
    let mut grid = Grid::new(side, size);
    grid.resolve_recorded(state);
    grid.apply_seeding(seeded);
    grid.advance_byes();

    let mut matches = Vec::new();
    for level in 0..grid.top() {
        for index in 0..grid.levels[level + 1].len() {
            matches.push(BracketMatch::new(
                level as u32 + 1,
                index as u32 + 1,
                grid.levels[level][2 * index].clone(),
                grid.levels[level][2 * index + 1].clone(),
                grid.levels[level + 1][index].clone(),
                grid.node_id(level + 1, index).to_string(),
            ));
        }
    }

    let mut levels = grid.levels;
    let champion = levels.pop().and_then(|l| l.into_iter().next()).unwrap_or_default();
    BracketView {
        side,
        size,
        rounds: levels,
        champion,
        matches,
    }
}

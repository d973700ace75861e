//! Tournament history viewer: library with snapshot models, standings/bracket logic and stores.

pub mod config;
pub mod demo;
pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{Backend, ViewerConfig};
pub use logic::{
    assemble_bracket, assemble_first_round, build_seed_list, build_view, compute_standings,
    detect_bracket_size, group_visit_order, resolve_final_ranks, seed_positions, seeds_to_slots,
    BracketView, FinalRank, GroupStandings, ManualRankPolicy, Rank, SeedCandidate, SeedEntry,
    StandingRecord, TournamentView, ViewOptions,
};
pub use models::{
    pair_key, parse_score, BracketNodeId, BracketState, MatchResult, NodeValue, PlayerId,
    RecordedOutcome, Score, Side, Slot, Snapshot, Tournament, ViewerError,
};
pub use store::{load_or_demo, list_or_demo, MemoryStore, SnapshotStore, SnapshotSummary};

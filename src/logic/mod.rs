//! Read-only tournament logic: standings, ranks, seeding, bracket reconstruction.

mod bracket;
mod history;
mod ranks;
mod seeding;
mod standings;
mod view;

pub use bracket::{
    assemble_bracket, assemble_first_round, detect_bracket_size, round_count, BracketMatch,
    BracketView, Lane, MatchState, MAX_BRACKET_SIZE,
};
pub use history::{
    attendance_counts, head_to_head, top_n, win_counts, HeadToHead, HistoryEntry, HistoryMatch,
    Meeting,
};
pub use ranks::{resolve_final_ranks, FinalRank, ManualRankPolicy};
pub use seeding::{
    bracket_size_for, build_seed_list, group_visit_order, qualifiers, seed_positions,
    seeds_to_slots, Qualification, SeedCandidate, SeedEntry,
};
pub use standings::{compare_records, compute_standings, GroupStandings, Rank, StandingRecord};
pub use view::{
    build_view, bracket_section, group_view, standings_for, BracketSection, GroupView,
    TournamentView, ViewOptions,
};

//! Everything the renderer needs for one snapshot, computed from scratch on every call.

use crate::logic::bracket::{assemble_bracket, detect_bracket_size, BracketView};
use crate::logic::ranks::{resolve_final_ranks, FinalRank, ManualRankPolicy};
use crate::logic::seeding::{
    bracket_size_for, build_seed_list, qualifiers, seeds_to_slots, Qualification, SeedEntry,
};
use crate::logic::standings::{compute_standings, GroupStandings};
use crate::models::{FinalSummary, GroupId, Metadata, Player, Side, Tournament};
use serde::{Deserialize, Serialize};

/// Options that change how a snapshot is presented.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub manual_rank_policy: ManualRankPolicy,
    /// Smallest bracket drawn when detecting the size from recorded nodes.
    pub min_bracket_size: u32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            manual_rank_policy: ManualRankPolicy::default(),
            min_bracket_size: 8,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub number: u32,
    pub standings: GroupStandings,
    pub final_ranks: Vec<FinalRank>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSection {
    pub seeds: Vec<SeedEntry>,
    pub bracket: BracketView,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentView {
    pub metadata: Metadata,
    pub players: Vec<Player>,
    pub groups: Vec<GroupView>,
    pub upper: BracketSection,
    pub lower: BracketSection,
    pub final_summary: Option<FinalSummary>,
}

/// Standings of one group. An unknown group id yields empty standings.
pub fn standings_for(tournament: &Tournament, group_id: &str) -> GroupStandings {
    let members = tournament
        .group(group_id)
        .map(|g| g.members.as_slice())
        .unwrap_or(&[]);
    compute_standings(group_id, members, tournament.results(group_id))
}

pub fn group_view(tournament: &Tournament, group_id: &str, options: &ViewOptions) -> GroupView {
    let standings = standings_for(tournament, group_id);
    let final_ranks = resolve_final_ranks(
        &standings,
        tournament.manual_ranks(group_id),
        options.manual_rank_policy,
    );
    GroupView {
        id: group_id.to_string(),
        number: tournament.group(group_id).map(|g| g.number).unwrap_or(0),
        standings,
        final_ranks,
    }
}

/// Seed one bracket from the group ranks and reconcile it with the recorded bracket data.
pub fn bracket_section(
    tournament: &Tournament,
    groups: &[GroupView],
    side: Side,
    rule: Qualification,
    options: &ViewOptions,
) -> BracketSection {
    let ranks: Vec<(u32, Vec<FinalRank>)> = groups
        .iter()
        .map(|g| (g.number, g.final_ranks.clone()))
        .collect();
    let seeds = build_seed_list(&qualifiers(&ranks, rule), tournament.groups_count());

    let size = detect_bracket_size(&tournament.bracket, side, options.min_bracket_size)
        .max(bracket_size_for(seeds.len()));
    let seeded = if seeds.is_empty() {
        Vec::new()
    } else {
        seeds_to_slots(&seeds, size)
    };
    let bracket = assemble_bracket(&tournament.bracket, side, size, &seeded);
    BracketSection { seeds, bracket }
}

pub fn build_view(tournament: &Tournament, options: &ViewOptions) -> TournamentView {
    let groups: Vec<GroupView> = tournament
        .groups
        .iter()
        .map(|g| group_view(tournament, &g.id, options))
        .collect();
    let upper = bracket_section(tournament, &groups, Side::Upper, Qualification::UPPER, options);
    let lower = bracket_section(tournament, &groups, Side::Lower, Qualification::LOWER, options);
    TournamentView {
        metadata: tournament.metadata.clone(),
        players: tournament.players.clone(),
        groups,
        upper,
        lower,
        final_summary: tournament.final_summary.clone(),
    }
}

//! Bracket seeding: cross-group seed list and seed-to-slot mapping.
//!
//! Seeds are handed out rank tier by rank tier. Inside a tier groups are visited in
//! ascending order, except the second tier of a four-group field, which is visited as
//! 2, 1, 4, 3. Combined with the seed-position table this puts the two entrants of every
//! group into opposite halves of an eight-slot bracket.

use crate::logic::ranks::FinalRank;
use crate::models::{PlayerId, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bracket entrant before seeding.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedCandidate {
    pub player: PlayerId,
    /// 1-based group number.
    pub group: u32,
    /// Rank inside the group, normalised for the bracket (1 = best tier).
    pub internal_rank: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub player: PlayerId,
    pub group: u32,
    pub source_rank: u32,
    /// 1-based, contiguous.
    pub seed: u32,
}

/// Order in which groups are visited for one rank tier.
pub fn group_visit_order(rank: u32, group_count: u32) -> Vec<u32> {
    if rank == 2 && group_count == 4 {
        vec![2, 1, 4, 3]
    } else {
        (1..=group_count).collect()
    }
}

/// Build the seed list. Groups without an entrant at a tier are skipped without a gap.
/// Entrants whose group lies outside `1..=group_count` are never seeded.
pub fn build_seed_list(candidates: &[SeedCandidate], group_count: u32) -> Vec<SeedEntry> {
    let mut by_rank: BTreeMap<u32, Vec<&SeedCandidate>> = BTreeMap::new();
    for c in candidates {
        by_rank.entry(c.internal_rank).or_default().push(c);
    }

    let mut seeds = Vec::new();
    for (rank, tier) in by_rank {
        for group in group_visit_order(rank, group_count) {
            // First entrant wins when a group lists two players on the same tier.
            let mut same_group = tier.iter().filter(|c| c.group == group);
            let first = same_group.next();
            for dropped in same_group {
                log::debug!(
                    "Not seeding {}: group {} already has an entrant on tier {}",
                    dropped.player,
                    group,
                    rank
                );
            }
            if let Some(c) = first {
                seeds.push(SeedEntry {
                    player: c.player.clone(),
                    group: c.group,
                    source_rank: c.internal_rank,
                    seed: seeds.len() as u32 + 1,
                });
            }
        }
    }
    seeds
}

/// Seed number placed at each slot of a bracket of `size` slots.
///
/// Size 2 is `[1, 2]`, size 4 is `[1, 4, 3, 2]`; every larger size expands each seed `s`
/// of the half-size table into the pair `[s, size + 1 - s]`, so size 8 is
/// `[1, 8, 4, 5, 3, 6, 2, 7]`. `None` unless `size` is a power of two of at least 2.
pub fn seed_positions(size: u32) -> Option<Vec<u32>> {
    match size {
        2 => Some(vec![1, 2]),
        4 => Some(vec![1, 4, 3, 2]),
        n if n > 4 && n.is_power_of_two() => {
            let half = seed_positions(n / 2)?;
            Some(half.into_iter().flat_map(|s| [s, n + 1 - s]).collect())
        }
        _ => None,
    }
}

/// Smallest bracket (power of two, at least 2) that holds `entrants`.
pub fn bracket_size_for(entrants: usize) -> u32 {
    (entrants.max(2) as u32).next_power_of_two()
}

/// Place seeds onto slots. Seeds missing from the list become byes.
pub fn seeds_to_slots(seeds: &[SeedEntry], size: u32) -> Vec<Slot> {
    let Some(positions) = seed_positions(size) else {
        return Vec::new();
    };
    positions
        .into_iter()
        .map(|n| {
            seeds
                .iter()
                .find(|s| s.seed == n)
                .map(|s| Slot::Player(s.player.clone()))
                .unwrap_or(Slot::Bye)
        })
        .collect()
}

/// Which final ranks enter a bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub first_rank: u32,
    /// Inclusive; `None` takes everyone ranked from `first_rank` down.
    pub last_rank: Option<u32>,
}

impl Qualification {
    /// Group winners and runners-up.
    pub const UPPER: Qualification = Qualification {
        first_rank: 1,
        last_rank: Some(2),
    };
    /// Everyone from third place down.
    pub const LOWER: Qualification = Qualification {
        first_rank: 3,
        last_rank: None,
    };

    pub fn admits(&self, rank: u32) -> bool {
        rank >= self.first_rank && self.last_rank.map_or(true, |last| rank <= last)
    }

    /// Seeding tier of a group rank inside this bracket.
    pub fn normalise(&self, rank: u32) -> u32 {
        rank.saturating_sub(self.first_rank) + 1
    }
}

/// Collect seeding candidates from resolved group ranks. `groups` pairs each group
/// number with its final ranks; unranked players never qualify.
pub fn qualifiers(groups: &[(u32, Vec<FinalRank>)], rule: Qualification) -> Vec<SeedCandidate> {
    groups
        .iter()
        .flat_map(|(group, ranks)| {
            ranks.iter().filter_map(move |r| {
                let rank = r.final_rank.value().filter(|&n| rule.admits(n))?;
                Some(SeedCandidate {
                    player: r.player.clone(),
                    group: *group,
                    internal_rank: rule.normalise(rank),
                })
            })
        })
        .collect()
}

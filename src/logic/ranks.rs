//! Final ranks: automatic standings merged with manually entered overrides.

use crate::logic::standings::{GroupStandings, Rank};
use crate::models::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How manual overrides behave in a group where no game has been recorded yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualRankPolicy {
    /// Overrides are kept but render as "no rank" until the group has a result.
    #[default]
    SuppressUntilPlayed,
    /// Overrides always render as a placement.
    AlwaysShow,
}

impl ManualRankPolicy {
    /// Parse a config value: `suppress` or `show`.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "suppress" | "suppress_until_played" => Some(Self::SuppressUntilPlayed),
            "show" | "always_show" => Some(Self::AlwaysShow),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalRank {
    pub player: PlayerId,
    pub final_rank: Rank,
    /// The shown rank came from a manual override. False while overrides are suppressed.
    pub is_manual: bool,
}

/// Merge automatic ranks with overrides, in the standings' member order.
pub fn resolve_final_ranks(
    standings: &GroupStandings,
    manual: Option<&HashMap<PlayerId, u32>>,
    policy: ManualRankPolicy,
) -> Vec<FinalRank> {
    let suppressed = !standings.any_played && policy == ManualRankPolicy::SuppressUntilPlayed;
    standings
        .records
        .iter()
        .map(|record| {
            let manual_rank = manual.and_then(|m| m.get(&record.player)).copied();
            let final_rank = match manual_rank {
                _ if suppressed => Rank::Unranked,
                Some(r) => Rank::Ranked(r),
                None => record.rank,
            };
            FinalRank {
                player: record.player.clone(),
                final_rank,
                is_manual: manual_rank.is_some() && !suppressed,
            }
        })
        .collect()
}

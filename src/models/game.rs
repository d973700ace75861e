//! Round-robin match results: score strings and canonical pair keys.

use serde::{Deserialize, Serialize};

/// Separator joining the two player ids of a canonical pair key.
pub const PAIR_KEY_SEPARATOR: &str = "|||";

/// A recorded round-robin result, stored under the canonical pair key of its two players.
/// The score reads "X-Y" where X belongs to the lexicographically-first player of the key.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

impl MatchResult {
    pub fn new(score: impl Into<String>) -> Self {
        Self {
            score: Some(score.into()),
        }
    }
}

/// Parsed "A-B" score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    /// A score with equal sides cannot come from a finished match (no draws).
    pub fn is_decisive(&self) -> bool {
        self.a != self.b
    }

    /// The same score seen from the other player's side.
    pub fn flipped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

/// Parse a "A-B" score. `None` for empty input or anything that is not exactly two numbers.
pub fn parse_score(s: &str) -> Option<Score> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let (a, b) = s.split_once('-')?;
    if b.contains('-') {
        return None;
    }
    Some(Score {
        a: a.trim().parse().ok()?,
        b: b.trim().parse().ok()?,
    })
}

/// Canonical, order-independent key for a pair of players.
pub fn pair_key(p1: &str, p2: &str) -> String {
    let (first, second) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
    format!("{first}{PAIR_KEY_SEPARATOR}{second}")
}

/// Score of `player` against `opponent`, oriented so `a` is `player`'s side.
pub fn score_for(player: &str, opponent: &str, result: &MatchResult) -> Option<Score> {
    let score = parse_score(result.score.as_deref()?)?;
    if player <= opponent {
        Some(score)
    } else {
        Some(score.flipped())
    }
}

//! Built-in demo data: a fixed snapshot shown when the backend is unavailable, and a
//! random match history for the dashboard.

use crate::logic::{HistoryEntry, HistoryMatch};
use crate::models::{
    pair_key, GroupId, MatchResult, Metadata, NodeValue, Placement, PlayerState, RecordedOutcome,
    Snapshot,
};
use rand::seq::SliceRandom;
use rand::Rng;

const DEMO_GROUPS: [(&str, [(&str, u32); 4]); 4] = [
    ("team-0", [("박만영", 1), ("이정우", 5), ("김경태", 2), ("박병재", 1)]),
    ("team-1", [("안성대", 6), ("유호성", 2), ("조복연", 4), ("김미경", 7)]),
    ("team-2", [("김성호", 6), ("김세중", 6), ("김형찬", 1), ("김홍석", 6)]),
    ("team-3", [("류계열", 5), ("박덕례", 6), ("박혜란", 6), ("백낙천", 3)]),
];

/// Games as `(player, opponent, "player-opponent")`.
const DEMO_RESULTS: [(&str, [(&str, &str, &str); 6]); 4] = [
    (
        "team-0",
        [
            ("박만영", "이정우", "2-0"),
            ("박만영", "김경태", "2-1"),
            ("박만영", "박병재", "2-0"),
            ("김경태", "이정우", "2-0"),
            ("김경태", "박병재", "2-1"),
            ("박병재", "이정우", "2-1"),
        ],
    ),
    (
        "team-1",
        [
            ("유호성", "안성대", "2-1"),
            ("유호성", "조복연", "2-0"),
            ("유호성", "김미경", "2-0"),
            ("안성대", "조복연", "2-1"),
            ("안성대", "김미경", "2-0"),
            ("조복연", "김미경", "2-1"),
        ],
    ),
    (
        "team-2",
        [
            ("김형찬", "김성호", "2-1"),
            ("김형찬", "김세중", "2-0"),
            ("김형찬", "김홍석", "2-0"),
            ("김성호", "김세중", "2-1"),
            ("김성호", "김홍석", "2-0"),
            ("김세중", "김홍석", "2-1"),
        ],
    ),
    (
        "team-3",
        [
            ("백낙천", "류계열", "2-1"),
            ("백낙천", "박덕례", "2-0"),
            ("백낙천", "박혜란", "2-0"),
            ("류계열", "박덕례", "2-0"),
            ("류계열", "박혜란", "2-1"),
            // Not played yet.
            ("박덕례", "박혜란", ""),
        ],
    ),
];

/// Store a game under its canonical key, with the score turned to the key's order.
fn keyed_result(player: &str, opponent: &str, score: &str) -> Option<(String, MatchResult)> {
    if score.is_empty() {
        return None;
    }
    let key = pair_key(player, opponent);
    let score = if player <= opponent {
        score.to_string()
    } else {
        score.split('-').rev().collect::<Vec<_>>().join("-")
    };
    Some((key, MatchResult::new(score)))
}

/// Fixed demo snapshot: four groups of four, one unfinished group, a partly played upper bracket.
pub fn demo_snapshot() -> Snapshot {
    let mut players_state: Vec<(String, PlayerState)> = DEMO_GROUPS
        .iter()
        .flat_map(|(group, members)| {
            members.iter().map(move |(name, grade)| {
                (
                    name.to_string(),
                    PlayerState {
                        placement: Placement::Team,
                        team_id: Some(group.to_string()),
                        grade: Some(*grade),
                    },
                )
            })
        })
        .collect();
    players_state.push((
        "서상국".to_string(),
        PlayerState {
            placement: Placement::Pool,
            team_id: None,
            grade: Some(4),
        },
    ));

    let results_by_team: Vec<(GroupId, Vec<(String, MatchResult)>)> = DEMO_RESULTS
        .iter()
        .map(|(group, games)| {
            let games = games
                .iter()
                .filter_map(|(p, o, s)| keyed_result(p, o, s))
                .collect();
            (group.to_string(), games)
        })
        .collect();

    let outcome = |p1: &str, p2: &str, winner: Option<&str>| {
        NodeValue::Outcome(RecordedOutcome {
            p1: Some(p1.to_string()),
            p2: Some(p2.to_string()),
            winner: winner.map(str::to_string),
        })
    };
    let bracket_state = vec![
        ("U-r2-1".to_string(), outcome("박만영", "김성호", Some("박만영"))),
        ("U-r2-2".to_string(), outcome("백낙천", "안성대", Some("안성대"))),
        ("U-r2-3".to_string(), outcome("김형찬", "김경태", None)),
    ];

    Snapshot {
        metadata: Metadata {
            title: "정기모임 (데모)".to_string(),
            date: "2026-01-14".to_string(),
            match_format: "bo3".to_string(),
            groups_count: Some(DEMO_GROUPS.len() as u32),
        },
        players_state,
        results_by_team,
        manual_rank_by_team: Vec::new(),
        bracket_state,
        final_summary: None,
    }
}

fn entry(
    date: &str,
    winner: &str,
    runner_up: &str,
    lower: (&str, &str),
    participants: u32,
    kind: &str,
) -> HistoryEntry {
    HistoryEntry {
        date: date.to_string(),
        winner: Some(winner.to_string()),
        runner_up: Some(runner_up.to_string()),
        winner_lower: Some(lower.0.to_string()),
        runner_up_lower: Some(lower.1.to_string()),
        participants,
        kind: kind.to_string(),
    }
}

/// Summary of past meetings, oldest first.
pub fn demo_history() -> Vec<HistoryEntry> {
    vec![
        entry("2025-10-15", "박만영", "김경태", ("강희철", "김미경"), 24, "정기모임"),
        entry("2025-10-22", "이정우", "박병재", ("김성호", "김세중"), 20, "번개"),
        entry("2025-10-29", "김경태", "안성대", ("김순동", "김영민"), 22, "정기모임"),
        entry("2025-11-05", "박만영", "이정우", ("김형찬", "김홍석"), 25, "정기모임"),
        entry("2025-11-12", "유호성", "조복연", ("류계열", "류성문"), 18, "번개"),
        entry("2025-11-19", "박병재", "강희철", ("박덕례", "박수용"), 21, "정기모임"),
        entry("2025-11-26", "안성대", "김미경", ("박혜란", "백낙천"), 23, "정기모임"),
        entry("2025-12-03", "박만영", "김경태", ("서상국", "송광용"), 26, "월례대회"),
        entry("2025-12-31", "김형찬", "박만영", ("정경자", "정선철"), 30, "송년회"),
        entry("2026-01-14", "박만영", "홍길동", ("김미경", "김성호"), 24, "정기모임"),
    ]
}

/// Random games for each date: 15 to 24 games between distinct players, best of three.
/// Fewer than two players yields no games.
pub fn mock_matches<R: Rng>(rng: &mut R, players: &[&str], dates: &[&str]) -> Vec<HistoryMatch> {
    let mut out = Vec::new();
    if players.len() < 2 {
        return out;
    }
    for date in dates {
        let games = rng.gen_range(15..25);
        for _ in 0..games {
            let pair: Vec<&&str> = players.choose_multiple(rng, 2).collect();
            let (p1, p2) = (pair[0].to_string(), pair[1].to_string());
            let roll: f64 = rng.gen();
            let (score, p1_wins) = if roll < 0.3 {
                ("2-0", true)
            } else if roll < 0.6 {
                ("0-2", false)
            } else if roll < 0.8 {
                ("2-1", true)
            } else {
                ("1-2", false)
            };
            let winner = if p1_wins { p1.clone() } else { p2.clone() };
            out.push(HistoryMatch {
                date: date.to_string(),
                p1,
                p2,
                score: score.to_string(),
                winner,
            });
        }
    }
    out
}

//! Integration tests for the cross-tournament history dashboard.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tournament_history_viewer::demo::{demo_history, mock_matches};
use tournament_history_viewer::logic::{
    attendance_counts, head_to_head, top_n, win_counts, HistoryMatch,
};

fn game(date: &str, p1: &str, p2: &str, score: &str, winner: &str) -> HistoryMatch {
    HistoryMatch {
        date: date.to_string(),
        p1: p1.to_string(),
        p2: p2.to_string(),
        score: score.to_string(),
        winner: winner.to_string(),
    }
}

#[test]
fn title_counts_follow_the_picked_field() {
    let history = demo_history();
    let wins = win_counts(&history, |e| e.winner.as_ref());
    assert_eq!(wins.get("박만영"), Some(&4));
    assert_eq!(wins.values().sum::<u32>(), history.len() as u32);

    let lower = win_counts(&history, |e| e.winner_lower.as_ref());
    assert_eq!(lower.get("김형찬"), Some(&1));
    assert_eq!(lower.get("박만영"), None);
}

#[test]
fn leaderboard_orders_by_count_then_name() {
    let history = demo_history();
    let top = top_n(&win_counts(&history, |e| e.winner.as_ref()), 3);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0], ("박만영".to_string(), 4));
    assert!(top[1].1 == 1 && top[2].1 == 1);
    assert!(top[1].0 < top[2].0);
}

#[test]
fn attendance_counts_distinct_dates() {
    let matches = vec![
        game("2025-10-01", "A", "B", "2-0", "A"),
        game("2025-10-01", "A", "C", "2-1", "A"),
        game("2025-10-08", "B", "A", "2-0", "B"),
    ];
    let counts = attendance_counts(&matches);
    assert_eq!(counts.get("A"), Some(&2));
    assert_eq!(counts.get("B"), Some(&2));
    assert_eq!(counts.get("C"), Some(&1));
}

#[test]
fn head_to_head_is_seen_from_the_first_player() {
    let matches = vec![
        game("2025-10-01", "A", "B", "2-0", "A"),
        game("2025-11-01", "B", "A", "2-1", "B"),
        game("2025-10-15", "A", "B", "1-2", "B"),
        game("2025-10-20", "A", "C", "2-0", "A"),
        game("2025-10-21", "A", "B", "", "A"),
    ];
    let h2h = head_to_head(&matches, "A", "B");
    assert_eq!(h2h.player, "A");
    assert_eq!(h2h.opponent, "B");
    assert_eq!((h2h.wins, h2h.losses), (1, 2));
    let dates: Vec<&str> = h2h.meetings.iter().map(|m| m.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-11-01", "2025-10-15", "2025-10-01"]);
    // B's 2-1 win reads 1-2 from A's side.
    assert_eq!(h2h.meetings[0].score, (1, 2));
    assert!(!h2h.meetings[0].won);

    let reverse = head_to_head(&matches, "B", "A");
    assert_eq!((reverse.wins, reverse.losses), (2, 1));
    assert_eq!(reverse.meetings[0].score, (2, 1));
}

#[test]
fn head_to_head_without_meetings_is_empty() {
    let h2h = head_to_head(&[], "A", "B");
    assert_eq!((h2h.wins, h2h.losses), (0, 0));
    assert!(h2h.meetings.is_empty());
}

#[test]
fn mock_matches_are_reproducible_and_well_formed() {
    let players = ["A", "B", "C", "D", "E"];
    let dates = ["2025-10-01", "2025-10-08"];
    let first = mock_matches(&mut StdRng::seed_from_u64(7), &players, &dates);
    let second = mock_matches(&mut StdRng::seed_from_u64(7), &players, &dates);
    assert_eq!(first, second);

    for d in dates {
        let n = first.iter().filter(|m| m.date == d).count();
        assert!((15..25).contains(&n), "{} games on {}", n, d);
    }
    let scores: BTreeSet<&str> = ["2-0", "0-2", "2-1", "1-2"].into_iter().collect();
    for m in &first {
        assert_ne!(m.p1, m.p2);
        assert!(scores.contains(m.score.as_str()));
        let p1_won = m.score.starts_with('2');
        assert_eq!(m.winner, if p1_won { m.p1.clone() } else { m.p2.clone() });
    }
}

#[test]
fn mock_matches_need_two_players() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(mock_matches(&mut rng, &["A"], &["2025-10-01"]).is_empty());
}

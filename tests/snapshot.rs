//! Integration tests for snapshot decoding, the computed view, stores and export.

use tournament_history_viewer::demo::demo_snapshot;
use tournament_history_viewer::export::standings_csv;
use tournament_history_viewer::logic::MatchState;
use tournament_history_viewer::store::DirectoryStore;
use tournament_history_viewer::{
    build_view, list_or_demo, load_or_demo, ManualRankPolicy, MemoryStore, Rank, Side, Slot,
    Snapshot, SnapshotStore, SnapshotSummary, Tournament, ViewOptions, ViewerError,
};

const SAMPLE: &str = r#"{
  "metadata": {"title": "Weekly", "date": "2025-11-05", "groupsCount": 2},
  "playersState": [
    ["Ann", {"where": "team", "teamId": "team-1", "grade": 3}],
    ["Bob", {"where": "team", "teamId": "team-1"}],
    ["Cid", {"where": "team", "teamId": "team-0"}],
    ["Dee", {"where": "team", "teamId": "team-0"}],
    ["Eve", {"where": "pool"}],
    ["Fay", {"where": "bench", "teamId": "team-0"}]
  ],
  "resultsByTeam": [
    ["team-0", [["Cid|||Dee", {"score": "0-2"}]]],
    ["team-1", [["Ann|||Bob", {"score": ""}]]]
  ],
  "manualRankByTeam": [
    ["team-1", [["Bob", 1], ["Ann", null]]]
  ],
  "bracketState": [
    ["U-r2-1", {"p1": "Dee", "p2": "Ann", "winner": "Dee"}],
    ["U-r1-4", "BYE"],
    ["U-sf-1", "Nobody"]
  ],
  "finalSummary": {
    "upper": {"winner": "Dee", "runnerUp": "Ann", "semiFinalists": ["Bob", "Cid"]},
    "lower": {"winner": "Eve"}
  }
}"#;

fn sample() -> Snapshot {
    Snapshot::from_json(SAMPLE).unwrap()
}

#[test]
fn snapshot_decodes_pair_lists() {
    let s = sample();
    assert_eq!(s.metadata.match_format, "bo3");
    assert_eq!(s.metadata.groups_count, Some(2));
    assert_eq!(s.players_state.len(), 6);
    assert_eq!(s.bracket_state.len(), 3);
    let summary = s.final_summary.unwrap();
    assert_eq!(summary.upper.third.unwrap().names(), vec!["Bob", "Cid"]);
    assert_eq!(summary.lower.runner_up, None);
}

#[test]
fn malformed_snapshot_is_an_error() {
    assert!(matches!(
        Snapshot::from_json("{\"playersState\": 3}"),
        Err(ViewerError::MalformedSnapshot(_))
    ));
}

#[test]
fn tournament_groups_members_in_snapshot_order() {
    let t = Tournament::from_snapshot(&sample());
    let ids: Vec<&str> = t.groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["team-0", "team-1"]);
    assert_eq!(t.groups[0].members, vec!["Cid", "Dee"]);
    assert_eq!(t.groups[1].members, vec!["Ann", "Bob"]);
    assert_eq!(t.groups[1].number, 2);
    // Only "team" placements join a group.
    assert!(t.player("Fay").unwrap().group.is_none());
    assert_eq!(t.player("Ann").unwrap().grade, Some(3));
    // Null override is dropped; malformed node id is skipped.
    assert_eq!(t.manual_ranks("team-1").unwrap().len(), 1);
    assert_eq!(t.groups_count(), 2);
}

#[test]
fn view_ranks_played_group_and_leaves_unplayed_group_unranked() {
    let t = Tournament::from_snapshot(&sample());
    let view = build_view(&t, &ViewOptions::default());

    let g0 = &view.groups[0];
    assert!(g0.standings.any_played);
    let dee = g0.final_ranks.iter().find(|r| r.player == "Dee").unwrap();
    assert_eq!(dee.final_rank, Rank::Ranked(1));

    // team-1 has no countable result; Bob's override stays hidden by default.
    let g1 = &view.groups[1];
    assert!(!g1.standings.any_played);
    assert!(g1.final_ranks.iter().all(|r| r.final_rank == Rank::Unranked));

    let shown = build_view(
        &t,
        &ViewOptions {
            manual_rank_policy: ManualRankPolicy::AlwaysShow,
            ..ViewOptions::default()
        },
    );
    let bob = shown.groups[1].final_ranks.iter().find(|r| r.player == "Bob").unwrap();
    assert_eq!(bob.final_rank, Rank::Ranked(1));
}

#[test]
fn view_reconciles_recorded_bracket_with_seeds() {
    let t = Tournament::from_snapshot(&sample());
    let view = build_view(&t, &ViewOptions::default());
    let upper = &view.upper.bracket;
    assert_eq!(upper.side, Side::Upper);
    assert_eq!(upper.size, 8);
    // Only team-0 is ranked: Dee seed 1, Cid seed 2.
    let seeds: Vec<&str> = view.upper.seeds.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(seeds, vec!["Dee", "Cid"]);
    let first = upper.first_round();
    assert_eq!(first[0], Slot::Player("Dee".to_string()));
    assert_eq!(first[1], Slot::Player("Ann".to_string()));
    assert_eq!(first[3], Slot::Bye);
    assert_eq!(upper.matches[0].state, MatchState::Decided);
    assert!(view.lower.seeds.is_empty());
}

#[test]
fn view_is_idempotent() {
    let t = Tournament::from_snapshot(&sample());
    let options = ViewOptions::default();
    assert_eq!(build_view(&t, &options), build_view(&t, &options));
}

#[test]
fn demo_snapshot_separates_groups_in_upper_bracket() {
    let t = Tournament::from_snapshot(&demo_snapshot());
    let view = build_view(&t, &ViewOptions::default());
    assert_eq!(view.groups.len(), 4);
    assert_eq!(view.upper.seeds.len(), 8);
    let first = view.upper.bracket.first_round();
    for group in &t.groups {
        let top = first[..4]
            .iter()
            .filter(|s| s.player().map_or(false, |p| group.members.iter().any(|m| m == p)))
            .count();
        assert_eq!(top, 1, "{}", group.id);
    }
    assert_eq!(first[0], Slot::Player("박만영".to_string()));
    assert_eq!(view.upper.bracket.rounds[1][1], Slot::Player("안성대".to_string()));
}

#[test]
fn memory_store_lists_latest_first_and_replaces_dates() {
    let mut older = sample();
    older.metadata.date = "2025-10-01".to_string();
    let newer = sample();
    let mut store = MemoryStore::with_snapshots([older, newer]);
    let list = store.list_snapshots().unwrap();
    assert_eq!(list[0].date, "2025-11-05");
    assert_eq!(list[1].date, "2025-10-01");

    let mut replaced = sample();
    replaced.metadata.title = "Replaced".to_string();
    store.insert(replaced);
    let list = store.list_snapshots().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "Replaced");
    assert!(store.get_snapshot("1999-01-01").unwrap().is_none());
}

struct FailingStore;

impl SnapshotStore for FailingStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, ViewerError> {
        Err(ViewerError::UpstreamUnavailable("offline".to_string()))
    }

    fn get_snapshot(&self, _date: &str) -> Result<Option<Snapshot>, ViewerError> {
        Err(ViewerError::UpstreamUnavailable("offline".to_string()))
    }
}

#[test]
fn unavailable_backend_falls_back_to_demo() {
    let loaded = load_or_demo(&FailingStore, "2025-11-05").unwrap();
    assert_eq!(loaded.value, demo_snapshot());
    assert!(loaded.warning.unwrap().contains("offline"));

    let list = list_or_demo(&FailingStore);
    assert_eq!(list.value.len(), 1);
    assert!(list.warning.is_some());
}

#[test]
fn unknown_date_is_not_replaced_by_demo() {
    let store = MemoryStore::with_snapshots([sample()]);
    assert!(matches!(
        load_or_demo(&store, "1999-01-01"),
        Err(ViewerError::SnapshotNotFound(_))
    ));
    let loaded = load_or_demo(&store, "2025-11-05").unwrap();
    assert!(loaded.warning.is_none());
}

#[test]
fn directory_store_reads_json_files() {
    let dir = std::env::temp_dir().join(format!("thv-store-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut older = sample();
    older.metadata.date = String::new();
    std::fs::write(dir.join("2025-10-01.json"), older.to_json().unwrap()).unwrap();
    std::fs::write(dir.join("latest.json"), SAMPLE).unwrap();
    std::fs::write(dir.join("broken.json"), "{").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let store = DirectoryStore::new(&dir);
    let list = store.list_snapshots().unwrap();
    let dates: Vec<&str> = list.iter().map(|s| s.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-11-05", "2025-10-01"]);
    assert!(store.get_snapshot("2025-10-01").unwrap().is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn standings_export_has_one_row_per_player() {
    let t = Tournament::from_snapshot(&sample());
    let csv = standings_csv(&build_view(&t, &ViewOptions::default())).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "date,name,group,rank,points,detail");
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"2025-11-05,Dee,1,1,1,1W 0L (2-0)"));
    assert!(lines.contains(&"2025-11-05,Ann,2,,0,0W 0L (0-0)"));
}

#[test]
fn groups_beyond_metadata_count_are_still_seeded() {
    let json = r#"{
      "metadata": {"date": "2025-12-01", "groupsCount": 2},
      "playersState": [
        ["A1", {"where": "team", "teamId": "team-0"}],
        ["A2", {"where": "team", "teamId": "team-0"}],
        ["B1", {"where": "team", "teamId": "team-1"}],
        ["B2", {"where": "team", "teamId": "team-1"}],
        ["C1", {"where": "team", "teamId": "team-2"}],
        ["C2", {"where": "team", "teamId": "team-2"}]
      ],
      "resultsByTeam": [
        ["team-0", [["A1|||A2", {"score": "2-0"}]]],
        ["team-1", [["B1|||B2", {"score": "2-1"}]]],
        ["team-2", [["C1|||C2", {"score": "2-0"}]]]
      ]
    }"#;
    let t = Tournament::from_snapshot(&Snapshot::from_json(json).unwrap());
    assert_eq!(t.groups_count(), 3);
    let view = build_view(&t, &ViewOptions::default());
    let seeds: Vec<&str> = view.upper.seeds.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(seeds, vec!["A1", "B1", "C1", "A2", "B2", "C2"]);
}

#[test]
fn oversized_minimum_still_draws_a_bracket() {
    let t = Tournament::from_snapshot(&sample());
    let options = ViewOptions {
        min_bracket_size: 2048,
        ..ViewOptions::default()
    };
    let view = build_view(&t, &options);
    assert_eq!(view.upper.bracket.size, 1024);
    assert_eq!(view.upper.bracket.rounds.len(), 10);
    assert_eq!(view.upper.bracket.first_round()[0], Slot::Player("Dee".to_string()));
}

#[test]
fn memory_store_lists_by_date_not_insertion() {
    let mut older = sample();
    older.metadata.date = "2025-10-01".to_string();
    let store = MemoryStore::with_snapshots([sample(), older]);
    let dates: Vec<String> = store
        .list_snapshots()
        .unwrap()
        .into_iter()
        .map(|s| s.date)
        .collect();
    assert_eq!(dates, vec!["2025-11-05", "2025-10-01"]);
}

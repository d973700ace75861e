//! Single binary web server: read-only tournament views over REST, static assets from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT; choose the snapshot
//! backend with SNAPSHOT_BACKEND_URL or SNAPSHOT_DIR (see `ViewerConfig::from_env`).

use actix_files::Files;
use actix_web::{
    get,
    web::{self, Data, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tournament_history_viewer::demo::{demo_history, demo_snapshot, mock_matches};
use tournament_history_viewer::export::standings_csv;
use tournament_history_viewer::logic::{
    attendance_counts, head_to_head, top_n, win_counts, HistoryEntry, HistoryMatch,
};
use tournament_history_viewer::{
    build_view, list_or_demo, load_or_demo, SnapshotStore, SnapshotSummary, Tournament, TournamentView,
    ViewOptions, ViewerConfig, ViewerError,
};

/// Shared, read-only application state.
struct AppState {
    store: Arc<dyn SnapshotStore>,
    view: ViewOptions,
    history: Vec<HistoryEntry>,
    history_matches: Vec<HistoryMatch>,
}

type SharedState = Data<AppState>;

/// Number of entries in each leaderboard.
const LEADERBOARD_SIZE: usize = 10;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ListResponse {
    snapshots: Vec<SnapshotSummary>,
    warning: Option<String>,
}

#[derive(Serialize)]
struct ViewResponse {
    #[serde(flatten)]
    view: TournamentView,
    /// Set when the demo snapshot replaced an unavailable backend.
    warning: Option<String>,
}

#[derive(Serialize)]
struct HistoryResponse<'a> {
    entries: &'a [HistoryEntry],
    total_tournaments: usize,
    total_matches: usize,
    total_players: usize,
    wins: Vec<(String, u32)>,
    wins_lower: Vec<(String, u32)>,
    runners_up_lower: Vec<(String, u32)>,
    attendance: Vec<(String, u32)>,
}

/// Path segment: snapshot date (e.g. /api/snapshots/{date})
#[derive(Deserialize)]
struct SnapshotPath {
    date: String,
}

#[derive(Deserialize)]
struct HeadToHeadQuery {
    #[serde(default)]
    p1: String,
    #[serde(default)]
    p2: String,
}

fn error_response(e: &ViewerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ViewerError::SnapshotNotFound(_) => HttpResponse::NotFound().json(body),
        ViewerError::UpstreamUnavailable(_) => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Run a blocking store call off the async workers.
async fn with_store<T, F>(state: &SharedState, f: F) -> Result<T, ViewerError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SnapshotStore) -> Result<T, ViewerError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ViewerError::Io(e.to_string()))?
}

/// Load a snapshot (or the demo fallback) and compute its view.
async fn load_view(state: &SharedState, date: String) -> Result<ViewResponse, ViewerError> {
    let loaded = with_store(state, move |store| load_or_demo(store, &date)).await?;
    let view = build_view(&Tournament::from_snapshot(&loaded.value), &state.view);
    Ok(ViewResponse {
        view,
        warning: loaded.warning,
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-history-viewer",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// List stored snapshots, most recent first.
#[get("/api/snapshots")]
async fn api_list_snapshots(state: SharedState) -> HttpResponse {
    match with_store(&state, |store| Ok(list_or_demo(store))).await {
        Ok(loaded) => HttpResponse::Ok().json(ListResponse {
            snapshots: loaded.value,
            warning: loaded.warning,
        }),
        Err(e) => error_response(&e),
    }
}

/// Standings, seeds and brackets of one snapshot.
#[get("/api/snapshots/{date}")]
async fn api_get_view(state: SharedState, path: Path<SnapshotPath>) -> HttpResponse {
    match load_view(&state, path.into_inner().date).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(&e),
    }
}

/// The stored snapshot document as-is (no demo fallback).
#[get("/api/snapshots/{date}/raw")]
async fn api_get_raw(state: SharedState, path: Path<SnapshotPath>) -> HttpResponse {
    let date = path.into_inner().date;
    let result = with_store(&state, move |store| {
        store
            .get_snapshot(&date)?
            .ok_or(ViewerError::SnapshotNotFound(date))
    })
    .await;
    match result {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => error_response(&e),
    }
}

/// Group standings of one snapshot as CSV.
#[get("/api/snapshots/{date}/standings.csv")]
async fn api_standings_csv(state: SharedState, path: Path<SnapshotPath>) -> HttpResponse {
    let resp = match load_view(&state, path.into_inner().date).await {
        Ok(resp) => resp,
        Err(e) => return error_response(&e),
    };
    match standings_csv(&resp.view) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// Dashboard numbers across past tournaments.
#[get("/api/history")]
async fn api_history(state: SharedState) -> HttpResponse {
    let entries = &state.history;
    let matches = &state.history_matches;
    let players: BTreeSet<&str> = matches
        .iter()
        .flat_map(|m| [m.p1.as_str(), m.p2.as_str()])
        .collect();
    HttpResponse::Ok().json(HistoryResponse {
        entries,
        total_tournaments: entries.len(),
        total_matches: matches.len(),
        total_players: players.len(),
        wins: top_n(&win_counts(entries, |e| e.winner.as_ref()), LEADERBOARD_SIZE),
        wins_lower: top_n(&win_counts(entries, |e| e.winner_lower.as_ref()), LEADERBOARD_SIZE),
        runners_up_lower: top_n(
            &win_counts(entries, |e| e.runner_up_lower.as_ref()),
            LEADERBOARD_SIZE,
        ),
        attendance: top_n(&attendance_counts(matches), LEADERBOARD_SIZE),
    })
}

/// Head-to-head record between two different players.
#[get("/api/history/h2h")]
async fn api_head_to_head(state: SharedState, query: Query<HeadToHeadQuery>) -> HttpResponse {
    let (p1, p2) = (query.p1.trim(), query.p2.trim());
    if p1.is_empty() || p2.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Select two players" }));
    }
    if p1 == p2 {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Select two different players" }));
    }
    HttpResponse::Ok().json(head_to_head(&state.history_matches, p1, p2))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ViewerConfig::from_env();
    log::info!("Snapshot backend: {:?}", config.backend);
    log::info!("Manual rank policy: {:?}", config.view.manual_rank_policy);

    let history = demo_history();
    let demo = demo_snapshot();
    let players: Vec<&str> = demo.players_state.iter().map(|(name, _)| name.as_str()).collect();
    let dates: Vec<&str> = history.iter().map(|e| e.date.as_str()).collect();
    let history_matches = mock_matches(&mut rand::thread_rng(), &players, &dates);

    let state = Data::new(AppState {
        store: Arc::from(config.open_store()),
        view: config.view,
        history,
        history_matches,
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_snapshots)
            .service(api_get_raw)
            .service(api_standings_csv)
            .service(api_get_view)
            .service(api_history)
            .service(api_head_to_head)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/index.html"))
}

//! Single binary web server: bracket page from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_manager_web::{
    init_bracket_with, parse_entrants, randomise_entrants, select_winner, undo, BracketEngine,
    BracketError, BracketId, ByePlacement, SlotPosition,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-bracket entry: engine + last activity time (for auto-cleanup).
struct BracketEntry {
    engine: BracketEngine,
    last_activity: Instant,
}

/// In-memory state: many brackets by ID (sessioned). Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<BracketId, BracketEntry>>>;

/// Inactivity threshold: brackets not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// How often the cleanup task sweeps for inactive brackets.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct StartBody {
    /// Raw textarea content, one entrant per line.
    entrants: String,
    #[serde(default)]
    byes: ByePlacement,
}

#[derive(Deserialize)]
struct RandomiseBody {
    entrants: String,
}

#[derive(Serialize)]
struct RandomiseResponse {
    entrants: String,
    message: &'static str,
}

#[derive(Deserialize)]
struct SelectWinnerBody {
    round: usize,
    #[serde(rename = "match")]
    match_index: usize,
    slot: SlotPosition,
}

/// Path segment: bracket id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: BracketId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No bracket" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Map an engine result to a response. Invalid selections and empty undo are ignored silently.
fn respond(engine: &BracketEngine, result: Result<(), BracketError>) -> HttpResponse {
    match result {
        Ok(()) | Err(BracketError::InvalidSelection { .. }) | Err(BracketError::EmptyUndo) => {
            HttpResponse::Ok().json(engine.view())
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Run `op` on the bracket with `id`, refreshing its activity time.
fn with_engine(
    state: &AppState,
    id: BracketId,
    op: impl FnOnce(&mut BracketEngine) -> Result<(), BracketError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let result = op(&mut entry.engine);
    respond(&entry.engine, result)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-manager-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new bracket session (returns its view with id; client stores id for subsequent requests).
#[post("/api/brackets")]
async fn api_create_bracket(state: AppState) -> HttpResponse {
    let engine = BracketEngine::new();
    let view = engine.view();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        engine.id,
        BracketEntry {
            engine,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(view)
}

/// Get a bracket by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_engine(&state, path.id, |_| Ok(()))
}

/// Shuffle the entrant text. Stateless: the client writes the result back into its textarea.
#[post("/api/brackets/randomise")]
async fn api_randomise(body: Json<RandomiseBody>) -> HttpResponse {
    match randomise_entrants(&body.entrants) {
        Ok(entrants) => HttpResponse::Ok().json(RandomiseResponse {
            entrants,
            message: "Player order randomised.",
        }),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Start (or restart) the bracket from newline-separated entrant names.
#[post("/api/brackets/{id}/start")]
async fn api_start_bracket(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<StartBody>,
) -> HttpResponse {
    let entrants = parse_entrants(&body.entrants);
    with_engine(&state, path.id, |engine| {
        init_bracket_with(engine, &entrants, body.byes)
    })
}

/// Mark one slot of one match as the winner.
#[put("/api/brackets/{id}/winner")]
async fn api_select_winner(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<SelectWinnerBody>,
) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        select_winner(engine, body.round, body.match_index, body.slot)
    })
}

/// Undo the latest winner selection.
#[post("/api/brackets/{id}/undo")]
async fn api_undo(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_engine(&state, path.id, undo)
}

/// Register the page and every API route.
fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index_async))
        .service(api_health)
        .service(favicon)
        .service(api_create_bracket)
        .service(api_randomise)
        .service(api_get_bracket)
        .service(api_start_bracket)
        .service(api_select_winner)
        .service(api_undo);
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<BracketId, BracketEntry>::new()));

    // Background task: every 30 minutes, remove brackets inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive bracket(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

use std::sync::RwLockReadGuard;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::army::Army;
use crate::data::dataset::DatasetKey;
use crate::data::detachment::Detachment;
use crate::data::library::Library;
use crate::data::resolver::sorted_armies;
use crate::data::source::DocumentSource;
use crate::data::strategem::{Strategem, Turn};
use crate::glossary;
use crate::scoreboard::{ScoreCategory, Scoreboard};
use crate::server::AppState;
use crate::summary::{army_strategems as resolve_strategems, group_by_turn, summarize_unit, unit_detail, TurnGroups};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = serde_json::json!({ "status": "error", "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

/// Payloads borrow from the library, so they are rendered before the read guard drops.
fn payload<T: Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|err| ApiError::Internal(format!("failed to serialize payload: {err}")))
}

fn read_library(state: &AppState) -> RwLockReadGuard<'_, Library> {
    state.library.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn army_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("army '{id}' not found"))
}

pub async fn health() -> ApiResult {
    payload(&serde_json::json!({
        "status": "ok",
        "service": "muster-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub source: String,
    pub loaded: Vec<DatasetKey>,
    pub missing: Vec<DatasetKey>,
    pub complete: bool,
    pub last_refresh: Option<String>,
}

pub async fn status(State(state): State<AppState>) -> ApiResult {
    let library = read_library(&state);
    let loaded = library.loaded_keys();
    let missing = DatasetKey::ALL
        .into_iter()
        .filter(|key| !loaded.contains(key))
        .collect();
    payload(&StatusResponse {
        status: "ok",
        source: state.loader.source().describe(),
        complete: library.is_complete(),
        loaded,
        missing,
        last_refresh: state.loader.cache().last_refresh().map(|at| at.to_rfc3339()),
    })
}

#[derive(Debug, Serialize)]
pub struct ArmyMenuItem<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub faction: &'a str,
    pub category: &'a str,
}

impl<'a> From<&'a Army> for ArmyMenuItem<'a> {
    fn from(army: &'a Army) -> Self {
        ArmyMenuItem {
            id: &army.id,
            name: &army.name,
            faction: &army.faction,
            category: &army.category,
        }
    }
}

pub async fn armies(State(state): State<AppState>) -> ApiResult {
    let library = read_library(&state);
    let menu: Vec<ArmyMenuItem<'_>> = sorted_armies(library.armies())
        .into_iter()
        .map(ArmyMenuItem::from)
        .collect();
    payload(&menu)
}

#[derive(Debug, Serialize)]
pub struct ArmyPage<'a> {
    pub army: &'a Army,
    pub detachment: Option<&'a Detachment>,
}

pub async fn army(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let library = read_library(&state);
    let army = library.army(&id).ok_or_else(|| army_not_found(&id))?;
    payload(&ArmyPage {
        army,
        detachment: library.detachment_for(Some(army)),
    })
}

pub async fn army_units(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let library = read_library(&state);
    let army = library.army(&id).ok_or_else(|| army_not_found(&id))?;
    let settings = library.settings_or_default();
    let summaries: Vec<_> = library
        .units_for(Some(army))
        .into_iter()
        .map(|unit| summarize_unit(unit, &settings))
        .collect();
    payload(&summaries)
}

#[derive(Debug, Deserialize)]
pub struct StrategemQuery {
    pub turn: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StrategemsResponse<'a> {
    pub army: &'a str,
    pub turn: Option<Turn>,
    pub strategems: Vec<&'a Strategem>,
    /// Only present when no turn filter was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<TurnGroups<'a>>,
}

pub async fn army_strategems(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StrategemQuery>,
) -> ApiResult {
    let turn = match query.turn.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => None,
        Some(raw) => Some(Turn::parse_filter(raw).ok_or_else(|| {
            ApiError::BadRequest(format!("invalid turn '{raw}', expected 'your' or 'opponent'"))
        })?),
    };

    let library = read_library(&state);
    let army = library.army(&id).ok_or_else(|| army_not_found(&id))?;
    let strategems = resolve_strategems(
        Some(army),
        library.detachment_for(Some(army)),
        library.strategems(),
        turn,
    );
    let groups = turn.is_none().then(|| group_by_turn(&strategems));
    payload(&StrategemsResponse {
        army: &army.id,
        turn,
        strategems,
        groups,
    })
}

pub async fn unit(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let library = read_library(&state);
    let unit = library
        .unit(&name)
        .ok_or_else(|| ApiError::NotFound(format!("unit '{name}' not found")))?;
    payload(&unit_detail(unit))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub q: Option<String>,
}

pub async fn ability_lookup(State(state): State<AppState>, Query(query): Query<LookupQuery>) -> ApiResult {
    let library = read_library(&state);
    match glossary::resolve(query.q.as_deref(), library.glossary()) {
        Some(entry) => payload(entry),
        None => Err(ApiError::NotFound(format!(
            "no glossary entry matches '{}'",
            query.q.unwrap_or_default()
        ))),
    }
}

pub async fn clear_cache(State(state): State<AppState>) -> ApiResult {
    state
        .loader
        .cache()
        .clear_all()
        .map_err(|err| ApiError::Internal(format!("failed to clear cache: {err}")))?;
    {
        let mut library = state.library.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *library = Library::default();
    }
    tracing::info!("cache cleared; reloading datasets");
    state.spawn_reload();
    payload(&serde_json::json!({ "status": "ok", "reloading": true }))
}

pub async fn scoreboard(State(state): State<AppState>) -> ApiResult {
    payload(&state.scoreboard.standings())
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub delta: i32,
}

pub async fn adjust_score(
    State(state): State<AppState>,
    Path((player, category)): Path<(String, String)>,
    body: Result<Json<AdjustRequest>, JsonRejection>,
) -> ApiResult {
    let player = player
        .parse::<u8>()
        .ok()
        .filter(|p| Scoreboard::is_player(*p))
        .ok_or_else(|| ApiError::BadRequest(format!("unknown player '{player}'")))?;
    let category = ScoreCategory::parse(&category)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown score category '{category}'")))?;
    let Json(request) = body.map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}")))?;

    state
        .scoreboard
        .adjust(player, category, request.delta)
        .map_err(|err| ApiError::Internal(format!("failed to store score: {err}")))?;
    payload(&state.scoreboard.player(player))
}

pub async fn reset_scoreboard(State(state): State<AppState>) -> ApiResult {
    state
        .scoreboard
        .reset()
        .map_err(|err| ApiError::Internal(format!("failed to reset scores: {err}")))?;
    payload(&state.scoreboard.standings())
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

//! API routes for fdmenud.
//!
//! `/fdmenu` is what the widgets call; `/school-day` serves the day-number
//! payload; `/v1/health` is for the CLI and monitoring.

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fdmenu_common::{ErrorResponse, HealthResponse, MenuError, MenuResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Menu Routes
// ============================================================================

pub fn menu_routes() -> Router<AppStateArc> {
    Router::new().route("/fdmenu", get(get_menu))
}

#[derive(Debug, Deserialize)]
struct MenuParams {
    account: Option<String>,
    date: Option<String>,
    lang: Option<String>,
    /// Accepted alias for `lang`.
    locale: Option<String>,
}

async fn get_menu(
    State(state): State<AppStateArc>,
    Query(params): Query<MenuParams>,
) -> Result<Json<MenuResponse>, (StatusCode, Json<ErrorResponse>)> {
    let account = params.account.as_deref().unwrap_or("");
    if account.is_empty() {
        return Err(error_response(&MenuError::InvalidQuery(
            "missing account parameter".to_string(),
        )));
    }
    let lang = params.lang.as_deref().or(params.locale.as_deref());
    info!(
        "/fdmenu account={} date={} lang={}",
        account,
        params.date.as_deref().unwrap_or("today"),
        lang.unwrap_or("unset")
    );

    let items = state
        .menu
        .get_menu(account, params.date.as_deref(), lang)
        .await
        .map_err(|err| error_response(&err))?;

    Ok(Json(MenuResponse { items }))
}

// ============================================================================
// Day Routes
// ============================================================================

pub fn day_routes() -> Router<AppStateArc> {
    Router::new().route("/school-day", get(school_day))
}

async fn school_day(
    State(state): State<AppStateArc>,
) -> Result<Json<fdmenu_common::DayResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state
        .day
        .school_days()
        .await
        .map_err(|err| error_response(&err))?;
    Ok(Json(response))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

fn error_response(err: &MenuError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

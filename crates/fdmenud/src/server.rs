//! HTTP server for fdmenud.

use crate::routes;
use crate::schedule::DayService;
use crate::service::MenuService;
use anyhow::Result;
use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub menu: MenuService,
    pub day: DayService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(menu: MenuService, day: DayService) -> Self {
        Self {
            menu,
            day,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server. Widgets are browser-hosted, so CORS stays wide open
/// for GET/OPTIONS.
pub async fn run(state: AppState, listen_addr: &str) -> Result<()> {
    let state = Arc::new(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .merge(routes::menu_routes())
        .merge(routes::day_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("Listening on http://{}", listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

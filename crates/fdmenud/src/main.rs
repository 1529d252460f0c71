//! fdmenu daemon - school menu proxy.
//!
//! Fetches, normalizes, and caches cafeteria menus from the upstream
//! meal-locator API, with a manually curated fallback dataset, and serves
//! the per-school day number.

use anyhow::Result;
use fdmenud::config::Config;
use fdmenud::schedule::DayService;
use fdmenud::server::{self, AppState};
use fdmenud::service::MenuService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("fdmenud v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    let menu = MenuService::from_config(&config.upstream, &config.menu)?;
    let day = DayService::new(&config.day, config.menu.utc_offset_hours)?;

    server::run(AppState::new(menu, day), &config.server.listen_addr).await
}

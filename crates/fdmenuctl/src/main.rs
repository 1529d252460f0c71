//! fdmenu control - CLI client for the fdmenu daemon.
//!
//! Fetches the day's menu, the per-school day numbers, and daemon health
//! over the daemon's HTTP API.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::DaemonClient;

#[derive(Parser)]
#[command(name = "fdmenuctl")]
#[command(about = "School menu proxy - query the fdmenu daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon address (also FDMENUD_SERVER env var)
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu for a school meal
    Menu {
        /// School name (Park, Brookside, Claremont, Roosevelt, AMD, OHS)
        #[arg(long, conflicts_with = "account")]
        school: Option<String>,

        /// Meal period (breakfast or lunch)
        #[arg(long, default_value = "lunch")]
        meal: String,

        /// Raw account code accountId/locationId/mealPeriodId
        #[arg(long)]
        account: Option<String>,

        /// ISO date (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Display locale (en or es)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show today's day number for every school
    Day,

    /// Show daemon health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new(client::discover_server(cli.server.as_deref()))?;

    match cli.command {
        Commands::Menu {
            school,
            meal,
            account,
            date,
            lang,
        } => commands::menu(&client, school, &meal, account, date, lang).await,
        Commands::Day => commands::day(&client).await,
        Commands::Health => commands::health(&client).await,
    }
}

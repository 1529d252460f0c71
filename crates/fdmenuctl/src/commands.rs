//! Command implementations for fdmenuctl.

use crate::client::DaemonClient;
use anyhow::{bail, Result};
use fdmenu_common::{schools, DayNumber, MealPeriod};
use owo_colors::OwoColorize;

/// Show the menu for a school meal (or a raw account code).
pub async fn menu(
    client: &DaemonClient,
    school: Option<String>,
    meal: &str,
    account: Option<String>,
    date: Option<String>,
    lang: Option<String>,
) -> Result<()> {
    let (account, label) = match (account, school) {
        (Some(account), _) => (account, None),
        (None, Some(school)) => {
            let meal: MealPeriod = meal.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let Some(code) = schools::account_code(&school, meal) else {
                bail!(
                    "unknown school '{}' (known: {})",
                    school,
                    schools::SCHOOLS.join(", ")
                );
            };
            (code.to_string(), Some((school, meal)))
        }
        (None, None) => bail!("provide --school or --account"),
    };

    let response = client
        .menu(&account, date.as_deref(), lang.as_deref())
        .await?;

    match &label {
        Some((school, meal)) => println!(
            "{}",
            format!("{} {}", school, meal).bold().underline()
        ),
        None => println!("{}", account.bold().underline()),
    }
    if response.items.is_empty() {
        println!("  {}", "no menu published".dimmed());
    }
    for item in &response.items {
        println!("  {} {}", "-".dimmed(), item);
    }
    Ok(())
}

/// Show today's day number for every school.
pub async fn day(client: &DaemonClient) -> Result<()> {
    let response = client.day().await?;

    println!("{} {}", "School day for".bold(), response.date.bold());
    for (school, day) in &response.schools {
        let value = match &day.day_number {
            DayNumber::Number(n) => match &day.day_key {
                Some(key) => format!("day {} ({})", n, key),
                None => format!("day {}", n),
            },
            DayNumber::Label(label) => label.clone(),
        };
        let line = format!("  {:<12} {}", school, value);
        if day.day_number.is_closed() {
            println!("{}", line.red());
        } else if day.source == "override" {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Show daemon health.
pub async fn health(client: &DaemonClient) -> Result<()> {
    let health = client.health().await?;
    let status = if health.status == "healthy" {
        health.status.green().to_string()
    } else {
        health.status.red().to_string()
    };
    println!("status:  {}", status);
    println!("version: {}", health.version);
    println!("uptime:  {}s", health.uptime_seconds);
    Ok(())
}

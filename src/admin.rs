//! Administrative command handlers.
//!
//! This module contains CLI command handlers for administrative tasks
//! such as running migrations and viewing statistics.

use crate::config::Config;
use crate::db::Repository;
use crate::error::AppResult;
use clap::Subcommand;
use tracing::info;

/// Administrative commands available via CLI.
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Run database migrations
    Migrate,

    /// Show statistics
    Stats,
}

/// Run an administrative command with the given configuration.
pub async fn run(config: Config, admin_command: AdminCommands) -> AppResult<()> {
    match admin_command {
        AdminCommands::Migrate => migrate(config).await,
        AdminCommands::Stats => stats(config).await,
    }
}

/// Run database migrations.
async fn migrate(config: Config) -> AppResult<()> {
    info!("Running database migrations...");

    let repository = connect(&config).await?;
    repository.run_migrations().await?;

    info!("Migrations completed successfully");
    Ok(())
}

/// Display statistics.
async fn stats(config: Config) -> AppResult<()> {
    info!("Fetching statistics...");

    let repository = connect(&config).await?;
    let stats = repository.get_stats().await?;

    println!("\n=== expensio Statistics ===");
    println!("Users:              {}", stats.total_users);
    println!("Transactions:       {}", stats.total_transactions);
    println!("Total credited:     {:.2}", stats.total_credit);
    println!("Total spent:        {:.2}", stats.total_expense);
    println!();

    Ok(())
}

async fn connect(config: &Config) -> AppResult<Repository> {
    Repository::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
        config.database.acquire_timeout_seconds,
    )
    .await
}

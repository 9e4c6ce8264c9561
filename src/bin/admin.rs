//! CLI administration tool for trails.
//!
//! Provides housekeeping and inspection commands that talk to the store
//! directly, without going through the HTTP API or the cache.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show active/expired trail counts
//! cargo run --bin admin -- stats
//!
//! # Resolve a single trail from the store
//! cargo run --bin admin -- trails lookup 4CsBN6
//!
//! # Delete expired trails
//! cargo run --bin admin -- trails purge --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use trails::application::services::{TrailPolicy, TrailService};
use trails::config::Config;
use trails::infrastructure::cache::NullCache;
use trails::infrastructure::persistence::PgTrailRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing trails.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and clean up trails
    Trails {
        #[command(subcommand)]
        action: TrailAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Trail subcommands.
#[derive(Subcommand)]
enum TrailAction {
    /// Resolve a trail id from the store, bypassing the cache
    Lookup {
        /// Trail id to resolve
        id: String,
    },

    /// Delete trails whose expiry has passed
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    // NullCache: admin commands must observe store truth only.
    let service = TrailService::new(
        Arc::new(PgTrailRepository::new(Arc::new(pool.clone()))),
        Arc::new(NullCache::new()),
        TrailPolicy::default(),
    );

    match cli.command {
        Commands::Trails { action } => handle_trail_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches trail commands.
async fn handle_trail_action(action: TrailAction, service: &TrailService) -> Result<()> {
    match action {
        TrailAction::Lookup { id } => lookup_trail(service, &id).await,
        TrailAction::Purge { yes } => purge_trails(service, yes).await,
    }
}

async fn lookup_trail(service: &TrailService, id: &str) -> Result<()> {
    println!("{}", "🔍 Trail lookup".bright_blue().bold());
    println!();

    let url = service
        .lookup(id)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?;

    match url {
        Some(url) => {
            println!("  Id:  {}", id.cyan());
            println!("  URL: {}", url.bright_white());
        }
        None => {
            println!("{}", format!("  No active trail for '{}'", id).yellow());
        }
    }
    println!();

    Ok(())
}

/// Deletes expired trails after an optional confirmation.
async fn purge_trails(service: &TrailService, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge expired trails".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count trails: {}", e))?;

    if stats.expired == 0 {
        println!("{}", "  Nothing to purge".green());
        return Ok(());
    }

    println!(
        "  Expired trails: {}",
        stats.expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these trails?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge trails: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ Deleted {} expired trails", deleted).green().bold()
    );
    println!();

    Ok(())
}

/// Displays trail counts.
async fn handle_stats(service: &TrailService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Active trails:  {}",
        stats.active.to_string().bright_green().bold()
    );
    println!(
        "  Expired trails: {}",
        stats.expired.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

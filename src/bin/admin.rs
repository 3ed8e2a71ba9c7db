//! CLI administration tool for shortlink.
//!
//! Runs the same services as the HTTP server against the configured store
//! and cache, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Resolve a code (cache first, then a replica)
//! cargo run --bin admin -- resolve aB3xY9kQ
//!
//! # Drop a code from the cache
//! cargo run --bin admin -- evict aB3xY9kQ --yes
//!
//! # Check primary and replica connections
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortlink::config`].

use shortlink::application::services::build_short_url;
use shortlink::config::{self, Config, StorageBackend};
use shortlink::domain::entities::ShortUrl;
use shortlink::error::AppError;
use shortlink::server::{build_cache, build_repository, check_connections};
use shortlink::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// Absolute http/https URL
        url: String,
    },

    /// Resolve a short code to its original URL
    Resolve {
        /// Short code
        code: String,
    },

    /// Remove a short code from the cache
    Evict {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check primary and replica connections (read-only)
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, &url).await?,
        Commands::Resolve { code } => resolve(&config, &code).await?,
        Commands::Evict { code, yes } => evict(&config, &code, yes).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let repository = build_repository(config).await?;
    let cache = build_cache(config).await;
    Ok(AppState::new(repository, cache, config.base_url.clone()))
}

/// Creates a short URL and prints it.
async fn shorten(config: &Config, url: &str) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    if config.storage_backend == StorageBackend::Memory {
        println!(
            "{}",
            "Warning: in-memory storage, the record is lost when this command exits".yellow()
        );
        println!();
    }

    let state = build_state(config).await?;

    let stored = match state.shorten_service.shorten(url).await {
        Ok(stored) => stored,
        Err(AppError::InvalidUrl(reason)) => {
            println!("{} {}", "Rejected:".red().bold(), reason);
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    };

    let short_url = build_short_url(&state.base_url, &stored.code);

    println!("  Code:      {}", stored.code.bright_yellow().bold());
    println!("  Short URL: {}", short_url.cyan());
    println!("  Original:  {}", stored.original_url);
    if let Some(expires_at) = stored.expires_at {
        println!(
            "  Expires:   {}",
            expires_at.to_rfc3339().bright_black()
        );
    }
    println!();
    println!("{}", "Short URL created".green().bold());

    Ok(())
}

/// Resolves a code the same way a redirect does.
async fn resolve(config: &Config, code: &str) -> Result<()> {
    let state = build_state(config).await?;

    match state.redirect_service.resolve(code).await {
        Ok(ShortUrl::Cached { original_url, .. }) => {
            println!("{} {}", original_url.cyan(), "(cache)".bright_black());
        }
        Ok(ShortUrl::Stored(record)) => {
            println!("{} {}", record.original_url.cyan(), "(store)".bright_black());
            println!("  ID:      {}", record.id.to_string().bright_black());
            println!("  Created: {}", record.created_at.to_rfc3339().bright_black());
            if let Some(expires_at) = record.expires_at {
                println!("  Expires: {}", expires_at.to_rfc3339().bright_black());
            }
        }
        Err(AppError::NotFound { message, .. }) => {
            println!("{}", message.yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to resolve code: {}", e)),
    }

    Ok(())
}

/// Drops a cache entry. The stored record is left untouched.
async fn evict(config: &Config, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Evict cache entry".bright_blue().bold());
    println!();

    let cache = build_cache(config).await;

    println!("  Code:  {}", code.cyan());
    println!("  Cache: {}", cache.backend_name().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this entry from the cache?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    cache
        .invalidate(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to evict: {}", e))?;

    println!("{}", "Cache entry removed".green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
///
/// `db check` is read-only: it runs `SELECT 1` on every target and reports
/// each one, so a failing replica does not hide the others.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            if config.storage_backend == StorageBackend::Memory {
                println!("{}", "In-memory storage, no database configured".yellow());
                return Ok(());
            }

            println!("{}", "Checking database connections...".bright_blue());

            let checks = check_connections(config).await?;

            for check in &checks {
                match &check.error {
                    None => println!("  {} {}", "OK".green().bold(), check.source),
                    Some(e) => println!("  {} {}: {}", "FAILED".red().bold(), check.source, e),
                }
            }

            let failed = checks.iter().filter(|c| !c.is_ok()).count();
            if failed > 0 {
                anyhow::bail!("{} of {} database target(s) failed", failed, checks.len());
            }

            println!("{}", "Database check finished".green().bold());
        }
    }

    Ok(())
}

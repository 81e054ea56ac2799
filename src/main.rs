// Copyright 2026 Rebar Bot Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use rebar_bot::catalog::Catalog;
use rebar_bot::config::Config;
use rebar_bot::fetch::PageFetcher;
use rebar_bot::nav::Navigator;
use rebar_bot::server::{self, AppState};
use rebar_bot::telegram::TelegramClient;

#[derive(Parser)]
#[command(
    name = "rebar-bot",
    about = "Telegram menu concierge for the Rebar steakhouse",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the site, register the webhook, and serve updates
    Serve {
        /// Port for the webhook endpoint
        #[arg(long, default_value = "8080")]
        port: u16,
    },
    /// Run the extraction pipeline once and print a summary
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve { port: 8080 }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Check => check().await,
    }
}

/// Fail-closed startup: the webhook is registered and the port bound
/// only after the whole catalog extracted successfully.
async fn serve(port: u16) -> Result<()> {
    let config = Config::from_env()?;
    let token = config.token()?.to_string();
    let webhook_url = config.webhook_url()?;

    let fetcher = PageFetcher::new();
    let catalog = Catalog::load(&fetcher, &config.source_url, &config.menu_url).await?;

    let telegram = TelegramClient::new(&token);
    telegram.set_webhook(&webhook_url).await?;
    info!("webhook set to {webhook_url}");

    let state = Arc::new(AppState {
        catalog: Arc::new(catalog),
        navigator: Navigator::new(config.source_url.as_str().trim_end_matches('/')),
        transport: Arc::new(telegram),
        started_at: Instant::now(),
    });

    server::start(port, state).await
}

/// Operator smoke test: scrape and print, no token needed.
async fn check() -> Result<()> {
    let config = Config::from_env()?;
    let fetcher = PageFetcher::new();
    let catalog = Catalog::load(&fetcher, &config.source_url, &config.menu_url).await?;

    println!("{} categories from {}", catalog.categories.len(), config.menu_url);
    for (idx, category) in catalog.categories.iter().enumerate() {
        let title = if category.title.is_empty() {
            "(untitled)"
        } else {
            &category.title
        };
        println!("{idx:>3}  {title:<28} {:>3} items", category.items.len());
    }
    println!();
    println!("phone:     {}", catalog.contacts.phone);
    println!("address:   {}", catalog.contacts.address);
    println!("instagram: {}", catalog.contacts.instagram);
    Ok(())
}

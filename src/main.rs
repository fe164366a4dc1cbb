//! ytscout CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytscout::cli::{commands, Cli, Commands};
use ytscout::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytscout={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Chat { model } => {
            commands::run_chat(model.clone(), settings).await?;
        }

        Commands::Agent { task, model } => {
            commands::run_agent(task, model.clone(), settings).await?;
        }

        Commands::Search {
            kind,
            query,
            limit,
            order,
            region,
            after,
            before,
            duration,
        } => {
            commands::run_search(
                kind,
                query,
                *limit,
                order.clone(),
                region.clone(),
                after.clone(),
                before.clone(),
                duration.clone(),
                settings,
            )
            .await?;
        }

        Commands::Channel { channel_id, videos } => {
            commands::run_channel(channel_id, *videos, settings).await?;
        }

        Commands::Videos { video_ids, limit } => {
            commands::run_videos(video_ids, *limit, settings).await?;
        }

        Commands::Transcript { video, timestamps } => {
            commands::run_transcript(video, *timestamps, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}

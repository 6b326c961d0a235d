// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line front end

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::debug;

use crate::config::TrackInfoConfig;
use crate::service::{MessageHandler, Reply, TrackInfoService};
use crate::track::{classify_track_url, TrackRecord};

/// Yandex Music track info CLI
#[derive(Parser, Debug)]
#[command(name = "track-info")]
#[command(version)]
#[command(about = "Look up title, artist and duration of Yandex Music tracks", long_about = None)]
pub struct Cli {
    /// Print track records as pretty JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a track from a message containing its link
    Lookup {
        /// Message text (normally a track link)
        text: String,
    },

    /// Validate a track link and print its cache key
    Classify {
        /// Track link to check
        url: String,
    },
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Lookup { text } => lookup(&text, cli.json).await,
        Commands::Classify { url } => classify(&url),
    }
}

async fn lookup(text: &str, json: bool) -> Result<()> {
    let config = TrackInfoConfig::from_env();
    debug!("Loaded configuration: {:?}", config);

    let service = Arc::new(TrackInfoService::new(config)?);
    let handler = MessageHandler::new(service.clone());
    let reply = handler.handle(text).await;
    drop(handler);

    if let Ok(service) = Arc::try_unwrap(service) {
        service.close().await;
    }

    match reply {
        Reply::Track(record) => print_record(&record, json),
        Reply::NotRecognized => {
            println!("Not a Yandex Music link");
            Ok(())
        }
        Reply::Failed(e) => Err(anyhow!(e.user_message())),
    }
}

fn classify(url: &str) -> Result<()> {
    let track = classify_track_url(url).map_err(|e| anyhow!(e.user_message()))?;
    println!("{}", track.cache_key());
    Ok(())
}

fn print_record(record: &TrackRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("Track:    {}", record.name);
    println!("Artist:   {}", record.artist);
    println!("Duration: {}", record.duration);
    if let Some(album) = &record.album {
        println!("Album:    {}", album);
    }
    Ok(())
}

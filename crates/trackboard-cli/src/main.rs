//! trackboard - a command-line progress log for training activities,
//! certifications and projects.
//!
//! Records live in a local cache and are mirrored to a shared remote
//! document when one is configured; without a reachable remote everything
//! keeps working from the cache.

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use trackboard_core::auth::CredentialStore;
use trackboard_core::{Config, FileCache, HttpMirror, OfflineMirror, RemoteMirror, StorageClient};

use cli::{Cli, Command};
use logging::Verbosity;

/// Subdirectory of the cache directory holding log files
const LOG_DIR: &str = "logs";

/// Pick the remote mirror: the configured HTTP document, or offline.
fn build_mirror(config: &Config, offline: bool) -> Result<Box<dyn RemoteMirror>> {
    if offline {
        return Ok(Box::new(OfflineMirror));
    }
    match config.remote_url() {
        Some(url) => {
            let mut mirror = HttpMirror::new(url.as_str())?;
            match CredentialStore::resolve(&url) {
                Some(key) => mirror = mirror.with_auth(config.auth_header(), &key)?,
                None => debug!(remote = %url, "No API key configured, sending unauthenticated requests"),
            }
            Ok(Box::new(mirror))
        }
        None => Ok(Box::new(OfflineMirror)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::load()?;
    let cache_dir = config.cache_dir()?;

    let log_dir = cache_dir.join(LOG_DIR);
    let log_dir = std::fs::create_dir_all(&log_dir).ok().map(|_| log_dir);
    let _log_guard = logging::init_tracing(
        Verbosity::from_flags(cli.quiet, cli.verbose),
        log_dir.as_deref(),
    );
    info!("trackboard starting");

    if let Command::Config(command) = cli.command {
        return commands::config(command);
    }

    let cache = FileCache::new(cache_dir)?;
    let mirror = build_mirror(&config, cli.offline)?;
    let mut client = StorageClient::new(cache, mirror);

    match cli.command {
        Command::List(args) => commands::list(&mut client, args).await?,
        Command::Add(command) => commands::add(&mut client, command).await?,
        Command::Refresh => commands::refresh(&mut client).await?,
        Command::Status => commands::status(&mut client).await?,
        Command::Config(_) => {}
    }

    info!("trackboard finished");
    Ok(())
}

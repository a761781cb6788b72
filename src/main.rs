//! Ripple-Crawler main entry point
//!
//! `serve` runs the crawl service; the other subcommands are a thin client
//! that talks to a running service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ripple_crawler::config::{load_or_default, Config};
use ripple_crawler::control::{serve, ControlClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawler: a controllable web crawling service
///
/// Start the service with `serve`, then start, stop and list crawls of root
/// URLs from another terminal.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawler")]
#[command(version)]
#[command(about = "A controllable web crawling service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Control server address, overriding the configured client address
    #[arg(long, value_name = "URL", global = true)]
    server: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the crawl service
    Serve,

    /// Start crawling a root URL
    Start {
        #[arg(value_name = "ROOT")]
        root: String,
    },

    /// Stop crawling a root URL
    Stop {
        #[arg(value_name = "ROOT")]
        root: String,
    },

    /// List every known crawl
    List {
        /// Root filter (currently every root is listed)
        #[arg(value_name = "FILTER", default_value = "*")]
        filter: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, hash) = load_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        }
    })?;

    match hash {
        Some(hash) => tracing::info!("Configuration loaded successfully (hash: {})", hash),
        None => tracing::debug!("No configuration file given, using defaults"),
    }

    if let Some(server) = cli.server {
        config.client.address = server;
    }

    match cli.command {
        Command::Serve => handle_serve(&config).await,
        Command::Start { root } => {
            let reply = client(&config)?.start(&root).await?;
            println!("{}", reply.message);
            Ok(())
        }
        Command::Stop { root } => {
            let reply = client(&config)?.stop(&root).await?;
            println!("{}", reply.message);
            Ok(())
        }
        Command::List { filter } => {
            let count = client(&config)?
                .list(&filter, |reply| println!("{}", reply.message))
                .await?;
            tracing::debug!("Received {} list entries", count);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawler=info,warn"),
            1 => EnvFilter::new("ripple_crawler=debug,info"),
            2 => EnvFilter::new("ripple_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn client(config: &Config) -> anyhow::Result<ControlClient> {
    ControlClient::new(&config.client)
        .with_context(|| format!("Invalid control server address {}", config.client.address))
}

/// Runs the service until interrupted
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl service on {} as {}",
        config.server.listen,
        ripple_crawler::crawler::user_agent(&config.user_agent)
    );

    serve(config).await.context("Crawl service failed")?;
    Ok(())
}

//! Main entry point for the chat-ladder service
//!
//! Reads chat messages from standard input, one per line in the form
//! `<chat id> <message text>`, and prints the bot's replies to standard output.
//! Logs go to standard error.

use anyhow::Result;
use chat_ladder::config::{validate_config, AppConfig};
use chat_ladder::service::USAGE_TEXT;
use chat_ladder::{Command, CommandHandler, GroupId, LadderService, RatingStore};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, error, info, warn};

/// Chat Ladder - Elo ratings for 1x1 and 2x2 games in group chats
#[derive(Parser)]
#[command(
    name = "chat-ladder",
    version,
    about = "Per-chat Elo ladders for 1x1 and 2x2 game reports",
    long_about = "Chat Ladder keeps separate 1x1 and 2x2 Elo ratings for every chat. \
                 Messages are read from stdin as `<chat id> <text>` lines, e.g. \
                 `-1001 /game @alice @bob @alice`, and replies are written to stdout."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Snapshot path override
    #[arg(short, long, value_name = "FILE", help = "Override rating snapshot path")]
    snapshot: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("Chat Ladder {}", chat_ladder::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Snapshot: {}", config.storage.snapshot_path.display());
    info!("   Save on shutdown: {}", config.storage.save_on_shutdown);
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(snapshot) = &args.snapshot {
        config.storage.snapshot_path = snapshot.clone();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Split an input line into its chat id and message text
fn split_line(line: &str) -> Option<(GroupId, &str)> {
    let (group, text) = line.split_once(' ')?;
    let group = group.parse().ok()?;
    Some((group, text))
}

/// Handle one input line and print the replies
async fn dispatch(service: &LadderService, line: &str) {
    let Some((group, text)) = split_line(line) else {
        warn!("Ignoring malformed input line: {:?}", line);
        return;
    };

    let replies = match Command::parse(text) {
        Ok(Some(command)) => match service.handle_command(group, command).await {
            Ok(replies) => replies,
            Err(e) => {
                error!("Chat {}: command failed: {}", group, e);
                return;
            }
        },
        Ok(None) => {
            debug!("Chat {}: ignoring non-command message", group);
            return;
        }
        Err(e) => {
            warn!("Chat {}: {}", group, e);
            vec![USAGE_TEXT.to_string()]
        }
    };

    for reply in replies {
        println!("[{}] {}", group, reply);
    }
}

/// Read stdin until EOF
async fn run(service: &LadderService) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        dispatch(service, &line).await;
    }
    info!("Input closed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    let store = RatingStore::load(&config.storage.snapshot_path);
    let service = LadderService::new(store);

    info!("Chat Ladder is running, reading messages from stdin");

    tokio::select! {
        result = run(&service) => {
            if let Err(e) = result {
                error!("Failed to read input: {}", e);
            }
        }
        _ = wait_for_shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if config.storage.save_on_shutdown {
        match tokio::time::timeout(config.shutdown_timeout(), service.flush()).await {
            Ok(Ok(())) => info!("Ratings saved"),
            Ok(Err(e)) => error!("Failed to save ratings on shutdown: {}", e),
            Err(_) => warn!("Shutdown timeout exceeded before ratings were saved"),
        }
    }

    info!("Chat Ladder stopped");
    Ok(())
}

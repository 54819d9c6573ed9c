//! FixSync service binary
//!
//! ```sh
//! # default config (~/.config/fixsync/config.toml)
//! fixsync-service
//!
//! # explicit config, apply migrations only
//! fixsync-service --config /etc/fixsync/config.toml migrate
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use fixsync::config::{resolve_config_path, AppConfig, CONFIG_ENV};
use fixsync::server::{init_tracing, migrate, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(name = "fixsync-service", version, about = "Repair shop management backend")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run migrations, seed the admin and serve HTTP (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => migrate(&config).await,
        Command::Serve => serve(config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), fixsync::server::BoxError> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down");
    handle.wait().await;
    Ok(())
}

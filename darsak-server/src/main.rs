//! # Darsak Server
//!
//! Entry point: loads configuration, connects to PostgreSQL, applies
//! migrations, and serves the HTTP API.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use darsak_core::{MIGRATOR, application::unit_of_work::AppUnitOfWork, database};
use darsak_server::{
    AppState,
    auth::issue_token,
    create_app,
    infra::{
        config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions},
        telemetry::init_tracing,
    },
};
use tracing::{info, warn};
use uuid::Uuid;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "darsak-server")]
#[command(about = "Lesson entitlement and device session service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to darsak.toml
    #[arg(long, env = "DARSAK_CONFIG")]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Do not apply pending migrations on startup
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply database migrations and exit
    Migrate,
    /// Print a signed access token for local testing
    DevToken {
        /// User id to put in the `sub` claim
        #[arg(long)]
        user: Uuid,
        /// Lifetime in minutes
        #[arg(long, default_value_t = 60)]
        ttl_minutes: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli.serve)?;

    match cli.command {
        Some(Command::Migrate) => run_migrate(&config).await,
        Some(Command::DevToken { user, ttl_minutes }) => {
            let token = issue_token(
                &config.auth.jwt_secret,
                user,
                config.auth.audience.as_deref(),
                chrono::Duration::minutes(ttl_minutes),
            )
            .context("failed to sign token")?;
            println!("{token}");
            Ok(())
        }
        None => run_server(config, &cli.serve).await,
    }
}

fn load_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded config file");
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    Ok(config)
}

async fn run_migrate(config: &Config) -> anyhow::Result<()> {
    let db = &config.database;
    let pool = database::connect(&db.url, db.max_connections)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(config: Config, args: &ServeArgs) -> anyhow::Result<()> {
    let db = &config.database;
    let pool = database::connect(&db.url, db.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;

    if args.skip_migrations {
        warn!("skipping migrations; schema must already be current");
    } else {
        MIGRATOR.run(&pool).await.context("database migration failed")?;
    }

    let addr = config
        .server
        .socket_addr()
        .context("invalid server host/port")?;
    info!(
        max_devices = config.devices.max_devices,
        locale = %config.devices.locale,
        "device limit policy"
    );

    let config = Arc::new(config);
    let state = AppState::new(config, AppUnitOfWork::from_postgres(pool));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting Darsak server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

//! `user-api` binary: HTTP server and schema management.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::LogFormat;
use gateway_lib::config::GatewayConfig;
use user_service_lib::config::UserServiceConfig;

#[derive(Parser)]
#[command(name = "user-api")]
#[command(about = "User CRUD service backed by PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for user_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => user_service_lib::MigrateAction::Up,
            MigrateAction::Down => user_service_lib::MigrateAction::Down,
            MigrateAction::Status => user_service_lib::MigrateAction::Status,
            MigrateAction::Fresh => user_service_lib::MigrateAction::Fresh,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut gateway_config = GatewayConfig::from_env();
            if let Some(host) = host {
                gateway_config.host = host;
            }
            if let Some(port) = port {
                gateway_config.port = port;
            }
            let service_config = UserServiceConfig::from_env();

            info!(
                address = %gateway_config.bind_address(),
                database = ?service_config.database,
                "Starting user-api"
            );

            if let Err(e) = gateway_lib::run(gateway_config, service_config).await {
                error!("Server failed: {}", e);
                return Err(e);
            }
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}

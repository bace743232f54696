mod seed;
mod setup;
mod status;

pub use seed::SeedCommand;
pub use setup::SetupCommand;
pub use status::StatusCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use commune_core::config::CommuneConfig;
use commune_db::Database;

/// COMMUNE - community platform persistence tooling
#[derive(Parser)]
#[command(name = "commune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Reset the development database: drop, migrate, seed.
    Setup(SetupCommand),

    /// Load seed data into an already-migrated empty database.
    Seed(SeedCommand),

    /// Show which schema objects and capabilities are present.
    Status(StatusCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Setup(cmd) => cmd.execute().await,
            Commands::Seed(cmd) => cmd.execute().await,
            Commands::Status(cmd) => cmd.execute().await,
        }
    }
}

/// Load .env, configuration, initialize tracing, and connect.
pub(crate) async fn connect(config_path: &str) -> Result<(CommuneConfig, Database)> {
    dotenvy::dotenv().ok();

    let path = std::path::Path::new(config_path);
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let config = CommuneConfig::from_file(config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| config.environment.default_log_filter().to_string()),
        )
        .init();

    info!("Loaded configuration from {}", config_path);

    let db = Database::connect(&config.database, config.environment).await?;
    db.health_check().await?;
    info!(
        "Connected to {}:{}/{}",
        config.database.host, config.database.port, config.database.database
    );

    Ok((config, db))
}

use anyhow::Result;
use clap::Parser;
use console::style;

use commune_db::{catalog, detect_capabilities, Capability};

/// Show which migrations' objects and optional capabilities are present.
#[derive(Parser)]
pub struct StatusCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "commune.toml")]
    pub config: String,
}

impl StatusCommand {
    pub async fn execute(self) -> Result<()> {
        let (_config, db) = super::connect(&self.config).await?;

        println!();
        println!(
            "  {} {} schema status",
            style("●").cyan(),
            style("COMMUNE").bold().cyan()
        );
        println!();

        // There is no persisted migration version table; setup always
        // rebuilds from scratch. Presence is probed per marker table.
        for migration in catalog() {
            let present = sqlx::query_scalar::<_, bool>(
                "SELECT to_regclass('public.' || $1) IS NOT NULL",
            )
            .bind(migration.marker_table)
            .fetch_one(db.pool())
            .await?;

            let mark = if present {
                style("✓").green().to_string()
            } else {
                style("○").yellow().to_string()
            };
            println!("  {} {}", mark, style(migration.name).cyan());
        }

        println!();
        let caps = detect_capabilities(db.pool()).await?;
        let vector = if caps.has(Capability::VectorSearch) {
            style("available").green().to_string()
        } else {
            style("unavailable").yellow().to_string()
        };
        println!("  {} vector search: {}", style("ℹ").blue(), vector);
        println!();

        db.close().await;
        Ok(())
    }
}

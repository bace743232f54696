use anyhow::Result;
use clap::Parser;
use console::style;

/// Load seed data into an already-migrated, empty database.
#[derive(Parser)]
pub struct SeedCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "commune.toml")]
    pub config: String,
}

impl SeedCommand {
    pub async fn execute(self) -> Result<()> {
        let (_config, db) = super::connect(&self.config).await?;

        println!();
        println!(
            "  {} {} seed",
            style("●").cyan(),
            style("COMMUNE").bold().cyan()
        );
        println!();

        // Unlike `setup`, a standalone seed run fails loudly: the operator
        // asked for exactly this action.
        let report = commune_db::seed(db.pool()).await?;

        println!("  {} Seeded: {}", style("✓").green(), report);
        println!();

        db.close().await;
        Ok(())
    }
}

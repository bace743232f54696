use anyhow::Result;
use clap::Parser;
use console::style;

/// Reset the development database from scratch.
#[derive(Parser)]
pub struct SetupCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "commune.toml")]
    pub config: String,
}

impl SetupCommand {
    pub async fn execute(self) -> Result<()> {
        let (_config, db) = super::connect(&self.config).await?;

        println!();
        println!(
            "  {} {} database setup",
            style("●").cyan(),
            style("COMMUNE").bold().cyan()
        );
        println!();
        println!("  {} Dropping, migrating, and seeding...", style("→").dim());

        // Seed failures are logged inside setup and do not fail the run;
        // a schema failure propagates and exits non-zero.
        commune_db::setup(db.pool()).await?;

        println!("  {} Database ready", style("✓").green());
        println!();

        db.close().await;
        Ok(())
    }
}

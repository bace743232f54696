//! One-shot development environment reset.

use sqlx::PgPool;
use tracing::{error, info, warn};

use commune_core::error::Result;

use crate::migrations::{detect_capabilities, MigrationRunner};
use crate::seed;

/// Reset the development database: reverse everything, reapply all
/// migrations, then seed.
///
/// Failure policy is deliberately asymmetric: reversal failures are logged
/// and swallowed (there may be nothing to drop), migration failures are
/// fatal, and seed failures are logged but leave the freshly built schema in
/// place. This is a development reset tool, not a deployment procedure: it
/// tracks no applied-migration state and always rebuilds from scratch.
pub async fn setup(pool: &PgPool) -> Result<()> {
    let runner = MigrationRunner::new(pool.clone());

    if let Err(e) = runner.revert_all().await {
        warn!("Reversal failed, continuing with apply: {}", e);
    }

    let caps = detect_capabilities(pool).await?;
    let outcome = runner.apply_all(&caps).await?;
    runner.attach_touch_triggers().await?;
    info!(
        "Schema ready: {} migrations applied, {} skipped",
        outcome.applied.len(),
        outcome.skipped.len()
    );

    match seed::seed(pool).await {
        Ok(report) => info!("Seeded development data: {}", report),
        Err(e) => error!("Seeding failed (schema is still usable): {}", e),
    }

    Ok(())
}

//! Ordered, reversible schema migrations.
//!
//! Migrations are applied in ascending version order and reversed in
//! descending order. Forward DDL is `IF NOT EXISTS`-guarded and reverse DDL
//! is `IF EXISTS`-guarded, so both directions are safe to re-run against a
//! database in any intermediate state.

mod catalog;

pub use catalog::{catalog, Migration, TIMESTAMPED_TABLES};

use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use commune_core::error::{CommuneError, Result};

/// Optional database capabilities a migration may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The pgvector extension (vector columns, ivfflat indexes).
    VectorSearch,
}

impl Capability {
    /// Extension name as it appears in pg_available_extensions.
    fn extension_name(self) -> &'static str {
        match self {
            Capability::VectorSearch => "vector",
        }
    }
}

/// The set of optional capabilities detected on the target server.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    available: HashSet<Capability>,
}

impl Capabilities {
    pub fn has(&self, cap: Capability) -> bool {
        self.available.contains(&cap)
    }

    #[cfg(test)]
    pub fn with(caps: &[Capability]) -> Self {
        Self {
            available: caps.iter().copied().collect(),
        }
    }
}

/// Probe the server once for optional capabilities, before any migration
/// runs. Gated migrations branch on the result instead of attempting the
/// feature and recovering from failure.
pub async fn detect_capabilities(pool: &PgPool) -> Result<Capabilities> {
    let mut available = HashSet::new();

    for cap in [Capability::VectorSearch] {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM pg_available_extensions WHERE name = $1",
        )
        .bind(cap.extension_name())
        .fetch_one(pool)
        .await
        .map_err(|e| CommuneError::Database(format!("Capability detection failed: {}", e)))?;

        if found > 0 {
            debug!("Capability available: {:?}", cap);
            available.insert(cap);
        } else {
            warn!(
                "Optional capability {:?} (extension '{}') is not available; \
                 dependent tables and indexes will not be created",
                cap,
                cap.extension_name()
            );
        }
    }

    Ok(Capabilities { available })
}

/// Outcome of a forward migration run.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    /// Migration names applied, in order.
    pub applied: Vec<&'static str>,
    /// Migration names skipped because a required capability is missing.
    pub skipped: Vec<&'static str>,
}

/// Applies and reverses the migration catalog against a database.
pub struct MigrationRunner {
    pool: PgPool,
}

impl MigrationRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply every catalog migration in ascending version order.
    ///
    /// Migrations whose required capability is absent are skipped with a
    /// warning; the run still succeeds. On failure of migration k, the
    /// migrations before it stay applied (no cross-migration rollback) and
    /// the error names the failing migration.
    pub async fn apply_all(&self, caps: &Capabilities) -> Result<ApplyOutcome> {
        let mut outcome = ApplyOutcome::default();

        for migration in catalog() {
            if let Some(required) = migration.requires {
                if !caps.has(required) {
                    warn!(
                        "Skipping migration {}: capability {:?} unavailable",
                        migration.name, required
                    );
                    outcome.skipped.push(migration.name);
                    continue;
                }
            }

            self.execute(migration.name, migration.up).await?;
            info!("Applied migration: {}", migration.name);
            outcome.applied.push(migration.name);
        }

        Ok(outcome)
    }

    /// Reverse every catalog migration in descending version order.
    ///
    /// Reverse SQL drops with IF EXISTS, so reversing a partially-applied or
    /// pristine database is not an error. Capability-gated migrations are
    /// reversed unconditionally; their drops are no-ops when the objects
    /// were never created.
    pub async fn revert_all(&self) -> Result<()> {
        let mut migrations = catalog();
        migrations.reverse();

        for migration in migrations {
            self.execute(migration.name, migration.down).await?;
            info!("Reversed migration: {}", migration.name);
        }

        Ok(())
    }

    /// Attach the shared `set_updated_at()` trigger to every table declared
    /// in [`TIMESTAMPED_TABLES`]. Run once, after `apply_all`; drop-then-
    /// create makes it idempotent.
    pub async fn attach_touch_triggers(&self) -> Result<()> {
        for table in TIMESTAMPED_TABLES {
            let sql = format!(
                "DROP TRIGGER IF EXISTS trg_{table}_touch ON {table};\n\
                 CREATE TRIGGER trg_{table}_touch BEFORE UPDATE ON {table}\n\
                 FOR EACH ROW EXECUTE FUNCTION set_updated_at();"
            );
            self.execute("touch_triggers", &sql).await?;
        }

        info!(
            "Attached updated_at triggers to {} tables",
            TIMESTAMPED_TABLES.len()
        );
        Ok(())
    }

    /// Execute a migration script statement by statement.
    async fn execute(&self, name: &str, sql: &str) -> Result<()> {
        for statement in split_statements(sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| CommuneError::schema(name, e.to_string()))?;
        }
        Ok(())
    }
}

/// Split SQL into individual statements, respecting dollar-quoted strings.
/// This handles PL/pgSQL bodies that contain semicolons inside $$ delimiters.
/// Empty and comment-only fragments are dropped.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_dollar_quote = false;
    let mut dollar_tag = String::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);

        // Check for dollar-quoting start/end
        if c == '$' {
            let mut potential_tag = String::from("$");

            // Collect characters until we hit another $ or non-identifier char
            while let Some(&next_c) = chars.peek() {
                if next_c == '$' {
                    potential_tag.push(chars.next().unwrap());
                    current.push('$');
                    break;
                } else if next_c.is_alphanumeric() || next_c == '_' {
                    potential_tag.push(chars.next().unwrap());
                    current.push(potential_tag.chars().last().unwrap());
                } else {
                    break;
                }
            }

            if potential_tag.len() >= 2 && potential_tag.ends_with('$') {
                if in_dollar_quote && potential_tag == dollar_tag {
                    in_dollar_quote = false;
                    dollar_tag.clear();
                } else if !in_dollar_quote {
                    in_dollar_quote = true;
                    dollar_tag = potential_tag;
                }
            }
        }

        if c == ';' && !in_dollar_quote {
            push_statement(&mut statements, &current);
            current.clear();
        }
    }

    // The last statement might not end with a semicolon
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let stmt = raw.trim().trim_end_matches(';').trim();
    if stmt.is_empty() {
        return;
    }
    let comment_only = stmt.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with("--")
    });
    if !comment_only {
        statements.push(stmt.to_string());
    }
}

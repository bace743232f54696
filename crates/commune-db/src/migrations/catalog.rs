//! The migration catalog.
//!
//! Migration SQL is embedded from the crate-level `migrations/` directory.
//! Migrations are authored once and never edited after being applied to a
//! shared environment; schema changes become new catalog entries.

use super::Capability;

const CORE_SCHEMA_UP: &str = include_str!("../../migrations/0001_core_schema.up.sql");
const CORE_SCHEMA_DOWN: &str = include_str!("../../migrations/0001_core_schema.down.sql");
const VECTOR_SEARCH_UP: &str = include_str!("../../migrations/0002_vector_search.up.sql");
const VECTOR_SEARCH_DOWN: &str = include_str!("../../migrations/0002_vector_search.down.sql");

/// A single ordered, reversible schema-change unit.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Strictly increasing version; apply ascending, reverse descending.
    pub version: i64,
    /// Human-readable identifier.
    pub name: &'static str,
    /// Forward DDL. Re-runnable against a database already at this version.
    pub up: &'static str,
    /// Reverse DDL. Safe against a partially-applied or pristine database.
    pub down: &'static str,
    /// Optional capability this migration depends on; skipped when absent.
    pub requires: Option<Capability>,
    /// A table created by this migration, probed by `commune status`.
    pub marker_table: &'static str,
}

/// All migrations, in ascending version order.
pub fn catalog() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "0001_core_schema",
            up: CORE_SCHEMA_UP,
            down: CORE_SCHEMA_DOWN,
            requires: None,
            marker_table: "users",
        },
        Migration {
            version: 2,
            name: "0002_vector_search",
            up: VECTOR_SEARCH_UP,
            down: VECTOR_SEARCH_DOWN,
            requires: Some(Capability::VectorSearch),
            marker_table: "user_embeddings",
        },
    ]
}

/// Tables carrying an auto-updated `updated_at` column. The runner attaches
/// the shared `set_updated_at()` trigger to each of these after migrations
/// run. Declared here, not inlined in migration SQL, so the list can grow
/// with the table set.
pub const TIMESTAMPED_TABLES: &[&str] = &[
    "users",
    "oauth_accounts",
    "communities",
    "roles",
    "memberships",
    "tasks",
    "task_comments",
    "channels",
    "messages",
    "events",
    "rsvps",
    "portfolios",
    "portfolio_entries",
    "reputation_scores",
];

/// Every domain table created by the core schema, in creation order.
pub const CORE_TABLES: &[&str] = &[
    "users",
    "oauth_accounts",
    "sessions",
    "communities",
    "roles",
    "memberships",
    "contributions",
    "tasks",
    "task_assignments",
    "task_comments",
    "channels",
    "messages",
    "attachments",
    "events",
    "rsvps",
    "attendance",
    "event_feedback",
    "portfolios",
    "portfolio_entries",
    "user_skills",
    "reputation_scores",
    "notifications",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ordering() {
        let migrations = catalog();
        assert!(!migrations.is_empty());
        for pair in migrations.windows(2) {
            assert!(
                pair[0].version < pair[1].version,
                "catalog versions must be strictly increasing"
            );
        }
    }

    #[test]
    fn test_catalog_sql_not_empty() {
        for m in catalog() {
            assert!(!m.up.trim().is_empty(), "{} has empty up SQL", m.name);
            assert!(!m.down.trim().is_empty(), "{} has empty down SQL", m.name);
        }
    }

    #[test]
    fn test_core_schema_creates_every_table() {
        let sql = catalog()[0].up;
        for table in CORE_TABLES {
            assert!(
                sql.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "core schema is missing table {}",
                table
            );
        }
    }

    #[test]
    fn test_core_schema_drops_every_table() {
        let sql = catalog()[0].down;
        for table in CORE_TABLES {
            assert!(
                sql.contains(&format!("DROP TABLE IF EXISTS {}", table)),
                "core schema down is missing drop for {}",
                table
            );
        }
    }

    #[test]
    fn test_core_schema_creates_every_enum() {
        let sql = catalog()[0].up;
        for ty in [
            "auth_provider",
            "community_visibility",
            "membership_status",
            "task_status",
            "task_priority",
            "channel_type",
            "event_type",
            "event_status",
            "rsvp_status",
            "portfolio_entry_type",
            "score_type",
        ] {
            assert!(
                sql.contains(&format!("CREATE TYPE {} AS ENUM", ty)),
                "core schema is missing enum {}",
                ty
            );
            assert!(
                catalog()[0].down.contains(&format!("DROP TYPE IF EXISTS {}", ty)),
                "core schema down is missing drop for enum {}",
                ty
            );
        }
    }

    #[test]
    fn test_timestamped_tables_have_updated_at() {
        // Trigger attachment only works if the DDL actually declares the
        // column on each listed table.
        let sql = catalog()[0].up;
        for table in TIMESTAMPED_TABLES {
            let create = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            let start = sql
                .find(&create)
                .unwrap_or_else(|| panic!("no DDL for timestamped table {}", table));
            let body_end = sql[start..]
                .find("\n);")
                .map(|i| start + i)
                .unwrap_or(sql.len());
            assert!(
                sql[start..body_end].contains("updated_at TIMESTAMPTZ"),
                "{} is listed as timestamped but has no updated_at column",
                table
            );
        }
    }

    #[test]
    fn test_updated_at_tables_are_all_listed() {
        // Converse of the check above: any core table declaring updated_at
        // must be in TIMESTAMPED_TABLES, or it never gets its trigger. The
        // embedding tables live in the gated migration and are rewritten
        // wholesale, so only the core schema is scanned.
        let sql = catalog()[0].up;
        let prefix = "CREATE TABLE IF NOT EXISTS ";
        let mut offset = 0;
        while let Some(i) = sql[offset..].find(prefix) {
            let start = offset + i + prefix.len();
            let name_end = sql[start..].find(" (").map(|j| start + j).unwrap();
            let table = &sql[start..name_end];
            let body_end = sql[name_end..].find("\n);").map(|j| name_end + j).unwrap();
            if sql[name_end..body_end].contains("updated_at TIMESTAMPTZ") {
                assert!(
                    TIMESTAMPED_TABLES.contains(&table),
                    "{} declares updated_at but is missing from TIMESTAMPED_TABLES",
                    table
                );
            }
            offset = body_end;
        }
    }

    #[test]
    fn test_vector_migration_is_the_only_gated_one() {
        let gated: Vec<_> = catalog().into_iter().filter(|m| m.requires.is_some()).collect();
        assert_eq!(gated.len(), 1);
        assert_eq!(gated[0].name, "0002_vector_search");
        assert_eq!(gated[0].requires, Some(Capability::VectorSearch));
    }

    #[test]
    fn test_vector_migration_shape() {
        let sql = catalog()[1].up;
        assert_eq!(sql.matches("CREATE TABLE IF NOT EXISTS").count(), 2);
        assert_eq!(sql.matches("USING ivfflat").count(), 2);
        assert_eq!(sql.matches("vector_cosine_ops").count(), 2);
        assert_eq!(sql.matches("WITH (lists = 100)").count(), 2);
    }

    #[test]
    fn test_partial_indexes_exclude_soft_deleted_rows() {
        let sql = catalog()[0].up;
        for index in [
            "idx_users_email_active",
            "idx_users_username_active",
            "idx_communities_slug_active",
        ] {
            let start = sql.find(index).expect(index);
            let end = sql[start..].find(';').map(|i| start + i).unwrap();
            assert!(
                sql[start..end].contains("WHERE deleted_at IS NULL"),
                "{} must exclude soft-deleted rows",
                index
            );
        }
    }

    #[test]
    fn test_fuzzy_username_index_uses_trigram() {
        let sql = catalog()[0].up;
        assert!(sql.contains("gin (username gin_trgm_ops)"));
    }
}

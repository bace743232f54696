//! Development seed data loader.
//!
//! Inserts a fixed, referentially consistent sample dataset into a freshly
//! migrated schema, inside one transaction. Any failure rolls back the whole
//! run; no partial seed data ever persists. Re-running against a populated
//! database fails on uniqueness constraints, by design.

mod fixtures;

use std::collections::HashMap;
use std::fmt;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use commune_core::error::{CommuneError, Result};

/// Row counts inserted by a successful seed run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub users: usize,
    pub communities: usize,
    pub roles: usize,
    pub memberships: usize,
    pub tasks: usize,
    pub channels: usize,
    pub events: usize,
    pub contributions: usize,
    pub portfolios: usize,
    pub portfolio_entries: usize,
    pub skills: usize,
    pub reputation_scores: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} communities, {} roles, {} memberships, {} tasks, \
             {} channels, {} events, {} contributions, {} portfolios, \
             {} portfolio entries, {} skills, {} reputation scores",
            self.users,
            self.communities,
            self.roles,
            self.memberships,
            self.tasks,
            self.channels,
            self.events,
            self.contributions,
            self.portfolios,
            self.portfolio_entries,
            self.skills,
            self.reputation_scores
        )
    }
}

/// Populate the schema with the fixture dataset, all-or-nothing.
pub async fn seed(pool: &PgPool) -> Result<SeedReport> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| CommuneError::seed(format!("failed to open transaction: {}", e)))?;

    match insert_all(&mut tx).await {
        Ok(report) => {
            tx.commit()
                .await
                .map_err(|e| CommuneError::seed(format!("commit failed: {}", e)))?;
            info!("Seed complete: {}", report);
            Ok(report)
        }
        Err(e) => {
            // Rollback explicitly; dropping the transaction would do the
            // same, but the policy is release-on-every-exit-path.
            let _ = tx.rollback().await;
            Err(e)
        }
    }
}

async fn insert_all(tx: &mut Transaction<'_, Postgres>) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    // Users. Passwords are hashed server-side via pgcrypto.
    let mut user_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for u in fixtures::users() {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, username, password_hash, display_name, bio)
            VALUES ($1, $2, crypt($3, gen_salt('bf', 8)), $4, $5)
            RETURNING id
            "#,
        )
        .bind(u.email)
        .bind(u.username)
        .bind(u.password)
        .bind(u.display_name)
        .bind(u.bio)
        .fetch_one(&mut **tx)
        .await
        .map_err(seed_err)?;
        user_ids.insert(u.username, id);
        report.users += 1;
    }

    // Communities
    let mut community_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for c in fixtures::communities() {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO communities (slug, name, description, visibility, founder_id)
            VALUES ($1, $2, $3, $4::community_visibility, $5)
            RETURNING id
            "#,
        )
        .bind(c.slug)
        .bind(c.name)
        .bind(c.description)
        .bind(c.visibility)
        .bind(user_ids[c.founder])
        .fetch_one(&mut **tx)
        .await
        .map_err(seed_err)?;
        community_ids.insert(c.slug, id);
        report.communities += 1;
    }

    // Roles: the fixed template stamped out per community
    for community_id in community_ids.values() {
        for (name, permissions, position, is_default) in fixtures::ROLE_TEMPLATES {
            sqlx::query(
                r#"
                INSERT INTO roles (community_id, name, permissions, position, is_default)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(community_id)
            .bind(name)
            .bind(permissions)
            .bind(position)
            .bind(is_default)
            .execute(&mut **tx)
            .await
            .map_err(seed_err)?;
            report.roles += 1;
        }
    }

    // Memberships, resolving role ids by (community, name) within the
    // transaction
    for m in fixtures::memberships() {
        let community_id = community_ids[m.community];
        let role_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM roles WHERE community_id = $1 AND name = $2",
        )
        .bind(community_id)
        .bind(m.role)
        .fetch_optional(&mut **tx)
        .await
        .map_err(seed_err)?
        .ok_or_else(|| {
            CommuneError::seed(format!("role '{}' not found in community '{}'", m.role, m.community))
        })?;

        sqlx::query(
            r#"
            INSERT INTO memberships (community_id, user_id, role_id, status)
            VALUES ($1, $2, $3, 'active')
            "#,
        )
        .bind(community_id)
        .bind(user_ids[m.user])
        .bind(role_id)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.memberships += 1;
    }

    // Tasks
    let mut task_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for t in fixtures::tasks() {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO tasks (community_id, creator_id, title, description, status, priority, position)
            VALUES ($1, $2, $3, $4, $5::task_status, $6::task_priority, $7)
            RETURNING id
            "#,
        )
        .bind(community_ids[t.community])
        .bind(user_ids[t.creator])
        .bind(t.title)
        .bind(t.description)
        .bind(t.status)
        .bind(t.priority)
        .bind(t.position)
        .fetch_one(&mut **tx)
        .await
        .map_err(seed_err)?;
        task_ids.insert(t.title, id);
        report.tasks += 1;
    }

    // Channels
    for (position, ch) in fixtures::channels().into_iter().enumerate() {
        let task_id = ch.task.map(|title| task_ids[title]);
        sqlx::query(
            r#"
            INSERT INTO channels (community_id, name, kind, topic, task_id, position)
            VALUES ($1, $2, $3::channel_type, $4, $5, $6)
            "#,
        )
        .bind(community_ids[ch.community])
        .bind(ch.name)
        .bind(ch.kind)
        .bind(ch.topic)
        .bind(task_id)
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.channels += 1;
    }

    // Events
    let now = Utc::now();
    for e in fixtures::events() {
        let starts_at = now + Duration::days(e.starts_in_days);
        let ends_at = starts_at + Duration::hours(e.duration_hours);
        sqlx::query(
            r#"
            INSERT INTO events
                (community_id, organizer_id, title, description, kind, status,
                 location, starts_at, ends_at, capacity)
            VALUES ($1, $2, $3, $4, $5::event_type, $6::event_status, $7, $8, $9, $10)
            "#,
        )
        .bind(community_ids[e.community])
        .bind(user_ids[e.organizer])
        .bind(e.title)
        .bind(e.description)
        .bind(e.kind)
        .bind(e.status)
        .bind(e.location)
        .bind(starts_at)
        .bind(ends_at)
        .bind(e.capacity)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.events += 1;
    }

    // Contribution heatmap rows. Volume is intentionally nondeterministic
    // (per-day coin flip), structure is not.
    let today = now.date_naive();
    // StdRng rather than thread_rng: the future must stay Send across the
    // insert awaits.
    let mut rng = StdRng::from_entropy();
    for username in fixtures::HEATMAP_USERS {
        let user_id = user_ids[username];
        for day in 0..fixtures::HEATMAP_DAYS {
            if !rng.gen_bool(fixtures::HEATMAP_DAILY_PROBABILITY) {
                continue;
            }
            let (kind, weight) =
                fixtures::CONTRIBUTION_KINDS[rng.gen_range(0..fixtures::CONTRIBUTION_KINDS.len())];
            sqlx::query(
                r#"
                INSERT INTO contributions (user_id, kind, weight, occurred_on)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(user_id)
            .bind(kind)
            .bind(weight)
            .bind(today - Duration::days(day as i64))
            .execute(&mut **tx)
            .await
            .map_err(seed_err)?;
            report.contributions += 1;
        }
    }

    // Portfolios and entries
    let mut portfolio_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for p in fixtures::portfolios() {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO portfolios (user_id, headline, summary)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_ids[p.user])
        .bind(p.headline)
        .bind(p.summary)
        .fetch_one(&mut **tx)
        .await
        .map_err(seed_err)?;
        portfolio_ids.insert(p.user, id);
        report.portfolios += 1;
    }

    for entry in fixtures::portfolio_entries() {
        sqlx::query(
            r#"
            INSERT INTO portfolio_entries (portfolio_id, kind, title, community_id, occurred_at)
            VALUES ($1, $2::portfolio_entry_type, $3, $4, $5)
            "#,
        )
        .bind(portfolio_ids[entry.user])
        .bind(entry.kind)
        .bind(entry.title)
        .bind(entry.community.map(|slug| community_ids[slug]))
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.portfolio_entries += 1;
    }

    // Skills
    for s in fixtures::skills() {
        sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, name, level)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_ids[s.user])
        .bind(s.name)
        .bind(s.level)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.skills += 1;
    }

    // Reputation scores
    for r in fixtures::reputation_scores() {
        sqlx::query(
            r#"
            INSERT INTO reputation_scores (user_id, community_id, kind, score)
            VALUES ($1, $2, $3::score_type, $4::float8)
            "#,
        )
        .bind(user_ids[r.user])
        .bind(community_ids[r.community])
        .bind(r.kind)
        .bind(r.score)
        .execute(&mut **tx)
        .await
        .map_err(seed_err)?;
        report.reputation_scores += 1;
    }

    Ok(report)
}

fn seed_err(e: sqlx::Error) -> CommuneError {
    CommuneError::seed(e.to_string())
}

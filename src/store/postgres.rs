use anyhow::Context;
use axum::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{CardUpdate, ResultStore, ScratchCard, Student};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
        }

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgStore {
    async fn find_student(&self, student_id: &str) -> anyhow::Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn find_card_by_pin(&self, pin: &str) -> anyhow::Result<Option<ScratchCard>> {
        let card = sqlx::query_as::<_, ScratchCard>(
            r#"
            SELECT id, pin, student_id, uses, created_at
            FROM scratch_cards
            WHERE pin = $1
            "#,
        )
        .bind(pin)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }

    async fn consume_card_use(&self, pin: &str, observed_uses: i32) -> anyhow::Result<CardUpdate> {
        // Compare-and-commit in one statement: the decrement lands only if
        // the counter is still what the caller read. `uses > 0` keeps the
        // counter non-negative even for a stale positive snapshot.
        let remaining = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE scratch_cards
            SET uses = uses - 1
            WHERE pin = $1 AND uses = $2 AND uses > 0
            RETURNING uses
            "#,
        )
        .bind(pin)
        .bind(observed_uses)
        .fetch_optional(&self.pool)
        .await
        .context("decrement scratch card uses")?;

        Ok(match remaining {
            Some(remaining) => CardUpdate::Applied { remaining },
            None => CardUpdate::Conflict,
        })
    }
}

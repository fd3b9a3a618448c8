//! Postgres-backed store.
//!
//! Expected table:
//!
//! ```sql
//! CREATE TABLE resumes (
//!     id         UUID PRIMARY KEY,
//!     owner_id   UUID NOT NULL,
//!     title      TEXT NOT NULL,
//!     template   TEXT NOT NULL,
//!     content    JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE INDEX resumes_owner_idx ON resumes (owner_id, created_at);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumeRecord, ResumeUpdate};
use crate::store::{ResumeStore, StoreError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; `template` and `content` are decoded into their domain
/// types on the way out so a corrupt row surfaces as an error instead of a
/// panic.
#[derive(Debug, Clone, FromRow)]
struct ResumeRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    template: String,
    content: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ResumeRow> for ResumeRecord {
    type Error = StoreError;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        let template = row
            .template
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("resume {}: {e}", row.id)))?;
        let content = serde_json::from_value(row.content)
            .map_err(|e| StoreError::Corrupt(format!("resume {}: {e}", row.id)))?;
        Ok(ResumeRecord {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            template,
            content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let content = serde_json::to_value(&new.content)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, owner_id, title, template, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.owner_id)
        .bind(&new.title)
        .bind(new.template.as_str())
        .bind(&content)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!("created resume {id} for owner {}", new.owner_id);
        row.try_into()
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, id: Uuid, update: ResumeUpdate) -> Result<ResumeRecord, StoreError> {
        let content = update
            .content
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET title      = COALESCE($2::text, title),
                template   = COALESCE($3::text, template),
                content    = COALESCE($4::jsonb, content),
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.template.map(|t| t.as_str()))
        .bind(content)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        // Deleting an absent id is a no-op, same as the in-memory store.
        sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

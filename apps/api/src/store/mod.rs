//! Keyed persistence of résumé records.
//!
//! The store trusts the owner id it is given — the owner-matches-caller
//! check belongs to the routing layer. Callers always receive values, never
//! aliases into the store's internal state; a returned record can be
//! mutated freely without affecting what is persisted.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumeRecord, ResumeUpdate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resume {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Persistence contract for résumé records. Each operation is atomic from
/// the caller's point of view: create/update write a full record or leave
/// the prior state untouched. Last committed write wins; cross-record
/// transactions are out of scope.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Assigns a fresh id and stamps `created_at` = `updated_at` = now.
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;

    /// The complete set of one owner's records, sorted by `created_at`
    /// ascending.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError>;

    /// Merges only the supplied fields into the record and bumps
    /// `updated_at`. `id`, `owner_id`, and `created_at` are never touched.
    async fn update(&self, id: Uuid, update: ResumeUpdate) -> Result<ResumeRecord, StoreError>;

    /// Idempotent: deleting an id that does not exist is a silent no-op.
    /// The HTTP layer reports 404 for unknown ids before it gets here.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

//! In-memory store, used when no `DATABASE_URL` is configured and by the
//! test suite. Mirrors the Postgres implementation's observable behavior.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumeRecord, ResumeUpdate};
use crate::store::{ResumeStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, StoreError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            title: new.title,
            template: new.template,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let records = self.records.read().await;
        let mut owned: Vec<ResumeRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.created_at);
        Ok(owned)
    }

    async fn update(&self, id: Uuid, update: ResumeUpdate) -> Result<ResumeRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(template) = update.template {
            record.template = template;
        }
        if let Some(content) = update.content {
            record.content = content;
        }

        // updated_at must strictly increase across successive updates, even
        // when two writes land within the clock's resolution.
        let now = Utc::now();
        record.updated_at = if now > record.updated_at {
            now
        } else {
            record.updated_at + Duration::microseconds(1)
        };

        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::schema::ResumeContent;

/// The fixed set of cosmetic résumé styles. The choice is stored per record
/// and picks the document font family; it never affects content validation
/// or which sections render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateChoice {
    Professional,
    Modern,
    Minimal,
}

impl TemplateChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateChoice::Professional => "professional",
            TemplateChoice::Modern => "modern",
            TemplateChoice::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown template '{0}', expected professional | modern | minimal")]
pub struct UnknownTemplate(pub String);

impl std::str::FromStr for TemplateChoice {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(TemplateChoice::Professional),
            "modern" => Ok(TemplateChoice::Modern),
            "minimal" => Ok(TemplateChoice::Minimal),
            other => Err(UnknownTemplate(other.to_string())),
        }
    }
}

/// A persisted résumé. `id`, `owner_id`, and `created_at` are fixed at
/// creation; every mutation goes through the store and bumps `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub template: TemplateChoice,
    pub content: ResumeContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a record. The owner comes from the caller
/// identity, never from the request body.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub owner_id: Uuid,
    pub title: String,
    pub template: TemplateChoice,
    pub content: ResumeContent,
}

/// Partial update: only the supplied fields are merged into the record.
#[derive(Debug, Clone, Default)]
pub struct ResumeUpdate {
    pub title: Option<String>,
    pub template: Option<TemplateChoice>,
    pub content: Option<ResumeContent>,
}

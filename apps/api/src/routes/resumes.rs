//! Axum route handlers for the résumé CRUD, rendering, and generation API.
//!
//! Every handler requires a caller identity, and ownership is checked with
//! the single `belongs_to` predicate before a record is returned or
//! mutated. A record owned by someone else answers exactly like a record
//! that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::{belongs_to, CallerIdentity};
use crate::editor::{check_profile_picture, ImageError};
use crate::errors::AppError;
use crate::generation::{generate_content, GenerateResumeRequest};
use crate::models::resume::{NewResume, ResumeRecord, ResumeUpdate, TemplateChoice};
use crate::render::{page_config_for, render_preview, DocumentRenderer, PaginatedDocument};
use crate::schema::{self, ResumeContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    pub title: String,
    pub template: TemplateChoice,
    pub content: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    pub title: Option<String>,
    pub template: Option<TemplateChoice>,
    pub content: Option<Value>,
}

/// Runs the image guard and the content schema over a raw candidate.
/// The picture cap is checked first so an oversized payload is rejected
/// before the candidate enters validation or the store.
fn validated_content(candidate: &Value) -> Result<ResumeContent, AppError> {
    let picture = candidate
        .get("personalDetails")
        .and_then(|d| d.get("profilePicture"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    if let Some(picture) = picture {
        check_profile_picture(picture).map_err(|e| match e {
            ImageError::Oversize { .. } => AppError::PayloadTooLarge(e.to_string()),
            other => AppError::Validation(other.to_string()),
        })?;
    }

    schema::validate(candidate).map_err(AppError::Fields)
}

/// The record, if it exists and the caller owns it. Absent and not-owned
/// are indistinguishable in the reply.
async fn fetch_owned(
    state: &AppState,
    id: Uuid,
    caller: CallerIdentity,
) -> Result<ResumeRecord, AppError> {
    state
        .store
        .get(id)
        .await?
        .filter(|record| belongs_to(record, caller))
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let records = state.store.list_by_owner(caller.0).await?;
    Ok(Json(records))
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let content = validated_content(&request.content)?;
    let record = state
        .store
        .create(NewResume {
            owner_id: caller.0,
            title: request.title,
            template: request.template,
            content,
        })
        .await?;
    info!("created resume {} for caller {}", record.id, caller.0);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = fetch_owned(&state, id, caller).await?;
    Ok(Json(record))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    fetch_owned(&state, id, caller).await?;

    let content = request
        .content
        .as_ref()
        .map(validated_content)
        .transpose()?;
    let record = state
        .store
        .update(
            id,
            ResumeUpdate {
                title: request.title,
                template: request.template,
                content,
            },
        )
        .await?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:id
///
/// 404 for an id the caller does not own (or that never existed); the
/// store-level delete itself stays an idempotent no-op.
pub async fn handle_delete(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    fetch_owned(&state, id, caller).await?;
    state.store.delete(id).await?;
    info!("deleted resume {id} for caller {}", caller.0);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let record = fetch_owned(&state, id, caller).await?;
    Ok(Html(render_preview(&record.content)))
}

/// GET /api/v1/resumes/:id/document
///
/// The export view: the stored content laid out on fixed pages with the
/// record's template font.
pub async fn handle_document(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<PaginatedDocument>, AppError> {
    let record = fetch_owned(&state, id, caller).await?;
    let renderer = DocumentRenderer::new(page_config_for(record.template));
    Ok(Json(renderer.render(&record.content)))
}

/// POST /api/v1/resumes/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeContent>, AppError> {
    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::Unavailable("Resume generation is not configured".to_string())
    })?;
    let content = generate_content(llm, &request).await?;
    Ok(Json(content))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::Engine;
    use serde_json::json;

    use super::*;
    use crate::config::Config;
    use crate::render::document::BlockKind;
    use crate::store::memory::MemoryStore;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            llm: None,
            config: Config::for_tests(),
        }
    }

    fn candidate_with_one_experience() -> Value {
        json!({
            "personalDetails": {
                "fullName": "Grace Hopper",
                "email": "grace@example.com",
                "phone": "+1 555 0100",
                "location": "Arlington, VA",
                "summary": "Compiler pioneer."
            },
            "workExperience": [{
                "title": "Engineer",
                "company": "Acme",
                "location": "Remote",
                "startDate": "2020-01",
                "endDate": "2022-06",
                "description": "Built things"
            }],
            "education": [],
            "skills": [],
            "projects": []
        })
    }

    async fn create(
        state: &AppState,
        caller: CallerIdentity,
        content: Value,
    ) -> ResumeRecord {
        let (status, Json(record)) = handle_create(
            State(state.clone()),
            caller,
            Json(CreateResumeRequest {
                title: "My resume".to_string(),
                template: TemplateChoice::Modern,
                content,
            }),
        )
        .await
        .expect("create should succeed");
        assert_eq!(status, StatusCode::CREATED);
        record
    }

    #[tokio::test]
    async fn test_create_and_preview_single_experience_scenario() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let record = create(&state, caller, candidate_with_one_experience()).await;

        let Html(html) = handle_preview(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap();
        assert_eq!(html.matches("<h2>Experience</h2>").count(), 1);
        assert_eq!(html.matches("<h3>Engineer</h3>").count(), 1);
        assert!(!html.contains("<h2>Skills</h2>"));
        assert!(!html.contains("<h2>Education</h2>"));
        assert!(!html.contains("<h2>Projects</h2>"));
    }

    #[tokio::test]
    async fn test_both_renderers_agree_on_skill_tokens() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let mut candidate = candidate_with_one_experience();
        candidate["skills"] = json!(["Go", "Rust"]);
        let record = create(&state, caller, candidate).await;

        let Html(html) = handle_preview(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap();
        let go = html.find("<span class=\"skill\">Go</span>").unwrap();
        let rust = html.find("<span class=\"skill\">Rust</span>").unwrap();
        assert!(go < rust);

        let Json(document) = handle_document(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap();
        let skill_block = document
            .pages
            .iter()
            .flat_map(|p| &p.blocks)
            .find(|b| b.kind == BlockKind::SkillList)
            .expect("document should have a skill list");
        assert_eq!(skill_block.lines, vec!["Go".to_string(), "Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_with_field_path() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let mut candidate = candidate_with_one_experience();
        candidate["personalDetails"]["email"] = json!("not-an-email");

        let err = handle_create(
            State(state),
            caller,
            Json(CreateResumeRequest {
                title: "Broken".to_string(),
                template: TemplateChoice::Minimal,
                content: candidate,
            }),
        )
        .await
        .unwrap_err();

        match err {
            AppError::Fields(errors) => {
                assert!(errors.get("personalDetails.email").is_some());
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_round_trip_create_then_get() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let record = create(&state, caller, candidate_with_one_experience()).await;

        let Json(fetched) = handle_get(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&fetched.content).unwrap(),
            candidate_with_one_experience()
        );
    }

    #[tokio::test]
    async fn test_owner_mismatch_is_reported_as_not_found() {
        let state = test_state();
        let owner = CallerIdentity(Uuid::new_v4());
        let intruder = CallerIdentity(Uuid::new_v4());
        let record = create(&state, owner, candidate_with_one_experience()).await;

        for result in [
            handle_get(State(state.clone()), intruder, Path(record.id))
                .await
                .map(|_| ()),
            handle_delete(State(state.clone()), intruder, Path(record.id))
                .await
                .map(|_| ()),
            handle_update(
                State(state.clone()),
                intruder,
                Path(record.id),
                Json(UpdateResumeRequest::default()),
            )
            .await
            .map(|_| ()),
        ] {
            assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
        }

        // The record is untouched for its owner.
        assert!(handle_get(State(state.clone()), owner, Path(record.id))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_list_returns_only_the_callers_records() {
        let state = test_state();
        let alice = CallerIdentity(Uuid::new_v4());
        let bob = CallerIdentity(Uuid::new_v4());
        create(&state, alice, candidate_with_one_experience()).await;
        create(&state, bob, candidate_with_one_experience()).await;

        let Json(records) = handle_list(State(state.clone()), alice).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner_id, alice.0);
    }

    #[tokio::test]
    async fn test_update_title_bumps_updated_at_only() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let record = create(&state, caller, candidate_with_one_experience()).await;

        let Json(updated) = handle_update(
            State(state.clone()),
            caller,
            Path(record.id),
            Json(UpdateResumeRequest {
                title: Some("X".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "X");
        assert!(updated.updated_at > record.updated_at);
        assert_eq!(updated.content, record.content);
        assert_eq!(updated.owner_id, record.owner_id);
        assert_eq!(updated.created_at, record.created_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let record = create(&state, caller, candidate_with_one_experience()).await;

        let status = handle_delete(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = handle_get(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Route-level delete of a gone id reports not-found; the store
        // itself stays idempotent underneath.
        let err = handle_delete(State(state.clone()), caller, Path(record.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_oversize_profile_picture_rejected_before_storage() {
        let state = test_state();
        let caller = CallerIdentity(Uuid::new_v4());
        let mut candidate = candidate_with_one_experience();
        let payload = base64::engine::general_purpose::STANDARD
            .encode(vec![0u8; crate::editor::MAX_PICTURE_BYTES + 1]);
        candidate["personalDetails"]["profilePicture"] =
            json!(format!("data:image/png;base64,{payload}"));

        let err = handle_create(
            State(state.clone()),
            caller,
            Json(CreateResumeRequest {
                title: "Big".to_string(),
                template: TemplateChoice::Professional,
                content: candidate,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));

        let Json(records) = handle_list(State(state), caller).await.unwrap();
        assert!(records.is_empty(), "nothing may be stored on rejection");
    }

    #[tokio::test]
    async fn test_generate_without_llm_is_unavailable() {
        let state = test_state();
        let err = handle_generate(
            State(state),
            CallerIdentity(Uuid::new_v4()),
            Json(GenerateResumeRequest {
                job_title: "Engineer".to_string(),
                years_of_experience: "5".to_string(),
                industry: "Tech".to_string(),
                skills: vec![],
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }
}

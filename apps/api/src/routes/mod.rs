pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list).post(resumes::handle_create),
        )
        .route("/api/v1/resumes/generate", post(resumes::handle_generate))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .patch(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .route("/api/v1/resumes/:id/preview", get(resumes::handle_preview))
        .route(
            "/api/v1/resumes/:id/document",
            get(resumes::handle_document),
        )
        .with_state(state)
}

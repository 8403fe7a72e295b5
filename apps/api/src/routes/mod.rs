pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Intake and mapping
        .route("/process-resume/", post(handlers::handle_process_resume))
        .route(
            "/process-resume-from-url/",
            post(handlers::handle_process_resume_from_url),
        )
        .route("/map-criteria/", post(handlers::handle_map_criteria))
        .route("/process-and-map/", post(handlers::handle_process_and_map))
        .route(
            "/process-and-map-from-url/",
            post(handlers::handle_process_and_map_from_url),
        )
        // Full assessment
        .route("/full-assessment/", post(handlers::handle_full_assessment))
        .route(
            "/full-assessment-from-url/",
            post(handlers::handle_full_assessment_from_url),
        )
        .route("/agent-status/", get(handlers::handle_agent_status))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

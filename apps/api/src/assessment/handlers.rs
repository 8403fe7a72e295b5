use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::intake::document::{extract_text_from_pdf, extract_text_from_url};
use crate::intake::structuring::structure_resume;
use crate::mapping::mapper::map_resume_to_criteria;
use crate::models::assessment::AssessmentResult;
use crate::models::criteria::CriteriaMapping;
use crate::models::resume::StructuredResume;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct UrlInput {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StructuredResumeResponse {
    pub structured_resume: StructuredResume,
}

#[derive(Debug, Serialize)]
pub struct CriteriaMappingResponse {
    pub criteria_mapping: CriteriaMapping,
}

#[derive(Debug, Serialize)]
pub struct ProcessAndMapResponse {
    pub structured_resume: StructuredResume,
    pub criteria_mapping: CriteriaMapping,
}

#[derive(Debug, Serialize)]
pub struct FullAssessmentResponse {
    pub structured_resume: StructuredResume,
    pub criteria_mapping: CriteriaMapping,
    pub assessment_result: AssessmentResult,
}

#[derive(Debug, Serialize)]
pub struct AgentStatusResponse {
    pub status: BTreeMap<String, &'static str>,
}

/// POST /process-resume/
pub async fn handle_process_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<StructuredResumeResponse>, AppError> {
    let structured_resume = structure_upload(&state, multipart).await?;
    Ok(Json(StructuredResumeResponse { structured_resume }))
}

/// POST /process-resume-from-url/
pub async fn handle_process_resume_from_url(
    State(state): State<AppState>,
    Json(input): Json<UrlInput>,
) -> Result<Json<StructuredResumeResponse>, AppError> {
    let structured_resume = structure_from_url(&state, &input.url).await?;
    Ok(Json(StructuredResumeResponse { structured_resume }))
}

/// POST /map-criteria/
///
/// Body is a structured resume; unknown or missing sections are tolerated.
pub async fn handle_map_criteria(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<CriteriaMappingResponse> {
    let resume = StructuredResume::from_value(body);
    let criteria_mapping = map(&state, &resume).await;
    Json(CriteriaMappingResponse { criteria_mapping })
}

/// POST /process-and-map/
pub async fn handle_process_and_map(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessAndMapResponse>, AppError> {
    let structured_resume = structure_upload(&state, multipart).await?;
    let criteria_mapping = map(&state, &structured_resume).await;
    Ok(Json(ProcessAndMapResponse {
        structured_resume,
        criteria_mapping,
    }))
}

/// POST /process-and-map-from-url/
pub async fn handle_process_and_map_from_url(
    State(state): State<AppState>,
    Json(input): Json<UrlInput>,
) -> Result<Json<ProcessAndMapResponse>, AppError> {
    let structured_resume = structure_from_url(&state, &input.url).await?;
    let criteria_mapping = map(&state, &structured_resume).await;
    Ok(Json(ProcessAndMapResponse {
        structured_resume,
        criteria_mapping,
    }))
}

/// POST /full-assessment/
pub async fn handle_full_assessment(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FullAssessmentResponse>, AppError> {
    let structured_resume = structure_upload(&state, multipart).await?;
    Ok(Json(assess(&state, structured_resume).await))
}

/// POST /full-assessment-from-url/
pub async fn handle_full_assessment_from_url(
    State(state): State<AppState>,
    Json(input): Json<UrlInput>,
) -> Result<Json<FullAssessmentResponse>, AppError> {
    let structured_resume = structure_from_url(&state, &input.url).await?;
    Ok(Json(assess(&state, structured_resume).await))
}

/// GET /agent-status/
pub async fn handle_agent_status(State(state): State<AppState>) -> Json<AgentStatusResponse> {
    Json(AgentStatusResponse {
        status: state.manager.agent_status(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline steps shared by the handlers
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `file` field. Its filename must end in `.pdf`.
async fn read_pdf_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }
        let data = field.bytes().await?;
        info!("Received upload '{file_name}' ({} bytes)", data.len());
        return Ok(data);
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

async fn structure_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<StructuredResume, AppError> {
    let data = read_pdf_upload(multipart).await?;
    let raw_text = extract_text_from_pdf(data).await?;
    Ok(structure_resume(&raw_text, state.model.as_ref()).await)
}

async fn structure_from_url(state: &AppState, url: &str) -> Result<StructuredResume, AppError> {
    let raw_text = extract_text_from_url(&state.http, url).await?;
    info!("Extracted {} chars from remote resume", raw_text.len());
    Ok(structure_resume(&raw_text, state.model.as_ref()).await)
}

async fn map(state: &AppState, resume: &StructuredResume) -> CriteriaMapping {
    map_resume_to_criteria(
        resume,
        state.model.as_ref(),
        state.config.enhance_mapping_threshold,
    )
    .await
}

async fn assess(state: &AppState, structured_resume: StructuredResume) -> FullAssessmentResponse {
    let criteria_mapping = map(state, &structured_resume).await;
    let assessment_result = state
        .manager
        .coordinate_assessment(&structured_resume, &criteria_mapping)
        .await;
    FullAssessmentResponse {
        structured_resume,
        criteria_mapping,
        assessment_result,
    }
}

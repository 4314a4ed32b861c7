use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::assessment_dto::{
        AssessmentDto, AssessmentResponseDto, SubmitAssessmentPayload, UpsertAssessmentPayload,
        VisibilityRequest, VisibilityResponse,
    },
    error::Result,
    extract::{ApiJson, ApiPath},
    middleware::actor::Actor,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "All assessments", body = Json<Vec<AssessmentDto>>)
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assessments = state.assessment_service.list().await?;
    let items: Vec<AssessmentDto> = assessments.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Assessment for the job", body = Json<AssessmentDto>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_by_job(job_id).await?;
    Ok(Json(AssessmentDto::from(assessment)))
}

#[utoipa::path(
    put,
    path = "/api/assessments/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpsertAssessmentPayload,
    responses(
        (status = 200, description = "Assessment saved", body = Json<AssessmentDto>),
        (status = 400, description = "Invalid form definition"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn upsert_assessment(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpsertAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state.assessment_service.upsert(job_id, payload).await?;
    Ok(Json(AssessmentDto::from(assessment)))
}

/// Evaluates conditional questions against a partial set of answers
/// without storing anything.
#[utoipa::path(
    post,
    path = "/api/assessments/{job_id}/visibility",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = VisibilityRequest,
    responses(
        (status = 200, description = "Visible question and section ids", body = Json<VisibilityResponse>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn check_visibility(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<VisibilityRequest>,
) -> Result<impl IntoResponse> {
    let visibility = state
        .assessment_service
        .visibility(job_id, &payload.answers)
        .await?;
    Ok(Json(VisibilityResponse {
        visible_questions: visibility.questions,
        visible_sections: visibility.sections,
    }))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{job_id}/submit",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = SubmitAssessmentPayload,
    responses(
        (status = 201, description = "Response recorded", body = Json<AssessmentResponseDto>),
        (status = 400, description = "Missing or invalid answers"),
        (status = 404, description = "Assessment or candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(job_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SubmitAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state
        .assessment_service
        .submit(job_id, payload, &actor)
        .await?;
    Ok((StatusCode::CREATED, Json(AssessmentResponseDto::from(response))))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{job_id}/responses",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Stored responses, newest first", body = Json<Vec<AssessmentResponseDto>>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let responses = state.assessment_service.responses(job_id).await?;
    let items: Vec<AssessmentResponseDto> = responses.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

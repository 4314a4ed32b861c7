use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        job_list_response, CreateJobPayload, JobListQuery, JobListResponse, JobResponse,
        ReorderJobPayload, ReorderJobResponse, UpdateJobPayload,
    },
    error::Result,
    extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or slug"),
        ("status" = Option<String>, Query, description = "active, archived or all"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("pageSize" = Option<i64>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "order, title or createdAt")
    ),
    responses(
        (status = 200, description = "Page of jobs", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    let response: JobListResponse = job_list_response(result.items, result.pagination);
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload or duplicate slug")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload or duplicate slug"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}/reorder",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = ReorderJobPayload,
    responses(
        (status = 200, description = "Job moved", body = Json<ReorderJobResponse>),
        (status = 400, description = "Target order out of range"),
        (status = 404, description = "No job at the source order"),
        (status = 409, description = "Job is no longer at the source order")
    )
)]
#[axum::debug_handler]
pub async fn reorder_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ReorderJobPayload>,
) -> Result<impl IntoResponse> {
    state
        .job_service
        .reorder(id, payload.from_order, payload.to_order)
        .await?;
    Ok(Json(ReorderJobResponse { success: true }))
}

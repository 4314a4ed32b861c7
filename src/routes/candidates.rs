use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        candidate_list_response, CandidateListQuery, CandidateListResponse, CandidateResponse,
        CreateCandidatePayload, TimelineEventResponse, UpdateCandidatePayload,
    },
    dto::note_dto::{CreateNotePayload, NoteResponse},
    error::Result,
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::actor::Actor,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or email"),
        ("stage" = Option<String>, Query, description = "Pipeline stage"),
        ("jobId" = Option<Uuid>, Query, description = "Job ID"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("pageSize" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of candidates", body = Json<CandidateListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.candidate_service.list_candidates(query).await?;
    let response: CandidateListResponse =
        candidate_list_response(result.items, result.pagination);
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Json<CandidateResponse>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_candidate(id).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = Json<CandidateResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.create_candidate(payload).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = Json<CandidateResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate or job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state
        .candidate_service
        .update_candidate(id, payload, &actor)
        .await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/timeline",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Timeline, newest first", body = Json<Vec<TimelineEventResponse>>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_timeline(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let events = state.timeline_service.list_for_candidate(id).await?;
    let items: Vec<TimelineEventResponse> = events.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/notes",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Notes, newest first", body = Json<Vec<NoteResponse>>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn list_notes(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let notes = state.note_service.list_for_candidate(id).await?;
    let items: Vec<NoteResponse> = notes.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/notes",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = CreateNotePayload,
    responses(
        (status = 201, description = "Note added", body = Json<NoteResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn add_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CreateNotePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let note = state.note_service.add_note(id, payload, &actor).await?;
    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

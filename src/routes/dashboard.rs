use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::candidate_dto::{RecentActivityQuery, RecentActivityResponse},
    dto::stats_dto::DashboardStats,
    error::Result,
    extract::ApiQuery,
    models::team_member::TeamMember,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = Json<DashboardStats>)
    )
)]
#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats: DashboardStats = state.stats_service.dashboard().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/timeline/recent",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of events, defaults to 5")
    ),
    responses(
        (status = 200, description = "Latest timeline events across all candidates", body = Json<Vec<RecentActivityResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn recent_activity(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentActivityQuery>,
) -> Result<impl IntoResponse> {
    let rows = state
        .timeline_service
        .recent(query.limit.unwrap_or_default())
        .await?;
    let items: Vec<RecentActivityResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/team-members",
    responses(
        (status = 200, description = "Team members available for mentions", body = Json<Vec<TeamMember>>)
    )
)]
#[axum::debug_handler]
pub async fn list_team_members(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let members: Vec<TeamMember> = state.team_service.list().await?;
    Ok(Json(members))
}

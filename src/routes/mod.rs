pub mod assessments;
pub mod candidates;
pub mod dashboard;
pub mod health;
pub mod jobs;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::{
    middleware::{actor::resolve_actor, cors::api_cors, faults::inject_faults},
    AppState,
};

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Builds the full HTTP surface: `/health` plus everything under `/api`.
pub fn router(state: AppState) -> Router {
    let jobs_api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:id", get(jobs::get_job).patch(jobs::update_job))
        .route("/api/jobs/:id/reorder", patch(jobs::reorder_job));

    let candidates_api = Router::new()
        .route(
            "/api/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate).patch(candidates::update_candidate),
        )
        .route("/api/candidates/:id/timeline", get(candidates::get_timeline))
        .route(
            "/api/candidates/:id/notes",
            get(candidates::list_notes).post(candidates::add_note),
        );

    let assessments_api = Router::new()
        .route("/api/assessments", get(assessments::list_assessments))
        .route(
            "/api/assessments/:job_id",
            get(assessments::get_assessment).put(assessments::upsert_assessment),
        )
        .route(
            "/api/assessments/:job_id/visibility",
            post(assessments::check_visibility),
        )
        .route(
            "/api/assessments/:job_id/submit",
            post(assessments::submit_assessment),
        )
        .route(
            "/api/assessments/:job_id/responses",
            get(assessments::list_responses),
        );

    let dashboard_api = Router::new()
        .route("/api/stats", get(dashboard::get_stats))
        .route("/api/timeline/recent", get(dashboard::recent_activity))
        .route("/api/team-members", get(dashboard::list_team_members));

    let mut api = jobs_api
        .merge(candidates_api)
        .merge(assessments_api)
        .merge(dashboard_api)
        .layer(axum::middleware::from_fn_with_state(
            state.default_actor.clone(),
            resolve_actor,
        ));

    if let Some(faults) = state.faults.clone() {
        api = api.layer(axum::middleware::from_fn_with_state(faults, inject_faults));
    }

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(api_cors())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

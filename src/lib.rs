pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::middleware::{
    actor::Actor,
    faults::{RandomFaults, SharedFaults},
};
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService, note_service::NoteService, stats_service::StatsService,
    team_service::TeamService, timeline_service::TimelineService,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub note_service: NoteService,
    pub timeline_service: TimelineService,
    pub assessment_service: AssessmentService,
    pub stats_service: StatsService,
    pub team_service: TeamService,
    /// Used when a request carries no `x-user-id` / `x-user-name` headers.
    pub default_actor: Actor,
    /// Present only when latency or failure simulation is switched on.
    pub faults: Option<SharedFaults>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let faults = RandomFaults::from_config(config);
        let faults: Option<SharedFaults> = if faults.is_active() {
            Some(Arc::new(faults))
        } else {
            None
        };

        Self {
            job_service: JobService::new(pool.clone()),
            candidate_service: CandidateService::new(pool.clone()),
            note_service: NoteService::new(pool.clone()),
            timeline_service: TimelineService::new(pool.clone()),
            assessment_service: AssessmentService::new(pool.clone()),
            stats_service: StatsService::new(pool.clone()),
            team_service: TeamService::new(pool.clone()),
            default_actor: Actor::new(
                config.default_actor_id.clone(),
                config.default_actor_name.clone(),
            ),
            faults,
            pool,
        }
    }
}

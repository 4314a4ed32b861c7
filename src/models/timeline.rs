use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::candidate::CandidateStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TimelineEventType {
    StageChange,
    NoteAdded,
    AssessmentCompleted,
}

#[derive(Debug, Clone, FromRow)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub event_type: TimelineEventType,
    pub from_stage: Option<CandidateStage>,
    pub to_stage: Option<CandidateStage>,
    pub note: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Event joined with the candidate and job it concerns, for activity feeds.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    #[sqlx(flatten)]
    pub event: TimelineEvent,
    pub candidate_name: Option<String>,
    pub candidate_avatar: Option<String>,
    pub job_title: Option<String>,
}

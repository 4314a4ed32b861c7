use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::pagination::{Paginated, Pagination};
use crate::models::candidate::{Candidate, CandidateStage};
use crate::models::timeline::{ActivityRow, TimelineEvent, TimelineEventType};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub job_id: Uuid,
    pub stage: Option<CandidateStage>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub job_id: Option<Uuid>,
    pub stage: Option<CandidateStage>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<CandidateStage>,
    pub job_id: Option<Uuid>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_id: Uuid,
    pub stage: CandidateStage,
    pub applied_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

pub type CandidateListResponse = Paginated<CandidateResponse>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEventResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub event_type: TimelineEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_stage: Option<CandidateStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_stage: Option<CandidateStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityResponse {
    #[serde(flatten)]
    pub event: TimelineEventResponse,
    pub candidate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_avatar: Option<String>,
    pub job_title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentActivityQuery {
    pub limit: Option<i64>,
}

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            job_id: value.job_id,
            stage: value.stage,
            applied_date: value.applied_at,
            avatar_url: value.avatar_url,
        }
    }
}

impl From<TimelineEvent> for TimelineEventResponse {
    fn from(value: TimelineEvent) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            event_type: value.event_type,
            from_stage: value.from_stage,
            to_stage: value.to_stage,
            note: value.note,
            timestamp: value.created_at,
            user_id: value.user_id,
            user_name: value.user_name,
        }
    }
}

impl From<ActivityRow> for RecentActivityResponse {
    fn from(value: ActivityRow) -> Self {
        Self {
            event: value.event.into(),
            candidate_name: value
                .candidate_name
                .unwrap_or_else(|| "Unknown Candidate".to_string()),
            candidate_avatar: value.candidate_avatar,
            job_title: value.job_title.unwrap_or_else(|| "Unknown Job".to_string()),
        }
    }
}

pub fn candidate_list_response(
    items: Vec<Candidate>,
    pagination: Pagination,
) -> CandidateListResponse {
    Paginated {
        data: items.into_iter().map(Into::into).collect(),
        pagination,
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::assessment::{Answer, Assessment, AssessmentResponse, Section};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAssessmentPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentPayload {
    pub assessment_id: Option<Uuid>,
    pub candidate_id: Uuid,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub completion_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResponse {
    pub visible_questions: Vec<String>,
    pub visible_sections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponseDto {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_id: Uuid,
    pub answers: Vec<Answer>,
    pub submitted_at: DateTime<Utc>,
    pub completion_time: i64,
}

impl From<Assessment> for AssessmentDto {
    fn from(value: Assessment) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            title: value.title,
            description: value.description,
            sections: value.sections.0,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<AssessmentResponse> for AssessmentResponseDto {
    fn from(value: AssessmentResponse) -> Self {
        Self {
            id: value.id,
            assessment_id: value.assessment_id,
            candidate_id: value.candidate_id,
            answers: value.answers.0,
            submitted_at: value.submitted_at,
            completion_time: value.completion_time_seconds,
        }
    }
}

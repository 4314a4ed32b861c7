use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::pagination::{Paginated, Pagination};
use crate::models::job::{Job, JobStatus};
use crate::utils::slug::validate_slug;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderJobPayload {
    pub from_order: i64,
    pub to_order: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatusFilter {
    Active,
    Archived,
    #[default]
    All,
}

impl JobStatusFilter {
    pub fn status(&self) -> Option<JobStatus> {
        match self {
            JobStatusFilter::Active => Some(JobStatus::Active),
            JobStatusFilter::Archived => Some(JobStatus::Archived),
            JobStatusFilter::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSort {
    #[default]
    #[serde(rename = "order")]
    Order,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: JobStatusFilter,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: JobSort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderJobResponse {
    pub success: bool,
}

pub type JobListResponse = Paginated<JobResponse>;

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            slug: value.slug,
            status: value.status,
            tags: value.tags.0,
            order: value.sort_order,
            created_at: value.created_at,
        }
    }
}

pub fn job_list_response(items: Vec<Job>, pagination: Pagination) -> JobListResponse {
    Paginated {
        data: items.into_iter().map(Into::into).collect(),
        pagination,
    }
}

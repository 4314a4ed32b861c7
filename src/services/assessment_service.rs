use crate::dto::assessment_dto::{SubmitAssessmentPayload, UpsertAssessmentPayload};
use crate::error::{Error, Result};
use crate::middleware::actor::Actor;
use crate::models::assessment::{Answer, Assessment, AssessmentResponse};
use crate::services::candidate_service::fetch_candidate;
use crate::services::timeline_service::{TimelineEntry, TimelineService};
use crate::utils::answers::check_submission;
use crate::utils::form::normalize_sections;
use crate::utils::time::now;
use crate::utils::visibility::{evaluate, Visibility};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

const ASSESSMENT_COLUMNS: &str = "id, job_id, title, description, sections, created_at, updated_at";
const RESPONSE_COLUMNS: &str =
    "id, assessment_id, candidate_id, answers, completion_time_seconds, submitted_at";

#[derive(Clone)]
pub struct AssessmentService {
    pool: SqlitePool,
}

impl AssessmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Assessment>> {
        let items = sqlx::query_as::<_, Assessment>(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments ORDER BY updated_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn get_by_job(&self, job_id: Uuid) -> Result<Assessment> {
        let mut conn = self.pool.acquire().await?;
        fetch_for_job(&mut conn, job_id).await
    }

    /// Creates the job's assessment or replaces the existing one in place,
    /// keeping its id and creation time.
    pub async fn upsert(&self, job_id: Uuid, payload: UpsertAssessmentPayload) -> Result<Assessment> {
        let job: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = ?")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            return Err(Error::NotFound(format!("Job {} not found", job_id)));
        }

        let sections =
            normalize_sections(payload.sections).map_err(|problems| Error::BadRequest(problems.join("; ")))?;
        let stamp = now();

        let assessment = sqlx::query_as::<_, Assessment>(&format!(
            r#"
            INSERT INTO assessments ({ASSESSMENT_COLUMNS})
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(job_id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                sections = excluded.sections,
                updated_at = excluded.updated_at
            RETURNING {ASSESSMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(job_id)
        .bind(payload.title.trim())
        .bind(payload.description)
        .bind(Json(&sections))
        .bind(stamp)
        .bind(stamp)
        .fetch_one(&self.pool)
        .await?;

        info!(
            assessment_id = %assessment.id,
            job_id = %job_id,
            questions = assessment.questions().count(),
            "assessment saved"
        );
        Ok(assessment)
    }

    pub async fn visibility(&self, job_id: Uuid, answers: &[Answer]) -> Result<Visibility> {
        let assessment = self.get_by_job(job_id).await?;
        Ok(evaluate(&assessment.sections, answers))
    }

    /// Stores a response after checking it against the form as the
    /// candidate saw it, and records completion on the candidate timeline.
    pub async fn submit(
        &self,
        job_id: Uuid,
        payload: SubmitAssessmentPayload,
        actor: &Actor,
    ) -> Result<AssessmentResponse> {
        let mut tx = self.pool.begin().await?;
        let assessment = fetch_for_job(&mut tx, job_id).await?;
        if let Some(claimed) = payload.assessment_id {
            if claimed != assessment.id {
                return Err(Error::BadRequest(format!(
                    "Assessment {} does not belong to job {}",
                    claimed, job_id
                )));
            }
        }
        fetch_candidate(&mut tx, payload.candidate_id).await?;

        let answers = check_submission(&assessment.sections, &payload.answers).map_err(|issues| {
            Error::BadRequest(
                issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        let response = sqlx::query_as::<_, AssessmentResponse>(&format!(
            "INSERT INTO assessment_responses ({RESPONSE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?) RETURNING {RESPONSE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(assessment.id)
        .bind(payload.candidate_id)
        .bind(Json(&answers))
        .bind(payload.completion_time.max(0))
        .bind(now())
        .fetch_one(&mut *tx)
        .await?;

        TimelineService::append(
            &mut tx,
            payload.candidate_id,
            TimelineEntry::AssessmentCompleted(&assessment.title),
            actor,
        )
        .await?;

        tx.commit().await?;
        info!(
            response_id = %response.id,
            assessment_id = %assessment.id,
            candidate_id = %payload.candidate_id,
            answers = answers.len(),
            "assessment response submitted"
        );
        Ok(response)
    }

    pub async fn responses(&self, job_id: Uuid) -> Result<Vec<AssessmentResponse>> {
        let assessment = self.get_by_job(job_id).await?;
        let items = sqlx::query_as::<_, AssessmentResponse>(&format!(
            "SELECT {RESPONSE_COLUMNS} FROM assessment_responses WHERE assessment_id = ? ORDER BY submitted_at DESC, rowid DESC"
        ))
        .bind(assessment.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

async fn fetch_for_job(conn: &mut SqliteConnection, job_id: Uuid) -> Result<Assessment> {
    sqlx::query_as::<_, Assessment>(&format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE job_id = ?"
    ))
    .bind(job_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound("Assessment not found".into()))
}

use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::dto::pagination::{page_window, Pagination};
use crate::error::{Error, Result};
use crate::middleware::actor::Actor;
use crate::models::candidate::{Candidate, CandidateStage};
use crate::services::like_contains;
use crate::services::timeline_service::{TimelineEntry, TimelineService};
use crate::utils::time::now;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

const CANDIDATE_COLUMNS: &str = "id, name, email, job_id, stage, applied_at, avatar_url";

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
}

pub struct CandidateList {
    pub items: Vec<Candidate>,
    pub pagination: Pagination,
}

impl CandidateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Candidate> {
        let mut conn = self.pool.acquire().await?;
        fetch_candidate(&mut conn, id).await
    }

    pub async fn create_candidate(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let mut conn = self.pool.acquire().await?;
        ensure_job_exists(&mut conn, payload.job_id).await?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates ({CANDIDATE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(payload.name.trim())
        .bind(payload.email.trim())
        .bind(payload.job_id)
        .bind(payload.stage.unwrap_or(CandidateStage::Applied))
        .bind(now())
        .bind(payload.avatar_url)
        .fetch_one(&mut *conn)
        .await?;

        info!(candidate_id = %candidate.id, job_id = %candidate.job_id, "candidate created");
        Ok(candidate)
    }

    /// Applies a partial update. A stage change and its timeline event are
    /// committed together; re-sending the current stage records nothing.
    pub async fn update_candidate(
        &self,
        id: Uuid,
        payload: UpdateCandidatePayload,
        actor: &Actor,
    ) -> Result<Candidate> {
        let mut tx = self.pool.begin().await?;
        let current = fetch_candidate(&mut tx, id).await?;

        if let Some(job_id) = payload.job_id {
            if job_id != current.job_id {
                ensure_job_exists(&mut tx, job_id).await?;
            }
        }

        let next_stage = payload.stage.unwrap_or(current.stage);
        let updated = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET name = ?, email = ?, job_id = ?, stage = ?, avatar_url = ? WHERE id = ? RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(payload.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(payload.email.as_deref().map(str::trim).unwrap_or(&current.email))
        .bind(payload.job_id.unwrap_or(current.job_id))
        .bind(next_stage)
        .bind(payload.avatar_url.as_deref().or(current.avatar_url.as_deref()))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(change) = current.stage.transition(next_stage) {
            TimelineService::append(&mut tx, id, TimelineEntry::StageChanged(change), actor)
                .await?;
            info!(
                candidate_id = %id,
                from = change.from.as_str(),
                to = change.to.as_str(),
                actor = %actor.id,
                "candidate stage changed"
            );
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_candidates(&self, query: CandidateListQuery) -> Result<CandidateList> {
        let (page, page_size) = page_window(query.page, query.page_size, 50, 1000);

        let mut filters = Vec::new();
        let mut text_args: Vec<String> = Vec::new();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filters.push(
                "(LOWER(name) LIKE ? ESCAPE '\\' OR LOWER(email) LIKE ? ESCAPE '\\')".to_string(),
            );
            text_args.push(like_contains(search));
            text_args.push(like_contains(search));
        }
        if let Some(stage) = query.stage {
            filters.push("stage = ?".to_string());
            text_args.push(stage.as_str().to_string());
        }
        if query.job_id.is_some() {
            filters.push("job_id = ?".to_string());
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let total_query = format!("SELECT COUNT(*) FROM candidates {}", where_clause);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &text_args {
            total_statement = total_statement.bind(value);
        }
        if let Some(job_id) = query.job_id {
            total_statement = total_statement.bind(job_id);
        }
        let total = total_statement.fetch_one(&self.pool).await?;
        let pagination = Pagination::new(page, page_size, total);

        let items_query = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates {} ORDER BY applied_at DESC, rowid DESC LIMIT ? OFFSET ?",
            where_clause
        );
        let mut items_statement = sqlx::query_as::<_, Candidate>(&items_query);
        for value in &text_args {
            items_statement = items_statement.bind(value);
        }
        if let Some(job_id) = query.job_id {
            items_statement = items_statement.bind(job_id);
        }
        let items = items_statement
            .bind(pagination.page_size)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(CandidateList { items, pagination })
    }
}

pub(crate) async fn fetch_candidate(conn: &mut SqliteConnection, id: Uuid) -> Result<Candidate> {
    sqlx::query_as::<_, Candidate>(&format!(
        "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound("Candidate not found".into()))
}

async fn ensure_job_exists(conn: &mut SqliteConnection, job_id: Uuid) -> Result<()> {
    let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_optional(&mut *conn)
        .await?;
    found
        .map(|_| ())
        .ok_or_else(|| Error::NotFound(format!("Job {} not found", job_id)))
}

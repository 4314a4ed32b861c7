use crate::dto::job_dto::{CreateJobPayload, JobListQuery, JobSort, UpdateJobPayload};
use crate::dto::pagination::{page_window, Pagination};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::services::like_contains;
use crate::utils::ordering::{apply_changes, is_dense, plan_reorder, OrderSlot, ReorderError};
use crate::utils::slug::slugify;
use crate::utils::time::now;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, slug, status, tags, sort_order, created_at";

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub pagination: Pagination,
}

impl JobService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let slug = match payload.slug {
            Some(slug) => slug,
            None => slugify(&payload.title),
        };
        if slug.is_empty() {
            return Err(Error::BadRequest(
                "Title must contain letters or digits to derive a slug".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        ensure_slug_free(&mut tx, &slug, None).await?;

        let next_order: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&mut *tx)
            .await?;

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs ({JOB_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {JOB_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(payload.status.unwrap_or(JobStatus::Active))
        .bind(Json(clean_tags(payload.tags)))
        .bind(next_order)
        .bind(now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(job_id = %job.id, slug = %job.slug, order = job.sort_order, "job created");
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let mut tx = self.pool.begin().await?;
        let current = fetch_job(&mut tx, id).await?;

        if let Some(slug) = payload.slug.as_deref() {
            if slug != current.slug {
                ensure_slug_free(&mut tx, slug, Some(id)).await?;
            }
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET title = ?, slug = ?, status = ?, tags = ? WHERE id = ? RETURNING {JOB_COLUMNS}"
        ))
        .bind(payload.title.as_deref().map(str::trim).unwrap_or(&current.title))
        .bind(payload.slug.as_deref().unwrap_or(&current.slug))
        .bind(payload.status.unwrap_or(current.status))
        .bind(Json(payload.tags.map(clean_tags).unwrap_or(current.tags.0)))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(job_id = %id, "job updated");
        Ok(job)
    }

    /// Moves the job at `from` to `to` and shifts the jobs in between so the
    /// orders stay a dense `0..N` sequence. Either every order changes or
    /// none does.
    pub async fn reorder(&self, id: Uuid, from: i64, to: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        fetch_job(&mut tx, id).await?;

        let slots: Vec<OrderSlot> =
            sqlx::query_as::<_, (Uuid, i64)>("SELECT id, sort_order FROM jobs ORDER BY sort_order")
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .map(|(id, order)| OrderSlot { id, order })
                .collect();

        let changes = plan_reorder(&slots, from, to).map_err(|err| match err {
            ReorderError::MissingSource(_) => Error::NotFound(err.to_string()),
            ReorderError::OutOfBounds { .. } => Error::BadRequest(err.to_string()),
        })?;

        if let Some(moving) = changes.last() {
            if moving.id != id {
                return Err(Error::Conflict(format!(
                    "Job {} is not at order {}; refresh and retry",
                    id, from
                )));
            }
        } else if !slots.iter().any(|slot| slot.id == id && slot.order == from) {
            return Err(Error::Conflict(format!(
                "Job {} is not at order {}; refresh and retry",
                id, from
            )));
        }

        if !is_dense(&apply_changes(&slots, &changes)) {
            return Err(Error::Internal(
                "Reorder would leave job orders non-contiguous".into(),
            ));
        }

        // Park moved rows on distinct negative orders first so the unique
        // index never sees two rows on the same order mid-update.
        for change in &changes {
            sqlx::query("UPDATE jobs SET sort_order = ? WHERE id = ?")
                .bind(-change.to - 1)
                .bind(change.id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query("UPDATE jobs SET sort_order = -sort_order - 1 WHERE sort_order < 0")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(job_id = %id, from, to, shifted = changes.len(), "job reordered");
        Ok(())
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let (page, page_size) = page_window(query.page, query.page_size, 12, 100);

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filters.push(
                "(LOWER(title) LIKE ? ESCAPE '\\' OR LOWER(slug) LIKE ? ESCAPE '\\')".to_string(),
            );
            args.push(like_contains(search));
            args.push(like_contains(search));
        }
        if let Some(status) = query.status.status() {
            filters.push("status = ?".to_string());
            args.push(status.as_str().to_string());
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let order_clause = match query.sort {
            JobSort::Order => "sort_order ASC",
            JobSort::Title => "title COLLATE NOCASE ASC, sort_order ASC",
            JobSort::CreatedAt => "created_at DESC, sort_order ASC",
        };

        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;
        let pagination = Pagination::new(page, page_size, total);

        let items_query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs {} ORDER BY {} LIMIT ? OFFSET ?",
            where_clause, order_clause
        );
        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        let items = items_statement
            .bind(pagination.page_size)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(JobList { items, pagination })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let mut conn = self.pool.acquire().await?;
        fetch_job(&mut conn, id).await
    }
}

async fn fetch_job(conn: &mut SqliteConnection, id: Uuid) -> Result<Job> {
    sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".into()))
}

async fn ensure_slug_free(conn: &mut SqliteConnection, slug: &str, except: Option<Uuid>) -> Result<()> {
    let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE slug = ?")
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?;
    match taken {
        Some(other) if Some(other) != except => {
            Err(Error::BadRequest("Slug must be unique".into()))
        }
        _ => Ok(()),
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !cleaned.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::clean_tags;

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let tags = vec![" Remote ".into(), "remote".into(), "".into(), "Senior".into()];
        assert_eq!(clean_tags(tags), vec!["Remote".to_string(), "Senior".to_string()]);
    }
}

use crate::error::{Error, Result};
use crate::middleware::actor::Actor;
use crate::models::candidate::StageChange;
use crate::models::timeline::{ActivityRow, TimelineEvent, TimelineEventType};
use crate::utils::time::now;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, candidate_id, event_type, from_stage, to_stage, note, user_id, user_name, created_at";

/// What to record on a candidate's timeline.
#[derive(Debug, Clone, Copy)]
pub enum TimelineEntry<'a> {
    StageChanged(StageChange),
    NoteAdded(&'a str),
    AssessmentCompleted(&'a str),
}

#[derive(Clone)]
pub struct TimelineService {
    pool: SqlitePool,
}

impl TimelineService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends one event on `conn`, which is expected to carry the
    /// transaction of the change being recorded.
    pub async fn append(
        conn: &mut SqliteConnection,
        candidate_id: Uuid,
        entry: TimelineEntry<'_>,
        actor: &Actor,
    ) -> Result<TimelineEvent> {
        let (event_type, from_stage, to_stage, note) = match entry {
            TimelineEntry::StageChanged(change) => (
                TimelineEventType::StageChange,
                Some(change.from),
                Some(change.to),
                None,
            ),
            TimelineEntry::NoteAdded(content) => {
                (TimelineEventType::NoteAdded, None, None, Some(content))
            }
            TimelineEntry::AssessmentCompleted(title) => (
                TimelineEventType::AssessmentCompleted,
                None,
                None,
                Some(title),
            ),
        };

        let event = sqlx::query_as::<_, TimelineEvent>(&format!(
            "INSERT INTO timeline_events ({EVENT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(event_type)
        .bind(from_stage)
        .bind(to_stage)
        .bind(note)
        .bind(&actor.id)
        .bind(&actor.name)
        .bind(now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(event)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<TimelineEvent>> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM candidates WHERE id = ?")
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Candidate not found".into()));
        }

        let events = sqlx::query_as::<_, TimelineEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM timeline_events WHERE candidate_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<ActivityRow>> {
        let limit = if limit <= 0 { 5 } else { limit.min(50) };
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT
                e.id AS id,
                e.candidate_id AS candidate_id,
                e.event_type AS event_type,
                e.from_stage AS from_stage,
                e.to_stage AS to_stage,
                e.note AS note,
                e.user_id AS user_id,
                e.user_name AS user_name,
                e.created_at AS created_at,
                c.name AS candidate_name,
                c.avatar_url AS candidate_avatar,
                j.title AS job_title
            FROM timeline_events e
            LEFT JOIN candidates c ON c.id = e.candidate_id
            LEFT JOIN jobs j ON j.id = c.job_id
            ORDER BY e.created_at DESC, e.rowid DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

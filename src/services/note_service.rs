use crate::dto::note_dto::CreateNotePayload;
use crate::error::Result;
use crate::middleware::actor::Actor;
use crate::models::note::Note;
use crate::services::candidate_service::fetch_candidate;
use crate::services::timeline_service::{TimelineEntry, TimelineService};
use crate::utils::mentions::extract_mentions;
use crate::utils::time::now;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

const NOTE_COLUMNS: &str = "id, candidate_id, content, author, author_id, mentions, created_at";

#[derive(Clone)]
pub struct NoteService {
    pool: SqlitePool,
}

impl NoteService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Note>> {
        let mut conn = self.pool.acquire().await?;
        fetch_candidate(&mut conn, candidate_id).await?;

        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE candidate_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(candidate_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(notes)
    }

    pub async fn add_note(
        &self,
        candidate_id: Uuid,
        payload: CreateNotePayload,
        actor: &Actor,
    ) -> Result<Note> {
        let mut tx = self.pool.begin().await?;
        fetch_candidate(&mut tx, candidate_id).await?;

        let team: Vec<String> = sqlx::query_scalar("SELECT name FROM team_members")
            .fetch_all(&mut *tx)
            .await?;
        let content = payload.content.trim();
        let mentions = extract_mentions(content, &team);

        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes ({NOTE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {NOTE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(content)
        .bind(payload.author.as_deref().unwrap_or(&actor.name))
        .bind(payload.author_id.as_deref().unwrap_or(&actor.id))
        .bind(Json(&mentions))
        .bind(now())
        .fetch_one(&mut *tx)
        .await?;

        TimelineService::append(&mut tx, candidate_id, TimelineEntry::NoteAdded(content), actor)
            .await?;

        tx.commit().await?;
        info!(
            candidate_id = %candidate_id,
            note_id = %note.id,
            mentions = mentions.len(),
            "note added"
        );
        Ok(note)
    }
}

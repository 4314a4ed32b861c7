use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub content: String,
    pub author: String,
    pub author_id: String,
    pub mentions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

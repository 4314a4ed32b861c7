use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::note::Note;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    #[validate(length(min = 1, max = 5000), custom(function = "validate_not_blank"))]
    pub content: String,
    #[validate(length(min = 1))]
    pub author: Option<String>,
    #[validate(length(min = 1))]
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub content: String,
    pub author: String,
    pub author_id: String,
    pub mentions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(value: Note) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            content: value.content,
            author: value.author,
            author_id: value.author_id,
            mentions: value.mentions.0,
            timestamp: value.created_at,
        }
    }
}

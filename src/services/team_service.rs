use crate::error::Result;
use crate::models::team_member::TeamMember;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct TeamService {
    pool: SqlitePool,
}

impl TeamService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            "SELECT id, name, email, avatar_url FROM team_members ORDER BY name COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn add(&self, member: &TeamMember) -> Result<()> {
        sqlx::query(
            "INSERT INTO team_members (id, name, email, avatar_url) VALUES (?, ?, ?, ?) ON CONFLICT(id) DO NOTHING",
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.avatar_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

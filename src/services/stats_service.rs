use crate::dto::stats_dto::DashboardStats;
use crate::error::Result;
use crate::models::candidate::CandidateStage;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct StatsService {
    pool: SqlitePool,
}

impl StatsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let active_jobs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let rows: Vec<(CandidateStage, i64)> =
            sqlx::query_as("SELECT stage, COUNT(*) FROM candidates GROUP BY stage")
                .fetch_all(&self.pool)
                .await?;

        let mut stage_counts: BTreeMap<String, i64> = CandidateStage::ALL
            .iter()
            .map(|stage| (stage.as_str().to_string(), 0))
            .collect();
        for (stage, count) in &rows {
            stage_counts.insert(stage.as_str().to_string(), *count);
        }
        let count_of = |stage: CandidateStage| stage_counts[stage.as_str()];

        Ok(DashboardStats {
            active_jobs,
            total_candidates: rows.iter().map(|(_, count)| count).sum(),
            screening_candidates: count_of(CandidateStage::Screen),
            offered_candidates: count_of(CandidateStage::Offer),
            stage_counts,
        })
    }
}

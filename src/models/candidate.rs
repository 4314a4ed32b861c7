use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CandidateStage {
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

/// A move between two different stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub from: CandidateStage,
    pub to: CandidateStage,
}

impl CandidateStage {
    pub const ALL: [CandidateStage; 6] = [
        CandidateStage::Applied,
        CandidateStage::Screen,
        CandidateStage::Tech,
        CandidateStage::Offer,
        CandidateStage::Hired,
        CandidateStage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStage::Applied => "applied",
            CandidateStage::Screen => "screen",
            CandidateStage::Tech => "tech",
            CandidateStage::Offer => "offer",
            CandidateStage::Hired => "hired",
            CandidateStage::Rejected => "rejected",
        }
    }

    /// Returns the change to record when moving from `self` to `next`, or
    /// `None` when the candidate already sits in `next`.
    pub fn transition(self, next: CandidateStage) -> Option<StageChange> {
        (self != next).then_some(StageChange {
            from: self,
            to: next,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_id: Uuid,
    pub stage: CandidateStage,
    pub applied_at: DateTime<Utc>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_stage_is_not_a_transition() {
        for stage in CandidateStage::ALL {
            assert_eq!(stage.transition(stage), None);
        }
    }

    #[test]
    fn different_stage_records_both_ends() {
        let change = CandidateStage::Applied
            .transition(CandidateStage::Screen)
            .expect("stage differs");
        assert_eq!(change.from, CandidateStage::Applied);
        assert_eq!(change.to, CandidateStage::Screen);
    }

    #[test]
    fn stage_serializes_lowercase() {
        let raw = serde_json::to_string(&CandidateStage::Offer).unwrap();
        assert_eq!(raw, "\"offer\"");
        let parsed: CandidateStage = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, CandidateStage::Rejected);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_jobs: i64,
    pub total_candidates: i64,
    pub screening_candidates: i64,
    pub offered_candidates: i64,
    pub stage_counts: BTreeMap<String, i64>,
}

// src/models/rank.rs

use serde::{Deserialize, Serialize};

use super::category::PerCategory;

/// 1-based positions of one student within one exam. Computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankData {
    pub overall: usize,
    pub year: usize,
    pub branch: usize,
    pub section: usize,
    pub category: PerCategory<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

// src/handlers/leaderboard.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    config::DEFAULT_LEADERBOARD_LIMIT,
    error::AppError,
    models::{category::Category, rank::LeaderboardQuery},
    state::SharedExamService,
};

/// Rank card of one student in one exam.
pub async fn get_rank(
    State(exams): State<SharedExamService>,
    Path((id, roll_no)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let rank = exams.read().await.get_rank(&id, &roll_no).ok_or_else(|| {
        AppError::NotFound(format!(
            "No result for roll number '{}' in exam '{}'",
            roll_no, id
        ))
    })?;

    Ok(Json(rank))
}

/// Top results by total marks.
pub async fn top_performers(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    Json(exams.read().await.get_top_performers(&id, limit))
}

/// Top results by one category's marks.
pub async fn top_performers_by_category(
    State(exams): State<SharedExamService>,
    Path((id, category)): Path<(String, String)>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let category = category
        .parse::<Category>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);

    let top = exams
        .read()
        .await
        .get_top_performers_by_category(&id, category, limit);
    Ok(Json(top))
}

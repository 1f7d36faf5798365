// src/handlers/result.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::exam_result::{SubmitAnswersRequest, SubmitResultRequest},
    state::SharedExamService,
};

/// Records precomputed category marks for a student.
pub async fn submit_result(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = exams
        .write()
        .await
        .submit_result(&id, payload.student, payload.marks)?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Scores a student's answer sheet and records the result.
///
/// * Rejected with 409 unless the exam is active.
/// * Unknown question ids in the sheet are ignored.
pub async fn submit_answers(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = exams
        .write()
        .await
        .submit_answers(&id, payload.student, &payload.answers)?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// All results of an exam, highest total first.
pub async fn get_results(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(exams.read().await.get_results(&id))
}

/// A student's results across exams, most recent first.
pub async fn get_student_results(
    State(exams): State<SharedExamService>,
    Path(roll_no): Path<String>,
) -> impl IntoResponse {
    Json(exams.read().await.get_student_results(&roll_no))
}

// src/handlers/exam.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    engine::parser::parse_document_with_report,
    error::AppError,
    models::{
        category::Category,
        exam::CreateExamRequest,
        question::{Question, QuestionInput},
    },
    state::SharedExamService,
};

/// DTO for previewing how a document parses.
#[derive(Debug, Deserialize)]
pub struct ParseDocumentRequest {
    pub text: String,
    pub category: Option<String>,
}

/// Parses a document without storing anything. Returns questions and warnings.
pub async fn parse_document(
    Json(req): Json<ParseDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hint = req
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(parse_document_with_report(&req.text, hint)))
}

/// Lists all exams, newest first.
pub async fn list_exams(State(exams): State<SharedExamService>) -> impl IntoResponse {
    Json(exams.read().await.list_exams())
}

/// Creates a pending exam from one document per category.
pub async fn create_exam(
    State(exams): State<SharedExamService>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = exams
        .write()
        .await
        .create_exam(&payload.year, &payload.semester, &payload.documents);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Full exam including answers. Admin view.
pub async fn get_exam(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exams = exams.read().await;
    let exam = exams.get_exam(&id)?;
    Ok(Json(exam.clone()))
}

/// Replaces an exam's question list.
pub async fn update_questions(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
    Json(payload): Json<Vec<QuestionInput>>,
) -> Result<impl IntoResponse, AppError> {
    for q in &payload {
        q.validate()?;
    }
    let questions: Vec<Question> = payload.into_iter().map(Question::from).collect();

    let exam = exams.write().await.update_exam_questions(&id, questions)?;
    Ok(Json(exam))
}

pub async fn activate(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let link = exams.write().await.activate(&id)?;
    Ok(Json(serde_json::json!({ "link": link })))
}

pub async fn deactivate(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    exams.write().await.deactivate(&id)?;
    Ok(StatusCode::OK)
}

pub async fn reopen(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let link = exams.write().await.reopen(&id)?;
    Ok(Json(serde_json::json!({ "link": link })))
}

/// Whether the exam currently accepts students. False for unknown ids.
pub async fn status(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let active = exams.read().await.is_active(&id);
    Json(serde_json::json!({ "active": active }))
}

/// Student-facing paper without answers.
pub async fn get_paper(
    State(exams): State<SharedExamService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let paper = exams.read().await.public_paper(&id)?;
    Ok(Json(paper))
}

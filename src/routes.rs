// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, exam, leaderboard, result},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, documents, exams, students).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (exam service and configuration).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let auth_routes = Router::new().route("/login", post(auth::login));

    let document_routes = Router::new().route("/parse", post(exam::parse_document));

    let exam_routes = Router::new()
        .route("/", get(exam::list_exams).post(exam::create_exam))
        .route("/{id}", get(exam::get_exam))
        .route("/{id}/questions", put(exam::update_questions))
        .route("/{id}/activate", post(exam::activate))
        .route("/{id}/deactivate", post(exam::deactivate))
        .route("/{id}/reopen", post(exam::reopen))
        .route("/{id}/status", get(exam::status))
        .route("/{id}/paper", get(exam::get_paper))
        .route(
            "/{id}/results",
            get(result::get_results).post(result::submit_result),
        )
        .route("/{id}/submit", post(result::submit_answers))
        .route("/{id}/rank/{roll_no}", get(leaderboard::get_rank))
        .route("/{id}/leaderboard", get(leaderboard::top_performers))
        .route(
            "/{id}/leaderboard/{category}",
            get(leaderboard::top_performers_by_category),
        );

    let student_routes =
        Router::new().route("/{roll_no}/results", get(result::get_student_results));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/exams", exam_routes)
        .nest("/api/students", student_routes)
        // Global Middleware (outermost first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

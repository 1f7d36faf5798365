use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::RwLock;

use crate::{config::Config, lifecycle::ExamService};

/// The lock serializes every read and mutation of the store.
pub type SharedExamService = Arc<RwLock<ExamService>>;

#[derive(Clone)]
pub struct AppState {
    pub exams: SharedExamService,
    pub config: Config,
}

impl AppState {
    pub fn new(service: ExamService, config: Config) -> Self {
        Self {
            exams: Arc::new(RwLock::new(service)),
            config,
        }
    }
}

impl FromRef<AppState> for SharedExamService {
    fn from_ref(state: &AppState) -> Self {
        state.exams.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

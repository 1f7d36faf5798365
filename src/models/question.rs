// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::category::Category;

/// A multiple-choice question owned by one exam.
///
/// `answer` is expected to equal one of `options`, but nothing enforces it:
/// parsed documents may leave either empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: Category,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            text: text.into(),
            options: Vec::new(),
            answer: String::new(),
        }
    }

    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o == &self.answer)
    }
}

/// DTO for sending a question to students (excludes the answer).
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub category: Category,
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            category: q.category,
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// DTO for replacing an exam's question list.
/// A missing `id` gets a fresh one.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionInput {
    pub id: Option<String>,
    pub category: Category,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(max = 500))]
    pub answer: String,
}

impl From<QuestionInput> for Question {
    fn from(input: QuestionInput) -> Self {
        Self {
            id: input
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            category: input.category,
            text: input.text,
            options: input.options,
            answer: input.answer,
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

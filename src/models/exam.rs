// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    category::{Category, PerCategory},
    question::{PublicQuestion, Question},
};
use crate::engine::parser::ParseWarning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Pending,
    Active,
    Completed,
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamStatus::Pending => "pending",
            ExamStatus::Active => "active",
            ExamStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,

    /// `{year}_{semester}`.
    pub name: String,
    pub year: String,
    pub semester: String,
    pub status: ExamStatus,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,

    /// Set on first activation.
    pub link: Option<String>,
}

impl Exam {
    pub fn new(year: &str, semester: &str, questions: Vec<Question>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{}_{}", year, semester),
            year: year.to_string(),
            semester: semester.to_string(),
            status: ExamStatus::Pending,
            questions,
            created_at: Utc::now(),
            link: None,
        }
    }

    pub fn questions_in(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.category == category)
    }
}

/// DTO for creating an exam: one raw document per category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 20))]
    pub year: String,
    #[validate(length(min = 1, max = 20))]
    pub semester: String,
    #[serde(default)]
    pub documents: PerCategory<String>,
}

/// Created exam together with everything the parser flagged.
#[derive(Debug, Serialize)]
pub struct CreatedExam {
    pub exam: Exam,
    pub warnings: Vec<ParseWarning>,
}

/// Students' view of an active exam.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicExam {
    pub id: String,
    pub name: String,
    pub duration_seconds: u64,
    pub sections: Vec<PaperSection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaperSection {
    pub category: Category,
    pub questions: Vec<PublicQuestion>,
}

impl PublicExam {
    /// Groups questions by category in paper order, skipping empty categories.
    pub fn from_exam(exam: &Exam, duration_seconds: u64) -> Self {
        let sections = Category::ALL
            .iter()
            .map(|&category| PaperSection {
                category,
                questions: exam.questions_in(category).map(PublicQuestion::from).collect(),
            })
            .filter(|s| !s.questions.is_empty())
            .collect();

        Self {
            id: exam.id.clone(),
            name: exam.name.clone(),
            duration_seconds,
            sections,
        }
    }
}

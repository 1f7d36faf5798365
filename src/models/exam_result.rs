// src/models/exam_result.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    category::{Category, CategoryMarks},
    student::Student,
};

/// One submission of one student for one exam. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: String,
    pub exam_id: String,
    pub exam_name: String,
    pub student_id: String,
    pub student: Student,

    /// Always the sum of the category marks.
    pub total_marks: u64,
    pub coding_marks: u32,
    pub math_marks: u32,
    pub aptitude_marks: u32,
    pub communication_marks: u32,

    pub completed_at: DateTime<Utc>,
}

impl ExamResult {
    pub fn marks(&self, category: Category) -> u32 {
        match category {
            Category::Coding => self.coding_marks,
            Category::Math => self.math_marks,
            Category::Aptitude => self.aptitude_marks,
            Category::Communication => self.communication_marks,
        }
    }
}

/// DTO for recording already computed marks.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitResultRequest {
    #[validate(nested)]
    pub student: Student,
    pub marks: CategoryMarks,
}

/// DTO for a student's answer sheet.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswersRequest {
    #[validate(nested)]
    pub student: Student,

    /// Key: question id. Value: selected option text.
    #[serde(default)]
    pub answers: HashMap<String, String>,
}
